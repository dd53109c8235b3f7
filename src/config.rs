use std::fmt;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_PORT: u16 = 7860;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration, parsed from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    pub openweather_api_key: String,
    pub openweather_base_url: String,
    pub http_timeout: Duration,
    /// Replace provider failures with generated sample data instead of
    /// returning an upstream error.
    pub allow_synthetic_fallback: bool,
    /// Fixed seed for the sample-data random source. `None` seeds from the OS.
    pub sample_seed: Option<u64>,
    pub port: u16,
    pub log_format: LogFormat,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("openweather_api_key", &"<redacted>")
            .field("openweather_base_url", &self.openweather_base_url)
            .field("http_timeout", &self.http_timeout)
            .field("allow_synthetic_fallback", &self.allow_synthetic_fallback)
            .field("sample_seed", &self.sample_seed)
            .field("port", &self.port)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let openweather_api_key =
            var("OPENWEATHER_API_KEY").ok_or(ConfigError::Missing("OPENWEATHER_API_KEY"))?;

        let openweather_base_url = var("OPENWEATHER_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let http_timeout = match var("HTTP_TIMEOUT_SECS") {
            Some(v) => match parse_number::<u64>("HTTP_TIMEOUT_SECS", &v)? {
                0 => {
                    return Err(ConfigError::Invalid {
                        name: "HTTP_TIMEOUT_SECS",
                        value: v,
                        reason: "must be at least 1 second".to_string(),
                    })
                }
                secs => Duration::from_secs(secs),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let allow_synthetic_fallback = match var("ALLOW_SYNTHETIC_FALLBACK") {
            Some(v) => parse_bool("ALLOW_SYNTHETIC_FALLBACK", &v)?,
            None => true,
        };

        let sample_seed = var("SAMPLE_SEED")
            .map(|v| parse_number("SAMPLE_SEED", &v))
            .transpose()?;

        let port = match var("PORT") {
            Some(v) => parse_number("PORT", &v)?,
            None => DEFAULT_PORT,
        };

        let log_format = match var("LOG_FORMAT").as_deref().map(str::to_lowercase) {
            None => LogFormat::Text,
            Some(f) if f == "text" => LogFormat::Text,
            Some(f) if f == "json" => LogFormat::Json,
            Some(f) => {
                return Err(ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    value: f,
                    reason: "expected 'text' or 'json'".to_string(),
                })
            }
        };

        Ok(Self {
            openweather_api_key,
            openweather_base_url,
            http_timeout,
            allow_synthetic_fallback,
            sample_seed,
            port,
            log_format,
        })
    }
}

fn parse_number<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

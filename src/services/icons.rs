/// Condition keywords in priority order, with their glyphs.
const ICONS: [(&str, &str); 5] = [
    ("clear", "☀️"),
    ("cloud", "☁️"),
    ("rain", "🌧️"),
    ("snow", "❄️"),
    ("thunder", "⛈️"),
];

const DEFAULT_ICON: &str = "🌤️";

/// Emoji for a free-text condition description. First keyword match wins.
pub fn icon_for(description: &str) -> &'static str {
    let lower = description.to_lowercase();
    ICONS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

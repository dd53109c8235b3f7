pub mod charts;
pub mod icons;
pub mod openweather;
pub mod report;
pub mod sample;
pub mod weather;

//! Daily weather forecast model

use serde::{Deserialize, Serialize};

/// One day of a forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Day number starting at 1
    pub day: u8,
    /// Human-readable condition label
    pub condition: String,
    /// Daytime high in Celsius
    pub temp_high: i32,
    /// Overnight low in Celsius
    pub temp_low: i32,
}

impl DailyForecast {
    /// Format temperature range with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C / {}°C", self.temp_high, self.temp_low)
    }
}

/// Multi-day forecast for a destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub forecast: Vec<DailyForecast>,
}

impl WeatherForecast {
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

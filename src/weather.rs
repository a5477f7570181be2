//! Fixture weather forecasts for destinations

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::{debug, warn};

use crate::models::{DailyForecast, WeatherForecast, eq_ignore_case};

const FORECAST_DAYS: u8 = 7;

static KNOWN_FORECASTS: LazyLock<HashMap<String, WeatherForecast>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("data/weather.json")).unwrap_or_else(|e| {
        warn!("Built-in weather data could not be parsed: {}", e);
        HashMap::new()
    })
});

/// Seven-day forecast for `destination`; unknown places get a generic sunny week
#[must_use]
pub fn get_forecast(destination: &str) -> WeatherForecast {
    let found = KNOWN_FORECASTS
        .iter()
        .find(|(name, _)| eq_ignore_case(name, destination))
        .map(|(_, forecast)| forecast.clone());

    match found {
        Some(forecast) => forecast,
        None => {
            debug!(destination, "No forecast on file, using generic forecast");
            generic_forecast()
        }
    }
}

fn generic_forecast() -> WeatherForecast {
    WeatherForecast {
        forecast: (1..=FORECAST_DAYS)
            .map(|day| DailyForecast {
                day,
                condition: "Sunny".to_string(),
                temp_high: 25,
                temp_low: 18,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_destination() {
        let forecast = get_forecast("Bali");
        assert_eq!(forecast.forecast.len(), 7);
        assert_eq!(forecast.forecast[4].condition, "Thunderstorm");
        assert_eq!(forecast.forecast[0].temp_high, 31);
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(get_forecast("tokyo"), get_forecast("Tokyo"));
        assert_eq!(get_forecast(" PARIS "), get_forecast("Paris"));
    }

    #[test]
    fn test_unknown_destination_is_generic() {
        let forecast = get_forecast("Atlantis");
        assert_eq!(forecast.forecast.len(), 7);
        assert!(forecast.forecast.iter().all(|d| d.condition == "Sunny"
            && d.temp_high == 25
            && d.temp_low == 18));
        let days: Vec<u8> = forecast.forecast.iter().map(|d| d.day).collect();
        assert_eq!(days, vec![1, 2, 3, 4, 5, 6, 7]);
    }
}

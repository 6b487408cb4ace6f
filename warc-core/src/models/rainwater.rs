use serde::{Deserialize, Serialize};

/// Days of weather history the harvesting model expects.
pub const WEATHER_WINDOW_DAYS: usize = 30;

/// One day of weather input:
/// `[rainfall, temperature, humidity, wind_speed, roof_area, reserved]`.
/// The last slot is always zero.
pub type WeatherRow = [f64; 6];

/// Single-day observations the form collects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherDay {
    pub rainfall: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub roof_area: f64,
}

impl WeatherDay {
    pub fn to_row(&self) -> WeatherRow {
        [
            self.rainfall,
            self.temperature,
            self.humidity,
            self.wind_speed,
            self.roof_area,
            0.0,
        ]
    }

    /// Builds a synthetic history by repeating this day across the whole
    /// window.
    pub fn repeat_window(&self) -> Vec<WeatherRow> {
        vec![self.to_row(); WEATHER_WINDOW_DAYS]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainwaterRequest {
    pub weather_data: Vec<WeatherRow>,
    pub current_storage: f64,
    pub max_capacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainwaterPrediction {
    /// Cubic meters.
    pub predicted_harvestable_water: f64,
    pub suggestion: String,
}

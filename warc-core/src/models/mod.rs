pub mod irrigation;
pub mod leak;
pub mod rainwater;
pub mod scenario;

use thiserror::Error;

pub use irrigation::{CropType, GrowthStage, IrrigationRecommendation, IrrigationRequest, SoilType};
pub use leak::{LeakDetectionRequest, LeakPrediction};
pub use rainwater::{
    RainwaterPrediction, RainwaterRequest, WEATHER_WINDOW_DAYS, WeatherDay, WeatherRow,
};
pub use scenario::{Scenario, ScenarioColumn, ScenarioRequest};

/// A text value that doesn't name any known option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised {kind} '{value}'")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

impl ParseOptionError {
    pub(crate) fn new(
        kind: &'static str,
        value: &str,
    ) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

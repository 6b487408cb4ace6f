use serde::{Deserialize, Serialize};

/// Body sent to the leak detection service. Readings travel as the
/// numeric text the user entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeakDetectionRequest {
    pub pressure: String,
    pub flow_rate: String,
    pub vibration: String,
    pub temperature: String,
    pub acoustic_signal: String,
    pub pipe_age: String,
    pub distance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeakPrediction {
    pub leak_detected: bool,
    /// Probability in the range 0–1.
    pub leak_probability: f64,
    /// Distance along the pipeline in meters. Services may omit it or send
    /// `null` when no leak is detected.
    #[serde(default)]
    pub leak_location: Option<f64>,
}

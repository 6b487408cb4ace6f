use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ParseOptionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub num_scenarios: u32,
}

/// One generated water conservation scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(rename = "Irrigation_Efficiency")]
    pub irrigation_efficiency: f64,
    #[serde(rename = "Rainfall")]
    pub rainfall: f64,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "Soil_Moisture")]
    pub soil_moisture: f64,
    #[serde(rename = "Crop_Type")]
    pub crop_type: String,
    #[serde(rename = "Water_Saved")]
    pub water_saved: f64,
    #[serde(rename = "Water_Conservation_Efficiency")]
    pub water_conservation_efficiency: f64,
}

/// Columns of the scenario table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioColumn {
    IrrigationEfficiency,
    Rainfall,
    Temperature,
    SoilMoisture,
    CropType,
    WaterSaved,
    WaterConservationEfficiency,
}

impl ScenarioColumn {
    pub const ALL: [ScenarioColumn; 7] = [
        Self::IrrigationEfficiency,
        Self::Rainfall,
        Self::Temperature,
        Self::SoilMoisture,
        Self::CropType,
        Self::WaterSaved,
        Self::WaterConservationEfficiency,
    ];

    /// Key as it appears in the service response.
    pub fn key(&self) -> &'static str {
        match self {
            Self::IrrigationEfficiency => "Irrigation_Efficiency",
            Self::Rainfall => "Rainfall",
            Self::Temperature => "Temperature",
            Self::SoilMoisture => "Soil_Moisture",
            Self::CropType => "Crop_Type",
            Self::WaterSaved => "Water_Saved",
            Self::WaterConservationEfficiency => "Water_Conservation_Efficiency",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::IrrigationEfficiency => {
                "The efficiency of water delivery in irrigation systems, typically expressed as a percentage."
            }
            Self::Rainfall => {
                "The amount of rain received during a specific period, measured in millimeters."
            }
            Self::Temperature => {
                "The average temperature in degrees Celsius over the growing period."
            }
            Self::SoilMoisture => {
                "The amount of moisture present in the soil, essential for plant growth."
            }
            Self::CropType => "The type of crop being grown, which may affect water needs.",
            Self::WaterSaved => {
                "The total amount of water saved through conservation efforts, measured in liters."
            }
            Self::WaterConservationEfficiency => {
                "The overall efficiency of water conservation methods, often expressed as a percentage."
            }
        }
    }

    /// Cell text for this column of `scenario`.
    pub fn cell(
        &self,
        scenario: &Scenario,
    ) -> String {
        match self {
            Self::IrrigationEfficiency => scenario.irrigation_efficiency.to_string(),
            Self::Rainfall => scenario.rainfall.to_string(),
            Self::Temperature => scenario.temperature.to_string(),
            Self::SoilMoisture => scenario.soil_moisture.to_string(),
            Self::CropType => scenario.crop_type.clone(),
            Self::WaterSaved => scenario.water_saved.to_string(),
            Self::WaterConservationEfficiency => scenario.water_conservation_efficiency.to_string(),
        }
    }
}

impl FromStr for ScenarioColumn {
    type Err = ParseOptionError;

    /// Accepts the response key in any case, with spaces or underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(' ', "_");
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ParseOptionError::new("scenario column", s))
    }
}

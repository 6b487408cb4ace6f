use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ParseOptionError;

/// Declares a lowercase-serialized option enum with its list of names.
macro_rules! option_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const NAMES: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseOptionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(ParseOptionError::new($kind, s)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(
                &self,
                f: &mut fmt::Formatter<'_>,
            ) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

option_enum!(CropType, "crop type", {
    Wheat => "wheat",
    Rice => "rice",
    Corn => "corn",
    Cotton => "cotton",
});

option_enum!(GrowthStage, "growth stage", {
    Seedling => "seedling",
    Vegetative => "vegetative",
    Flowering => "flowering",
    Fruiting => "fruiting",
});

option_enum!(SoilType, "soil type", {
    Clay => "clay",
    Loam => "loam",
    Sandy => "sandy",
});

/// Body sent to the irrigation service. Measurements and the date travel
/// as text, options as their lowercase names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrrigationRequest {
    pub date: String,
    pub temperature: String,
    pub humidity: String,
    pub soil_moisture: String,
    pub rainfall_last_7days: String,
    pub crop_type: CropType,
    pub growth_stage: GrowthStage,
    pub soil_type: SoilType,
    pub area_hectares: String,
    pub sunlight_hours: String,
    pub wind_speed: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationRecommendation {
    pub irrigation_amount_liters: f64,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn option_names_round_trip_through_from_str() {
        for name in CropType::NAMES {
            assert_eq!(name.parse::<CropType>().unwrap().as_str(), *name);
        }
        for name in GrowthStage::NAMES {
            assert_eq!(name.parse::<GrowthStage>().unwrap().as_str(), *name);
        }
        for name in SoilType::NAMES {
            assert_eq!(name.parse::<SoilType>().unwrap().as_str(), *name);
        }
    }

    #[test]
    fn unknown_option_is_rejected_with_kind() {
        let err = "peat".parse::<SoilType>().unwrap_err();
        assert_eq!(err.to_string(), "unrecognised soil type 'peat'");
    }

    #[test]
    fn options_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&GrowthStage::Vegetative).unwrap(), "\"vegetative\"");
        assert_eq!(serde_json::to_string(&CropType::Cotton).unwrap(), "\"cotton\"");
    }
}

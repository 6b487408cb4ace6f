//! The four dashboard pages.
//!
//! Each page is a unit struct implementing [`Page`]: its form schema, how a
//! validated form becomes a request body, the response it expects back, and
//! how that response is presented. The generic
//! [`FormController`](crate::controller::FormController) does the rest.

pub mod irrigation;
pub mod leak;
pub mod rainwater;
pub mod scenario;

use std::{fmt, str::FromStr};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{
    form::{FormError, FormSchema, ValidForm},
    view::ResultView,
};

pub use irrigation::Irrigation;
pub use leak::LeakDetection;
pub use rainwater::RainwaterHarvesting;
pub use scenario::ScenarioGenerator;

pub trait Page: Send + Sync + 'static {
    type Request: Serialize;
    type Response: DeserializeOwned + Clone + fmt::Debug + Send;

    const KIND: PageKind;
    const SCHEMA: FormSchema;
    /// Message shown to the user when a submission fails for any reason.
    const ERROR_MESSAGE: &'static str;

    fn build_request(form: &ValidForm) -> Result<Self::Request, FormError>;

    fn view(response: &Self::Response) -> ResultView;
}

/// Identifies a page independently of its type, for navigation and config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    LeakDetection,
    Irrigation,
    Rainwater,
    Scenarios,
}

impl PageKind {
    pub const ALL: [PageKind; 4] = [
        Self::LeakDetection,
        Self::Irrigation,
        Self::Rainwater,
        Self::Scenarios,
    ];

    /// Short name used on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::LeakDetection => "leak",
            Self::Irrigation => "irrigation",
            Self::Rainwater => "rainwater",
            Self::Scenarios => "scenarios",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::LeakDetection => "Water Pipeline Leak Detection System",
            Self::Irrigation => "Irrigation Recommendation System",
            Self::Rainwater => "Rainwater Harvesting Prediction",
            Self::Scenarios => "Water Conservation Scenario Generator",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Self::LeakDetection => "Predict pipeline leaks from pressure, flow and acoustic readings.",
            Self::Irrigation => "Recommend an irrigation volume for a field and crop.",
            Self::Rainwater => "Estimate harvestable rainwater and get a storage suggestion.",
            Self::Scenarios => "Generate a table of water conservation scenarios.",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::LeakDetection => "http://localhost:9052/predict",
            Self::Irrigation => "http://localhost:9082/predict",
            Self::Rainwater => "http://localhost:7956/predict",
            Self::Scenarios => "http://127.0.0.1:5000/generate_scenarios",
        }
    }

    pub fn schema(&self) -> FormSchema {
        match self {
            Self::LeakDetection => LeakDetection::SCHEMA,
            Self::Irrigation => Irrigation::SCHEMA,
            Self::Rainwater => RainwaterHarvesting::SCHEMA,
            Self::Scenarios => ScenarioGenerator::SCHEMA,
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown page '{0}'; expected one of: leak, irrigation, rainwater, scenarios")]
pub struct ParsePageError(String);

impl FromStr for PageKind {
    type Err = ParsePageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leak" | "leak-detection" | "leakdet" => Ok(Self::LeakDetection),
            "irrigation" => Ok(Self::Irrigation),
            "rainwater" | "rain" => Ok(Self::Rainwater),
            "scenarios" | "scenario" => Ok(Self::Scenarios),
            _ => Err(ParsePageError(s.to_string())),
        }
    }
}

//! Dashboard configuration file.
//!
//! Every section is optional; missing keys fall back to the defaults below.
//!
//! ```toml
//! backend = "http"
//! timeout_secs = 30
//!
//! [endpoints]
//! leak_detection = "http://localhost:9052/predict"
//! irrigation = "http://localhost:9082/predict"
//! rainwater = "http://localhost:7956/predict"
//! scenarios = "http://127.0.0.1:5000/generate_scenarios"
//!
//! [logging]
//! level = "info"
//! file = "warc.log"
//! stdout = true
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;
use warc_core::{PageKind, ServiceConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Name of a backend registered in the service registry.
    pub backend: String,
    pub timeout_secs: Option<u64>,
    pub endpoints: EndpointConfig,
    pub logging: LoggingConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            timeout_secs: None,
            endpoints: EndpointConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointConfig {
    pub leak_detection: String,
    pub irrigation: String,
    pub rainwater: String,
    pub scenarios: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            leak_detection: PageKind::LeakDetection.default_endpoint().to_string(),
            irrigation: PageKind::Irrigation.default_endpoint().to_string(),
            rainwater: PageKind::Rainwater.default_endpoint().to_string(),
            scenarios: PageKind::Scenarios.default_endpoint().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Bare level or full filter directive. `None` keeps `RUST_LOG` or the
    /// built-in default.
    pub level: Option<String>,
    pub file: Option<PathBuf>,
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            file: None,
            stdout: true,
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        if config.timeout_secs == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn endpoint(
        &self,
        page: PageKind,
    ) -> &str {
        match page {
            PageKind::LeakDetection => &self.endpoints.leak_detection,
            PageKind::Irrigation => &self.endpoints.irrigation,
            PageKind::Rainwater => &self.endpoints.rainwater,
            PageKind::Scenarios => &self.endpoints.scenarios,
        }
    }

    pub fn set_endpoint(
        &mut self,
        page: PageKind,
        url: impl Into<String>,
    ) {
        let slot = match page {
            PageKind::LeakDetection => &mut self.endpoints.leak_detection,
            PageKind::Irrigation => &mut self.endpoints.irrigation,
            PageKind::Rainwater => &mut self.endpoints.rainwater,
            PageKind::Scenarios => &mut self.endpoints.scenarios,
        };
        *slot = url.into();
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            backend: self.backend.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

pub mod client;
pub mod factory;

pub use client::{PredictionService, ServiceError};
pub use factory::{ServiceConfig, ServiceFactory, ServiceRegistry};

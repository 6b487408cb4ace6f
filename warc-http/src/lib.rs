//! HTTP backend for the dashboard's prediction services.

pub mod client;
pub mod factory;

pub use client::HttpPredictionService;
pub use factory::HttpServiceFactory;

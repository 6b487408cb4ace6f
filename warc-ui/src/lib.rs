pub mod app;
pub mod config;
pub mod csv_loader;
pub mod logging;
pub mod prompt;
pub mod render;

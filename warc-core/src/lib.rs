//! Core of the W-ARC water management dashboard.
//!
//! Pages, their forms and wire models, the generic form controller and the
//! [`PredictionService`] seam the HTTP backend plugs into. Nothing here
//! knows how results are drawn.

pub mod controller;
pub mod form;
pub mod models;
pub mod pages;
pub mod service;
pub mod status;
pub mod view;

pub use controller::{Applied, Completion, FormController, Submission};
pub use form::{FieldError, FieldKind, FieldSpec, FormError, FormSchema, FormState, ValidForm};
pub use pages::{Irrigation, LeakDetection, Page, PageKind, RainwaterHarvesting, ScenarioGenerator};
pub use service::{PredictionService, ServiceConfig, ServiceError, ServiceFactory, ServiceRegistry};
pub use status::{Status, StatusEvent};
pub use view::{Chart, ChartKind, ChartPoint, Column, Emphasis, Metric, ResultView, Table};

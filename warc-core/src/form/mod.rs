//! Form schema, form state and validation.
//!
//! A [`FormState`] is the in-memory mapping from field name to the raw text
//! the user typed. Values are only interpreted when the form is validated,
//! which produces a [`ValidForm`] that page request builders read from.

pub mod schema;
pub mod state;

use thiserror::Error;

pub use schema::{FieldKind, FieldSpec, FormSchema, humanize_key};
pub use state::{FormState, ValidForm};

/// A single field problem found during validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a valid number (got '{value}')")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be a positive whole number (got '{value}')")]
    NotAnInteger { field: &'static str, value: String },

    #[error("{field} must be a date in YYYY-MM-DD form (got '{value}')")]
    NotADate { field: &'static str, value: String },

    #[error("{field} must be one of {options:?} (got '{value}')")]
    NotAnOption {
        field: &'static str,
        value: String,
        options: &'static [&'static str],
    },
}

impl FieldError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::NotANumber { field, .. }
            | Self::NotAnInteger { field, .. }
            | Self::NotADate { field, .. }
            | Self::NotAnOption { field, .. } => *field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("form has {} invalid field(s): {}", .0.len(), join_errors(.0))]
    Invalid(Vec<FieldError>),
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

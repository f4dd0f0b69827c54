//! Error types for the gridplan analysis library.
//!
//! Only configuration errors are fatal; everything recoverable is routed
//! through [`crate::model::Diagnostic`] records instead.

use thiserror::Error;

/// Primary error type for analysis operations.
#[derive(Error, Debug)]
pub enum GridPlanError {
    #[error("invalid setting `{name}`: {value} must be {constraint}")]
    InvalidSetting {
        name: &'static str,
        value: f64,
        constraint: &'static str,
    },

    #[error("space detection requires min_lines >= 3, got {0}")]
    MinLinesTooSmall(usize),
}

/// Convenience Result type alias for GridPlanError.
pub type Result<T> = std::result::Result<T, GridPlanError>;

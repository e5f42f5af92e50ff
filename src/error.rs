//! Error types for weld group analysis

use thiserror::Error;

use crate::results::EquilibriumReport;

/// Main error type for weld group operations
#[derive(Error, Debug)]
pub enum WeldError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Weld group has no fibers - add a line, rectangle, or circle first")]
    EmptyGroup,

    #[error("No applied load - all six load components are zero")]
    NoLoad,

    #[error("Equilibrium check failed:\n{0}")]
    Equilibrium(EquilibriumReport),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for weld group operations
pub type WeldResult<T> = Result<T, WeldError>;

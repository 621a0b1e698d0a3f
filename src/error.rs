//! Error handling for Flowest
//!
//! Simulation inputs are validated into typed errors so callers can tell a
//! bad holding from a bad parameter; everything above the library (CLI,
//! config, file loading) uses anyhow for context chaining.

use thiserror::Error;

/// Validation failures of a single simulation attempt.
///
/// None of these are fatal to the host: each one is scoped to the inputs of
/// one run and the user is expected to correct them and retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("invalid holding {ticker}: {reason}")]
    InvalidHolding { ticker: String, reason: String },

    #[error("add at least one asset with a dividend yield greater than zero to simulate")]
    NoYield,

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("projection overflowed at month {month_index}; reduce the horizon or the yield")]
    ProjectionOverflow { month_index: u32 },
}

impl SimulationError {
    pub(crate) fn invalid_holding(ticker: &str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidHolding {
            ticker: if ticker.trim().is_empty() {
                "<no ticker>".to_string()
            } else {
                ticker.to_string()
            },
            reason: reason.into(),
        }
    }
}

/// Result type alias for application-level operations
pub type Result<T> = anyhow::Result<T>;

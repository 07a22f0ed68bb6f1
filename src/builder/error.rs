//! Errors raised while configuring and creating a light.

use crate::core::LightState;
use std::time::Duration;
use thiserror::Error;

/// A single problem found in a timing configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TimingError {
    #[error("Interval must be greater than zero")]
    ZeroInterval,

    #[error("The {step} step must be greater than zero milliseconds")]
    ZeroStep { step: &'static str },

    #[error("{state:?} phase lasts {actual:?}, longer than the maximum {max:?}")]
    PhaseTooLong {
        state: LightState,
        actual: Duration,
        max: Duration,
    },

    #[error("History limit {limit} exceeds the maximum {max}")]
    HistoryTooLarge { limit: usize, max: usize },
}

/// Errors that can occur when building a light.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid timing configuration: {}", join(.0))]
    InvalidTiming(Vec<TimingError>),

    #[error("Timing configuration could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No Tokio runtime available. Start the light from within a runtime")]
    NoRuntime,
}

fn join(errors: &[TimingError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

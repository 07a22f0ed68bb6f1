//! Configuration and construction of lights.
//!
//! This module provides the timing configuration, a fluent builder, and the
//! `state_enum!` macro used to declare state types.

pub mod error;
pub mod machine;
pub mod macros;
pub mod timing;

pub use error::{BuildError, TimingError};
pub use machine::TrafficLightBuilder;
pub use timing::{TimingConfig, MAX_HISTORY, MAX_PHASE};

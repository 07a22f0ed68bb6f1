//! Timing configuration and its validation.
//!
//! Validation uses Stillwater's `Validation` so that every problem in a
//! configuration is reported at once instead of one per attempt.

use crate::builder::error::{BuildError, TimingError};
use crate::core::LightState;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Longest phase a light may be configured with.
pub const MAX_PHASE: Duration = Duration::from_secs(24 * 60 * 60);

/// Largest history window a light may keep.
pub const MAX_HISTORY: usize = 4096;

/// Timer settings for a light.
///
/// Phase durations are `interval × step`: Yellow uses the short step, Green
/// and Red use the long step, RedBlink has no timer.
///
/// Missing JSON fields fall back to the defaults:
///
/// ```rust
/// use stoplight::builder::TimingConfig;
///
/// let config = TimingConfig::from_json(r#"{ "interval": 2 }"#).unwrap();
/// assert_eq!(config.interval, 2);
/// assert_eq!(config.long_step_ms, 4000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub interval: u32,
    pub short_step_ms: u64,
    pub long_step_ms: u64,
    /// Number of transitions retained in the history window.
    pub history_limit: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            interval: 5,
            short_step_ms: 1000,
            long_step_ms: 4000,
            history_limit: 64,
        }
    }
}

impl TimingConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Timer period for a state, or `None` when the state has no timer.
    pub fn phase_duration(&self, state: LightState) -> Option<Duration> {
        let step = match state {
            LightState::Green | LightState::Red => self.long_step_ms,
            LightState::Yellow => self.short_step_ms,
            LightState::RedBlink => return None,
        };
        Some(Duration::from_millis(
            u64::from(self.interval).saturating_mul(step),
        ))
    }

    /// Check the configuration, accumulating ALL problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<TimingError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<TimingError>>> = Vec::new();

        checks.push(if self.interval == 0 {
            Validation::fail(TimingError::ZeroInterval)
        } else {
            Validation::success(())
        });

        for (step, millis) in [("short", self.short_step_ms), ("long", self.long_step_ms)] {
            checks.push(if millis == 0 {
                Validation::fail(TimingError::ZeroStep { step })
            } else {
                Validation::success(())
            });
        }

        for state in LightState::ALL {
            if let Some(actual) = self.phase_duration(state) {
                checks.push(if actual > MAX_PHASE {
                    Validation::fail(TimingError::PhaseTooLong {
                        state,
                        actual,
                        max: MAX_PHASE,
                    })
                } else {
                    Validation::success(())
                });
            }
        }

        checks.push(if self.history_limit > MAX_HISTORY {
            Validation::fail(TimingError::HistoryTooLarge {
                limit: self.history_limit,
                max: MAX_HISTORY,
            })
        } else {
            Validation::success(())
        });

        Validation::all_vec(checks).map(|_| ())
    }

    /// Return the configuration if it is valid.
    pub fn validated(self) -> Result<Self, BuildError> {
        match self.validate() {
            Validation::Success(()) => Ok(self),
            Validation::Failure(errors) => Err(BuildError::InvalidTiming(
                errors.iter().cloned().collect(),
            )),
        }
    }
}

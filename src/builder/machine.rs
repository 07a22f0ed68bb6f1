//! Builder for constructing lights.

use crate::builder::error::BuildError;
use crate::builder::timing::TimingConfig;
use crate::effects::LightMachine;
use crate::runtime::TrafficLight;

/// Builder for constructing lights with a fluent API.
///
/// ```rust
/// use stoplight::builder::TrafficLightBuilder;
/// use stoplight::core::LightState;
///
/// let machine = TrafficLightBuilder::new()
///     .interval(2)
///     .history_limit(16)
///     .build_machine()
///     .unwrap();
///
/// assert_eq!(machine.current_state(), LightState::Green);
/// assert_eq!(machine.context().interval, 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TrafficLightBuilder {
    timing: TimingConfig,
}

impl TrafficLightBuilder {
    /// Create a new builder with default timing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole timing configuration.
    pub fn timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Set the duration multiplier.
    pub fn interval(mut self, interval: u32) -> Self {
        self.timing.interval = interval;
        self
    }

    /// Set the step used for Yellow.
    pub fn short_step_ms(mut self, millis: u64) -> Self {
        self.timing.short_step_ms = millis;
        self
    }

    /// Set the step used for Green and Red.
    pub fn long_step_ms(mut self, millis: u64) -> Self {
        self.timing.long_step_ms = millis;
        self
    }

    /// Set how many transitions the history keeps.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.timing.history_limit = limit;
        self
    }

    /// Build the pure machine without starting any timer.
    pub fn build_machine(self) -> Result<LightMachine, BuildError> {
        let timing = self.timing.validated()?;
        Ok(LightMachine::new(timing))
    }

    /// Build the machine and start it on the current Tokio runtime.
    pub fn start(self) -> Result<TrafficLight, BuildError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| BuildError::NoRuntime)?;
        let machine = self.build_machine()?;
        Ok(TrafficLight::start(machine, handle))
    }
}

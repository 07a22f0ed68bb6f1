//! The pure traffic light state machine.

use crate::builder::TimingConfig;
use crate::core::{Context, EventKind, LightEvent, LightState, StateHistory, StateTransition};
use crate::effects::transition::{Step, TimerDirective, TransitionTable};
use chrono::Utc;

/// Traffic light state machine without any timers attached.
///
/// `apply` is synchronous and total: every event either produces a `Step`
/// describing the transition and the timer action the caller must carry
/// out, or returns `None` leaving the machine untouched.
///
/// ```rust
/// use stoplight::builder::TimingConfig;
/// use stoplight::core::{LightEvent, LightState};
/// use stoplight::effects::{LightMachine, TimerDirective};
/// use std::time::Duration;
///
/// let mut machine = LightMachine::new(TimingConfig::default());
/// let step = machine.apply(LightEvent::Change).unwrap();
///
/// assert_eq!(step.to, LightState::Yellow);
/// assert_eq!(step.timer, TimerDirective::Restart(Duration::from_secs(5)));
/// assert!(machine.apply(LightEvent::Outage(false)).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct LightMachine {
    current: LightState,
    context: Context,
    table: TransitionTable,
    timing: TimingConfig,
    history: StateHistory<LightState>,
}

impl LightMachine {
    /// Create a machine in Green with the standard transition table.
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            current: LightState::Green,
            context: Context::new(timing.interval),
            table: TransitionTable::standard(),
            history: StateHistory::with_limit(timing.history_limit),
            timing,
        }
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> LightState {
        self.current
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn history(&self) -> &StateHistory<LightState> {
        &self.history
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Timer action for the state the machine is currently in.
    ///
    /// Used once at start-up, where no transition has produced a directive.
    pub fn entry_timer(&self) -> TimerDirective {
        self.timer_for(self.current)
    }

    /// Apply an event, returning the resulting step or `None` for a no-op.
    pub fn apply(&mut self, event: LightEvent) -> Option<Step> {
        let kind = event.kind();
        let transition = self.table.find(self.current, kind, &self.context)?;

        let from = self.current;
        let to = transition.target_state(&self.context);

        match kind {
            EventKind::Change => self.context.elapsed = 0,
            EventKind::OutageBegin => {
                self.context.outage = true;
                self.context.pre_outage_state = from;
            }
            EventKind::OutageEnd => self.context.outage = false,
        }
        self.context.light = to;
        self.current = to;

        self.history.record(StateTransition {
            from,
            to,
            event,
            timestamp: Utc::now(),
        });

        Some(Step {
            from,
            to,
            event,
            timer: self.timer_for(to),
        })
    }

    fn timer_for(&self, state: LightState) -> TimerDirective {
        match self.timing.phase_duration(state) {
            Some(period) => TimerDirective::Restart(period),
            None => TimerDirective::Stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn machine() -> LightMachine {
        LightMachine::new(TimingConfig::default())
    }

    #[test]
    fn starts_green_with_long_timer() {
        let machine = machine();

        assert_eq!(machine.current_state(), LightState::Green);
        assert_eq!(machine.context(), &Context::new(5));
        assert_eq!(
            machine.entry_timer(),
            TimerDirective::Restart(Duration::from_secs(20))
        );
        assert!(machine.history().is_empty());
    }

    #[test]
    fn green_change_goes_yellow() {
        let mut machine = machine();
        machine.context.elapsed = 7;

        let step = machine.apply(LightEvent::Change).unwrap();

        assert_eq!(step.from, LightState::Green);
        assert_eq!(step.to, LightState::Yellow);
        assert_eq!(step.timer, TimerDirective::Restart(Duration::from_secs(5)));
        assert_eq!(machine.context().light, LightState::Yellow);
        assert_eq!(machine.context().elapsed, 0);
        assert!(!machine.context().outage);
    }

    #[test]
    fn full_cycle_returns_to_green() {
        let mut machine = machine();

        let path: Vec<_> = (0..3)
            .filter_map(|_| machine.apply(LightEvent::Change))
            .map(|step| (step.to, step.timer))
            .collect();

        assert_eq!(
            path,
            vec![
                (LightState::Yellow, TimerDirective::Restart(Duration::from_secs(5))),
                (LightState::Red, TimerDirective::Restart(Duration::from_secs(20))),
                (LightState::Green, TimerDirective::Restart(Duration::from_secs(20))),
            ]
        );
        assert_eq!(machine.history().len(), 3);
    }

    #[test]
    fn outage_from_green_stops_timer() {
        let mut machine = machine();

        let step = machine.apply(LightEvent::Outage(true)).unwrap();

        assert_eq!(step.to, LightState::RedBlink);
        assert_eq!(step.timer, TimerDirective::Stop);
        assert!(machine.context().outage);
        assert_eq!(machine.context().pre_outage_state, LightState::Green);
        assert_eq!(machine.context().light, LightState::RedBlink);
    }

    #[test]
    fn outage_end_restores_yellow_and_resumes_its_timer() {
        let mut machine = machine();
        machine.apply(LightEvent::Change);
        machine.apply(LightEvent::Outage(true));

        let step = machine.apply(LightEvent::Outage(false)).unwrap();

        assert_eq!(step.to, LightState::Yellow);
        assert_eq!(step.timer, TimerDirective::Restart(Duration::from_secs(5)));
        assert!(!machine.context().outage);
        assert_eq!(machine.context().light, LightState::Yellow);
    }

    #[test]
    fn outage_does_not_reset_elapsed() {
        let mut machine = machine();
        machine.context.elapsed = 3;

        machine.apply(LightEvent::Outage(true));

        assert_eq!(machine.context().elapsed, 3);
    }

    #[test]
    fn repeated_outage_is_noop() {
        let mut machine = machine();
        machine.apply(LightEvent::Outage(true));
        let before = machine.context().clone();

        assert!(machine.apply(LightEvent::Outage(true)).is_none());
        assert!(machine.apply(LightEvent::Change).is_none());
        assert_eq!(machine.context(), &before);
        assert_eq!(machine.current_state(), LightState::RedBlink);
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn outage_end_without_outage_is_noop() {
        let mut machine = machine();

        assert!(machine.apply(LightEvent::Outage(false)).is_none());
        assert_eq!(machine.current_state(), LightState::Green);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn interval_is_never_changed() {
        let mut machine = LightMachine::new(TimingConfig {
            interval: 2,
            ..TimingConfig::default()
        });

        for event in [
            LightEvent::Change,
            LightEvent::Outage(true),
            LightEvent::Outage(false),
            LightEvent::Change,
        ] {
            machine.apply(event);
            assert_eq!(machine.context().interval, 2);
        }
    }
}

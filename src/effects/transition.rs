//! Transition table and the directives produced by a transition.

use crate::core::{Context, EventKind, Guard, LightEvent, LightState};
use std::time::Duration;

/// Where a transition leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// A fixed state.
    State(LightState),
    /// Whatever state was active when the outage began.
    PreOutage,
}

/// What the runtime must do with the state timer after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerDirective {
    /// Cancel the old timer and start a repeating one with this period.
    Restart(Duration),
    /// Cancel the old timer and start nothing.
    Stop,
}

/// One row of the transition table.
#[derive(Clone, Debug)]
pub struct Transition {
    pub from: LightState,
    pub on: EventKind,
    pub target: Target,
    pub guard: Option<Guard<Context>>,
}

impl Transition {
    /// Check if this row applies to the current state and event (pure).
    pub fn can_execute(&self, current: LightState, kind: EventKind, context: &Context) -> bool {
        if current != self.from || kind != self.on {
            return false;
        }

        self.guard.as_ref().is_none_or(|g| g.check(context))
    }

    /// Resolve the target against the context.
    pub fn target_state(&self, context: &Context) -> LightState {
        match self.target {
            Target::State(state) => state,
            Target::PreOutage => context.pre_outage_state,
        }
    }
}

/// Outcome of an applied transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub from: LightState,
    pub to: LightState,
    pub event: LightEvent,
    pub timer: TimerDirective,
}

/// The set of transitions a light understands.
///
/// Pairs without a row are no-ops.
#[derive(Clone, Debug)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
}

impl TransitionTable {
    /// The green → yellow → red cycle plus the outage override.
    pub fn standard() -> Self {
        let mut transitions = vec![
            change(LightState::Green, LightState::Yellow),
            change(LightState::Yellow, LightState::Red),
            change(LightState::Red, LightState::Green),
        ];

        for from in [LightState::Green, LightState::Yellow, LightState::Red] {
            transitions.push(Transition {
                from,
                on: EventKind::OutageBegin,
                target: Target::State(LightState::RedBlink),
                guard: None,
            });
        }

        transitions.push(Transition {
            from: LightState::RedBlink,
            on: EventKind::OutageEnd,
            target: Target::PreOutage,
            guard: Some(Guard::new(|ctx: &Context| ctx.outage)),
        });

        Self { transitions }
    }

    /// First row that can execute, if any.
    pub fn find(
        &self,
        current: LightState,
        kind: EventKind,
        context: &Context,
    ) -> Option<&Transition> {
        self.iter().find(|t| t.can_execute(current, kind, context))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }
}

fn change(from: LightState, to: LightState) -> Transition {
    Transition {
        from,
        on: EventKind::Change,
        target: Target::State(to),
        guard: None,
    }
}

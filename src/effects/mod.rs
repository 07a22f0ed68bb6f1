//! Transition logic of the traffic light.
//!
//! This module is the pure core the runtime wraps: it decides the next state
//! and tells the caller what to do with the timer, but never touches a timer
//! itself.
//!
//! # Key Concepts
//!
//! - **Transition table**: rows of (state, event kind) → target, with guards
//! - **Steps**: the outcome of an applied event, including a `TimerDirective`
//! - **Light machine**: current state, context and bounded history

mod machine;
mod transition;

pub use machine::LightMachine;
pub use transition::{Step, Target, TimerDirective, Transition, TransitionTable};

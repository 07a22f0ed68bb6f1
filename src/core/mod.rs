//! Core state machine types.
//!
//! This module contains the pure data of the traffic light:
//! - The `State` trait and the `LightState` enum
//! - Events and their lookup kinds
//! - The context carried next to the state
//! - Guard predicates and bounded transition history
//!
//! Nothing in this module touches timers or the runtime.

mod context;
mod event;
mod guard;
mod history;
mod state;

pub use context::{Aspect, Context, Lamps};
pub use event::{EventKind, LightEvent};
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::{LightState, State};

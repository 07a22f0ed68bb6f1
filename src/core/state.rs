//! Core State trait and the traffic light states.
//!
//! All state machine states implement this trait, which provides
//! pure methods for inspecting state properties without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure - no side effects. States are plain values
/// describing the current position in a state machine.
///
/// # Required Traits
///
/// - `Clone`: States must be cloneable for history tracking
/// - `PartialEq`: States must be comparable for transition lookup
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States travel inside the render context
///
/// # Example
///
/// ```rust
/// use stoplight::core::{LightState, State};
///
/// assert_eq!(LightState::Yellow.name(), "Yellow");
/// assert!(!LightState::Red.is_final());
/// assert!(LightState::RedBlink.is_error());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

crate::state_enum! {
    /// The four visual states of the light.
    ///
    /// `RedBlink` is the outage override. It is reported as an error state
    /// but, like every other state, it is not final: the light runs forever.
    #[derive(Copy, Eq, Hash, Default)]
    pub enum LightState {
        #[default]
        Green,
        Yellow,
        Red,
        RedBlink,
    }
    error: [RedBlink]
}

impl LightState {
    /// All states in declaration order.
    pub const ALL: [LightState; 4] = [
        LightState::Green,
        LightState::Yellow,
        LightState::Red,
        LightState::RedBlink,
    ];

    /// Whether the state belongs to the normal green/yellow/red cycle.
    pub fn is_cycling(&self) -> bool {
        !matches!(self, Self::RedBlink)
    }
}

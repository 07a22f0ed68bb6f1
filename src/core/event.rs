//! Events accepted by the light.

use super::context::Context;
use serde::{Deserialize, Serialize};

/// An input to the machine.
///
/// `Outage(true)` declares an outage, `Outage(false)` ends it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightEvent {
    Change,
    Outage(bool),
}

/// Payload-free classification used for transition lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Change,
    OutageBegin,
    OutageEnd,
}

impl LightEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Change => EventKind::Change,
            Self::Outage(true) => EventKind::OutageBegin,
            Self::Outage(false) => EventKind::OutageEnd,
        }
    }

    /// The event an outage toggle control sends for the given context.
    ///
    /// ```rust
    /// use stoplight::core::{Context, LightEvent};
    ///
    /// let context = Context::new(5);
    /// assert_eq!(LightEvent::toggle_outage(&context), LightEvent::Outage(true));
    /// ```
    pub fn toggle_outage(context: &Context) -> Self {
        Self::Outage(!context.outage)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Change => "CHANGE",
            Self::Outage(_) => "OUTAGE",
        }
    }
}

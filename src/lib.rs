//! Stoplight: a traffic light state machine with timed auto-advance.
//!
//! The light cycles Green → Yellow → Red → Green, each state advancing on a
//! repeating timer whose period is derived from the configured interval. An
//! outage forces the light into a blinking red until it is cleared, at which
//! point the state active before the outage is restored and its timer resumes.
//!
//! The crate is split the way the machine runs:
//!
//! - [`core`]: states, events, context, guards and history (pure data)
//! - [`effects`]: the transition table and the pure [`LightMachine`]
//! - [`builder`]: timing configuration, validation and construction
//! - [`runtime`]: the [`TrafficLight`] handle driving timers on Tokio
//!
//! # Example
//!
//! ```rust
//! use stoplight::{LightEvent, LightState, TrafficLight};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut light = TrafficLight::create(5).unwrap();
//! assert_eq!(light.send(LightEvent::Change), LightState::Yellow);
//! assert_eq!(light.send(LightEvent::Outage(true)), LightState::RedBlink);
//! assert_eq!(light.send(LightEvent::Outage(false)), LightState::Yellow);
//! light.dispose();
//! # }
//! ```

pub mod builder;
pub mod core;
pub mod effects;
pub mod runtime;

// Re-export commonly used types
pub use crate::builder::{BuildError, TimingConfig, TrafficLightBuilder};
pub use crate::core::{Context, LightEvent, LightState, State};
pub use crate::effects::LightMachine;
pub use crate::runtime::TrafficLight;

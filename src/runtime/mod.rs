//! Imperative shell around the pure machine.
//!
//! A [`TrafficLight`] owns one [`LightMachine`](crate::effects::LightMachine)
//! and carries out the timer directives it produces on a Tokio runtime.

mod light;
mod timer;

pub use light::TrafficLight;

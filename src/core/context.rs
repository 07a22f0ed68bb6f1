//! Context carried alongside the current light state.
//!
//! The context is also the render input handed to views: it says which
//! lamp is lit and whether the manual change control is usable.

use super::state::LightState;
use serde::{Deserialize, Serialize};

/// Auxiliary data carried next to the state tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Reserved counter. Reset to 0 on every CHANGE, never read.
    pub elapsed: u64,
    /// Multiplier for timer durations, fixed at creation.
    pub interval: u32,
    /// Mirror of the current state.
    pub light: LightState,
    /// True while blinking because of a declared outage.
    pub outage: bool,
    /// State restored when the outage ends.
    pub pre_outage_state: LightState,
}

impl Context {
    /// Initial context: green, no outage.
    pub fn new(interval: u32) -> Self {
        Self {
            elapsed: 0,
            interval,
            light: LightState::Green,
            outage: false,
            pre_outage_state: LightState::Green,
        }
    }

    /// Whether a manual CHANGE can be offered to the user.
    pub fn change_enabled(&self) -> bool {
        !self.outage
    }

    /// Pedestrians may only be offered a walk signal on red.
    pub fn walk_allowed(&self) -> bool {
        self.light == LightState::Red
    }

    /// Lamp aspects for the three physical lamps.
    pub fn lamps(&self) -> Lamps {
        Lamps::for_light(self.light)
    }
}

/// How a single lamp is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aspect {
    Off,
    On,
    Blinking,
}

/// Aspects of the green, yellow and red lamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lamps {
    pub green: Aspect,
    pub yellow: Aspect,
    pub red: Aspect,
}

impl Lamps {
    pub fn for_light(light: LightState) -> Self {
        let lit = |on: bool| if on { Aspect::On } else { Aspect::Off };
        Self {
            green: lit(light == LightState::Green),
            yellow: lit(light == LightState::Yellow),
            red: match light {
                LightState::Red => Aspect::On,
                LightState::RedBlink => Aspect::Blinking,
                _ => Aspect::Off,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_starts_green_without_outage() {
        let context = Context::new(5);

        assert_eq!(context.elapsed, 0);
        assert_eq!(context.interval, 5);
        assert_eq!(context.light, LightState::Green);
        assert!(!context.outage);
        assert_eq!(context.pre_outage_state, LightState::Green);
    }

    #[test]
    fn change_is_disabled_during_outage() {
        let mut context = Context::new(5);
        assert!(context.change_enabled());

        context.outage = true;
        assert!(!context.change_enabled());
    }

    #[test]
    fn walk_is_only_allowed_on_red() {
        let mut context = Context::new(5);
        for light in LightState::ALL {
            context.light = light;
            assert_eq!(context.walk_allowed(), light == LightState::Red);
        }
    }

    #[test]
    fn exactly_one_lamp_is_active() {
        for light in LightState::ALL {
            let lamps = Lamps::for_light(light);
            let active = [lamps.green, lamps.yellow, lamps.red]
                .iter()
                .filter(|a| **a != Aspect::Off)
                .count();
            assert_eq!(active, 1, "{light:?}");
        }
    }

    #[test]
    fn outage_blinks_the_red_lamp() {
        let lamps = Lamps::for_light(LightState::RedBlink);

        assert_eq!(lamps.red, Aspect::Blinking);
        assert_eq!(lamps.green, Aspect::Off);
        assert_eq!(lamps.yellow, Aspect::Off);
    }

    #[test]
    fn context_serializes_for_views() {
        let context = Context::new(3);
        let json = serde_json::to_value(&context).unwrap();

        assert_eq!(json["light"], "Green");
        assert_eq!(json["interval"], 3);
        assert_eq!(json["outage"], false);
    }
}

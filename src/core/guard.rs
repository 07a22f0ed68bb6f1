//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions that decide whether a matching
//! transition may fire. They are evaluated against the machine context,
//! never against anything with side effects.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Pure predicate that determines if a transition can execute.
///
/// # Example
///
/// ```rust
/// use stoplight::core::{Context, Guard};
///
/// let in_outage = Guard::new(|ctx: &Context| ctx.outage);
///
/// let mut context = Context::new(5);
/// assert!(!in_outage.check(&context));
///
/// context.outage = true;
/// assert!(in_outage.check(&context));
/// ```
pub struct Guard<T> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
    _phantom: PhantomData<fn(&T)>,
}

impl<T> Guard<T> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Check if the guard allows the transition for this value.
    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            _phantom: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Context, LightState};

    #[test]
    fn guard_allows_matching_values() {
        let guard = Guard::new(|ctx: &Context| ctx.light == LightState::Red);

        let mut context = Context::new(5);
        assert!(!guard.check(&context));

        context.light = LightState::Red;
        assert!(guard.check(&context));
    }

    #[test]
    fn guard_is_deterministic() {
        let context = Context::new(5);
        let guard = Guard::new(|ctx: &Context| !ctx.outage);

        assert_eq!(guard.check(&context), guard.check(&context));
    }

    #[test]
    fn cloned_guard_shares_predicate() {
        let guard = Guard::new(|ctx: &Context| ctx.interval > 3);
        let cloned = guard.clone();

        let context = Context::new(5);
        assert!(guard.check(&context));
        assert!(cloned.check(&context));
        assert!(!cloned.check(&Context::new(2)));
    }
}

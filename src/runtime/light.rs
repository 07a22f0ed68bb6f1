//! Running traffic light: the machine plus its state timer.

use crate::builder::{BuildError, TrafficLightBuilder};
use crate::core::{Context, LightEvent, LightState, State, StateHistory};
use crate::effects::{LightMachine, Step, TimerDirective};
use crate::runtime::timer::{PhaseTimer, Tick};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};
use uuid::Uuid;

#[derive(Clone, Copy, Debug)]
enum Source {
    Manual,
    Timer,
}

/// Handle owning a light machine and its auto-advance timer.
///
/// Manual events go through [`send`](Self::send); timer-fired CHANGE events
/// land in a single-slot tick channel and are applied by
/// [`tick`](Self::tick). An owner that never calls `tick` holds at most one
/// pending tick. Both take `&mut self`, so every transition completes before
/// the next one starts. Each applied transition drops the previous state's
/// timer before a new one is started, and ticks from a dropped timer are
/// discarded by generation.
///
/// Dropping the handle cancels the timer, as does [`dispose`](Self::dispose).
#[derive(Debug)]
pub struct TrafficLight {
    id: Uuid,
    machine: LightMachine,
    runtime: Handle,
    timer: Option<PhaseTimer>,
    generation: u64,
    ticks_tx: Arc<watch::Sender<Tick>>,
    ticks_rx: watch::Receiver<Tick>,
    view: watch::Sender<Context>,
    disposed: bool,
}

impl TrafficLight {
    /// Create a light in Green with the given interval and start its timer.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn create(interval: u32) -> Result<Self, BuildError> {
        TrafficLightBuilder::new().interval(interval).start()
    }

    pub(crate) fn start(machine: LightMachine, runtime: Handle) -> Self {
        let (ticks_tx, ticks_rx) = watch::channel(Tick { generation: 0 });
        let (view, _) = watch::channel(machine.context().clone());

        let mut light = Self {
            id: Uuid::new_v4(),
            machine,
            runtime,
            timer: None,
            generation: 0,
            ticks_tx: Arc::new(ticks_tx),
            ticks_rx,
            view,
            disposed: false,
        };

        let entry = light.machine.entry_timer();
        light.arm(entry);
        info!(
            machine = %light.id,
            state = light.machine.current_state().name(),
            interval = light.machine.context().interval,
            "light started"
        );
        light
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> LightState {
        self.machine.current_state()
    }

    pub fn context(&self) -> &Context {
        self.machine.context()
    }

    pub fn history(&self) -> &StateHistory<LightState> {
        self.machine.history()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Period of the running timer, `None` when no timer is running.
    pub fn phase_duration(&self) -> Option<Duration> {
        self.timer.as_ref().map(PhaseTimer::period)
    }

    /// Render input: receives the context after every applied transition.
    pub fn subscribe(&self) -> watch::Receiver<Context> {
        self.view.subscribe()
    }

    /// Apply an event and return the resulting state.
    ///
    /// Events without a transition for the current state leave everything
    /// unchanged. After disposal every event is ignored.
    pub fn send(&mut self, event: LightEvent) -> LightState {
        self.dispatch(event, Source::Manual)
    }

    /// Wait for the running timer and apply the CHANGE it fires.
    ///
    /// Returns `None` straight away when no timer is running, i.e. during an
    /// outage or after disposal. Cancel-safe: dropping the future loses no
    /// tick.
    pub async fn tick(&mut self) -> Option<LightState> {
        loop {
            let current = self.timer.as_ref()?.generation();
            self.ticks_rx.changed().await.ok()?;
            let tick = *self.ticks_rx.borrow_and_update();
            if tick.generation != current {
                trace!(machine = %self.id, generation = tick.generation, "discarding stale tick");
                continue;
            }
            return Some(self.dispatch(LightEvent::Change, Source::Timer));
        }
    }

    /// Advance on the timer until `shutdown` fires or no timer is running.
    ///
    /// The light is disposed when `shutdown` fires. Returns the last state.
    pub async fn run(&mut self, shutdown: CancellationToken) -> LightState {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    self.dispose();
                    break;
                }
                next = self.tick() => {
                    if next.is_none() {
                        break;
                    }
                }
            }
        }
        self.state()
    }

    /// Cancel the timer and drop the pending tick. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.generation += 1;
        self.timer = None;
        let _ = self.ticks_rx.borrow_and_update();
        info!(machine = %self.id, state = self.state().name(), "light disposed");
    }

    fn dispatch(&mut self, event: LightEvent, source: Source) -> LightState {
        if self.disposed {
            trace!(machine = %self.id, event = event.name(), "ignoring event after dispose");
            return self.state();
        }

        match self.machine.apply(event) {
            Some(step) => self.enter(step, source),
            None => trace!(
                machine = %self.id,
                state = self.state().name(),
                event = ?event,
                "no transition for event"
            ),
        }
        self.state()
    }

    fn enter(&mut self, step: Step, source: Source) {
        self.arm(step.timer);
        self.view.send_replace(self.machine.context().clone());
        debug!(
            machine = %self.id,
            from = step.from.name(),
            to = step.to.name(),
            event = ?step.event,
            source = ?source,
            "light changed"
        );
    }

    /// Replace the running timer. The old one is dropped, and thereby
    /// aborted, before the new one is spawned.
    fn arm(&mut self, directive: TimerDirective) {
        self.generation += 1;
        self.timer = None;
        let _ = self.ticks_rx.borrow_and_update();
        if let TimerDirective::Restart(period) = directive {
            self.timer = Some(PhaseTimer::start(
                &self.runtime,
                self.generation,
                period,
                Arc::clone(&self.ticks_tx),
            ));
        }
    }
}

impl Drop for TrafficLight {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{self, Instant};

    #[tokio::test(start_paused = true)]
    async fn created_light_runs_green_timer() {
        let light = TrafficLight::create(5).unwrap();

        assert_eq!(light.state(), LightState::Green);
        assert_eq!(light.phase_duration(), Some(Duration::from_secs(20)));
        assert!(!light.is_disposed());
    }

    #[tokio::test(start_paused = true)]
    async fn dispose_cancels_timer_before_it_fires() {
        let mut light = TrafficLight::create(5).unwrap();

        light.dispose();
        time::advance(Duration::from_secs(60)).await;
        tokio::task::yield_now().await;

        assert!(light.timer.is_none());
        assert!(!light.ticks_rx.has_changed().unwrap());
        assert_eq!(light.tick().await, None);
        assert_eq!(light.state(), LightState::Green);
        assert!(light.history().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dispose_is_idempotent_and_blocks_events() {
        let mut light = TrafficLight::create(5).unwrap();

        light.dispose();
        light.dispose();

        assert_eq!(light.send(LightEvent::Change), LightState::Green);
        assert_eq!(light.phase_duration(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_tick_is_discarded() {
        let mut light = TrafficLight::create(5).unwrap();
        let stale = light.timer.as_ref().unwrap().generation();

        light.send(LightEvent::Change);
        light.ticks_tx.send_replace(Tick { generation: stale });
        let changed_at = Instant::now();

        assert_eq!(light.tick().await, Some(LightState::Red));
        assert!(changed_at.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn unconsumed_ticks_do_not_pile_up() {
        let mut light = TrafficLight::create(1).unwrap();

        for _ in 0..50 {
            time::advance(Duration::from_secs(4)).await;
            tokio::task::yield_now().await;
        }

        // A single pending tick, applied at once; nothing left behind it.
        assert!(light.ticks_rx.has_changed().unwrap());
        let before = Instant::now();
        assert_eq!(light.tick().await, Some(LightState::Yellow));
        assert_eq!(before.elapsed(), Duration::ZERO);
        assert!(!light.ticks_rx.has_changed().unwrap());

        assert_eq!(light.tick().await, Some(LightState::Red));
        assert!(before.elapsed() >= Duration::from_secs(1));
        assert_eq!(light.history().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn every_transition_bumps_generation() {
        let mut light = TrafficLight::create(5).unwrap();
        let first = light.generation;

        light.send(LightEvent::Change);
        light.send(LightEvent::Outage(true));
        light.send(LightEvent::Outage(true));

        assert_eq!(light.generation, first + 2);
        assert!(light.timer.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_applied_transitions() {
        let mut light = TrafficLight::create(5).unwrap();
        let mut view = light.subscribe();

        light.send(LightEvent::Outage(true));

        assert!(view.has_changed().unwrap());
        let context = view.borrow_and_update().clone();
        assert_eq!(context.light, LightState::RedBlink);
        assert!(context.outage);
        assert!(!context.change_enabled());
    }

    #[tokio::test(start_paused = true)]
    async fn run_stops_on_shutdown_and_disposes() {
        let mut light = TrafficLight::create(1).unwrap();
        let shutdown = CancellationToken::new();
        let trigger = shutdown.clone();

        tokio::spawn(async move {
            time::sleep(Duration::from_secs(6)).await;
            trigger.cancel();
        });

        // Green 4s, then Yellow 1s, then Red until shutdown at 6s.
        assert_eq!(light.run(shutdown).await, LightState::Red);
        assert!(light.is_disposed());
    }

    #[tokio::test(start_paused = true)]
    async fn run_returns_when_no_timer_remains() {
        let mut light = TrafficLight::create(1).unwrap();
        light.send(LightEvent::Outage(true));

        assert_eq!(
            light.run(CancellationToken::new()).await,
            LightState::RedBlink
        );
        assert!(!light.is_disposed());
    }
}

//! Repeating per-state timer.

use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Fired by a phase timer. Carries the generation the timer was started in.
///
/// Ticks are published into a `watch` slot, so an owner that never consumes
/// them holds at most the latest one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Tick {
    pub generation: u64,
}

/// Timer bound to one state entry.
///
/// The task is aborted when the value is dropped, so leaving a state only
/// requires dropping its timer.
#[derive(Debug)]
pub(crate) struct PhaseTimer {
    generation: u64,
    period: Duration,
    handle: JoinHandle<()>,
}

impl PhaseTimer {
    /// Spawn a timer that publishes a tick every `period`, starting one
    /// period from now.
    pub fn start(
        runtime: &Handle,
        generation: u64,
        period: Duration,
        ticks: Arc<watch::Sender<Tick>>,
    ) -> Self {
        // Anchored at spawn time, not at first poll.
        let first = Instant::now() + period;
        let handle = runtime.spawn(async move {
            let mut ticker = time::interval_at(first, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if ticks.send(Tick { generation }).is_err() {
                    break;
                }
            }
        });

        Self {
            generation,
            period,
            handle,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for PhaseTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

use std::time::Duration;

use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task publishing a monotonically increasing tick counter.
///
/// The counter is what subscribers wait on; they read the clock themselves.
/// Dropping the task aborts it.
#[derive(Debug)]
pub struct TickTask {
    handle: JoinHandle<()>,
    ticks: watch::Receiver<u64>,
}

impl TickTask {
    /// Must be called from within a tokio runtime.
    pub fn spawn(period: Duration) -> Self {
        let (tx, ticks) = watch::channel(0u64);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval.tick().await;

            let mut tick = 0u64;
            loop {
                interval.tick().await;
                tick += 1;
                if tx.send(tick).is_err() {
                    break;
                }
            }
        });

        Self { handle, ticks }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.ticks.clone()
    }

    pub fn current(&self) -> u64 {
        *self.ticks.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for TickTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

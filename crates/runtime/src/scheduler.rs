//! External schedulers that drive [`Task`]s to completion.
//!
//! Two drivers share the same contract: poll, honor the reported suspension,
//! poll again. Mutations committed before a yield are visible to everything
//! that runs before the next poll.
//!
//! - [`VirtualScheduler`]: advances a virtual clock, never sleeps. Deterministic.
//! - [`RealtimeScheduler`]: sleeps on the tokio timer between polls.
use std::time::Duration;

use battle_core::{Step, Suspend, Task};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};

/// Counters accumulated across every task a scheduler has driven.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Polls that ended in a suspension.
    pub ticks: u64,

    /// Scheduled time, after `time_scale` is applied.
    pub elapsed: Duration,
}

impl SchedulerStats {
    fn record(&mut self, wait: Duration) {
        self.ticks += 1;
        self.elapsed = self.elapsed.saturating_add(wait);
    }
}

fn wait_for(config: &RuntimeConfig, suspend: Suspend) -> Duration {
    match suspend {
        Suspend::NextTick => config.frame,
        Suspend::For(wait) => config.scaled(wait),
    }
}

/// Deterministic driver with a virtual clock.
#[derive(Clone, Debug)]
pub struct VirtualScheduler {
    config: RuntimeConfig,
    stats: SchedulerStats,
}

impl VirtualScheduler {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            stats: SchedulerStats::default(),
        }
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub fn now(&self) -> Duration {
        self.stats.elapsed
    }

    /// Polls `task` until it completes.
    ///
    /// ## Errors
    /// - `RuntimeError::TaskStalled` if the task yields more than `max_ticks` times
    pub fn run<C, T>(&mut self, task: &mut T, ctx: &mut C) -> Result<T::Output>
    where
        T: Task<C>,
    {
        let mut ticks = 0u64;
        loop {
            match task.poll(ctx) {
                Step::Complete(output) => return Ok(output),
                Step::Yield(suspend) => {
                    ticks += 1;
                    if ticks > self.config.max_ticks {
                        return Err(RuntimeError::TaskStalled { ticks });
                    }
                    self.stats.record(wait_for(&self.config, suspend));
                }
            }
        }
    }
}

/// Wall-clock driver backed by the tokio timer.
#[derive(Clone, Debug)]
pub struct RealtimeScheduler {
    config: RuntimeConfig,
    stats: SchedulerStats,
}

impl RealtimeScheduler {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            stats: SchedulerStats::default(),
        }
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Polls `task` until it completes, sleeping between polls.
    ///
    /// Zero-length waits still yield to the tokio scheduler so other tasks
    /// on the same thread make progress.
    pub async fn run<C, T>(&mut self, task: &mut T, ctx: &mut C) -> Result<T::Output>
    where
        T: Task<C>,
    {
        let mut ticks = 0u64;
        loop {
            match task.poll(ctx) {
                Step::Complete(output) => return Ok(output),
                Step::Yield(suspend) => {
                    ticks += 1;
                    if ticks > self.config.max_ticks {
                        return Err(RuntimeError::TaskStalled { ticks });
                    }
                    let wait = wait_for(&self.config, suspend);
                    self.stats.record(wait);
                    if wait.is_zero() {
                        tokio::task::yield_now().await;
                    } else {
                        tokio::time::sleep(wait).await;
                    }
                }
            }
        }
    }
}

//! Expiration Sweeper
//!
//! Background task that periodically removes expired cache entries.
//!
//! The sweeper owns a dedicated thread running a current-thread tokio runtime,
//! so a cache can be built and dropped from plain synchronous code as well as
//! from inside an async host.

use std::hash::Hash;
use std::sync::Weak;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::config::validate_check_interval;
use crate::error::Result;

const SWEEPER_THREAD_NAME: &str = "ttl-cache-sweeper";

/// What the sweeper task should be doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Schedule {
    /// Sweep once per period
    Every(Duration),
    /// Timer cancelled, period kept for `resume`
    Suspended(Duration),
    /// Task exits
    Stopped,
}

// == Sweeper ==
/// Handle to a running expiration sweeper.
///
/// Dropping the handle stops the task and joins its thread.
#[derive(Debug)]
pub struct Sweeper {
    schedule: watch::Sender<Schedule>,
    thread: Option<JoinHandle<()>>,
}

impl Sweeper {
    /// Spawns a sweeper that purges expired entries from `store` every `period`.
    ///
    /// The first sweep runs one full period after spawning. The sweeper holds
    /// only a weak reference and exits on its own once the store is gone.
    ///
    /// # Errors
    /// `InvalidConfig` for a zero period, `Sweeper` if the timer runtime or the
    /// thread cannot be created.
    pub fn spawn<K, V>(store: Weak<RwLock<CacheStore<K, V>>>, period: Duration) -> Result<Self>
    where
        K: Eq + Hash + Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        validate_check_interval(period)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        let (schedule, schedule_rx) = watch::channel(Schedule::Every(period));

        let thread = thread::Builder::new()
            .name(SWEEPER_THREAD_NAME.to_string())
            .spawn(move || runtime.block_on(run_sweeper(store, schedule_rx)))?;

        info!(
            period_ms = period.as_millis() as u64,
            "Expiration sweeper started"
        );

        Ok(Self {
            schedule,
            thread: Some(thread),
        })
    }

    /// Restarts the timer with a new period. The next sweep runs one full
    /// period from now.
    ///
    /// A suspended sweeper stays suspended and picks the new period up on
    /// `resume`.
    pub fn reschedule(&self, period: Duration) -> Result<()> {
        validate_check_interval(period)?;

        let rescheduled = self.schedule.send_if_modified(|schedule| match schedule {
            Schedule::Stopped => false,
            Schedule::Suspended(_) => {
                *schedule = Schedule::Suspended(period);
                true
            }
            Schedule::Every(_) => {
                *schedule = Schedule::Every(period);
                true
            }
        });
        if rescheduled {
            info!(
                period_ms = period.as_millis() as u64,
                "Expiration sweeper rescheduled"
            );
        }
        Ok(())
    }

    /// Cancels the timer without stopping the task.
    pub fn suspend(&self) {
        let suspended = self.schedule.send_if_modified(|schedule| match *schedule {
            Schedule::Every(period) => {
                *schedule = Schedule::Suspended(period);
                true
            }
            _ => false,
        });
        if suspended {
            debug!("Expiration sweeper suspended");
        }
    }

    /// Restarts a suspended timer with its previous period.
    pub fn resume(&self) {
        let resumed = self.schedule.send_if_modified(|schedule| match *schedule {
            Schedule::Suspended(period) => {
                *schedule = Schedule::Every(period);
                true
            }
            _ => false,
        });
        if resumed {
            debug!("Expiration sweeper resumed");
        }
    }

    /// Period currently in effect, or `None` when suspended or stopped.
    pub fn period(&self) -> Option<Duration> {
        match *self.schedule.borrow() {
            Schedule::Every(period) => Some(period),
            _ => None,
        }
    }

    /// Returns true until the sweeper thread has exited.
    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .is_some_and(|thread| !thread.is_finished())
    }

    /// Stops the task and joins its thread. Calling it again does nothing.
    pub fn stop(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };

        self.schedule.send_replace(Schedule::Stopped);
        if thread.join().is_err() {
            warn!("Expiration sweeper thread panicked");
        }
        info!("Expiration sweeper stopped");
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_sweeper<K, V>(
    store: Weak<RwLock<CacheStore<K, V>>>,
    mut schedule: watch::Receiver<Schedule>,
) where
    K: Eq + Hash,
{
    'schedule: loop {
        let current = *schedule.borrow_and_update();
        match current {
            Schedule::Stopped => break,
            Schedule::Suspended(_) => {
                if schedule.changed().await.is_err() {
                    break;
                }
            }
            Schedule::Every(period) => {
                // A period too large for the clock never fires; wait for a reschedule
                let Some(first_tick) = Instant::now().checked_add(period) else {
                    debug!(
                        period_secs = period.as_secs(),
                        "Sweep period out of clock range, waiting for reschedule"
                    );
                    if schedule.changed().await.is_err() {
                        break;
                    }
                    continue;
                };

                let mut ticker = interval_at(first_tick, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    tokio::select! {
                        changed = schedule.changed() => {
                            if changed.is_err() {
                                break 'schedule;
                            }
                            continue 'schedule;
                        }
                        _ = ticker.tick() => {
                            let Some(store) = store.upgrade() else {
                                debug!("Cache store dropped");
                                break 'schedule;
                            };

                            // Acquire write lock and purge expired entries
                            let removed = store.write().purge_expired();

                            if removed > 0 {
                                info!("TTL sweep: removed {} expired entries", removed);
                            } else {
                                debug!("TTL sweep: no expired entries found");
                            }
                        }
                    }
                }
            }
        }
    }

    debug!("Expiration sweeper exiting");
}

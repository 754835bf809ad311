use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Toggle period for the restart button pulse.
pub const PULSE_PERIOD: Duration = Duration::from_secs(2);

/// Shorter periods are raised to this; a zero period would panic the timer task.
pub const MIN_PULSE_PERIOD: Duration = Duration::from_millis(1);

/// Repeating toggle for the cosmetic pulse flag. The background task is aborted when
/// the handle is dropped.
pub struct PulseTimer {
    flag: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl PulseTimer {
    /// Start toggling every `period`; the first toggle happens one full period from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(period: Duration) -> Self {
        let period = period.max(MIN_PULSE_PERIOD);
        let flag = Arc::new(AtomicBool::new(false));
        let toggled = Arc::clone(&flag);
        let task = tokio::spawn(async move {
            let mut ticks = time::interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                toggled.fetch_xor(true, Ordering::Relaxed);
            }
        });
        Self { flag, task }
    }

    pub fn is_pulsing(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl Drop for PulseTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

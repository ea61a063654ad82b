//! Minimum-interval pacing for outbound provider sends.
//!
//! A single process-wide reservation: each caller atomically claims the
//! next free send slot under the lock, then sleeps until its slot
//! arrives. Two concurrent requests can never both decide "safe to send
//! now" from a stale timestamp, because the slot is advanced inside the
//! same critical section that reads it.

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Duration, Instant};

/// Process-wide send pacer shared by every completion-provider call.
pub struct SendThrottle {
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl SendThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Wait until this caller's send slot arrives, then return it.
    ///
    /// Consecutive returned slots are at least `min_interval` apart,
    /// retries included.
    pub async fn acquire(&self) -> Instant {
        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next {
                Some(at) if at > now => at,
                _ => now,
            };
            *next = Some(slot + self.min_interval);
            slot
        };

        sleep_until(slot).await;
        slot
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

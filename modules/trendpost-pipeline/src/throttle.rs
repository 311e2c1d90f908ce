//! Request spacing for rate-limited providers.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Lets callers through no more often than once per `interval`, across all
/// tasks sharing the throttle. The first caller passes immediately.
pub struct Throttle {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait for the next free slot.
    pub async fn ready(&self) {
        if self.interval.is_zero() {
            return;
        }

        // Held across the sleep so waiters queue up in order.
        let mut next_slot = self.next_slot.lock().await;
        if let Some(at) = *next_slot {
            tokio::time::sleep_until(at).await;
        }
        *next_slot = Some(Instant::now() + self.interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn disabled_throttle_never_waits() {
        let throttle = Throttle::disabled();
        let start = std::time::Instant::now();
        for _ in 0..100 {
            throttle.ready().await;
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn calls_are_spaced_by_interval() {
        let throttle = Throttle::new(Duration::from_millis(40));
        let start = std::time::Instant::now();
        for _ in 0..3 {
            throttle.ready().await;
        }
        // First call is free, the next two wait one interval each.
        assert!(start.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn spacing_holds_across_tasks() {
        let throttle = Arc::new(Throttle::new(Duration::from_millis(30)));
        let start = std::time::Instant::now();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let throttle = throttle.clone();
                tokio::spawn(async move { throttle.ready().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(start.elapsed() >= Duration::from_millis(90));
    }
}

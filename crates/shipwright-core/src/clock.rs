use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Time source and scheduler for the cycle.
///
/// Injected so tests can pin the date and observe throttle pauses without
/// waiting on the wall clock.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
    async fn pause(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn system_clock_pause_returns() {
        SystemClock.pause(Duration::from_millis(1)).await;
    }

    #[test]
    fn system_clock_now_is_current() {
        let a = SystemClock.now();
        let b = Utc::now();
        assert!((b - a).num_seconds().abs() < 5);
    }
}

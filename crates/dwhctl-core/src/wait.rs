//! Bounded fixed-interval waiting
//!
//! Cluster creation and deletion are minutes-long control-plane operations
//! observable only by re-describing the cluster. [`wait_until`] runs an async
//! probe at a fixed interval until it yields a value or the timeout ceiling
//! elapses. This is expected-latency waiting, not failure recovery: a probe
//! error ends the wait immediately.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::error::{CoreError, Result};

/// Interval and ceiling for a wait loop
#[derive(Debug, Clone, Copy)]
pub struct WaitSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl WaitSettings {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            timeout: Duration::from_secs(1800),
        }
    }
}

/// Poll `probe` every `settings.interval` until it yields `Some(value)`.
///
/// `Ok(None)` means "not there yet, keep waiting". Returns
/// `CoreError::Timeout` once `settings.timeout` has elapsed without a value.
pub async fn wait_until<T, F, Fut>(settings: WaitSettings, mut probe: F) -> Result<T>
where
    F: FnMut(Duration) -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let start = Instant::now();

    loop {
        let elapsed = start.elapsed();
        if elapsed > settings.timeout {
            return Err(CoreError::Timeout(settings.timeout));
        }

        if let Some(value) = probe(elapsed).await? {
            return Ok(value);
        }

        tokio::time::sleep(settings.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> WaitSettings {
        WaitSettings::new(Duration::from_millis(1), Duration::from_millis(200))
    }

    #[tokio::test]
    async fn yields_the_probe_value() {
        let mut calls = 0;
        let result = wait_until(fast(), |_| {
            calls += 1;
            let done = calls >= 3;
            async move { Ok(if done { Some("available") } else { None }) }
        })
        .await
        .unwrap();

        assert_eq!(result, "available");
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn times_out_when_the_probe_never_resolves() {
        let err = wait_until(fast(), |_| async { Ok(None::<()>) })
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn probe_errors_end_the_wait() {
        let err = wait_until(fast(), |_| async {
            Err::<Option<()>, _>(CoreError::Api("throttled".into()))
        })
        .await
        .unwrap_err();
        assert!(matches!(err, CoreError::Api(_)));
    }
}

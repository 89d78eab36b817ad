//! Per-call timeout helper.

use std::future::Future;
use std::time::Duration;

use crate::error::TripError;

/// Wrap a provider call with a timeout.
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T, TripError>>,
) -> Result<T, TripError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(TripError::Timeout(duration.as_millis() as u64)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn slow_future_times_out() {
        let err = with_timeout(Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, TripError>(())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, TripError::Timeout(50)));
    }

    #[tokio::test]
    async fn fast_future_passes_through() {
        let value = with_timeout(Duration::from_secs(1), async { Ok::<_, TripError>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }
}

//! HTTP client construction, auth headers, and status mapping.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::TripError;

/// Build a client for one provider.
///
/// The client's own timeout is a backstop; callers also wrap each call in
/// [`crate::util::timeout::with_timeout`] with the configured request timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, TripError> {
    reqwest::Client::builder()
        .timeout(timeout.saturating_add(Duration::from_secs(5)))
        .pool_max_idle_per_host(4)
        .build()
        .map_err(TripError::Network)
}

/// Build default headers for a Bearer-token API.
pub fn bearer_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}

/// Map a non-success HTTP status to an error.
pub fn status_to_error(status: u16, body: &str) -> TripError {
    match status {
        401 | 403 => TripError::Authentication(body.to_string()),
        429 => TripError::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        _ => TripError::api(status, body),
    }
}

fn extract_retry_after(body: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("retry_after"))
                .and_then(|r| r.as_f64())
                .map(|s| (s * 1000.0) as u64)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_timeout_saturates() {
        assert!(build_client(Duration::MAX).is_ok());
    }

    #[test]
    fn bearer_headers_carry_the_key() {
        let headers = bearer_headers("abc");
        assert_eq!(headers[AUTHORIZATION], "Bearer abc");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn auth_statuses_map_to_authentication() {
        assert!(matches!(
            status_to_error(401, "nope"),
            TripError::Authentication(_)
        ));
        assert!(matches!(
            status_to_error(403, "nope"),
            TripError::Authentication(_)
        ));
    }

    #[test]
    fn rate_limit_parses_retry_after_seconds() {
        let err = status_to_error(429, r#"{"error":{"retry_after":1.5}}"#);
        match err {
            TripError::RateLimited { retry_after_ms } => assert_eq!(retry_after_ms, Some(1500)),
            other => panic!("expected rate limit, got {other:?}"),
        }
    }

    #[test]
    fn other_statuses_are_api_errors() {
        assert!(matches!(
            status_to_error(500, "boom"),
            TripError::Api { status: 500, .. }
        ));
    }
}

//! Rate-limit-aware retry governor for generative API calls.
//!
//! [`retry_on_rate_limit`] wraps any fallible async operation and retries
//! only on [`GeminiError::RateLimited`]. The wait before each retry is the
//! server-suggested delay when the 429 body carries one, otherwise an
//! exponential back-off, and in both cases a small positive jitter is added
//! so that batch runs do not re-align their requests.

use std::future::Future;
use std::time::Duration;

use regex::Regex;

use crate::error::GeminiError;

/// Extracts a server-suggested retry delay (whole seconds) from a 429 error
/// body. Matches both the `retry_delay=30` and the
/// `retry_delay { seconds: 30 }` renderings the API has been seen to emit.
pub(crate) fn parse_retry_delay(message: &str) -> Option<u64> {
    let re = Regex::new(r"(?i)retry_delay(?:=|\s*\{\s*seconds:)\s*(\d+)").expect("valid regex");
    re.captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Exponential fallback used when the server did not suggest a delay:
/// `base_secs * 2^attempt`, with the shift clamped to keep the arithmetic
/// in range.
pub(crate) fn backoff_base(base_secs: u64, attempt: u32) -> u64 {
    base_secs.saturating_mul(1u64 << attempt.min(10))
}

/// Adds uniform jitter in `[0, 0.2 * base_secs]` on top of the base wait.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn apply_jitter(base_secs: u64) -> f64 {
    base_secs as f64 * (1.0 + rand::random::<f64>() * 0.2)
}

/// Runs `operation` with up to `max_retries` additional attempts after a
/// rate-limit error. Any other error, and rate limiting past the final
/// attempt, is returned to the caller unchanged.
pub(crate) async fn retry_on_rate_limit<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    context: &str,
    mut operation: F,
) -> Result<T, GeminiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GeminiError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(GeminiError::RateLimited { message }) if attempt < max_retries => {
                let base = parse_retry_delay(&message)
                    .unwrap_or_else(|| backoff_base(backoff_base_secs, attempt));
                let wait_secs = apply_jitter(base);
                tracing::warn!(
                    context,
                    attempt = attempt + 1,
                    max_retries,
                    wait_secs,
                    "rate limited, waiting before retry"
                );
                tokio::time::sleep(Duration::from_secs_f64(wait_secs)).await;
                attempt += 1;
            }
            Err(err) => {
                if matches!(err, GeminiError::RateLimited { .. }) {
                    tracing::error!(context, max_retries, "rate-limit retries exhausted");
                }
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn rate_limited() -> GeminiError {
        GeminiError::RateLimited {
            message: "429 Resource has been exhausted".to_owned(),
        }
    }

    #[test]
    fn parses_equals_form_delay() {
        assert_eq!(parse_retry_delay("quota hit, retry_delay=30"), Some(30));
    }

    #[test]
    fn parses_proto_form_delay_case_insensitively() {
        assert_eq!(
            parse_retry_delay("429 RESOURCE_EXHAUSTED ... RETRY_DELAY { seconds: 12 }"),
            Some(12)
        );
    }

    #[test]
    fn no_delay_hint_yields_none() {
        assert_eq!(parse_retry_delay("429 Too Many Requests"), None);
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        assert_eq!(backoff_base(10, 0), 10);
        assert_eq!(backoff_base(10, 1), 20);
        assert_eq!(backoff_base(10, 2), 40);
        assert_eq!(backoff_base(10, 3), 80);
    }

    #[test]
    fn jitter_stays_within_twenty_percent() {
        for _ in 0..200 {
            let wait = apply_jitter(10);
            assert!((10.0..=12.0).contains(&wait), "wait out of range: {wait}");
        }
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_on_rate_limit(3, 0, "test", || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, GeminiError>(7)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rate_limit_is_retried_up_to_the_bound() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_on_rate_limit(3, 0, "test", || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(rate_limited())
            }
        })
        .await;
        assert_eq!(
            calls.load(Ordering::SeqCst),
            4,
            "3 retries means 4 total attempts"
        );
        assert!(matches!(result, Err(GeminiError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn recovers_when_rate_limit_clears() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_on_rate_limit(3, 0, "test", || {
            let c = Arc::clone(&c);
            async move {
                if c.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(rate_limited())
                } else {
                    Ok(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn api_error_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_on_rate_limit(3, 0, "test", || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(GeminiError::ApiError("invalid argument".to_owned()))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(GeminiError::ApiError(_))));
    }
}

//! Bounded polling for a selector to become visible.

use crate::error::{BrowserError, Result};
use chromiumoxide::Page;
use std::time::{Duration, Instant};

/// Wait until `selector` matches an element with a non-empty layout box.
///
/// Polls the DOM every `poll` until `timeout` elapses. There is no retry
/// beyond the poll loop itself and no backoff; expiry returns
/// [`BrowserError::WaitTimeout`].
pub async fn wait_for_visible(
    page: &Page,
    selector: &str,
    timeout: Duration,
    poll: Duration,
) -> Result<()> {
    let started = Instant::now();
    let deadline = started + timeout;

    loop {
        if is_visible(page, selector).await? {
            tracing::debug!(selector, elapsed_ms = started.elapsed().as_millis() as u64, "selector visible");
            return Ok(());
        }

        match next_delay(Instant::now(), deadline, poll) {
            Some(delay) => tokio::time::sleep(delay).await,
            None => {
                return Err(BrowserError::WaitTimeout {
                    selector: selector.to_string(),
                    waited: timeout,
                })
            }
        }
    }
}

/// Check whether the selector currently matches a visibly rendered element.
async fn is_visible(page: &Page, selector: &str) -> Result<bool> {
    let result = page
        .evaluate(visibility_expression(selector))
        .await
        .map_err(|e| BrowserError::Evaluation(e.to_string()))?;
    result
        .into_value::<bool>()
        .map_err(|e| BrowserError::Evaluation(e.to_string()))
}

/// JavaScript predicate: element exists and has a non-empty bounding box.
fn visibility_expression(selector: &str) -> String {
    let quoted = serde_json::Value::String(selector.to_owned()).to_string();
    format!(
        "(() => {{ const el = document.querySelector({quoted}); \
         if (!el) return false; \
         const rect = el.getBoundingClientRect(); \
         return rect.width > 0 && rect.height > 0; }})()"
    )
}

/// Time to sleep before the next poll, or `None` once the deadline passed.
///
/// The final sleep is clamped so the last check happens at the deadline
/// rather than one poll interval past it.
fn next_delay(now: Instant, deadline: Instant, poll: Duration) -> Option<Duration> {
    if now >= deadline {
        return None;
    }
    Some(poll.min(deadline - now))
}

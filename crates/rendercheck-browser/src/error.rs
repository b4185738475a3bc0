use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("failed to open page: {0}")]
    Page(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("script evaluation failed: {0}")]
    Evaluation(String),

    #[error("console capture failed: {0}")]
    Console(String),

    #[error("screenshot failed: {0}")]
    Screenshot(String),

    #[error("timed out after {}s waiting for selector `{selector}`", waited.as_secs())]
    WaitTimeout {
        selector: String,
        waited: Duration,
    },

    #[error("browser shutdown failed: {0}")]
    Shutdown(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BrowserError::Navigation("net::ERR_CONNECTION_REFUSED".to_string());
        assert_eq!(
            err.to_string(),
            "navigation failed: net::ERR_CONNECTION_REFUSED"
        );
    }

    #[test]
    fn test_wait_timeout_display() {
        let err = BrowserError::WaitTimeout {
            selector: "div.relative.w-full > img".to_string(),
            waited: Duration::from_secs(60),
        };
        assert_eq!(
            err.to_string(),
            "timed out after 60s waiting for selector `div.relative.w-full > img`"
        );
    }
}

use crate::error::{BrowserError, Result};
use crate::wait;
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use std::path::Path;
use std::time::Duration;

/// Page-level automation verbs used by a verification run.
#[async_trait]
pub trait PageActions {
    /// Navigate to a URL and wait for the navigation to settle.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Wait until `selector` matches a visibly rendered element.
    async fn wait_for_visible(
        &self,
        selector: &str,
        timeout: Duration,
        poll: Duration,
    ) -> Result<()>;

    /// Capture a full-page PNG screenshot to `path`, returning the byte count.
    async fn screenshot_to(&self, path: &Path) -> Result<u64>;

    /// Current rendered HTML of the page.
    async fn html(&self) -> Result<String>;
}

#[async_trait]
impl PageActions for Page {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.goto(url)
            .await
            .map_err(|e| BrowserError::Navigation(e.to_string()))?;
        self.wait_for_navigation()
            .await
            .map_err(|e| BrowserError::Navigation(e.to_string()))?;
        Ok(())
    }

    async fn wait_for_visible(
        &self,
        selector: &str,
        timeout: Duration,
        poll: Duration,
    ) -> Result<()> {
        wait::wait_for_visible(self, selector, timeout, poll).await
    }

    async fn screenshot_to(&self, path: &Path) -> Result<u64> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();

        let bytes = self
            .save_screenshot(params, path)
            .await
            .map_err(|e| BrowserError::Screenshot(e.to_string()))?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "screenshot written");
        Ok(bytes.len() as u64)
    }

    async fn html(&self) -> Result<String> {
        self.content()
            .await
            .map_err(|e| BrowserError::Evaluation(e.to_string()))
    }
}

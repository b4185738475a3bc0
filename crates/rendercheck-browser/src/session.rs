use crate::error::{BrowserError, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures_util::stream::StreamExt;
use tokio::task::JoinHandle;

/// Browser launch options.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Run without a visible window
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 720,
        }
    }
}

/// A browser process scoped to a single verification run.
///
/// Each session launches its own Chromium with a temporary user-data
/// directory, so the pages it opens share no state with any other run.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch a browser process with the given options.
    pub async fn launch(options: &LaunchOptions) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(options.window_width, options.window_height)
            .no_sandbox();
        if !options.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // Drive CDP traffic until the browser shuts down
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        tracing::debug!(headless = options.headless, "browser launched");
        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Open a fresh blank page.
    pub async fn new_page(&self) -> Result<Page> {
        self.browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Page(e.to_string()))
    }

    /// Close the browser and wait for the process to exit.
    ///
    /// Must be called on every exit path. If the session is dropped without
    /// closing, the underlying child process is still killed, but `close`
    /// is the path that waits for it and tears down the handler task.
    pub async fn close(mut self) -> Result<()> {
        let closed = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        closed.map_err(|e| BrowserError::Shutdown(e.to_string()))?;
        tracing::debug!("browser closed");
        Ok(())
    }
}

//! The linear verification procedure.

use rendercheck_browser::{
    BrowserError, BrowserSession, ConsoleCapture, LaunchOptions, PageActions,
};
use rendercheck_core::VerifyConfig;
use std::time::Duration;
use tracing::{error, info, warn};

/// Map harness configuration onto browser launch options.
fn launch_options(config: &VerifyConfig) -> LaunchOptions {
    LaunchOptions {
        headless: config.browser.headless,
        window_width: config.browser.window_width,
        window_height: config.browser.window_height,
    }
}

/// Run the one-shot verification described by `config`.
///
/// The browser session is closed on every exit path, success or failure.
pub async fn run(config: &VerifyConfig) -> anyhow::Result<()> {
    let session = BrowserSession::launch(&launch_options(config)).await?;

    let outcome = verify(&session, config).await;
    let closed = session.close().await;

    match outcome {
        Ok(bytes) => {
            closed?;
            info!(
                path = %config.output.screenshot_path.display(),
                bytes,
                "screenshot captured"
            );
            Ok(())
        }
        Err(err) => {
            // The verification error is the root cause; a shutdown failure
            // on top of it is only logged.
            if let Err(close_err) = closed {
                warn!("browser shutdown after failure also failed: {close_err}");
            }
            Err(err.into())
        }
    }
}

async fn verify(session: &BrowserSession, config: &VerifyConfig) -> Result<u64, BrowserError> {
    let page = session.new_page().await?;

    // Mirror the page's console onto our stdout
    let _console = ConsoleCapture::attach_with_sink(
        &page,
        Some(Box::new(|message| println!("CONSOLE: {}", message.text))),
    )
    .await?;

    info!(url = %config.target.url, "navigating");
    page.navigate(&config.target.url).await?;

    let timeout = Duration::from_secs(config.wait.timeout_secs);
    let poll = Duration::from_millis(config.wait.poll_interval_ms);
    info!(selector = %config.target.selector, timeout_secs = config.wait.timeout_secs, "waiting for element");

    match page
        .wait_for_visible(&config.target.selector, timeout, poll)
        .await
    {
        Ok(()) => {}
        Err(err @ BrowserError::WaitTimeout { .. }) => {
            // Dump whatever actually rendered so a human can diagnose it
            println!("{err}. Page content:");
            match page.html().await {
                Ok(html) => println!("{html}"),
                Err(html_err) => error!("failed to fetch page content: {html_err}"),
            }
            return Err(err);
        }
        Err(err) => return Err(err),
    }

    page.screenshot_to(&config.output.screenshot_path).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_options_follow_config() {
        let mut config = VerifyConfig::default();
        config.browser.headless = false;
        config.browser.window_width = 1920;
        config.browser.window_height = 1080;

        let options = launch_options(&config);
        assert!(!options.headless);
        assert_eq!(options.window_width, 1920);
        assert_eq!(options.window_height, 1080);
    }

    #[test]
    fn test_default_config_maps_to_headless() {
        let options = launch_options(&VerifyConfig::default());
        assert!(options.headless);
    }
}

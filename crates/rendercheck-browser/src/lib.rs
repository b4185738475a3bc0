//! Headless browser automation for the rendercheck harness.
//!
//! Wraps chromiumoxide with the small set of operations a verification
//! run needs: session lifecycle, navigation, console capture, selector
//! waits and full-page screenshots.

pub mod actions;
pub mod console;
pub mod error;
pub mod session;
pub mod wait;

pub use actions::PageActions;
pub use console::{ConsoleCapture, ConsoleLevel, ConsoleMessage, ConsoleSink};
pub use error::{BrowserError, Result};
pub use session::{BrowserSession, LaunchOptions};

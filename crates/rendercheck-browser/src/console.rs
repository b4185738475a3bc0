//! Capture of console messages emitted by the loaded page.
//!
//! A single forwarding task drains the CDP `Runtime.consoleAPICalled`
//! event stream, so messages reach the sink and the buffer in the order
//! the page produced them.

use crate::error::{BrowserError, Result};
use chromiumoxide::cdp::js_protocol::runtime::{
    ConsoleApiCalledType, EventConsoleApiCalled, RemoteObject,
};
use chromiumoxide::Page;
use futures_util::stream::StreamExt;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;

/// Oldest messages are dropped once the buffer reaches this size.
const MAX_BUFFERED_MESSAGES: usize = 2000;

/// Console message level, mapped from the CDP call type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    /// console.log (and any call type without a dedicated level)
    Log,
    /// console.debug
    Debug,
    /// console.info
    Info,
    /// console.warn
    Warning,
    /// console.error
    Error,
}

impl std::fmt::Display for ConsoleLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Log => write!(f, "log"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl From<&ConsoleApiCalledType> for ConsoleLevel {
    fn from(kind: &ConsoleApiCalledType) -> Self {
        match kind {
            ConsoleApiCalledType::Debug => Self::Debug,
            ConsoleApiCalledType::Info => Self::Info,
            ConsoleApiCalledType::Warning => Self::Warning,
            ConsoleApiCalledType::Error => Self::Error,
            _ => Self::Log,
        }
    }
}

/// A captured console message.
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    /// Message level
    pub level: ConsoleLevel,
    /// Rendered message text
    pub text: String,
}

/// Callback invoked for each message as it arrives.
pub type ConsoleSink = Box<dyn Fn(&ConsoleMessage) + Send + Sync>;

/// Subscription to a page's console output.
///
/// Messages are forwarded to the optional sink and retained in a bounded
/// in-memory buffer. Dropping the capture detaches the subscription.
pub struct ConsoleCapture {
    messages: Arc<Mutex<Vec<ConsoleMessage>>>,
    task: JoinHandle<()>,
}

impl ConsoleCapture {
    /// Attach to a page's console, buffering messages only.
    pub async fn attach(page: &Page) -> Result<Self> {
        Self::attach_with_sink(page, None).await
    }

    /// Attach to a page's console, forwarding each message to `sink`.
    pub async fn attach_with_sink(page: &Page, sink: Option<ConsoleSink>) -> Result<Self> {
        let mut events = page
            .event_listener::<EventConsoleApiCalled>()
            .await
            .map_err(|e| BrowserError::Console(e.to_string()))?;

        let messages = Arc::new(Mutex::new(Vec::new()));
        let buffer = Arc::clone(&messages);

        let task = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                let message = ConsoleMessage {
                    level: ConsoleLevel::from(&event.r#type),
                    text: render_args(&event.args),
                };
                tracing::debug!(level = %message.level, "console: {}", message.text);
                if let Some(sink) = &sink {
                    sink(&message);
                }
                let mut buf = buffer.lock().unwrap_or_else(PoisonError::into_inner);
                push_bounded(&mut buf, message);
            }
        });

        Ok(Self { messages, task })
    }

    /// Snapshot of the buffered messages, in emission order.
    pub fn messages(&self) -> Vec<ConsoleMessage> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for ConsoleCapture {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn push_bounded(buf: &mut Vec<ConsoleMessage>, message: ConsoleMessage) {
    buf.push(message);
    if buf.len() > MAX_BUFFERED_MESSAGES {
        buf.remove(0);
    }
}

/// Join all call arguments into one line.
fn render_args(args: &[RemoteObject]) -> String {
    args.iter().map(render_arg).collect::<Vec<_>>().join(" ")
}

fn render_arg(arg: &RemoteObject) -> String {
    render_parts(arg.value.as_ref(), arg.description.as_deref())
}

/// Prefer the serialized JSON value, falling back to the remote object's
/// description (e.g. for DOM nodes or functions).
fn render_parts(value: Option<&serde_json::Value>, description: Option<&str>) -> String {
    match (value, description) {
        (Some(serde_json::Value::String(s)), _) => s.clone(),
        (Some(other), _) => other.to_string(),
        (None, Some(desc)) => desc.to_string(),
        (None, None) => "<unserializable>".to_string(),
    }
}

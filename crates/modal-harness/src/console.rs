//! Console message capture.
//!
//! Each [`Page`](crate::page::Page) accumulates the page's console output so
//! the suite can attach error-level messages to a failing scenario's detail
//! text. An `Arc<Mutex<Vec<_>>>` keeps arrival order and lets the CDP event
//! task and the runner share the buffer.

use chromiumoxide::cdp::js_protocol::runtime::EventConsoleApiCalled;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// The severity level of a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsoleLevel {
    /// `console.log()`
    Log,
    /// `console.info()`
    Info,
    /// `console.warn()`
    Warning,
    /// `console.error()`
    Error,
    /// `console.debug()`
    Debug,
    /// Catch-all for other console APIs
    Other,
}

impl ConsoleLevel {
    /// Returns true if this is an error-level message.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, ConsoleLevel::Error)
    }
}

impl From<&EventConsoleApiCalled> for ConsoleLevel {
    fn from(event: &EventConsoleApiCalled) -> Self {
        use chromiumoxide::cdp::js_protocol::runtime::ConsoleApiCalledType;

        match event.r#type {
            ConsoleApiCalledType::Log => ConsoleLevel::Log,
            ConsoleApiCalledType::Info => ConsoleLevel::Info,
            ConsoleApiCalledType::Warning => ConsoleLevel::Warning,
            ConsoleApiCalledType::Error => ConsoleLevel::Error,
            ConsoleApiCalledType::Debug => ConsoleLevel::Debug,
            _ => ConsoleLevel::Other,
        }
    }
}

/// A captured console message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleMessage {
    /// Severity level (log, warn, error, etc.)
    pub level: ConsoleLevel,

    /// The formatted message text. Multiple arguments are joined with spaces.
    pub text: String,
}

impl ConsoleMessage {
    /// Creates a new console message.
    #[must_use]
    pub fn new(level: ConsoleLevel, text: String) -> Self {
        Self { level, text }
    }
}

/// Thread-safe console message accumulator.
///
/// Cheaply cloneable (Arc); one clone lives in the CDP event task, the
/// other belongs to the page.
#[derive(Debug, Clone, Default)]
pub struct ConsoleCapture {
    messages: Arc<Mutex<Vec<ConsoleMessage>>>,
}

impl ConsoleCapture {
    /// Creates a new, empty console capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message to the buffer.
    ///
    /// A poisoned mutex means a panic is already in flight; the message is
    /// dropped rather than compounding the failure.
    pub(crate) fn push(&self, message: ConsoleMessage) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }
    }

    /// Returns all captured messages as a snapshot.
    #[must_use]
    pub fn messages(&self) -> Vec<ConsoleMessage> {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Returns all error-level messages.
    #[must_use]
    pub fn errors(&self) -> Vec<ConsoleMessage> {
        self.messages()
            .into_iter()
            .filter(|m| m.level.is_error())
            .collect()
    }

    /// Returns true if any error messages were captured.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .any(|m| m.level.is_error())
    }

    /// Clears all captured messages.
    ///
    /// Called between scenarios when the same page is reused, so a failing
    /// scenario only reports its own console output.
    pub fn clear(&self) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.clear();
        }
    }

    /// Returns the total number of messages captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Returns true if no messages have been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Converts a CDP `EventConsoleApiCalled` into a `ConsoleMessage`.
///
/// Arguments are formatted and joined with spaces; non-primitive arguments
/// render as `<object>`.
pub(crate) fn parse_console_event(event: &EventConsoleApiCalled) -> ConsoleMessage {
    let level = ConsoleLevel::from(event);

    let text = event
        .args
        .iter()
        .map(|arg| {
            arg.value
                .as_ref()
                .and_then(|v| v.as_str())
                .unwrap_or("<object>")
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(" ");

    ConsoleMessage::new(level, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_accumulates_in_order() {
        let capture = ConsoleCapture::new();

        capture.push(ConsoleMessage::new(ConsoleLevel::Log, "opened".into()));
        capture.push(ConsoleMessage::new(ConsoleLevel::Error, "bad".into()));
        capture.push(ConsoleMessage::new(ConsoleLevel::Warning, "warn".into()));

        assert_eq!(capture.len(), 3);
        assert!(capture.has_errors());
        assert_eq!(capture.messages()[0].text, "opened");
    }

    #[test]
    fn errors_filters_other_levels() {
        let capture = ConsoleCapture::new();

        capture.push(ConsoleMessage::new(ConsoleLevel::Log, "log1".into()));
        capture.push(ConsoleMessage::new(ConsoleLevel::Error, "err1".into()));
        capture.push(ConsoleMessage::new(ConsoleLevel::Log, "log2".into()));

        let errors = capture.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].text, "err1");
    }

    #[test]
    fn clear_resets_between_scenarios() {
        let capture = ConsoleCapture::new();
        capture.push(ConsoleMessage::new(ConsoleLevel::Error, "stale".into()));

        capture.clear();
        assert!(capture.is_empty());
        assert!(!capture.has_errors());
    }
}

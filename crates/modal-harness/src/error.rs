//! Error types for browser harness operations.
//!
//! The hierarchy distinguishes the failure modes the suite report cares
//! about: assertion failures and wait timeouts map to test failures, while
//! everything else is an unexpected error. Each variant carries context to
//! aid debugging.

use std::time::Duration;
use thiserror::Error;

/// The main error type for all browser harness operations.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Failed to launch the browser process.
    ///
    /// Typically the executable is missing or not runnable. Session setup
    /// treats this as "browser unavailable", not as a suite failure.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Human-readable reason for the launch failure
        reason: String,
        /// Optional underlying error that caused the failure
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to establish or keep the CDP connection.
    #[error("CDP connection failed: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL failed or timed out.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The URL that failed to load
        url: String,
        /// Reason for the navigation failure
        reason: String,
    },

    /// A wait condition was not satisfied within the timeout.
    ///
    /// Reported as a test failure, never as a silent skip.
    #[error("wait condition '{condition}' timed out after {timeout:?}")]
    WaitTimeout {
        /// Description of the condition that timed out
        condition: String,
        /// How long we waited before timing out
        timeout: Duration,
    },

    /// JavaScript execution in the page context failed.
    #[error("JavaScript execution failed: {0}")]
    ScriptFailed(String),

    /// No element matched the given selector.
    #[error("no element matched selector '{0}'")]
    ElementNotFound(String),

    /// An observed condition did not match the expected condition.
    ///
    /// Produced by [`check`]; the message is the scenario's expectation.
    #[error("assertion failed: {0}")]
    AssertionFailed(String),

    /// An operation was attempted on a closed browser instance.
    #[error("browser instance is already closed")]
    AlreadyClosed,

    /// Wraps errors from the chromiumoxide library.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),

    /// Generic I/O errors (file access, network, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    /// Returns true if this error means an expectation was violated rather
    /// than that something broke: assertion failures and expired waits.
    #[must_use]
    pub fn is_test_failure(&self) -> bool {
        matches!(
            self,
            HarnessError::AssertionFailed(_) | HarnessError::WaitTimeout { .. }
        )
    }
}

/// A specialized Result type for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Asserts a condition inside a scenario body.
///
/// Returns `AssertionFailed` with the given message when the condition does
/// not hold, so the runner can tell expectation violations apart from
/// unexpected errors.
///
/// # Errors
///
/// Returns `AssertionFailed` when `condition` is false.
pub fn check(condition: bool, message: impl Into<String>) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed(message.into()))
    }
}

/// Asserts that two values are equal, with a descriptive message.
///
/// # Errors
///
/// Returns `AssertionFailed` including both values when they differ.
pub fn check_eq<T: PartialEq + std::fmt::Debug>(
    actual: T,
    expected: T,
    message: &str,
) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed(format!(
            "{message} (expected {expected:?}, got {actual:?})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_passes_and_fails() {
        assert!(check(true, "never seen").is_ok());

        let err = check(false, "modal should be visible").unwrap_err();
        assert!(matches!(err, HarnessError::AssertionFailed(_)));
        assert!(err.to_string().contains("modal should be visible"));
    }

    #[test]
    fn check_eq_includes_both_values() {
        assert!(check_eq("dialog", "dialog", "role").is_ok());

        let err = check_eq("alert", "dialog", "role should be dialog").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("dialog"));
        assert!(text.contains("alert"));
    }

    #[test]
    fn failure_classification() {
        assert!(HarnessError::AssertionFailed("x".into()).is_test_failure());
        assert!(
            HarnessError::WaitTimeout {
                condition: "visible".into(),
                timeout: Duration::from_secs(10),
            }
            .is_test_failure()
        );
        assert!(!HarnessError::AlreadyClosed.is_test_failure());
        assert!(!HarnessError::ScriptFailed("boom".into()).is_test_failure());
    }
}

//! Browser lifecycle management and process control.
//!
//! `TestBrowser` launches a headless Chromium-family browser over CDP and
//! hands out [`Page`]s. `BrowserKind` names the browser flavors the suite
//! knows how to locate; a kind whose executable is missing is *unavailable*,
//! which callers are expected to turn into skipped tests, not failures.
//!
//! # Resource Safety
//!
//! `TestBrowser` relies on chromiumoxide's Drop to kill the process if
//! `close()` was never called, so panicking tests don't leak browsers.

use crate::error::{HarnessError, Result};
use crate::page::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// The browser flavors the suite can drive.
///
/// Both speak CDP; they differ only in which executable gets launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowserKind {
    /// Google Chrome (stable channel).
    Chrome,
    /// Chromium.
    Chromium,
}

impl BrowserKind {
    /// All kinds, in the order sessions are created.
    pub const ALL: [BrowserKind; 2] = [BrowserKind::Chrome, BrowserKind::Chromium];

    /// Display name used in the report.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            BrowserKind::Chrome => "Chrome",
            BrowserKind::Chromium => "Chromium",
        }
    }

    /// Executable names probed on `PATH`, in preference order.
    #[must_use]
    pub fn candidate_binaries(self) -> &'static [&'static str] {
        match self {
            BrowserKind::Chrome => &["google-chrome", "google-chrome-stable", "chrome"],
            BrowserKind::Chromium => &["chromium", "chromium-browser"],
        }
    }

    /// Locates this kind's executable by scanning `PATH`.
    ///
    /// Returns `None` when no candidate binary exists, meaning the kind is
    /// unavailable on this machine.
    #[must_use]
    pub fn locate(self) -> Option<PathBuf> {
        let path = std::env::var_os("PATH")?;
        for dir in std::env::split_paths(&path) {
            for name in self.candidate_binaries() {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

impl std::fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for launching a test browser.
///
/// Defaults are tuned for containerized headless execution.
#[derive(Debug, Clone)]
pub struct TestBrowserConfig {
    /// Run in headless mode (default: true).
    pub headless: bool,

    /// Browser window size (default: 1920x1080).
    pub window_size: (u32, u32),

    /// Additional browser arguments.
    pub args: Vec<String>,

    /// Browser executable path (None = chromiumoxide auto-detect).
    pub executable: Option<PathBuf>,
}

impl TestBrowserConfig {
    /// Creates a new config with defaults for headless testing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the executable to launch.
    #[must_use]
    pub fn with_executable(mut self, path: PathBuf) -> Self {
        self.executable = Some(path);
        self
    }

    /// Sets a custom window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Adds additional browser arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args.extend(args);
        self
    }

    /// Converts to chromiumoxide `BrowserConfig`.
    #[allow(clippy::result_large_err)]
    fn to_browser_config(&self) -> Result<BrowserConfig> {
        let mut config = BrowserConfig::builder();

        if self.headless {
            config = config.arg("--headless");
        }

        config = config.arg(format!(
            "--window-size={},{}",
            self.window_size.0, self.window_size.1
        ));

        // Unique user data directory so parallel instances (Chrome and
        // Chromium sessions coexist) don't hit ProcessSingleton conflicts.
        let temp_dir = std::env::temp_dir();
        let unique_id = uuid::Uuid::new_v4();
        let user_data_dir = temp_dir.join(format!("modal-harness-{unique_id}"));
        config = config.arg(format!("--user-data-dir={}", user_data_dir.display()));

        for arg in &self.args {
            config = config.arg(arg.clone());
        }

        if let Some(path) = &self.executable {
            config = config.chrome_executable(path.clone());
        }

        config.build().map_err(|e| HarnessError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

impl Default for TestBrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            args: vec![
                // Required when user namespaces are unavailable, the common
                // case inside containers. Only safe for trusted test pages.
                "--no-sandbox".to_string(),
                // Prevents /dev/shm exhaustion in constrained headless
                // environments.
                "--disable-dev-shm-usage".to_string(),
            ],
            executable: None,
        }
    }
}

/// A managed browser instance.
///
/// Wraps the browser process, drives its CDP handler on a background task,
/// and creates [`Page`]s.
///
/// # Resource Management
///
/// Prefer calling `close()` explicitly at suite teardown. Drop is the
/// fallback: chromiumoxide kills the process when the inner `Browser` is
/// dropped without a graceful close.
pub struct TestBrowser {
    inner: Arc<Mutex<Option<Browser>>>,
}

impl TestBrowser {
    /// Launches a new browser instance with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if the executable is missing, not runnable,
    /// or fails to start. Callers treating the browser as an optional
    /// dependency should record unavailability instead of propagating.
    pub async fn launch(config: TestBrowserConfig) -> Result<Self> {
        debug!("Launching browser with config: {:?}", config);

        let browser_config = config.to_browser_config()?;

        let (browser, mut handler) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| HarnessError::LaunchFailed {
                    reason: "failed to launch browser process".to_string(),
                    source: Some(Box::new(e)),
                })?;

        // Drive the CDP event handler; required for chromiumoxide to make
        // progress on any command.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("Browser handler error: {}", e);
                }
            }
        });

        debug!("Browser launched successfully");

        Ok(Self {
            inner: Arc::new(Mutex::new(Some(browser))),
        })
    }

    /// Launches a browser of the given kind, locating its executable first.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` when no executable for `kind` exists on
    /// `PATH` or the process fails to start.
    pub async fn launch_kind(kind: BrowserKind, config: TestBrowserConfig) -> Result<Self> {
        let executable = match config.executable.clone() {
            Some(path) => path,
            None => kind.locate().ok_or_else(|| HarnessError::LaunchFailed {
                reason: format!("no {kind} executable found on PATH"),
                source: None,
            })?,
        };

        Self::launch(config.with_executable(executable)).await
    }

    /// Creates a new browser page (tab).
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed` if the browser has been closed.
    pub async fn new_page(&self) -> Result<Page> {
        let browser = self.inner.lock().await;

        let browser = browser.as_ref().ok_or(HarnessError::AlreadyClosed)?;

        let chrome_page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| HarnessError::ConnectionFailed(e.to_string()))?;

        Ok(Page::new(chrome_page))
    }

    /// Closes the browser and kills the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser fails to close gracefully. Suite
    /// teardown ignores this; cleanup is best-effort.
    pub async fn close(self) -> Result<()> {
        let mut browser_guard = self.inner.lock().await;

        if let Some(mut browser) = browser_guard.take() {
            debug!("Closing browser gracefully");
            browser
                .close()
                .await
                .map_err(|e| HarnessError::ConnectionFailed(e.to_string()))?;
        }

        Ok(())
    }

    /// Returns true if the browser has been closed.
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_carries_headless_hardening_args() {
        let config = TestBrowserConfig::default();

        assert!(config.headless);
        assert_eq!(config.window_size, (1920, 1080));
        assert!(config.args.iter().any(|a| a == "--no-sandbox"));
        assert!(config.args.iter().any(|a| a == "--disable-dev-shm-usage"));
    }

    #[test]
    fn config_builders_compose() {
        let config = TestBrowserConfig::new()
            .with_window_size(375, 667)
            .with_args(vec!["--lang=en-US".to_string()]);

        assert_eq!(config.window_size, (375, 667));
        assert!(config.args.iter().any(|a| a == "--lang=en-US"));
        // Defaults are preserved, not replaced
        assert!(config.args.iter().any(|a| a == "--no-sandbox"));
    }

    #[test]
    fn kind_names_and_candidates() {
        assert_eq!(BrowserKind::Chrome.name(), "Chrome");
        assert_eq!(BrowserKind::Chromium.name(), "Chromium");
        assert!(
            BrowserKind::Chrome
                .candidate_binaries()
                .contains(&"google-chrome")
        );
        assert!(
            BrowserKind::Chromium
                .candidate_binaries()
                .contains(&"chromium")
        );
        assert_eq!(BrowserKind::ALL.len(), 2);
    }

    #[tokio::test]
    #[ignore] // Requires Chrome to be installed
    async fn browser_launch_and_close() {
        let browser = TestBrowser::launch(TestBrowserConfig::default())
            .await
            .expect("failed to launch browser");

        assert!(!browser.is_closed().await);

        browser.close().await.expect("failed to close browser");
    }
}

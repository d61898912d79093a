//! Per-browser session management.
//!
//! One optional live session per [`BrowserKind`], created at suite start
//! and closed best-effort at the end. A kind that fails to launch is
//! recorded as unavailable so its scenarios report skipped; one missing
//! browser never aborts the suite.

use crate::config;
use modal_harness::{BrowserKind, Page, TestBrowser, TestBrowserConfig};
use tracing::{info, warn};

/// A live browser plus the single page its scenarios reuse.
///
/// Sequential reuse is safe because every scenario re-navigates first.
pub struct Session {
    browser: TestBrowser,
    page: Page,
}

impl Session {
    /// The page scenarios run against.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }
}

/// The mapping from browser kind to its optional live session.
pub struct Sessions {
    entries: Vec<(BrowserKind, Option<Session>)>,
}

impl Sessions {
    /// Attempts to start a session for every supported kind.
    ///
    /// Launch failures are logged and recorded as unavailability.
    pub async fn initialize() -> Self {
        let mut entries = Vec::with_capacity(BrowserKind::ALL.len());

        for kind in BrowserKind::ALL {
            let session = Self::start(kind).await;
            entries.push((kind, session));
        }

        Self { entries }
    }

    async fn start(kind: BrowserKind) -> Option<Session> {
        let mut browser_config = TestBrowserConfig::default();
        if let Some(path) = config::executable_override(kind) {
            browser_config = browser_config.with_executable(path);
        }

        let browser = match TestBrowser::launch_kind(kind, browser_config).await {
            Ok(browser) => browser,
            Err(e) => {
                warn!("{kind} not available: {e}");
                return None;
            }
        };

        let page = match browser.new_page().await {
            Ok(page) => page,
            Err(e) => {
                warn!("{kind} started but could not open a page: {e}");
                let _ = browser.close().await;
                return None;
            }
        };

        info!("{kind} session started");
        Some(Session { browser, page })
    }

    /// Returns the live session for a kind, if one was started.
    #[must_use]
    pub fn get(&self, kind: BrowserKind) -> Option<&Session> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .and_then(|(_, session)| session.as_ref())
    }

    /// Closes every live session. Best-effort: close failures are logged
    /// and ignored so they never mask earlier test failures.
    pub async fn shutdown(self) {
        for (kind, session) in self.entries {
            if let Some(session) = session {
                if let Err(e) = session.browser.close().await {
                    warn!("failed to close {kind} session: {e}");
                }
            }
        }
    }
}

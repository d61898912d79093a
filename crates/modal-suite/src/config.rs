//! Suite configuration.
//!
//! The suite runs against a fixed page on an already-running local server
//! with a fixed bounded wait; a few environment variables exist so the
//! suite itself can be pointed at a different fixture host or browser
//! binary.

use modal_harness::{BrowserKind, StaticSite, WaitConfig};
use std::path::PathBuf;

/// Where the fixture server is expected to be listening.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Path of the page under test on the fixture server.
pub const PAGE_PATH: &str = "/test-modal-comprehensive.html";

/// Environment variable overriding the fixture server's base URL.
pub const BASE_URL_VAR: &str = "MODAL_SUITE_BASE_URL";

/// Runtime configuration for a suite run.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// The already-running server hosting the page under test.
    pub site: StaticSite,

    /// Bounded wait applied to every DOM condition.
    pub wait: WaitConfig,
}

impl SuiteConfig {
    /// Builds the configuration, honoring environment overrides.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_base_url_override(std::env::var(BASE_URL_VAR).ok())
    }

    fn with_base_url_override(base_url: Option<String>) -> Self {
        Self {
            site: StaticSite::new(base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string())),
            wait: WaitConfig::default(),
        }
    }

    /// Full URL of the page under test.
    #[must_use]
    pub fn page_url(&self) -> String {
        use modal_harness::ExternalServer;
        self.site.url(PAGE_PATH)
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self::with_base_url_override(None)
    }
}

/// Name of the environment variable overriding a kind's executable.
#[must_use]
pub fn executable_override_var(kind: BrowserKind) -> &'static str {
    match kind {
        BrowserKind::Chrome => "MODAL_SUITE_CHROME",
        BrowserKind::Chromium => "MODAL_SUITE_CHROMIUM",
    }
}

/// Returns the executable override for a kind, if one is set.
#[must_use]
pub fn executable_override(kind: BrowserKind) -> Option<PathBuf> {
    std::env::var_os(executable_override_var(kind)).map(PathBuf::from)
}

//! External fixture-server abstraction.
//!
//! The suite never starts an HTTP server; the page under test must already
//! be served. `ExternalServer` is the seam that names where, and
//! `StaticSite` is the implementation for a fixed local URL.

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// A server that is already serving the pages under test.
///
/// Object-safe so sessions can hold a `&dyn ExternalServer` when the suite
/// grows more fixture sources.
#[async_trait]
pub trait ExternalServer: Send + Sync {
    /// Returns the base URL of the server (e.g., `<http://localhost:8000>`).
    fn base_url(&self) -> &str;

    /// Performs a health check to ensure the server is responsive.
    ///
    /// Called before navigation to fail fast when the fixture server is
    /// down. The default implementation assumes the server is healthy.
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    /// Returns a full URL by joining a path to the base URL.
    fn url(&self, path: &str) -> String {
        let base = self.base_url().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl fmt::Debug for dyn ExternalServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalServer")
            .field("base_url", &self.base_url())
            .finish()
    }
}

/// An already-running site at a fixed URL.
#[derive(Debug, Clone)]
pub struct StaticSite {
    base_url: String,
}

impl StaticSite {
    /// Creates a handle to a site served at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ExternalServer for StaticSite {
    fn base_url(&self) -> &str {
        &self.base_url
    }
}

//! # modal-harness
//!
//! A headless-browser testing harness built on chromiumoxide.
//!
//! This crate provides the primitives the contact-modal suite drives:
//! launching headless Chrome or Chromium, navigating pages, clicking and
//! typing, dispatching raw keyboard and mouse input, emulating viewports,
//! and waiting on DOM conditions with bounded timeouts.
//!
//! ## Architecture
//!
//! - **TestBrowser** / **BrowserKind**: browser process lifecycle and
//!   executable discovery per browser flavor
//! - **Page**: a tab with navigation, element operations, and input
//! - **ConsoleCapture**: accumulation of page console messages
//! - **ExternalServer**: the already-running fixture server
//! - **WaitConfig**: bounded polling waits; timeout is a failure
//!
//! ## Example Usage
//!
//! ```ignore
//! use modal_harness::{TestBrowser, TestBrowserConfig, WaitConfig};
//!
//! let browser = TestBrowser::launch(TestBrowserConfig::default()).await?;
//! let page = browser.new_page().await?;
//!
//! page.navigate("http://localhost:8000/test-modal-comprehensive.html").await?;
//! page.click("#test-trigger").await?;
//! page.wait_for_visible("#contact-modal", WaitConfig::default()).await?;
//!
//! browser.close().await?;
//! ```
//!
//! ## Testing Strategy
//!
//! 1. **Unit tests**: logic that needs no browser (wait strategies, console
//!    filtering, selector escaping)
//! 2. **Integration tests**: real browser tests, marked `#[ignore]`
//!    (require Chrome installed)
//!
//! Run with `cargo test` (unit) or `cargo test -- --ignored` (integration).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod browser;
pub mod console;
pub mod error;
pub mod page;
pub mod server;
pub mod wait;

// Re-export main types for convenience
pub use browser::{BrowserKind, TestBrowser, TestBrowserConfig};
pub use console::{ConsoleCapture, ConsoleLevel, ConsoleMessage};
pub use error::{HarnessError, Result, check, check_eq};
pub use page::{Page, Rect};
pub use server::{ExternalServer, StaticSite};
pub use wait::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, WaitConfig};

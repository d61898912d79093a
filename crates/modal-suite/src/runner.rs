//! Scenario execution and outcome capture.
//!
//! `run_scenario` owns the outcome taxonomy: a missing session is a skip,
//! an assertion failure or wait timeout is a failure, anything else is an
//! error. On failure it enriches the detail with the page's console errors
//! and drops a screenshot in the temp dir for debugging.

use crate::config::SuiteConfig;
use crate::report::{Outcome, Record};
use crate::scenarios::Scenario;
use crate::sessions::Session;
use modal_harness::{BrowserKind, Page};
use tracing::{debug, info};

/// Runs one scenario against one browser kind and records the outcome.
pub async fn run_scenario(
    scenario: Scenario,
    kind: BrowserKind,
    session: Option<&Session>,
    config: &SuiteConfig,
) -> Record {
    let Some(session) = session else {
        return Record {
            scenario: scenario.name(),
            browser: kind,
            outcome: Outcome::Skipped(format!("{kind} not available")),
        };
    };

    let page = session.page();
    page.console().clear();
    debug!("running {} on {kind}", scenario.name());

    let outcome = match scenario.run(page, config).await {
        Ok(()) => Outcome::Passed,
        Err(error) => {
            let mut detail = error.to_string();

            let console_errors = page.console().errors();
            if !console_errors.is_empty() {
                detail.push_str("; console errors:");
                for message in console_errors {
                    detail.push_str(&format!(" [{}]", message.text));
                }
            }

            save_failure_screenshot(page, scenario, kind).await;
            Outcome::from_error(&error, detail)
        }
    };

    Record {
        scenario: scenario.name(),
        browser: kind,
        outcome,
    }
}

/// Writes a PNG of the page as it looked when the scenario failed.
///
/// Best-effort: a failed screenshot must never change the outcome.
async fn save_failure_screenshot(page: &Page, scenario: Scenario, kind: BrowserKind) {
    let png = match page.screenshot().await {
        Ok(png) => png,
        Err(e) => {
            debug!("screenshot capture failed: {e}");
            return;
        }
    };

    let path = std::env::temp_dir().join(format!(
        "modal-suite-{}-{}.png",
        scenario.name(),
        kind.name().to_lowercase()
    ));

    match std::fs::write(&path, png) {
        Ok(()) => info!("failure screenshot written to {}", path.display()),
        Err(e) => debug!("could not write screenshot: {e}"),
    }
}

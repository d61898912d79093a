//! Entry point for the contact-modal test suite.
//!
//! Takes no flags. Requires the fixture page to already be served at the
//! configured URL. Exits 0 when every scenario passed or was skipped, 1
//! otherwise.

use modal_harness::BrowserKind;
use modal_suite::config::SuiteConfig;
use modal_suite::report::{Report, print_record};
use modal_suite::scenarios::Scenario;
use modal_suite::sessions::Sessions;
use modal_suite::{logger, runner};
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    logger::init();

    let config = SuiteConfig::from_env();
    info!("running contact-modal suite against {}", config.page_url());

    let sessions = Sessions::initialize().await;

    let mut report = Report::new();
    for scenario in Scenario::ALL {
        for kind in BrowserKind::ALL {
            let record = runner::run_scenario(scenario, kind, sessions.get(kind), &config).await;
            print_record(&record);
            report.push(record);
        }
    }

    sessions.shutdown().await;
    report.print_summary();

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

//! Outcome records and the console report.
//!
//! Every scenario run produces one [`Record`]; the [`Report`] collects them
//! all and renders the final summary. The exit code follows the report:
//! zero iff nothing failed or errored. Skips are not defects.

use modal_harness::{BrowserKind, HarnessError};
use owo_colors::OwoColorize;

/// The result of one scenario on one browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every assertion held.
    Passed,
    /// An expectation was violated or a bounded wait expired.
    Failed(String),
    /// An unexpected exception, distinct from an assertion failure.
    Errored(String),
    /// The browser this scenario targets is unavailable.
    Skipped(String),
}

impl Outcome {
    /// Classifies a harness error: assertion failures and wait timeouts are
    /// test failures, everything else is an error.
    #[must_use]
    pub fn from_error(error: &HarnessError, detail: String) -> Self {
        if error.is_test_failure() {
            Outcome::Failed(detail)
        } else {
            Outcome::Errored(detail)
        }
    }
}

/// One scenario outcome, tied to the browser it ran on.
#[derive(Debug, Clone)]
pub struct Record {
    /// Scenario name as shown in the report.
    pub scenario: &'static str,
    /// Browser the scenario targeted.
    pub browser: BrowserKind,
    /// What happened.
    pub outcome: Outcome,
}

impl Record {
    /// Identifying name: scenario plus browser.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} [{}]", self.scenario, self.browser)
    }
}

/// Prints one status line as a scenario finishes.
pub fn print_record(record: &Record) {
    let label = record.label();
    match &record.outcome {
        Outcome::Passed => eprintln!("{} {label}", "✓".green().bold()),
        Outcome::Failed(detail) => eprintln!("{} {label}: {detail}", "✗".red().bold()),
        Outcome::Errored(detail) => eprintln!("{} {label}: {detail}", "✗".red().bold()),
        Outcome::Skipped(reason) => eprintln!("{} {label}: {reason}", "⚠".yellow().bold()),
    }
}

/// Collected outcomes for a whole run.
#[derive(Debug, Default)]
pub struct Report {
    records: Vec<Record>,
}

impl Report {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Total number of scenario runs, skips included.
    #[must_use]
    pub fn total(&self) -> usize {
        self.records.len()
    }

    fn count(&self, matches: impl Fn(&Outcome) -> bool) -> usize {
        self.records.iter().filter(|r| matches(&r.outcome)).count()
    }

    /// Number of passed runs.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Passed))
    }

    /// Number of failed runs.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    /// Number of errored runs.
    #[must_use]
    pub fn errors(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Errored(_)))
    }

    /// Number of skipped runs.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped(_)))
    }

    /// True when nothing failed or errored. Skips do not fail a run.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures() == 0 && self.errors() == 0
    }

    /// Prints the human-readable summary.
    pub fn print_summary(&self) {
        println!();
        println!("{}", "=".repeat(50));
        println!("TEST SUMMARY");
        println!("{}", "=".repeat(50));
        println!(
            "Tests run: {} (passed {}, skipped {})",
            self.total(),
            self.passed(),
            self.skipped()
        );
        println!("Failures: {}", self.failures());
        println!("Errors: {}", self.errors());

        if self.failures() > 0 {
            println!("\nFAILURES:");
            for record in &self.records {
                if let Outcome::Failed(detail) = &record.outcome {
                    println!("- {}: {detail}", record.label());
                }
            }
        }

        if self.errors() > 0 {
            println!("\nERRORS:");
            for record in &self.records {
                if let Outcome::Errored(detail) = &record.outcome {
                    println!("- {}: {detail}", record.label());
                }
            }
        }
    }
}

//! # modal-suite
//!
//! Test orchestrator for the contact-modal page. For each available browser
//! kind it runs the fixed battery of [`scenarios`], collects
//! pass/fail/error/skip outcomes, and prints a summary; the binary exits
//! non-zero when anything failed or errored.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod logger;
pub mod report;
pub mod runner;
pub mod scenarios;
pub mod sessions;

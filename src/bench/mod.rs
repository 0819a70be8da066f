//! Benchmark Harness Module
//!
//! # Components
//!
//! - [`runner`] - Single-record insert benchmark (the headline number)
//! - [`suite`] - Create/read/update/delete timings per column set
//! - [`timing`] - Per-repetition samples and their statistics
//! - [`clock`] - Time source, swappable in tests
//! - [`report`] - Stdout summary line and CSV export

pub mod clock;
pub mod report;
pub mod runner;
pub mod suite;
pub mod timing;

pub use clock::{Clock, MonotonicClock, ScriptedClock};
pub use runner::{run_and_report, run_insert_benchmark};
pub use suite::{Operation, SuiteEntry, SuiteResult, run_operation, run_suite};
pub use timing::TimingSummary;

//! employee_bench - Row-by-row PostgreSQL insert benchmark
//!
//! Generates synthetic employee records and times single-row inserts into an
//! `employees` table, one statement at a time over one connection.
//!
//! # Modules
//!
//! - [`employee`] - Employee record model and synthetic generator
//! - [`store`] - Table access trait, PostgreSQL and in-memory stores
//! - [`bench`] - Insert runner, column-set suite, timing, reporting
//! - [`db`] - Connection and schema bootstrap
//! - [`config`] - YAML + environment configuration
//! - [`logging`] - tracing subscriber setup
//! - [`error`] - Error type shared by every layer

pub mod bench;
pub mod config;
pub mod db;
pub mod employee;
pub mod error;
pub mod logging;
pub mod store;

// Convenient re-exports at crate root
pub use bench::{Clock, MonotonicClock, Operation, TimingSummary, run_insert_benchmark, run_suite};
pub use config::{AppConfig, DatabaseConfig, InsertConfig, SuiteConfig};
pub use db::Database;
pub use employee::{EmployeeGenerator, EmployeeRecord};
pub use error::BenchError;
pub use store::{ColumnSet, EmployeeStore, MemoryStore, PgEmployeeStore};

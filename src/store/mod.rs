//! Employee table access
//!
//! The benchmark talks to the table only through [`EmployeeStore`], so the
//! runner and suite can be driven by an in-memory double in tests.

pub mod columns;
pub mod memory;
pub mod postgres;
pub mod queries;

use async_trait::async_trait;

use crate::employee::EmployeeRecord;
use crate::error::BenchError;

pub use columns::{Column, ColumnSet};
pub use memory::{CallCounts, FailPoint, MemoryStore};
pub use postgres::PgEmployeeStore;
pub use queries::Statements;

/// One-statement-at-a-time access to the `employees` table.
///
/// Each method maps its database failure to the matching [`BenchError`]
/// variant (`insert` → `Insert`, `truncate` → `Truncate`, ...).
#[async_trait]
pub trait EmployeeStore: Send {
    /// Insert one row, binding only the columns of `set`.
    async fn insert(&mut self, set: ColumnSet, record: &EmployeeRecord) -> Result<(), BenchError>;

    /// Select rows equal to `record` on every column of `set`. Returns the row count.
    async fn select_matching(
        &mut self,
        set: ColumnSet,
        record: &EmployeeRecord,
    ) -> Result<usize, BenchError>;

    /// Rewrite the payload columns of rows matching `target` with the values
    /// of `replacement`. Returns rows affected.
    async fn update_matching(
        &mut self,
        set: ColumnSet,
        replacement: &EmployeeRecord,
        target: &EmployeeRecord,
    ) -> Result<u64, BenchError>;

    /// Delete rows matching `record` inside a transaction, then roll it back.
    /// Returns rows the delete would have removed.
    async fn delete_matching_rolled_back(
        &mut self,
        set: ColumnSet,
        record: &EmployeeRecord,
    ) -> Result<u64, BenchError>;

    /// Remove every row.
    async fn truncate(&mut self) -> Result<(), BenchError>;
}

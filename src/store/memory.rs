//! In-memory [`EmployeeStore`]
//!
//! Backs `--dry-run` (generator and loop overhead without a database) and
//! the runner tests. Each call is counted, and a failure can be armed for a
//! given operation.

use async_trait::async_trait;

use super::EmployeeStore;
use super::columns::{Column, ColumnSet};
use crate::employee::EmployeeRecord;
use crate::error::BenchError;

/// Operation a [`MemoryStore`] can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    Insert,
    Select,
    Update,
    Delete,
    Truncate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub inserts: usize,
    pub selects: usize,
    pub updates: usize,
    pub deletes: usize,
    pub truncates: usize,
}

#[derive(Debug, Clone)]
struct StoredRow {
    columns: Vec<Column>,
    record: EmployeeRecord,
}

impl StoredRow {
    fn matches(&self, set: ColumnSet, other: &EmployeeRecord) -> bool {
        set.columns()
            .iter()
            .all(|c| self.columns.contains(c) && column_eq(*c, &self.record, other))
    }
}

fn column_eq(column: Column, a: &EmployeeRecord, b: &EmployeeRecord) -> bool {
    match column {
        Column::EmployeeId => a.employee_id == b.employee_id,
        Column::FirstName => a.first_name == b.first_name,
        Column::LastName => a.last_name == b.last_name,
        Column::Age => a.age == b.age,
        Column::Rating => a.rating == b.rating,
        Column::JsonContactInfo => a.json_contact_info == b.json_contact_info,
        Column::BjsonContactInfo => a.bjson_contact_info == b.bjson_contact_info,
        Column::Address => a.address == b.address,
    }
}

fn copy_column(column: Column, dst: &mut EmployeeRecord, src: &EmployeeRecord) {
    match column {
        Column::EmployeeId => dst.employee_id = src.employee_id,
        Column::FirstName => dst.first_name.clone_from(&src.first_name),
        Column::LastName => dst.last_name.clone_from(&src.last_name),
        Column::Age => dst.age = src.age,
        Column::Rating => dst.rating = src.rating,
        Column::JsonContactInfo => dst.json_contact_info.clone_from(&src.json_contact_info),
        Column::BjsonContactInfo => dst.bjson_contact_info.clone_from(&src.bjson_contact_info),
        Column::Address => dst.address.clone_from(&src.address),
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<StoredRow>,
    calls: CallCounts,
    fail: Option<(FailPoint, usize)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `nth` (1-based) call of `point`, and every call after it.
    pub fn fail_on(mut self, point: FailPoint, nth: usize) -> Self {
        self.fail = Some((point, nth.max(1)));
        self
    }

    pub fn calls(&self) -> CallCounts {
        self.calls
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn check(&self, point: FailPoint, call_no: usize) -> Result<(), sqlx::Error> {
        match self.fail {
            Some((p, nth)) if p == point && call_no >= nth => Err(sqlx::Error::Protocol(format!(
                "injected {:?} failure on call {}",
                point, call_no
            ))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn insert(&mut self, set: ColumnSet, record: &EmployeeRecord) -> Result<(), BenchError> {
        self.calls.inserts += 1;
        self.check(FailPoint::Insert, self.calls.inserts)
            .map_err(BenchError::Insert)?;
        self.rows.push(StoredRow {
            columns: set.columns().to_vec(),
            record: record.clone(),
        });
        Ok(())
    }

    async fn select_matching(
        &mut self,
        set: ColumnSet,
        record: &EmployeeRecord,
    ) -> Result<usize, BenchError> {
        self.calls.selects += 1;
        self.check(FailPoint::Select, self.calls.selects)
            .map_err(BenchError::Read)?;
        Ok(self.rows.iter().filter(|r| r.matches(set, record)).count())
    }

    async fn update_matching(
        &mut self,
        set: ColumnSet,
        replacement: &EmployeeRecord,
        target: &EmployeeRecord,
    ) -> Result<u64, BenchError> {
        self.calls.updates += 1;
        self.check(FailPoint::Update, self.calls.updates)
            .map_err(BenchError::Update)?;
        let mut affected = 0;
        for row in self.rows.iter_mut().filter(|r| r.matches(set, target)) {
            for column in set.payload_columns() {
                copy_column(*column, &mut row.record, replacement);
                if !row.columns.contains(column) {
                    row.columns.push(*column);
                }
            }
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete_matching_rolled_back(
        &mut self,
        set: ColumnSet,
        record: &EmployeeRecord,
    ) -> Result<u64, BenchError> {
        self.calls.deletes += 1;
        self.check(FailPoint::Delete, self.calls.deletes)
            .map_err(BenchError::Delete)?;
        Ok(self.rows.iter().filter(|r| r.matches(set, record)).count() as u64)
    }

    async fn truncate(&mut self) -> Result<(), BenchError> {
        self.calls.truncates += 1;
        self.check(FailPoint::Truncate, self.calls.truncates)
            .map_err(BenchError::Truncate)?;
        self.rows.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::EmployeeGenerator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn records(n: usize) -> Vec<EmployeeRecord> {
        EmployeeGenerator::new(StdRng::seed_from_u64(99)).generate_batch(n)
    }

    #[tokio::test]
    async fn test_partial_rows_only_match_their_columns() {
        let rec = records(1).remove(0);
        let mut store = MemoryStore::new();
        store.insert(ColumnSet::Integer, &rec).await.unwrap();

        assert_eq!(store.select_matching(ColumnSet::Integer, &rec).await.unwrap(), 1);
        // the rating column was never written
        assert_eq!(store.select_matching(ColumnSet::Float, &rec).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_then_select() {
        let recs = records(2);
        let (target, replacement) = (&recs[0], &recs[1]);
        let mut store = MemoryStore::new();
        store.insert(ColumnSet::Full, target).await.unwrap();

        let n = store
            .update_matching(ColumnSet::Text, replacement, target)
            .await
            .unwrap();
        assert_eq!(n, 1);
        assert_eq!(store.select_matching(ColumnSet::Text, target).await.unwrap(), 0);

        let mut expected = target.clone();
        expected.first_name = replacement.first_name.clone();
        expected.last_name = replacement.last_name.clone();
        assert_eq!(store.select_matching(ColumnSet::Full, &expected).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_leaves_rows() {
        let rec = records(1).remove(0);
        let mut store = MemoryStore::new();
        store.insert(ColumnSet::Full, &rec).await.unwrap();
        let n = store
            .delete_matching_rolled_back(ColumnSet::Geometry, &rec)
            .await
            .unwrap();
        assert_eq!(n, 1);
        assert_eq!(store.row_count(), 1);
    }

    #[tokio::test]
    async fn test_fail_on_nth_insert() {
        let recs = records(3);
        let mut store = MemoryStore::new().fail_on(FailPoint::Insert, 2);
        store.insert(ColumnSet::Full, &recs[0]).await.unwrap();
        let err = store.insert(ColumnSet::Full, &recs[1]).await.unwrap_err();
        assert!(matches!(err, BenchError::Insert(_)));
        assert!(store.insert(ColumnSet::Full, &recs[2]).await.is_err());
        assert_eq!(store.row_count(), 1);
        assert_eq!(store.calls().inserts, 3);
    }

    #[tokio::test]
    async fn test_truncate_failure() {
        let mut store = MemoryStore::new().fail_on(FailPoint::Truncate, 1);
        let err = store.truncate().await.unwrap_err();
        assert!(matches!(err, BenchError::Truncate(_)));
    }
}

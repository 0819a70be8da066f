//! Column-set CRUD suite
//!
//! Times create / read / update / delete for each [`ColumnSet`]. Only the K
//! sampled statements sit inside the timed region; pool generation, seeding
//! and truncation are outside it.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::clock::Clock;
use super::report::suite_line;
use super::timing::TimingSummary;
use crate::config::SuiteConfig;
use crate::employee::{EmployeeGenerator, EmployeeRecord};
use crate::error::BenchError;
use crate::store::{ColumnSet, EmployeeStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Create,
        Operation::Read,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown operation: {}", s))
    }
}

/// Timings of one (operation, column set) pair
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteEntry {
    pub operation: Operation,
    pub set: ColumnSet,
    pub summary: TimingSummary,
}

impl SuiteEntry {
    /// CSV column name, e.g. `geometry_query_update`
    pub fn column_name(&self) -> String {
        format!("{}_query_{}", self.set, self.operation)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuiteResult {
    pub entries: Vec<SuiteEntry>,
    /// Wall time of the whole suite, setup included
    pub wall_seconds: f64,
}

pub fn validate(params: &SuiteConfig) -> Result<(), BenchError> {
    if params.pool_size == 0 {
        return Err(BenchError::InvalidParameters(
            "pool_size must be at least 1".to_string(),
        ));
    }
    if params.sample_size > params.pool_size {
        return Err(BenchError::InvalidParameters(format!(
            "sample_size ({}) cannot exceed pool_size ({}): samples are drawn without replacement",
            params.sample_size, params.pool_size
        )));
    }
    Ok(())
}

/// Run every operation for every set, sets outermost.
///
/// `on_entry` sees each entry as soon as its step finishes, so completed
/// steps are reported even if a later one fails.
pub async fn run_suite<S, C, R, F>(
    store: &mut S,
    generator: &mut EmployeeGenerator<R>,
    clock: &C,
    sets: &[ColumnSet],
    operations: &[Operation],
    params: &SuiteConfig,
    mut on_entry: F,
) -> Result<SuiteResult, BenchError>
where
    S: EmployeeStore + ?Sized,
    C: Clock + ?Sized,
    R: Rng,
    F: FnMut(&SuiteEntry) -> Result<(), BenchError>,
{
    validate(params)?;

    let start = clock.now();
    let mut entries = Vec::with_capacity(sets.len() * operations.len());

    for &set in sets {
        for &operation in operations {
            let summary = run_operation(store, generator, clock, operation, set, params).await?;
            let entry = SuiteEntry {
                operation,
                set,
                summary,
            };
            tracing::info!(
                "{}",
                suite_line(
                    &format!("{} {}", set, operation),
                    &entry.summary,
                    params.sample_size,
                    params.pool_size,
                )
            );
            on_entry(&entry)?;
            entries.push(entry);
        }
    }

    Ok(SuiteResult {
        entries,
        wall_seconds: clock.seconds_since(start),
    })
}

/// Time one operation on one column set.
pub async fn run_operation<S, C, R>(
    store: &mut S,
    generator: &mut EmployeeGenerator<R>,
    clock: &C,
    operation: Operation,
    set: ColumnSet,
    params: &SuiteConfig,
) -> Result<TimingSummary, BenchError>
where
    S: EmployeeStore + ?Sized,
    C: Clock + ?Sized,
    R: Rng,
{
    validate(params)?;
    tracing::debug!(%operation, %set, "Running suite step");

    match operation {
        Operation::Create => timed_create(store, generator, clock, set, params).await,
        Operation::Read | Operation::Update | Operation::Delete => {
            timed_on_seeded_table(store, generator, clock, operation, set, params).await
        }
    }
}

/// Fresh pool per repetition; the table is emptied after each one.
async fn timed_create<S, C, R>(
    store: &mut S,
    generator: &mut EmployeeGenerator<R>,
    clock: &C,
    set: ColumnSet,
    params: &SuiteConfig,
) -> Result<TimingSummary, BenchError>
where
    S: EmployeeStore + ?Sized,
    C: Clock + ?Sized,
    R: Rng,
{
    let mut summary = TimingSummary::with_capacity(params.repetitions);

    for _ in 0..params.repetitions {
        let pool = generator.generate_batch(params.pool_size);
        let sampled = generator.sample_distinct(&pool, params.sample_size);

        let start = clock.now();
        for record in sampled {
            store.insert(set, record).await?;
        }
        summary.record(clock.seconds_since(start));

        store.truncate().await?;
    }

    Ok(summary)
}

/// One pool, inserted in full once; repetitions query it; truncated at the end.
async fn timed_on_seeded_table<S, C, R>(
    store: &mut S,
    generator: &mut EmployeeGenerator<R>,
    clock: &C,
    operation: Operation,
    set: ColumnSet,
    params: &SuiteConfig,
) -> Result<TimingSummary, BenchError>
where
    S: EmployeeStore + ?Sized,
    C: Clock + ?Sized,
    R: Rng,
{
    let pool = generator.generate_batch(params.pool_size);
    for record in &pool {
        store.insert(ColumnSet::Full, record).await?;
    }

    // Update rewrites the same rows with the same values every repetition.
    let replacements: Vec<&EmployeeRecord> = if operation == Operation::Update {
        generator.sample_distinct(&pool, params.sample_size)
    } else {
        Vec::new()
    };

    let mut summary = TimingSummary::with_capacity(params.repetitions);
    let mut matched = 0u64;

    for _ in 0..params.repetitions {
        let sampled = generator.sample_distinct(&pool, params.sample_size);

        let start = clock.now();
        for (j, record) in sampled.into_iter().enumerate() {
            matched += match operation {
                Operation::Read => store.select_matching(set, record).await? as u64,
                Operation::Update => store.update_matching(set, replacements[j], record).await?,
                Operation::Delete => store.delete_matching_rolled_back(set, record).await?,
                Operation::Create => unreachable!("create runs on an empty table"),
            };
        }
        summary.record(clock.seconds_since(start));
    }

    store.truncate().await?;
    tracing::debug!(%operation, %set, matched, "Seeded-table step complete");

    Ok(summary)
}

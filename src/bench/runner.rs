//! Single-record insert benchmark
//!
//! ```text
//! for each repetition:
//!     start clock
//!     repeat M times: generate N records, pick one, INSERT it
//!     TRUNCATE employees
//!     stop clock, record seconds
//! mean of all repetitions
//! ```
//!
//! The first failing insert or truncate ends the run; samples already taken
//! are discarded with it.

use std::io::Write;

use rand::Rng;

use super::clock::Clock;
use super::report::average_line;
use super::timing::TimingSummary;
use crate::config::InsertConfig;
use crate::employee::EmployeeGenerator;
use crate::error::BenchError;
use crate::store::{ColumnSet, EmployeeStore};

/// Reject parameters the loop cannot execute.
pub fn validate(params: &InsertConfig) -> Result<(), BenchError> {
    if params.inserts_per_repetition > 0 && params.batch_size == 0 {
        return Err(BenchError::InvalidParameters(
            "batch_size must be at least 1 to sample a record".to_string(),
        ));
    }
    Ok(())
}

/// Run the full-row insert benchmark and return one sample per repetition.
pub async fn run_insert_benchmark<S, C, R>(
    store: &mut S,
    generator: &mut EmployeeGenerator<R>,
    clock: &C,
    params: &InsertConfig,
) -> Result<TimingSummary, BenchError>
where
    S: EmployeeStore + ?Sized,
    C: Clock + ?Sized,
    R: Rng,
{
    validate(params)?;

    tracing::info!(
        repetitions = params.repetitions,
        inserts_per_repetition = params.inserts_per_repetition,
        batch_size = params.batch_size,
        "Starting insert benchmark"
    );

    let progress_every = (params.repetitions / 10).max(1);
    let mut summary = TimingSummary::with_capacity(params.repetitions);

    for rep in 0..params.repetitions {
        let start = clock.now();

        for _ in 0..params.inserts_per_repetition {
            let batch = generator.generate_batch(params.batch_size);
            let record = generator.sample(&batch).ok_or_else(|| {
                BenchError::InvalidParameters("generated batch is empty".to_string())
            })?;
            store.insert(ColumnSet::Full, record).await?;
        }

        store.truncate().await?;

        let elapsed = clock.seconds_since(start);
        summary.record(elapsed);
        tracing::debug!(rep, elapsed_secs = elapsed, "Repetition complete");

        if (rep + 1) % progress_every == 0 {
            tracing::info!(
                "Progress: {}/{} repetitions, last {:.3}s",
                rep + 1,
                params.repetitions,
                elapsed
            );
        }
    }

    Ok(summary)
}

/// Run the benchmark and write the average line to `out`.
///
/// Nothing is written when the run fails or when no repetition ran.
pub async fn run_and_report<S, C, R, W>(
    store: &mut S,
    generator: &mut EmployeeGenerator<R>,
    clock: &C,
    params: &InsertConfig,
    out: &mut W,
) -> Result<TimingSummary, BenchError>
where
    S: EmployeeStore + ?Sized,
    C: Clock + ?Sized,
    R: Rng,
    W: Write + ?Sized,
{
    let summary = run_insert_benchmark(store, generator, clock, params).await?;
    if let Some(mean) = summary.mean() {
        writeln!(out, "{}", average_line(mean)).map_err(BenchError::Output)?;
        out.flush().map_err(BenchError::Output)?;
    }
    Ok(summary)
}

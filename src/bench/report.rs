//! Benchmark output: the stdout summary line and the CSV sample dump

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::suite::{SuiteEntry, SuiteResult};
use super::timing::TimingSummary;
use crate::config::SuiteConfig;
use crate::error::BenchError;

/// The one line the insert benchmark prints to stdout.
pub fn average_line(mean_seconds: f64) -> String {
    format!("Average full table insertion took {:.2} seconds", mean_seconds)
}

/// Human summary of one suite entry, printed after the step completes.
pub fn suite_line(
    label: &str,
    summary: &TimingSummary,
    sample_size: usize,
    pool_size: usize,
) -> String {
    match summary.mean() {
        Some(mean) => format!(
            "Average {} of {} rows from {} employee entries took {:.6} seconds for a total of {:.6} seconds",
            label,
            sample_size,
            pool_size,
            mean,
            summary.total()
        ),
        None => format!("{}: no repetitions ran", label),
    }
}

/// Prints each suite entry as it completes and keeps it for the CSV.
///
/// Entries stay available after a failed run, so the steps that did finish
/// can still be exported.
pub struct SuiteReporter<W: Write> {
    out: W,
    sample_size: usize,
    pool_size: usize,
    completed: Vec<SuiteEntry>,
}

impl<W: Write> SuiteReporter<W> {
    pub fn new(out: W, params: &SuiteConfig) -> Self {
        Self {
            out,
            sample_size: params.sample_size,
            pool_size: params.pool_size,
            completed: Vec::new(),
        }
    }

    pub fn report(&mut self, entry: &SuiteEntry) -> Result<(), BenchError> {
        let line = suite_line(
            &format!("{} {}", entry.set, entry.operation),
            &entry.summary,
            self.sample_size,
            self.pool_size,
        );
        writeln!(self.out, "{}", line).map_err(BenchError::Output)?;
        self.out.flush().map_err(BenchError::Output)?;
        self.completed.push(entry.clone());
        Ok(())
    }

    pub fn completed(&self) -> &[SuiteEntry] {
        &self.completed
    }

    /// Everything reported so far, as a result for CSV export.
    pub fn partial_result(&self, wall_seconds: f64) -> SuiteResult {
        SuiteResult {
            entries: self.completed.clone(),
            wall_seconds,
        }
    }
}

/// One row per repetition, one column per suite entry.
///
/// Entries with fewer samples leave their trailing cells empty.
pub fn write_suite_csv<W: Write>(mut writer: W, result: &SuiteResult) -> std::io::Result<()> {
    write!(writer, "repetition")?;
    for entry in &result.entries {
        write!(writer, ",{}", entry.column_name())?;
    }
    writeln!(writer)?;

    let rows = result
        .entries
        .iter()
        .map(|e| e.summary.len())
        .max()
        .unwrap_or(0);

    for i in 0..rows {
        write!(writer, "{}", i)?;
        for entry in &result.entries {
            match entry.summary.samples().get(i) {
                Some(seconds) => write!(writer, ",{:.9}", seconds)?,
                None => write!(writer, ",")?,
            }
        }
        writeln!(writer)?;
    }

    writer.flush()
}

/// Write the suite CSV to `path`, creating parent directories.
pub fn save_suite_csv(path: &Path, result: &SuiteResult) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_suite_csv(BufWriter::new(file), result)?;
    tracing::info!("Suite timings written to {}", path.display());
    Ok(())
}

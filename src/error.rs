//! Benchmark Error Types
//!
//! Every variant is fatal to the run. Nothing is retried.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    // === Database Errors ===
    #[error("Unable to connect to database: {0}")]
    Connect(sqlx::Error),

    #[error("Error preparing schema: {0}")]
    Schema(sqlx::Error),

    #[error("Error inserting data: {0}")]
    Insert(sqlx::Error),

    #[error("Error truncating table: {0}")]
    Truncate(sqlx::Error),

    #[error("Error reading data: {0}")]
    Read(sqlx::Error),

    #[error("Error updating data: {0}")]
    Update(sqlx::Error),

    #[error("Error deleting data: {0}")]
    Delete(sqlx::Error),

    // === Setup Errors ===
    #[error("Invalid benchmark parameters: {0}")]
    InvalidParameters(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // === Output Errors ===
    #[error("Error writing report: {0}")]
    Output(std::io::Error),
}

impl BenchError {
    /// Short code for structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            BenchError::Connect(_) => "CONNECT_FAILED",
            BenchError::Schema(_) => "SCHEMA_FAILED",
            BenchError::Insert(_) => "INSERT_FAILED",
            BenchError::Truncate(_) => "TRUNCATE_FAILED",
            BenchError::Read(_) => "READ_FAILED",
            BenchError::Update(_) => "UPDATE_FAILED",
            BenchError::Delete(_) => "DELETE_FAILED",
            BenchError::InvalidParameters(_) => "INVALID_PARAMETERS",
            BenchError::Config(_) => "CONFIG_ERROR",
            BenchError::Output(_) => "OUTPUT_FAILED",
        }
    }

    /// True for errors raised by the database layer.
    pub fn is_database_error(&self) -> bool {
        matches!(
            self,
            BenchError::Connect(_)
                | BenchError::Schema(_)
                | BenchError::Insert(_)
                | BenchError::Truncate(_)
                | BenchError::Read(_)
                | BenchError::Update(_)
                | BenchError::Delete(_)
        )
    }
}

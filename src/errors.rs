//! Unified application error type.
//! Every layer (db, core, cli, export) returns AppError so that the
//! binary can print one consistent message and exit with a failure code.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    /// A read issued while computing a report failed.
    /// Reports are never rendered from partial or missing data.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("{what} #{id} not found")]
    NotFound { what: &'static str, id: i64 },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    // ---------------------------
    // Scheduling errors
    // ---------------------------
    #[error("Slot conflict: {0}")]
    SlotConflict(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Wrap a storage failure that happened while reading report inputs.
    pub fn unavailable<E: std::fmt::Display>(err: E) -> Self {
        AppError::DataUnavailable(err.to_string())
    }
}

//! Unified application error type.
//! Every layer (db, core, cli, utils) returns AppError so that `main`
//! can report failures the same way.

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

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Malformed sheet row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("Invalid mark: {0}")]
    InvalidMark(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    #[error("Unknown student: {0}")]
    UnknownStudent(String),

    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    #[error("Already exists: {0}")]
    Duplicate(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

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

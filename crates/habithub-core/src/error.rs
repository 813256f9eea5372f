//! Core error types for habithub-core.
//!
//! This module defines the error hierarchy using thiserror. The period
//! evaluator itself has no failure path; everything that can fail lives
//! in the storage, accounts, import, and config layers.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habithub-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Account-related errors
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    /// Habit-import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Failed to create the data directory
    #[error("Failed to create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Account-store errors.
#[derive(Error, Debug)]
pub enum AccountError {
    /// Registration with an email that already has an account
    #[error("An account already exists for '{0}'")]
    EmailTaken(String),

    /// No account stored under the given email
    #[error("No account found for '{0}'")]
    UnknownEmail(String),

    /// Password does not match the stored credential
    #[error("Wrong password")]
    WrongPassword,

    /// Email failed the structural check
    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),

    /// Stored credential is not in `salt$digest` form
    #[error("Stored credential is malformed")]
    CorruptCredential,

    /// The OS entropy source failed while generating a salt
    #[error("Failed to generate salt: {0}")]
    SaltGeneration(String),
}

/// Habit-import errors.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Document is missing one of the required top-level arrays
    #[error("Malformed import document: {0}")]
    MalformedDocument(String),

    /// A habit entry could not be decoded
    #[error("Invalid habit entry: {0}")]
    InvalidHabit(String),

    /// Document is not valid JSON at all
    #[error("Failed to parse import JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to resolve the config directory
    #[error("Failed to resolve config directory: {0}")]
    Dir(#[from] StorageError),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

// Helper implementations for converting from other error types

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

//! # Error Types
//!
//! The only failures surfaced as Rust errors are the ones that make the
//! whole validator unusable: a schema file that exists but cannot be read,
//! parsed, or compiled. Everything that concerns a single document is
//! carried on [`crate::ValidationResult`] instead.

use thiserror::Error;

/// Errors returned while building a [`crate::SchemaStore`].
#[derive(Error, Debug)]
pub enum SchemaStoreError {
    /// The schema file exists but could not be read.
    #[error("failed to read schema {path}: {source}")]
    Read {
        /// Path of the schema file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The schema file is not valid JSON.
    #[error("failed to parse schema {path}: {reason}")]
    Parse {
        /// Path of the schema file.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The schema could not be compiled into a validator.
    #[error("failed to compile schema {path}: {reason}")]
    Compile {
        /// Path of the schema file.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },
}

//! Error type shared by every module of the crate.

use std::path::PathBuf;

/// Everything that can go wrong at the edges of the profile engine.
///
/// The calculators themselves are total functions and never produce one of
/// these; errors come from parsing caller input, loading reference data and
/// reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// A birth request arrived without one of its required fields.
    #[error("missing birth date, time, or location")]
    MissingBirthData,

    /// A birth request body was not valid JSON of the expected shape.
    #[error("malformed birth request: {0}")]
    InvalidRequest(String),

    /// The birth date could not be read as a calendar date.
    #[error("invalid birth date {input:?}: {reason}")]
    InvalidDate {
        /// Raw input as supplied by the caller.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The birth time could not be read as `HH:MM` or `HH:MM:SS`.
    #[error("invalid birth time {input:?}")]
    InvalidTime {
        /// Raw input as supplied by the caller.
        input: String,
    },

    /// A reference table does not have the size the index arithmetic needs.
    #[error("reference table `{table}` has {got} entries, expected {expected}")]
    TableCardinality {
        table: &'static str,
        expected: usize,
        got: usize,
    },

    /// A reference table lacks an entry the calculators look up by name.
    #[error("reference table `{table}` has no entry named {name:?}")]
    MissingTableEntry { table: &'static str, name: String },

    /// Reference data could not be read or deserialized.
    #[error("failed to load reference data: {0}")]
    ReferenceData(String),

    /// The engine configuration file could not be read or parsed.
    #[error("failed to load config {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

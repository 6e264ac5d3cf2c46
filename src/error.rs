//! Error types for the Ga stores
//!
//! Two styles coexist:
//! - [`ValidationError`] is returned by constructors. It signals a caller bug
//!   and is meant to be propagated with `?` straight away.
//! - [`TreeError`] and [`RemoteError`] are the expected, recoverable outcomes
//!   of structural edits and remote I/O. Every mutation and sync entry point
//!   returns them as values and never panics.

use crate::ga::GaPath;
use thiserror::Error;

/// Constructor contract violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid Ga name: must be a non-empty string")]
    InvalidName,
}

/// Result of a structural edit on the Ga tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The parent path does not resolve to a node of the current tree
    #[error("Invalid Ga structure: no node at path {0}")]
    ParentNotFound(GaPath),

    #[error("Invalid name for Ga")]
    InvalidName,

    #[error("Duplicate Ga name: '{0}'")]
    DuplicateName(String),

    #[error("Index out of range: {index} (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No Sub-Ga named \"{name}\" found inside \"{parent}\"")]
    NotFound { name: String, parent: String },

    /// Lower-level removal failure, augmented with the names involved
    #[error("Failed to remove Ga \"{name}\" from \"{parent}\": {source}")]
    RemoveFailed {
        name: String,
        parent: String,
        #[source]
        source: Box<TreeError>,
    },
}

impl From<ValidationError> for TreeError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidName => TreeError::InvalidName,
        }
    }
}

/// Result of a remote blob load or save
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Bin id or credential is absent; no request was attempted
    #[error("JSON Bin credentials missing: set {bin_var} and {key_var}")]
    MissingCredentials { bin_var: String, key_var: String },

    #[error("JSON Bin request failed: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Invalid JSON Bin response structure")]
    InvalidResponse,

    #[error("Error contacting JSON Bin: {0}")]
    Transport(String),

    #[error("Failed to encode local state: {0}")]
    Encode(String),

    #[error("Failed to decode JSON Bin record: {0}")]
    Decode(String),
}

impl RemoteError {
    /// True when the failure happened before any network I/O
    pub fn is_configuration(&self) -> bool {
        matches!(self, RemoteError::MissingCredentials { .. })
    }
}

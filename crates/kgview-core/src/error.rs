//! Error types for kgview.
//!
//! Session-fatal errors (the dataset could not be fetched or parsed) and
//! recoverable, operation-scoped errors share one enum. Use
//! [`Error::is_fatal`] to tell them apart at the operation boundary.

use std::path::{Path, PathBuf};

/// Result type alias for kgview operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, filtering, or inspecting a graph.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The input dataset could not be retrieved.
    #[error("Failed to fetch {location}: {message}")]
    Fetch {
        /// Path or URL that was requested
        location: String,
        /// What went wrong
        message: String,
    },

    /// The top-level input is not a non-empty JSON array.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A single triple was rejected during ingestion.
    #[error("Record {index} rejected: {message}")]
    Record {
        /// Zero-based position of the record in the input array
        index: usize,
        /// Why it was rejected
        message: String,
    },

    /// A category filter matched no nodes.
    #[error("No nodes found with category \"{label}\"")]
    NoMatch {
        /// Display label that was requested
        label: String,
    },

    /// A node id was not present in the graph store.
    #[error("Unknown node: {id}")]
    LookupMiss {
        /// The id that was looked up
        id: String,
    },

    /// A sampling percentage was not a finite number.
    #[error("Invalid sampling percentage: {0}")]
    InvalidPercent(f64),

    /// An operation was issued before a dataset was loaded.
    #[error("No graph loaded")]
    NotLoaded,

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error with the offending path.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns whether this error ends the session.
    ///
    /// Fatal errors occur while ingesting the dataset; the viewer shows an
    /// error in place of the graph and accepts no further operations.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Fetch { .. } => true,
            Error::MalformedInput(_) => true,
            Error::Io { .. } => true,
            Error::Json(_) => true,
            Error::Record { .. } => false,
            Error::NoMatch { .. } => false,
            Error::LookupMiss { .. } => false,
            Error::InvalidPercent(_) => false,
            Error::NotLoaded => false,
            Error::Config { .. } => false,
        }
    }

    /// Creates a fetch error for a location.
    pub fn fetch(location: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Fetch {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Creates a malformed-input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedInput(message.into())
    }

    /// Creates a per-record error.
    pub fn record(index: usize, message: impl Into<String>) -> Self {
        Error::Record {
            index,
            message: message.into(),
        }
    }

    /// Creates a no-match error for a category display label.
    pub fn no_match(label: impl Into<String>) -> Self {
        Error::NoMatch {
            label: label.into(),
        }
    }

    /// Creates a lookup-miss error for a node id.
    pub fn lookup_miss(id: impl Into<String>) -> Self {
        Error::LookupMiss { id: id.into() }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

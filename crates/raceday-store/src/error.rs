//! Store error types.

use thiserror::Error;

/// Errors that can occur in the storage layer.
///
/// Missing blobs are not errors: the gateway maps them to an empty
/// collection. Everything here is a genuine failure that propagates to the
/// caller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Object store operation failed.
    #[error("object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A blob exists but its bytes are not valid UTF-8.
    #[error("blob '{blob}' is not valid UTF-8")]
    CorruptBlob { blob: String },

    /// The storage section of the configuration is incomplete.
    #[error("storage is not configured: {0}")]
    NotConfigured(String),

    /// Writes are rejected by contract for this repository variant.
    ///
    /// Scrape-origin repositories are fetch-only; their `register`
    /// implementations fail with this before touching anything.
    #[error("register is not supported by {origin}-origin repositories")]
    WriteUnsupported { origin: &'static str },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

//! Error types for tenantmap

use std::io;
use thiserror::Error;

/// Result type for mapper operations
pub type Result<T> = std::result::Result<T, MapperError>;

/// Errors that can occur while mapping a tenant region
///
/// Open-stage and map-stage failures are distinct variants, so a caller
/// can tell "the backing object is missing" apart from "the mapping
/// itself was refused".
#[derive(Debug, Error)]
pub enum MapperError {
    /// The named backing object does not exist
    #[error("shared memory object '{name}' not found")]
    NotFound { name: String },

    /// The backing object exists but cannot be opened read-write
    #[error("permission denied opening shared memory object '{name}'")]
    PermissionDenied { name: String },

    /// Any other open failure
    #[error("failed to open shared memory object '{name}': {source}")]
    Open {
        name: String,
        #[source]
        source: io::Error,
    },

    /// The platform refused the mapping request
    #[error("failed to map {size} bytes at offset {offset}: {source}")]
    MapFailed {
        size: usize,
        offset: u64,
        #[source]
        source: io::Error,
    },
}

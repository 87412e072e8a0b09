//! Shared error definitions for ETL primitives.

use thiserror::Error;
use uuid::Error as UuidError;

/// Result alias used throughout the ETL workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while manipulating primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// The provided component identifier could not be parsed.
    #[error("invalid component id: {source}")]
    InvalidComponentId {
        /// Source parsing error from the UUID library.
        #[from]
        source: UuidError,
    },
}

//! Core shared types for configurable ETL components.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod ids;
mod status;

/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// Unique identifier for a configurable component instance.
pub use ids::ComponentId;
/// Integer status codes returned by configuration operations.
pub use status::{StatusCode, StatusKind};

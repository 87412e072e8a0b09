//! Configuration-source discovery and registration for ETL components.
//!
//! Every component accepts one or more configuration sources before it
//! initialises. A source is a file or a directory; directories are walked
//! recursively up to a depth bound and only their files are recorded. Each
//! call reports a single [`StatusCode`](etl_primitives::StatusCode): zero on
//! success, positive for warnings, negative for errors.
//!
//! The `testing` feature exposes [`MemoryFs`], an in-memory filesystem for
//! exercising components without touching the disk.

#![warn(missing_docs, clippy::pedantic)]

mod configurable;
mod fs;
mod lifecycle;
#[cfg(any(test, feature = "testing"))]
mod memory_fs;
mod policy;
mod registry;
mod settings;
mod shared;

pub use configurable::Configurable;
pub use fs::{EntryKind, OsFs, SourceFs};
pub use lifecycle::{ConfigState, Lifecycle, LifecycleError, LifecycleEvent, LifecycleResult};
#[cfg(any(test, feature = "testing"))]
pub use memory_fs::MemoryFs;
pub use policy::{Step, TraversalPolicy, aggregate};
pub use registry::ConfigurationRegistry;
pub use settings::{DEFAULT_MAX_DEPTH, RegistrySettings, SettingsError, SettingsResult};
pub use shared::SharedRegistry;

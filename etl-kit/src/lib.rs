//! Configurable component toolkit for ETL pipelines.
//!
//! Depend on this crate to pull in the workspace crates behind feature flags.
//! Components that only need status codes can disable the default features.
//! The `testing` feature adds `config::MemoryFs` for component tests.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use etl_primitives as primitives;

/// Message templates and catalog (enabled by `messages` feature).
#[cfg(feature = "messages")]
pub use etl_messages as messages;

/// Configuration-source discovery and registration (enabled by `config` feature).
#[cfg(feature = "config")]
pub use etl_config as config;

/// Items most components need.
pub mod prelude {
    pub use etl_primitives::{ComponentId, StatusCode, StatusKind};

    #[cfg(feature = "config")]
    pub use etl_config::{
        ConfigState, Configurable, ConfigurationRegistry, RegistrySettings, SharedRegistry,
        TraversalPolicy,
    };
}

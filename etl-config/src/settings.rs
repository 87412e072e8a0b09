//! Registry settings supplied by the embedding component.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use etl_messages::{MessageCatalog, MessageKind, MessageTemplate, TemplateError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::TraversalPolicy;
use crate::registry::ConfigurationRegistry;

/// Depth bound used by [`ConfigurationRegistry::register`].
pub const DEFAULT_MAX_DEPTH: i32 = 10;

/// Result alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings from {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Source [`std::io::Error`].
        source: std::io::Error,
    },
    /// The settings document is not valid JSON for this schema.
    #[error("invalid settings document: {source}")]
    Parse {
        /// Source [`serde_json::Error`].
        #[from]
        source: serde_json::Error,
    },
    /// The default depth bound is below -1.
    #[error("default_max_depth must be >= -1, got {value}")]
    InvalidMaxDepth {
        /// The rejected value.
        value: i32,
    },
    /// A message override is not usable.
    #[error("invalid message override: {source}")]
    Messages {
        /// Source template error.
        #[from]
        source: TemplateError,
    },
}

/// Knobs the embedding component hands to a registry.
///
/// ```
/// use etl_config::RegistrySettings;
///
/// let settings = RegistrySettings::from_json_str(r#"{ "suppress_warnings_on_add": true }"#).unwrap();
/// assert!(settings.suppress_warnings_on_add);
/// assert_eq!(settings.default_max_depth, etl_config::DEFAULT_MAX_DEPTH);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrySettings {
    /// Depth bound used when a caller does not pass one.
    pub default_max_depth: i32,
    /// Ignore warnings while adding sources.
    pub suppress_warnings_on_add: bool,
    /// Ignore warnings while applying configuration.
    pub suppress_warnings_on_configure: bool,
    /// Report directories skipped at the depth bound as a warning.
    pub report_depth_exceeded: bool,
    /// Replacement texts for log messages.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub messages: HashMap<MessageKind, MessageTemplate>,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            default_max_depth: DEFAULT_MAX_DEPTH,
            suppress_warnings_on_add: false,
            suppress_warnings_on_configure: false,
            report_depth_exceeded: false,
            messages: HashMap::new(),
        }
    }
}

impl RegistrySettings {
    /// Parses and validates settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for malformed input and
    /// [`SettingsError::InvalidMaxDepth`] when validation fails.
    pub fn from_json_str(input: &str) -> SettingsResult<Self> {
        let settings: Self = serde_json::from_str(input)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] when the file cannot be read, otherwise
    /// the same errors as [`RegistrySettings::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&input)
    }

    /// Sets the default depth bound.
    #[must_use]
    pub fn with_default_max_depth(mut self, depth: i32) -> Self {
        self.default_max_depth = depth;
        self
    }

    /// Sets the add-time suppression flag.
    #[must_use]
    pub fn with_suppress_warnings_on_add(mut self, suppress: bool) -> Self {
        self.suppress_warnings_on_add = suppress;
        self
    }

    /// Sets the configure-time suppression flag.
    #[must_use]
    pub fn with_suppress_warnings_on_configure(mut self, suppress: bool) -> Self {
        self.suppress_warnings_on_configure = suppress;
        self
    }

    /// Sets the depth reporting flag.
    #[must_use]
    pub fn with_report_depth_exceeded(mut self, report: bool) -> Self {
        self.report_depth_exceeded = report;
        self
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidMaxDepth`] when `default_max_depth`
    /// is below -1.
    pub fn validate(&self) -> SettingsResult<()> {
        if self.default_max_depth < -1 {
            return Err(SettingsError::InvalidMaxDepth {
                value: self.default_max_depth,
            });
        }
        Ok(())
    }

    /// Returns the traversal policy described by these settings.
    #[must_use]
    pub fn policy(&self) -> TraversalPolicy {
        TraversalPolicy::new()
            .with_suppress_warnings_on_add(self.suppress_warnings_on_add)
            .with_suppress_warnings_on_configure(self.suppress_warnings_on_configure)
            .with_report_depth_exceeded(self.report_depth_exceeded)
    }

    /// Builds the message catalog, applying any overrides.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Messages`] when an override uses a
    /// placeholder its message kind does not provide.
    pub fn catalog(&self) -> SettingsResult<MessageCatalog> {
        Ok(MessageCatalog::from_overrides(self.messages.clone())?)
    }

    /// Builds a registry for the named component from these settings.
    ///
    /// # Errors
    ///
    /// Propagates validation and message catalog errors.
    pub fn build_registry(&self, name: impl Into<String>) -> SettingsResult<ConfigurationRegistry> {
        self.validate()?;
        let catalog = Arc::new(self.catalog()?);
        Ok(ConfigurationRegistry::new(name)
            .with_policy(self.policy())
            .with_default_max_depth(self.default_max_depth)
            .with_messages(catalog))
    }
}

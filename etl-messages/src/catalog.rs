//! Immutable catalog of log message templates.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::template::{MessageTemplate, TemplateError, TemplateResult};

/// Placeholder names understood by the catalog.
pub mod placeholders {
    /// Path of the configuration source.
    pub const FILE: &str = "file";
    /// Number of registered configuration sources.
    pub const COUNT: &str = "count";
    /// Identifier of the component emitting the message.
    pub const ID: &str = "id";
    /// Name of the component emitting the message.
    pub const COMPONENT: &str = "component";
}

/// Every message the configuration subsystem emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// A component starts applying its configuration.
    ConfigInfo,
    /// A component releases its configuration.
    DeconfigInfo,
    /// A file was appended to the source list.
    SourceAdded,
    /// A path does not exist.
    SourceNotFound,
    /// A path is a directory whose files are being added.
    DirectoryFound,
    /// A file was already registered.
    SourceAlreadyAdded,
    /// The depth bound was reached and a directory is skipped.
    MaxDepthReached,
    /// A directory exists but its entries could not be listed.
    DirectoryUnreadable,
}

impl MessageKind {
    /// All message kinds, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::ConfigInfo,
        Self::DeconfigInfo,
        Self::SourceAdded,
        Self::SourceNotFound,
        Self::DirectoryFound,
        Self::SourceAlreadyAdded,
        Self::MaxDepthReached,
        Self::DirectoryUnreadable,
    ];

    /// Placeholders a template for this kind may reference.
    #[must_use]
    pub const fn allowed_placeholders(self) -> &'static [&'static str] {
        use placeholders::{COMPONENT, COUNT, FILE, ID};
        match self {
            Self::ConfigInfo | Self::DeconfigInfo => &[ID, COMPONENT],
            Self::SourceAdded => &[FILE, COUNT, ID, COMPONENT],
            Self::SourceNotFound
            | Self::DirectoryFound
            | Self::SourceAlreadyAdded
            | Self::MaxDepthReached
            | Self::DirectoryUnreadable => &[FILE],
        }
    }

    fn default_text(self) -> &'static str {
        match self {
            Self::ConfigInfo => "Configuration. (id: {{id}}, component: {{component}})",
            Self::DeconfigInfo => "Deconfiguration. (id: {{id}}, component: {{component}})",
            Self::SourceAdded => {
                "Configuration file {{file}} added to the configuration file list. \
                 Current amount of configuration files: {{count}}. \
                 (id: {{id}}, component: {{component}})"
            }
            Self::SourceNotFound => "Configuration file {{file}} could not be found.",
            Self::DirectoryFound => {
                "Configuration file {{file}} is a directory. Adding all containing files."
            }
            Self::SourceAlreadyAdded => "Configuration file {{file}} is already added.",
            Self::MaxDepthReached => "Maximum depth reached, no file in {{file}} will be added.",
            Self::DirectoryUnreadable => "Configuration directory {{file}} could not be read.",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ConfigInfo => "config_info",
            Self::DeconfigInfo => "deconfig_info",
            Self::SourceAdded => "source_added",
            Self::SourceNotFound => "source_not_found",
            Self::DirectoryFound => "directory_found",
            Self::SourceAlreadyAdded => "source_already_added",
            Self::MaxDepthReached => "max_depth_reached",
            Self::DirectoryUnreadable => "directory_unreadable",
        };
        f.write_str(name)
    }
}

/// Read-only lookup from [`MessageKind`] to its template.
///
/// Components hold the catalog behind an `Arc` and never mutate it; custom
/// texts are supplied through [`MessageCatalogBuilder`] before construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    templates: HashMap<MessageKind, MessageTemplate>,
}

impl MessageCatalog {
    /// Returns a builder seeded with the default texts.
    #[must_use]
    pub fn builder() -> MessageCatalogBuilder {
        MessageCatalogBuilder::new()
    }

    /// Builds a catalog from a map of overrides, e.g. deserialized from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnknownPlaceholder`] when an override uses a
    /// placeholder its kind does not provide.
    pub fn from_overrides(overrides: HashMap<MessageKind, MessageTemplate>) -> TemplateResult<Self> {
        overrides
            .into_iter()
            .fold(Self::builder(), |builder, (kind, template)| {
                builder.with_template(kind, template)
            })
            .build()
    }

    /// Returns the template registered for `kind`.
    #[must_use]
    pub fn template(&self, kind: MessageKind) -> &MessageTemplate {
        // Construction guarantees every kind is present.
        &self.templates[&kind]
    }

    /// Renders the message for `kind` with the supplied values.
    #[must_use]
    pub fn render(&self, kind: MessageKind, values: &[(&str, &str)]) -> String {
        self.template(kind).render(values)
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            templates: default_templates(),
        }
    }
}

fn default_templates() -> HashMap<MessageKind, MessageTemplate> {
    MessageKind::ALL
        .into_iter()
        .map(|kind| (kind, MessageTemplate::new(kind.default_text())))
        .collect()
}

/// Builder for [`MessageCatalog`].
#[derive(Debug, Clone)]
pub struct MessageCatalogBuilder {
    templates: HashMap<MessageKind, MessageTemplate>,
}

impl MessageCatalogBuilder {
    /// Creates a builder seeded with the default texts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            templates: default_templates(),
        }
    }

    /// Replaces the template for `kind`.
    #[must_use]
    pub fn with_template(mut self, kind: MessageKind, template: impl Into<MessageTemplate>) -> Self {
        self.templates.insert(kind, template.into());
        self
    }

    /// Validates placeholders and freezes the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnknownPlaceholder`] when a template uses a
    /// placeholder its kind does not provide.
    pub fn build(self) -> TemplateResult<MessageCatalog> {
        for kind in MessageKind::ALL {
            let allowed = kind.allowed_placeholders();
            if let Some(name) = self.templates[&kind]
                .placeholders()
                .into_iter()
                .find(|name| !allowed.contains(&name.as_str()))
            {
                return Err(TemplateError::UnknownPlaceholder {
                    name,
                    kind: kind.to_string(),
                });
            }
        }

        Ok(MessageCatalog {
            templates: self.templates,
        })
    }
}

impl Default for MessageCatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Message formatting for configurable ETL components.
//!
//! Log texts live in an immutable [`MessageCatalog`] that components receive
//! at construction time. Each entry is a [`MessageTemplate`] using
//! `{{placeholder}}` syntax.

#![warn(missing_docs, clippy::pedantic)]

pub mod catalog;
pub mod template;

pub use catalog::{MessageCatalog, MessageCatalogBuilder, MessageKind, placeholders};
pub use template::{MessageTemplate, TemplateError, TemplateResult};

/// Wraps the given string in double quotes.
#[must_use]
pub fn quote(s: &str) -> String {
    format!("\"{s}\"")
}

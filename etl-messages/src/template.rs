//! Message templates with `{{placeholder}}` substitution.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while building templates.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    /// The template references a placeholder its message kind does not provide.
    #[error("placeholder `{name}` is not available for `{kind}` messages")]
    UnknownPlaceholder {
        /// Name of the offending placeholder.
        name: String,
        /// Message kind the template was registered for.
        kind: String,
    },
}

/// A log message template.
///
/// ```
/// use etl_messages::MessageTemplate;
///
/// let template = MessageTemplate::new("Configuration file {{file}} could not be found.");
/// let rendered = template.render(&[("file", "app.json")]);
/// assert_eq!(rendered, "Configuration file app.json could not be found.");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTemplate {
    template: String,
}

impl MessageTemplate {
    /// Creates a template from the supplied text.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Returns the raw template string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Returns the placeholder names referenced by the template, in order of
    /// appearance. Repeated placeholders are listed once.
    #[must_use]
    pub fn placeholders(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let referenced = segments(&self.template).into_iter().filter_map(|segment| match segment {
            Segment::Placeholder { name, .. } => Some(name),
            Segment::Text(_) => None,
        });
        for name in referenced {
            if !names.iter().any(|known| known == name) {
                names.push(name.to_owned());
            }
        }
        names
    }

    /// Renders the template, leaving placeholders without a value untouched.
    ///
    /// Placeholder names are matched after trimming surrounding whitespace,
    /// so `{{ file }}` and `{{file}}` are the same placeholder. Values are
    /// copied verbatim and never scanned for placeholders themselves.
    #[must_use]
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut rendered = String::with_capacity(self.template.len());
        for segment in segments(&self.template) {
            match segment {
                Segment::Text(text) => rendered.push_str(text),
                Segment::Placeholder { raw, name } => rendered.push_str(
                    values
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map_or(raw, |(_, value)| *value),
                ),
            }
        }
        rendered
    }
}

impl fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

impl From<&str> for MessageTemplate {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A piece of template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    /// Literal text, copied as is.
    Text(&'a str),
    /// A `{{name}}` reference; `raw` includes the braces.
    Placeholder { raw: &'a str, name: &'a str },
}

/// Splits a template into literal text and placeholders in one left-to-right
/// pass. Empty or unterminated `{{` sequences stay literal.
fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            break;
        };
        let name = after_open[..close].trim();
        let end = open + 2 + close + 2;
        if name.is_empty() {
            segments.push(Segment::Text(&rest[..end]));
        } else {
            if open > 0 {
                segments.push(Segment::Text(&rest[..open]));
            }
            segments.push(Segment::Placeholder {
                raw: &rest[open..end],
                name,
            });
        }
        rest = &rest[end..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    segments
}

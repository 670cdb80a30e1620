//! Placeholder substitution for the SVG card

use std::collections::BTreeMap;
use std::path::Path;

use crate::render::RenderError;

/// The card shipped with the crate
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/github-stats.svg");

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Placeholder name -> rendered value
pub type TemplateValues = BTreeMap<&'static str, String>;

/// An SVG document with `{{ name }}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgTemplate {
    source: String,
}

impl SvgTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The built-in card layout
    pub fn builtin() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }

    /// Read a template from disk
    pub async fn load(path: &Path) -> Result<Self, RenderError> {
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| RenderError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!("Loaded template from {}", path.display());
        Ok(Self::new(source))
    }

    /// Substitute every placeholder with its XML-escaped value
    ///
    /// Fails on the first placeholder that has no value, and on a `{{`
    /// without a matching `}}`.
    pub fn render(&self, values: &TemplateValues) -> Result<String, RenderError> {
        let mut output = String::with_capacity(self.source.len());
        let mut rest = self.source.as_str();

        while let Some(open) = rest.find(OPEN) {
            output.push_str(&rest[..open]);

            let after_open = &rest[open + OPEN.len()..];
            let close = after_open.find(CLOSE).ok_or(RenderError::Unterminated {
                offset: self.source.len() - rest.len() + open,
            })?;

            let name = after_open[..close].trim();
            let value = values
                .get(name)
                .ok_or_else(|| RenderError::UnknownPlaceholder(name.to_string()))?;
            output.push_str(&escape_xml(value));

            rest = &after_open[close + CLOSE.len()..];
        }

        output.push_str(rest);
        Ok(output)
    }

    /// Names of all placeholders in the template, in order of appearance
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.source.as_str();

        while let Some(open) = rest.find(OPEN) {
            let after_open = &rest[open + OPEN.len()..];
            let Some(close) = after_open.find(CLOSE) else {
                break;
            };
            names.push(after_open[..close].trim());
            rest = &after_open[close + CLOSE.len()..];
        }

        names
    }
}

impl Default for SvgTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Escape the five XML special characters
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

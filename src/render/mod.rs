//! SVG rendering
//!
//! The stats card is a fixed SVG layout with `{{ name }}` placeholders. This
//! module loads a template (built-in or from disk) and fills it in.

pub mod template;

pub use template::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while rendering the card
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to read template {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown placeholder '{{{{ {0} }}}}' in template")]
    UnknownPlaceholder(String),

    #[error("Unterminated placeholder starting at byte {offset}")]
    Unterminated { offset: usize },
}

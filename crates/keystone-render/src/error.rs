//! Error types for page rendering.
//!
//! This module provides [`RenderError`], the primary error type for all rendering
//! operations. It abstracts over the underlying template engines' errors so that
//! callers never branch on which engine is active: both engines report failures
//! through the same taxonomy (unsupported engine, not found, parse, execution).

use std::fmt;
use std::path::PathBuf;

/// Error type for page rendering operations.
///
/// Every failure is recoverable per-call: the enclosing web layer is expected to
/// translate it into a server-error response. Rendering never terminates the
/// process and never retries (a template error is deterministic).
///
/// Note on partial output: [`TemplateExecution`](RenderError::TemplateExecution)
/// may be returned after some bytes were already flushed to the writer. Template
/// resolution and compilation failures always occur before any writer output.
#[derive(Debug)]
pub enum RenderError {
    /// The configured engine name matches no known adapter.
    UnsupportedEngine(String),

    /// The caller passed an empty template name.
    EmptyTemplateName,

    /// The resolved page file does not exist.
    TemplateNotFound {
        /// The logical page name that was requested.
        name: String,
        /// The conventional path the adapter looked for.
        path: PathBuf,
    },

    /// Syntax or compilation failure in a template source.
    TemplateParse {
        /// Path of the offending source file (or glob for whole-tree loads).
        path: PathBuf,
        /// Underlying engine diagnostic.
        detail: String,
    },

    /// Runtime failure while substituting data into a compiled template.
    TemplateExecution {
        /// The logical page name being rendered.
        name: String,
        /// Underlying engine diagnostic.
        detail: String,
    },

    /// Page or framework data could not be serialized for the engine.
    DataSerialization(String),

    /// I/O error reading a template source.
    Io(std::io::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnsupportedEngine(name) => {
                write!(f, "unsupported render engine: \"{}\"", name)
            }
            RenderError::EmptyTemplateName => {
                write!(f, "template name must not be empty")
            }
            RenderError::TemplateNotFound { name, path } => {
                write!(f, "template not found: \"{}\" ({})", name, path.display())
            }
            RenderError::TemplateParse { path, detail } => {
                write!(f, "template parse error in {}: {}", path.display(), detail)
            }
            RenderError::TemplateExecution { name, detail } => {
                write!(f, "template execution error in \"{}\": {}", name, detail)
            }
            RenderError::DataSerialization(msg) => {
                write!(f, "data serialization error: {}", msg)
            }
            RenderError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Io(err)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::DataSerialization(err.to_string())
    }
}

/// Formats an error with its full source chain, colon-separated.
///
/// Tera in particular nests the useful diagnostic one or two levels deep;
/// `to_string()` alone would report only "Failed to render ...".
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

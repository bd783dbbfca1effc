//! Template location by naming convention.
//!
//! Both engines share one filesystem convention so a project can switch engines
//! without reorganizing its templates: pages live under `<root>/views/` as
//! `<name>.page.<ext>` with an optional `<name>.layout.<ext>` wrapper, where the
//! extension identifies the engine (`.jinja` for the native engine, `.tera` for
//! the expression engine).
//!
//! Everything in this module is pure path computation. No file is opened and no
//! existence check is performed here; the engine adapters do their own I/O. This
//! keeps the convention testable without a filesystem and means a future engine
//! only needs a new [`EngineKind`] variant, not duplicated path logic.

use std::path::{Path, PathBuf};

/// Directory under the project root that holds all templates.
pub const VIEWS_DIR: &str = "views";

/// The template engines the renderer can dispatch to.
///
/// Selection is a pure function of configuration: the config string is parsed
/// once when the renderer is built, never per-request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// Native engine backed by MiniJinja. Layout wraps the page by including
    /// it at a fixed placeholder name.
    Jinja,
    /// Expression engine backed by Tera. Pages use Tera's own `extends`
    /// inheritance against any template in the views tree.
    Tera,
}

impl EngineKind {
    /// Parses the configuration string for engine selection.
    ///
    /// Returns `None` for unrecognized names; the renderer records those and
    /// reports [`RenderError::UnsupportedEngine`](crate::RenderError::UnsupportedEngine)
    /// per render call.
    pub fn from_config(name: &str) -> Option<EngineKind> {
        match name {
            "jinja" => Some(EngineKind::Jinja),
            "tera" => Some(EngineKind::Tera),
            _ => None,
        }
    }

    /// File extension for this engine's templates, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            EngineKind::Jinja => "jinja",
            EngineKind::Tera => "tera",
        }
    }
}

/// Candidate source files for one logical page.
///
/// The layout path is a candidate only; whether a layout participates is
/// decided by the adapter's existence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSources {
    /// `<root>/views/<name>.page.<ext>` — must exist for the render to proceed.
    pub page: PathBuf,
    /// `<root>/views/<name>.layout.<ext>` — wraps the page when present.
    pub layout: PathBuf,
}

/// Resolves a logical page name to its conventional file paths.
///
/// Deterministic and I/O-free: the same `(root, name, kind)` triple always
/// yields the same paths.
pub fn locate(root: &Path, name: &str, kind: EngineKind) -> TemplateSources {
    let views = root.join(VIEWS_DIR);
    TemplateSources {
        page: views.join(format!("{}.page.{}", name, kind.extension())),
        layout: views.join(format!("{}.layout.{}", name, kind.extension())),
    }
}

/// Glob pattern matching every expression-engine template under the views tree.
///
/// Tera compiles the whole tree at once so that `extends`/`include` can
/// reference any template; names are registered relative to the views
/// directory (see [`expression_template_key`]).
pub fn views_glob(root: &Path) -> String {
    root.join(VIEWS_DIR)
        .join("**")
        .join("*.tera")
        .to_string_lossy()
        .into_owned()
}

/// The key a page is registered under inside the expression engine's set.
pub fn expression_template_key(name: &str) -> String {
    format!("{}.page.{}", name, EngineKind::Tera.extension())
}

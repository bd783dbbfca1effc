//! Engine adapters behind one narrow interface.
//!
//! Each adapter wraps one templating technology. The renderer dispatches a
//! render call through [`PageEngine`] so callers (and the error taxonomy) are
//! identical no matter which engine the configuration selected:
//!
//! - [`JinjaEngine`] — the native engine. Per-page compiled sets, optional
//!   layout wrapping the page at a fixed placeholder.
//! - [`TeraEngine`] — the expression engine. One compiled set for the whole
//!   views tree, engine-native `extends` inheritance.
//!
//! Both adapters own their compiled-set cache exclusively and publish entries
//! atomically: a compile happens into a local value and is only inserted into
//! the shared cache once complete, so concurrent readers never observe a
//! half-built entry. Last-writer-wins on simultaneous first compiles.

use std::io::Write;

use crate::error::RenderError;

mod expr;
mod jinja;

pub use expr::TeraEngine;
pub use jinja::JinjaEngine;

/// The uniform adapter contract: execute page `name` with `data` into `w`.
///
/// Implementations must locate and compile their own sources (resolution and
/// compile failures occur before any writer output) and may stream during
/// execution (mid-render failures can leave partial output behind).
pub trait PageEngine: Send + Sync {
    /// Renders the named page into the writer.
    fn render_page(
        &self,
        w: &mut dyn Write,
        name: &str,
        data: &serde_json::Value,
    ) -> Result<(), RenderError>;
}

/// Acquires a lock, recovering the guard if a previous holder panicked.
///
/// Cache entries are only ever inserted whole, so a poisoned lock still
/// contains consistent data.
pub(crate) fn relock<G>(result: Result<G, std::sync::PoisonError<G>>) -> G {
    match result {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

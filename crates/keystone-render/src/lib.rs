//! # Keystone Render - Dual-Engine Page Rendering
//!
//! `keystone-render` is the rendering core of the keystone web bootstrap. It
//! presents one contract — "render page X with data Y to writer W" — over two
//! structurally different templating systems, selected at runtime from
//! configuration rather than at compile time:
//!
//! - the **native engine** ([MiniJinja](https://docs.rs/minijinja)):
//!   per-page compiled sets with an optional layout wrapping the page at a
//!   fixed `content` placeholder
//! - the **expression engine** ([Tera](https://docs.rs/tera)): one compiled
//!   set for the whole views tree with engine-native `extends` inheritance
//!
//! Both engines resolve templates against the same filesystem convention
//! (`<root>/views/<name>.page.<ext>`, optional `<name>.layout.<ext>`), so a
//! project can switch engines without moving a file, and both report failures
//! through the same [`RenderError`] taxonomy, so handlers never branch on
//! which engine is active.
//!
//! ## Core Concepts
//!
//! - [`Renderer`]: the façade handlers call; holds configuration and the
//!   resolved engine
//! - [`RendererConfig`]: engine selection, project root, app metadata
//! - [`TemplateData`] / [`RequestContext`]: framework-supplied fields merged
//!   into every template's data context, never overridable by page data
//! - [`EngineKind`] / [`locate`](locator::locate): the shared naming
//!   convention, pure path computation
//!
//! ## Quick Start
//!
//! ```rust
//! use keystone_render::{Renderer, RendererConfig};
//! use std::fs;
//!
//! let root = tempfile::tempdir().unwrap();
//! fs::create_dir_all(root.path().join("views")).unwrap();
//! fs::write(
//!     root.path().join("views/home.page.jinja"),
//!     "Welcome to {{ app_name }}",
//! )
//! .unwrap();
//!
//! let renderer = Renderer::new(RendererConfig {
//!     engine: "jinja".into(),
//!     root_path: root.path().into(),
//!     app_name: "demo".into(),
//!     ..Default::default()
//! });
//!
//! let mut body = Vec::new();
//! renderer.page(&mut body, None, "home", None, None).unwrap();
//! assert_eq!(String::from_utf8(body).unwrap(), "Welcome to demo");
//! ```
//!
//! ## Error Handling
//!
//! Rendering never logs, never retries, and never terminates the process.
//! Every failure comes back as one [`RenderError`]; the enclosing web layer
//! maps it to an HTTP response. Resolution and compile failures are
//! guaranteed to happen before the first byte reaches the writer; execution
//! failures may follow partial output, which callers must tolerate.

pub mod data;
mod engine;
mod error;
pub mod locator;
mod renderer;

pub use data::{RequestContext, TemplateData, RESERVED_KEYS};
pub use engine::{JinjaEngine, PageEngine, TeraEngine};
pub use error::RenderError;
pub use locator::{EngineKind, TemplateSources, VIEWS_DIR};
pub use renderer::{Renderer, RendererConfig};

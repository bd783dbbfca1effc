//! # Keystone - Web Application Bootstrap
//!
//! `keystone` wires together the pieces a server-side web application needs
//! at startup — project directory scaffolding, configuration, and the
//! dual-engine page renderer — and hands the application one composed [`App`]
//! object.
//!
//! The rendering core lives in [`keystone-render`](keystone_render) and is
//! re-exported here; HTTP routing, middleware, and session storage are the
//! application's own collaborators. A typical handler borrows
//! [`App::renderer`] and calls [`Renderer::page`] as a leaf:
//!
//! ```rust
//! use keystone::{App, RendererConfig};
//! use std::fs;
//!
//! let root = tempfile::tempdir().unwrap();
//! let app = App::new(RendererConfig {
//!     engine: "jinja".into(),
//!     root_path: root.path().into(),
//!     app_name: "demo".into(),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! // Bootstrap scaffolded <root>/views/; drop a page in and render it.
//! fs::write(
//!     root.path().join("views/home.page.jinja"),
//!     "{{ app_name }} says hi",
//! )
//! .unwrap();
//!
//! let mut body = Vec::new();
//! app.renderer().page(&mut body, None, "home", None, None).unwrap();
//! assert_eq!(String::from_utf8(body).unwrap(), "demo says hi");
//! ```
//!
//! Switching template engines is a configuration change (`engine = "tera"`),
//! not a code change: both engines resolve pages under the same `views/`
//! directory and report failures through the same error taxonomy.

pub mod setup;

use std::path::Path;

use tracing::debug;

pub use keystone_render::{
    EngineKind, JinjaEngine, PageEngine, RenderError, Renderer, RendererConfig, RequestContext,
    TemplateData, TeraEngine, RESERVED_KEYS, VIEWS_DIR,
};
pub use setup::{init_project_dirs, SetupError, PROJECT_DIRS};

/// The composed bootstrap object handed to the application.
///
/// Created once at startup and held for the process lifetime. The renderer is
/// shared by reference with request handlers; [`App::renderer_mut`] exists
/// for between-calls reconfiguration (e.g. swapping the template engine from
/// an admin task), not for concurrent mutation.
pub struct App {
    app_name: String,
    debug: bool,
    version: &'static str,
    renderer: Renderer,
}

impl App {
    /// Bootstraps a project at `config.root_path`.
    ///
    /// Scaffolds the conventional directory tree (idempotently) and builds
    /// the renderer from the same configuration. An unrecognized engine name
    /// does not fail bootstrap; it surfaces per render call so the process
    /// can still come up and serve an error page.
    pub fn new(config: RendererConfig) -> Result<Self, SetupError> {
        setup::init_project_dirs(&config.root_path)?;
        debug!(
            root = %config.root_path.display(),
            engine = %config.engine,
            "keystone bootstrap complete"
        );

        Ok(Self {
            app_name: config.app_name.clone(),
            debug: config.debug,
            version: env!("CARGO_PKG_VERSION"),
            renderer: Renderer::new(config),
        })
    }

    /// Application display name.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Whether the application runs in development mode.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Framework version string.
    pub fn version(&self) -> &str {
        self.version
    }

    /// Project root this application was bootstrapped at.
    pub fn root_path(&self) -> &Path {
        &self.renderer.config().root_path
    }

    /// The page renderer, shared with request handlers.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Mutable renderer access for between-calls reconfiguration.
    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }
}

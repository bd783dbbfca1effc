//! The rendering façade dispatched to by HTTP handlers.
//!
//! [`Renderer`] holds the configuration an application bootstraps with and
//! dispatches each [`page`](Renderer::page) call to the engine adapter the
//! configuration selected. The engine string is parsed exactly once, when the
//! renderer is (re)built; the render path dispatches through the
//! [`PageEngine`] trait with no string comparison.
//!
//! The renderer itself never logs and never retries: every failure is handed
//! back to the caller as a single [`RenderError`], and the enclosing web layer
//! decides the HTTP status and what the user sees.

use std::io::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::{build_context, RequestContext, TemplateData};
use crate::engine::{JinjaEngine, PageEngine, TeraEngine};
use crate::error::RenderError;
use crate::locator::EngineKind;

/// Renderer configuration, immutable for the duration of one render call.
///
/// `debug` doubles as the always-reload switch: development renders recompile
/// templates from disk on every call, production renders compile lazily once
/// and reuse the cached set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Engine selection string: `"jinja"` or `"tera"`. Anything else makes
    /// every render call fail with an unsupported-engine error.
    pub engine: String,
    /// Project root; templates are resolved under `<root_path>/views/`.
    pub root_path: PathBuf,
    /// Display metadata passed through to templates, not used for binding.
    #[serde(default)]
    pub port: String,
    /// Application display name exposed to templates.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Development mode: always-reload templates, `environment` reads
    /// `"development"`.
    #[serde(default)]
    pub debug: bool,
}

fn default_app_name() -> String {
    "keystone".to_string()
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            engine: "jinja".to_string(),
            root_path: PathBuf::from("."),
            port: String::new(),
            app_name: default_app_name(),
            debug: false,
        }
    }
}

/// The engine resolved from configuration.
///
/// Exactly one variant is active per renderer. An unrecognized engine name is
/// carried as `Unsupported` rather than failing construction, so the error
/// surfaces per render call and stays recoverable at the process level.
enum EngineChoice {
    Jinja(JinjaEngine),
    Tera(TeraEngine),
    Unsupported(String),
}

impl EngineChoice {
    fn resolve(config: &RendererConfig) -> Self {
        match EngineKind::from_config(&config.engine) {
            Some(EngineKind::Jinja) => {
                EngineChoice::Jinja(JinjaEngine::new(&config.root_path, config.debug))
            }
            Some(EngineKind::Tera) => {
                EngineChoice::Tera(TeraEngine::new(&config.root_path, config.debug))
            }
            None => EngineChoice::Unsupported(config.engine.clone()),
        }
    }
}

/// Façade over both template engines.
///
/// One renderer is created at application bootstrap and shared by every
/// request handler; rendering takes `&self` and is safe to call from
/// concurrent request tasks. Reconfiguration (engine hot-swap) takes
/// `&mut self` and is meant for between-calls use, not mid-flight.
///
/// # Example
///
/// ```rust,ignore
/// let renderer = Renderer::new(RendererConfig {
///     engine: "jinja".into(),
///     root_path: "./".into(),
///     ..Default::default()
/// });
///
/// let mut body = Vec::new();
/// renderer.page(&mut body, None, "home", None, None)?;
/// ```
pub struct Renderer {
    config: RendererConfig,
    choice: EngineChoice,
}

impl Renderer {
    /// Builds a renderer, resolving the engine selection once.
    pub fn new(config: RendererConfig) -> Self {
        let choice = EngineChoice::resolve(&config);
        Self { config, choice }
    }

    /// The configuration this renderer was built with.
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Replaces the configuration and re-resolves the engine.
    ///
    /// Engine caches do not carry over; the next render compiles fresh.
    pub fn reconfigure(&mut self, config: RendererConfig) {
        self.choice = EngineChoice::resolve(&config);
        self.config = config;
    }

    /// Renders the named page with the merged data context into the writer.
    ///
    /// `request` carries ambient session state; `None` means no ambient
    /// context and every derived template field falls back to its default.
    ///
    /// No bytes reach the writer unless template resolution and compilation
    /// succeed. A failure during execution can leave partial output behind
    /// (streaming engines cannot unsend bytes) but is still reported.
    pub fn page(
        &self,
        writer: &mut dyn Write,
        request: Option<&RequestContext>,
        name: &str,
        page_data: Option<Value>,
        template_data: Option<TemplateData>,
    ) -> Result<(), RenderError> {
        if name.is_empty() {
            return Err(RenderError::EmptyTemplateName);
        }

        let engine: &dyn PageEngine = match &self.choice {
            EngineChoice::Jinja(engine) => engine,
            EngineChoice::Tera(engine) => engine,
            EngineChoice::Unsupported(engine_name) => {
                return Err(RenderError::UnsupportedEngine(engine_name.clone()));
            }
        };

        let data = build_context(&self.config, request, page_data, template_data)?;
        engine.render_page(writer, name, &data)
    }
}

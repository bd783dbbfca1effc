//! Expression engine adapter backed by Tera.
//!
//! Unlike the native engine, Tera compiles the whole `views/` tree into one
//! set so that any page can use engine-native inheritance against any other
//! template in the tree:
//!
//! ```tera
//! {% extends "base.layout.tera" %}
//! {% block content %}Hello {{ app_name }}{% endblock %}
//! ```
//!
//! Template names inside the set are relative to the views directory
//! (`home.page.tera`, `base.layout.tera`), matching the same filesystem
//! convention the native engine resolves against.
//!
//! In always-reload mode the set is rebuilt on every call, deliberately
//! keeping no cache across calls so template authors iterating on expression
//! templates never need a process restart. In production the set is built
//! once and the finished `Arc` is published for all subsequent renders.

use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tera::{Context, Tera};

use super::{relock, PageEngine};
use crate::error::{error_chain, RenderError};
use crate::locator::{expression_template_key, locate, views_glob, EngineKind};

/// Tera-backed page engine.
pub struct TeraEngine {
    root: PathBuf,
    always_reload: bool,
    cache: RwLock<Option<Arc<Tera>>>,
}

impl TeraEngine {
    /// Creates an adapter rooted at the project directory.
    pub fn new(root: impl Into<PathBuf>, always_reload: bool) -> Self {
        Self {
            root: root.into(),
            always_reload,
            cache: RwLock::new(None),
        }
    }

    /// Compiles every `.tera` file under the views tree into one set.
    fn build_set(&self) -> Result<Tera, RenderError> {
        let pattern = views_glob(&self.root);
        Tera::new(&pattern).map_err(|e| RenderError::TemplateParse {
            path: PathBuf::from(&pattern),
            detail: error_chain(&e),
        })
    }

    /// Returns the published set, building and publishing it on first use.
    fn cached_set(&self) -> Result<Arc<Tera>, RenderError> {
        if let Some(set) = relock(self.cache.read()).as_ref() {
            return Ok(set.clone());
        }

        let set = Arc::new(self.build_set()?);
        *relock(self.cache.write()) = Some(set.clone());
        Ok(set)
    }
}

impl PageEngine for TeraEngine {
    fn render_page(
        &self,
        w: &mut dyn Write,
        name: &str,
        data: &serde_json::Value,
    ) -> Result<(), RenderError> {
        let set = if self.always_reload {
            Arc::new(self.build_set()?)
        } else {
            self.cached_set()?
        };

        let key = expression_template_key(name);
        if !set.get_template_names().any(|n| n == key) {
            return Err(RenderError::TemplateNotFound {
                name: name.to_string(),
                path: locate(&self.root, name, EngineKind::Tera).page,
            });
        }

        let context = Context::from_serialize(data)
            .map_err(|e| RenderError::DataSerialization(error_chain(&e)))?;

        set.render_to(&key, &context, &mut *w)
            .map_err(|e| RenderError::TemplateExecution {
                name: name.to_string(),
                detail: error_chain(&e),
            })
    }
}

//! Native engine adapter backed by MiniJinja.
//!
//! Composition is layout-includes-page: when `<name>.layout.jinja` exists next
//! to `<name>.page.jinja`, the layout becomes the entry point and pulls the
//! page in at a fixed placeholder:
//!
//! ```jinja
//! <html><body>{% include "content" %}</body></html>
//! ```
//!
//! Each page compiles into its own small [`Environment`] holding the page
//! (registered as `content`) and, when present, its layout (registered as
//! `layout`). Compiled sets are cached by page name; in always-reload mode the
//! set is rebuilt on every call so template authors see edits immediately.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use minijinja::Environment;

use super::{relock, PageEngine};
use crate::error::{error_chain, RenderError};
use crate::locator::{locate, EngineKind};

/// Name the page source is registered under inside its compiled set.
/// Layouts reference the page as `{% include "content" %}`.
const PAGE_TEMPLATE: &str = "content";

/// Name the layout source is registered under when present.
const LAYOUT_TEMPLATE: &str = "layout";

/// One page's compiled representation: its environment and the entry template.
struct CompiledPage {
    env: Environment<'static>,
    entry: &'static str,
}

/// MiniJinja-backed page engine.
pub struct JinjaEngine {
    root: PathBuf,
    always_reload: bool,
    cache: RwLock<HashMap<String, Arc<CompiledPage>>>,
}

impl JinjaEngine {
    /// Creates an adapter rooted at the project directory.
    ///
    /// With `always_reload` set, every render recompiles from disk and the
    /// cache is bypassed entirely.
    pub fn new(root: impl Into<PathBuf>, always_reload: bool) -> Self {
        Self {
            root: root.into(),
            always_reload,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Compiles the page (and its layout, when present) into a fresh set.
    fn compile(&self, name: &str) -> Result<Arc<CompiledPage>, RenderError> {
        let sources = locate(&self.root, name, EngineKind::Jinja);

        let page_src = read_source(&sources.page, name)?;
        let mut env = Environment::new();
        env.add_template_owned(PAGE_TEMPLATE.to_string(), page_src)
            .map_err(|e| RenderError::TemplateParse {
                path: sources.page.clone(),
                detail: error_chain(&e),
            })?;

        let entry = if sources.layout.exists() {
            let layout_src = fs::read_to_string(&sources.layout)?;
            env.add_template_owned(LAYOUT_TEMPLATE.to_string(), layout_src)
                .map_err(|e| RenderError::TemplateParse {
                    path: sources.layout.clone(),
                    detail: error_chain(&e),
                })?;
            LAYOUT_TEMPLATE
        } else {
            PAGE_TEMPLATE
        };

        Ok(Arc::new(CompiledPage { env, entry }))
    }

    /// Returns the cached set for `name`, compiling and publishing on miss.
    fn cached(&self, name: &str) -> Result<Arc<CompiledPage>, RenderError> {
        if let Some(hit) = relock(self.cache.read()).get(name) {
            return Ok(hit.clone());
        }

        // Compile outside the lock, publish the finished set. Two requests
        // racing on the same first render both compile; last writer wins.
        let compiled = self.compile(name)?;
        relock(self.cache.write()).insert(name.to_string(), compiled.clone());
        Ok(compiled)
    }
}

impl PageEngine for JinjaEngine {
    fn render_page(
        &self,
        w: &mut dyn Write,
        name: &str,
        data: &serde_json::Value,
    ) -> Result<(), RenderError> {
        let compiled = if self.always_reload {
            self.compile(name)?
        } else {
            self.cached(name)?
        };

        let template = compiled
            .env
            .get_template(compiled.entry)
            .map_err(|e| RenderError::TemplateExecution {
                name: name.to_string(),
                detail: error_chain(&e),
            })?;

        template
            .render_to_write(data, &mut *w)
            .map(|_| ())
            .map_err(|e| RenderError::TemplateExecution {
                name: name.to_string(),
                detail: error_chain(&e),
            })
    }
}

/// Reads the page source, mapping a missing file to `TemplateNotFound`.
fn read_source(path: &Path, name: &str) -> Result<String, RenderError> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RenderError::TemplateNotFound {
                name: name.to_string(),
                path: path.to_path_buf(),
            }
        } else {
            RenderError::Io(e)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_view(root: &Path, file_name: &str, content: &str) {
        let views = root.join("views");
        fs::create_dir_all(&views).unwrap();
        fs::write(views.join(file_name), content).unwrap();
    }

    fn render_to_string(
        engine: &JinjaEngine,
        name: &str,
        data: &serde_json::Value,
    ) -> Result<String, RenderError> {
        let mut buf = Vec::new();
        engine.render_page(&mut buf, name, data)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_render_page_without_layout() {
        let dir = TempDir::new().unwrap();
        write_view(dir.path(), "home.page.jinja", "Hello {{ app_name }}");

        let engine = JinjaEngine::new(dir.path(), false);
        let out = render_to_string(&engine, "home", &json!({"app_name": "demo"})).unwrap();
        assert_eq!(out, "Hello demo");
    }

    #[test]
    fn test_layout_wraps_page_at_placeholder() {
        let dir = TempDir::new().unwrap();
        write_view(dir.path(), "home.page.jinja", "Hello {{ app_name }}");
        write_view(
            dir.path(),
            "home.layout.jinja",
            "<main>{% include \"content\" %}</main>",
        );

        let engine = JinjaEngine::new(dir.path(), false);
        let out = render_to_string(&engine, "home", &json!({"app_name": "demo"})).unwrap();
        assert_eq!(out, "<main>Hello demo</main>");
    }

    #[test]
    fn test_missing_page_is_not_found_with_path() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("views")).unwrap();

        let engine = JinjaEngine::new(dir.path(), false);
        let mut buf = Vec::new();
        let err = engine
            .render_page(&mut buf, "no-file", &json!({}))
            .unwrap_err();

        match err {
            RenderError::TemplateNotFound { name, path } => {
                assert_eq!(name, "no-file");
                assert!(path.to_string_lossy().ends_with("no-file.page.jinja"));
            }
            other => panic!("expected TemplateNotFound, got {}", other),
        }
        // Nothing was written before the failure.
        assert!(buf.is_empty());
    }

    #[test]
    fn test_syntax_error_is_parse_error_with_path() {
        let dir = TempDir::new().unwrap();
        write_view(dir.path(), "broken.page.jinja", "{{ unclosed");

        let engine = JinjaEngine::new(dir.path(), false);
        let mut buf = Vec::new();
        let err = engine
            .render_page(&mut buf, "broken", &json!({}))
            .unwrap_err();

        match err {
            RenderError::TemplateParse { path, .. } => {
                assert!(path.to_string_lossy().ends_with("broken.page.jinja"));
            }
            other => panic!("expected TemplateParse, got {}", other),
        }
        assert!(buf.is_empty());
    }

    #[test]
    fn test_broken_layout_is_parse_error_with_layout_path() {
        let dir = TempDir::new().unwrap();
        write_view(dir.path(), "home.page.jinja", "body");
        write_view(dir.path(), "home.layout.jinja", "{% if %}");

        let engine = JinjaEngine::new(dir.path(), false);
        let mut buf = Vec::new();
        let err = engine.render_page(&mut buf, "home", &json!({})).unwrap_err();

        match err {
            RenderError::TemplateParse { path, .. } => {
                assert!(path.to_string_lossy().ends_with("home.layout.jinja"));
            }
            other => panic!("expected TemplateParse, got {}", other),
        }
    }

    #[test]
    fn test_runtime_failure_is_execution_error() {
        let dir = TempDir::new().unwrap();
        // Including a template that was never registered fails at execution
        // time, not compile time.
        write_view(
            dir.path(),
            "home.page.jinja",
            "{% include \"missing-partial\" %}",
        );

        let engine = JinjaEngine::new(dir.path(), false);
        let mut buf = Vec::new();
        let err = engine.render_page(&mut buf, "home", &json!({})).unwrap_err();
        assert!(matches!(err, RenderError::TemplateExecution { .. }));
    }

    #[test]
    fn test_cached_mode_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write_view(dir.path(), "home.page.jinja", "v1 {{ n }}");

        let engine = JinjaEngine::new(dir.path(), false);
        let first = render_to_string(&engine, "home", &json!({"n": 1})).unwrap();
        let second = render_to_string(&engine, "home", &json!({"n": 1})).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cached_mode_ignores_disk_edits() {
        let dir = TempDir::new().unwrap();
        write_view(dir.path(), "home.page.jinja", "v1");

        let engine = JinjaEngine::new(dir.path(), false);
        assert_eq!(render_to_string(&engine, "home", &json!({})).unwrap(), "v1");

        write_view(dir.path(), "home.page.jinja", "v2");
        assert_eq!(render_to_string(&engine, "home", &json!({})).unwrap(), "v1");
    }

    #[test]
    fn test_always_reload_picks_up_disk_edits() {
        let dir = TempDir::new().unwrap();
        write_view(dir.path(), "home.page.jinja", "v1");

        let engine = JinjaEngine::new(dir.path(), true);
        assert_eq!(render_to_string(&engine, "home", &json!({})).unwrap(), "v1");

        write_view(dir.path(), "home.page.jinja", "v2");
        assert_eq!(render_to_string(&engine, "home", &json!({})).unwrap(), "v2");
    }

    #[test]
    fn test_concurrent_first_render_is_safe() {
        let dir = TempDir::new().unwrap();
        write_view(dir.path(), "home.page.jinja", "Hello {{ who }}");

        let engine = Arc::new(JinjaEngine::new(dir.path(), false));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    render_to_string(&engine, "home", &json!({"who": "world"})).unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "Hello world");
        }
        assert!(relock(engine.cache.read()).contains_key("home"));
    }
}

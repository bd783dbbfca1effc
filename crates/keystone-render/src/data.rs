//! Data-context construction for template execution.
//!
//! Every template sees one merged JSON object built from three layers, lowest
//! precedence first:
//!
//! 1. `page_data` — arbitrary caller-supplied value for this page
//! 2. [`TemplateData`] free-form `data` entries — framework-adjacent extras
//! 3. Framework-reserved keys — always written last, so a page can never
//!    spoof a security-relevant field like `csrf_token` or `authenticated`
//!
//! Reserved keys have an explicit default for every field, which means a
//! template can always reference them even when the handler passes no data
//! and no request context at all.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::RenderError;
use crate::renderer::RendererConfig;

/// Framework-supplied per-request fields, distinct from page data.
///
/// Handlers usually leave this `None` and let the values degrade to the
/// defaults (or be filled from the [`RequestContext`] the session layer
/// attached). A populated `TemplateData` takes precedence over the request
/// context for the fields it sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateData {
    /// CSRF token to embed in forms.
    pub csrf_token: Option<String>,
    /// One-shot notification message.
    pub flash: Option<String>,
    /// One-shot error message.
    pub error: Option<String>,
    /// Whether the current visitor is authenticated.
    pub authenticated: bool,
    /// Free-form extras, merged below the reserved keys.
    pub data: BTreeMap<String, Value>,
}

/// Ambient per-request state attached by the session layer before rendering.
///
/// The renderer treats the whole context as optional: `None` means "no ambient
/// context" and every derived field falls back to its default rather than
/// failing the render.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// CSRF token from the session, if one was issued.
    pub csrf_token: Option<String>,
    /// Whether the session is authenticated.
    pub authenticated: bool,
    /// Flash message popped from the session.
    pub flash: Option<String>,
    /// Error message popped from the session.
    pub error: Option<String>,
}

/// Keys the framework always owns in the merged context.
///
/// Pages and callers can write these in their own data; the merge overwrites
/// them with the framework values regardless.
pub const RESERVED_KEYS: &[&str] = &[
    "app_name",
    "environment",
    "debug",
    "port",
    "version",
    "csrf_token",
    "authenticated",
    "flash",
    "error",
];

/// Builds the merged data context visible to a template.
///
/// Non-object `page_data` (a bare array, string, etc.) is nested under the
/// `page` key rather than discarded, since it cannot be merged at top level.
pub fn build_context(
    config: &RendererConfig,
    request: Option<&RequestContext>,
    page_data: Option<Value>,
    template_data: Option<TemplateData>,
) -> Result<Value, RenderError> {
    let mut merged = Map::new();

    match page_data {
        Some(Value::Object(entries)) => merged.extend(entries),
        Some(Value::Null) | None => {}
        Some(other) => {
            merged.insert("page".to_string(), other);
        }
    }

    let td = template_data.unwrap_or_default();
    for (key, value) in &td.data {
        merged.insert(key.clone(), value.clone());
    }

    // Reserved keys go last and unconditionally.
    let csrf_token = td
        .csrf_token
        .or_else(|| request.and_then(|r| r.csrf_token.clone()))
        .unwrap_or_default();
    let flash = td
        .flash
        .or_else(|| request.and_then(|r| r.flash.clone()))
        .unwrap_or_default();
    let error = td
        .error
        .or_else(|| request.and_then(|r| r.error.clone()))
        .unwrap_or_default();
    let authenticated = td.authenticated || request.map(|r| r.authenticated).unwrap_or(false);

    merged.insert("app_name".to_string(), json!(config.app_name));
    merged.insert(
        "environment".to_string(),
        json!(if config.debug {
            "development"
        } else {
            "production"
        }),
    );
    merged.insert("debug".to_string(), json!(config.debug));
    merged.insert("port".to_string(), json!(config.port));
    merged.insert("version".to_string(), json!(env!("CARGO_PKG_VERSION")));
    merged.insert("csrf_token".to_string(), json!(csrf_token));
    merged.insert("authenticated".to_string(), json!(authenticated));
    merged.insert("flash".to_string(), json!(flash));
    merged.insert("error".to_string(), json!(error));

    Ok(Value::Object(merged))
}

//! Template engine abstraction.
//!
//! [`TemplateEngine`] is the seam between token data and the text that ends up
//! in an output file. [`MiniJinjaEngine`] is the implementation used by the
//! [`Renderer`](crate::Renderer).

use minijinja::{AutoEscape, Environment, Value};

use swatch_core::format_name;

use crate::error::RenderError;

/// A template engine that renders templates with JSON data.
pub trait TemplateEngine: Send + Sync {
    /// Compiles and renders a template string in one step.
    fn render_template(&self, template: &str, data: &serde_json::Value)
        -> Result<String, RenderError>;

    /// Compiles a template and stores it under `name`.
    fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError>;

    /// Renders a template previously registered with
    /// [`add_template`](Self::add_template).
    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError>;

    /// Checks if a template with the given name exists.
    fn has_template(&self, name: &str) -> bool;
}

/// MiniJinja-based template engine.
///
/// Auto-escaping is disabled: templates produce source files, not HTML, and
/// template names ending in `.json` or `.js` would otherwise escape values.
///
/// ```rust
/// use swatch_render::{MiniJinjaEngine, TemplateEngine};
/// use serde_json::json;
///
/// let engine = MiniJinjaEngine::new();
/// let output = engine
///     .render_template("{{ name | ident }}", &json!({ "name": "Brand/Blue" }))
///     .unwrap();
/// assert_eq!(output, "BRAND_BLUE");
/// ```
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Creates a new engine with swatch's filters registered.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        register_filters(&mut env);
        Self { env }
    }

    /// Returns the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns the underlying MiniJinja environment mutably, for registering
    /// extra filters or functions.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render_template(
        &self,
        template: &str,
        data: &serde_json::Value,
    ) -> Result<String, RenderError> {
        let value = Value::from_serialize(data);
        Ok(self.env.render_str(template, value)?)
    }

    fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        Ok(())
    }

    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(name)?;
        let value = Value::from_serialize(data);
        Ok(tmpl.render(value)?)
    }

    fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }
}

/// Registers swatch's filters with a MiniJinja environment.
///
/// - `ident`: formats a style name into a token identifier
/// - `quote`: wraps a value in single quotes, escaping backslashes and quotes
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("ident", |value: String| -> String { format_name(&value) });

    env.add_filter("quote", |value: String| -> String {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
    });
}

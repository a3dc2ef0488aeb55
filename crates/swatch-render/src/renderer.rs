//! Rendering resolved colour styles into output files.
//!
//! [`Renderer`] owns a [`TemplateEngine`] with the built-in SCSS and
//! TypeScript templates registered under their file names. Extra templates
//! can be added for other target languages; they see the same context:
//!
//! ```text
//! tokens: list of { name, id, value, color: { r, g, b, a } }
//! count:  number of tokens
//! ```
//!
//! `name` is the style's display name, `id` the formatted identifier and
//! `value` the formatted colour. Tokens keep resolution order and are not
//! de-duplicated, so two styles that format to the same identifier both
//! appear. The JSON output goes through the snapshot instead, where the
//! later colour wins.

use serde::Serialize;

use swatch_core::{format_color, format_name, ColorStyleRecord, ColorValue, Snapshot};

use crate::engine::{MiniJinjaEngine, TemplateEngine};
use crate::error::RenderError;
use crate::format::OutputFormat;

/// One colour token as seen by templates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub name: String,
    pub id: String,
    pub value: String,
    pub color: ColorValue,
}

impl Token {
    pub fn from_record(record: &ColorStyleRecord) -> Self {
        Self {
            name: record.name.clone(),
            id: format_name(&record.name),
            value: format_color(&record.color),
            color: record.color,
        }
    }
}

#[derive(Serialize)]
struct TokenContext<'a> {
    tokens: &'a [Token],
    count: usize,
}

/// A rendered output: its file name and full contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub file_name: String,
    pub contents: String,
}

/// Renders colour records into every configured output.
pub struct Renderer {
    engine: Box<dyn TemplateEngine>,
    extra: Vec<String>,
}

impl Renderer {
    /// Creates a renderer backed by [`MiniJinjaEngine`].
    pub fn new() -> Result<Self, RenderError> {
        Self::with_engine(Box::new(MiniJinjaEngine::new()))
    }

    /// Creates a renderer with a custom engine, registering the built-in
    /// templates on it.
    pub fn with_engine(mut engine: Box<dyn TemplateEngine>) -> Result<Self, RenderError> {
        for format in OutputFormat::ALL {
            if let Some(source) = format.template() {
                engine.add_template(format.file_name(), source)?;
            }
        }
        Ok(Self {
            engine,
            extra: Vec::new(),
        })
    }

    /// Registers an extra output, written to `file_name` and rendered from
    /// `source`.
    ///
    /// The built-in file names are reserved.
    pub fn add_template(&mut self, file_name: &str, source: &str) -> Result<(), RenderError> {
        if OutputFormat::ALL.iter().any(|f| f.file_name() == file_name) {
            return Err(RenderError::ReservedFileName(file_name.to_string()));
        }
        self.engine.add_template(file_name, source)?;
        if !self.extra.iter().any(|name| name == file_name) {
            self.extra.push(file_name.to_string());
        }
        Ok(())
    }

    /// File names of the extra templates, in registration order.
    pub fn extra_outputs(&self) -> &[String] {
        &self.extra
    }

    /// Renders one built-in format.
    pub fn render(
        &self,
        format: OutputFormat,
        records: &[ColorStyleRecord],
    ) -> Result<String, RenderError> {
        match format {
            OutputFormat::Json => Ok(Snapshot::from_records(records).to_json()?),
            _ => self.render_named(format.file_name(), records),
        }
    }

    /// Renders a registered template by file name.
    pub fn render_named(
        &self,
        file_name: &str,
        records: &[ColorStyleRecord],
    ) -> Result<String, RenderError> {
        let tokens: Vec<Token> = records.iter().map(Token::from_record).collect();
        let context = serde_json::to_value(TokenContext {
            tokens: &tokens,
            count: tokens.len(),
        })?;
        self.engine.render_named(file_name, &context)
    }

    /// Renders the requested formats plus every extra template.
    ///
    /// JSON is always included, since it is the next run's prior state.
    /// Built-in formats come first in [`OutputFormat::ALL`] order, each once.
    pub fn render_all(
        &self,
        formats: &[OutputFormat],
        records: &[ColorStyleRecord],
    ) -> Result<Vec<RenderedFile>, RenderError> {
        let mut files = Vec::new();

        for format in OutputFormat::ALL {
            if format == OutputFormat::Json || formats.contains(&format) {
                files.push(RenderedFile {
                    file_name: format.file_name().to_string(),
                    contents: self.render(format, records)?,
                });
            }
        }

        for file_name in &self.extra {
            files.push(RenderedFile {
                file_name: file_name.clone(),
                contents: self.render_named(file_name, records)?,
            });
        }

        Ok(files)
    }
}

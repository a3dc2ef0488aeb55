//! # Swatch Render - Colour Token Output Files
//!
//! Turns resolved colour styles into the files a front-end build consumes:
//!
//! | Format | File | Line shape |
//! |--------|------|------------|
//! | [`OutputFormat::Scss`] | `colors.scss` | `$NAME: rgb(R, G, B);` |
//! | [`OutputFormat::TypeScript`] | `colors.ts` | `const NAME = 'rgb(R, G, B)';` |
//! | [`OutputFormat::Json`] | `colors.json` | two-space indented object |
//!
//! Line-oriented outputs join lines with `\n` and have no trailing newline.
//!
//! ```rust
//! use swatch_core::{ColorStyleRecord, ColorValue};
//! use swatch_render::{OutputFormat, Renderer};
//!
//! let records = vec![ColorStyleRecord::new("Brand/Blue", ColorValue::rgb(0.0, 0.0, 1.0))];
//! let renderer = Renderer::new().unwrap();
//!
//! assert_eq!(
//!     renderer.render(OutputFormat::Scss, &records).unwrap(),
//!     "$BRAND_BLUE: rgb(0, 0, 255);"
//! );
//! ```

pub mod engine;
mod error;
pub mod format;
pub mod renderer;

pub use engine::{register_filters, MiniJinjaEngine, TemplateEngine};
pub use error::RenderError;
pub use format::{OutputFormat, SCSS_TEMPLATE, TYPESCRIPT_TEMPLATE};
pub use renderer::{RenderedFile, Renderer, Token};

//! # Swatch - Figma Colour Tokens
//!
//! Command-line front end for [`swatch_core`] and [`swatch_render`]. It wires
//! the pipeline to real collaborators:
//!
//! - [`figma::FigmaClient`]: fetches the design file over HTTP
//! - [`store::FileStore`]: reads the previous `colors.json` and writes the
//!   outputs plus the version bump label
//! - [`config::Settings`]: flags, `swatch.yaml` and defaults merged
//!
//! The API token is read from `FIGMA_API_TOKEN` only.

pub mod cli;
pub mod config;
pub mod figma;
pub mod logging;
pub mod report;
pub mod store;

pub use cli::{run, Cli, Command, RunArgs};
pub use config::{ConfigError, FileConfig, Overrides, Settings};
pub use figma::FigmaClient;
pub use report::{render_report, ReportFormat};
pub use store::FileStore;

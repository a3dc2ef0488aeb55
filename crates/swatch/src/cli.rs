//! Command-line interface.
//!
//! ```text
//! swatch sync   fetch, resolve, diff and write every output
//! swatch diff   same, but only print what would change
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use swatch_core::{check_credential, EnvReader, Pipeline, RunReport, StyleResolver};
use swatch_render::{OutputFormat, Renderer};

use crate::config::{FileConfig, Overrides, Settings, FILE_KEY_VAR, TOKEN_VAR};
use crate::figma::FigmaClient;
use crate::report::{render_report, ReportFormat};
use crate::store::FileStore;

#[derive(Debug, Parser)]
#[command(name = "swatch", version, about = "Sync colour styles from a Figma file into code tokens")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the design file and write colour tokens
    Sync(RunArgs),
    /// Show what a sync would change without writing anything
    Diff(RunArgs),
}

impl Command {
    pub fn args(&self) -> &RunArgs {
        match self {
            Command::Sync(args) | Command::Diff(args) => args,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self, Command::Diff(_))
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Key of the design file to read
    #[arg(long, env = FILE_KEY_VAR)]
    pub file_key: Option<String>,

    /// Directory for colors.scss, colors.ts and colors.json [default: build]
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// File receiving the version bump label [default: VERSION_BUMP_TYPE]
    #[arg(long)]
    pub bump_file: Option<PathBuf>,

    /// Base URL of the Figma API [default: https://api.figma.com]
    #[arg(long)]
    pub api_base: Option<String>,

    /// Output format to write: scss, ts or json (repeatable; json is always written)
    #[arg(long = "format", value_name = "FORMAT")]
    pub formats: Vec<OutputFormat>,

    /// Node type whose leaves carry style colours [default: ELLIPSE]
    #[arg(long)]
    pub shape: Option<String>,

    /// Config file [default: swatch.yaml, if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Summary format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub output: ReportFormat,
}

impl From<&RunArgs> for Overrides {
    fn from(args: &RunArgs) -> Self {
        Overrides {
            file_key: args.file_key.clone(),
            out_dir: args.out_dir.clone(),
            bump_file: args.bump_file.clone(),
            api_base: args.api_base.clone(),
            formats: args.formats.clone(),
            shape: args.shape.clone(),
        }
    }
}

/// Runs a parsed command, printing the summary to `out`.
///
/// The credential is checked before the config file or anything else is
/// read.
pub fn run(cli: &Cli, env: &dyn EnvReader, out: &mut dyn Write) -> Result<RunReport> {
    let token = check_credential(env, TOKEN_VAR)?;

    let args = cli.command.args();
    let file = FileConfig::load(args.config.as_deref())?;
    let settings = Settings::resolve(args.into(), file)?;
    tracing::info!(
        file_key = %settings.file_key,
        out_dir = %settings.out_dir.display(),
        "resolved settings"
    );

    let store = FileStore::new(&settings.out_dir, &settings.bump_file, build_renderer(&settings)?)
        .with_formats(settings.formats.clone());
    let source = FigmaClient::new(&settings.api_base, token)?;
    let pipeline = Pipeline::new().with_resolver(StyleResolver::new().with_shape(settings.shape));

    let report = if cli.command.is_dry_run() {
        pipeline.preview(&settings.file_key, &source, &store)?
    } else {
        pipeline.run(&settings.file_key, &source, &store, &store)?
    };

    let summary = render_report(&report, args.output, cli.command.is_dry_run())?;
    writeln!(out, "{}", summary)?;
    Ok(report)
}

fn build_renderer(settings: &Settings) -> Result<Renderer> {
    let mut renderer = Renderer::new()?;
    for (file_name, path) in &settings.templates {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display()))?;
        renderer
            .add_template(file_name, &source)
            .with_context(|| format!("invalid template for {}", file_name))?;
    }
    Ok(renderer)
}

//! Configuration: defaults, an optional YAML file and command-line overrides.
//!
//! Precedence is flags (and their environment variables) over the config
//! file over built-in defaults. The file is `swatch.yaml` in the working
//! directory unless `--config` names another one; an explicitly named file
//! must exist, the default one is optional.
//!
//! ```yaml
//! file-key: AbC123
//! out-dir: build
//! bump-file: VERSION_BUMP_TYPE
//! api-base: https://api.figma.com
//! formats: [scss, ts, json]
//! shape: ELLIPSE
//! templates:
//!   colors.css: templates/colors.css.jinja
//! ```
//!
//! Relative paths are resolved against the working directory.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use swatch_core::NodeType;
use swatch_render::OutputFormat;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "swatch.yaml";
pub const DEFAULT_OUT_DIR: &str = "build";
pub const DEFAULT_BUMP_FILE: &str = "VERSION_BUMP_TYPE";
pub const DEFAULT_API_BASE: &str = "https://api.figma.com";

/// Environment variable holding the API token.
pub const TOKEN_VAR: &str = "FIGMA_API_TOKEN";
/// Environment variable holding the design file key.
pub const FILE_KEY_VAR: &str = "FIGMA_FILE_KEY";

/// Errors raised while assembling [`Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("no design file key: pass --file-key, set FIGMA_FILE_KEY or add file-key to the config file")]
    MissingFileKey,

    #[error("unknown shape kind '{0}'")]
    UnknownShape(String),

    #[error("bump file {} would overwrite an output file", .0.display())]
    BumpFileCollision(PathBuf),
}

/// Contents of the YAML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub file_key: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub bump_file: Option<PathBuf>,
    pub api_base: Option<String>,
    pub formats: Option<Vec<OutputFormat>>,
    pub shape: Option<String>,
    /// Extra outputs: file name → template path.
    pub templates: BTreeMap<String, PathBuf>,
}

impl FileConfig {
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty mapping.
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source)
    }

    /// Loads `explicit` if given, otherwise `swatch.yaml` when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let source = match std::fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        tracing::debug!(path = %path.display(), "loaded config file");
        Self::from_yaml(&source).map_err(|source| ConfigError::Parse { path, source })
    }
}

/// Values given on the command line. `None` and empty lists defer to the
/// config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub file_key: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub bump_file: Option<PathBuf>,
    pub api_base: Option<String>,
    pub formats: Vec<OutputFormat>,
    pub shape: Option<String>,
}

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub file_key: String,
    pub out_dir: PathBuf,
    pub bump_file: PathBuf,
    pub api_base: String,
    pub formats: Vec<OutputFormat>,
    pub shape: NodeType,
    pub templates: BTreeMap<String, PathBuf>,
}

impl Settings {
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Result<Self, ConfigError> {
        let file_key = overrides
            .file_key
            .or(file.file_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingFileKey)?;

        let formats = if overrides.formats.is_empty() {
            file.formats.unwrap_or_else(|| OutputFormat::ALL.to_vec())
        } else {
            overrides.formats
        };

        let shape = match overrides.shape.or(file.shape) {
            Some(name) => match NodeType::from_name(&name) {
                NodeType::Other => return Err(ConfigError::UnknownShape(name)),
                shape => shape,
            },
            None => NodeType::Ellipse,
        };

        let out_dir = overrides
            .out_dir
            .or(file.out_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
        let bump_file = overrides
            .bump_file
            .or(file.bump_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUMP_FILE));

        let outputs = OutputFormat::ALL
            .iter()
            .map(|format| format.file_name())
            .chain(file.templates.keys().map(String::as_str));
        for name in outputs {
            if same_path(&bump_file, &out_dir.join(name)) {
                return Err(ConfigError::BumpFileCollision(bump_file));
            }
        }

        Ok(Self {
            file_key,
            out_dir,
            bump_file,
            api_base: overrides
                .api_base
                .or(file.api_base)
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            formats,
            shape,
            templates: file.templates,
        })
    }
}

// Lexical comparison; `.` components are ignored.
fn same_path(a: &Path, b: &Path) -> bool {
    significant(a).eq(significant(b))
}

fn significant(path: &Path) -> impl Iterator<Item = Component<'_>> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
}

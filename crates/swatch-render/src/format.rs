//! Output format definitions.
//!
//! Each [`OutputFormat`] has a fixed file name. The textual formats are backed
//! by a built-in template; JSON is rendered from the snapshot directly so the
//! file can be parsed back as the next run's prior state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// SCSS variables, one per line: `$NAME: rgb(R, G, B);`
pub const SCSS_TEMPLATE: &str = "{% for token in tokens %}{% if not loop.first %}\n{% endif %}${{ token.id }}: {{ token.value }};{% endfor %}";

/// TypeScript constants, one per line: `const NAME = 'rgb(R, G, B)';`
pub const TYPESCRIPT_TEMPLATE: &str = "{% for token in tokens %}{% if not loop.first %}\n{% endif %}const {{ token.id }} = {{ token.value | quote }};{% endfor %}";

/// A file format the renderer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Scss,
    #[serde(rename = "ts", alias = "typescript")]
    TypeScript,
    Json,
}

impl OutputFormat {
    /// Every format, in the order outputs are written.
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Scss,
        OutputFormat::TypeScript,
        OutputFormat::Json,
    ];

    /// The file this format is written to inside the output directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Scss => "colors.scss",
            OutputFormat::TypeScript => "colors.ts",
            OutputFormat::Json => "colors.json",
        }
    }

    /// The built-in template, or `None` for formats rendered without one.
    pub fn template(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Scss => Some(SCSS_TEMPLATE),
            OutputFormat::TypeScript => Some(TYPESCRIPT_TEMPLATE),
            OutputFormat::Json => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Scss => "scss",
            OutputFormat::TypeScript => "ts",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scss" => Ok(OutputFormat::Scss),
            "ts" | "typescript" => Ok(OutputFormat::TypeScript),
            "json" => Ok(OutputFormat::Json),
            _ => Err(RenderError::UnknownFormat(s.to_string())),
        }
    }
}

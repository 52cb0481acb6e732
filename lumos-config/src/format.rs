//! Output format for generated stubs.

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// Syntax variant of the generated stub file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Declaration-only PHP source, consumed directly by IDEs.
    #[default]
    Php,
    /// Machine-readable completion export for editor plugins.
    Json,
}

impl Format {
    /// Returns the format identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Php => "php",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "php" => Ok(Format::Php),
            "json" => Ok(Format::Json),
            _ => Err(format!("unknown format '{}', expected 'php' or 'json'", s)),
        }
    }
}

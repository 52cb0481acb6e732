//! Tool configuration (`lumos.toml`).
//!
//! The configuration is parsed once at startup into plain structs; there is
//! no runtime key-value lookup and nothing mutates it after validation. The
//! in-memory database override is produced as a derived value, never written
//! back.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Error, Format, Result};

/// Root schema for lumos.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application root, used for the compiled-classmap probe and to resolve
    /// helper and model paths
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Output location and format
    #[serde(default)]
    pub output: OutputConfig,

    /// Helper-file inclusion
    #[serde(default)]
    pub helpers: HelperConfig,

    /// Where the facade/model metadata registry lives
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Database connections shown in the generation context
    #[serde(default)]
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the stub file is written into; ensured to exist before a
    /// generate run when non-empty
    #[serde(default)]
    pub directory: PathBuf,

    /// Stub filename, overridable from the command line
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Default output format
    #[serde(default)]
    pub format: Format,

    /// Whether the mixin pass runs by default after a successful write
    #[serde(default)]
    pub write_mixins: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HelperConfig {
    /// Include helper files even without the --helpers flag
    #[serde(default)]
    pub include: bool,

    /// Helper file paths, relative to the application root
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Path to the metadata registry, relative to the application root
    #[serde(default = "default_registry_path")]
    pub path: PathBuf,
}

/// Relational connection settings passed into the generation context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DatabaseSettings {
    /// Name of the default connection
    #[serde(default)]
    pub default: Option<String>,

    /// Named connections, in declaration order
    #[serde(default)]
    pub connections: IndexMap<String, Connection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Connection {
    pub driver: String,
    pub database: String,
}

impl DatabaseSettings {
    /// Connection name installed by [`DatabaseSettings::with_memory_driver`].
    pub const MEMORY_CONNECTION: &'static str = "sqlite";

    /// Return a copy with a transient in-process sqlite connection installed
    /// and made the default.
    ///
    /// Used to avoid real connection attempts when only static metadata is
    /// needed for generation. The original settings are left untouched.
    pub fn with_memory_driver(&self) -> Self {
        let mut settings = self.clone();
        settings.connections.insert(
            Self::MEMORY_CONNECTION.to_string(),
            Connection {
                driver: "sqlite".to_string(),
                database: ":memory:".to_string(),
            },
        );
        settings.default = Some(Self::MEMORY_CONNECTION.to_string());
        settings
    }
}

impl Config {
    /// Open and parse a lumos.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let filename = path.display().to_string();
        Self::from_str_with_filename(&content, &filename)
    }

    /// Parse a config from a string with a filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        config.validate(content, filename)?;
        Ok(config)
    }

    fn validate(&self, src: &str, filename: &str) -> Result<()> {
        if self.output.filename.is_empty() {
            return Err(Error::validation(
                "output filename cannot be empty",
                src,
                filename,
                None,
            ));
        }

        if let Some(default) = &self.database.default
            && !self.database.connections.is_empty()
            && !self.database.connections.contains_key(default)
        {
            return Err(Error::validation(
                format!(
                    "default connection '{}' is not declared under [database.connections]",
                    default
                ),
                src,
                filename,
                crate::validate::find_name_span(src, default),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            output: OutputConfig::default(),
            helpers: HelperConfig::default(),
            registry: RegistryConfig::default(),
            database: DatabaseSettings::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            filename: default_filename(),
            format: Format::default(),
            write_mixins: false,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: default_registry_path(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_filename() -> String {
    "_ide_helper.php".to_string()
}

fn default_registry_path() -> PathBuf {
    PathBuf::from("registry.toml")
}

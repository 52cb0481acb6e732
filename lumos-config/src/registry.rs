//! Facade and model metadata registry (`registry.toml`).
//!
//! The registry is the declared stand-in for runtime reflection: it lists
//! every facade with the signatures its dynamic calls forward to, and every
//! model with its table columns. The generator renders stubs from this data
//! alone.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    Error, Result,
    validate::{find_name_span, is_php_keyword, validate_identifier, validate_namespace},
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registry {
    #[serde(default, rename = "facade")]
    pub facades: Vec<Facade>,

    #[serde(default, rename = "model")]
    pub models: Vec<Model>,
}

/// A static-looking proxy class and the signatures it forwards to.
#[derive(Debug, Clone, Deserialize)]
pub struct Facade {
    /// Class name emitted inside the facade namespace
    pub alias: String,

    /// Namespace the stub class is declared in
    #[serde(default = "default_facade_namespace")]
    pub namespace: String,

    /// Fully-qualified forwarding target, shown in the stub docblock
    #[serde(default)]
    pub root: Option<String>,

    #[serde(default, rename = "method")]
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Method {
    pub name: String,

    /// Parameter declarations, already in PHP syntax (`string $key`)
    #[serde(default)]
    pub params: Vec<String>,

    /// Return type declaration
    #[serde(default = "default_returns")]
    pub returns: String,
}

impl Method {
    /// Render the full signature, e.g. `get(string $key): mixed`.
    pub fn signature(&self) -> String {
        format!("{}({}): {}", self.name, self.params.join(", "), self.returns)
    }
}

/// A database-backed model class and its column metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Model {
    /// Fully-qualified class name
    pub class: String,

    #[serde(default)]
    pub table: Option<String>,

    /// Source file of the class, relative to the application root.
    /// Required for the mixin pass; models without it are skipped there.
    #[serde(default)]
    pub source: Option<PathBuf>,

    #[serde(default, rename = "column")]
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Column {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: ColumnType,

    #[serde(default)]
    pub nullable: bool,
}

/// Known relational column types.
///
/// Unknown type strings are rejected at parse time so the renderers never
/// see an unmapped column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    BigInt,
    Float,
    Decimal,
    Boolean,
    String,
    Text,
    Date,
    DateTime,
    Timestamp,
    Json,
    Binary,
    Uuid,
    Enum,
}

impl Registry {
    /// Open and parse a registry.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let filename = path.display().to_string();
        Self::from_str_with_filename(&content, &filename)
    }

    /// Parse a registry from a string with a filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let registry: Registry =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        registry.validate(content, filename)?;
        Ok(registry)
    }

    /// Total number of facade methods across the registry.
    pub fn method_count(&self) -> usize {
        self.facades.iter().map(|f| f.methods.len()).sum()
    }

    /// Total number of model columns across the registry.
    pub fn column_count(&self) -> usize {
        self.models.iter().map(|m| m.columns.len()).sum()
    }

    fn validate(&self, src: &str, filename: &str) -> Result<()> {
        let mut aliases = HashSet::new();
        for facade in &self.facades {
            validate_name(&facade.alias, "facade alias", src, filename)?;

            if let Some(reason) = validate_namespace(&facade.namespace) {
                return Err(Error::invalid_identifier(
                    &facade.namespace,
                    "facade namespace",
                    reason,
                    src,
                    filename,
                    find_name_span(src, &facade.namespace),
                ));
            }

            if !aliases.insert(facade.alias.as_str()) {
                return Err(Error::validation(
                    format!("duplicate facade alias '{}'", facade.alias),
                    src,
                    filename,
                    find_name_span(src, &facade.alias),
                ));
            }

            let mut methods = HashSet::new();
            for method in &facade.methods {
                validate_name(&method.name, "method", src, filename)?;
                if !methods.insert(method.name.as_str()) {
                    return Err(Error::validation(
                        format!(
                            "duplicate method '{}' on facade '{}'",
                            method.name, facade.alias
                        ),
                        src,
                        filename,
                        find_name_span(src, &method.name),
                    ));
                }
            }
        }

        let mut classes = HashSet::new();
        // stubs share one namespace, so terminal class names must be unique
        let mut stub_names: HashMap<&str, &str> = HashMap::new();
        for model in &self.models {
            if let Some(reason) = validate_namespace(&model.class) {
                return Err(Error::invalid_identifier(
                    &model.class,
                    "model class",
                    reason,
                    src,
                    filename,
                    find_name_span(src, &model.class),
                ));
            }

            if !classes.insert(model.class.as_str()) {
                return Err(Error::validation(
                    format!("duplicate model class '{}'", model.class),
                    src,
                    filename,
                    find_name_span(src, &model.class),
                ));
            }

            let stub = model
                .class
                .rsplit('\\')
                .next()
                .unwrap_or(model.class.as_str());
            if let Some(existing) = stub_names.insert(stub, model.class.as_str()) {
                return Err(Error::validation(
                    format!(
                        "models '{}' and '{}' would share the stub class '{}'",
                        existing, model.class, stub
                    ),
                    src,
                    filename,
                    find_name_span(src, &model.class),
                ));
            }
        }

        Ok(())
    }
}

fn validate_name(name: &str, context: &str, src: &str, filename: &str) -> Result<()> {
    let span = find_name_span(src, name);

    if is_php_keyword(name) {
        return Err(Error::reserved_keyword(name, context, src, filename, span));
    }

    if let Some(reason) = validate_identifier(name) {
        return Err(Error::invalid_identifier(
            name, context, reason, src, filename, span,
        ));
    }

    Ok(())
}

fn default_facade_namespace() -> String {
    "Illuminate\\Support\\Facades".to_string()
}

fn default_returns() -> String {
    "mixed".to_string()
}

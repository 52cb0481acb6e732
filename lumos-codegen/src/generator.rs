use eyre::Result;
use lumos_config::{DatabaseSettings, Format, Registry};

use crate::{json, php};

/// Rendering context threaded into a generation run.
///
/// Carries the *effective* database settings: when the caller wants the
/// in-memory driver, it applies the override to its copy before handing it
/// over, so the parsed configuration is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateContext {
    pub database: DatabaseSettings,
}

/// Produces the stub text for a chosen output format.
///
/// The orchestrator treats the generator as an opaque collaborator; the
/// returned text is written verbatim.
pub trait StubGenerator {
    fn generate(&self, format: Format) -> Result<String>;
}

/// Renders the metadata registry into declaration stubs.
pub struct Generator<'a> {
    registry: &'a Registry,
    context: GenerateContext,
    helpers: String,
}

impl<'a> Generator<'a> {
    /// Create a generator over a registry, with the rendering context and
    /// the aggregated helper-function text.
    pub fn new(registry: &'a Registry, context: GenerateContext, helpers: String) -> Self {
        Self {
            registry,
            context,
            helpers,
        }
    }
}

impl StubGenerator for Generator<'_> {
    fn generate(&self, format: Format) -> Result<String> {
        match format {
            Format::Php => Ok(php::render(self.registry, &self.context, &self.helpers)),
            Format::Json => json::render(self.registry, &self.context),
        }
    }
}

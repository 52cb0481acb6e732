//! Stub generation for dynamically-dispatched framework APIs.
//!
//! Renders the metadata registry into declaration stubs so editors can
//! autocomplete facade calls and model properties:
//! - [`builder`] - code building blocks (CodeBuilder, Indent)
//! - [`Generator`] - renders the registry into PHP or JSON stub text
//! - [`MixinWriter`] - annotates model sources with `@mixin` docblocks

pub mod builder;
mod generator;
mod json;
mod mixins;
mod php;
mod php_types;

pub use generator::{GenerateContext, Generator, StubGenerator};
pub use mixins::MixinWriter;
pub use php_types::{php_property_type, php_type};

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod format;
mod registry;
mod validate;

pub use config::{Config, Connection, DatabaseSettings, HelperConfig, OutputConfig, RegistryConfig};
pub use error::{Error, Result};
pub use format::Format;
pub use registry::{Column, ColumnType, Facade, Method, Model, Registry};

//! Core primitives for the lumos stub generator.
//!
//! This crate provides the collaborator seams the rest of the workspace is
//! built against: a [`Filesystem`] abstraction, a [`Reporter`] output sink,
//! and a few string utilities shared by the renderers.

mod fs;
mod report;
mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use fs::{Filesystem, OsFilesystem};
pub use report::{Reporter, TerminalReporter};
pub use utils::{split_fqn, strip_php_tags};

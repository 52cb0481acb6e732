//! Test doubles for the [`Filesystem`] and [`Reporter`] seams.
//!
//! Feature-gated so downstream crates can use them in their own tests
//! without pulling them into release builds.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    path::{Path, PathBuf},
};

use eyre::{Result, eyre};

use crate::{Filesystem, Reporter};

/// In-memory [`Filesystem`] that records every operation.
#[derive(Default)]
pub struct MemoryFilesystem {
    files: RefCell<HashMap<PathBuf, String>>,
    dirs: RefCell<Vec<PathBuf>>,
    reads: RefCell<Vec<PathBuf>>,
    writes: RefCell<Vec<PathBuf>>,
    fail_writes: Cell<bool>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file before the operation under test runs.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.borrow_mut().insert(path.into(), content.into());
        self
    }

    /// Make every subsequent `put` fail.
    pub fn fail_writes(self) -> Self {
        self.fail_writes.set(true);
        self
    }

    /// Content of a file, if it was seeded or written.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Paths passed to `put`, in order, including failed attempts.
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.borrow().clone()
    }

    /// Paths passed to `get`, in order.
    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.borrow().clone()
    }

    /// Paths passed to `ensure_directory_exists`, in order.
    pub fn ensured_dirs(&self) -> Vec<PathBuf> {
        self.dirs.borrow().clone()
    }
}

impl Filesystem for MemoryFilesystem {
    fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        self.dirs.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path) || self.dirs.borrow().iter().any(|d| d == path)
    }

    fn get(&self, path: &Path) -> Result<String> {
        self.reads.borrow_mut().push(path.to_path_buf());
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| eyre!("no such file '{}'", path.display()))
    }

    fn put(&self, path: &Path, content: &str) -> Result<usize> {
        self.writes.borrow_mut().push(path.to_path_buf());
        if self.fail_writes.get() {
            return Err(eyre!("write failed for '{}'", path.display()));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(content.len())
    }
}

/// [`Reporter`] that records messages for assertions.
#[derive(Default)]
pub struct MemoryReporter {
    pub infos: Vec<String>,
    pub errors: Vec<String>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for MemoryReporter {
    fn info(&mut self, msg: &str) {
        self.infos.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }
}

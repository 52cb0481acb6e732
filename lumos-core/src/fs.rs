use std::path::Path;

use eyre::{Result, WrapErr};

/// Scoped filesystem operations used by the generate pipeline.
///
/// `put` returns the number of bytes written so callers can distinguish
/// "wrote an empty file" (`Ok(0)`) from "write failed" (`Err`).
pub trait Filesystem {
    /// Create a directory and all of its parents if missing. Idempotent.
    fn ensure_directory_exists(&self, path: &Path) -> Result<()>;

    /// Check whether a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a file to a string.
    fn get(&self, path: &Path) -> Result<String>;

    /// Write a file, returning the number of bytes written.
    fn put(&self, path: &Path, content: &str) -> Result<usize>;
}

/// [`Filesystem`] backed by `std::fs`.
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .wrap_err_with(|| format!("failed to create directory '{}'", path.display()))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn get(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))
    }

    fn put(&self, path: &Path, content: &str) -> Result<usize> {
        std::fs::write(path, content)
            .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
        Ok(content.len())
    }
}

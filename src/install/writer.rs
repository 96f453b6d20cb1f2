//! Filesystem capability handed to the orchestrator.
//!
//! The orchestrator picks one writer at the start of a run and never
//! branches on dry-run itself.

use crate::error::{InstallerError, Result};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

pub trait Writer {
    /// Create `path` and its parents. Existing directories are fine.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Write `content` to `path`, creating parent directories.
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    /// Remove a directory tree. A missing directory is not an error.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dry_run(&self) -> bool {
        false
    }
}

fn write_error(path: &Path, source: std::io::Error) -> InstallerError {
    InstallerError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes to the real filesystem.
#[derive(Debug, Default)]
pub struct FsWriter;

impl Writer for FsWriter {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|e| write_error(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| write_error(path, e))?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        std::fs::remove_dir_all(path).map_err(|e| write_error(path, e))?;
        tracing::info!("Removed {}", path.display());
        Ok(())
    }
}

/// Logs every intended mutation and touches nothing. Paths under a
/// directory it "removed" report as absent afterwards.
#[derive(Debug, Default)]
pub struct DryRunWriter {
    removed: RefCell<Vec<PathBuf>>,
}

impl Writer for DryRunWriter {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        tracing::debug!("[dry-run] Would create directory {}", path.display());
        Ok(())
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        tracing::info!("[dry-run] Would write {} ({} bytes)", path.display(), content.len());
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        if path.exists() {
            tracing::info!("[dry-run] Would remove {}", path.display());
            self.removed.borrow_mut().push(path.to_path_buf());
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists() && !self.removed.borrow().iter().any(|dir| path.starts_with(dir))
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_writer_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c.md");
        FsWriter.write(&path, "hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_fs_writer_remove_missing_is_ok() {
        let dir = TempDir::new().unwrap();
        FsWriter.remove_dir_all(&dir.path().join("missing")).unwrap();
    }

    #[test]
    fn test_fs_writer_create_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agents");
        FsWriter.create_dir_all(&path).unwrap();
        FsWriter.create_dir_all(&path).unwrap();
        assert!(path.is_dir());
    }

    #[test]
    fn test_dry_run_writer_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("keep");
        std::fs::create_dir_all(&existing).unwrap();

        let writer = DryRunWriter::default();
        writer.create_dir_all(&dir.path().join("new")).unwrap();
        writer.write(&dir.path().join("new/file.md"), "x").unwrap();
        writer.remove_dir_all(&existing).unwrap();

        assert!(!dir.path().join("new").exists());
        assert!(existing.is_dir());
        assert!(writer.is_dry_run());
    }

    #[test]
    fn test_dry_run_removed_dir_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let context = dir.path().join("context");
        std::fs::create_dir_all(&context).unwrap();
        std::fs::write(context.join("overview.md"), "notes").unwrap();

        let writer = DryRunWriter::default();
        assert!(writer.exists(&context.join("overview.md")));
        writer.remove_dir_all(&context).unwrap();
        assert!(!writer.exists(&context.join("overview.md")));
        assert!(context.join("overview.md").is_file());
    }
}

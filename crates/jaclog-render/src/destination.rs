//! Append-only output targets

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use jaclog_core::prelude::*;

/// Something text can be appended to, with a last-modified time.
///
/// Opening and writing are separate steps so a caller can acquire every
/// target before committing bytes to any of them.
#[cfg_attr(test, mockall::automock)]
pub trait Destination {
    /// Last modification time
    fn modified(&self) -> Result<SystemTime>;

    /// Open for appending, creating the target if absent
    fn open_append(&self) -> Result<Box<dyn Write>>;

    /// Append `text` as-is
    fn append(&self, text: &str) -> Result<()> {
        let mut writer = self.open_append()?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

/// A destination backed by a file path (regular file, tty device, fifo)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDestination {
    path: PathBuf,
}

impl FileDestination {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Validate a user-supplied destination.
    ///
    /// Empty values and directories are rejected before anything is opened.
    pub fn parse(spec: &str) -> Result<Self> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(Error::unsupported_destination(spec, "empty path"));
        }
        let path = PathBuf::from(trimmed);
        if path.is_dir() {
            return Err(Error::unsupported_destination(spec, "is a directory"));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file if it does not exist yet.
    ///
    /// An existing file is left alone so its modification time still tells
    /// when it was last written.
    pub fn ensure_exists(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if !self.path.exists() {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            debug!("Created log file {}", self.path.display());
        }
        Ok(())
    }
}

impl Destination for FileDestination {
    fn modified(&self) -> Result<SystemTime> {
        fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .map_err(|e| Error::modified(&self.path, e))
    }

    fn open_append(&self) -> Result<Box<dyn Write>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        Ok(Box::new(file))
    }
}

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::Result;
use crate::models::Identity;

/// The single durable slot holding the signed-in identity.
///
/// An empty slot means nobody is signed in. Implementations must never store
/// credential material; they only ever see an [`Identity`].
pub trait SessionSlot {
    /// Reads the stored identity, if any.
    fn load(&self) -> Result<Option<Identity>>;
    /// Replaces the stored identity.
    fn save(&mut self, identity: &Identity) -> Result<()>;
    /// Empties the slot. Clearing an empty slot is not an error.
    fn clear(&mut self) -> Result<()>;
}

/// Session slot kept in a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSlot { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionSlot for FileSlot {
    /// Returns `None` if the file does not exist. A file that does not
    /// decode as an identity (bad JSON, not UTF-8) is logged and treated as
    /// an empty slot.
    fn load(&self) -> Result<Option<Identity>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&bytes) {
            Ok(identity) => Ok(Some(identity)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt session file");
                Ok(None)
            }
        }
    }

    /// Overwrites the existing file.
    fn save(&mut self, identity: &Identity) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let s = serde_json::to_string_pretty(identity)?;
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        f.write_all(s.as_bytes())?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Session slot held in memory, holding the serialized form so tests can
/// inspect exactly what would have been persisted.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    raw: Option<String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        MemorySlot::default()
    }

    /// The serialized identity currently in the slot.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl SessionSlot for MemorySlot {
    fn load(&self) -> Result<Option<Identity>> {
        match &self.raw {
            Some(s) => Ok(Some(serde_json::from_str(s)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, identity: &Identity) -> Result<()> {
        self.raw = Some(serde_json::to_string(identity)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.raw = None;
        Ok(())
    }
}

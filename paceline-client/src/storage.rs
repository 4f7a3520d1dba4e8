use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use paceline_core::error::{Error, Result};
use paceline_core::registry::Storage;

/// Stores each blob as a plain file under one directory.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> FileStorage {
        FileStorage { root: root.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage(e.to_string())),
        }
    }

    fn save(&mut self, key: &str, text: &str) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| Error::Storage(e.to_string()))?;
        fs::write(self.path(key), text).map_err(|e| Error::Storage(e.to_string()))
    }
}

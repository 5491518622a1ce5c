use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::{RecordStore, validate_key};

/// File extension of a child record.
pub const RECORD_EXTENSION: &str = "txt";

/// Record store backed by a directory tree: `<root>/<household>/<child>.txt`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory. Nothing is touched on
    /// disk until a household is created or a record is written.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn household_dir(&self, household: &str) -> Result<PathBuf> {
        validate_key("household", household)?;
        Ok(self.root.join(household))
    }

    fn record_path(&self, household: &str, child: &str) -> Result<PathBuf> {
        validate_key("child", child)?;
        Ok(self
            .household_dir(household)?
            .join(format!("{}.{}", child, RECORD_EXTENSION)))
    }
}

impl RecordStore for FileStore {
    fn list_child_records(&self, household: &str) -> Result<Vec<String>> {
        let dir = self.household_dir(household)?;
        if !dir.is_dir() {
            bail!("Household not found: {}", household);
        }

        let entries = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read household directory {}", dir.display()))?;

        let mut children = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to read entry in {}", dir.display()))?
                .path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                children.push(stem.to_string());
            }
        }

        children.sort();
        Ok(children)
    }

    fn read_record(&self, household: &str, child: &str) -> Result<Option<String>> {
        let path = self.record_path(household, child)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("Failed to read record {}", path.display()))
            }
        }
    }

    fn write_record(&self, household: &str, child: &str, contents: &str) -> Result<()> {
        let path = self.record_path(household, child)?;
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write record {}", path.display()))
    }

    fn create_household(&self, household: &str) -> Result<()> {
        let dir = self.household_dir(household)?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create household directory {}", dir.display()))
    }
}

//! Credential document storage
//!
//! Implements `FileStorage` in memory or under a directory on disk.
//! Both return URLs of the form `doctor-credentials/{path}`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use crate::core::ports::FileStorage;

/// Bucket name prefixed to every returned URL
pub const BUCKET: &str = "doctor-credentials";

fn url_for(path: &str) -> String {
    format!("{BUCKET}/{path}")
}

/// Reject empty, absolute and `..` paths
fn check_path(path: &str) -> anyhow::Result<()> {
    let parsed = Path::new(path);
    let valid = !path.is_empty()
        && parsed.components().all(|c| matches!(c, Component::Normal(_)));
    if !valid {
        anyhow::bail!("Invalid storage path: {path}");
    }
    Ok(())
}

/// Objects kept in a map
#[derive(Debug, Default)]
pub struct MemoryFileStorage {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryFileStorage {
    /// Create an empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths of every stored object, sorted
    pub fn paths(&self) -> anyhow::Result<Vec<String>> {
        let objects = self.objects.lock().map_err(|_| anyhow::anyhow!("Storage lock poisoned"))?;
        Ok(objects.keys().cloned().collect())
    }
}

impl FileStorage for MemoryFileStorage {
    fn upload(&self, path: &str, content: &[u8]) -> anyhow::Result<String> {
        check_path(path)?;
        let mut objects =
            self.objects.lock().map_err(|_| anyhow::anyhow!("Storage lock poisoned"))?;
        objects.insert(path.to_string(), content.to_vec());
        Ok(url_for(path))
    }

    fn download(&self, path: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let objects = self.objects.lock().map_err(|_| anyhow::anyhow!("Storage lock poisoned"))?;
        Ok(objects.get(path).cloned())
    }

    fn remove(&self, path: &str) -> anyhow::Result<()> {
        let mut objects =
            self.objects.lock().map_err(|_| anyhow::anyhow!("Storage lock poisoned"))?;
        objects.remove(path);
        Ok(())
    }
}

/// Objects written as files under a root directory
#[derive(Debug, Clone)]
pub struct DiskFileStorage {
    root: PathBuf,
}

impl DiskFileStorage {
    /// Store objects under `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> anyhow::Result<PathBuf> {
        check_path(path)?;
        Ok(self.root.join(path))
    }
}

impl FileStorage for DiskFileStorage {
    fn upload(&self, path: &str, content: &[u8]) -> anyhow::Result<String> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, content)?;
        log::debug!("Stored {} ({} bytes)", target.display(), content.len());
        Ok(url_for(path))
    }

    fn download(&self, path: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let target = self.resolve(path)?;
        if !target.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(target)?))
    }

    fn remove(&self, path: &str) -> anyhow::Result<()> {
        let target = self.resolve(path)?;
        if target.exists() {
            fs::remove_file(target)?;
        }
        Ok(())
    }
}

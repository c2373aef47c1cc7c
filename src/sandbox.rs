//! Sandbox directory management and artifact writers.
//!
//! All file operations the simulator performs are confined to one local
//! directory. Creation is idempotent; a path occupied by a non-directory is
//! a hard failure surfaced before any phase runs. Artifact writes are plain
//! whole-file writes: last write wins, no locking.

use crate::entropy::EntropySource;
use crate::model::Manifest;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// Create (or reuse) the sandbox directory.
    pub fn create(root: &Path) -> Result<Self> {
        if root.exists() && !root.is_dir() {
            bail!("{} exists and is not a directory", root.display());
        }
        fs::create_dir_all(root)
            .with_context(|| format!("failed to create environment directory {}", root.display()))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Binary filler image of exactly `kb` kilobytes of random bytes.
    pub fn write_image(&self, name: &str, kb: u64, entropy: &dyn EntropySource) -> Result<PathBuf> {
        let path = self.artifact_path(name);
        let buf = entropy.bytes((kb * 1024) as usize);
        fs::write(&path, buf).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn write_text(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.artifact_path(name);
        fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    /// One line of `len` lowercase hex characters followed by a newline.
    pub fn write_hex(
        &self,
        name: &str,
        len: usize,
        entropy: &dyn EntropySource,
    ) -> Result<PathBuf> {
        let path = self.artifact_path(name);
        let mut line = entropy.hex(len);
        line.push('\n');
        fs::write(&path, line).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn write_manifest(&self, name: &str, manifest: &Manifest) -> Result<PathBuf> {
        let path = self.artifact_path(name);
        let json = serde_json::to_string_pretty(manifest)?;
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    /// On-disk size of a previously written artifact.
    pub fn artifact_size(&self, name: &str) -> Result<u64> {
        let path = self.artifact_path(name);
        let meta = fs::metadata(&path)
            .with_context(|| format!("failed to stat {}", path.display()))?;
        Ok(meta.len())
    }
}

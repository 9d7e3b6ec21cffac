//! Sequential writer for a temp image file.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use super::TEMP_SUFFIX;

/// Writer for a uniquely named `.part` file that is renamed into place once complete.
///
/// Dropping the writer without `finalize` removes the temp file.
pub struct StorageWriter {
    file: NamedTempFile,
    written: u64,
}

impl StorageWriter {
    /// Create a new temp file in `dir` named after `final_name`
    /// (e.g. `42.png.a1B2c3.part`). Concurrent writers never share a file.
    pub fn create(dir: &Path, final_name: &str) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(&format!("{final_name}."))
            .suffix(TEMP_SUFFIX)
            .tempfile_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        Ok(StorageWriter { file, written: 0 })
    }

    /// Append `data` to the file.
    pub fn write_chunk(&mut self, data: &[u8]) -> Result<()> {
        self.file
            .write_all(data)
            .with_context(|| format!("storage write failed: {}", self.file.path().display()))?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Bytes written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Sync file data to disk. Call before `finalize` for durability.
    pub fn sync(&self) -> Result<()> {
        self.file.as_file().sync_all().context("storage sync failed")?;
        Ok(())
    }

    /// Atomically rename the temp file over `final_path`. Consumes the writer.
    /// On failure the temp file is removed. Fails if `final_path` is on a
    /// different filesystem.
    pub fn finalize(self, final_path: &Path) -> Result<()> {
        let temp_path = self.file.path().to_path_buf();
        self.file.persist(final_path).map_err(|e| {
            anyhow::Error::new(e.error).context(format!(
                "failed to rename {} to {}",
                temp_path.display(),
                final_path.display()
            ))
        })?;
        Ok(())
    }

    /// Close and delete the temp file, leaving any previous final file untouched.
    pub fn discard(self) {
        let temp_path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            tracing::debug!(path = %temp_path.display(), "could not remove temp file: {}", e);
        }
    }
}

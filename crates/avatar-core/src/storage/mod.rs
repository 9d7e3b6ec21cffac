//! Profile image files on disk.
//!
//! Each user has at most one file per extension, `<upload_dir>/<user_id>.<ext>`.
//! Writes go to a uniquely named `<user_id>.<ext>.*.part` file and are renamed
//! into place only once the whole body arrived, so a failed fetch never
//! clobbers the previous image and concurrent uploads never share a temp file.

mod writer;

pub use writer::StorageWriter;

use std::path::PathBuf;

use crate::config::AvatarConfig;
use crate::fetcher::{ByteStream, FetchError};
use crate::user_db::UserId;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Leftover `.part` files in `dir`.
#[cfg(test)]
pub(crate) fn temp_files(dir: &std::path::Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|e| e.path())
                .filter(|p| p.to_string_lossy().ends_with(TEMP_SUFFIX))
                .collect()
        })
        .unwrap_or_default()
}

/// A fully written image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub path: PathBuf,
    /// Path served to clients, stored on the user record.
    pub public_ref: String,
    pub bytes: u64,
}

/// Why streaming an image to disk stopped.
#[derive(Debug, thiserror::Error)]
pub enum WriteFailure {
    /// The body stream failed or was empty; the caller falls back.
    #[error(transparent)]
    Fetch(FetchError),
    /// Local I/O failed; fatal for the request.
    #[error("{0:#}")]
    Storage(anyhow::Error),
}

/// Upload directory plus the public prefix it is served under.
#[derive(Debug, Clone)]
pub struct ImageStore {
    upload_dir: PathBuf,
    public_prefix: String,
}

impl ImageStore {
    pub fn new(upload_dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            public_prefix: public_prefix.into(),
        }
    }

    pub fn from_config(cfg: &AvatarConfig) -> Self {
        Self::new(cfg.upload_dir.clone(), cfg.public_prefix.clone())
    }

    pub fn file_name(user_id: UserId, ext: &str) -> String {
        format!("{user_id}.{ext}")
    }

    pub fn path_for(&self, user_id: UserId, ext: &str) -> PathBuf {
        self.upload_dir.join(Self::file_name(user_id, ext))
    }

    pub fn public_ref(&self, user_id: UserId, ext: &str) -> String {
        format!(
            "{}/{}",
            self.public_prefix.trim_end_matches('/'),
            Self::file_name(user_id, ext)
        )
    }

    /// Stream `body` into `<user_id>.<ext>`, replacing any previous file of that name.
    ///
    /// Blocking; run from `spawn_blocking` in async code. On any failure the
    /// temp file is removed and the existing final file is left alone.
    pub fn write_stream(
        &self,
        user_id: UserId,
        ext: &str,
        body: ByteStream,
    ) -> Result<StoredImage, WriteFailure> {
        std::fs::create_dir_all(&self.upload_dir)
            .map_err(|e| {
                anyhow::Error::new(e)
                    .context(format!("create upload dir: {}", self.upload_dir.display()))
            })
            .map_err(WriteFailure::Storage)?;

        let final_path = self.path_for(user_id, ext);
        let mut writer = StorageWriter::create(&self.upload_dir, &Self::file_name(user_id, ext))
            .map_err(WriteFailure::Storage)?;

        for chunk in body {
            let chunk = match chunk {
                Ok(c) => c,
                Err(e) => {
                    writer.discard();
                    return Err(WriteFailure::Fetch(e));
                }
            };
            if let Err(e) = writer.write_chunk(&chunk) {
                writer.discard();
                return Err(WriteFailure::Storage(e));
            }
        }

        let bytes = writer.written();
        if bytes == 0 {
            writer.discard();
            return Err(WriteFailure::Fetch(FetchError::BadResponse(
                "empty body".to_string(),
            )));
        }
        if let Err(e) = writer.sync() {
            writer.discard();
            return Err(WriteFailure::Storage(e));
        }
        writer.finalize(&final_path).map_err(WriteFailure::Storage)?;

        tracing::debug!(path = %final_path.display(), bytes, "stored profile image");
        Ok(StoredImage {
            path: final_path,
            public_ref: self.public_ref(user_id, ext),
            bytes,
        })
    }
}

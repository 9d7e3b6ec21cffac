//! Store a fetched image and point the user record at it.
//!
//! Two failure tiers:
//!
//! - fetch failures (no stream, or the stream broke while writing) fall back to
//!   storing the raw URL on the user record and logging a warning;
//! - storage and record failures are returned as [`PersistError`].

use std::path::PathBuf;

use crate::fetcher::{ByteStream, FetchError};
use crate::storage::{ImageStore, WriteFailure};
use crate::url_model::image_extension;
use crate::user_db::{UserDb, UserId};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fatal failure while storing the image or updating the user record.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to store profile image at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
    #[error("failed to update profile image for user {user_id}: {source}")]
    Record {
        user_id: UserId,
        #[source]
        source: BoxError,
    },
    #[error("user {0} not found")]
    UserNotFound(UserId),
}

/// Which path a successful persist took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Image written locally; `public_ref` is now on the user record.
    Stored { path: PathBuf, public_ref: String },
    /// Fetch failed; the raw URL is now on the user record.
    LinkedDirectly { url: String },
}

impl PersistOutcome {
    /// The value written to the user's `profile_image`.
    pub fn profile_image(&self) -> &str {
        match self {
            PersistOutcome::Stored { public_ref, .. } => public_ref,
            PersistOutcome::LinkedDirectly { url } => url,
        }
    }
}

/// Writes fetched images through [`ImageStore`] and records them in [`UserDb`].
#[derive(Clone)]
pub struct Persister {
    store: ImageStore,
    db: UserDb,
}

impl Persister {
    pub fn new(store: ImageStore, db: UserDb) -> Self {
        Self { store, db }
    }

    pub fn db(&self) -> &UserDb {
        &self.db
    }

    /// Persist the outcome of fetching `original_url` for `user_id`.
    ///
    /// `fetched` is the fetcher's result: a body to store, or the reason there
    /// is none.
    pub async fn persist(
        &self,
        user_id: UserId,
        original_url: &str,
        fetched: Result<ByteStream, FetchError>,
    ) -> Result<PersistOutcome, PersistError> {
        let body = match fetched {
            Ok(body) => body,
            Err(e) => return self.link_directly(user_id, original_url, &e).await,
        };

        let ext = image_extension(original_url);
        let store = self.store.clone();
        let written = tokio::task::spawn_blocking(move || store.write_stream(user_id, ext, body))
            .await
            .unwrap_or_else(|e| {
                Err(WriteFailure::Storage(anyhow::anyhow!("image write task failed: {}", e)))
            });

        let stored = match written {
            Ok(stored) => stored,
            Err(WriteFailure::Fetch(e)) => {
                return self.link_directly(user_id, original_url, &e).await
            }
            Err(WriteFailure::Storage(e)) => {
                return Err(PersistError::Storage {
                    path: self.store.path_for(user_id, ext),
                    source: e.into(),
                })
            }
        };

        self.update_record(user_id, &stored.public_ref).await?;
        tracing::info!(
            user_id,
            path = %stored.path.display(),
            bytes = stored.bytes,
            "profile image stored"
        );
        Ok(PersistOutcome::Stored {
            path: stored.path,
            public_ref: stored.public_ref,
        })
    }

    /// Fallback: reference the remote image directly.
    async fn link_directly(
        &self,
        user_id: UserId,
        original_url: &str,
        cause: &FetchError,
    ) -> Result<PersistOutcome, PersistError> {
        self.update_record(user_id, original_url).await?;
        tracing::warn!(
            user_id,
            "Error retrieving user profile image: {}; using image link directly",
            cause
        );
        Ok(PersistOutcome::LinkedDirectly {
            url: original_url.to_string(),
        })
    }

    async fn update_record(&self, user_id: UserId, image_ref: &str) -> Result<(), PersistError> {
        let found = self
            .db
            .set_profile_image(user_id, image_ref)
            .await
            .map_err(|e| PersistError::Record {
                user_id,
                source: e.into(),
            })?;
        if !found {
            return Err(PersistError::UserNotFound(user_id));
        }
        Ok(())
    }
}

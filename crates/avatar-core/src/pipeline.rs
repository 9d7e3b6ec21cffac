//! Set a user's profile image from a remote URL: validate, fetch, persist.

use std::sync::Arc;

use crate::allow_list::AllowList;
use crate::fetcher::{Fetch, FetchError};
use crate::logging::SECURITY_TARGET;
use crate::persist::{PersistError, PersistOutcome, Persister};
use crate::user_db::UserId;
use crate::validate::{validate, ValidationError};

/// One "set my profile image to this URL" request.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    /// Candidate image URL exactly as submitted.
    pub raw_url: String,
    /// Caller's user id, if the session lookup recognised them.
    pub requester: Option<UserId>,
    /// Caller's network origin, for the security log.
    pub origin: Option<String>,
}

impl ImageRequest {
    pub fn new(raw_url: impl Into<String>, requester: Option<UserId>) -> Self {
        Self {
            raw_url: raw_url.into(),
            requester,
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// Errors surfaced to the caller. Fetch failures never appear here.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// The profile-image-from-URL pipeline with its collaborators.
#[derive(Clone)]
pub struct ProfileImageService {
    allow_list: AllowList,
    fetcher: Arc<dyn Fetch>,
    persister: Persister,
}

impl ProfileImageService {
    pub fn new(allow_list: AllowList, fetcher: Arc<dyn Fetch>, persister: Persister) -> Self {
        Self {
            allow_list,
            fetcher,
            persister,
        }
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    pub fn persister(&self) -> &Persister {
        &self.persister
    }

    /// Run the pipeline for one request.
    ///
    /// No network request is made unless validation passes. A failed fetch
    /// still succeeds, with the raw URL stored on the user record.
    pub async fn set_from_url(&self, req: &ImageRequest) -> Result<PersistOutcome, UploadError> {
        let target = match validate(&req.raw_url, &self.allow_list, req.requester.is_some()) {
            Ok(target) => target,
            Err(e) if e.is_security_event() => {
                let origin = req.origin.as_deref().unwrap_or("unknown");
                tracing::error!(
                    target: SECURITY_TARGET,
                    origin,
                    url = %req.raw_url,
                    "Blocked illegal activity by {}",
                    origin
                );
                return Err(e.into());
            }
            Err(e) => {
                tracing::debug!(url = %req.raw_url, "rejected image url: {}", e);
                return Err(e.into());
            }
        };
        let Some(user_id) = req.requester else {
            return Err(ValidationError::Unauthorized.into());
        };

        tracing::debug!(user_id, url = %target, "fetching profile image");
        let fetcher = Arc::clone(&self.fetcher);
        let fetched = tokio::task::spawn_blocking(move || fetcher.fetch(&target))
            .await
            .unwrap_or_else(|e| Err(FetchError::Transport(format!("fetch task failed: {e}"))));

        let outcome = self
            .persister
            .persist(user_id, &req.raw_url, fetched)
            .await?;
        Ok(outcome)
    }
}

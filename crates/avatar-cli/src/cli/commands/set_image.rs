//! `avatar set-image <url>` – run the fetch pipeline for the session's user.

use anyhow::Result;
use avatar_core::config::AvatarConfig;
use avatar_core::storage::ImageStore;
use avatar_core::user_db::UserDb;
use avatar_core::{CurlFetcher, ImageRequest, PersistOutcome, Persister, ProfileImageService};
use std::path::Path;
use std::sync::Arc;

pub async fn run_set_image(
    db: &UserDb,
    cfg: &AvatarConfig,
    url: &str,
    token: Option<&str>,
    origin: Option<String>,
    upload_dir: Option<&Path>,
) -> Result<()> {
    let requester = match token {
        Some(t) => db.user_for_token(t).await?,
        None => None,
    };

    let store = match upload_dir {
        Some(dir) => ImageStore::new(dir, cfg.public_prefix.clone()),
        None => ImageStore::from_config(cfg),
    };
    let fetcher = Arc::new(CurlFetcher::new(&cfg.fetch_config()));
    let service = ProfileImageService::new(
        cfg.allow_list(),
        fetcher,
        Persister::new(store, db.clone()),
    );

    let mut request = ImageRequest::new(url, requester);
    request.origin = origin;
    match service.set_from_url(&request).await? {
        PersistOutcome::Stored { path, public_ref } => {
            println!("Stored {} as {}", path.display(), public_ref);
        }
        PersistOutcome::LinkedDirectly { url } => {
            println!("Could not fetch image; linked directly to {url}");
        }
    }
    Ok(())
}

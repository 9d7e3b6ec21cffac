//! `avatar add-session <user-id> <token>` – bind a session token to a user.

use anyhow::{bail, Result};
use avatar_core::user_db::UserDb;

pub async fn run_add_session(db: &UserDb, user_id: i64, token: &str) -> Result<()> {
    if token.trim().is_empty() {
        bail!("session token must not be empty");
    }
    if db.get_user(user_id).await?.is_none() {
        bail!("user {user_id} not found");
    }
    db.add_session(user_id, token).await?;
    println!("Session added for user {user_id}");
    Ok(())
}

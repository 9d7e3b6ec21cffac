//! `avatar remove-session <token>` – forget a session token.

use anyhow::{bail, Result};
use avatar_core::user_db::UserDb;

pub async fn run_remove_session(db: &UserDb, token: &str) -> Result<()> {
    if !db.remove_session(token).await? {
        bail!("unknown session token");
    }
    println!("Session removed");
    Ok(())
}

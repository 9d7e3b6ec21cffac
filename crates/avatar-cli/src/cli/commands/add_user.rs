//! `avatar add-user <email>` – create a user.

use anyhow::Result;
use avatar_core::user_db::UserDb;

pub async fn run_add_user(db: &UserDb, email: &str) -> Result<()> {
    let id = db.add_user(email).await?;
    println!("Added user {id} <{email}>");
    Ok(())
}

//! `avatar show <id>` – print one user's record.

use anyhow::{bail, Result};
use avatar_core::user_db::UserDb;

pub async fn run_show(db: &UserDb, id: i64) -> Result<()> {
    let Some(user) = db.get_user(id).await? else {
        bail!("user {id} not found");
    };
    println!("id:            {}", user.id);
    println!("email:         {}", user.email);
    println!(
        "profile image: {}",
        user.profile_image.as_deref().unwrap_or("-")
    );
    Ok(())
}

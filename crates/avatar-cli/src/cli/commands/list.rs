//! `avatar list` – show all users.

use anyhow::Result;
use avatar_core::user_db::UserDb;

pub async fn run_list(db: &UserDb) -> Result<()> {
    let users = db.list_users().await?;
    if users.is_empty() {
        println!("No users in database.");
    } else {
        println!("{:<6} {:<30} {}", "ID", "EMAIL", "PROFILE IMAGE");
        for u in users {
            println!(
                "{:<6} {:<30} {}",
                u.id,
                u.email,
                u.profile_image.as_deref().unwrap_or("-")
            );
        }
    }
    Ok(())
}

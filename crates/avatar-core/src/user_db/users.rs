//! User record operations: add, get, list, profile image update.

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::db::{unix_timestamp, UserDb};
use super::types::{UserId, UserProfile};

fn profile_from_row(row: &SqliteRow) -> UserProfile {
    UserProfile {
        id: row.get("id"),
        email: row.get("email"),
        profile_image: row.get("profile_image"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl UserDb {
    /// Insert a new user with no profile image.
    pub async fn add_user(&self, email: &str) -> Result<UserId> {
        let now = unix_timestamp();
        let id = sqlx::query(
            r#"
            INSERT INTO users (email, profile_image, created_at, updated_at)
            VALUES (?1, NULL, ?2, ?3)
            "#,
        )
        .bind(email)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        Ok(id)
    }

    /// Fetch a single user by id.
    pub async fn get_user(&self, id: UserId) -> Result<Option<UserProfile>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, profile_image, created_at, updated_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(profile_from_row))
    }

    /// List all users, oldest first.
    pub async fn list_users(&self) -> Result<Vec<UserProfile>> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, profile_image, created_at, updated_at
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(profile_from_row).collect())
    }

    /// Set `profile_image` for a user. Returns false if no such user exists.
    pub async fn set_profile_image(&self, id: UserId, image_ref: &str) -> Result<bool> {
        let now = unix_timestamp();
        let affected = sqlx::query(
            r#"
            UPDATE users
            SET profile_image = ?1,
                updated_at = ?2
            WHERE id = ?3
            "#,
        )
        .bind(image_ref)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(affected > 0)
    }
}

//! Session tokens: the authentication lookup the pipeline consumes.

use anyhow::Result;
use sqlx::Row;

use super::db::{unix_timestamp, UserDb};
use super::types::UserId;

impl UserDb {
    /// Bind `token` to `user_id`, replacing any previous binding of that token.
    pub async fn add_session(&self, user_id: UserId, token: &str) -> Result<()> {
        let now = unix_timestamp();
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO sessions (token, user_id, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// The authenticated user for a session token, if any.
    pub async fn user_for_token(&self, token: &str) -> Result<Option<UserId>> {
        let row = sqlx::query(
            r#"
            SELECT s.user_id AS user_id
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = ?1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.get("user_id")))
    }

    /// Forget a token. Returns false if it was not known.
    pub async fn remove_session(&self, token: &str) -> Result<bool> {
        let affected = sqlx::query(r#"DELETE FROM sessions WHERE token = ?1"#)
            .bind(token)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

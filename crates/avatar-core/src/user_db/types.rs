//! Types used by the user database.

/// User identifier.
pub type UserId = i64;

/// Stored user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    /// Either a public path to a stored upload or a raw external URL.
    pub profile_image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

//! User and session store (SQLite via sqlx).
//!
//! Backs the two collaborators the image pipeline needs: session lookup
//! (who is calling) and the user record's `profile_image` field.

mod db;
mod sessions;
mod types;
mod users;


pub use db::UserDb;
#[cfg(test)]
pub(crate) use db::open_memory;
pub use types::*;

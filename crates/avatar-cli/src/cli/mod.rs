//! CLI for the avatar profile image tool.

mod commands;

use anyhow::Result;
use avatar_core::config;
use avatar_core::user_db::UserDb;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{
    run_add_session, run_add_user, run_hosts, run_list, run_remove_session, run_set_image,
    run_show,
};

/// Top-level CLI for the avatar tool.
#[derive(Debug, Parser)]
#[command(name = "avatar")]
#[command(about = "Set profile images from remote URLs, with SSRF checks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Create a user.
    AddUser {
        /// Unique email address.
        email: String,
    },

    /// Bind a session token to a user.
    AddSession {
        /// User identifier.
        user_id: i64,
        /// Opaque session token (e.g. a cookie value).
        token: String,
    },

    /// Forget a session token.
    RemoveSession {
        /// Session token previously bound with add-session.
        token: String,
    },

    /// Fetch an image URL and make it the caller's profile image.
    SetImage {
        /// Candidate image URL (http/https, allow-listed host).
        url: String,
        /// Session token of the caller. Without it the request is unauthenticated.
        #[arg(long)]
        token: Option<String>,
        /// Network origin of the caller, recorded on blocked attempts.
        #[arg(long)]
        origin: Option<String>,
        /// Store images here instead of the configured upload_dir.
        #[arg(long, value_name = "DIR")]
        upload_dir: Option<PathBuf>,
    },

    /// Show one user's record.
    Show {
        /// User identifier.
        id: i64,
    },

    /// List all users.
    List,

    /// Print the configured image host allow-list.
    Hosts,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::AddUser { email } => {
                let db = UserDb::open_default().await?;
                run_add_user(&db, &email).await?
            }
            CliCommand::AddSession { user_id, token } => {
                let db = UserDb::open_default().await?;
                run_add_session(&db, user_id, &token).await?
            }
            CliCommand::RemoveSession { token } => {
                let db = UserDb::open_default().await?;
                run_remove_session(&db, &token).await?
            }
            CliCommand::SetImage {
                url,
                token,
                origin,
                upload_dir,
            } => {
                let db = UserDb::open_default().await?;
                run_set_image(
                    &db,
                    &cfg,
                    &url,
                    token.as_deref(),
                    origin,
                    upload_dir.as_deref(),
                )
                .await?
            }
            CliCommand::Show { id } => run_show(&UserDb::open_default().await?, id).await?,
            CliCommand::List => run_list(&UserDb::open_default().await?).await?,
            CliCommand::Hosts => run_hosts(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

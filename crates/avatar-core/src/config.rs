use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::allow_list::AllowList;

/// Outbound fetch limits (optional `[fetch]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole transfer, headers and body included.
    pub timeout_secs: u64,
    /// Largest accepted response body in bytes (None = no cap).
    #[serde(default)]
    pub max_bytes: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            timeout_secs: 30,
            max_bytes: Some(5 * 1024 * 1024),
        }
    }
}

impl FetchConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Global configuration loaded from `~/.config/avatar/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Hostnames the server may fetch profile images from. Matched exactly.
    pub allowed_hosts: Vec<String>,
    /// Directory fetched images are written to (`<user_id>.<ext>`).
    pub upload_dir: PathBuf,
    /// Public path prefix stored on the user record for fetched images.
    pub public_prefix: String,
    /// Optional fetch limits; if missing, built-in defaults are used.
    #[serde(default)]
    pub fetch: Option<FetchConfig>,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            allowed_hosts: vec![
                "images.example.com".to_string(),
                "cdn.example.net".to_string(),
            ],
            upload_dir: PathBuf::from("frontend/dist/frontend/assets/public/images/uploads"),
            public_prefix: "/assets/public/images/uploads".to_string(),
            fetch: None,
        }
    }
}

impl AvatarConfig {
    /// Build the immutable allow-list handed to the validator.
    pub fn allow_list(&self) -> AllowList {
        AllowList::new(self.allowed_hosts.iter().cloned())
    }

    /// Fetch limits, falling back to defaults when the section is absent.
    pub fn fetch_config(&self) -> FetchConfig {
        self.fetch.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("avatar")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AvatarConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = AvatarConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: AvatarConfig = toml::from_str(&data)?;
    Ok(cfg)
}

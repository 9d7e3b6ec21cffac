//! `avatar hosts` – print the image host allow-list.

use anyhow::Result;
use avatar_core::config::AvatarConfig;

pub fn run_hosts(cfg: &AvatarConfig) -> Result<()> {
    let list = cfg.allow_list();
    if list.is_empty() {
        println!("No image hosts allowed; every remote fetch will be rejected.");
    }
    for host in list.iter() {
        println!("{host}");
    }
    Ok(())
}

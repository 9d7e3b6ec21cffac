//! Tests for the set-image subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_set_image_minimal() {
    match parse(&["avatar", "set-image", "http://images.example.com/pic.png"]) {
        CliCommand::SetImage {
            url,
            token,
            origin,
            upload_dir,
        } => {
            assert_eq!(url, "http://images.example.com/pic.png");
            assert!(token.is_none());
            assert!(origin.is_none());
            assert!(upload_dir.is_none());
        }
        _ => panic!("expected SetImage"),
    }
}

#[test]
fn cli_parse_set_image_all_flags() {
    match parse(&[
        "avatar",
        "set-image",
        "https://cdn.example.net/a.gif",
        "--token",
        "abc",
        "--origin",
        "10.1.2.3:4000",
        "--upload-dir",
        "/tmp/uploads",
    ]) {
        CliCommand::SetImage {
            url,
            token,
            origin,
            upload_dir,
        } => {
            assert_eq!(url, "https://cdn.example.net/a.gif");
            assert_eq!(token.as_deref(), Some("abc"));
            assert_eq!(origin.as_deref(), Some("10.1.2.3:4000"));
            assert_eq!(
                upload_dir.as_deref(),
                Some(std::path::Path::new("/tmp/uploads"))
            );
        }
        _ => panic!("expected SetImage with flags"),
    }
}

#[test]
fn cli_parse_set_image_requires_url() {
    assert!(Cli::try_parse_from(["avatar", "set-image"]).is_err());
}

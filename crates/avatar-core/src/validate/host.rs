//! IP-literal host detection.

use url::{Host, Url};

/// True if the URL's host is an IP address rather than a name.
///
/// Covers IPv4 (including numeric forms the parser folds into IPv4, such as
/// `0x7f.1` or `2130706433`), bracketed IPv6, and any host spelled only with
/// digits and dots.
pub fn is_literal_address(url: &Url) -> bool {
    match url.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        Some(Host::Domain(name)) => is_dotted_numeric(name) || is_bracketed_v6(name),
        None => false,
    }
}

fn is_dotted_numeric(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}

fn is_bracketed_v6(name: &str) -> bool {
    let Some(inner) = name.strip_prefix('[').and_then(|s| s.strip_suffix(']')) else {
        return false;
    };
    !inner.is_empty() && inner.bytes().all(|b| b.is_ascii_hexdigit() || b == b':')
}

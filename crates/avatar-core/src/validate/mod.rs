//! Target URL validation (SSRF mitigation).
//!
//! Decides whether the server may issue a request to an attacker-supplied URL.
//! Checks run cheapest and structural first, authorization last, so malformed
//! input never reaches the allow-list:
//!
//! 1. absolute URL
//! 2. scheme `http` / `https`
//! 3. effective port 80 or 443
//! 4. host is a name, not an IP literal
//! 5. caller is authenticated
//! 6. host is on the allow-list
//!
//! The allow-list applies to the hostname as written. Resolution happens later
//! in the fetcher, so a name that resolves to an internal address is not caught
//! here.

mod error;
mod host;
mod target;

pub use error::ValidationError;
pub use host::is_literal_address;
pub use target::ParsedTarget;

use crate::allow_list::AllowList;
use url::Url;

const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];
const ALLOWED_PORTS: [u16; 2] = [80, 443];

/// Validate `raw_url` as a profile image source for a caller.
///
/// Returns the parsed target only when every check passes.
pub fn validate(
    raw_url: &str,
    allow_list: &AllowList,
    is_authenticated: bool,
) -> Result<ParsedTarget, ValidationError> {
    let url = Url::parse(raw_url).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;

    let scheme = url.scheme();
    if !ALLOWED_SCHEMES.contains(&scheme) {
        return Err(ValidationError::UnsupportedScheme(scheme.to_string()));
    }

    let hostname = match url.host_str() {
        Some(h) if !h.is_empty() => h.to_string(),
        _ => return Err(ValidationError::InvalidUrl("URL has no host".to_string())),
    };

    // Both allowed schemes have a known default, so this is always Some.
    let port = url
        .port_or_known_default()
        .ok_or_else(|| ValidationError::InvalidUrl("URL has no port".to_string()))?;
    if !ALLOWED_PORTS.contains(&port) {
        return Err(ValidationError::UnsupportedPort(port));
    }

    if is_literal_address(&url) {
        return Err(ValidationError::LiteralAddressNotAllowed);
    }

    if !is_authenticated {
        return Err(ValidationError::Unauthorized);
    }

    if !allow_list.contains(&hostname) {
        return Err(ValidationError::HostNotAllowed(hostname));
    }

    Ok(ParsedTarget::new_unchecked(url, hostname, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts() -> AllowList {
        AllowList::new(["images.example.com", "cdn.example.net"])
    }

    fn check(raw: &str) -> Result<ParsedTarget, ValidationError> {
        validate(raw, &hosts(), true)
    }

    #[test]
    fn non_urls_are_invalid() {
        for raw in [
            "",
            "not a url",
            "/relative/path.png",
            "images.example.com/pic.png",
            "http://",
            "https://exa mple.com/",
        ] {
            assert!(
                matches!(check(raw), Err(ValidationError::InvalidUrl(_))),
                "{raw:?} should be InvalidUrl"
            );
        }
    }

    #[test]
    fn only_ascii_whitespace_is_stripped() {
        assert_eq!(
            check("  http://images.example.com/a.png\n").unwrap().as_str(),
            "http://images.example.com/a.png"
        );
        for raw in [
            "\u{a0}http://images.example.com/a.png",
            "\u{2003}https://images.example.com/a.png",
        ] {
            assert!(
                matches!(check(raw), Err(ValidationError::InvalidUrl(_))),
                "{raw:?} should be InvalidUrl"
            );
        }
    }

    #[test]
    fn non_http_schemes_rejected() {
        for raw in [
            "ftp://images.example.com/pic.png",
            "file:///etc/passwd",
            "gopher://images.example.com/",
            "javascript:alert(1)",
            "data:image/png;base64,AAAA",
            "httpx://images.example.com/pic.png",
        ] {
            assert!(
                matches!(check(raw), Err(ValidationError::UnsupportedScheme(_))),
                "{raw:?} should be UnsupportedScheme"
            );
        }
        assert_eq!(
            check("ftp://images.example.com/pic.png").unwrap_err(),
            ValidationError::UnsupportedScheme("ftp".to_string())
        );
    }

    #[test]
    fn explicit_ports_outside_80_443_rejected() {
        assert_eq!(
            check("http://images.example.com:8080/pic.png").unwrap_err(),
            ValidationError::UnsupportedPort(8080)
        );
        assert_eq!(
            check("https://images.example.com:22/").unwrap_err(),
            ValidationError::UnsupportedPort(22)
        );
        assert_eq!(
            check("http://images.example.com:0/").unwrap_err(),
            ValidationError::UnsupportedPort(0)
        );
    }

    #[test]
    fn default_and_swapped_standard_ports_pass() {
        assert_eq!(check("http://images.example.com/a.png").unwrap().port(), 80);
        assert_eq!(check("https://images.example.com/a.png").unwrap().port(), 443);
        assert_eq!(check("http://images.example.com:80/a.png").unwrap().port(), 80);
        assert_eq!(check("http://images.example.com:443/a.png").unwrap().port(), 443);
        assert_eq!(check("https://images.example.com:80/a.png").unwrap().port(), 80);
    }

    #[test]
    fn literal_addresses_rejected_even_when_allow_listed() {
        let list = AllowList::new(["127.0.0.1", "[::1]", "::1", "169.254.169.254"]);
        for raw in [
            "http://127.0.0.1/x.jpg",
            "http://169.254.169.254/latest/meta-data/",
            "http://[::1]/x.jpg",
            "https://[fe80::1]/x.jpg",
            "http://0x7f.1/x.jpg",
            "http://2130706433/x.jpg",
            "http://10.0.0.1:443/x.jpg",
        ] {
            assert_eq!(
                validate(raw, &list, true).unwrap_err(),
                ValidationError::LiteralAddressNotAllowed,
                "{raw:?}"
            );
        }
    }

    #[test]
    fn unauthenticated_rejected_for_any_well_formed_url() {
        for raw in [
            "http://images.example.com/pic.png",
            "https://evil.internal/x.jpg",
        ] {
            let err = validate(raw, &hosts(), false).unwrap_err();
            assert_eq!(err, ValidationError::Unauthorized, "{raw:?}");
            assert!(err.is_security_event());
        }
    }

    #[test]
    fn structural_checks_run_before_auth_gate() {
        assert!(matches!(
            validate("nope", &hosts(), false),
            Err(ValidationError::InvalidUrl(_))
        ));
        assert_eq!(
            validate("http://127.0.0.1/x.jpg", &hosts(), false).unwrap_err(),
            ValidationError::LiteralAddressNotAllowed
        );
    }

    #[test]
    fn hosts_off_the_list_rejected() {
        assert_eq!(
            check("http://evil.internal/x.jpg").unwrap_err(),
            ValidationError::HostNotAllowed("evil.internal".to_string())
        );
        assert_eq!(
            check("http://images.example.com.evil.test/x.jpg").unwrap_err(),
            ValidationError::HostNotAllowed("images.example.com.evil.test".to_string())
        );
        assert_eq!(
            check("http://images.example.com@evil.test/x.jpg").unwrap_err(),
            ValidationError::HostNotAllowed("evil.test".to_string())
        );
        assert_eq!(
            check("http://localhost/x.jpg").unwrap_err(),
            ValidationError::HostNotAllowed("localhost".to_string())
        );
    }

    #[test]
    fn empty_allow_list_rejects_everything() {
        let err = validate("http://images.example.com/a.png", &AllowList::default(), true)
            .unwrap_err();
        assert!(matches!(err, ValidationError::HostNotAllowed(_)));
    }

    #[test]
    fn accepted_target_fields() {
        let t = check("http://images.example.com/pic.PNG").unwrap();
        assert_eq!(t.scheme(), "http");
        assert_eq!(t.hostname(), "images.example.com");
        assert_eq!(t.port(), 80);
        assert_eq!(t.path(), "/pic.PNG");
        assert_eq!(t.as_str(), "http://images.example.com/pic.PNG");
    }

    #[test]
    fn hostname_compared_after_normalisation() {
        let t = check("HTTPS://IMAGES.Example.COM/a.gif").unwrap();
        assert_eq!(t.scheme(), "https");
        assert_eq!(t.hostname(), "images.example.com");
    }
}

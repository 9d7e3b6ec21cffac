//! Validated fetch target.

use std::fmt;
use url::Url;

/// A URL that passed every validator check and may be fetched.
///
/// Only [`validate`](super::validate) constructs one, so holding a
/// `ParsedTarget` means the scheme, port, host shape and allow-list checks
/// already ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTarget {
    url: Url,
    hostname: String,
    port: u16,
}

impl ParsedTarget {
    /// Wrap a URL without running the checks. Callers must have validated it.
    pub(crate) fn new_unchecked(url: Url, hostname: String, port: u16) -> Self {
        Self {
            url,
            hostname,
            port,
        }
    }

    /// Test helper: build a target for an arbitrary URL (e.g. a local test server).
    #[cfg(test)]
    pub(crate) fn for_test(raw: &str) -> Self {
        let url = Url::parse(raw).unwrap();
        let hostname = url.host_str().unwrap().to_string();
        let port = url.port_or_known_default().unwrap();
        Self::new_unchecked(url, hostname, port)
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Effective port (explicit, or the scheme default).
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for ParsedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

//! Immutable set of hostnames the server may fetch profile images from.

use std::collections::BTreeSet;
use std::sync::Arc;

/// Permitted image hosts, built once at startup and shared read-only.
///
/// Membership is an exact, case-sensitive string match against the hostname
/// as the URL parser normalises it. Cloning is cheap (shared `Arc`).
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    hosts: Arc<BTreeSet<String>>,
}

impl AllowList {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hosts = hosts
            .into_iter()
            .map(Into::<String>::into)
            .filter(|h| !h.is_empty())
            .collect();
        Self {
            hosts: Arc::new(hosts),
        }
    }

    pub fn contains(&self, host: &str) -> bool {
        self.hosts.contains(host)
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Hosts in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(String::as_str)
    }
}

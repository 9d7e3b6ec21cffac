//! Error type for target URL validation.

/// Why a candidate image URL was rejected before any network access.
///
/// Every variant is terminal for the request; none is retried or downgraded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Not an absolute URL with a host.
    #[error("invalid imageUrl parameter: {0}")]
    InvalidUrl(String),
    /// Scheme other than `http` / `https`.
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    /// Effective port other than 80 or 443.
    #[error("unsupported port for imageUrl: {0}")]
    UnsupportedPort(u16),
    /// Host is an IPv4/IPv6 literal rather than a name.
    #[error("direct IP addresses are not allowed for imageUrl")]
    LiteralAddressNotAllowed,
    /// Caller is not logged in. Treated as a security event by the pipeline.
    #[error("blocked unauthenticated image fetch")]
    Unauthorized,
    /// Hostname is not on the configured allow-list.
    #[error("unauthorized image hosting provider: {0}")]
    HostNotAllowed(String),
}

impl ValidationError {
    /// True for the unauthenticated case, which callers log as a security event.
    pub fn is_security_event(&self) -> bool {
        matches!(self, ValidationError::Unauthorized)
    }
}

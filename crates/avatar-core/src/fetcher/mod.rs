//! Outbound GET of a validated image URL.
//!
//! [`Fetch`] is the seam the pipeline calls through; [`CurlFetcher`] is the
//! libcurl implementation. A successful fetch yields a [`ByteStream`]: lazy,
//! finite and readable once. Nothing here retries.

mod client;
mod head;
#[cfg(test)]
mod test_server;

pub use client::CurlFetcher;
pub use head::{is_success, parse_status_line};

use crate::validate::ParsedTarget;

/// Why a fetch produced no usable body. Recovered by the persister's fallback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Non-2xx status (redirects included) or an empty body.
    #[error("url returned a non-OK status code or an empty body: {0}")]
    BadResponse(String),
    /// Connection, DNS, TLS, timeout, or a transfer cut short.
    #[error("transport error: {0}")]
    Transport(String),
    /// Body exceeded the configured size cap.
    #[error("response body larger than {limit} bytes")]
    TooLarge { limit: u64 },
}

/// Issues a single GET for a target the validator approved.
///
/// Blocking; call from `spawn_blocking` when used from async code.
pub trait Fetch: Send + Sync {
    fn fetch(&self, target: &ParsedTarget) -> Result<ByteStream, FetchError>;
}

type Chunks = Box<dyn Iterator<Item = Result<Vec<u8>, FetchError>> + Send>;

/// Response body as a sequence of chunks. Not restartable.
///
/// An `Err` item means the transfer failed part-way; no items follow it.
pub struct ByteStream {
    chunks: Chunks,
}

impl ByteStream {
    pub fn new<I>(chunks: I) -> Self
    where
        I: Iterator<Item = Result<Vec<u8>, FetchError>> + Send + 'static,
    {
        Self {
            chunks: Box::new(chunks),
        }
    }

    /// Stream over chunks already in memory.
    pub fn from_chunks(chunks: Vec<Vec<u8>>) -> Self {
        Self::new(chunks.into_iter().map(Ok))
    }

    /// Drain the stream into one buffer.
    pub fn read_all(self) -> Result<Vec<u8>, FetchError> {
        let mut out = Vec::new();
        for chunk in self {
            out.extend_from_slice(&chunk?);
        }
        Ok(out)
    }
}

impl Iterator for ByteStream {
    type Item = Result<Vec<u8>, FetchError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next()
    }
}

impl std::fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteStream").finish_non_exhaustive()
    }
}

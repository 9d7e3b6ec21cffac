//! In-memory stand-in for the network: canned replies, recorded calls.

use avatar_core::{ByteStream, Fetch, FetchError, ParsedTarget};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub struct FakeFetch {
    reply: Result<Vec<u8>, FetchError>,
    calls: AtomicUsize,
}

impl FakeFetch {
    /// Answers every fetch with `body` split into two chunks.
    pub fn ok(body: &[u8]) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(body.to_vec()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(err: FetchError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(err),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetch for FakeFetch {
    fn fetch(&self, _target: &ParsedTarget) -> Result<ByteStream, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let body = self.reply.clone()?;
        let mid = body.len() / 2;
        Ok(ByteStream::from_chunks(vec![
            body[..mid].to_vec(),
            body[mid..].to_vec(),
        ]))
    }
}

//! libcurl-backed [`Fetch`] implementation.
//!
//! The transfer runs on its own thread. The status code and body chunks are
//! handed to the caller over a bounded channel, so a slow consumer throttles
//! the download instead of buffering the body in memory. Redirects are not
//! followed: a 3xx is a failed fetch and the next hop never bypasses validation.

use std::cell::Cell;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;
use std::time::Duration;

use super::head::{is_success, parse_status_line};
use super::{ByteStream, Fetch, FetchError};
use crate::config::FetchConfig;
use crate::validate::ParsedTarget;

/// Chunks buffered between the curl thread and the reader.
const CHUNK_QUEUE: usize = 16;

const USER_AGENT: &str = concat!("avatar/", env!("CARGO_PKG_VERSION"));

enum Event {
    Head(u32),
    Chunk(Vec<u8>),
    Done(Result<(), FetchError>),
}

fn transport(e: curl::Error) -> FetchError {
    FetchError::Transport(e.to_string())
}

/// GETs image URLs with libcurl, one Easy handle per fetch.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    connect_timeout: Duration,
    timeout: Duration,
    max_bytes: Option<u64>,
}

impl CurlFetcher {
    pub fn new(cfg: &FetchConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout(),
            timeout: cfg.timeout(),
            max_bytes: cfg.max_bytes,
        }
    }

    /// Runs the whole transfer on the current thread, reporting through `tx`.
    fn run(&self, url: &str, tx: &SyncSender<Event>) -> Result<(), FetchError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(transport)?;
        easy.get(true).map_err(transport)?;
        easy.follow_location(false).map_err(transport)?;
        easy.useragent(USER_AGENT).map_err(transport)?;
        easy.connect_timeout(self.connect_timeout).map_err(transport)?;
        easy.timeout(self.timeout).map_err(transport)?;
        if let Some(max) = self.max_bytes {
            // Rejects up front when Content-Length is known; the write callback
            // enforces the cap for chunked bodies.
            easy.max_filesize(max).map_err(transport)?;
        }

        let max_bytes = self.max_bytes;
        let status = Cell::new(0u32);
        let head_sent = Cell::new(false);
        let received = Cell::new(0u64);
        let too_large = Cell::new(false);

        let result = {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    if let Some(code) = std::str::from_utf8(data).ok().and_then(parse_status_line) {
                        status.set(code);
                    }
                    true
                })
                .map_err(transport)?;
            transfer
                .write_function(|data| {
                    if !head_sent.get() {
                        head_sent.set(true);
                        let code = status.get();
                        if tx.send(Event::Head(code)).is_err() || !is_success(code) {
                            return Ok(0); // abort transfer
                        }
                    }
                    let total = received.get() + data.len() as u64;
                    if max_bytes.is_some_and(|max| total > max) {
                        too_large.set(true);
                        return Ok(0);
                    }
                    received.set(total);
                    if tx.send(Event::Chunk(data.to_vec())).is_err() {
                        return Ok(0);
                    }
                    Ok(data.len())
                })
                .map_err(transport)?;
            transfer.perform()
        };

        let limit = max_bytes.unwrap_or(0);
        if too_large.get() {
            return Err(FetchError::TooLarge { limit });
        }
        match result {
            Err(e) if e.is_filesize_exceeded() => Err(FetchError::TooLarge { limit }),
            // Aborted on a bad status; the reader already has the code.
            Err(_) if head_sent.get() && !is_success(status.get()) => Ok(()),
            Err(e) => Err(transport(e)),
            Ok(()) => {
                if !head_sent.get() {
                    let code = match easy.response_code().map_err(transport)? {
                        0 => status.get(),
                        code => code,
                    };
                    let _ = tx.send(Event::Head(code));
                }
                Ok(())
            }
        }
    }
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new(&FetchConfig::default())
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&self, target: &ParsedTarget) -> Result<ByteStream, FetchError> {
        let (tx, rx) = mpsc::sync_channel(CHUNK_QUEUE);
        let url = target.as_str().to_string();
        let worker = self.clone();
        thread::Builder::new()
            .name("avatar-fetch".to_string())
            .spawn(move || {
                let result = worker.run(&url, &tx);
                let _ = tx.send(Event::Done(result));
            })
            .map_err(|e| FetchError::Transport(format!("spawn fetch worker: {e}")))?;

        let code = match rx.recv() {
            Ok(Event::Head(code)) => code,
            Ok(Event::Done(Err(e))) => return Err(e),
            Ok(_) => return Err(FetchError::BadResponse("no status line".to_string())),
            Err(_) => return Err(FetchError::Transport("fetch worker exited".to_string())),
        };
        if !is_success(code) {
            tracing::debug!(url = %target, code, "image fetch returned non-success status");
            return Err(FetchError::BadResponse(format!("HTTP {code}")));
        }

        let first = match rx.recv() {
            Ok(Event::Chunk(chunk)) => chunk,
            Ok(Event::Done(Ok(()))) => return Err(FetchError::BadResponse("empty body".to_string())),
            Ok(Event::Done(Err(e))) => return Err(e),
            Ok(Event::Head(_)) => {
                return Err(FetchError::BadResponse("unexpected second status line".to_string()))
            }
            Err(_) => return Err(FetchError::Transport("fetch worker exited".to_string())),
        };

        Ok(ByteStream::new(Body {
            first: Some(first),
            rx,
            finished: false,
        }))
    }
}

/// Remaining body chunks from the curl thread.
struct Body {
    first: Option<Vec<u8>>,
    rx: Receiver<Event>,
    finished: bool,
}

impl Body {
    fn fail(&mut self, e: FetchError) -> Option<Result<Vec<u8>, FetchError>> {
        self.finished = true;
        Some(Err(e))
    }
}

impl Iterator for Body {
    type Item = Result<Vec<u8>, FetchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(first) = self.first.take() {
            return Some(Ok(first));
        }
        if self.finished {
            return None;
        }
        match self.rx.recv() {
            Ok(Event::Chunk(chunk)) => Some(Ok(chunk)),
            Ok(Event::Done(Ok(()))) => {
                self.finished = true;
                None
            }
            Ok(Event::Done(Err(e))) => self.fail(e),
            Ok(Event::Head(_)) => self.fail(FetchError::Transport(
                "unexpected status line mid-body".to_string(),
            )),
            Err(_) => self.fail(FetchError::Transport(
                "transfer ended unexpectedly".to_string(),
            )),
        }
    }
}

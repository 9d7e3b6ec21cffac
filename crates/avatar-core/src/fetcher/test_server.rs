//! Minimal HTTP/1.1 server for fetcher tests.
//!
//! Answers every request with the same canned reply, then closes the connection.
//! [`start_with`] hands each connection to a custom handler instead.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub(crate) struct Reply {
    /// Status code and reason, e.g. `"200 OK"`.
    pub status: &'static str,
    /// Extra header lines without the trailing CRLF.
    pub headers: Vec<String>,
    pub body: Vec<u8>,
}

impl Reply {
    pub(crate) fn ok(body: Vec<u8>) -> Self {
        Self::status("200 OK", body)
    }

    pub(crate) fn status(status: &'static str, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: vec!["Content-Type: image/png".to_string()],
            body,
        }
    }
}

/// Starts a server in a background thread. Returns the base URL
/// (e.g. "http://127.0.0.1:12345/"). The server runs until the process exits.
pub(crate) fn start(reply: Reply) -> String {
    start_with(move |stream| handle(stream, &reply))
}

/// Like [`start`], but each accepted connection goes to `handler` on its own thread.
pub(crate) fn start_with<F>(handler: F) -> String
where
    F: Fn(TcpStream) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let handler = Arc::new(handler);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let handler = Arc::clone(&handler);
            thread::spawn(move || handler(stream));
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

/// Consume the request head. Returns false if the client sent nothing.
pub(crate) fn read_request(stream: &mut TcpStream) -> bool {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    matches!(stream.read(&mut buf), Ok(n) if n > 0)
}

fn handle(mut stream: TcpStream, reply: &Reply) {
    if !read_request(&mut stream) {
        return;
    }
    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        reply.status,
        reply.body.len()
    );
    for h in &reply.headers {
        head.push_str(h);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&reply.body);
}

//! Minimal HTTP/1.1 server for extents-protocol integration tests.
//!
//! Answers `GET /extents` with a fixed status line and body, 404 for any
//! other path, and counts extents requests so tests can assert how many
//! fetches actually hit the wire. Connections are served keep-alive style
//! (multiple sequential requests per socket) to match client reuse.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub struct ExtentsServer {
    base_url: String,
    requests: Arc<AtomicUsize>,
}

impl ExtentsServer {
    /// Base URL of the served image, e.g. `http://127.0.0.1:43210`.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Number of `GET /extents` requests received so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread answering `GET /extents` with
/// `status` (e.g. `"200 OK"`) and `body`. Runs until the process exits.
pub fn start(status: &'static str, body: Vec<u8>) -> ExtentsServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(AtomicUsize::new(0));
    let body = Arc::new(body);
    let counter = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let counter = Arc::clone(&counter);
            thread::spawn(move || handle(stream, status, &body, &counter));
        }
    });
    ExtentsServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

/// Starts a server that accepts connections but never responds, for
/// deadline tests. The sockets are parked until the process exits.
pub fn start_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        let mut parked = Vec::new();
        for stream in listener.incoming().flatten() {
            parked.push(stream);
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: TcpStream, status: &str, body: &[u8], counter: &AtomicUsize) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut pending: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = match stream.read(&mut chunk) {
            Ok(0) => return,
            Ok(n) => n,
            Err(_) => return,
        };
        pending.extend_from_slice(&chunk[..n]);
        // Wait for a complete request head before answering.
        if !pending.windows(4).any(|w| w == b"\r\n\r\n") {
            continue;
        }
        let request = match std::str::from_utf8(&pending) {
            Ok(s) => s,
            Err(_) => return,
        };
        let (method, path) = parse_request_line(request);
        if method.eq_ignore_ascii_case("GET") && path == "/extents" {
            counter.fetch_add(1, Ordering::SeqCst);
            let head = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\n\r\n",
                status,
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
        } else {
            let reason = b"no such resource";
            let head = format!(
                "HTTP/1.1 404 Not Found\r\nContent-Length: {}\r\n\r\n",
                reason.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(reason);
        }
        pending.clear();
    }
}

/// Returns (method, path) from the request line.
fn parse_request_line(request: &str) -> (&str, &str) {
    let line = request.lines().next().unwrap_or("");
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("");
    (method, path)
}

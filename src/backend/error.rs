//! Error kinds for requests against the image server.

use std::fmt;

/// Error from an extents or size request. The kinds are kept separate so
/// callers can tell network failures from server-reported errors from
/// malformed payloads. Nothing is retried here; the caller owns retries.
#[derive(Debug)]
pub enum BackendError {
    /// Connection establishment or I/O failure below HTTP (DNS, refused
    /// connection, TLS handshake, read failure mid-stream).
    Transport(curl::Error),
    /// The server answered with a non-200 status. `reason` is the raw
    /// response body, the server's human-readable diagnostic.
    Status { code: u32, reason: String },
    /// The response body is not a valid JSON extent array.
    Protocol(serde_json::Error),
    /// The extent map was fetched but is empty, so no size can be derived
    /// from it. The protocol guarantees full coverage of the image, so an
    /// empty map is a server anomaly rather than a zero-byte image.
    EmptyExtentMap,
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Transport(e) => write!(f, "{}", e),
            BackendError::Status { code, reason } => {
                write!(f, "server returned HTTP {}: {}", code, reason)
            }
            BackendError::Protocol(e) => write!(f, "invalid extents response: {}", e),
            BackendError::EmptyExtentMap => write!(f, "server returned an empty extent map"),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackendError::Transport(e) => Some(e),
            BackendError::Protocol(e) => Some(e),
            BackendError::Status { .. } | BackendError::EmptyExtentMap => None,
        }
    }
}

//! HTTP transport tuning for bulk image transfer.
//!
//! Builds a libcurl easy handle configured for one-directional transfer of
//! large sparse images. A handle keeps its connection alive between
//! requests, so an extents fetch followed by data transfer on the same
//! handle skips the handshake.

use crate::config::TransportConfig;
use curl::easy::Easy;
use std::time::Duration;

/// Builds a transfer handle from `config`. Performs no network I/O; the
/// first request is what discovers whether the server is reachable.
pub fn build_handle(config: &TransportConfig) -> Result<Easy, curl::Error> {
    let mut easy = Easy::new();

    easy.ssl_verify_peer(config.verify_tls)?;
    easy.ssl_verify_host(config.verify_tls)?;
    if !config.verify_tls {
        tracing::warn!("TLS certificate verification disabled");
    }

    // Large buffers in both directions; bulk transfer throughput is
    // dominated by per-write overhead with the platform default.
    easy.buffer_size(config.transfer_buffer_bytes)?;
    easy.upload_buffer_size(config.transfer_buffer_bytes)?;

    if let Some(secs) = config.connect_timeout_secs {
        easy.connect_timeout(Duration::from_secs(secs))?;
    }

    Ok(easy)
}

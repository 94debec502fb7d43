//! Client handle for one remote image.
//!
//! A `Backend` binds an endpoint URL to a tuned transfer handle and caches
//! the image's extent map and size, so repeated metadata queries cost one
//! network round-trip total. Every request method takes `&mut self`: a
//! handle is single-owner and the compiler rules out concurrent use, so
//! the caches need no lock.

mod error;
mod fetch;

pub use error::BackendError;

use anyhow::{Context, Result};
use curl::easy::Easy;
use std::time::Duration;

use crate::config::TransportConfig;
use crate::extent::Extent;
use crate::transport;

/// Client-side handle for one remote sparse image.
pub struct Backend {
    url: String,
    config: TransportConfig,
    handle: Option<Easy>,
    cached_size: Option<u64>,
    cached_extents: Option<Vec<Extent>>,
}

impl Backend {
    /// Connects to the image at `url`.
    ///
    /// Purely local setup: the URL is validated and a transfer handle is
    /// configured, but no request is sent. Reachability is discovered by
    /// the first `extents` or `size` call.
    pub fn connect(url: &str, config: &TransportConfig) -> Result<Backend> {
        url::Url::parse(url).with_context(|| format!("invalid image URL: {url}"))?;
        let handle = transport::build_handle(config).context("transport setup failed")?;
        Ok(Backend {
            url: url.trim_end_matches('/').to_string(),
            config: config.clone(),
            handle: Some(handle),
            cached_size: None,
            cached_extents: None,
        })
    }

    /// Returns the extent map covering the whole image.
    ///
    /// The first call performs one fetch; later calls return the cached
    /// map with no network access. The server cannot serve a partial map,
    /// so one fetch is always the complete picture. A failed fetch leaves
    /// the cache empty and the next call tries again.
    ///
    /// `deadline` bounds this call end to end; `None` means no limit.
    pub fn extents(&mut self, deadline: Option<Duration>) -> Result<&[Extent], BackendError> {
        if self.cached_extents.is_none() {
            let handle = match self.handle.take() {
                Some(handle) => handle,
                None => transport::build_handle(&self.config).map_err(BackendError::Transport)?,
            };
            let handle = self.handle.insert(handle);
            let extents = fetch::fetch_extents(handle, &self.url, deadline)?;
            tracing::debug!("fetched {} extents from {}", extents.len(), self.url);
            self.cached_extents = Some(extents);
        }
        Ok(self.cached_extents.as_deref().unwrap_or_default())
    }

    /// Returns the total image size in bytes.
    ///
    /// The server has no size endpoint; the size is the end of the last
    /// extent, so the first call resolves it through `extents`. An empty
    /// extent map yields [`BackendError::EmptyExtentMap`] and nothing is
    /// cached.
    pub fn size(&mut self, deadline: Option<Duration>) -> Result<u64, BackendError> {
        if let Some(size) = self.cached_size {
            return Ok(size);
        }
        let extents = self.extents(deadline)?;
        let last = extents.last().ok_or(BackendError::EmptyExtentMap)?;
        let size = last.end();
        self.cached_size = Some(size);
        Ok(size)
    }

    /// Releases the connection kept alive for this image.
    ///
    /// Idempotent and infallible; cached extents and size stay valid, and
    /// a later request opens a fresh connection.
    pub fn close(&mut self) {
        // Dropping the handle closes any connection libcurl kept open.
        self.handle = None;
    }
}

//! The `GET {image_url}/extents` protocol exchange.

use super::error::BackendError;
use crate::extent::Extent;
use curl::easy::Easy;
use std::time::Duration;

/// Fetches the complete extent map for the image at `image_url`.
///
/// The write callback accumulates the body and never aborts the transfer,
/// so the body is fully read on every path and the connection stays
/// usable for the next request on this handle.
pub(super) fn fetch_extents(
    handle: &mut Easy,
    image_url: &str,
    deadline: Option<Duration>,
) -> Result<Vec<Extent>, BackendError> {
    handle
        .url(&format!("{}/extents", image_url))
        .map_err(BackendError::Transport)?;
    handle.get(true).map_err(BackendError::Transport)?;
    // Handle options persist across requests; a deadline set by an earlier
    // call must be cleared here (zero disables the timeout).
    handle
        .timeout(deadline.unwrap_or(Duration::ZERO))
        .map_err(BackendError::Transport)?;

    let mut body: Vec<u8> = Vec::new();
    {
        let mut transfer = handle.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(BackendError::Transport)?;
        transfer.perform().map_err(BackendError::Transport)?;
    }

    let code = handle.response_code().map_err(BackendError::Transport)?;
    if code != 200 {
        // The body of an error response is the server's diagnostic text.
        return Err(BackendError::Status {
            code,
            reason: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    serde_json::from_slice(&body).map_err(BackendError::Protocol)
}

//! Extent map records returned by the image server.

use serde::{Deserialize, Serialize};

/// One contiguous byte range `[start, start + length)` of the remote image.
///
/// A fetched map is ascending by `start`, contiguous, and covers the whole
/// image, so the end of the last extent is the image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    /// Byte offset of the first byte in the range.
    pub start: u64,
    /// Length of the range in bytes.
    pub length: u64,
    /// True if the range reads as all-zero bytes.
    pub zero: bool,
    /// True if the range is unallocated on the backing store. Informational;
    /// the content of a hole is still well-defined (zero).
    pub hole: bool,
}

impl Extent {
    /// Offset of the first byte past this range.
    pub fn end(&self) -> u64 {
        self.start + self.length
    }
}

use thiserror::Error;

use crate::font::FontError;
use crate::source::Encoding;

/// Result type for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors that can occur while setting up or running a layout.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Raw encoding tag outside the supported UTF-8/16/32 set.
    #[error("invalid string encoding tag: {0}")]
    InvalidEncoding(u32),

    /// Byte buffer length is not a multiple of the code-unit width.
    #[error("{len}-byte buffer is not a whole number of {encoding:?} code units")]
    TruncatedBuffer { encoding: Encoding, len: usize },

    /// Offsets are reported as `u32`; longer text cannot be addressed.
    #[error("text of {len} code units exceeds the u32 offset range")]
    TextTooLong { len: usize },

    /// The font could not be prepared for shaping.
    #[error(transparent)]
    Font(#[from] FontError),
}

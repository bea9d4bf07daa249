pub mod face;
pub mod loader;
pub mod metrics;
pub mod sized;

pub use face::FontFace;
pub use loader::{FontCache, FontKey, load_font, load_system_default_font};
pub use metrics::{FontMetrics, ScaledFontMetrics};
pub use sized::{Font, to_fixed};

use thiserror::Error;

/// Errors that can occur while working with fonts.
#[derive(Error, Debug)]
pub enum FontError {
    #[error("font I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid font data")]
    InvalidFont,
    #[error("no usable system font found")]
    NoSystemFont,
    #[error("invalid pixel size: {0}")]
    InvalidPixelSize(f32),
}

/// Convenient result alias for font-related operations.
pub type Result<T> = std::result::Result<T, FontError>;

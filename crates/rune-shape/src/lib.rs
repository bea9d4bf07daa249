//! rune-shape: single-line bidirectional text layout.
//!
//! A logical string in UTF-8, UTF-16 or UTF-32 plus a sized font becomes
//! an ordered sequence of positioned glyphs ready to paint left to right:
//! - bidi segmentation into level runs in visual order (`unicode-bidi`)
//! - script segmentation of each level run (`unicode-script`)
//! - per-run shaping with harfrust
//! - concatenation into one glyph sequence owned by [`TextLayout`]

pub mod bidi;
pub mod error;
pub mod font;
pub mod layout;
pub mod run;
pub mod script;
pub mod shaping;
pub mod source;

pub use error::{LayoutError, Result};
pub use font::{Font, FontCache, FontError, FontFace, FontKey, FontMetrics, ScaledFontMetrics};
pub use layout::{Point, PositionedGlyph, TextLayout};
pub use run::Run;
pub use script::{Direction, Script};
pub use shaping::{Glyph, RawGlyph, ShapeOptions};
pub use source::{Encoding, TextSource};

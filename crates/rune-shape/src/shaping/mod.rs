//! Shaping engine adapter built on harfrust (pure-Rust HarfBuzz port).

mod buffer;
mod glyph;
mod shaper;

pub use buffer::ShapeBuffer;
pub use glyph::{Glyph, RawGlyph};
pub use shaper::{DEFAULT_LANGUAGE, ShapeOptions};
pub(crate) use shaper::shape_run;

pub mod geometry;
pub mod text_layout;

pub use geometry::{Point, PositionedGlyph};
pub use text_layout::TextLayout;

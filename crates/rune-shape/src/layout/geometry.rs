/// A 2D point in layout-local pixel coordinates.
///
/// Coordinates are relative to the layout origin; y grows downwards like
/// the consumer's paint surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// A glyph placed at its final pen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedGlyph {
    pub glyph_id: u32,
    pub cluster: u32,
    /// Where to draw the glyph: pen position plus the glyph offset.
    pub position: Point,
}

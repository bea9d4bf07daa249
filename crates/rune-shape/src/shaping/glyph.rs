/// One shaped glyph as the shaping engine reports it, in 26.6 fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawGlyph {
    pub glyph_id: u32,
    pub cluster: u32,
    pub x_offset: i32,
    pub y_offset: i32,
    pub x_advance: i32,
    pub y_advance: i32,
}

/// One positioned glyph in pixels.
///
/// `cluster` is the code-unit offset, relative to the start of the run
/// that produced the glyph, of the character cluster it renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub glyph_id: u32,
    pub cluster: u32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub x_advance: f32,
    pub y_advance: f32,
}

impl From<RawGlyph> for Glyph {
    /// The one place fixed-point geometry becomes float pixels.
    fn from(raw: RawGlyph) -> Self {
        Self {
            glyph_id: raw.glyph_id,
            cluster: raw.cluster,
            x_offset: raw.x_offset as f32 / 64.0,
            y_offset: raw.y_offset as f32 / 64.0,
            x_advance: raw.x_advance as f32 / 64.0,
            y_advance: raw.y_advance as f32 / 64.0,
        }
    }
}

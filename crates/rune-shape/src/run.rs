use core::ops::Range;

use crate::script::{Direction, Script, ScriptRun};
use crate::shaping::ShapeBuffer;

/// A script- and direction-coherent span of the source text.
///
/// Runs of a layout are stored in visual order. Two directions are kept on
/// purpose: `bidi_direction` is where the run paints, `direction` is what
/// the shaper was told to use for the run's script.
#[derive(Debug)]
pub struct Run {
    /// Offset in code units of the source text.
    pub offset: u32,
    /// Length in code units.
    pub length: u32,
    pub script: Script,
    /// Script-intrinsic direction used for shaping.
    pub direction: Direction,
    /// BiDi embedding level.
    pub level: u8,
    /// Paint direction from the bidi algorithm.
    pub bidi_direction: Direction,
    /// Glyphs this run produced, as a range into the layout's glyphs.
    pub glyph_range: Range<usize>,
    pub(crate) bytes: Range<usize>,
    pub(crate) buffer: ShapeBuffer,
}

impl Run {
    pub(crate) fn new(span: ScriptRun) -> Self {
        Self {
            offset: span.offset,
            length: span.length,
            script: span.script,
            direction: span.direction,
            level: span.level,
            bidi_direction: span.bidi_direction,
            glyph_range: 0..0,
            bytes: span.bytes,
            buffer: ShapeBuffer::new(),
        }
    }

    /// Point this run at a new span, keeping its shaping buffer.
    pub(crate) fn assign(&mut self, span: ScriptRun) {
        self.offset = span.offset;
        self.length = span.length;
        self.script = span.script;
        self.direction = span.direction;
        self.level = span.level;
        self.bidi_direction = span.bidi_direction;
        self.bytes = span.bytes;
        self.glyph_range = 0..0;
    }

    /// Code-unit range of this run in the source text.
    pub fn range(&self) -> Range<u32> {
        self.offset..self.offset + self.length
    }

    pub fn is_rtl(&self) -> bool {
        self.bidi_direction.is_rtl()
    }

    /// Whether a shaping buffer is held for reuse.
    pub fn has_shape_buffer(&self) -> bool {
        self.buffer.is_allocated()
    }
}

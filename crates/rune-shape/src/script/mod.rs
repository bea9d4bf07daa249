//! Script resolution and script-boundary segmentation.

mod direction;
mod segmenter;

use core::ops::Range;

use tracing::trace;
pub use unicode_script::Script;

use crate::bidi::BidiRun;
use crate::source::DecodedText;

pub use direction::{Direction, horizontal_direction, shaping_script};
pub use segmenter::{ScriptSegment, ScriptSegments};

/// A script-coherent piece of one bidi run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRun {
    /// Offset in code units of the full source text.
    pub offset: u32,
    /// Length in code units.
    pub length: u32,
    pub script: Script,
    /// Script-intrinsic direction handed to the shaper.
    pub direction: Direction,
    /// Embedding level of the enclosing bidi run.
    pub level: u8,
    /// Paint direction of the enclosing bidi run.
    pub bidi_direction: Direction,
    /// Byte range in the decoded text.
    pub(crate) bytes: Range<usize>,
}

/// Split a bidi run into script runs, in logical order within the run.
///
/// Scripts without a default direction inherit the bidi run's direction.
pub(crate) fn split(run: &BidiRun, text: &DecodedText) -> Vec<ScriptRun> {
    let slice = &text.as_str()[run.bytes.clone()];
    ScriptSegments::new(slice)
        .map(|segment| {
            let bytes = (run.bytes.start + segment.range.start)..(run.bytes.start + segment.range.end);
            let (offset, length) = text.unit_span(&bytes);
            let direction = horizontal_direction(segment.script).unwrap_or(run.direction);
            trace!(offset, length, script = segment.script.short_name(), "script run");
            ScriptRun {
                offset,
                length,
                script: segment.script,
                direction,
                level: run.level,
                bidi_direction: run.direction,
                bytes,
            }
        })
        .collect()
}

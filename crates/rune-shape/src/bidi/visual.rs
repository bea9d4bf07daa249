use core::ops::Range;

use tracing::{debug, trace};
use unicode_bidi::{BidiInfo, LevelRun};

use crate::error::Result;
use crate::script::Direction;
use crate::source::{DecodedText, TextSource};

/// A run of text with a single BiDi embedding level, in visual order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidiRun {
    /// Offset in code units of the source text.
    pub offset: u32,
    /// Length in code units.
    pub length: u32,
    /// Embedding level for this run.
    pub level: u8,
    /// Paint direction assigned by the bidi algorithm.
    pub direction: Direction,
    /// Byte range in the decoded text.
    pub(crate) bytes: Range<usize>,
}

/// Compute the visual-order level runs of a text source.
///
/// The paragraph base direction is detected from the first strong
/// character, falling back to left-to-right. Empty text yields no runs.
/// Fails only when the text is too long for `u32` offsets.
pub fn segment(source: &TextSource<'_>) -> Result<Vec<BidiRun>> {
    Ok(visual_runs(&source.decode()?))
}

pub(crate) fn visual_runs(text: &DecodedText) -> Vec<BidiRun> {
    let info = BidiInfo::new(text.as_str(), None);
    if info.paragraphs.len() > 1 {
        debug!(
            paragraphs = info.paragraphs.len(),
            "text spans several paragraphs; laying them out as one line"
        );
    }

    let mut runs = Vec::new();
    for para in &info.paragraphs {
        let (levels, level_runs) = info.visual_runs(para, para.range.clone());
        runs.extend(level_runs.into_iter().map(|range: LevelRun| {
            let level = levels[range.start];
            let (offset, length) = text.unit_span(&range);
            let direction = if level.is_rtl() {
                Direction::RightToLeft
            } else {
                Direction::LeftToRight
            };
            trace!(offset, length, level = level.number(), ?direction, "bidi run");
            BidiRun {
                offset,
                length,
                level: level.number(),
                direction,
                bytes: range,
            }
        }));
    }
    runs
}

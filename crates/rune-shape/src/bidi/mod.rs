//! Bidirectional (BiDi) segmentation built on `unicode-bidi`.
//!
//! The whole text is treated as one line. Runs come back in visual order:
//! run 0 is the leftmost run to paint.

mod visual;

pub use visual::{BidiRun, segment};
pub(crate) use visual::visual_runs;

use core::fmt;

use harfrust::{GlyphBuffer, UnicodeBuffer};

/// Reusable shaping-state handle owned by a single run.
///
/// The engine buffer is allocated on first use. After each shape call it
/// is cleared and handed back, keeping its allocations for the next pass;
/// it is only freed when the owning run is dropped.
#[derive(Default)]
pub struct ShapeBuffer {
    buffer: Option<UnicodeBuffer>,
}

impl ShapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the engine buffer has been allocated.
    pub fn is_allocated(&self) -> bool {
        self.buffer.is_some()
    }

    /// Take an empty engine buffer, allocating one on first use.
    pub(crate) fn acquire(&mut self) -> UnicodeBuffer {
        self.buffer.take().unwrap_or_else(UnicodeBuffer::new)
    }

    /// Clear shaped output and keep the buffer for reuse.
    pub(crate) fn release(&mut self, shaped: GlyphBuffer) {
        self.buffer = Some(shaped.clear());
    }
}

impl fmt::Debug for ShapeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeBuffer")
            .field("allocated", &self.is_allocated())
            .finish()
    }
}

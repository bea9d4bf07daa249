use tracing::{debug, warn};

use crate::bidi;
use crate::error::Result;
use crate::font::Font;
use crate::layout::{Point, PositionedGlyph};
use crate::run::Run;
use crate::script::{self, ScriptRun};
use crate::shaping::{Glyph, ShapeOptions, shape_run};
use crate::source::TextSource;

/// Single-line bidirectional text layout for one font.
///
/// `layout()` runs bidi segmentation, script segmentation and shaping in
/// one pass. Afterwards `runs()` are in visual order and `glyphs()` is the
/// concatenation of each run's glyphs in that order, so the sequence can
/// be painted left to right as is.
#[derive(Debug)]
pub struct TextLayout<'a> {
    font: &'a Font,
    source: TextSource<'a>,
    options: ShapeOptions,
    runs: Vec<Run>,
    glyphs: Vec<Glyph>,
}

impl<'a> TextLayout<'a> {
    /// Store the font and text. No layout happens until `layout()`.
    pub fn new(font: &'a Font, source: TextSource<'a>) -> Self {
        Self {
            font,
            source,
            options: ShapeOptions::default(),
            runs: Vec::new(),
            glyphs: Vec::new(),
        }
    }

    /// Build a layout over a raw native-endian buffer with a numeric
    /// encoding tag (0 = UTF-8, 1 = UTF-16, 2 = UTF-32).
    pub fn from_raw(font: &'a Font, encoding: u32, bytes: &'a [u8]) -> Result<Self> {
        Ok(Self::new(font, TextSource::from_ne_bytes(encoding, bytes)?))
    }

    pub fn with_options(mut self, options: ShapeOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the shaping options; takes effect on the next `layout()`.
    pub fn set_options(&mut self, options: ShapeOptions) {
        self.options = options;
    }

    pub fn font(&self) -> &'a Font {
        self.font
    }

    pub fn source(&self) -> &TextSource<'a> {
        &self.source
    }

    /// Run the full pipeline from scratch.
    ///
    /// Existing runs are reassigned in place so their shaping buffers are
    /// reused; surplus runs are dropped and missing ones created.
    pub fn layout(&mut self) -> Result<()> {
        let text = self.source.decode()?;
        let spans: Vec<ScriptRun> = bidi::visual_runs(&text)
            .iter()
            .flat_map(|run| script::split(run, &text))
            .collect();
        self.reuse_runs(spans);

        let font = self.font;
        let options = &self.options;
        let runs = &mut self.runs;
        let glyphs = &mut self.glyphs;
        glyphs.clear();
        font.with_shaper(|shaper| {
            for run in runs.iter_mut() {
                let start = glyphs.len();
                shape_run(shaper, font, options, &text, run, glyphs);
                run.glyph_range = start..glyphs.len();
            }
        })?;

        debug!(
            units = self.source.len(),
            runs = self.runs.len(),
            glyphs = self.glyphs.len(),
            "laid out line"
        );
        Ok(())
    }

    fn reuse_runs(&mut self, spans: Vec<ScriptRun>) {
        let kept = spans.len().min(self.runs.len());
        self.runs.truncate(spans.len());
        let mut spans = spans.into_iter();
        for (run, span) in self.runs.iter_mut().zip(spans.by_ref().take(kept)) {
            run.assign(span);
        }
        self.runs.extend(spans.map(Run::new));
    }

    /// Glyphs in paint order. Empty before the first `layout()`.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Runs in visual order. Empty before the first `layout()`.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Glyphs produced by one run. Empty when the run's range does not
    /// fall inside this layout's glyphs.
    pub fn run_glyphs(&self, run: &Run) -> &[Glyph] {
        self.glyphs.get(run.glyph_range.clone()).unwrap_or(&[])
    }

    /// Total pen advance of the line in pixels.
    pub fn advance(&self) -> Point {
        self.glyphs.iter().fold(Point::zero(), |pen, glyph| {
            Point::new(pen.x + glyph.x_advance, pen.y + glyph.y_advance)
        })
    }

    /// Walk the glyphs from `origin`, yielding where each one is drawn.
    ///
    /// Offsets follow the shaping engine's y-up convention, so the y
    /// offset is subtracted on the y-down paint surface.
    pub fn positioned_glyphs(&self, origin: Point) -> impl Iterator<Item = PositionedGlyph> + '_ {
        self.glyphs.iter().scan(origin, |pen, glyph| {
            let placed = PositionedGlyph {
                glyph_id: glyph.glyph_id,
                cluster: glyph.cluster,
                position: Point::new(pen.x + glyph.x_offset, pen.y - glyph.y_offset),
            };
            pen.x += glyph.x_advance;
            pen.y += glyph.y_advance;
            Some(placed)
        })
    }

    /// Caret x position for a code-unit index.
    ///
    /// Not implemented: always returns 0.
    pub fn caret_position_from_index(&self, index: u32) -> f32 {
        warn!(index, "caret_position_from_index is not implemented");
        0.0
    }

    /// Code-unit index for a caret x position.
    ///
    /// Not implemented: always returns 0.
    pub fn caret_index_from_position(&self, pos: f32) -> u32 {
        warn!(pos, "caret_index_from_position is not implemented");
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::load_system_default_font;
    use crate::script::{Direction, Script, shaping_script};

    fn test_font() -> Option<Font> {
        let face = load_system_default_font().ok()?;
        Font::new(face, 32.0).ok()
    }

    fn laid_out<'a>(font: &'a Font, source: TextSource<'a>) -> TextLayout<'a> {
        let mut layout = TextLayout::new(font, source);
        layout.layout().unwrap();
        layout
    }

    #[test]
    fn two_latin_letters() {
        let Some(font) = test_font() else { return };
        let layout = laid_out(&font, TextSource::utf8("AB"));

        assert_eq!(layout.runs().len(), 1);
        let run = &layout.runs()[0];
        assert_eq!((run.offset, run.length), (0, 2));
        assert_eq!(run.bidi_direction, Direction::LeftToRight);
        assert_eq!(run.direction, Direction::LeftToRight);

        let glyphs = layout.glyphs();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].cluster, 0);
        assert_eq!(glyphs[1].cluster, 1);
        let mut pen = 0.0;
        for glyph in glyphs {
            assert!(glyph.x_advance > 0.0);
            let next = pen + glyph.x_advance;
            assert!(next > pen);
            pen = next;
        }
        assert_eq!(layout.advance().x, pen);
    }

    #[test]
    fn latin_then_arabic_word() {
        let Some(font) = test_font() else { return };
        let layout = laid_out(&font, TextSource::utf8("hello مرحبا"));

        assert!(layout.runs().len() >= 2);
        let arabic = layout.runs().iter().find(|r| r.bidi_direction.is_rtl()).unwrap();
        assert_eq!(arabic.direction, Direction::RightToLeft);
        let clusters: Vec<u32> = layout.run_glyphs(arabic).iter().map(|g| g.cluster).collect();
        assert!(clusters.len() >= 2);
        assert!(clusters.windows(2).all(|w| w[0] >= w[1]));
        assert!(clusters.first() > clusters.last());
    }

    #[test]
    fn single_script_rtl_clusters_do_not_increase() {
        let Some(font) = test_font() else { return };
        let layout = laid_out(&font, TextSource::utf8("שלום"));
        assert_eq!(layout.runs().len(), 1);
        let clusters: Vec<u32> = layout.glyphs().iter().map(|g| g.cluster).collect();
        assert!(clusters.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn single_script_ltr_clusters_do_not_decrease() {
        let Some(font) = test_font() else { return };
        let layout = laid_out(&font, TextSource::utf8("office waffle"));
        assert_eq!(layout.runs().len(), 1);
        let clusters: Vec<u32> = layout.glyphs().iter().map(|g| g.cluster).collect();
        assert!(clusters.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn utf16_clusters_are_code_units() {
        let Some(font) = test_font() else { return };
        let units: Vec<u16> = "a😀b".encode_utf16().collect();
        let layout = laid_out(&font, TextSource::utf16(&units));
        let clusters: Vec<u32> = layout.glyphs().iter().map(|g| g.cluster).collect();
        assert_eq!(clusters.first(), Some(&0));
        assert_eq!(clusters.last(), Some(&3));
    }

    #[test]
    fn relayout_is_identical_and_reuses_buffers() {
        let Some(font) = test_font() else { return };
        let mut layout = TextLayout::new(&font, TextSource::utf8("abc αβγ אבג 123"));
        layout.layout().unwrap();
        let first = layout.glyphs().to_vec();
        assert!(layout.runs().iter().all(Run::has_shape_buffer));

        layout.layout().unwrap();
        assert_eq!(layout.glyphs(), first.as_slice());
        assert!(layout.runs().iter().all(Run::has_shape_buffer));
    }

    /// Shape `text` as a single right-to-left Arabic buffer, returning
    /// `(byte cluster, glyph id)` pairs.
    fn shape_whole_arabic(font: &Font, text: &str) -> Vec<(u32, u32)> {
        font.with_shaper(|shaper| {
            let mut buffer = harfrust::UnicodeBuffer::new();
            buffer.push_str(text);
            buffer.set_direction(harfrust::Direction::RightToLeft);
            if let Some(script) = shaping_script(Script::Arabic) {
                buffer.set_script(script);
            }
            buffer.guess_segment_properties();
            let shaped = shaper.shape(buffer, &[]);
            shaped
                .glyph_infos()
                .iter()
                .map(|info| (info.cluster, info.glyph_id))
                .collect()
        })
        .unwrap()
    }

    #[test]
    fn joining_carries_across_a_bidi_boundary_inside_a_word() {
        let Some(font) = test_font() else { return };
        if font.face().glyph_for_char('\u{0628}') == 0 {
            return;
        }
        // The LRM splits the word into three bidi runs, but is transparent
        // to Arabic joining: the letters beside it stay in medial form.
        let text = "\u{0628}\u{0628}\u{200E}\u{0628}\u{0628}";
        let layout = laid_out(&font, TextSource::utf8(text));
        assert_eq!(layout.runs().len(), 3);

        let mut laid: Vec<(u32, u32)> = layout
            .runs()
            .iter()
            .flat_map(|run| {
                layout
                    .run_glyphs(run)
                    .iter()
                    .map(move |g| (run.offset + g.cluster, g.glyph_id))
            })
            .collect();
        let mut whole = shape_whole_arabic(&font, text);

        let letters: Vec<u32> = text
            .char_indices()
            .filter(|&(_, ch)| ch == '\u{0628}')
            .map(|(byte, _)| byte as u32)
            .collect();
        laid.retain(|(cluster, _)| letters.contains(cluster));
        whole.retain(|(cluster, _)| letters.contains(cluster));
        laid.sort();
        whole.sort();
        assert_eq!(laid.len(), letters.len());
        assert_eq!(laid, whole);
    }

    #[test]
    fn run_from_another_layout_has_no_glyphs_here() {
        let Some(font) = test_font() else { return };
        let long = laid_out(&font, TextSource::utf8("abc αβγ אבג"));
        let short = laid_out(&font, TextSource::utf8("A"));
        let last = long.runs().last().unwrap();
        assert!(last.glyph_range.start >= short.glyphs().len());
        assert!(short.run_glyphs(last).is_empty());
        assert!(!long.run_glyphs(last).is_empty());
    }

    #[test]
    fn unaligned_raw_utf16_buffer_lays_out() {
        let Some(font) = test_font() else { return };
        let native: Vec<u8> = "AB".encode_utf16().flat_map(u16::to_ne_bytes).collect();
        let mut storage = vec![0u8; native.len() + 1];
        let start = if storage.as_ptr() as usize % 2 == 0 { 1 } else { 0 };
        storage[start..start + native.len()].copy_from_slice(&native);

        let mut layout = TextLayout::from_raw(&font, 1, &storage[start..start + native.len()]).unwrap();
        layout.layout().unwrap();
        let clusters: Vec<u32> = layout.glyphs().iter().map(|g| g.cluster).collect();
        assert_eq!(clusters, [0, 1]);
    }

    #[test]
    fn glyph_ranges_partition_the_glyph_sequence() {
        let Some(font) = test_font() else { return };
        let layout = laid_out(&font, TextSource::utf8("one שתיים three"));
        let mut next = 0;
        for run in layout.runs() {
            assert_eq!(run.glyph_range.start, next);
            next = run.glyph_range.end;
        }
        assert_eq!(next, layout.glyphs().len());
    }

    #[test]
    fn empty_text_lays_out_to_nothing() {
        let Some(font) = test_font() else { return };
        let layout = laid_out(&font, TextSource::utf16(&[]));
        assert!(layout.runs().is_empty());
        assert!(layout.glyphs().is_empty());
        assert_eq!(layout.advance(), Point::zero());
    }

    #[test]
    fn accessors_are_empty_before_layout() {
        let Some(font) = test_font() else { return };
        let layout = TextLayout::new(&font, TextSource::utf8("AB"));
        assert!(layout.glyphs().is_empty());
        assert!(layout.runs().is_empty());
    }

    #[test]
    fn raw_constructor_rejects_unknown_encoding() {
        let Some(font) = test_font() else { return };
        assert!(TextLayout::from_raw(&font, 9, b"AB").is_err());
        let layout = TextLayout::from_raw(&font, 0, b"AB").unwrap();
        assert_eq!(layout.source().len(), 2);
    }

    #[test]
    fn positioned_glyphs_follow_the_pen() {
        let Some(font) = test_font() else { return };
        let layout = laid_out(&font, TextSource::utf8("AB"));
        let placed: Vec<_> = layout.positioned_glyphs(Point::new(10.0, 50.0)).collect();
        let glyphs = layout.glyphs();
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].position.x, 10.0 + glyphs[0].x_offset);
        assert_eq!(
            placed[1].position.x,
            10.0 + glyphs[0].x_advance + glyphs[1].x_offset
        );
        assert_eq!(placed[1].position.y, 50.0 + glyphs[0].y_advance - glyphs[1].y_offset);
    }

    #[test]
    fn caret_queries_are_stubs() {
        let Some(font) = test_font() else { return };
        let layout = laid_out(&font, TextSource::utf8("AB"));
        assert_eq!(layout.caret_position_from_index(1), 0.0);
        assert_eq!(layout.caret_index_from_position(12.5), 0);
    }

    #[test]
    fn changing_language_relayouts() {
        let Some(font) = test_font() else { return };
        let mut layout = TextLayout::new(&font, TextSource::utf8("AB"))
            .with_options(ShapeOptions::with_language("tr"));
        layout.layout().unwrap();
        let before = layout.glyphs().len();
        layout.set_options(ShapeOptions::default());
        layout.layout().unwrap();
        assert_eq!(layout.glyphs().len(), before);
    }
}

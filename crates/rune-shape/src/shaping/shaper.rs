use harfrust::{Language, Shaper};
use tracing::{trace, warn};

use crate::font::Font;
use crate::run::Run;
use crate::script::shaping_script;
use crate::source::DecodedText;

use super::{Glyph, RawGlyph};

/// Language tag used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Per-layout shaping settings.
#[derive(Debug, Clone)]
pub struct ShapeOptions {
    language: Language,
}

impl ShapeOptions {
    /// Options for a BCP-47 language tag. An unparseable tag falls back to
    /// the default language.
    pub fn with_language(tag: &str) -> Self {
        match tag.parse::<Language>() {
            Ok(language) => Self { language },
            Err(_) => {
                warn!(tag, "unparseable language tag; using default");
                Self::default()
            }
        }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE
                .parse()
                .expect("default language tag must parse"),
        }
    }
}

/// Shape one run and append its glyphs to `out` in engine output order.
///
/// The engine shapes the run's slice of the decoded text, with the text
/// on either side passed as context so that joining and contextual forms
/// carry across run boundaries. Clusters are mapped back to code units of
/// the source, relative to the run start.
pub(crate) fn shape_run(
    shaper: &Shaper<'_>,
    font: &Font,
    options: &ShapeOptions,
    text: &DecodedText,
    run: &mut Run,
    out: &mut Vec<Glyph>,
) {
    debug_assert!(run.length > 0, "empty runs are never shaped");

    let full = text.as_str();
    let mut buffer = run.buffer.acquire();
    buffer.push_str(&full[run.bytes.clone()]);
    buffer.set_pre_context(&full[..run.bytes.start]);
    buffer.set_post_context(&full[run.bytes.end..]);
    buffer.set_direction(run.direction.into());
    if let Some(script) = shaping_script(run.script) {
        buffer.set_script(script);
    }
    buffer.set_language(options.language.clone());
    buffer.guess_segment_properties();

    let shaped = shaper.shape(buffer, &[]);
    let start = out.len();
    out.extend(
        shaped
            .glyph_infos()
            .iter()
            .zip(shaped.glyph_positions())
            .map(|(info, pos)| {
                let byte = run.bytes.start + info.cluster as usize;
                Glyph::from(RawGlyph {
                    glyph_id: info.glyph_id,
                    cluster: text.unit_at(byte) - run.offset,
                    x_offset: font.scale_to_fixed(pos.x_offset),
                    y_offset: font.scale_to_fixed(pos.y_offset),
                    x_advance: font.scale_to_fixed(pos.x_advance),
                    y_advance: font.scale_to_fixed(pos.y_advance),
                })
            }),
    );
    run.buffer.release(shaped);

    trace!(
        offset = run.offset,
        length = run.length,
        glyphs = out.len() - start,
        "shaped run"
    );
}

//! rune-line: lay out one line of text and print the positioned glyphs.
//!
//! Usage: `rune-line [TEXT...]`. Without arguments the text is read from
//! the file configured in `rune-line.toml` (`[text] path`) or
//! `RUNE_LINE_TEXT`.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use rune_config::{RuneLineConfig, TextEncoding};
use rune_shape::font::load_system_default_font;
use rune_shape::{Font, FontCache, FontFace, Point, ShapeOptions, TextLayout, TextSource};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Owned code units backing a `TextSource`.
enum CodeUnits {
    Utf8(String),
    Utf16(Vec<u16>),
    Utf32(Vec<u32>),
}

impl CodeUnits {
    fn encode(text: &str, encoding: TextEncoding) -> Self {
        match encoding {
            TextEncoding::Utf8 => CodeUnits::Utf8(text.to_owned()),
            TextEncoding::Utf16 => CodeUnits::Utf16(text.encode_utf16().collect()),
            TextEncoding::Utf32 => CodeUnits::Utf32(text.chars().map(u32::from).collect()),
        }
    }

    fn source(&self) -> TextSource<'_> {
        match self {
            CodeUnits::Utf8(text) => TextSource::utf8(text),
            CodeUnits::Utf16(units) => TextSource::utf16(units),
            CodeUnits::Utf32(units) => TextSource::utf32(units),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = RuneLineConfig::load();
    let face = load_face(&config)?;
    let font = Font::new(face, config.font.pixel_size).context("failed to size font")?;
    let text = load_text(&config)?;

    let units = CodeUnits::encode(&text, config.text.encoding);
    let options = config
        .text
        .language
        .as_deref()
        .map(ShapeOptions::with_language)
        .unwrap_or_default();
    let mut layout = TextLayout::new(&font, units.source()).with_options(options);
    layout.layout().context("layout failed")?;

    print_layout(&layout, &font);

    let unshaped = text.chars().count();
    println!(
        "glyphs shaped: {}, unshaped: {}",
        layout.glyphs().len(),
        unshaped
    );
    Ok(())
}

fn load_face(config: &RuneLineConfig) -> Result<Arc<FontFace>> {
    match &config.font.path {
        Some(path) => {
            let mut cache = FontCache::new();
            cache
                .get_or_load(path, config.font.index as usize)
                .with_context(|| format!("failed to load font {}", path.display()))
        }
        None => {
            let face = load_system_default_font().context("no font configured and no system font found")?;
            Ok(Arc::new(face))
        }
    }
}

fn load_text(config: &RuneLineConfig) -> Result<String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let text = if !args.is_empty() {
        args.join(" ")
    } else if let Some(path) = &config.text.path {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read text file {}", path.display()))?
    } else {
        bail!("no text given: pass it as arguments or set [text] path / RUNE_LINE_TEXT");
    };

    // Single-line layout: drop the trailing newline most text files carry.
    let line = text.trim_end_matches(['\r', '\n']);
    if line.contains(['\n', '\u{2029}']) {
        info!("input holds several lines; laying them out as one");
    }
    Ok(line.to_owned())
}

fn print_layout(layout: &TextLayout<'_>, font: &Font) {
    println!(
        "font: {} px, ascender {} / descender {} (26.6)",
        font.pixel_size(),
        font.ascender(),
        font.descender()
    );

    println!("runs (visual order):");
    for (i, run) in layout.runs().iter().enumerate() {
        println!(
            "  #{i}: units {}..{} script {} shape {:?} paint {:?} level {} glyphs {:?}",
            run.offset,
            run.offset + run.length,
            run.script.short_name(),
            run.direction,
            run.bidi_direction,
            run.level,
            run.glyph_range
        );
    }

    println!("glyphs:");
    let placed = layout.positioned_glyphs(Point::zero());
    for (glyph, at) in layout.glyphs().iter().zip(placed) {
        println!(
            "  gid {:>5} cluster {:>4} at ({:8.2}, {:8.2}) advance ({:6.2}, {:6.2})",
            glyph.glyph_id,
            glyph.cluster,
            at.position.x,
            at.position.y,
            glyph.x_advance,
            glyph.y_advance
        );
    }

    let advance = layout.advance();
    println!("line advance: ({:.2}, {:.2})", advance.x, advance.y);
}

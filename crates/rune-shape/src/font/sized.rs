use core::fmt;
use std::sync::Arc;

use harfrust::{FontRef as HbFontRef, Shaper, ShaperData, ShaperInstance, Variation};

use crate::font::{FontError, FontFace, Result, ScaledFontMetrics};

/// Convert pixels to 26.6 fixed point (1/64 pixel).
pub fn to_fixed(px: f32) -> i32 {
    (px * 64.0).round() as i32
}

/// A font face at a fixed pixel size, ready for shaping.
///
/// Metric queries answer in 26.6 fixed point, the same unit the shaping
/// adapter produces before its single conversion to float pixels. The
/// font is never mutated by a layout and may be shared between layouts.
pub struct Font {
    face: Arc<FontFace>,
    pixel_size: f32,
    /// Font units → pixels.
    scale: f32,
    shaper_data: ShaperData,
    instance: ShaperInstance,
}

impl Font {
    pub fn new(face: impl Into<Arc<FontFace>>, pixel_size: f32) -> Result<Self> {
        if !pixel_size.is_finite() || pixel_size <= 0.0 {
            return Err(FontError::InvalidPixelSize(pixel_size));
        }
        let face = face.into();
        let font_ref =
            HbFontRef::from_index(face.data(), face.index()).map_err(|_| FontError::InvalidFont)?;
        let shaper_data = ShaperData::new(&font_ref);
        let instance = ShaperInstance::from_variations(&font_ref, core::iter::empty::<Variation>());
        let scale = face.metrics().scale_factor(pixel_size);
        Ok(Self {
            face,
            pixel_size,
            scale,
            shaper_data,
            instance,
        })
    }

    pub fn face(&self) -> &FontFace {
        &self.face
    }

    /// Pixels per em.
    pub fn pixel_size(&self) -> f32 {
        self.pixel_size
    }

    pub fn scaled_metrics(&self) -> ScaledFontMetrics {
        self.face.scaled_metrics(self.pixel_size)
    }

    pub fn ascender(&self) -> i32 {
        self.scaled_metrics().ascender_fixed()
    }

    pub fn descender(&self) -> i32 {
        self.scaled_metrics().descender_fixed()
    }

    /// Horizontal advance of a glyph in 26.6.
    pub fn glyph_h_advance(&self, glyph_id: u32) -> i32 {
        u16::try_from(glyph_id)
            .map(|gid| to_fixed(self.face.glyph_advance(gid) * self.scale))
            .unwrap_or(0)
    }

    /// Horizontal bearing (left side bearing) of a glyph in 26.6.
    pub fn glyph_h_bearing(&self, glyph_id: u32) -> i32 {
        u16::try_from(glyph_id)
            .map(|gid| to_fixed(self.face.glyph_lsb(gid) * self.scale))
            .unwrap_or(0)
    }

    /// Convert a value in font units to 26.6 at this font's size.
    pub fn scale_to_fixed(&self, units: i32) -> i32 {
        to_fixed(units as f32 * self.scale)
    }

    /// Run `f` with a shaper bound to this font.
    pub(crate) fn with_shaper<R>(&self, f: impl FnOnce(&Shaper<'_>) -> R) -> Result<R> {
        let font_ref = HbFontRef::from_index(self.face.data(), self.face.index())
            .map_err(|_| FontError::InvalidFont)?;
        let shaper = self
            .shaper_data
            .shaper(&font_ref)
            .instance(Some(&self.instance))
            .point_size(None)
            .build();
        Ok(f(&shaper))
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("face", &self.face)
            .field("pixel_size", &self.pixel_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::load_system_default_font;

    #[test]
    fn fixed_point_conversion_rounds_to_nearest() {
        assert_eq!(to_fixed(1.0), 64);
        assert_eq!(to_fixed(0.5), 32);
        assert_eq!(to_fixed(-2.25), -144);
        assert_eq!(to_fixed(1.0 / 128.0), 1);
    }

    #[test]
    fn rejects_non_positive_pixel_size() {
        let Ok(face) = load_system_default_font() else {
            return;
        };
        assert!(matches!(
            Font::new(face.clone(), 0.0),
            Err(FontError::InvalidPixelSize(_))
        ));
        assert!(Font::new(face, f32::NAN).is_err());
    }

    #[test]
    fn metrics_scale_with_pixel_size() {
        let Ok(face) = load_system_default_font() else {
            return;
        };
        let small = Font::new(face.clone(), 10.0).unwrap();
        let large = Font::new(face, 40.0).unwrap();
        assert!(small.ascender() > 0);
        assert!(large.ascender() > small.ascender());
        assert!(small.descender() <= 0);

        let gid = large.face().glyph_for_char('M') as u32;
        assert!(large.glyph_h_advance(gid) > small.glyph_h_advance(gid));
        assert_eq!(large.scale_to_fixed(0), 0);
    }
}

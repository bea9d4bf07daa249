use crate::font::to_fixed;

/// Font-level metrics in font units.
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    /// Ascent above baseline (positive).
    pub ascent: f32,
    /// Descent below baseline (positive).
    pub descent: f32,
    /// Line gap (leading).
    pub line_gap: f32,
    /// Units per em.
    pub units_per_em: u16,
    /// Cap height (optional).
    pub cap_height: Option<f32>,
    /// X-height (optional).
    pub x_height: Option<f32>,
}

impl FontMetrics {
    /// Factor converting font units to pixels at `font_size` px per em.
    pub fn scale_factor(&self, font_size: f32) -> f32 {
        if self.units_per_em != 0 {
            font_size / self.units_per_em as f32
        } else {
            1.0
        }
    }

    /// Scale metrics to pixel size, where `font_size` is in logical pixels
    /// (px per em).
    pub fn scale_to_pixels(&self, font_size: f32) -> ScaledFontMetrics {
        let scale = self.scale_factor(font_size);
        ScaledFontMetrics {
            ascent: self.ascent * scale,
            descent: self.descent * scale,
            line_gap: self.line_gap * scale,
            font_size,
        }
    }
}

/// Scaled font metrics in pixels.
#[derive(Debug, Clone, Copy)]
pub struct ScaledFontMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
    pub font_size: f32,
}

impl ScaledFontMetrics {
    /// Ascent in 26.6 fixed point.
    pub fn ascender_fixed(&self) -> i32 {
        to_fixed(self.ascent)
    }

    /// Descent in 26.6 fixed point, negative below the baseline.
    pub fn descender_fixed(&self) -> i32 {
        -to_fixed(self.descent)
    }

    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent + self.line_gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> FontMetrics {
        FontMetrics {
            ascent: 1536.0,
            descent: 512.0,
            line_gap: 0.0,
            units_per_em: 2048,
            cap_height: None,
            x_height: None,
        }
    }

    #[test]
    fn scales_font_units_to_pixels() {
        let scaled = metrics().scale_to_pixels(32.0);
        assert_eq!(scaled.ascent, 24.0);
        assert_eq!(scaled.descent, 8.0);
        assert_eq!(scaled.line_height(), 32.0);
    }

    #[test]
    fn fixed_point_ascender_and_descender() {
        let scaled = metrics().scale_to_pixels(32.0);
        assert_eq!(scaled.ascender_fixed(), 24 * 64);
        assert_eq!(scaled.descender_fixed(), -8 * 64);
    }

    #[test]
    fn zero_units_per_em_does_not_divide_by_zero() {
        let mut m = metrics();
        m.units_per_em = 0;
        assert_eq!(m.scale_factor(12.0), 1.0);
    }
}

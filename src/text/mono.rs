use crate::foundation::error::{GridError, GridResult};
use crate::text::shaper::{ShapedText, TextShaper, TextStyle};

/// Fixed-advance metrics with no glyph outlines.
///
/// Every `char` advances `advance_em * size_px`. Layout is identical to what a real face with
/// that advance would produce, but no glyphs are painted. Used for headless previews and for
/// tests that need deterministic text widths without shipping a font.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonoMetrics {
    advance_em: f64,
}

impl Default for MonoMetrics {
    fn default() -> Self {
        Self { advance_em: 0.5 }
    }
}

impl MonoMetrics {
    /// Half-em advance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Custom advance in ems; must be finite and > 0.
    pub fn with_advance(advance_em: f64) -> GridResult<Self> {
        if !advance_em.is_finite() || advance_em <= 0.0 {
            return Err(GridError::validation(
                "mono advance must be finite and > 0",
            ));
        }
        Ok(Self { advance_em })
    }

    /// Per-char advance at `size_px`.
    pub fn advance(&self, size_px: f32) -> f64 {
        self.advance_em * f64::from(size_px)
    }
}

impl TextShaper for MonoMetrics {
    fn measure(&mut self, text: &str, style: TextStyle) -> GridResult<f64> {
        Ok(text.chars().count() as f64 * self.advance(style.size_px))
    }

    fn shape(&mut self, _text: &str, _style: TextStyle) -> GridResult<Option<ShapedText>> {
        Ok(None)
    }
}

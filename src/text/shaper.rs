use crate::foundation::error::GridResult;

/// Which face a piece of text is set in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Board title (bold).
    Title,
    /// Label and title chips (semi-bold; served by the bold face when one is loaded).
    Pill,
    /// Attribution line (regular).
    Footer,
}

impl FontRole {
    /// Roles drawn with a heavy weight.
    pub fn is_bold(self) -> bool {
        matches!(self, Self::Title | Self::Pill)
    }
}

/// Font parameters shared by measurement and drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Face selector.
    pub role: FontRole,
    /// Font size in logical pixels.
    pub size_px: f32,
}

impl TextStyle {
    /// Style for `role` at `size_px`.
    pub fn new(role: FontRole, size_px: f32) -> Self {
        Self { role, size_px }
    }
}

/// A single shaped line ready for a glyph run.
///
/// Glyph `x` is relative to the left edge of the line and glyph `y` is relative to the
/// alphabetic baseline.
#[derive(Clone)]
pub struct ShapedText {
    /// Positioned glyphs.
    pub glyphs: Vec<vello_cpu::Glyph>,
    /// Face the glyph ids belong to.
    pub font: vello_cpu::peniko::FontData,
    /// Size the glyphs were shaped at.
    pub size_px: f32,
    /// Advance width of the line.
    pub width: f64,
    /// Distance from baseline to the top of the line box.
    pub ascent: f64,
    /// Distance from baseline to the bottom of the line box.
    pub descent: f64,
}

impl std::fmt::Debug for ShapedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapedText")
            .field("glyphs", &self.glyphs.len())
            .field("size_px", &self.size_px)
            .field("width", &self.width)
            .field("ascent", &self.ascent)
            .field("descent", &self.descent)
            .finish()
    }
}

/// Text measurement and shaping.
///
/// The compiler measures with [`TextShaper::measure`] and the backend draws what
/// [`TextShaper::shape`] returns, both with the same [`TextStyle`], so pill sizes always agree
/// with the drawn text. A shaper that returns `None` from `shape` lays text out but paints none.
pub trait TextShaper {
    /// Advance width of `text` as a single line.
    fn measure(&mut self, text: &str, style: TextStyle) -> GridResult<f64>;

    /// Shape `text` as a single line.
    fn shape(&mut self, text: &str, style: TextStyle) -> GridResult<Option<ShapedText>>;
}

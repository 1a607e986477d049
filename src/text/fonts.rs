use std::borrow::Cow;
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{GridError, GridResult};
use crate::text::shaper::{FontRole, ShapedText, TextShaper, TextStyle};

struct Face {
    family: String,
    data: vello_cpu::peniko::FontData,
}

/// Parley-backed [`TextShaper`] over caller-supplied font files.
///
/// Faces are registered once at construction. Title and pill text use the bold face when one
/// is given; otherwise every role falls back to the regular face.
pub struct FontBook {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    regular: Face,
    bold: Option<Face>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("regular", &self.regular.family)
            .field("bold", &self.bold.as_ref().map(|b| b.family.as_str()))
            .finish()
    }
}

impl FontBook {
    /// Register a regular face and an optional bold face from raw font bytes.
    pub fn from_bytes(regular: Vec<u8>, bold: Option<Vec<u8>>) -> GridResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let regular = register_face(&mut font_ctx, regular)?;
        let bold = bold
            .map(|bytes| register_face(&mut font_ctx, bytes))
            .transpose()?;
        tracing::debug!(
            regular = %regular.family,
            bold = ?bold.as_ref().map(|b| b.family.as_str()),
            "fonts registered"
        );
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            regular,
            bold,
        })
    }

    /// Read font files and register them.
    pub fn from_paths(regular: &Path, bold: Option<&Path>) -> GridResult<Self> {
        let read = |p: &Path| -> GridResult<Vec<u8>> {
            std::fs::read(p)
                .with_context(|| format!("read font '{}'", p.display()))
                .map_err(|e| GridError::font(format!("{e:#}")))
        };
        let regular = read(regular)?;
        let bold = bold.map(read).transpose()?;
        Self::from_bytes(regular, bold)
    }

    /// Family name of the regular face.
    pub fn regular_family(&self) -> &str {
        &self.regular.family
    }

    /// Family name of the bold face, if one was registered.
    pub fn bold_family(&self) -> Option<&str> {
        self.bold.as_ref().map(|b| b.family.as_str())
    }

    fn face_for(&self, role: FontRole) -> (&Face, bool) {
        match (&self.bold, role.is_bold()) {
            (Some(b), true) => (b, true),
            _ => (&self.regular, false),
        }
    }

    fn layout(&mut self, text: &str, style: TextStyle) -> GridResult<parley::Layout<()>> {
        if !style.size_px.is_finite() || style.size_px <= 0.0 {
            return Err(GridError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let (face, bold) = self.face_for(style.role);
        let family = face.family.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.size_px));
        if bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

fn register_face(font_ctx: &mut parley::FontContext, bytes: Vec<u8>) -> GridResult<Face> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| GridError::font("no font families registered from font bytes"))?;
    let family = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| GridError::font("registered font family has no name"))?
        .to_string();
    let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
    Ok(Face { family, data })
}

impl TextShaper for FontBook {
    fn measure(&mut self, text: &str, style: TextStyle) -> GridResult<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let layout = self.layout(text, style)?;
        Ok(f64::from(layout.full_width()))
    }

    fn shape(&mut self, text: &str, style: TextStyle) -> GridResult<Option<ShapedText>> {
        if text.is_empty() {
            return Ok(None);
        }
        let layout = self.layout(text, style)?;

        let mut glyphs = Vec::new();
        let mut baseline = None;
        let (mut ascent, mut descent) = (0.0f64, 0.0f64);
        for line in layout.lines() {
            let m = line.metrics();
            let base = *baseline.get_or_insert(m.baseline);
            ascent = ascent.max(f64::from(m.ascent));
            descent = descent.max(f64::from(m.descent));
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - base,
                }));
            }
        }

        let (face, _) = self.face_for(style.role);
        Ok(Some(ShapedText {
            glyphs,
            font: face.data.clone(),
            size_px: style.size_px,
            width: f64::from(layout.full_width()),
            ascent,
            descent,
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;

use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{GridError, GridResult};
use crate::style::color::ColorDef;

/// How a cell title that is too wide for its pill is shortened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TitlePolicy {
    /// Single line, cut with a trailing `...`.
    #[default]
    Ellipsis,
    /// Word-wrap up to `max_lines`, the last line cut with `...`.
    Wrap {
        /// Maximum number of lines (>= 1).
        max_lines: u32,
    },
}

/// Board title banner.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TitleStyle {
    /// Gradient stops, evenly spaced left to right. One entry paints a solid color.
    pub colors: Vec<ColorDef>,
    /// Starting (largest) font size.
    pub max_size: f32,
    /// Floor for the shrink-to-fit ladder.
    pub min_size: f32,
    /// Decrement per shrink step.
    pub step: f32,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            colors: vec![
                ColorDef::rgb(0x0f, 0x76, 0x6e),
                ColorDef::rgb(0x25, 0x63, 0xeb),
                ColorDef::rgb(0x0f, 0x76, 0x6e),
            ],
            max_size: 48.0,
            min_size: 24.0,
            step: 2.0,
        }
    }
}

/// Base card drawn for every visible cell.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardStyle {
    /// Card fill.
    pub fill: ColorDef,
    /// Optional 1px-class border.
    pub border: Option<ColorDef>,
    /// Border stroke width.
    pub border_width: f64,
    /// Corner radius, shared by the image clip.
    pub radius: f64,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            fill: ColorDef::rgba(255, 255, 255, 0.8),
            border: Some(ColorDef::rgb(229, 231, 235)),
            border_width: 1.0,
            radius: 12.0,
        }
    }
}

/// Ring drawn around cells labeled "Best Anime".
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HighlightRing {
    /// Ring color; alpha < 1 gives the translucent variant.
    pub color: ColorDef,
    /// Stroke width.
    pub width: f64,
    /// Distance the ring rectangle extends past the card on each side.
    pub outset: f64,
}

impl Default for HighlightRing {
    fn default() -> Self {
        Self {
            color: ColorDef::rgb(0xea, 0xb3, 0x08),
            width: 4.0,
            outset: 2.0,
        }
    }
}

/// Bottom darkening gradient behind the pills.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Gradient height measured up from the card bottom.
    pub height: f64,
    /// Color at the card bottom; the top of the band is fully transparent.
    pub color: ColorDef,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            height: 80.0,
            color: ColorDef::rgba(0, 0, 0, 0.8),
        }
    }
}

/// A rounded text chip.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PillStyle {
    /// Chip fill.
    pub fill: ColorDef,
    /// Text color.
    pub text: ColorDef,
    /// Text size.
    pub font_size: f32,
    /// Single-line chip height.
    pub height: f64,
    /// Extra height per additional wrapped line.
    pub line_height: f64,
    /// Corner radius.
    pub radius: f64,
    /// Horizontal padding on each side of the text.
    pub pad_x: f64,
    /// Room kept between shortened text and the right edge of a full-width chip.
    /// `None` keeps `pad_x`.
    pub end_pad: Option<f64>,
}

impl PillStyle {
    /// Widest text that fits a chip no wider than `max_pill`.
    pub fn text_room(&self, max_pill: f64) -> f64 {
        (max_pill - self.pad_x - self.end_pad.unwrap_or(self.pad_x)).max(0.0)
    }
}

impl Default for PillStyle {
    fn default() -> Self {
        Self {
            fill: ColorDef::rgba(255, 255, 255, 0.9),
            text: ColorDef::rgb(0x1f, 0x29, 0x37),
            font_size: 9.0,
            height: 18.0,
            line_height: 12.0,
            radius: 6.0,
            pad_x: 8.0,
            end_pad: None,
        }
    }
}

/// Pill placement inside a cell.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PillLayout {
    /// Left inset of both pills; also the right margin used to clamp pill width.
    pub inset: f64,
    /// Gap between the title pill and the card bottom.
    pub bottom: f64,
    /// Vertical gap between label pill and title pill.
    pub gap: f64,
}

impl Default for PillLayout {
    fn default() -> Self {
        Self {
            inset: 12.0,
            bottom: 6.0,
            gap: 8.0,
        }
    }
}

/// Attribution line at the bottom of the board.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FooterStyle {
    /// Attribution text.
    pub text: String,
    /// Text color.
    pub color: ColorDef,
    /// Text size.
    pub font_size: f32,
}

impl Default for FooterStyle {
    fn default() -> Self {
        Self {
            text: "Made by @Pesto808".to_string(),
            color: ColorDef::rgb(0x6b, 0x72, 0x80),
            font_size: 12.0,
        }
    }
}

/// Full visual template for the rasterizer.
///
/// Layout geometry (canvas width, gap, title ladder) is fixed; everything that differs between
/// the light and dark boards lives here. Missing JSON fields fall back to [`Theme::daylight`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Canvas fill behind everything.
    pub background: ColorDef,
    /// Title banner.
    pub title: TitleStyle,
    /// Title used when no username is given.
    pub fallback_title: String,
    /// Base card.
    pub card: CardStyle,
    /// "Best Anime" ring.
    pub highlight: HighlightRing,
    /// Image bottom overlay.
    pub overlay: OverlayStyle,
    /// Label chip.
    pub label_pill: PillStyle,
    /// Title chip.
    pub title_pill: PillStyle,
    /// Chip placement.
    pub pills: PillLayout,
    /// Title shortening rule.
    pub title_policy: TitlePolicy,
    /// Footer line.
    pub footer: FooterStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self::daylight()
    }
}

impl Theme {
    /// Light board: gradient title, translucent white cards, opaque ring, ellipsis titles.
    pub fn daylight() -> Self {
        Self {
            background: ColorDef::rgb(0xfa, 0xfa, 0xfa),
            title: TitleStyle::default(),
            fallback_title: "Year in Review".to_string(),
            card: CardStyle::default(),
            highlight: HighlightRing::default(),
            overlay: OverlayStyle::default(),
            label_pill: PillStyle {
                fill: ColorDef::rgb(0x14, 0xb8, 0xa6),
                text: ColorDef::rgb(255, 255, 255),
                radius: 9.0,
                ..PillStyle::default()
            },
            title_pill: PillStyle {
                end_pad: Some(0.0),
                ..PillStyle::default()
            },
            pills: PillLayout::default(),
            title_policy: TitlePolicy::Ellipsis,
            footer: FooterStyle::default(),
        }
    }

    /// Dark board: solid blue title, slate cards, translucent ring, two-line titles.
    pub fn slate() -> Self {
        Self {
            background: ColorDef::rgb(15, 23, 42),
            title: TitleStyle {
                colors: vec![ColorDef::rgb(96, 165, 250)],
                ..TitleStyle::default()
            },
            fallback_title: "ANIME IN REVIEW 2024".to_string(),
            card: CardStyle {
                fill: ColorDef::rgb(30, 41, 59),
                border: None,
                border_width: 0.0,
                radius: 8.0,
            },
            highlight: HighlightRing {
                color: ColorDef::rgba(234, 179, 8, 0.5),
                ..HighlightRing::default()
            },
            overlay: OverlayStyle {
                height: 96.0,
                color: ColorDef::rgba(15, 23, 42, 0.85),
            },
            label_pill: PillStyle {
                fill: ColorDef::rgba(37, 99, 235, 0.8),
                text: ColorDef::rgb(255, 255, 255),
                font_size: 14.0,
                height: 24.0,
                line_height: 18.0,
                radius: 4.0,
                pad_x: 10.0,
                end_pad: None,
            },
            title_pill: PillStyle {
                fill: ColorDef::rgba(15, 23, 42, 0.7),
                text: ColorDef::rgb(255, 255, 255),
                font_size: 14.0,
                height: 24.0,
                line_height: 18.0,
                radius: 4.0,
                pad_x: 10.0,
                end_pad: None,
            },
            pills: PillLayout {
                inset: 16.0,
                bottom: 6.0,
                gap: 6.0,
            },
            title_policy: TitlePolicy::Wrap { max_lines: 2 },
            footer: FooterStyle {
                color: ColorDef::rgb(148, 163, 184),
                ..FooterStyle::default()
            },
        }
    }

    /// Look up a built-in theme by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "daylight" | "light" => Some(Self::daylight()),
            "slate" | "dark" => Some(Self::slate()),
            _ => None,
        }
    }

    /// Parse a theme from JSON text and validate it.
    pub fn from_json_str(s: &str) -> GridResult<Self> {
        let theme: Self = serde_json::from_str(s).map_err(|e| GridError::serde(e.to_string()))?;
        theme.validate()?;
        Ok(theme)
    }

    /// Read a theme JSON file.
    pub fn from_path(path: &Path) -> GridResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read theme '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check numeric ranges that would otherwise produce degenerate layouts.
    pub fn validate(&self) -> GridResult<()> {
        let t = &self.title;
        if t.colors.is_empty() {
            return Err(GridError::validation("title.colors must not be empty"));
        }
        if !(t.min_size.is_finite() && t.max_size.is_finite() && t.step.is_finite()) {
            return Err(GridError::validation("title sizes must be finite"));
        }
        if t.min_size <= 0.0 || t.min_size > t.max_size {
            return Err(GridError::validation(
                "title sizes must satisfy 0 < min_size <= max_size",
            ));
        }
        if t.step <= 0.0 {
            return Err(GridError::validation("title.step must be > 0"));
        }
        for (name, pill) in [("label_pill", &self.label_pill), ("title_pill", &self.title_pill)] {
            if !(pill.font_size.is_finite() && pill.font_size > 0.0) {
                return Err(GridError::validation(format!(
                    "{name}.font_size must be finite and > 0"
                )));
            }
            if pill.height <= 0.0
                || pill.line_height < 0.0
                || pill.pad_x < 0.0
                || pill.end_pad.is_some_and(|p| !p.is_finite() || p < 0.0)
            {
                return Err(GridError::validation(format!(
                    "{name} geometry must be non-negative with height > 0"
                )));
            }
        }
        if !(self.footer.font_size.is_finite() && self.footer.font_size > 0.0) {
            return Err(GridError::validation(
                "footer.font_size must be finite and > 0",
            ));
        }
        if let TitlePolicy::Wrap { max_lines: 0 } = self.title_policy {
            return Err(GridError::validation("title_policy.max_lines must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/theme.rs"]
mod tests;

use std::ops::Range;

use kurbo::Shape;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::GridResult;
use crate::grid::model::{Cell, RenderSpec};
use crate::layout::grid::{
    GridLayout, SCALE, TITLE_MAX_WIDTH, circle_path, cover_fit, rounded_rect_path,
};
use crate::style::theme::{PillStyle, Theme, TitlePolicy};
use crate::text::fit::{fit_font_size, truncate_with_ellipsis, wrap_lines};
use crate::text::shaper::{FontRole, TextShaper, TextStyle};

const FOOTER_TEXT_X: f64 = 12.0;
const FOOTER_BASELINE_LIFT: f64 = 8.0;
const LOGO_X: f64 = 12.0;
const LOGO_SIZE: f64 = 20.0;
const LOGO_TOP_LIFT: f64 = 36.0;
const LOGO_TEXT_X: f64 = 40.0;
const LOGO_TEXT_BASELINE_LIFT: f64 = 22.0;

/// Fill style for paths and text.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    /// Single color.
    Solid(Rgba8),
    /// Linear gradient in logical canvas coordinates.
    Linear {
        /// Offset 0 position.
        start: Point,
        /// Offset 1 position.
        end: Point,
        /// `(offset, color)` pairs, offsets ascending in `[0, 1]`.
        stops: Vec<(f32, Rgba8)>,
    },
}

/// Horizontal anchor of a text op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    /// `origin.x` is the left edge.
    Left,
    /// `origin.x` is the horizontal center.
    Center,
}

/// Vertical anchor of a text op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    /// `origin.y` is the alphabetic baseline.
    Alphabetic,
    /// `origin.y` is the middle of the line box.
    Middle,
}

/// One drawing command. Coordinates are logical px; the backend applies the device scale.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill a closed path.
    FillPath {
        /// Outline.
        path: BezPath,
        /// Fill.
        paint: Paint,
    },
    /// Stroke a path outline.
    StrokePath {
        /// Outline.
        path: BezPath,
        /// Stroke width.
        width: f64,
        /// Stroke color.
        color: Rgba8,
    },
    /// Draw `GridPlan::images[image]` scaled into `dest`, clipped to `clip`.
    Image {
        /// Index into [`GridPlan::images`].
        image: usize,
        /// Destination rect for the whole image.
        dest: Rect,
        /// Clip region.
        clip: BezPath,
    },
    /// A single line of text.
    Text {
        /// Text content, already truncated.
        text: String,
        /// Font parameters, identical to those used for measurement.
        style: TextStyle,
        /// Anchor point.
        origin: Point,
        /// Horizontal anchor.
        align: TextAlign,
        /// Vertical anchor.
        baseline: TextBaseline,
        /// Fill.
        paint: Paint,
    },
}

/// Ordered draw list for one board.
#[derive(Clone, Debug)]
pub struct GridPlan {
    /// Logical canvas.
    pub canvas: Canvas,
    /// Device scale applied once before any op.
    pub scale: f64,
    /// Geometry the ops were laid out with.
    pub layout: GridLayout,
    /// Board title as drawn.
    pub title: String,
    /// Ops, executed strictly in order.
    pub ops: Vec<DrawOp>,
    /// Images referenced by [`DrawOp::Image`].
    pub images: Vec<PreparedImage>,
    /// Op range emitted for each visible cell, in cell order.
    pub cell_ops: Vec<Range<usize>>,
}

impl GridPlan {
    /// Output size in device pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.canvas.pixel_size(self.scale)
    }
}

/// Title shown above the grid.
pub fn board_title(spec: &RenderSpec, theme: &Theme) -> String {
    match spec.display_name() {
        Some(name) => format!("{name}'s Year in Review"),
        None => theme.fallback_title.clone(),
    }
}

/// Compile a validated spec into an ordered draw list.
///
/// `images[i]` is the prepared image for visible cell `i`; `None` (or a missing entry) means
/// the cell has no image or its load failed, and only the base card is emitted for it.
#[tracing::instrument(skip_all, fields(grid = %spec.grid_size))]
pub fn compile_grid(
    spec: &RenderSpec,
    theme: &Theme,
    images: &[Option<PreparedImage>],
    logo: Option<&PreparedImage>,
    shaper: &mut dyn TextShaper,
) -> GridResult<GridPlan> {
    spec.validate()?;
    theme.validate()?;

    let title = board_title(spec, theme);
    let title_size = fit_font_size(
        shaper,
        &title,
        FontRole::Title,
        TITLE_MAX_WIDTH,
        theme.title.max_size,
        theme.title.min_size,
        theme.title.step,
    )?;
    let layout = GridLayout::new(spec.grid_size, title_size);
    let canvas = layout.canvas();

    let mut b = PlanBuilder {
        ops: Vec::new(),
        images: Vec::new(),
    };

    b.ops.push(DrawOp::FillPath {
        path: Rect::new(0.0, 0.0, canvas.width, canvas.height).to_path(0.1),
        paint: Paint::Solid(theme.background.rgba8()),
    });
    b.ops.push(DrawOp::Text {
        text: title.clone(),
        style: TextStyle::new(FontRole::Title, title_size),
        origin: layout.title_anchor(),
        align: TextAlign::Center,
        baseline: TextBaseline::Alphabetic,
        paint: title_paint(theme, &layout),
    });

    let mut cell_ops = Vec::with_capacity(spec.grid_size.visible_cells());
    for (i, cell) in spec.visible_cells().iter().enumerate() {
        let start = b.ops.len();
        let image = images.get(i).and_then(Option::as_ref);
        b.cell(theme, layout.cell_rect(i), cell, image, shaper)?;
        cell_ops.push(start..b.ops.len());
    }

    b.footer(theme, canvas, logo);

    tracing::debug!(ops = b.ops.len(), images = b.images.len(), title_size, "plan compiled");
    Ok(GridPlan {
        canvas,
        scale: SCALE,
        layout,
        title,
        ops: b.ops,
        images: b.images,
        cell_ops,
    })
}

fn title_paint(theme: &Theme, layout: &GridLayout) -> Paint {
    let colors = &theme.title.colors;
    if colors.len() == 1 {
        return Paint::Solid(colors[0].rgba8());
    }
    let (start, end) = layout.title_sweep();
    let last = (colors.len() - 1).max(1) as f32;
    Paint::Linear {
        start,
        end,
        stops: colors
            .iter()
            .enumerate()
            .map(|(i, c)| (i as f32 / last, c.rgba8()))
            .collect(),
    }
}

struct PlanBuilder {
    ops: Vec<DrawOp>,
    images: Vec<PreparedImage>,
}

impl PlanBuilder {
    fn push_image(&mut self, image: &PreparedImage) -> usize {
        self.images.push(image.clone());
        self.images.len() - 1
    }

    fn cell(
        &mut self,
        theme: &Theme,
        rect: Rect,
        cell: &Cell,
        image: Option<&PreparedImage>,
        shaper: &mut dyn TextShaper,
    ) -> GridResult<()> {
        let card = rounded_rect_path(rect, theme.card.radius);
        self.ops.push(DrawOp::FillPath {
            path: card.clone(),
            paint: Paint::Solid(theme.card.fill.rgba8()),
        });
        if let Some(border) = theme.card.border {
            self.ops.push(DrawOp::StrokePath {
                path: card.clone(),
                width: theme.card.border_width,
                color: border.rgba8(),
            });
        }

        if cell.is_best() {
            let ring = &theme.highlight;
            self.ops.push(DrawOp::StrokePath {
                path: rounded_rect_path(
                    rect.inflate(ring.outset, ring.outset),
                    theme.card.radius + ring.outset,
                ),
                width: ring.width,
                color: ring.color.rgba8(),
            });
        }

        let Some(image) = image.filter(|_| cell.is_occupied()) else {
            return Ok(());
        };

        let idx = self.push_image(image);
        self.ops.push(DrawOp::Image {
            image: idx,
            dest: cover_fit(image.width, image.height, rect),
            clip: card.clone(),
        });

        let shade = theme.overlay.color.rgba8();
        self.ops.push(DrawOp::FillPath {
            path: card,
            paint: Paint::Linear {
                start: Point::new(rect.x0, rect.y1 - theme.overlay.height),
                end: Point::new(rect.x0, rect.y1),
                stops: vec![(0.0, Rgba8 { a: 0, ..shade }), (1.0, shade)],
            },
        });

        self.pills(theme, rect, cell, shaper)
    }

    fn pills(
        &mut self,
        theme: &Theme,
        rect: Rect,
        cell: &Cell,
        shaper: &mut dyn TextShaper,
    ) -> GridResult<()> {
        let layout = &theme.pills;
        let left = rect.x0 + layout.inset;
        let max_pill = (rect.width() - 2.0 * layout.inset).max(0.0);

        let tp = &theme.title_pill;
        let title_style = TextStyle::new(FontRole::Pill, tp.font_size);
        let text_max = tp.text_room(max_pill);
        let lines = match theme.title_policy {
            TitlePolicy::Ellipsis => vec![truncate_with_ellipsis(
                shaper,
                &cell.title,
                title_style,
                text_max,
            )?],
            TitlePolicy::Wrap { max_lines } => {
                wrap_lines(shaper, &cell.title, title_style, text_max, max_lines)?
            }
        };
        let mut widest = 0.0f64;
        for line in &lines {
            widest = widest.max(shaper.measure(line, title_style)?);
        }
        let title_h = tp.height + (lines.len().saturating_sub(1)) as f64 * tp.line_height;
        let title_top = rect.y1 - layout.bottom - title_h;
        let title_rect = Rect::new(
            left,
            title_top,
            left + (widest + 2.0 * tp.pad_x).min(max_pill),
            title_top + title_h,
        );

        if !cell.label.is_empty() {
            let lp = &theme.label_pill;
            let style = TextStyle::new(FontRole::Pill, lp.font_size);
            let label = truncate_with_ellipsis(
                shaper,
                &cell.label,
                style,
                lp.text_room(max_pill),
            )?;
            let w = shaper.measure(&label, style)? + 2.0 * lp.pad_x;
            let bottom = title_top - layout.gap;
            let label_rect = Rect::new(left, bottom - lp.height, left + w.min(max_pill), bottom);
            self.pill(lp, style, label_rect, std::slice::from_ref(&label));
        }

        self.pill(tp, title_style, title_rect, &lines);
        Ok(())
    }

    fn pill(&mut self, style: &PillStyle, text_style: TextStyle, rect: Rect, lines: &[String]) {
        self.ops.push(DrawOp::FillPath {
            path: rounded_rect_path(rect, style.radius),
            paint: Paint::Solid(style.fill.rgba8()),
        });
        let center = rect.y0 + rect.height() / 2.0;
        let mid = (lines.len() as f64 - 1.0) / 2.0;
        for (k, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            self.ops.push(DrawOp::Text {
                text: line.clone(),
                style: text_style,
                origin: Point::new(
                    rect.x0 + style.pad_x,
                    center + (k as f64 - mid) * style.line_height,
                ),
                align: TextAlign::Left,
                baseline: TextBaseline::Middle,
                paint: Paint::Solid(style.text.rgba8()),
            });
        }
    }

    fn footer(&mut self, theme: &Theme, canvas: Canvas, logo: Option<&PreparedImage>) {
        let footer = &theme.footer;
        let origin = match logo {
            Some(logo) => {
                let top = canvas.height - LOGO_TOP_LIFT;
                let frame = Rect::new(LOGO_X, top, LOGO_X + LOGO_SIZE, top + LOGO_SIZE);
                let idx = self.push_image(logo);
                self.ops.push(DrawOp::Image {
                    image: idx,
                    dest: cover_fit(logo.width, logo.height, frame),
                    clip: circle_path(frame.center(), LOGO_SIZE / 2.0),
                });
                Point::new(LOGO_TEXT_X, canvas.height - LOGO_TEXT_BASELINE_LIFT)
            }
            None => Point::new(FOOTER_TEXT_X, canvas.height - FOOTER_BASELINE_LIFT),
        };
        if footer.text.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Text {
            text: footer.text.clone(),
            style: TextStyle::new(FontRole::Footer, footer.font_size),
            origin,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
            paint: Paint::Solid(footer.color.rgba8()),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;

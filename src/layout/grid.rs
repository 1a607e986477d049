use kurbo::Shape;

use crate::foundation::core::{BezPath, Canvas, Point, Rect};
use crate::grid::model::GridSize;

/// Width of the cell grid in logical px.
pub const GRID_WIDTH: f64 = 672.0;
/// Horizontal padding split evenly left and right of the grid.
pub const PADDING: f64 = 36.0;
/// Full canvas width in logical px.
pub const TOTAL_WIDTH: f64 = GRID_WIDTH + PADDING;
/// Left edge of the grid.
pub const LEFT_MARGIN: f64 = PADDING / 2.0;
/// Gap between neighbouring cells.
pub const GAP: f64 = 12.0;
/// Height of the footer band.
pub const FOOTER_HEIGHT: f64 = 60.0;
/// Device pixels per logical px.
pub const SCALE: f64 = 2.0;
/// Widest the board title may be set.
pub const TITLE_MAX_WIDTH: f64 = GRID_WIDTH - 40.0;

const TITLE_MIN_HEIGHT: f64 = 100.0;
const TITLE_HEIGHT_EXTRA: f64 = 52.0;
const TITLE_BASELINE_LIFT: f64 = 40.0;
const TITLE_SWEEP_HALF: f64 = 200.0;

/// Resolved board geometry for one grid size and title font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    /// Cells per side.
    pub grid_size: GridSize,
    /// Side length of one square cell.
    pub cell_size: f64,
    /// Height of the whole cell block.
    pub grid_height: f64,
    /// Fitted title font size.
    pub title_font_size: f32,
    /// Height of the title band above the grid.
    pub title_height: f64,
    /// Total logical canvas height.
    pub canvas_height: f64,
}

impl GridLayout {
    /// Geometry for `grid_size` with the title set at `title_font_size`.
    pub fn new(grid_size: GridSize, title_font_size: f32) -> Self {
        let n = f64::from(grid_size.side());
        let cell_size = (GRID_WIDTH - GAP * (n - 1.0)) / n;
        let grid_height = cell_size * n + GAP * (n - 1.0);
        let title_height = TITLE_MIN_HEIGHT.max(f64::from(title_font_size) + TITLE_HEIGHT_EXTRA);
        Self {
            grid_size,
            cell_size,
            grid_height,
            title_font_size,
            title_height,
            canvas_height: title_height + grid_height + FOOTER_HEIGHT,
        }
    }

    /// Logical canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: TOTAL_WIDTH,
            height: self.canvas_height,
        }
    }

    /// Output width in device pixels.
    pub fn pixel_width(&self) -> u32 {
        self.canvas().pixel_size(SCALE).0
    }

    /// Output height in device pixels.
    pub fn pixel_height(&self) -> u32 {
        self.canvas().pixel_size(SCALE).1
    }

    /// Top-left corner of cell `index` (row-major).
    pub fn cell_origin(&self, index: usize) -> Point {
        let side = self.grid_size.side() as usize;
        let (row, col) = (index / side, index % side);
        let stride = self.cell_size + GAP;
        Point::new(
            LEFT_MARGIN + col as f64 * stride,
            self.title_height + row as f64 * stride,
        )
    }

    /// Square occupied by cell `index`.
    pub fn cell_rect(&self, index: usize) -> Rect {
        let o = self.cell_origin(index);
        Rect::new(o.x, o.y, o.x + self.cell_size, o.y + self.cell_size)
    }

    /// Center-aligned alphabetic baseline anchor of the board title.
    pub fn title_anchor(&self) -> Point {
        Point::new(TOTAL_WIDTH / 2.0, self.title_height - TITLE_BASELINE_LIFT)
    }

    /// Start and end of the horizontal title gradient.
    pub fn title_sweep(&self) -> (Point, Point) {
        let a = self.title_anchor();
        (
            Point::new(a.x - TITLE_SWEEP_HALF, a.y),
            Point::new(a.x + TITLE_SWEEP_HALF, a.y),
        )
    }
}

/// Destination rect that covers `target` with an `img_w × img_h` image, keeping the aspect
/// ratio and centering the overflow.
pub fn cover_fit(img_w: u32, img_h: u32, target: Rect) -> Rect {
    let (tw, th) = (target.width(), target.height());
    if img_w == 0 || img_h == 0 || tw <= 0.0 || th <= 0.0 {
        return target;
    }
    let scale = (tw / f64::from(img_w)).max(th / f64::from(img_h));
    let (w, h) = (f64::from(img_w) * scale, f64::from(img_h) * scale);
    let x0 = target.x0 - (w - tw) / 2.0;
    let y0 = target.y0 - (h - th) / 2.0;
    Rect::new(x0, y0, x0 + w, y0 + h)
}

/// Rounded rectangle with quadratic corners; `radius` is clamped to half the shorter side.
pub fn rounded_rect_path(rect: Rect, radius: f64) -> BezPath {
    let r = radius.max(0.0).min(rect.width().min(rect.height()) / 2.0);
    let Rect { x0, y0, x1, y1 } = rect;

    let mut p = BezPath::new();
    p.move_to((x0 + r, y0));
    p.line_to((x1 - r, y0));
    p.quad_to((x1, y0), (x1, y0 + r));
    p.line_to((x1, y1 - r));
    p.quad_to((x1, y1), (x1 - r, y1));
    p.line_to((x0 + r, y1));
    p.quad_to((x0, y1), (x0, y1 - r));
    p.line_to((x0, y0 + r));
    p.quad_to((x0, y0), (x0 + r, y0));
    p.close_path();
    p
}

/// Circle outline.
pub fn circle_path(center: Point, radius: f64) -> BezPath {
    kurbo::Circle::new(center, radius.max(0.0)).to_path(0.1)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;

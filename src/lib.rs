//! reviewgrid renders "year in review" boards: an N×N grid of cover images with label and
//! title chips, a fitted title banner and a footer credit, exported as a 2× PNG.
//!
//! The pipeline is CPU-only and deterministic:
//!
//! - Describe the board with a [`RenderSpec`] and pick a [`Theme`]
//! - Build a [`Rasterizer`] (fonts, image loader, thread pool)
//! - [`Rasterizer::render`] loads cell images in parallel, compiles an ordered [`GridPlan`],
//!   draws it with [`CpuBackend`] and encodes PNG
//!
//! Per-cell image failures are logged and the cell falls back to its empty card; only
//! call-level failures (bad input, fonts, surface, encoding) surface as [`GridError`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compile;
mod encode;
mod foundation;
mod grid;
mod layout;
mod rasterizer;
mod render;
mod style;
mod text;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Rgba8Premul, Vec2};
pub use crate::foundation::error::{GridError, GridResult};

pub use crate::assets::decode::{PreparedImage, decode_image};
pub use crate::assets::loader::{
    DefaultLoader, ImageLoader, load_cell_images, load_image, load_optional,
};
pub use crate::assets::source::{ImageSource, decode_inline, encode_data_uri};
pub use crate::compile::plan::{
    DrawOp, GridPlan, Paint, TextAlign, TextBaseline, board_title, compile_grid,
};
pub use crate::encode::png::encode_png;
pub use crate::grid::model::{BEST_ANIME_LABEL, CELL_CAPACITY, Cell, GridSize, RenderSpec};
pub use crate::layout::grid::{
    FOOTER_HEIGHT, GAP, GRID_WIDTH, GridLayout, LEFT_MARGIN, PADDING, SCALE, TITLE_MAX_WIDTH,
    TOTAL_WIDTH, circle_path, cover_fit, rounded_rect_path,
};
pub use crate::rasterizer::{FontConfig, RasterOpts, Rasterizer, RenderedImage, render_grid};
pub use crate::render::backend::{FrameRGBA, RenderBackend};
pub use crate::render::cpu::CpuBackend;
pub use crate::style::color::ColorDef;
pub use crate::style::theme::{
    CardStyle, FooterStyle, HighlightRing, OverlayStyle, PillLayout, PillStyle, Theme,
    TitlePolicy, TitleStyle,
};
pub use crate::text::fit::{ELLIPSIS, fit_font_size, truncate_with_ellipsis, wrap_lines};
pub use crate::text::fonts::FontBook;
pub use crate::text::mono::MonoMetrics;
pub use crate::text::shaper::{FontRole, ShapedText, TextShaper, TextStyle};

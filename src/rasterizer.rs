use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::assets::loader::{
    DefaultLoader, ImageLoader, build_thread_pool, load_cell_images, load_optional,
};
use crate::compile::plan::{GridPlan, compile_grid};
use crate::encode::png::encode_png;
use crate::foundation::error::GridResult;
use crate::grid::model::RenderSpec;
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::cpu::CpuBackend;
use crate::style::theme::Theme;
use crate::text::fonts::FontBook;
use crate::text::shaper::TextShaper;

/// Font files backing [`Rasterizer::new`].
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FontConfig {
    /// Regular face; used for the footer and as fallback for every role.
    pub regular: PathBuf,
    /// Optional bold face for the title and pills.
    #[serde(default)]
    pub bold: Option<PathBuf>,
}

/// Options for building a [`Rasterizer`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RasterOpts {
    /// Visual template.
    pub theme: Theme,
    /// Fonts loaded by [`Rasterizer::new`]; ignored by [`Rasterizer::with_shaper`].
    pub fonts: FontConfig,
    /// Optional footer logo source (path, URL or data URI).
    pub logo: Option<String>,
    /// Directory relative image paths resolve against.
    pub assets_root: PathBuf,
    /// Image loading threads; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            theme: Theme::daylight(),
            fonts: FontConfig::default(),
            logo: None,
            assets_root: PathBuf::from("."),
            threads: None,
        }
    }
}

/// Encoded output of one render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedImage {
    /// PNG bytes.
    pub png: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl RenderedImage {
    /// Write the PNG to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> GridResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(path, &self.png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Turns [`RenderSpec`]s into PNG boards.
///
/// Fonts, theme, loader and thread pool are prepared once; each render loads the cell images,
/// compiles a fresh [`GridPlan`] and draws it on a fresh surface, so calls share no drawing
/// state.
pub struct Rasterizer {
    theme: Theme,
    logo: Option<String>,
    loader: Box<dyn ImageLoader>,
    shaper: Box<dyn TextShaper>,
    pool: rayon::ThreadPool,
    backend: CpuBackend,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("logo", &self.logo)
            .field("threads", &self.pool.current_num_threads())
            .finish_non_exhaustive()
    }
}

impl Rasterizer {
    /// Load the configured fonts and build a rasterizer. Font failures are fatal.
    pub fn new(opts: RasterOpts) -> GridResult<Self> {
        let fonts = FontBook::from_paths(&opts.fonts.regular, opts.fonts.bold.as_deref())?;
        Self::with_shaper(opts, fonts)
    }

    /// Build a rasterizer around any [`TextShaper`].
    pub fn with_shaper(opts: RasterOpts, shaper: impl TextShaper + 'static) -> GridResult<Self> {
        opts.theme.validate()?;
        Ok(Self {
            pool: build_thread_pool(opts.threads)?,
            loader: Box::new(DefaultLoader::new(opts.assets_root)?),
            theme: opts.theme,
            logo: opts.logo,
            shaper: Box::new(shaper),
            backend: CpuBackend::new(),
        })
    }

    /// Replace the image loader.
    pub fn with_loader(mut self, loader: impl ImageLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Active theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Load images and compile the draw list without rasterizing.
    #[tracing::instrument(skip_all, fields(grid = %spec.grid_size))]
    pub fn plan(&mut self, spec: &RenderSpec) -> GridResult<GridPlan> {
        spec.validate()?;
        let images = load_cell_images(spec.visible_cells(), self.loader.as_ref(), &self.pool);
        let logo = load_optional(self.loader.as_ref(), self.logo.as_deref());
        compile_grid(
            spec,
            &self.theme,
            &images,
            logo.as_ref(),
            self.shaper.as_mut(),
        )
    }

    /// Rasterize to a premultiplied frame.
    pub fn render_frame(&mut self, spec: &RenderSpec) -> GridResult<FrameRGBA> {
        let plan = self.plan(spec)?;
        self.backend.render_plan(&plan, self.shaper.as_mut())
    }

    /// Rasterize and encode as PNG.
    #[tracing::instrument(skip_all)]
    pub fn render(&mut self, spec: &RenderSpec) -> GridResult<RenderedImage> {
        let frame = self.render_frame(spec)?;
        let png = encode_png(&frame)?;
        tracing::debug!(
            w = frame.width,
            h = frame.height,
            bytes = png.len(),
            "board encoded"
        );
        Ok(RenderedImage {
            png,
            width: frame.width,
            height: frame.height,
        })
    }
}

/// One-shot convenience: build a [`Rasterizer`] from `opts` and render `spec`.
pub fn render_grid(spec: &RenderSpec, opts: RasterOpts) -> GridResult<RenderedImage> {
    Rasterizer::new(opts)?.render(spec)
}

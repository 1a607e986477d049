use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;

use crate::assets::decode::{PreparedImage, decode_image};
use crate::assets::source::{ImageSource, decode_inline};
use crate::foundation::error::{GridError, GridResult};
use crate::grid::model::Cell;

/// Resolves an [`ImageSource`] into encoded image bytes.
///
/// Implementations are shared across the loading pool, so they must be `Send + Sync`.
pub trait ImageLoader: Send + Sync {
    /// Fetch the encoded bytes behind `source`.
    fn load_bytes(&self, source: &ImageSource) -> GridResult<Vec<u8>>;
}

/// Loader for inline data, local files and (with the `http` feature) remote URLs.
#[derive(Debug, Clone)]
pub struct DefaultLoader {
    root: PathBuf,
    #[cfg(feature = "http")]
    client: reqwest::blocking::Client,
}

impl DefaultLoader {
    /// Loader resolving relative file paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> GridResult<Self> {
        Ok(Self {
            root: root.into(),
            #[cfg(feature = "http")]
            client: crate::assets::fetch::build_client()?,
        })
    }

    /// Directory relative paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_file(&self, path: &Path) -> GridResult<Vec<u8>> {
        let p = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        Ok(std::fs::read(&p).with_context(|| format!("read image '{}'", p.display()))?)
    }
}

impl ImageLoader for DefaultLoader {
    fn load_bytes(&self, source: &ImageSource) -> GridResult<Vec<u8>> {
        match source {
            ImageSource::Inline(s) => decode_inline(s),
            ImageSource::File(p) => self.read_file(p),
            #[cfg(feature = "http")]
            ImageSource::Remote(url) => crate::assets::fetch::fetch_bytes(&self.client, url),
            #[cfg(not(feature = "http"))]
            ImageSource::Remote(_) => Err(GridError::validation(
                "remote image sources need the `http` feature",
            )),
        }
    }
}

/// Load and decode one source, folding every failure into [`GridError::ImageLoad`].
pub fn load_image(loader: &dyn ImageLoader, source: &ImageSource) -> GridResult<PreparedImage> {
    loader
        .load_bytes(source)
        .and_then(|bytes| decode_image(&bytes))
        .map_err(|e| match e {
            e @ GridError::ImageLoad { .. } => e,
            other => GridError::image_load(source.describe(), other.to_string()),
        })
}

/// Load the images for `cells` on `pool`, returning one slot per cell in input order.
///
/// Empty cells yield `None`. A failed load also yields `None` after a warning; it never aborts
/// the batch.
#[tracing::instrument(skip_all, fields(cells = cells.len()))]
pub fn load_cell_images(
    cells: &[Cell],
    loader: &dyn ImageLoader,
    pool: &rayon::ThreadPool,
) -> Vec<Option<PreparedImage>> {
    pool.install(|| {
        cells
            .par_iter()
            .enumerate()
            .map(|(index, cell)| {
                let source = ImageSource::for_cell(cell)?;
                match load_image(loader, &source) {
                    Ok(img) => {
                        tracing::debug!(index, w = img.width, h = img.height, "cell image ready");
                        Some(img)
                    }
                    Err(e) => {
                        tracing::warn!(index, error = %e, "cell image failed; drawing empty card");
                        None
                    }
                }
            })
            .collect()
    })
}

/// Best-effort load of a single decorative image such as the footer logo.
pub fn load_optional(loader: &dyn ImageLoader, source: Option<&str>) -> Option<PreparedImage> {
    let source = ImageSource::parse(source?);
    match load_image(loader, &source) {
        Ok(img) => Some(img),
        Err(e) => {
            tracing::warn!(error = %e, "logo image failed; footer drawn without it");
            None
        }
    }
}

/// Build the worker pool used for image loading.
pub(crate) fn build_thread_pool(threads: Option<usize>) -> GridResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(GridError::validation(
            "image loading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| GridError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;

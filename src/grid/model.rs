use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{GridError, GridResult};

/// Number of cell slots held by a grid state snapshot.
pub const CELL_CAPACITY: usize = 16;

/// Label that earns a cell the highlighted ring.
pub const BEST_ANIME_LABEL: &str = "Best Anime";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
/// Grid dimension: the board is `side() x side()` cells.
pub enum GridSize {
    /// 3 x 3 board.
    #[default]
    Three,
    /// 4 x 4 board.
    Four,
}

impl GridSize {
    /// Cells per row (and per column).
    pub fn side(self) -> u32 {
        match self {
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    /// Number of cells rendered for this size.
    pub fn visible_cells(self) -> usize {
        let s = self.side() as usize;
        s * s
    }
}

impl TryFrom<u8> for GridSize {
    type Error = GridError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(GridError::validation(format!(
                "grid size must be 3 or 4, got {other}"
            ))),
        }
    }
}

impl From<GridSize> for u8 {
    fn from(v: GridSize) -> Self {
        v.side() as u8
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0}x{0}", self.side())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One grid slot.
///
/// A cell is occupied when `image` is set. `image_base64`, when present, is the preferred render
/// source.
pub struct Cell {
    /// Image URL or path; `None` for an empty slot.
    #[serde(default)]
    pub image: Option<String>,
    /// Inlined image (usually a `data:` URI).
    #[serde(default)]
    pub image_base64: Option<String>,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Category label such as "Best OP".
    #[serde(default)]
    pub label: String,
}

impl Cell {
    /// Empty slot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Occupied slot with an image reference and title.
    pub fn with_image(image: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Builder-style label setter.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Builder-style inline source setter.
    pub fn inlined(mut self, data_uri: impl Into<String>) -> Self {
        self.image_base64 = Some(data_uri.into());
        self
    }

    /// Return `true` when the cell holds an image reference.
    pub fn is_occupied(&self) -> bool {
        self.image.is_some()
    }

    /// Return `true` when the cell carries the highlighted label.
    pub fn is_best(&self) -> bool {
        self.label == BEST_ANIME_LABEL
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Complete input bundle for one render.
pub struct RenderSpec {
    /// Cell snapshot; only the first `grid_size.visible_cells()` entries are drawn.
    pub cells: Vec<Cell>,
    /// Active grid dimension.
    pub grid_size: GridSize,
    /// Owner name shown in the title.
    #[serde(default)]
    pub username: Option<String>,
}

impl RenderSpec {
    /// Spec with [`CELL_CAPACITY`] empty cells.
    pub fn empty(grid_size: GridSize) -> Self {
        Self {
            cells: vec![Cell::empty(); CELL_CAPACITY],
            grid_size,
            username: None,
        }
    }

    /// Parse a spec from JSON text.
    pub fn from_json_str(s: &str) -> GridResult<Self> {
        serde_json::from_str(s).map_err(|e| GridError::serde(e.to_string()))
    }

    /// Read and parse a spec JSON file.
    pub fn from_path(path: &Path) -> GridResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read render spec '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check that every visible slot is present.
    pub fn validate(&self) -> GridResult<()> {
        let need = self.grid_size.visible_cells();
        if self.cells.len() < need {
            return Err(GridError::validation(format!(
                "a {} grid needs {need} cells, got {}",
                self.grid_size,
                self.cells.len()
            )));
        }
        Ok(())
    }

    /// The cells that are drawn, in row-major order.
    pub fn visible_cells(&self) -> &[Cell] {
        let n = self.grid_size.visible_cells().min(self.cells.len());
        &self.cells[..n]
    }

    /// Username with surrounding whitespace removed; blank names count as absent.
    pub fn display_name(&self) -> Option<&str> {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/model.rs"]
mod tests;

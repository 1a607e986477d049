use std::path::PathBuf;

use base64::Engine as _;

use crate::foundation::error::{GridError, GridResult};
use crate::grid::model::Cell;

/// Where a cell's pixels come from, after choosing between its inline and referenced forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// `data:` URI or bare base64 payload.
    Inline(String),
    /// `http://` or `https://` URL.
    Remote(String),
    /// Local file, absolute or relative to the loader root.
    File(PathBuf),
}

impl ImageSource {
    /// Classify a source reference string.
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        let lower = t.get(..8).unwrap_or(t).to_ascii_lowercase();
        if lower.starts_with("data:") {
            Self::Inline(t.to_string())
        } else if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Remote(t.to_string())
        } else if let Some(path) = t.strip_prefix("file://") {
            Self::File(PathBuf::from(path))
        } else {
            Self::File(PathBuf::from(t))
        }
    }

    /// Pick the render source for a cell.
    ///
    /// Empty cells have no source. A non-blank `image_base64` wins over `image` so inlined
    /// pixels are used whenever the UI already has them.
    pub fn for_cell(cell: &Cell) -> Option<Self> {
        let image = cell.image.as_deref()?;
        if let Some(inline) = cell
            .image_base64
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            return Some(Self::Inline(inline.to_string()));
        }
        Some(Self::parse(image))
    }

    /// Short human-readable form for logs and errors; inline payloads are not echoed.
    pub fn describe(&self) -> String {
        match self {
            Self::Inline(s) => {
                let header = s.split(',').next().filter(|h| strip_data_scheme(h).is_some());
                match header {
                    Some(h) => format!("{h},<{} bytes>", s.len()),
                    None => format!("<inline base64, {} bytes>", s.len()),
                }
            }
            Self::Remote(url) => url.clone(),
            Self::File(p) => p.display().to_string(),
        }
    }
}

/// Decode the payload of a `data:` URI (or a bare base64 string) into raw bytes.
pub fn decode_inline(s: &str) -> GridResult<Vec<u8>> {
    let (is_base64, payload) = match strip_data_scheme(s.trim()) {
        Some(rest) => {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| GridError::validation("data URI has no ',' separator"))?;
            (header.to_ascii_lowercase().ends_with(";base64"), payload)
        }
        None => (true, s),
    };

    if !is_base64 {
        return Ok(payload.as_bytes().to_vec());
    }

    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|e| GridError::validation(format!("invalid base64 payload: {e}")))
}

// URI schemes are case-insensitive.
fn strip_data_scheme(s: &str) -> Option<&str> {
    s.get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &s[5..])
}

/// Encode raw bytes as a `data:` URI, the form the UI stores in `imageBase64`.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{mime};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;

use std::io::Cursor;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{GridError, GridResult};
use crate::render::backend::FrameRGBA;

/// Encode a frame as PNG bytes.
///
/// Premultiplied frames are converted back to straight alpha first; PNG stores straight alpha.
pub fn encode_png(frame: &FrameRGBA) -> GridResult<Vec<u8>> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.width == 0 || frame.height == 0 || frame.data.len() != expected {
        return Err(GridError::encode(format!(
            "frame {}x{} carries {} bytes, expected {expected}",
            frame.width,
            frame.height,
            frame.data.len()
        )));
    }

    let mut rgba = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut rgba);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
        .ok_or_else(|| GridError::encode("frame buffer does not match its dimensions"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| GridError::encode(format!("png encode: {e}")))?;
    if buf.is_empty() {
        return Err(GridError::encode("png encoder produced no data"));
    }
    Ok(buf)
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        if px[3] == 255 {
            continue;
        }
        let s = Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        }
        .to_straight();
        px.copy_from_slice(&[s.r, s.g, s.b, s.a]);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;

use crate::compile::plan::GridPlan;
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::GridResult;
use crate::foundation::math::Fnv1a64;
use crate::text::shaper::TextShaper;

/// A rendered board as RGBA8 pixels.
///
/// Backends return **premultiplied alpha**; the flag makes that explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some(Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
    }

    /// FNV-1a hash over dimensions and pixel bytes; equal frames hash equal.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&self.data);
        h.finish()
    }
}

/// Executes a compiled [`GridPlan`] into a [`FrameRGBA`].
///
/// Text ops are shaped through `shaper` at draw time with the exact [`crate::TextStyle`] the
/// compiler measured with.
pub trait RenderBackend {
    /// Run every op of `plan` in order and read back the final frame.
    fn render_plan(
        &mut self,
        plan: &GridPlan,
        shaper: &mut dyn TextShaper,
    ) -> GridResult<FrameRGBA>;
}

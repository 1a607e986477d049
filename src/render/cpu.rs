use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::compile::plan::{DrawOp, GridPlan, Paint, TextAlign, TextBaseline};
use crate::foundation::core::{Affine, BezPath, Rgba8};
use crate::foundation::error::{GridError, GridResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::text::shaper::TextShaper;

/// CPU raster backend powered by `vello_cpu`.
///
/// Holds no surface between calls; every render starts from a fresh context.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuBackend;

impl CpuBackend {
    /// New backend.
    pub fn new() -> Self {
        Self
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(skip_all, fields(ops = plan.ops.len()))]
    fn render_plan(
        &mut self,
        plan: &GridPlan,
        shaper: &mut dyn TextShaper,
    ) -> GridResult<FrameRGBA> {
        let (width, height) = plan.pixel_size();
        let w = surface_dim("width", width)?;
        let h = surface_dim("height", height)?;

        let images = plan
            .images
            .iter()
            .map(image_paint)
            .collect::<GridResult<Vec<_>>>()?;

        let base = Affine::scale(plan.scale);
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for op in &plan.ops {
            draw_op(&mut ctx, base, op, &images, shaper)?;
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn surface_dim(axis: &str, px: u32) -> GridResult<u16> {
    match u16::try_from(px) {
        Ok(0) | Err(_) => Err(GridError::canvas(format!(
            "canvas {axis} {px}px is outside the drawable surface range"
        ))),
        Ok(v) => Ok(v),
    }
}

struct ImagePaint {
    paint: vello_cpu::Image,
    w: f64,
    h: f64,
}

fn draw_op(
    ctx: &mut vello_cpu::RenderContext,
    base: Affine,
    op: &DrawOp,
    images: &[ImagePaint],
    shaper: &mut dyn TextShaper,
) -> GridResult<()> {
    ctx.set_transform(affine_to_cpu(base));
    match op {
        DrawOp::FillPath { path, paint } => {
            set_paint(ctx, paint);
            ctx.fill_path(&bezpath_to_cpu(path));
        }
        DrawOp::StrokePath { path, width, color } => {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
            ctx.set_paint(cpu_color(*color));
            ctx.stroke_path(&bezpath_to_cpu(path));
        }
        DrawOp::Image { image, dest, clip } => {
            let p = images.get(*image).ok_or_else(|| {
                GridError::Other(anyhow::anyhow!("plan references missing image {image}"))
            })?;
            if dest.width() <= 0.0 || dest.height() <= 0.0 {
                return Ok(());
            }
            ctx.push_clip_layer(&bezpath_to_cpu(clip));
            let local = Affine::translate((dest.x0, dest.y0))
                * Affine::scale_non_uniform(dest.width() / p.w, dest.height() / p.h);
            ctx.set_transform(affine_to_cpu(base * local));
            ctx.set_paint(p.paint.clone());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, p.w, p.h));
            ctx.pop_layer();
        }
        DrawOp::Text {
            text,
            style,
            origin,
            align,
            baseline,
            paint,
        } => {
            let Some(shaped) = shaper.shape(text, *style)? else {
                return Ok(());
            };
            let x = match align {
                TextAlign::Left => origin.x,
                TextAlign::Center => origin.x - shaped.width / 2.0,
            };
            let y = match baseline {
                TextBaseline::Alphabetic => origin.y,
                TextBaseline::Middle => origin.y + (shaped.ascent - shaped.descent) / 2.0,
            };
            // Glyphs are placed in canvas coordinates so gradient paints line up with the sweep.
            let glyphs = shaped.glyphs.iter().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x + x as f32,
                y: g.y + y as f32,
            });
            set_paint(ctx, paint);
            ctx.glyph_run(&shaped.font)
                .font_size(shaped.size_px)
                .fill_glyphs(glyphs);
        }
    }
    Ok(())
}

fn set_paint(ctx: &mut vello_cpu::RenderContext, paint: &Paint) {
    match paint {
        Paint::Solid(c) => ctx.set_paint(cpu_color(*c)),
        Paint::Linear { start, end, stops } => {
            let stops: Vec<vello_cpu::peniko::ColorStop> = stops
                .iter()
                .map(|&(offset, c)| vello_cpu::peniko::ColorStop::from((offset, cpu_color(c))))
                .collect();
            let gradient =
                vello_cpu::peniko::Gradient::new_linear((start.x, start.y), (end.x, end.y))
                    .with_stops(stops.as_slice());
            ctx.set_paint(gradient);
        }
    }
}

fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_paint(img: &PreparedImage) -> GridResult<ImagePaint> {
    let pixmap = pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?;
    Ok(ImagePaint {
        paint: vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        },
        w: f64::from(img.width),
        h: f64::from(img.height),
    })
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> GridResult<vello_cpu::Pixmap> {
    let too_big = || GridError::Other(anyhow::anyhow!("image {width}x{height} exceeds u16"));
    let w: u16 = width.try_into().map_err(|_| too_big())?;
    let h: u16 = height.try_into().map_err(|_| too_big())?;
    if bytes.len() != (width as usize) * (height as usize) * 4 {
        return Err(GridError::Other(anyhow::anyhow!("image byte len mismatch")));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

use std::sync::Arc;

use kurbo::{Cap, Circle, Shape, Stroke, StrokeOpts};

use crate::assets::store::{PreparedImage, TextBrushRgba8, TextLayoutEngine};
use crate::assets::svg_raster::{
    rasterize_svg_to_premul_rgba8, svg_raster_params, tint_premul_rgba8_in_place,
};
use crate::foundation::core::{Affine, BezPath, Rect, Rgba8, Rgba8Premul};
use crate::foundation::error::{ConcertoError, ConcertoResult};
use crate::render::{FrameRGBA, RenderSettings};
use crate::scene::model::{IconItem, Item, LineItem, RasterItem, Scene, TextItem};

const TOLERANCE: f64 = 0.1;

/// Rasterize `scene` into premultiplied RGBA8.
///
/// Items are painted in layer then child order. Hidden dots and rasters are skipped.
#[tracing::instrument(
    skip_all,
    fields(width = scene.viewport.width, height = scene.viewport.height)
)]
pub fn render_scene(scene: &Scene, settings: &RenderSettings) -> ConcertoResult<FrameRGBA> {
    let width: u16 = scene
        .viewport
        .width
        .try_into()
        .map_err(|_| ConcertoError::render("viewport width exceeds u16"))?;
    let height: u16 = scene
        .viewport
        .height
        .try_into()
        .map_err(|_| ConcertoError::render("viewport height exceeds u16"))?;

    let mut painter = Painter {
        ctx: vello_cpu::RenderContext::new(width, height),
        text: settings
            .font
            .as_ref()
            .map(TextLayoutEngine::new)
            .transpose()?,
        settings,
        warned_no_font: false,
    };

    painter.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    painter.set_color(scene.background);
    painter
        .ctx
        .fill_rect(&rect_to_cpu(scene.viewport.rect()));

    let leaves = scene.leaves();
    for item in &leaves {
        painter.draw(item)?;
    }

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    painter.ctx.flush();
    painter.ctx.render_to_pixmap(&mut pixmap);
    tracing::debug!(items = leaves.len(), "rendered scene");

    Ok(FrameRGBA {
        width: u32::from(width),
        height: u32::from(height),
        data: pixmap.data_as_u8_slice().to_vec(),
        premultiplied: true,
    })
}

struct Painter<'a> {
    ctx: vello_cpu::RenderContext,
    text: Option<TextLayoutEngine>,
    settings: &'a RenderSettings,
    warned_no_font: bool,
}

impl Painter<'_> {
    fn draw(&mut self, item: &Item) -> ConcertoResult<()> {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match item {
            Item::Group(_) => Ok(()),
            Item::Line(line) => {
                self.stroke_line(line);
                Ok(())
            }
            Item::Rect(r) => {
                self.set_color(r.fill);
                self.ctx.fill_rect(&rect_to_cpu(r.rect));
                Ok(())
            }
            Item::Dot(dot) => {
                if dot.visible {
                    self.set_color(dot.fill);
                    let path = Circle::new(dot.center, dot.radius).to_path(TOLERANCE);
                    self.ctx.fill_path(&bezpath_to_cpu(&path));
                }
                Ok(())
            }
            Item::Text(text) => self.draw_text(text),
            Item::Raster(raster) => {
                if raster.visible {
                    self.draw_raster(raster)?;
                }
                Ok(())
            }
            Item::Icon(icon) => self.draw_icon(icon),
        }
    }

    fn set_color(&mut self, c: Rgba8) {
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
    }

    fn stroke_line(&mut self, item: &LineItem) {
        let style = Stroke::new(item.width).with_caps(Cap::Butt);
        let outline = kurbo::stroke(
            item.line.path_elements(TOLERANCE),
            &style,
            &StrokeOpts::default(),
            TOLERANCE,
        );
        self.set_color(item.color);
        self.ctx.fill_path(&bezpath_to_cpu(&outline));
    }

    fn draw_text(&mut self, item: &TextItem) -> ConcertoResult<()> {
        let settings = self.settings;
        let (Some(font), Some(engine)) = (settings.font.as_ref(), self.text.as_mut()) else {
            if !self.warned_no_font {
                tracing::warn!("no font available, skipping text labels");
                self.warned_no_font = true;
            }
            return Ok(());
        };

        let layout = engine.layout_line(
            &item.content,
            item.font_size as f32,
            TextBrushRgba8::from(item.fill),
        )?;

        let baseline = layout
            .lines()
            .next()
            .map(|l| f64::from(l.metrics().baseline))
            .unwrap_or(0.0);
        let transform = Affine::translate((item.anchor.x, item.anchor.y - baseline));

        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes.as_ref().clone()),
            font.index,
        );
        self.ctx.set_transform(affine_to_cpu(transform));

        for line in layout.lines() {
            for run_item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = run_item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn draw_raster(&mut self, raster: &RasterItem) -> ConcertoResult<()> {
        let paint = image_paint(straight_image_to_pixmap(&raster.image)?);
        self.ctx.set_transform(affine_to_cpu(raster.placement));
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(raster.image.width),
            f64::from(raster.image.height),
        ));
        Ok(())
    }

    fn draw_icon(&mut self, icon: &IconItem) -> ConcertoResult<()> {
        let (sw, sh) = icon.svg.size();
        let transform = Affine::translate(icon.bounds.origin().to_vec2())
            * Affine::scale_non_uniform(icon.bounds.width() / sw, icon.bounds.height() / sh);

        let (w, h, transform_adjust) = svg_raster_params(&icon.svg.tree, transform)?;
        let mut rgba8_premul = rasterize_svg_to_premul_rgba8(&icon.svg.tree, w, h)?;
        tint_premul_rgba8_in_place(&mut rgba8_premul, icon.fill);
        let pixmap = premul_bytes_to_pixmap(&rgba8_premul, w, h)?;

        self.ctx.set_transform(affine_to_cpu(transform_adjust));
        self.ctx.set_paint(image_paint(pixmap));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));
        Ok(())
    }
}

fn image_paint(pixmap: vello_cpu::Pixmap) -> vello_cpu::Image {
    vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn straight_image_to_pixmap(img: &PreparedImage) -> ConcertoResult<vello_cpu::Pixmap> {
    let premul: Vec<u8> = img
        .rgba8
        .chunks_exact(4)
        .flat_map(|px| Rgba8Premul::from_straight_rgba(px[0], px[1], px[2], px[3]).to_array())
        .collect();
    premul_bytes_to_pixmap(&premul, img.width, img.height)
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> ConcertoResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ConcertoError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ConcertoError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(ConcertoError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

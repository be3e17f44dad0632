use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{ConcertoError, ConcertoResult};

#[derive(Clone, Debug)]
/// Decoded raster image in straight-alpha RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major straight-alpha RGBA8.
    pub rgba8: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Color of the pixel containing image-space point `(x, y)`.
    ///
    /// The far edges belong to the last column/row. Points outside the image sample as fully
    /// transparent black.
    pub fn pixel_at(&self, x: f64, y: f64) -> Rgba8 {
        const EDGE_EPS: f64 = 1e-6;
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        let inside = |v: f64, max: f64| v.is_finite() && v > -EDGE_EPS && v < max + EDGE_EPS;
        if !inside(x, w) || !inside(y, h) {
            return Rgba8::transparent();
        }
        let px = (x.max(0.0).floor() as u64).min(u64::from(self.width.saturating_sub(1)));
        let py = (y.max(0.0).floor() as u64).min(u64::from(self.height.saturating_sub(1)));
        let i = ((py * u64::from(self.width) + px) * 4) as usize;
        match self.rgba8.get(i..i + 4) {
            Some(&[r, g, b, a]) => Rgba8 { r, g, b, a },
            _ => Rgba8::transparent(),
        }
    }
}

#[derive(Clone, Debug)]
/// Parsed SVG icon.
pub struct PreparedSvg {
    /// Parsed SVG tree.
    pub tree: Arc<usvg::Tree>,
}

impl PreparedSvg {
    /// Intrinsic document size in user units.
    pub fn size(&self) -> (f64, f64) {
        let s = self.tree.size();
        (f64::from(s.width()), f64::from(s.height()))
    }
}

#[derive(Clone, Debug)]
/// Raw font file bytes used for headline labels.
pub struct PreparedFont {
    /// Font file contents.
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub index: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
}

impl TextLayoutEngine {
    /// Register `font` and make it the family used by every subsequent layout.
    pub(crate) fn new(font: &PreparedFont) -> ConcertoResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ConcertoError::asset("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ConcertoError::asset("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
        })
    }

    /// Shape and lay out a single unwrapped line of text.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> ConcertoResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ConcertoError::render("text size must be finite and > 0"));
        }
        let family = self.family.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;

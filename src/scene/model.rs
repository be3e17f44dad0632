//! Scene graph produced by the composition steps and consumed by the renderer.
//!
//! Every item is created once, attached to a parent [`Group`], and never removed. The only
//! mutation is [`Item::translate`], used when paragraphs are stacked.

use std::sync::Arc;

use kurbo::{Circle, Shape};

use crate::assets::store::{PreparedImage, PreparedSvg};
use crate::foundation::core::{Affine, Line, Point, Rect, Rgba8, Vec2, Viewport};
use crate::foundation::geometry::union_bounds;

/// A stroked straight segment.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    /// Segment geometry.
    pub line: Line,
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width in pixels.
    pub width: f64,
}

impl LineItem {
    /// Segment length.
    pub fn length(&self) -> f64 {
        self.line.length()
    }

    /// Center of the segment's bounds.
    pub fn center(&self) -> Point {
        self.line.bounding_box().center()
    }
}

/// A filled axis-aligned rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectItem {
    /// Rectangle geometry.
    pub rect: Rect,
    /// Fill color.
    pub fill: Rgba8,
}

/// A filled circle.
#[derive(Clone, Debug, PartialEq)]
pub struct DotItem {
    /// Circle center.
    pub center: Point,
    /// Circle radius.
    pub radius: f64,
    /// Fill color.
    pub fill: Rgba8,
    /// Hidden dots stay in the scene but are not painted.
    pub visible: bool,
}

/// A single line of text anchored at its baseline start.
#[derive(Clone, Debug, PartialEq)]
pub struct TextItem {
    /// Baseline start point.
    pub anchor: Point,
    /// Text content.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Fill color.
    pub fill: Rgba8,
}

/// A raster image placed with an affine transform (image pixels → viewport).
#[derive(Clone, Debug)]
pub struct RasterItem {
    /// Decoded image.
    pub image: Arc<PreparedImage>,
    /// Image-space to viewport transform.
    pub placement: Affine,
    /// Whether the raster is painted.
    pub visible: bool,
}

impl RasterItem {
    /// Placed bounds in viewport coordinates.
    pub fn bounds(&self) -> Rect {
        let src = Rect::new(
            0.0,
            0.0,
            f64::from(self.image.width),
            f64::from(self.image.height),
        );
        self.placement.transform_rect_bbox(src)
    }

    /// Sample the image under a viewport point.
    pub fn sample(&self, p: Point) -> Rgba8 {
        let local = self.placement.inverse() * p;
        self.image.pixel_at(local.x, local.y)
    }
}

/// An imported vector icon drawn inside `bounds` with a single fill color.
#[derive(Clone, Debug)]
pub struct IconItem {
    /// Icon name (its asset path).
    pub name: String,
    /// Parsed SVG.
    pub svg: Arc<PreparedSvg>,
    /// Placed bounds in viewport coordinates.
    pub bounds: Rect,
    /// Fill color applied to all icon shapes.
    pub fill: Rgba8,
}

/// Scene element.
#[derive(Clone, Debug)]
pub enum Item {
    /// Nested group.
    Group(Group),
    /// Stroked segment.
    Line(LineItem),
    /// Filled rectangle.
    Rect(RectItem),
    /// Filled circle.
    Dot(DotItem),
    /// Text label.
    Text(TextItem),
    /// Raster image.
    Raster(RasterItem),
    /// Vector icon.
    Icon(IconItem),
}

impl Item {
    /// Geometric bounds (stroke excluded). Text has no geometric bounds.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Item::Group(g) => g.bounds(),
            Item::Line(l) => Some(l.line.bounding_box()),
            Item::Rect(r) => Some(r.rect),
            Item::Dot(d) => Some(Circle::new(d.center, d.radius).bounding_box()),
            Item::Text(_) => None,
            Item::Raster(r) => Some(r.bounds()),
            Item::Icon(i) => Some(i.bounds),
        }
    }

    /// Bounds including half the stroke width of line items.
    pub fn stroke_bounds(&self) -> Option<Rect> {
        match self {
            Item::Group(g) => g.stroke_bounds(),
            Item::Line(l) => Some(l.line.bounding_box().inflate(l.width / 2.0, l.width / 2.0)),
            other => other.bounds(),
        }
    }

    /// Move the item by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Item::Group(g) => g.translate(delta),
            Item::Line(l) => l.line = Line::new(l.line.p0 + delta, l.line.p1 + delta),
            Item::Rect(r) => r.rect = r.rect + delta,
            Item::Dot(d) => d.center += delta,
            Item::Text(t) => t.anchor += delta,
            Item::Raster(r) => r.placement = Affine::translate(delta) * r.placement,
            Item::Icon(i) => i.bounds = i.bounds + delta,
        }
    }
}

/// Named, ordered collection of items.
#[derive(Clone, Debug, Default)]
pub struct Group {
    /// Group name, used in logs and lookups.
    pub name: String,
    /// Children in paint order.
    pub children: Vec<Item>,
}

impl Group {
    /// Empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Append a child.
    pub fn push(&mut self, item: Item) {
        self.children.push(item);
    }

    /// Union of the children's geometric bounds.
    pub fn bounds(&self) -> Option<Rect> {
        self.children
            .iter()
            .fold(None, |acc, c| union_bounds(acc, c.bounds()))
    }

    /// Union of the children's stroke bounds.
    pub fn stroke_bounds(&self) -> Option<Rect> {
        self.children
            .iter()
            .fold(None, |acc, c| union_bounds(acc, c.stroke_bounds()))
    }

    /// Move every child by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        for c in &mut self.children {
            c.translate(delta);
        }
    }

    /// Translate so the bounds center lands on `center`. Empty groups are left untouched.
    pub fn set_center(&mut self, center: Point) {
        if let Some(b) = self.bounds() {
            self.translate(center - b.center());
        }
    }

    /// Translate vertically so the bounds center y equals `y`.
    pub fn set_center_y(&mut self, y: f64) {
        if let Some(b) = self.bounds() {
            self.translate(Vec2::new(0.0, y - b.center().y));
        }
    }

    /// Depth-first iterator over every non-group item.
    pub fn leaves(&self) -> Vec<&Item> {
        let mut out = Vec::new();
        collect_leaves(&self.children, &mut out);
        out
    }
}

fn collect_leaves<'a>(items: &'a [Item], out: &mut Vec<&'a Item>) {
    for item in items {
        match item {
            Item::Group(g) => collect_leaves(&g.children, out),
            leaf => out.push(leaf),
        }
    }
}

/// Finished composition, ready to rasterize.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Output size.
    pub viewport: Viewport,
    /// Background color.
    pub background: Rgba8,
    /// Top-level groups in paint order.
    pub layers: Vec<Group>,
}

impl Scene {
    /// Empty scene.
    pub fn new(viewport: Viewport, background: Rgba8) -> Self {
        Self {
            viewport,
            background,
            layers: Vec::new(),
        }
    }

    /// Append a top-level group.
    pub fn push_layer(&mut self, group: Group) {
        self.layers.push(group);
    }

    /// Find a top-level group by name.
    pub fn layer(&self, name: &str) -> Option<&Group> {
        self.layers.iter().find(|g| g.name == name)
    }

    /// Every non-group item in paint order.
    pub fn leaves(&self) -> Vec<&Item> {
        let mut out = Vec::new();
        for layer in &self.layers {
            collect_leaves(&layer.children, &mut out);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;

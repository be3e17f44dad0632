//! Concerto renders a generative "score page" composition to a still image.
//!
//! A hardcoded (or JSON-supplied) layout table becomes stacked paragraphs of thin rules. Around
//! them the builder places headline bars and labels, random vertical connectors, dots colored by
//! a raster painting wherever a probe grid crosses the rules, and vector icons dropped on random
//! rules. The flow is:
//!
//! - Load and validate a [`Composition`]
//! - [`build_scene`] it against a seed and an [`AssetSource`]
//! - Rasterize the [`Scene`] with [`render_scene`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod layout;
pub(crate) mod overlay;
/// Scene building entry points.
pub mod pipeline;
pub(crate) mod render;
pub(crate) mod scene;

pub use crate::assets::color::ColorDef;
pub use crate::assets::decode::{decode_image, parse_svg, resolve_font};
pub use crate::assets::source::{AssetSource, DirAssets, MemoryAssets};
pub use crate::assets::store::{PreparedFont, PreparedImage, PreparedSvg};
pub use crate::foundation::core::{
    Affine, BezPath, Line, Point, Rect, Rgba8, Rgba8Premul, Size, Vec2, Viewport,
};
pub use crate::foundation::error::{ConcertoError, ConcertoResult};
pub use crate::foundation::rng::{RandomSource, Rng64, ScriptedRandom};
pub use crate::layout::assembler::{Assembled, assemble};
pub use crate::layout::connectors::{MAX_CONNECTORS, MIN_CONNECTORS, draw_connectors};
pub use crate::layout::headline::draw_headlines;
pub use crate::layout::paragraph::{PARAGRAPH_STROKE, draw_paragraph};
pub use crate::layout::table::{LayoutTable, LineSpan};
pub use crate::overlay::icons::place_icon;
pub use crate::overlay::painting::{DOT_RADIUS, PROBE_COUNT, draw_painting, fit_scale};
pub use crate::pipeline::{
    SceneStats, build_scene, render_composition, render_settings, resolve_seed,
};
pub use crate::render::cpu::render_scene;
pub use crate::render::{FrameRGBA, RenderSettings};
pub use crate::scene::composition::{AssetsDef, Composition, HeadlineDef, PaintingDef, Style};
pub use crate::scene::model::{
    DotItem, Group, IconItem, Item, LineItem, RasterItem, RectItem, Scene, TextItem,
};

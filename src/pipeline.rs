//! Scene builder: runs every composition step against a seed and collects the result.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rayon::prelude::*;

use crate::assets::decode::resolve_font;
use crate::assets::source::AssetSource;
use crate::foundation::core::{Line, Rect};
use crate::foundation::error::ConcertoResult;
use crate::foundation::rng::Rng64;
use crate::layout::assembler::assemble;
use crate::layout::connectors::draw_connectors;
use crate::layout::headline::draw_headlines;
use crate::overlay::icons::{load_icon, place_icon};
use crate::overlay::painting::{draw_painting, load_painting};
use crate::render::cpu::render_scene;
use crate::render::{FrameRGBA, RenderSettings};
use crate::scene::composition::{Composition, Style};
use crate::scene::model::{Group, Item, Scene};

const PAINTING_STREAM: u64 = 1;
const ICON_STREAM_BASE: u64 = 16;

/// Stacked paragraph groups.
pub const LAYER_PARAGRAPHS: &str = "paragraphs";
/// Title and subtitle bars with their labels.
pub const LAYER_HEADLINES: &str = "headlines";
/// Random vertical strokes.
pub const LAYER_CONNECTORS: &str = "connectors";
/// Painting raster and sampled dots. Absent when the painting could not be loaded.
pub const LAYER_PAINTING: &str = "painting";
/// Placed icons.
pub const LAYER_ICONS: &str = "icons";

/// Element counts of a built scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Paragraph rows.
    pub lines: usize,
    /// Connector strokes.
    pub connectors: usize,
    /// Sampled dots, hidden ones included.
    pub dots: usize,
    /// Dots that will be painted.
    pub visible_dots: usize,
    /// Raster elements (0 when the painting failed to load).
    pub rasters: usize,
    /// Placed icons.
    pub icons: usize,
}

impl SceneStats {
    /// Count the elements of `scene`.
    pub fn of(scene: &Scene) -> Self {
        let count = |name: &str, pred: fn(&Item) -> bool| {
            scene
                .layer(name)
                .map(|g| g.leaves().into_iter().filter(|i| pred(i)).count())
                .unwrap_or(0)
        };
        Self {
            lines: count(LAYER_PARAGRAPHS, |i| matches!(i, Item::Line(_))),
            connectors: count(LAYER_CONNECTORS, |i| matches!(i, Item::Line(_))),
            dots: count(LAYER_PAINTING, |i| matches!(i, Item::Dot(_))),
            visible_dots: count(LAYER_PAINTING, |i| matches!(i, Item::Dot(d) if d.visible)),
            rasters: count(LAYER_PAINTING, |i| matches!(i, Item::Raster(_))),
            icons: count(LAYER_ICONS, |i| matches!(i, Item::Icon(_))),
        }
    }
}

/// Seed for a run: an explicit value, else the composition's, else one derived from the clock.
pub fn resolve_seed(explicit: Option<u64>, comp: &Composition) -> u64 {
    explicit.or(comp.seed).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    })
}

/// Build the full scene for `comp`.
///
/// Layout, headlines and connectors run in order on the seed's main stream. The painting branch
/// and every icon branch then run concurrently on forked streams, so their output depends only on
/// the seed. A painting that cannot be loaded drops the raster and every dot; an icon that cannot
/// be loaded is skipped. Neither fails the build.
#[tracing::instrument(skip(comp, assets))]
pub fn build_scene(
    comp: &Composition,
    assets: &dyn AssetSource,
    seed: u64,
) -> ConcertoResult<Scene> {
    comp.validate()?;
    let style = comp.style();

    let root = Rng64::new(seed);
    let mut painting_rng = root.fork(PAINTING_STREAM);
    let icon_rngs: Vec<Rng64> = (0..comp.assets.icons.len())
        .map(|i| root.fork(ICON_STREAM_BASE + i as u64))
        .collect();
    let mut main_rng = root;

    let assembled = assemble(&comp.paragraphs, &style, comp.viewport)?;
    let headlines = draw_headlines(assembled.bounds, &comp.headline, &style);
    let connectors = draw_connectors(&assembled.lines, &style, &mut main_rng);

    let bounds = assembled.bounds;
    let lines = assembled.lines.as_slice();
    let (painting, icons) = rayon::join(
        || painting_branch(comp, assets, bounds, lines, &style, &mut painting_rng),
        || icons_branch(comp, assets, lines, &style, icon_rngs),
    );

    let mut scene = Scene::new(comp.viewport, comp.background_rgba8());
    scene.push_layer(assembled.group);
    scene.push_layer(headlines);
    scene.push_layer(connectors);
    if let Some(painting) = painting {
        scene.push_layer(painting);
    }
    scene.push_layer(icons);

    let stats = SceneStats::of(&scene);
    tracing::info!(
        seed,
        lines = stats.lines,
        connectors = stats.connectors,
        dots = stats.dots,
        visible_dots = stats.visible_dots,
        icons = stats.icons,
        "built scene"
    );
    Ok(scene)
}

fn painting_branch(
    comp: &Composition,
    assets: &dyn AssetSource,
    bounds: Rect,
    lines: &[Line],
    style: &Style,
    rng: &mut Rng64,
) -> Option<Group> {
    let rel = comp.assets.painting.as_str();
    match load_painting(assets, rel) {
        Ok(image) => Some(draw_painting(
            Arc::new(image),
            bounds,
            lines,
            style.spacing,
            comp.painting.visible,
            rng,
        )),
        Err(e) => {
            tracing::error!(painting = rel, error = %e, "painting unavailable, skipping dots");
            None
        }
    }
}

fn icons_branch(
    comp: &Composition,
    assets: &dyn AssetSource,
    lines: &[Line],
    style: &Style,
    rngs: Vec<Rng64>,
) -> Group {
    let placed: Vec<Option<Item>> = comp
        .assets
        .icons
        .par_iter()
        .zip(rngs.into_par_iter())
        .map(|(rel, mut rng)| match load_icon(assets, rel) {
            Ok(svg) => place_icon(rel, Arc::new(svg), lines, style.ink, &mut rng).map(Item::Icon),
            Err(e) => {
                tracing::warn!(icon = rel.as_str(), error = %e, "icon unavailable, skipping");
                None
            }
        })
        .collect();

    let mut group = Group::new(LAYER_ICONS);
    group.children.extend(placed.into_iter().flatten());
    group
}

/// Renderer inputs for `comp`: the configured font, else a bold face from the assets root or the
/// system. With no font at all, the renderer skips labels and warns once.
pub fn render_settings(
    comp: &Composition,
    assets: &dyn AssetSource,
) -> ConcertoResult<RenderSettings> {
    let font = resolve_font(assets, comp.assets.font.as_deref())?;
    Ok(RenderSettings { font })
}

/// Build and rasterize `comp` in one call.
pub fn render_composition(
    comp: &Composition,
    assets: &dyn AssetSource,
    seed: u64,
) -> ConcertoResult<FrameRGBA> {
    let scene = build_scene(comp, assets, seed)?;
    let settings = render_settings(comp, assets)?;
    render_scene(&scene, &settings)
}

use std::path::Path;
use std::sync::Arc;

use usvg::fontdb;

use crate::assets::source::AssetSource;
use crate::assets::store::{PreparedFont, PreparedImage, PreparedSvg};
use crate::foundation::error::{ConcertoError, ConcertoResult};

/// Decode encoded image bytes into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> ConcertoResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ConcertoError::asset(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ConcertoError::asset("decoded image has zero size"));
    }

    Ok(PreparedImage {
        width,
        height,
        rgba8: Arc::new(rgba.into_raw()),
    })
}

/// Parse SVG bytes into a prepared `usvg` tree.
pub fn parse_svg(bytes: &[u8]) -> ConcertoResult<PreparedSvg> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| ConcertoError::asset(format!("parse svg tree: {e}")))?;
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

/// Families tried for the headline face, in order, all at bold weight.
const BOLD_FAMILIES: [fontdb::Family<'static>; 5] = [
    fontdb::Family::SansSerif,
    fontdb::Family::Name("DejaVu Sans"),
    fontdb::Family::Name("Liberation Sans"),
    fontdb::Family::Serif,
    fontdb::Family::Monospace,
];

/// Load the headline font.
///
/// An explicit composition font wins. Otherwise fonts found in the source's font directories are
/// searched, then the system fonts. `Ok(None)` means no usable font exists anywhere.
pub fn resolve_font(
    assets: &dyn AssetSource,
    font: Option<&str>,
) -> ConcertoResult<Option<PreparedFont>> {
    if let Some(rel) = font {
        let bytes = assets.read_bytes(rel)?;
        return Ok(Some(PreparedFont {
            bytes: Arc::new(bytes),
            index: 0,
        }));
    }

    let mut local = fontdb::Database::new();
    for dir in assets.font_dirs() {
        load_fonts_from_dir(&mut local, &dir);
    }
    if let Some(font) = bold_face(&local) {
        tracing::debug!(faces = local.len(), "using font from assets");
        return Ok(Some(font));
    }

    let mut system = fontdb::Database::new();
    system.load_system_fonts();
    match bold_face(&system) {
        Some(font) => Ok(Some(font)),
        None => {
            tracing::debug!(faces = system.len(), "no system font available");
            Ok(None)
        }
    }
}

fn bold_face(db: &fontdb::Database) -> Option<PreparedFont> {
    let id = select_bold_face(db)?;
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
    Some(PreparedFont {
        bytes: Arc::new(bytes),
        index,
    })
}

/// Best face for labels: a bold match over [`BOLD_FAMILIES`], else the first bold face, else any
/// face at all.
pub(crate) fn select_bold_face(db: &fontdb::Database) -> Option<fontdb::ID> {
    let query = fontdb::Query {
        families: &BOLD_FAMILIES,
        weight: fontdb::Weight::BOLD,
        ..fontdb::Query::default()
    };
    db.query(&query)
        .or_else(|| {
            db.faces()
                .find(|face| face.weight >= fontdb::Weight::BOLD)
                .map(|face| face.id)
        })
        .or_else(|| db.faces().next().map(|face| face.id))
}

fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable font file");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assets::color::ColorDef;
use crate::assets::source::normalize_rel_path;
use crate::foundation::core::{Rgba8, Viewport};
use crate::foundation::error::{ConcertoError, ConcertoResult};
use crate::layout::table::LayoutTable;

/// JSON-facing description of one artwork.
///
/// Every field has a default, so `{}` is a valid composition that reproduces the built-in
/// page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Composition {
    /// Output size in pixels.
    pub viewport: Viewport,
    /// Seed for every random decision. `None` lets the caller pick one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Vertical distance between rows, and the unit for most decoration offsets.
    pub spacing: f64,
    /// Paragraph header indent as a fraction of the usable width.
    pub start_offset: f64,
    /// Horizontal page margin and bottom margin.
    pub margin: f64,
    /// Stroke and fill color of every drawn element.
    pub ink: ColorDef,
    /// Canvas background.
    pub background: ColorDef,
    /// Paragraph line spans.
    pub paragraphs: LayoutTable,
    /// Headline label texts.
    pub headline: HeadlineDef,
    /// External asset paths.
    pub assets: AssetsDef,
    /// Painting overlay options.
    pub painting: PaintingDef,
}

/// Headline label configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadlineDef {
    /// Label next to the title bar.
    pub title: String,
    /// Label under the title bar.
    pub tempo: String,
    /// Font size in pixels.
    pub font_size: f64,
}

/// Asset paths, relative to the assets root.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsDef {
    /// Raster image sampled for dot colors.
    pub painting: String,
    /// SVG icons placed along random lines.
    pub icons: Vec<String>,
    /// Font for headline labels; falls back to a bold face from the assets root or the system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

/// Painting overlay options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaintingDef {
    /// Paint the scaled painting itself, not only the sampled dots.
    pub visible: bool,
}

impl Default for Composition {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            seed: None,
            spacing: 15.0,
            start_offset: 0.1,
            margin: 40.0,
            ink: ColorDef::rgba(17.0 / 255.0, 17.0 / 255.0, 17.0 / 255.0, 1.0),
            background: ColorDef::rgba(1.0, 1.0, 1.0, 1.0),
            paragraphs: LayoutTable::default(),
            headline: HeadlineDef::default(),
            assets: AssetsDef::default(),
            painting: PaintingDef::default(),
        }
    }
}

impl Default for HeadlineDef {
    fn default() -> Self {
        Self {
            title: "Concerto".to_owned(),
            tempo: "(allegro maestoso.)".to_owned(),
            font_size: 18.0,
        }
    }
}

impl Default for AssetsDef {
    fn default() -> Self {
        Self {
            painting: "painting1.png".to_owned(),
            icons: vec!["c.svg".to_owned(), "piano.svg".to_owned()],
            font: None,
        }
    }
}

impl Composition {
    /// Parse a composition from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ConcertoResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ConcertoError::serde(format!("parse composition JSON: {e}")))
    }

    /// Parse a composition from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ConcertoResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ConcertoError::validation(format!("open composition JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty JSON for this composition.
    pub fn to_json_pretty(&self) -> ConcertoResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConcertoError::serde(format!("serialize composition: {e}")))
    }

    /// Check numeric ranges, the layout table and asset paths.
    pub fn validate(&self) -> ConcertoResult<()> {
        self.viewport.validate()?;

        fn positive(name: &str, v: f64) -> ConcertoResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(ConcertoError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
            Ok(())
        }
        positive("spacing", self.spacing)?;
        positive("headline.font_size", self.headline.font_size)?;
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(ConcertoError::validation("margin must be finite and >= 0"));
        }
        if !(0.0..=1.0).contains(&self.start_offset) {
            return Err(ConcertoError::validation("start_offset must be within [0, 1]"));
        }
        if 2.0 * self.margin >= f64::from(self.viewport.width) {
            return Err(ConcertoError::validation(
                "margin leaves no usable width in the viewport",
            ));
        }

        self.paragraphs.validate()?;

        normalize_rel_path(&self.assets.painting)?;
        for icon in &self.assets.icons {
            normalize_rel_path(icon)?;
        }
        if let Some(font) = &self.assets.font {
            normalize_rel_path(font)?;
        }
        Ok(())
    }

    /// Width available to paragraph lines.
    pub fn usable_width(&self) -> f64 {
        f64::from(self.viewport.width) - 2.0 * self.margin
    }

    /// Resolved drawing constants.
    pub fn style(&self) -> Style {
        Style {
            width: self.usable_width(),
            spacing: self.spacing,
            start_offset: self.start_offset,
            margin: self.margin,
            ink: self.ink.to_rgba8(),
        }
    }

    pub(crate) fn background_rgba8(&self) -> Rgba8 {
        self.background.to_rgba8()
    }
}

/// Drawing constants shared by every layout step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    /// Usable paragraph width.
    pub width: f64,
    /// Row spacing.
    pub spacing: f64,
    /// Header indent fraction.
    pub start_offset: f64,
    /// Page margin.
    pub margin: f64,
    /// Ink color.
    pub ink: Rgba8,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/composition.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ConcertoError, ConcertoResult};

/// Horizontal extent of one row as fractions of the usable width.
///
/// Serialized as a `[start, end]` pair. `start > end` is allowed and draws a reversed segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LineSpan {
    /// Start fraction.
    pub start: f64,
    /// End fraction.
    pub end: f64,
}

impl LineSpan {
    /// New span.
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

impl From<[f64; 2]> for LineSpan {
    fn from([start, end]: [f64; 2]) -> Self {
        Self { start, end }
    }
}

impl From<LineSpan> for [f64; 2] {
    fn from(s: LineSpan) -> Self {
        [s.start, s.end]
    }
}

/// Ordered paragraphs, each an ordered list of row spans.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutTable {
    paragraphs: Vec<Vec<LineSpan>>,
}

/// Header indent used by the built-in table.
const H: f64 = 0.1;

const DEFAULT_TABLE: &[&[[f64; 2]]] = &[
    &[[0.4, 1.0], [0.0, 1.0], [0.0, 0.6]],
    &[[H, 1.0], [0.0, 1.0]],
    &[
        [H, 1.0],
        [0.0, 0.6],
        [0.1, 1.0],
        [0.0, 1.0],
        [0.1, 1.0],
        [0.0, 1.0],
        [0.0, 1.0],
        [0.0, 1.0],
        [0.0, 1.0],
        [0.0, 1.0],
        [0.0, 1.0],
        [0.1, 1.0],
    ],
    &[
        [H, 1.0],
        [0.0, 1.0],
        [0.0, 0.3],
        [0.1, 1.0],
        [0.0, 1.0],
        [0.0, 1.0],
        [0.0, 1.0],
        [0.0, 0.2],
        [0.1, 1.0],
        [0.0, 1.0],
        [0.0, 0.5],
        [0.1, 0.75],
        [0.1, 1.0],
        [0.0, 0.3],
        [0.1, 1.0],
        [0.0, 1.0],
        [0.0, 1.0],
        [0.0, 1.0],
        [0.0, 0.2],
    ],
    &[[H, 1.0], [0.0, 1.0], [0.0, 0.3]],
    &[[H, 1.0], [0.0, 1.0], [0.0, 0.4], [0.0, 1.0], [0.0, 0.2]],
    &[
        [H, 1.0],
        [0.0, 1.0],
        [0.0, 1.0],
        [0.0, 0.2],
        [0.2, 1.0],
        [0.0, 1.0],
        [0.0, 0.5],
    ],
    &[[H, 1.0], [0.0, 1.0], [0.0, 1.0], [0.0, 0.3]],
];

impl Default for LayoutTable {
    fn default() -> Self {
        Self {
            paragraphs: DEFAULT_TABLE
                .iter()
                .map(|p| p.iter().copied().map(LineSpan::from).collect())
                .collect(),
        }
    }
}

impl LayoutTable {
    /// Build a table from explicit paragraphs.
    pub fn new(paragraphs: Vec<Vec<LineSpan>>) -> Self {
        Self { paragraphs }
    }

    /// Paragraphs in order.
    pub fn paragraphs(&self) -> &[Vec<LineSpan>] {
        &self.paragraphs
    }

    /// Number of paragraphs.
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// `true` when the table has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Total number of rows across all paragraphs.
    pub fn row_count(&self) -> usize {
        self.paragraphs.iter().map(Vec::len).sum()
    }

    /// Every fraction must be finite and within `[0, 1]`; ordering is not checked.
    pub fn validate(&self) -> ConcertoResult<()> {
        if self.row_count() == 0 {
            return Err(ConcertoError::validation("layout table has no rows"));
        }
        for (p, rows) in self.paragraphs.iter().enumerate() {
            for (r, span) in rows.iter().enumerate() {
                for v in [span.start, span.end] {
                    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                        return Err(ConcertoError::validation(format!(
                            "paragraph {p} row {r}: fraction {v} outside [0, 1]"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/table.rs"]
mod tests;

// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Text-fit layout for component labels drawn inside sections
//!
//! A label is written vertically: the model string is cut into columns of as
//! many characters as fit the section height, and the columns are laid out
//! left to right. Columns that do not fit the width are dropped and the label
//! is flagged as truncated, so the renderer can draw an ellipsis.

use crate::types::{Point, Rect};

/// Font size tried first
pub const DEFAULT_LABEL_FONT_SIZE: u32 = 6;

/// Smallest font size a label is ever drawn with
pub const MIN_LABEL_FONT_SIZE: u32 = 4;

/// Ellipsis glyph used for truncated labels
pub const ELLIPSIS: &str = "\u{2026}";

/// Glyph measurements supplied by whatever draws the labels
pub trait FontMetrics {
    /// Vertical distance between lines at `size`
    fn line_height(&self, size: u32) -> f64;

    /// Width of the widest glyph at `size`
    fn char_width(&self, size: u32) -> f64;
}

/// Metrics proportional to the point size, for headless layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProportionalMetrics {
    /// Line height per point
    pub line_ratio: f64,
    /// Widest glyph width per point
    pub char_ratio: f64,
}

impl Default for ProportionalMetrics {
    fn default() -> Self {
        Self {
            line_ratio: 1.5,
            char_ratio: 1.0,
        }
    }
}

impl FontMetrics for ProportionalMetrics {
    fn line_height(&self, size: u32) -> f64 {
        (f64::from(size) * self.line_ratio).round().max(1.0)
    }

    fn char_width(&self, size: u32) -> f64 {
        (f64::from(size) * self.char_ratio).round().max(1.0)
    }
}

/// One vertical column of label text
#[derive(Debug, Clone, PartialEq)]
pub struct LabelColumn {
    /// Characters of the column, top to bottom
    pub text: String,
    /// Horizontal centre of the column
    pub x: f64,
}

/// Where and how to draw a label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    /// Chosen font size
    pub font_size: u32,
    /// Widest glyph at that size
    pub char_width: f64,
    /// Line height at that size
    pub line_height: f64,
    /// Characters per column
    pub max_lines: usize,
    /// Gap between columns
    pub column_gap: f64,
    /// Columns that are drawn, left to right
    pub columns: Vec<LabelColumn>,
    /// Vertical centre shared by every column
    pub center_y: f64,
    /// Anchor of the ellipsis (top-right corner) when columns were dropped
    pub ellipsis: Option<Point>,
}

impl LabelLayout {
    /// Whether some columns did not fit
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.ellipsis.is_some()
    }

    /// Font size of the ellipsis glyph
    #[must_use]
    pub fn ellipsis_font_size(&self) -> u32 {
        self.font_size.saturating_sub(1).max(5)
    }
}

/// Cut `text` into consecutive chunks of `max_lines` characters
#[must_use]
pub fn split_columns(text: &str, max_lines: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_lines.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Pick the largest font size from `base_size` down that fits one column
///
/// Returns `(size, char_width, line_height, max_lines)`; falls back to
/// [`MIN_LABEL_FONT_SIZE`] when even that does not fit the width.
fn pick_font(rect: Rect, base_size: u32, metrics: &dyn FontMetrics) -> (u32, f64, f64, usize) {
    let width = rect.width().max(1.0);
    let height = rect.height().max(1.0);
    let measure = |size: u32| {
        let line_h = metrics.line_height(size).max(1.0);
        let char_w = metrics.char_width(size).max(1.0);
        let max_lines = ((height / line_h).floor() as usize).max(1);
        (size, char_w, line_h, max_lines)
    };

    (MIN_LABEL_FONT_SIZE..=base_size.max(MIN_LABEL_FONT_SIZE))
        .rev()
        .map(measure)
        .find(|(_, char_w, _, _)| *char_w <= width)
        .unwrap_or_else(|| measure(MIN_LABEL_FONT_SIZE))
}

/// Lay out `text` inside `rect`
#[must_use]
pub fn fit_label(text: &str, rect: Rect, base_size: u32, metrics: &dyn FontMetrics) -> LabelLayout {
    let (font_size, char_width, line_height, max_lines) = pick_font(rect, base_size, metrics);
    let width = rect.width();

    let mut chunks = split_columns(text, max_lines);
    let column_gap = (char_width * 0.5).trunc().max(2.0);
    let max_cols = (((width + column_gap) / (char_width + column_gap)).floor() as usize).max(1);
    let truncated = chunks.len() > max_cols;
    chunks.truncate(max_cols);

    let drawn = chunks.len() as f64;
    let draw_width = drawn * char_width + (drawn - 1.0).max(0.0) * column_gap;
    let start_x = rect.x1 + (width - draw_width) / 2.0 + char_width / 2.0;

    let columns = chunks
        .into_iter()
        .enumerate()
        .map(|(idx, text)| LabelColumn {
            text,
            x: start_x + idx as f64 * (char_width + column_gap),
        })
        .collect();

    LabelLayout {
        font_size,
        char_width,
        line_height,
        max_lines,
        column_gap,
        columns,
        center_y: (rect.y1 + rect.y2) / 2.0,
        ellipsis: truncated.then(|| Point::new(rect.x2 - 2.0, rect.y1 + 2.0)),
    }
}

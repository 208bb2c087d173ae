//! Line filling
//!
//! Pads content to a fixed number of columns using a fill string, so that
//! labels, prices and dividers line up on the paper. All widths are visual
//! widths (see [`visual_width`]).
//!
//! Content wider than the line is never truncated; it is returned as is and
//! left to wrap on the printer.

use serde::Deserialize;

use crate::width::visual_width;

/// Horizontal placement of content inside a padded line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Parse an alignment name, falling back to `Left` for unknown names
    pub fn from_name(name: &str) -> Self {
        match name {
            "center" => Alignment::Center,
            "right" => Alignment::Right,
            _ => Alignment::Left,
        }
    }

    /// ESC a parameter
    pub fn code(self) -> u8 {
        match self {
            Alignment::Left => 0,
            Alignment::Center => 1,
            Alignment::Right => 2,
        }
    }
}

/// Declared width of a padded column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "i64")]
pub enum ColumnWidth {
    /// Width of the content itself, no padding
    #[default]
    Auto,
    /// The whole line
    FullLine,
    /// Fixed number of columns
    Chars(usize),
}

impl From<i64> for ColumnWidth {
    /// `-2` is a full line, any other negative value is automatic
    fn from(value: i64) -> Self {
        match value {
            -2 => ColumnWidth::FullLine,
            v if v < 0 => ColumnWidth::Auto,
            v => ColumnWidth::Chars(v as usize),
        }
    }
}

/// How a piece of content is padded
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FillSpec {
    /// Padding string, may be several characters long
    pub fill: String,
    /// Font width multiplier; the line budget is divided by it
    pub font_width: usize,
    pub alignment: Alignment,
    pub width: ColumnWidth,
}

impl Default for FillSpec {
    fn default() -> Self {
        Self {
            fill: " ".to_string(),
            font_width: 1,
            alignment: Alignment::Left,
            width: ColumnWidth::Auto,
        }
    }
}

impl FillSpec {
    pub fn with_fill(mut self, fill: &str) -> Self {
        self.fill = fill.to_string();
        self
    }

    pub fn with_font_width(mut self, font_width: usize) -> Self {
        self.font_width = font_width;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_width(mut self, width: ColumnWidth) -> Self {
        self.width = width;
        self
    }

    /// Shorthand for `with_width(ColumnWidth::FullLine)`
    pub fn full_line(self) -> Self {
        self.with_width(ColumnWidth::FullLine)
    }
}

/// Columns available for one line at the given font width
pub fn line_budget(max_chars: usize, font_width: usize) -> usize {
    max_chars / font_width.max(1)
}

/// Split `fill_count` into left and right padding counts
///
/// The left side gets the rounded-up half (round half away from zero).
fn center_counts(fill_count: usize) -> (usize, usize) {
    let left = fill_count.div_ceil(2);
    (left, fill_count - left)
}

/// Left pad `fill × left`, right pad the first `right` characters of it
///
/// With a multi-character fill the right pad can end in a fragment of the
/// fill string.
fn center_pads(fill: &str, fill_count: usize) -> (String, String) {
    let (left, right) = center_counts(fill_count);
    let left_pad = fill.repeat(left);
    let right_pad = left_pad.chars().take(right).collect();
    (left_pad, right_pad)
}

/// Pad `text` to `max_chars / font_width` columns
pub fn fill_column(
    max_chars: usize,
    text: &str,
    fill: &str,
    font_width: usize,
    alignment: Alignment,
) -> String {
    let line_width = line_budget(max_chars, font_width);
    let text_width = visual_width(text);
    if text_width >= line_width {
        return text.to_string();
    }

    let fill_count = line_width - text_width;
    match alignment {
        Alignment::Left => format!("{}{}", text, fill.repeat(fill_count)),
        Alignment::Right => format!("{}{}", fill.repeat(fill_count), text),
        Alignment::Center => {
            let (left_pad, right_pad) = center_pads(fill, fill_count);
            format!("{left_pad}{text}{right_pad}")
        }
    }
}

/// Put `left` and `right` on one line with fill between or after them
///
/// The fill count wraps modulo the line width, so a pair that already spans
/// more than one line is padded out to the end of its last line. If the
/// padded result is still wider than one line the two parts are joined
/// without fill. A fill wider than one column always ends up there.
pub fn inline(
    max_chars: usize,
    left: &str,
    right: &str,
    fill: &str,
    font_width: usize,
    alignment: Alignment,
) -> String {
    let line_width = line_budget(max_chars, font_width);
    if line_width == 0 {
        return format!("{left}{right}");
    }

    let content_width = visual_width(left) + visual_width(right);
    let fill_count = line_width - content_width % line_width;
    let fill_str = fill.repeat(fill_count);

    if content_width + visual_width(&fill_str) > line_width {
        return format!("{left}{right}");
    }

    match alignment {
        Alignment::Left => format!("{left}{right}{fill_str}"),
        Alignment::Right => format!("{left}{fill_str}{right}"),
        Alignment::Center => {
            let (left_pad, right_pad) = center_pads(fill, fill_count);
            format!("{left}{left_pad}{right}{right_pad}")
        }
    }
}

/// Center `text` on the line with fill on both sides
pub fn fill_around(max_chars: usize, text: &str, fill: &str, font_width: usize) -> String {
    fill_column(max_chars, text, fill, font_width, Alignment::Center)
}

/// A full line of `fill`
pub fn fill_line(max_chars: usize, fill: &str, font_width: usize) -> String {
    fill.repeat(line_budget(max_chars, font_width))
}

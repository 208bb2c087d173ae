//! Table layout
//!
//! Turns a header and rows of padded cells into fixed-width receipt lines.
//! Column widths are per cell; the last cell of each data row takes
//! whatever is left of the line.

use serde::Deserialize;

use crate::fill::{Alignment, ColumnWidth, FillSpec, fill_column};
use crate::state::PageMetrics;
use crate::width::visual_width;

/// One table cell: text and how to pad it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnSpec {
    pub text: String,
    #[serde(flatten)]
    pub fill: FillSpec,
}

impl ColumnSpec {
    /// Cell of `width` columns with default padding
    pub fn new(text: &str, width: usize) -> Self {
        Self {
            text: text.to_string(),
            fill: FillSpec::default().with_width(ColumnWidth::Chars(width)),
        }
    }

    /// Cell with a custom fill; the column width is `fill.width`
    pub fn with_fill(text: &str, fill: FillSpec) -> Self {
        Self {
            text: text.to_string(),
            fill,
        }
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.fill.alignment = alignment;
        self
    }

    fn render(&self, width: usize) -> String {
        fill_column(
            width,
            &self.text,
            &self.fill.fill,
            self.fill.font_width,
            self.fill.alignment,
        )
    }
}

/// Header plus data rows
///
/// Rows may have a different number of cells than the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TableDefinition {
    #[serde(default)]
    pub header: Vec<ColumnSpec>,
    #[serde(default)]
    pub rows: Vec<Vec<ColumnSpec>>,
}

impl TableDefinition {
    pub fn new(header: Vec<ColumnSpec>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, cells: Vec<ColumnSpec>) -> Self {
        self.rows.push(cells);
        self
    }

    /// Load a table from JSON
    ///
    /// Widths use the integer convention: `-1` auto, `-2` full line.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Render a header cell; header widths are used as declared
fn header_cell(cell: &ColumnSpec, max_chars: usize) -> String {
    match cell.fill.width {
        ColumnWidth::Auto => cell.text.clone(),
        ColumnWidth::FullLine => cell.render(max_chars),
        ColumnWidth::Chars(w) => cell.render(w),
    }
}

/// Render a data row, the last cell absorbing the remaining width
fn row_cells(cells: &[ColumnSpec], max_chars: usize) -> String {
    let mut used = 0usize;
    let mut line = String::new();
    let last = cells.len().saturating_sub(1);

    for (i, cell) in cells.iter().enumerate() {
        let declared = match cell.fill.width {
            ColumnWidth::FullLine => Some(max_chars),
            ColumnWidth::Chars(w) if w >= max_chars => Some(max_chars),
            ColumnWidth::Chars(w) => Some(w),
            ColumnWidth::Auto => None,
        };

        let rendered = match declared {
            // Full-line cells neither count toward nor take the remainder
            Some(w) if w == max_chars => cell.render(w),
            _ if i == last => cell.render(max_chars.saturating_sub(used)),
            Some(w) => {
                used += w;
                cell.render(w)
            }
            None => {
                used += visual_width(&cell.text);
                cell.text.clone()
            }
        };
        line.push_str(&rendered);
    }
    line
}

/// Pad a finished table line out to the page width with spaces
fn pad_line(line: &str, max_chars: usize) -> String {
    fill_column(max_chars, line, " ", 1, Alignment::Left)
}

/// Lay the table out into printable lines, header first
///
/// An empty header produces no header line.
pub fn layout_table(table: &TableDefinition, metrics: &PageMetrics) -> Vec<String> {
    let max_chars = metrics.max_chars_per_line;
    let mut lines = Vec::with_capacity(table.rows.len() + 1);

    if !table.header.is_empty() {
        let header: String = table
            .header
            .iter()
            .map(|cell| header_cell(cell, max_chars))
            .collect();
        lines.push(pad_line(&header, max_chars));
    }

    for row in &table.rows {
        lines.push(pad_line(&row_cells(row, max_chars), max_chars));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PaperWidth;

    fn m80() -> PageMetrics {
        PaperWidth::Mm80.metrics()
    }

    #[test]
    fn test_last_column_absorbs_remainder() {
        let table = TableDefinition::default().row(vec![
            ColumnSpec::new("Item", 10),
            ColumnSpec::new("Qty", 10),
            ColumnSpec::new("Price", 10),
        ]);
        let lines = layout_table(&table, &m80());
        assert_eq!(lines.len(), 1);
        assert_eq!(visual_width(&lines[0]), 48);
        assert_eq!(&lines[0][..20], "Item      Qty       ");
        assert_eq!(lines[0][20..].trim_end(), "Price");
        assert_eq!(lines[0][20..].len(), 28);
    }

    #[test]
    fn test_last_column_right_aligned() {
        let table = TableDefinition::default().row(vec![
            ColumnSpec::new("红烧肉", 20),
            ColumnSpec::new("x2", 4),
            ColumnSpec::new("12.00", 10).aligned(Alignment::Right),
        ]);
        let lines = layout_table(&table, &PaperWidth::Mm58.metrics());
        let line = &lines[0];
        assert_eq!(visual_width(line), 32);
        assert!(line.starts_with("红烧肉              x2  "));
        assert!(line.ends_with("   12.00"));
    }

    #[test]
    fn test_header_padded_to_page() {
        let table = TableDefinition::new(vec![
            ColumnSpec::new("Name", 12),
            ColumnSpec::new("Total", 8).aligned(Alignment::Right),
        ]);
        let lines = layout_table(&table, &m80());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Name           Total"));
        assert_eq!(visual_width(&lines[0]), 48);
    }

    #[test]
    fn test_full_line_cell_is_not_accumulated() {
        let table = TableDefinition::default().row(vec![
            ColumnSpec::with_fill("-", FillSpec::default().with_fill("-").full_line()),
        ]);
        let lines = layout_table(&table, &PaperWidth::Mm58.metrics());
        assert_eq!(lines[0], "-".repeat(32));
    }

    #[test]
    fn test_oversized_width_clamped_to_page() {
        let table = TableDefinition::default().row(vec![
            ColumnSpec::new("A", 100),
            ColumnSpec::new("B", 5),
        ]);
        let lines = layout_table(&table, &PaperWidth::Mm58.metrics());
        // First cell fills a whole line, the last one still gets the full budget
        assert_eq!(lines[0].len(), 64);
        assert!(lines[0].starts_with("A "));
    }

    #[test]
    fn test_auto_width_cell_counts_its_text() {
        let table = TableDefinition::default().row(vec![
            ColumnSpec::with_fill("#001 ", FillSpec::default()),
            ColumnSpec::new("宫保鸡丁", 10),
        ]);
        let lines = layout_table(&table, &PaperWidth::Mm58.metrics());
        assert_eq!(visual_width(&lines[0]), 32);
        assert!(lines[0].starts_with("#001 宫保鸡丁 "));
    }

    #[test]
    fn test_rows_may_differ_from_header() {
        let table = TableDefinition::new(vec![ColumnSpec::new("A", 10), ColumnSpec::new("B", 10)])
            .row(vec![ColumnSpec::new("only", 10)]);
        let lines = layout_table(&table, &m80());
        assert_eq!(lines.len(), 2);
        // Single cell is also the last one
        assert_eq!(lines[1], format!("only{}", " ".repeat(44)));
    }

    #[test]
    fn test_overflowing_row_is_not_truncated() {
        let table = TableDefinition::default().row(vec![
            ColumnSpec::new("abcdefghij", 4),
            ColumnSpec::new("z", 2),
        ]);
        let metrics = PageMetrics {
            max_chars_per_line: 8,
            ..m80()
        };
        let lines = layout_table(&table, &metrics);
        assert_eq!(lines[0], "abcdefghijz   ");
    }

    #[test]
    fn test_table_from_json() {
        let table = TableDefinition::from_json(
            r#"{
                "header": [{"text": "Item", "width": 10}, {"text": "Sum", "width": 6, "alignment": "right"}],
                "rows": [[{"text": "Tea", "width": 10}, {"text": "2.50", "width": 6, "alignment": "right"}]]
            }"#,
        )
        .unwrap();
        assert_eq!(table.header[1].fill.alignment, Alignment::Right);
        assert_eq!(table.rows[0][0].fill.width, ColumnWidth::Chars(10));
        let lines = layout_table(&table, &PaperWidth::Mm58.metrics());
        assert!(lines[1].ends_with("2.50"));
    }
}

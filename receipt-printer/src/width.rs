//! Visual width of printed text
//!
//! Receipt printers lay CJK ideographs out on two columns and everything
//! else on one. Only the CJK Unified Ideographs block (U+4E00..=U+9FA5) is
//! treated as double width; this is not an East Asian Width table.

use std::ops::RangeInclusive;

const DOUBLE_WIDTH: RangeInclusive<char> = '\u{4E00}'..='\u{9FA5}';

/// Whether a character occupies two columns on the paper
pub fn is_double_width(c: char) -> bool {
    DOUBLE_WIDTH.contains(&c)
}

/// Column width of a single character (1 or 2)
pub fn char_width(c: char) -> usize {
    if is_double_width(c) { 2 } else { 1 }
}

/// Column width of a string
///
/// ```
/// use receipt_printer::visual_width;
///
/// assert_eq!(visual_width("AB中文"), 6);
/// ```
pub fn visual_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

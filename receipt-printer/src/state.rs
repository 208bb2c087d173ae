//! Printer state and paper metrics

use serde::Deserialize;

use crate::error::{PrintError, PrintResult};

/// Paper roll width
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u16")]
pub enum PaperWidth {
    Mm58,
    #[default]
    Mm80,
}

impl PaperWidth {
    /// Look up a paper width by its size in millimetres (58 or 80)
    pub fn from_mm(mm: u16) -> PrintResult<Self> {
        match mm {
            58 => Ok(PaperWidth::Mm58),
            80 => Ok(PaperWidth::Mm80),
            other => Err(PrintError::InvalidParameter(format!(
                "unsupported paper width: {}mm",
                other
            ))),
        }
    }

    pub fn mm(self) -> u16 {
        match self {
            PaperWidth::Mm58 => 58,
            PaperWidth::Mm80 => 80,
        }
    }

    pub fn metrics(self) -> PageMetrics {
        PageMetrics::for_paper(self)
    }
}

impl TryFrom<u16> for PaperWidth {
    type Error = PrintError;

    fn try_from(mm: u16) -> PrintResult<Self> {
        Self::from_mm(mm)
    }
}

/// Printable area of a paper roll
///
/// Common widths:
/// - 58mm paper: 384 dots, 32 characters
/// - 80mm paper: 576 dots, 48 characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMetrics {
    pub paper_width_dots: u16,
    pub max_chars_per_line: usize,
    pub line_height_dots: u16,
}

impl PageMetrics {
    pub fn for_paper(paper: PaperWidth) -> Self {
        match paper {
            PaperWidth::Mm58 => Self {
                paper_width_dots: 384,
                max_chars_per_line: 32,
                line_height_dots: 24,
            },
            PaperWidth::Mm80 => Self {
                paper_width_dots: 576,
                max_chars_per_line: 48,
                line_height_dots: 24,
            },
        }
    }
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self::for_paper(PaperWidth::default())
    }
}

/// Character scale and toggles currently active on the printer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterState {
    /// Character width multiplier, 1..=8
    pub width_scale: u8,
    /// Character height multiplier, 1..=8
    pub height_scale: u8,
    pub underline: bool,
    pub emphasis: bool,
    pub upside_down: bool,
    pub rotate: bool,
    pub reverse: bool,
    pub smooth: bool,
}

impl Default for PrinterState {
    fn default() -> Self {
        Self {
            width_scale: 1,
            height_scale: 1,
            underline: false,
            emphasis: false,
            upside_down: false,
            rotate: false,
            reverse: false,
            smooth: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_per_paper() {
        let m58 = PaperWidth::Mm58.metrics();
        assert_eq!(m58.paper_width_dots, 384);
        assert_eq!(m58.max_chars_per_line, 32);

        let m80 = PaperWidth::Mm80.metrics();
        assert_eq!(m80.paper_width_dots, 576);
        assert_eq!(m80.max_chars_per_line, 48);
        assert_eq!(m80.line_height_dots, 24);
    }

    #[test]
    fn test_paper_from_mm() {
        assert_eq!(PaperWidth::from_mm(58).unwrap(), PaperWidth::Mm58);
        assert_eq!(PaperWidth::from_mm(80).unwrap().mm(), 80);
        assert!(matches!(
            PaperWidth::from_mm(112),
            Err(PrintError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_default_state() {
        let state = PrinterState::default();
        assert_eq!((state.width_scale, state.height_scale), (1, 1));
        assert!(!state.underline && !state.emphasis && !state.upside_down);
        assert!(!state.rotate && !state.reverse && !state.smooth);
    }
}

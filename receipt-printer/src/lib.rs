//! # receipt-printer
//!
//! ESC/POS command encoding and text layout for thermal receipt printers.
//!
//! ## Scope
//!
//! - ESC/POS command building (fonts, alignment, size, toggles, cuts,
//!   cash drawer, barcodes, QR codes)
//! - Width-aware line filling for mixed CJK/ASCII text
//! - Table layout on a fixed character budget
//! - A print session that tracks printer state and writes to any
//!   `Read + Write` transport (TCP, serial, USB device file)
//! - GB18030 text encoding for Chinese printers
//! - Connecting to raw TCP printers (port 9100)
//!
//! Opening other transports, retries and multi-printer routing stay in
//! application code.
//!
//! ## Example
//!
//! ```no_run
//! use receipt_printer::{ColumnSpec, NetworkPrinter, SessionConfig, TableDefinition};
//!
//! let printer = NetworkPrinter::parse("192.168.1.100:9100")?;
//! let mut session = printer.open_session(&SessionConfig::default())?;
//! session.begin()?;
//! session.title("厨房单")?;
//! session.print_table(
//!     &TableDefinition::new(vec![ColumnSpec::new("菜品", 30), ColumnSpec::new("数量", 18)])
//!         .row(vec![ColumnSpec::new("宫保鸡丁", 30), ColumnSpec::new("x2", 18)]),
//! )?;
//! session.cut()?;
//! session.end()?;
//! # Ok::<(), receipt_printer::PrintError>(())
//! ```

mod config;
mod encoding;
mod error;
pub mod escpos;
mod fill;
mod network;
mod session;
mod state;
mod table;
mod transport;
mod width;

// Re-exports
pub use config::{NetworkConfig, SessionConfig};
pub use encoding::{Gb18030, TextEncoder, Utf8};
pub use error::{PrintError, PrintResult};
pub use escpos::{CharacterSet, DrawerPin, FontFamily, QrCode, QrModel, QrOptions, Symbology};
pub use fill::{
    Alignment, ColumnWidth, FillSpec, fill_around, fill_column, fill_line, inline, line_budget,
};
pub use network::{DEFAULT_PORT, NetworkPrinter};
pub use session::{MAX_LEFT_MARGIN, Session};
pub use state::{PageMetrics, PaperWidth, PrinterState};
pub use table::{ColumnSpec, TableDefinition, layout_table};
pub use transport::{JobBuffer, Transport};
pub use width::{char_width, is_double_width, visual_width};

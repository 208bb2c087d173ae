//! Print session
//!
//! A [`Session`] owns the transport and the printer state for one print job.
//! Every operation writes straight to the transport and returns once the
//! write is done; nothing is buffered. State setters update [`PrinterState`]
//! and emit the matching command in the same call, so the tracked state
//! always matches what was sent.
//!
//! ```
//! use receipt_printer::{Alignment, FillSpec, JobBuffer, PaperWidth, Session};
//!
//! let mut session = Session::new(JobBuffer::new(), PaperWidth::Mm58.metrics());
//! session.begin()?;
//! session.set_align(Alignment::Center)?;
//! session.set_font_size(2, 2)?;
//! session.println("厨房单")?;
//! session.set_font_size(1, 1)?;
//! session.divider(&FillSpec::default().with_fill("="))?;
//! session.inline("桌号", "100", &FillSpec::default().with_alignment(Alignment::Right))?;
//! session.cut()?;
//! session.end()?;
//!
//! let job = session.into_inner().into_bytes();
//! assert_eq!(&job[..2], &[0x1B, 0x40]);
//! # Ok::<(), receipt_printer::PrintError>(())
//! ```

use std::io;

use tracing::{debug, instrument, warn};

use crate::config::SessionConfig;
use crate::encoding::{Gb18030, TextEncoder};
use crate::error::{PrintError, PrintResult};
use crate::escpos::{self, CharacterSet, DrawerPin, FontFamily, QrCode, QrOptions, Symbology};
use crate::fill::{self, Alignment, FillSpec};
use crate::state::{PageMetrics, PrinterState};
use crate::table::{TableDefinition, layout_table};
use crate::transport::Transport;

/// Largest left margin accepted by [`Session::set_left_margin`]
pub const MAX_LEFT_MARGIN: u16 = 47;

/// Single print job against one transport
pub struct Session<T: Transport, E: TextEncoder = Gb18030> {
    transport: T,
    encoder: E,
    metrics: PageMetrics,
    state: PrinterState,
    chinese_mode: bool,
}

impl<T: Transport> Session<T> {
    /// Session with the default GB18030 code page
    pub fn new(transport: T, metrics: PageMetrics) -> Self {
        Self::with_encoder(transport, metrics, Gb18030)
    }

    pub fn from_config(transport: T, config: &SessionConfig) -> Self {
        let mut session = Self::new(transport, config.metrics());
        session.chinese_mode = config.chinese_mode;
        session
    }
}

impl<T: Transport, E: TextEncoder> Session<T, E> {
    pub fn with_encoder(transport: T, metrics: PageMetrics, encoder: E) -> Self {
        Self {
            transport,
            encoder,
            metrics,
            state: PrinterState::default(),
            chinese_mode: false,
        }
    }

    pub fn state(&self) -> &PrinterState {
        &self.state
    }

    pub fn metrics(&self) -> &PageMetrics {
        &self.metrics
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Give the transport back, ending the session
    pub fn into_inner(self) -> T {
        self.transport
    }

    // === Writing ===

    /// Write blocks in order, flushing after each one
    ///
    /// Short writes are continued until the block is done. Stops at the
    /// first failure; the error carries every byte the transport accepted,
    /// including the accepted part of the failing block.
    fn send_all(&mut self, blocks: &[&[u8]]) -> PrintResult<usize> {
        let mut written = 0;
        for block in blocks.iter().filter(|b| !b.is_empty()) {
            let mut rest = *block;
            while !rest.is_empty() {
                match self.transport.send(rest) {
                    Ok(0) => {
                        let source =
                            io::Error::new(io::ErrorKind::WriteZero, "printer took no bytes");
                        return Err(PrintError::TransportWrite { written, source });
                    }
                    Ok(n) => {
                        written += n;
                        rest = &rest[n..];
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(source) => return Err(PrintError::TransportWrite { written, source }),
                }
            }
            self.transport
                .flush_sent()
                .map_err(|source| PrintError::TransportWrite { written, source })?;
        }
        debug!(bytes = written, "sent");
        Ok(written)
    }

    fn send(&mut self, bytes: &[u8]) -> PrintResult<usize> {
        self.send_all(&[bytes])
    }

    fn command(&mut self, bytes: Vec<u8>) -> PrintResult<()> {
        self.send(&bytes).map(|_| ())
    }

    /// Write raw bytes directly
    pub fn write_raw(&mut self, bytes: &[u8]) -> PrintResult<usize> {
        self.send(bytes)
    }

    /// Write text in the printer's code page
    pub fn print(&mut self, text: &str) -> PrintResult<usize> {
        let bytes = self.encoder.encode(text);
        self.send(&bytes)
    }

    /// Write text followed by a line feed
    pub fn println(&mut self, text: &str) -> PrintResult<usize> {
        let mut bytes = self.encoder.encode(text);
        bytes.push(escpos::LF);
        self.send(&bytes)
    }

    // === Document ===

    /// Reset state to defaults and initialize the printer
    pub fn begin(&mut self) -> PrintResult<()> {
        self.state = PrinterState::default();
        self.command(escpos::initialize())?;
        if self.chinese_mode {
            self.command(escpos::chinese_mode_on())?;
        }
        Ok(())
    }

    /// End-of-document marker
    pub fn end(&mut self) -> PrintResult<()> {
        self.command(escpos::end_of_document())
    }

    // === State Setters ===

    /// Character size, each scale clamped to 1..=8
    pub fn set_font_size(&mut self, width: u8, height: u8) -> PrintResult<()> {
        self.state.width_scale = width.clamp(1, 8);
        self.state.height_scale = height.clamp(1, 8);
        self.command(escpos::select_size(
            self.state.width_scale,
            self.state.height_scale,
        ))
    }

    pub fn set_underline(&mut self, on: bool) -> PrintResult<()> {
        self.state.underline = on;
        self.command(escpos::underline(on))
    }

    /// Emphasized (bold) text, sent as `1B 45 n` (ESC E n)
    ///
    /// Drivers that track bold as double strike send `1B 47 n` (ESC G n)
    /// here instead. Use [`set_double_strike`](Self::set_double_strike) for
    /// those bytes; it is not tracked in [`PrinterState`].
    pub fn set_emphasis(&mut self, on: bool) -> PrintResult<()> {
        self.state.emphasis = on;
        self.command(escpos::emphasis(on))
    }

    pub fn set_upside_down(&mut self, on: bool) -> PrintResult<()> {
        self.state.upside_down = on;
        self.command(escpos::upside_down(on))
    }

    pub fn set_rotate(&mut self, on: bool) -> PrintResult<()> {
        self.state.rotate = on;
        self.command(escpos::rotate(on))
    }

    /// White on black printing
    pub fn set_reverse(&mut self, on: bool) -> PrintResult<()> {
        self.state.reverse = on;
        self.command(escpos::reverse(on))
    }

    pub fn set_smooth(&mut self, on: bool) -> PrintResult<()> {
        self.state.smooth = on;
        self.command(escpos::smooth(on))
    }

    // === Formatting ===

    pub fn set_font(&mut self, font: FontFamily) -> PrintResult<()> {
        self.command(escpos::select_font(font))
    }

    pub fn set_align(&mut self, alignment: Alignment) -> PrintResult<()> {
        self.command(escpos::select_alignment(alignment))
    }

    pub fn set_double_strike(&mut self, on: bool) -> PrintResult<()> {
        self.command(escpos::double_strike(on))
    }

    /// Raw ESC ! mode bits
    pub fn set_print_mode(&mut self, mode: u8) -> PrintResult<()> {
        self.command(escpos::print_mode(mode))
    }

    pub fn set_letter_spacing(&mut self, dots: u8) -> PrintResult<()> {
        self.command(escpos::letter_spacing(dots))
    }

    pub fn set_text_color(&mut self, color: u8) -> PrintResult<()> {
        self.command(escpos::text_color(color))
    }

    /// Left margin; values above [`MAX_LEFT_MARGIN`] are ignored
    pub fn set_left_margin(&mut self, dots: u16) -> PrintResult<()> {
        if dots > MAX_LEFT_MARGIN {
            warn!(dots, max = MAX_LEFT_MARGIN, "left margin out of range, ignored");
            return Ok(());
        }
        self.command(escpos::left_margin(dots))
    }

    pub fn set_character_set(&mut self, set: CharacterSet) -> PrintResult<()> {
        self.command(escpos::character_set(set))
    }

    pub fn chinese_mode_on(&mut self) -> PrintResult<()> {
        self.command(escpos::chinese_mode_on())
    }

    pub fn chinese_mode_off(&mut self) -> PrintResult<()> {
        self.command(escpos::chinese_mode_off())
    }

    // === Positioning & Paper ===

    pub fn move_x(&mut self, x: u16) -> PrintResult<()> {
        self.command(escpos::move_x(x))
    }

    pub fn move_y(&mut self, y: u16) -> PrintResult<()> {
        self.command(escpos::move_y(y))
    }

    pub fn line_feed(&mut self) -> PrintResult<()> {
        self.command(escpos::line_feed())
    }

    pub fn feed_lines(&mut self, lines: u8) -> PrintResult<()> {
        self.command(escpos::feed_lines(lines))
    }

    pub fn form_feed(&mut self) -> PrintResult<()> {
        self.feed_lines(1)
    }

    pub fn cut(&mut self) -> PrintResult<()> {
        self.command(escpos::cut())
    }

    pub fn cut_partial(&mut self) -> PrintResult<()> {
        self.command(escpos::cut_partial())
    }

    /// Feed `lines` then full cut, in one command
    pub fn cut_feed(&mut self, lines: u8) -> PrintResult<()> {
        self.command(escpos::cut_feed(lines))
    }

    /// Cut, optionally feeding one line first
    pub fn feed_and_cut(&mut self, feed: bool) -> PrintResult<()> {
        if feed {
            self.form_feed()?;
        }
        self.cut()
    }

    pub fn self_test(&mut self) -> PrintResult<()> {
        self.command(escpos::self_test())
    }

    // === Cash Drawer ===

    pub fn open_drawer(&mut self) -> PrintResult<()> {
        self.command(escpos::open_drawer())
    }

    pub fn cash(&mut self) -> PrintResult<()> {
        self.command(escpos::cash())
    }

    pub fn drawer_kick(&mut self, pin: DrawerPin, on: u8, off: u8) -> PrintResult<()> {
        self.command(escpos::drawer_kick(pin, on, off))
    }

    // === Status ===

    /// Request status `n` and read the single reply byte
    ///
    /// Does not touch the tracked state.
    #[instrument(skip(self))]
    pub fn read_status(&mut self, n: u8) -> PrintResult<u8> {
        self.command(escpos::status_request(n))?;

        let mut byte = [0u8; 1];
        let read = self
            .transport
            .receive(&mut byte)
            .map_err(PrintError::TransportRead)?;
        if read == 0 {
            return Err(PrintError::TransportRead(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no status byte received",
            )));
        }
        debug!(status = byte[0], "status read");
        Ok(byte[0])
    }

    // === Layout ===

    /// `left` and `right` on one line, padded with the fill settings
    pub fn inline(&mut self, left: &str, right: &str, spec: &FillSpec) -> PrintResult<usize> {
        let line = fill::inline(
            self.metrics.max_chars_per_line,
            left,
            right,
            &spec.fill,
            spec.font_width,
            spec.alignment,
        );
        self.print(&line)
    }

    /// `text` centered with the fill on both sides
    pub fn fill_around(&mut self, text: &str, spec: &FillSpec) -> PrintResult<usize> {
        let line = fill::fill_around(
            self.metrics.max_chars_per_line,
            text,
            &spec.fill,
            spec.font_width,
        );
        self.print(&line)
    }

    /// A line made of the fill string
    pub fn divider(&mut self, spec: &FillSpec) -> PrintResult<usize> {
        self.fill_around(&spec.fill, spec)
    }

    /// Print a table, one line per header and row
    #[instrument(skip(self, table), fields(rows = table.rows.len()))]
    pub fn print_table(&mut self, table: &TableDefinition) -> PrintResult<usize> {
        self.set_font(FontFamily::A)?;
        self.set_align(Alignment::Left)?;
        self.set_font_size(1, 1)?;
        self.set_emphasis(false)?;

        let mut written = 0;
        for line in layout_table(table, &self.metrics) {
            written += self.println(&line)?;
        }
        Ok(written)
    }

    // === Style Presets ===

    /// Large bold centered heading in font B
    pub fn title(&mut self, text: &str) -> PrintResult<()> {
        self.set_font(FontFamily::B)?;
        self.set_align(Alignment::Center)?;
        self.set_font_size(2, 2)?;
        self.set_emphasis(true)?;
        self.print(text)?;
        self.feed_lines(2)
    }

    /// Normal-size centered line in font A
    pub fn subtitle(&mut self, text: &str) -> PrintResult<()> {
        self.set_font(FontFamily::A)?;
        self.set_align(Alignment::Center)?;
        self.set_font_size(1, 1)?;
        self.set_emphasis(false)?;
        self.print(text)?;
        self.feed_lines(2)
    }

    /// Run `body` with plain left-aligned text, then feed one line
    pub fn content<F>(&mut self, body: F) -> PrintResult<()>
    where
        F: FnOnce(&mut Self) -> PrintResult<()>,
    {
        self.set_font(FontFamily::A)?;
        self.set_align(Alignment::Left)?;
        self.set_font_size(1, 1)?;
        self.set_emphasis(false)?;
        body(self)?;
        self.line_feed()
    }

    // === Codes ===

    /// Print a centered barcode
    ///
    /// All state is reset first, and the reset is sent to the printer.
    pub fn barcode(&mut self, data: &str, symbology: Symbology) -> PrintResult<usize> {
        self.send_barcode(data, symbology, false)
    }

    /// Print a centered barcode followed by its data as a text line
    pub fn barcode_with_caption(&mut self, data: &str, symbology: Symbology) -> PrintResult<usize> {
        self.send_barcode(data, symbology, true)
    }

    #[instrument(skip(self, data), fields(len = data.len()))]
    fn send_barcode(
        &mut self,
        data: &str,
        symbology: Symbology,
        caption: bool,
    ) -> PrintResult<usize> {
        let code = escpos::barcode(symbology, data.as_bytes())?;
        let caption = if caption {
            let mut text = self.encoder.encode(data);
            text.push(escpos::LF);
            text
        } else {
            Vec::new()
        };

        self.state = PrinterState::default();
        let reset = [
            escpos::select_size(1, 1),
            escpos::underline(false),
            escpos::emphasis(false),
            escpos::upside_down(false),
            escpos::rotate(false),
            escpos::reverse(false),
            escpos::smooth(false),
            escpos::select_alignment(Alignment::Center),
        ]
        .concat();

        self.send_all(&[reset.as_slice(), code.as_slice(), caption.as_slice()])
    }

    /// Print a QR code
    ///
    /// Oversized payloads are rejected before anything is written. Each
    /// block is a separate write; on failure the error reports the bytes
    /// already sent and the printer holds a partial symbol, which must not
    /// be completed by resending only the missing blocks.
    #[instrument(skip(self, data), fields(len = data.len()))]
    pub fn qr_code(&mut self, data: &str, options: QrOptions) -> PrintResult<usize> {
        let qr = QrCode::new(data.as_bytes(), options)?;
        self.send_all(&qr.blocks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Utf8;
    use crate::fill::ColumnWidth;
    use crate::state::PaperWidth;
    use crate::table::ColumnSpec;
    use crate::transport::JobBuffer;
    use std::io::{Read, Write};

    fn session() -> Session<JobBuffer> {
        Session::new(JobBuffer::new(), PaperWidth::Mm80.metrics())
    }

    fn sent(session: &Session<JobBuffer>) -> &[u8] {
        session.transport().as_slice()
    }

    /// Accepts `ok_writes` writes of at most `chunk` bytes, then fails
    struct FailingTransport {
        ok_writes: usize,
        chunk: usize,
        data: Vec<u8>,
    }

    impl Write for FailingTransport {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.ok_writes == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "printer gone"));
            }
            self.ok_writes -= 1;
            let n = buf.len().min(self.chunk);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Read for FailingTransport {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::TimedOut, "no reply"))
        }
    }

    fn chunked(ok_writes: usize, chunk: usize) -> Session<FailingTransport> {
        let transport = FailingTransport {
            ok_writes,
            chunk,
            data: Vec::new(),
        };
        Session::new(transport, PaperWidth::Mm58.metrics())
    }

    fn failing(ok_writes: usize) -> Session<FailingTransport> {
        chunked(ok_writes, usize::MAX)
    }

    #[test]
    fn test_begin_resets_state() {
        let mut s = session();
        s.set_font_size(3, 2).unwrap();
        s.set_underline(true).unwrap();
        s.set_smooth(true).unwrap();
        assert_ne!(*s.state(), PrinterState::default());

        s.begin().unwrap();
        assert_eq!(*s.state(), PrinterState::default());
        assert!(sent(&s).ends_with(&[0x1B, 0x40]));
    }

    #[test]
    fn test_begin_with_chinese_mode() {
        let config = SessionConfig {
            chinese_mode: true,
            ..SessionConfig::default()
        };
        let mut s = Session::from_config(JobBuffer::new(), &config);
        s.begin().unwrap();
        assert_eq!(sent(&s), &[0x1B, 0x40, 0x1C, 0x26]);
    }

    #[test]
    fn test_setters_track_state_and_emit() {
        let mut s = session();
        s.set_underline(true).unwrap();
        s.set_emphasis(true).unwrap();
        s.set_upside_down(true).unwrap();
        s.set_rotate(true).unwrap();
        s.set_reverse(true).unwrap();
        s.set_smooth(true).unwrap();

        let state = s.state();
        assert!(state.underline && state.emphasis && state.upside_down);
        assert!(state.rotate && state.reverse && state.smooth);
        assert_eq!(
            sent(&s),
            &[
                0x1B, 0x2D, 1, 0x1B, 0x45, 1, 0x1B, 0x7B, 1, 0x1B, 0x56, 1, 0x1D, 0x42, 1, 0x1D,
                0x62, 1
            ]
        );
    }

    #[test]
    fn test_font_size_is_clamped() {
        let mut s = session();
        s.set_font_size(0, 12).unwrap();
        assert_eq!((s.state().width_scale, s.state().height_scale), (1, 8));
        assert_eq!(sent(&s), &[0x1D, 0x21, 0x07]);
    }

    #[test]
    fn test_print_uses_code_page() {
        let mut s = session();
        assert_eq!(s.println("中A").unwrap(), 4);
        assert_eq!(sent(&s), &[0xD6, 0xD0, b'A', 0x0A]);
    }

    #[test]
    fn test_custom_encoder() {
        let mut s = Session::with_encoder(JobBuffer::new(), PageMetrics::default(), Utf8);
        s.print("中").unwrap();
        assert_eq!(s.into_inner().into_bytes(), "中".as_bytes());
    }

    #[test]
    fn test_inline_and_divider() {
        let mut s = Session::new(JobBuffer::new(), PaperWidth::Mm58.metrics());
        let dots = FillSpec::default().with_fill(".").with_alignment(Alignment::Right);
        s.inline("Total", "9.50", &dots).unwrap();
        s.divider(&FillSpec::default().with_fill("-")).unwrap();

        let text = String::from_utf8(s.into_inner().into_bytes()).unwrap();
        assert_eq!(text, format!("Total{}9.50{}", ".".repeat(23), "-".repeat(32)));
    }

    #[test]
    fn test_fill_around_double_width_font() {
        let mut s = Session::new(JobBuffer::new(), PaperWidth::Mm58.metrics());
        let spec = FillSpec::default().with_fill("*").with_font_width(2);
        s.fill_around("OK", &spec).unwrap();
        assert_eq!(sent(&s), format!("{}OK{}", "*".repeat(7), "*".repeat(7)).as_bytes());
    }

    #[test]
    fn test_print_table() {
        let mut s = session();
        s.set_font_size(2, 2).unwrap();
        s.set_emphasis(true).unwrap();
        s.transport.clear();

        let table = TableDefinition::new(vec![ColumnSpec::new("Item", 10)]).row(vec![
            ColumnSpec::new("Tea", 10),
            ColumnSpec::with_fill("2.50", FillSpec::default().with_alignment(Alignment::Right))
                .aligned(Alignment::Right),
        ]);
        let written = s.print_table(&table).unwrap();
        assert_eq!(written, 2 * 49);
        assert_eq!(*s.state(), PrinterState::default());

        let bytes = sent(&s);
        let prelude = [0x1B, 0x4D, 0, 0x1B, 0x61, 0, 0x1D, 0x21, 0x00, 0x1B, 0x45, 0];
        assert_eq!(&bytes[..12], &prelude);
        let text = String::from_utf8(bytes[12..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("Item{}", " ".repeat(44)));
        assert_eq!(lines[1], format!("Tea{}{}2.50", " ".repeat(7), " ".repeat(34)));
    }

    #[test]
    fn test_table_full_line_row() {
        let mut s = Session::new(JobBuffer::new(), PaperWidth::Mm58.metrics());
        let table = TableDefinition::default().row(vec![ColumnSpec::with_fill(
            "",
            FillSpec::default().with_fill("=").with_width(ColumnWidth::FullLine),
        )]);
        s.print_table(&table).unwrap();
        assert!(sent(&s).ends_with(format!("{}\n", "=".repeat(32)).as_bytes()));
    }

    #[test]
    fn test_barcode_resets_and_centers() {
        let mut s = session();
        s.set_font_size(2, 3).unwrap();
        s.set_reverse(true).unwrap();
        s.transport.clear();

        let written = s.barcode("12345678", Symbology::Ean8).unwrap();
        assert_eq!(*s.state(), PrinterState::default());

        let bytes = sent(&s);
        assert_eq!(written, bytes.len());
        assert_eq!(
            &bytes[..24],
            &[
                0x1D, 0x21, 0x00, 0x1B, 0x2D, 0, 0x1B, 0x45, 0, 0x1B, 0x7B, 0, 0x1B, 0x56, 0, 0x1D,
                0x42, 0, 0x1D, 0x62, 0, 0x1B, 0x61, 1
            ]
        );
        assert_eq!(&bytes[24..], b"\x1D\x6B\x0312345678\x00");
    }

    #[test]
    fn test_barcode_with_caption() {
        let mut s = session();
        let written = s.barcode_with_caption("12345678", Symbology::Ean8).unwrap();
        assert_eq!(written, sent(&s).len());
        assert!(sent(&s).ends_with(b"\x1D\x6B\x0312345678\x0012345678\n"));
    }

    #[test]
    fn test_barcode_too_long_writes_nothing() {
        let mut s = session();
        s.set_underline(true).unwrap();
        s.transport.clear();

        let data = "1".repeat(300);
        let err = s.barcode(&data, Symbology::Code128).unwrap_err();
        assert!(matches!(err, PrintError::InvalidParameter(_)));
        assert!(sent(&s).is_empty());
        assert!(s.state().underline);
    }

    #[test]
    fn test_qr_code_bytes() {
        let mut s = session();
        let written = s.qr_code("hello world", QrOptions::default()).unwrap();
        assert_eq!(written, 9 + 8 + 8 + 8 + 11 + 8);
        assert_eq!(sent(&s).len(), written);
        assert_eq!(&sent(&s)[25..30], &[0x1D, 0x28, 0x6B, 14, 0]);
    }

    #[test]
    fn test_qr_code_too_long_writes_nothing() {
        let mut s = session();
        let data = "x".repeat(7090);
        let err = s.qr_code(&data, QrOptions::default()).unwrap_err();
        assert!(matches!(err, PrintError::PayloadTooLong { len: 7090, .. }));
        assert!(sent(&s).is_empty());
    }

    #[test]
    fn test_qr_code_aborts_on_first_failed_write() {
        let mut s = failing(3);
        let err = s.qr_code("hello", QrOptions::default()).unwrap_err();
        match err {
            PrintError::TransportWrite { written, source } => {
                assert_eq!(written, 9 + 8 + 8);
                assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(s.into_inner().data.len(), 25);
    }

    #[test]
    fn test_short_writes_are_continued() {
        let mut s = chunked(usize::MAX, 3);
        let written = s.qr_code("hello world", QrOptions::default()).unwrap();
        assert_eq!(written, 52);
        assert_eq!(s.into_inner().data.len(), 52);
    }

    #[test]
    fn test_partial_block_counts_toward_written() {
        // 4 bytes per call, 10 calls: model (3 calls), size (2), correction (2),
        // then 12 of the 19 store bytes before the 11th call fails
        let mut s = chunked(10, 4);
        let err = s.qr_code("hello world", QrOptions::default()).unwrap_err();
        assert!(matches!(err, PrintError::TransportWrite { written: 37, .. }));
        assert_eq!(s.into_inner().data.len(), 37);
    }

    #[test]
    fn test_write_failure_is_not_retried() {
        let mut s = failing(0);
        assert!(matches!(
            s.cut(),
            Err(PrintError::TransportWrite { written: 0, .. })
        ));
        assert!(s.into_inner().data.is_empty());
    }

    #[test]
    fn test_read_status() {
        let mut s = Session::new(JobBuffer::with_status(&[0x12]), PageMetrics::default());
        s.set_emphasis(true).unwrap();
        let before = *s.state();

        assert_eq!(s.read_status(1).unwrap(), 0x12);
        assert_eq!(*s.state(), before);
        assert!(sent(&s).ends_with(&[0x10, 0x04, 0x01]));

        // Queue is empty now
        assert!(matches!(s.read_status(1), Err(PrintError::TransportRead(_))));
    }

    #[test]
    fn test_read_status_failure() {
        let mut s = failing(1);
        let err = s.read_status(2).unwrap_err();
        assert!(matches!(err, PrintError::TransportRead(e) if e.kind() == io::ErrorKind::TimedOut));
    }

    #[test]
    fn test_left_margin_range() {
        let mut s = session();
        s.set_left_margin(48).unwrap();
        assert!(sent(&s).is_empty());
        s.set_left_margin(47).unwrap();
        assert_eq!(sent(&s), &[0x1D, 0x4C, 47, 0]);
    }

    #[test]
    fn test_title_and_content() {
        let mut s = session();
        s.title("MENU").unwrap();
        assert_eq!(s.state().width_scale, 2);
        assert!(s.state().emphasis);

        s.content(|s| s.println("body").map(|_| ())).unwrap();
        assert_eq!(*s.state(), PrinterState::default());
        assert!(sent(&s).ends_with(b"body\n\n"));
    }

    #[test]
    fn test_end_and_cuts() {
        let mut s = session();
        s.feed_and_cut(true).unwrap();
        s.cut_partial().unwrap();
        s.end().unwrap();
        assert_eq!(
            sent(&s),
            &[0x1B, 0x64, 1, 0x1D, 0x56, 0x41, 0x30, 0x1D, 0x56, 0x01, 0xFA]
        );
    }
}

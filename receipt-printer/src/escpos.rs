//! ESC/POS command encoder
//!
//! Stateless builders: each function maps one printer operation to the
//! exact bytes the printer expects. Text never passes through here; it is
//! converted by a [`TextEncoder`](crate::TextEncoder) at the session.

use serde::Deserialize;

use crate::error::{PrintError, PrintResult};
use crate::fill::Alignment;

pub const LF: u8 = 0x0A;
pub const DLE: u8 = 0x10;
pub const EOT: u8 = 0x04;
pub const ESC: u8 = 0x1B;
pub const FS: u8 = 0x1C;
pub const GS: u8 = 0x1D;

/// Largest payload a single QR symbol can store
pub const QR_MAX_PAYLOAD: usize = 7089;

/// Bytes of the store-data header (cn fn m) counted in pL/pH
const QR_STORE_HEADER_LEN: usize = 3;

fn toggle(on: bool) -> u8 {
    on as u8
}

/// 16-bit little-endian parameter as (nL, nH)
fn le16(value: u16) -> [u8; 2] {
    [(value % 256) as u8, (value / 256) as u8]
}

// === Printer Control ===

/// Initialize printer (ESC @)
pub fn initialize() -> Vec<u8> {
    vec![ESC, 0x40]
}

/// End-of-document marker
pub fn end_of_document() -> Vec<u8> {
    vec![0xFA]
}

/// Execute test print (GS ( A)
pub fn self_test() -> Vec<u8> {
    vec![GS, 0x28, 0x41, 0x02, 0x00, 0x00, 0x02]
}

/// Real-time status request (DLE EOT n)
pub fn status_request(n: u8) -> Vec<u8> {
    vec![DLE, EOT, n]
}

/// Enable Chinese character mode (FS &)
pub fn chinese_mode_on() -> Vec<u8> {
    vec![FS, 0x26]
}

/// Disable Chinese character mode (FS .)
pub fn chinese_mode_off() -> Vec<u8> {
    vec![FS, 0x2E]
}

// === Paper Control ===

pub fn line_feed() -> Vec<u8> {
    vec![LF]
}

/// Print and feed n lines (ESC d n)
pub fn feed_lines(lines: u8) -> Vec<u8> {
    vec![ESC, 0x64, lines]
}

/// Feed and full cut (GS V A 0x30)
pub fn cut() -> Vec<u8> {
    vec![GS, 0x56, 0x41, 0x30]
}

/// Partial cut (GS V 1)
pub fn cut_partial() -> Vec<u8> {
    vec![GS, 0x56, 0x01]
}

/// Full cut after feeding n lines (GS V 66 n)
pub fn cut_feed(lines: u8) -> Vec<u8> {
    vec![GS, 0x56, 0x42, lines]
}

// === Cash Drawer ===

/// Drawer kick-out connector pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerPin {
    Pin2,
    Pin5,
}

/// Generate pulse on a drawer pin (ESC p m t1 t2)
///
/// `on` and `off` are in units of 2ms.
pub fn drawer_kick(pin: DrawerPin, on: u8, off: u8) -> Vec<u8> {
    let m = match pin {
        DrawerPin::Pin2 => 0,
        DrawerPin::Pin5 => 1,
    };
    vec![ESC, 0x70, m, on, off]
}

pub fn open_drawer() -> Vec<u8> {
    drawer_kick(DrawerPin::Pin2, 10, 10)
}

/// Cash drawer kick with a long off time
pub fn cash() -> Vec<u8> {
    drawer_kick(DrawerPin::Pin2, 10, 255)
}

// === Character Formatting ===

/// Character font
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontFamily {
    #[default]
    A,
    B,
    C,
}

impl FontFamily {
    /// Parse "A", "B" or "C", falling back to font A
    pub fn from_name(name: &str) -> Self {
        match name {
            "B" => FontFamily::B,
            "C" => FontFamily::C,
            _ => FontFamily::A,
        }
    }
}

/// Select character font (ESC M n)
pub fn select_font(font: FontFamily) -> Vec<u8> {
    let n = match font {
        FontFamily::A => 0,
        FontFamily::B => 1,
        FontFamily::C => 2,
    };
    vec![ESC, 0x4D, n]
}

/// Select justification (ESC a n)
pub fn select_alignment(alignment: Alignment) -> Vec<u8> {
    vec![ESC, 0x61, alignment.code()]
}

/// Select character size (GS ! n)
///
/// Scales are 1-based; each one is stored in a 4-bit field, so out of range
/// values wrap into the nibble.
pub fn select_size(width: u8, height: u8) -> Vec<u8> {
    let w = width.wrapping_sub(1) & 0x0F;
    let h = height.wrapping_sub(1) & 0x0F;
    vec![GS, 0x21, (w << 4) | h]
}

/// Select print mode bits (ESC ! n)
pub fn print_mode(mode: u8) -> Vec<u8> {
    vec![ESC, 0x21, mode]
}

/// Right-side character spacing (ESC SP n)
pub fn letter_spacing(dots: u8) -> Vec<u8> {
    vec![ESC, 0x20, dots]
}

/// Select print color (ESC r n)
pub fn text_color(color: u8) -> Vec<u8> {
    vec![ESC, 0x72, color]
}

/// Underline mode (ESC - n)
pub fn underline(on: bool) -> Vec<u8> {
    vec![ESC, 0x2D, toggle(on)]
}

/// Emphasized mode (ESC E n)
///
/// Not to be confused with [`double_strike`] (ESC G n), which some printers
/// render the same way. Sessions track and send this one.
pub fn emphasis(on: bool) -> Vec<u8> {
    vec![ESC, 0x45, toggle(on)]
}

/// Double-strike mode (ESC G n)
pub fn double_strike(on: bool) -> Vec<u8> {
    vec![ESC, 0x47, toggle(on)]
}

/// Upside-down mode (ESC { n)
pub fn upside_down(on: bool) -> Vec<u8> {
    vec![ESC, 0x7B, toggle(on)]
}

/// 90° clockwise rotation (ESC V n)
pub fn rotate(on: bool) -> Vec<u8> {
    vec![ESC, 0x56, toggle(on)]
}

/// White/black reverse printing (GS B n)
pub fn reverse(on: bool) -> Vec<u8> {
    vec![GS, 0x42, toggle(on)]
}

/// Smoothing mode (GS b n)
pub fn smooth(on: bool) -> Vec<u8> {
    vec![GS, 0x62, toggle(on)]
}

/// International character set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CharacterSet {
    #[default]
    Usa,
    France,
    Germany,
    Uk,
    Denmark,
    Sweden,
    Italy,
    Spain,
    Japan,
    Norway,
}

impl CharacterSet {
    /// Parse a language code ("en", "fr", ...), falling back to USA
    pub fn from_lang(lang: &str) -> Self {
        match lang {
            "fr" => CharacterSet::France,
            "de" => CharacterSet::Germany,
            "uk" => CharacterSet::Uk,
            "da" => CharacterSet::Denmark,
            "sv" => CharacterSet::Sweden,
            "it" => CharacterSet::Italy,
            "es" => CharacterSet::Spain,
            "ja" => CharacterSet::Japan,
            "no" => CharacterSet::Norway,
            _ => CharacterSet::Usa,
        }
    }
}

/// Select international character set (ESC R n)
pub fn character_set(set: CharacterSet) -> Vec<u8> {
    vec![ESC, 0x52, set as u8]
}

// === Positioning ===

/// Absolute horizontal print position (ESC $ nL nH)
pub fn move_x(x: u16) -> Vec<u8> {
    let [l, h] = le16(x);
    vec![ESC, 0x24, l, h]
}

/// Absolute vertical print position in page mode (GS $ nL nH)
pub fn move_y(y: u16) -> Vec<u8> {
    let [l, h] = le16(y);
    vec![GS, 0x24, l, h]
}

/// Left margin (GS L nL nH)
pub fn left_margin(dots: u16) -> Vec<u8> {
    let [l, h] = le16(dots);
    vec![GS, 0x4C, l, h]
}

// === Barcode ===

/// 1D barcode symbology (GS k m)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbology {
    UpcA,
    UpcE,
    Ean13,
    Ean8,
    Code39,
    Code128,
}

impl Symbology {
    /// The `m` parameter of GS k
    pub fn code(self) -> u8 {
        match self {
            Symbology::UpcA => 0,
            Symbology::UpcE => 1,
            Symbology::Ean13 => 2,
            Symbology::Ean8 => 3,
            Symbology::Code39 => 4,
            Symbology::Code128 => 73,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Symbology::UpcA),
            1 => Some(Symbology::UpcE),
            2 => Some(Symbology::Ean13),
            3 => Some(Symbology::Ean8),
            4 => Some(Symbology::Code39),
            73 => Some(Symbology::Code128),
            _ => None,
        }
    }

    /// Symbologies with m >= 70 carry an explicit length byte
    fn length_prefixed(self) -> bool {
        self.code() >= 70
    }
}

/// Print barcode (GS k)
///
/// - m < 70: `GS k m d1...dk NUL`
/// - m >= 70: `GS k m n d1...dn`
pub fn barcode(symbology: Symbology, data: &[u8]) -> PrintResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(data.len() + 5);
    buf.extend_from_slice(&[GS, 0x6B, symbology.code()]);

    if symbology.length_prefixed() {
        let n = u8::try_from(data.len()).map_err(|_| {
            PrintError::InvalidParameter(format!(
                "barcode data too long for {:?}: {} bytes (max 255)",
                symbology,
                data.len()
            ))
        })?;
        buf.push(n);
        buf.extend_from_slice(data);
    } else {
        buf.extend_from_slice(data);
        buf.push(0x00);
    }
    Ok(buf)
}

// === QR Code ===

/// QR code model (function 165)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum QrModel {
    Model1,
    #[default]
    Model2,
}

/// QR code settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QrOptions {
    pub model: QrModel,
    /// Module size in dots, clamped to 1..=16
    pub size: u8,
    /// Error correction selector, clamped to 48 (L) ..= 51 (H)
    pub correction: u8,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            model: QrModel::Model2,
            size: 8,
            correction: 49,
        }
    }
}

/// Encoded QR code, one block per GS ( k function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    pub model: Vec<u8>,
    pub size: Vec<u8>,
    pub correction: Vec<u8>,
    pub store: Vec<u8>,
    pub print: Vec<u8>,
}

impl QrCode {
    /// Encode a QR code, rejecting payloads over [`QR_MAX_PAYLOAD`]
    pub fn new(data: &[u8], options: QrOptions) -> PrintResult<Self> {
        if data.len() > QR_MAX_PAYLOAD {
            return Err(PrintError::PayloadTooLong {
                len: data.len(),
                max: QR_MAX_PAYLOAD,
            });
        }

        let size = options.size.clamp(1, 16);
        let correction = options.correction.clamp(48, 51);
        let model = match options.model {
            QrModel::Model1 => 49,
            QrModel::Model2 => 50,
        };

        // Function 180: Store data, pL pH cover cn fn m + payload
        let len = (data.len() + QR_STORE_HEADER_LEN) as u16;
        let [p_l, p_h] = le16(len);
        let mut store = Vec::with_capacity(data.len() + 8);
        store.extend_from_slice(&[GS, 0x28, 0x6B, p_l, p_h, 0x31, 0x50, 0x30]);
        store.extend_from_slice(data);

        Ok(Self {
            // Function 165: Select model
            model: vec![GS, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, model, 0x00],
            // Function 167: Set module size
            size: vec![GS, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, size],
            // Function 169: Set error correction
            correction: vec![GS, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, correction],
            store,
            // Function 181: Print
            print: vec![GS, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30],
        })
    }

    /// Blocks in transmission order
    pub fn blocks(&self) -> [&[u8]; 5] {
        [
            self.model.as_slice(),
            self.size.as_slice(),
            self.correction.as_slice(),
            self.store.as_slice(),
            self.print.as_slice(),
        ]
    }

    /// All blocks concatenated
    pub fn to_bytes(&self) -> Vec<u8> {
        self.blocks().concat()
    }
}

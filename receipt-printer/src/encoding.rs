//! Code page conversion for printed text
//!
//! Text reaches the printer in its own code page, not UTF-8. Most Chinese
//! thermal printers expect GB18030 (a superset of GBK), which is the default
//! here. Any `Fn(&str) -> Vec<u8>` can be used as an encoder.

/// Converts text into the printer's code page
pub trait TextEncoder {
    fn encode(&self, text: &str) -> Vec<u8>;
}

/// GB18030 encoding for Chinese printers
///
/// ASCII passes through unchanged; Chinese characters become 2 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gb18030;

impl TextEncoder for Gb18030 {
    fn encode(&self, text: &str) -> Vec<u8> {
        let (cow, _, _) = encoding_rs::GB18030.encode(text);
        cow.into_owned()
    }
}

/// UTF-8 passthrough, for printers with a UTF-8 code page
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8;

impl TextEncoder for Utf8 {
    fn encode(&self, text: &str) -> Vec<u8> {
        text.as_bytes().to_vec()
    }
}

impl<F> TextEncoder for F
where
    F: Fn(&str) -> Vec<u8>,
{
    fn encode(&self, text: &str) -> Vec<u8> {
        self(text)
    }
}

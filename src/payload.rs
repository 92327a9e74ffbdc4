// src/payload.rs
// Typed views over well-known record payloads. Unlike DecodedRecord these honor the text status
// byte and decode the actual character encoding.

use crate::types::{NdefRecord, TEXT_RECORD_TYPE, URI_RECORD_TYPE};
use crate::uri::uri_prefix_of;

const STATUS_UTF16: u8 = 0x80;
const STATUS_LANG_LEN_MASK: u8 = 0x3F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPayload {
    pub encoding: TextEncoding,
    pub language: String,
    pub text: String,
}

impl TextPayload {
    /// Parse a `T` payload. `None` when the status byte is missing or the language code runs past
    /// the end of the payload.
    pub fn parse(payload: &[u8]) -> Option<Self> {
        let (&status, rest) = payload.split_first()?;
        let lang_len = (status & STATUS_LANG_LEN_MASK) as usize;
        if lang_len > rest.len() {
            return None;
        }
        let (language, text) = rest.split_at(lang_len);

        let (encoding, text) = if status & STATUS_UTF16 != 0 {
            (TextEncoding::Utf16, decode_utf16(text))
        } else {
            (TextEncoding::Utf8, String::from_utf8_lossy(text).into_owned())
        };

        Some(Self {
            encoding,
            language: String::from_utf8_lossy(language).into_owned(),
            text,
        })
    }
}

// Big-endian unless a byte order mark says otherwise.
fn decode_utf16(bytes: &[u8]) -> String {
    let (little_endian, bytes) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (true, rest),
        [0xFE, 0xFF, rest @ ..] => (false, rest),
        _ => (false, bytes),
    };
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| {
            if little_endian {
                u16::from_le_bytes([c[0], c[1]])
            } else {
                u16::from_be_bytes([c[0], c[1]])
            }
        })
        .collect();
    String::from_utf16_lossy(&units)
}

impl NdefRecord {
    pub fn as_text(&self) -> Option<TextPayload> {
        if !self.is_well_known(TEXT_RECORD_TYPE) {
            return None;
        }
        TextPayload::parse(&self.payload)
    }

    /// Full URI of a `U` record, prefix expanded.
    pub fn as_uri(&self) -> Option<String> {
        if !self.is_well_known(URI_RECORD_TYPE) {
            return None;
        }
        let (&code, rest) = self.payload.split_first()?;
        Some(format!(
            "{}{}",
            uri_prefix_of(code as usize),
            String::from_utf8_lossy(rest)
        ))
    }
}

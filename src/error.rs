// src/error.rs
use thiserror::Error;

/// Failure while framing or parsing raw NDEF bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("empty NDEF message")]
    Empty,

    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("chunked records are not supported")]
    ChunkedRecord,

    #[error("reserved type name format: {0}")]
    ReservedTypeNameFormat(u8),

    #[error("no NDEF TLV found")]
    NoNdefTlv,

    #[error("{field} of {len} bytes exceeds maximum {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("NDEF message of {len} bytes does not fit in a TLV (max {max})")]
    MessageTooLarge { len: usize, max: usize },
}

/// Rejected character in strict hex parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex digit {digit:?} at position {position}")]
pub struct HexDigitError {
    pub digit: char,
    pub position: usize,
}

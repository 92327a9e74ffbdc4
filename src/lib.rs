// src/lib.rs
pub mod convert;
mod decoder;
mod encoder;
mod error;
mod payload;
mod types;
pub mod uri;
mod wire;

pub use decoder::{decode, decode_bytes, decode_record, decode_to_data};
pub use encoder::{
    EncodeOptions, Encoder, MAX_LANGUAGE_CODE_LEN, UriRecordPolicy, encode, text_record, uri_record,
};
pub use error::{HexDigitError, WireError};
pub use payload::{TextEncoding, TextPayload};
pub use types::{
    DecodedRecord, NdefData, NdefMessage, NdefRecord, TEXT_RECORD_TYPE, TextRecordSpec,
    TypeNameFormat, URI_RECORD_TYPE, UriRecordSpec, WriteRequest,
};
pub use uri::{URI_PREFIXES, uri_prefix_of};
pub use wire::{TLV_MAX_LENGTH, find_ndef_tlv, wrap_in_tlv};

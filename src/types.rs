// src/types.rs
use serde::{Deserialize, Serialize};

use crate::error::WireError;

/// Type Name Format: how the record's type field is to be interpreted (3 bits of the header).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum TypeNameFormat {
    Empty = 0,
    WellKnown = 1,
    Mime = 2,
    Uri = 3,
    External = 4,
    Unknown = 5,
    Unchanged = 6,
}

impl From<TypeNameFormat> for u8 {
    fn from(tnf: TypeNameFormat) -> Self {
        tnf as u8
    }
}

impl TryFrom<u8> for TypeNameFormat {
    type Error = WireError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Empty),
            1 => Ok(Self::WellKnown),
            2 => Ok(Self::Mime),
            3 => Ok(Self::Uri),
            4 => Ok(Self::External),
            5 => Ok(Self::Unknown),
            6 => Ok(Self::Unchanged),
            other => Err(WireError::ReservedTypeNameFormat(other)),
        }
    }
}

/// Well-known record type `T`.
pub const TEXT_RECORD_TYPE: u8 = 0x54;
/// Well-known record type `U`.
pub const URI_RECORD_TYPE: u8 = 0x55;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefRecord {
    pub type_name_format: TypeNameFormat,
    pub record_type: Vec<u8>,
    pub identifier: Vec<u8>,
    pub payload: Vec<u8>,
}

impl NdefRecord {
    pub fn new(
        type_name_format: TypeNameFormat,
        record_type: Vec<u8>,
        identifier: Vec<u8>,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            type_name_format,
            record_type,
            identifier,
            payload,
        }
    }

    /// Record with TNF `Empty` and every field zero-length.
    pub fn empty() -> Self {
        Self::new(TypeNameFormat::Empty, Vec::new(), Vec::new(), Vec::new())
    }

    pub fn is_well_known(&self, record_type: u8) -> bool {
        self.type_name_format == TypeNameFormat::WellKnown && self.record_type == [record_type]
    }
}

/// Ordered records; the first one is what readers usually look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NdefMessage {
    pub records: Vec<NdefRecord>,
}

impl NdefMessage {
    pub fn new(records: Vec<NdefRecord>) -> Self {
        Self { records }
    }

    /// The message written to wipe a tag: a single empty record.
    pub fn erase() -> Self {
        Self::new(vec![NdefRecord::empty()])
    }

    /// True for the erase message and for a message with no records, which writes the same
    /// blank tag.
    pub fn is_erase(&self) -> bool {
        self.records
            .first()
            .is_none_or(|r| r.type_name_format == TypeNameFormat::Empty)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn default_language_code() -> String {
    String::from("en")
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TextRecordSpec {
    #[serde(default)]
    pub id: Vec<u8>,
    pub text: String,
    #[serde(default = "default_language_code")]
    pub language_code: String,
}

impl TextRecordSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Vec::new(),
            text: text.into(),
            language_code: default_language_code(),
        }
    }

    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<Vec<u8>>) -> Self {
        self.id = id.into();
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UriRecordSpec {
    #[serde(default)]
    pub id: Vec<u8>,
    pub uri: String,
}

impl UriRecordSpec {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            id: Vec::new(),
            uri: uri.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<Vec<u8>>) -> Self {
        self.id = id.into();
        self
    }
}

/// What a host asks to have written to a tag. Empty means erase.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WriteRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text_records: Vec<TextRecordSpec>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub uri_records: Vec<UriRecordSpec>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl WriteRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, record: TextRecordSpec) -> Self {
        self.text_records.push(record);
        self
    }

    pub fn with_uri(mut self, record: UriRecordSpec) -> Self {
        self.uri_records.push(record);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text_records.is_empty() && self.uri_records.is_empty()
    }
}

/// A record rendered for consumers: numbers, hex and byte-per-char strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DecodedRecord {
    pub tnf: TypeNameFormat,
    #[serde(rename = "type")]
    pub record_type: Option<u64>,
    pub id: Vec<u64>,
    pub payload: Vec<u64>,
    pub payload_as_hex_string: String,
    pub payload_as_string_with_prefix: String,
    pub payload_as_string: String,
}

/// Envelope handed to listeners: `{ "message": [...] }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NdefData {
    pub message: Vec<DecodedRecord>,
}

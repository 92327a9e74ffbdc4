// src/encoder.rs
use log::debug;
use serde::Deserialize;

use crate::convert::string_to_utf8_bytes;
use crate::types::{
    NdefMessage, NdefRecord, TEXT_RECORD_TYPE, TextRecordSpec, TypeNameFormat, URI_RECORD_TYPE,
    UriRecordSpec, WriteRequest,
};
use crate::uri::split_uri_prefix;

/// What to do with `uri_records` in a [`WriteRequest`].
///
/// Existing writers never produced URI records, so [`UriRecordPolicy::Omit`] stays the default
/// until that is decided otherwise; [`UriRecordPolicy::Encode`] is opt-in.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UriRecordPolicy {
    #[default]
    Omit,
    Encode,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EncodeOptions {
    pub uri_records: UriRecordPolicy,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    options: EncodeOptions,
}

impl Encoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn encode(&self, request: &WriteRequest) -> NdefMessage {
        let mut records: Vec<NdefRecord> = request.text_records.iter().map(text_record).collect();

        match self.options.uri_records {
            UriRecordPolicy::Encode => records.extend(request.uri_records.iter().map(uri_record)),
            UriRecordPolicy::Omit if !request.uri_records.is_empty() => {
                debug!(
                    "Omitting {} URI record(s) from NDEF message",
                    request.uri_records.len()
                );
            }
            UriRecordPolicy::Omit => {}
        }

        debug!("Encoded NDEF message with {} record(s)", records.len());
        NdefMessage::new(records)
    }
}

/// Encode with default options (URI records omitted).
pub fn encode(request: &WriteRequest) -> NdefMessage {
    Encoder::default().encode(request)
}

/// Language code length bits (0-5) of the text status byte.
pub const MAX_LANGUAGE_CODE_LEN: usize = 0x3F;

/// Text record: `[lang length] + UTF-8(lang) + UTF-8(text)`. Bit 7 of the status byte (UTF-16) is
/// never set; language codes longer than [`MAX_LANGUAGE_CODE_LEN`] bytes are cut to that length.
pub fn text_record(spec: &TextRecordSpec) -> NdefRecord {
    let mut language = string_to_utf8_bytes(&spec.language_code);
    language.truncate(MAX_LANGUAGE_CODE_LEN);

    let mut payload = Vec::with_capacity(1 + language.len() + spec.text.len());
    payload.push(language.len() as u8);
    payload.extend(language);
    payload.extend(string_to_utf8_bytes(&spec.text));

    NdefRecord::new(
        TypeNameFormat::WellKnown,
        vec![TEXT_RECORD_TYPE],
        spec.id.clone(),
        payload,
    )
}

/// URI record: `[prefix code] + remainder`, the prefix taken from the URI identifier table.
pub fn uri_record(spec: &UriRecordSpec) -> NdefRecord {
    let (code, rest) = split_uri_prefix(&spec.uri);
    let mut payload = Vec::with_capacity(rest.len() + 1);
    payload.push(code);
    payload.extend(string_to_utf8_bytes(rest));

    NdefRecord::new(
        TypeNameFormat::WellKnown,
        vec![URI_RECORD_TYPE],
        spec.id.clone(),
        payload,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_record_layout() {
        let record = text_record(&TextRecordSpec::new("Hi"));
        assert_eq!(record.type_name_format, TypeNameFormat::WellKnown);
        assert_eq!(record.record_type, vec![0x54]);
        assert!(record.identifier.is_empty());
        assert_eq!(record.payload, vec![0x02, 0x65, 0x6e, 0x48, 0x69]);
    }

    #[test]
    fn text_record_keeps_language_and_id() {
        let spec = TextRecordSpec::new("Hallo")
            .with_language("de-AT")
            .with_id(vec![7, 8]);
        let record = text_record(&spec);
        assert_eq!(record.identifier, vec![7, 8]);
        assert_eq!(record.payload[0], 5);
        assert_eq!(&record.payload[1..], b"de-ATHallo");
    }

    #[test]
    fn text_record_non_ascii() {
        let record = text_record(&TextRecordSpec::new("ü"));
        assert_eq!(record.payload, vec![0x02, b'e', b'n', 0xC3, 0xBC]);
    }

    #[test]
    fn empty_request_has_no_records() {
        let message = encode(&WriteRequest::new());
        assert!(message.is_empty());
        assert!(message.is_erase());
    }

    #[test]
    fn long_language_code_is_cut_to_status_bits() {
        let record = text_record(&TextRecordSpec::new("Hi").with_language("x".repeat(130)));
        let status = record.payload[0];
        assert_eq!(status, 0x3F);
        assert_eq!(status & 0xC0, 0);
        assert_eq!(record.payload.len(), 1 + 0x3F + 2);
        assert_eq!(&record.payload[1 + 0x3F..], b"Hi");

        let text = record.as_text().unwrap();
        assert_eq!(text.language.len(), 0x3F);
        assert_eq!(text.text, "Hi");
    }

    #[test]
    fn uri_records_omitted_by_default() {
        let request = WriteRequest::new().with_uri(UriRecordSpec::new("https://www.example.com"));
        assert!(encode(&request).is_empty());
    }

    #[test]
    fn uri_records_encoded_when_enabled() {
        let encoder = Encoder::new(EncodeOptions {
            uri_records: UriRecordPolicy::Encode,
        });
        let request = WriteRequest::new()
            .with_text(TextRecordSpec::new("a"))
            .with_uri(UriRecordSpec::new("https://www.example.com").with_id(vec![1]));
        let message = encoder.encode(&request);

        assert_eq!(message.len(), 2);
        assert_eq!(message.records[0].record_type, vec![TEXT_RECORD_TYPE]);
        let uri = &message.records[1];
        assert_eq!(uri.type_name_format, TypeNameFormat::WellKnown);
        assert_eq!(uri.record_type, vec![URI_RECORD_TYPE]);
        assert_eq!(uri.identifier, vec![1]);
        assert_eq!(uri.payload[0], 0x02);
        assert_eq!(&uri.payload[1..], b"example.com");
    }

    #[test]
    fn records_follow_request_order() {
        let request = WriteRequest::new()
            .with_text(TextRecordSpec::new("first"))
            .with_text(TextRecordSpec::new("second"));
        let message = encode(&request);
        assert_eq!(&message.records[0].payload[3..], b"first");
        assert_eq!(&message.records[1].payload[3..], b"second");
    }

    #[test]
    fn options_from_json() {
        let options: EncodeOptions = serde_json::from_str(r#"{"uri_records":"encode"}"#).unwrap();
        assert_eq!(options.uri_records, UriRecordPolicy::Encode);
        let options: EncodeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, EncodeOptions::default());
    }
}

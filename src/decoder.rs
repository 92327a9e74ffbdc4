// src/decoder.rs
use log::debug;

use crate::convert::{
    bytes_to_hex_array, bytes_to_hex_string, hex_array_to_decimal_array, hex_digits_to_decimal,
    hex_string_to_ascii_string,
};
use crate::error::WireError;
use crate::types::{DecodedRecord, NdefData, NdefMessage, NdefRecord, TEXT_RECORD_TYPE, URI_RECORD_TYPE};
use crate::uri::uri_prefix_of;

/// Decode every record in order. `None` in, `None` out: callers use it to tell "no tag data"
/// apart from an empty message.
pub fn decode(message: Option<&NdefMessage>) -> Option<Vec<DecodedRecord>> {
    let message = message?;
    let records: Vec<DecodedRecord> = message.records.iter().map(decode_record).collect();
    debug!("Decoded NDEF message with {} record(s)", records.len());
    Some(records)
}

pub fn decode_to_data(message: Option<&NdefMessage>) -> Option<NdefData> {
    decode(message).map(|message| NdefData { message })
}

/// Parse raw NDEF message bytes, then decode them.
pub fn decode_bytes(bytes: &[u8]) -> Result<Vec<DecodedRecord>, WireError> {
    let message = NdefMessage::from_bytes(bytes)?;
    Ok(message.records.iter().map(decode_record).collect())
}

pub fn decode_record(record: &NdefRecord) -> DecodedRecord {
    let payload_hex = bytes_to_hex_array(&record.payload);
    let payload_hex_string = bytes_to_hex_string(&record.payload);
    let with_prefix = hex_string_to_ascii_string(&payload_hex_string);

    let record_type = bytes_to_hex_array(&record.record_type)
        .first()
        .map(|h| hex_digits_to_decimal(h));
    let first_payload_byte = payload_hex.first().map(|h| hex_digits_to_decimal(h));

    let payload_as_string = match record_type {
        Some(t) if t == u64::from(TEXT_RECORD_TYPE) => match first_payload_byte {
            // status byte + language code
            Some(lang_len) => skip_chars(&with_prefix, lang_len.saturating_add(1)),
            None => String::new(),
        },
        Some(t) if t == u64::from(URI_RECORD_TYPE) => {
            let prefix = first_payload_byte
                .and_then(|code| usize::try_from(code).ok())
                .map_or("", uri_prefix_of);
            format!("{}{}", prefix, skip_chars(&with_prefix, 1))
        }
        _ => with_prefix.clone(),
    };

    DecodedRecord {
        tnf: record.type_name_format,
        record_type,
        id: hex_array_to_decimal_array(&bytes_to_hex_array(&record.identifier)),
        payload: hex_array_to_decimal_array(&payload_hex),
        payload_as_hex_string: payload_hex_string,
        payload_as_string_with_prefix: with_prefix,
        payload_as_string,
    }
}

fn skip_chars(s: &str, n: u64) -> String {
    match usize::try_from(n) {
        Ok(n) => s.chars().skip(n).collect(),
        Err(_) => String::new(),
    }
}

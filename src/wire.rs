// src/wire.rs
use log::trace;

use crate::error::WireError;
use crate::types::{NdefMessage, NdefRecord, TypeNameFormat};

// Header flags: MB | ME | CF | SR | IL | TNF (bits 2-0)
const FLAG_MB: u8 = 0x80;
const FLAG_ME: u8 = 0x40;
const FLAG_CF: u8 = 0x20;
const FLAG_SR: u8 = 0x10;
const FLAG_IL: u8 = 0x08;
const TNF_MASK: u8 = 0x07;

// Type 2 tag TLV blocks
pub const TLV_NULL: u8 = 0x00;
pub const TLV_NDEF: u8 = 0x03;
pub const TLV_TERMINATOR: u8 = 0xFE;
/// Largest value the 3-byte TLV length form can carry.
pub const TLV_MAX_LENGTH: usize = 0xFFFE;

impl NdefRecord {
    /// Serialize one record. `mb`/`me` mark the first/last record of the message. Type and id
    /// lengths are single bytes; longer fields are rejected rather than truncated.
    pub fn to_bytes(&self, mb: bool, me: bool) -> Result<Vec<u8>, WireError> {
        let type_len = field_len(&self.record_type, "record type", u8::MAX as usize)?;
        let id_len = field_len(&self.identifier, "record id", u8::MAX as usize)?;
        let payload_len = field_len(&self.payload, "record payload", u32::MAX as usize)?;
        let short = payload_len < 256;
        let has_id = id_len > 0;

        let mut header = self.type_name_format as u8;
        if mb {
            header |= FLAG_MB;
        }
        if me {
            header |= FLAG_ME;
        }
        if short {
            header |= FLAG_SR;
        }
        if has_id {
            header |= FLAG_IL;
        }

        let mut record = Vec::with_capacity(6 + type_len + id_len + payload_len);
        record.push(header);
        record.push(type_len as u8); // Type Length
        if short {
            record.push(payload_len as u8);
        } else {
            record.extend_from_slice(&(payload_len as u32).to_be_bytes());
        }
        if has_id {
            record.push(id_len as u8);
        }
        record.extend_from_slice(&self.record_type);
        record.extend_from_slice(&self.identifier);
        record.extend_from_slice(&self.payload);
        Ok(record)
    }
}

fn field_len(field: &[u8], name: &'static str, max: usize) -> Result<usize, WireError> {
    if field.len() > max {
        return Err(WireError::FieldTooLong {
            field: name,
            len: field.len(),
            max,
        });
    }
    Ok(field.len())
}

impl NdefMessage {
    /// Concatenated records with MB on the first and ME on the last. No records, no bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, WireError> {
        let last = self.records.len().saturating_sub(1);
        let mut bytes = Vec::new();
        for (i, record) in self.records.iter().enumerate() {
            bytes.extend(record.to_bytes(i == 0, i == last)?);
        }
        Ok(bytes)
    }

    /// Parse records until one carries ME or the input runs out. Bytes after ME are ignored.
    pub fn from_bytes(data: &[u8]) -> Result<Self, WireError> {
        if data.is_empty() {
            return Err(WireError::Empty);
        }

        let mut cursor = Cursor { data, pos: 0 };
        let mut records = Vec::new();

        while cursor.remaining() > 0 {
            let header = cursor.u8("record header")?;
            if header & FLAG_CF != 0 {
                return Err(WireError::ChunkedRecord);
            }
            let type_name_format = TypeNameFormat::try_from(header & TNF_MASK)?;

            let type_len = cursor.u8("type length")? as usize;
            let payload_len = if header & FLAG_SR != 0 {
                cursor.u8("payload length")? as usize
            } else {
                u32::from_be_bytes(cursor.array("payload length")?) as usize
            };
            let id_len = if header & FLAG_IL != 0 {
                cursor.u8("id length")? as usize
            } else {
                0
            };

            let record_type = cursor.take(type_len, "record type")?.to_vec();
            let identifier = cursor.take(id_len, "record id")?.to_vec();
            let payload = cursor.take(payload_len, "record payload")?.to_vec();

            trace!(
                "Parsed NDEF record: tnf={:?} type={:02x?} id_len={} payload_len={}",
                type_name_format,
                record_type,
                id_len,
                payload_len
            );

            records.push(NdefRecord {
                type_name_format,
                record_type,
                identifier,
                payload,
            });

            if header & FLAG_ME != 0 {
                break;
            }
        }

        Ok(Self { records })
    }
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, len: usize, context: &'static str) -> Result<&'a [u8], WireError> {
        if len > self.remaining() {
            return Err(WireError::UnexpectedEof { context });
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn u8(&mut self, context: &'static str) -> Result<u8, WireError> {
        Ok(self.take(1, context)?[0])
    }

    fn array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], WireError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, context)?);
        Ok(out)
    }
}

/// Frame an NDEF message as a Type 2 tag NDEF TLV followed by the terminator TLV.
pub fn wrap_in_tlv(ndef_bytes: &[u8]) -> Result<Vec<u8>, WireError> {
    let len = ndef_bytes.len();
    if len > TLV_MAX_LENGTH {
        return Err(WireError::MessageTooLarge {
            len,
            max: TLV_MAX_LENGTH,
        });
    }

    let mut tlv = Vec::with_capacity(len + 5);
    tlv.push(TLV_NDEF);
    if len < 0xFF {
        tlv.push(len as u8);
    } else {
        tlv.push(0xFF);
        tlv.extend_from_slice(&(len as u16).to_be_bytes());
    }
    tlv.extend_from_slice(ndef_bytes);
    tlv.push(TLV_TERMINATOR);
    Ok(tlv)
}

/// Value of the first NDEF TLV in a tag's data area. NULL TLVs are skipped, other TLVs (lock and
/// memory control, proprietary) are stepped over by their length.
pub fn find_ndef_tlv(buffer: &[u8]) -> Result<&[u8], WireError> {
    let mut cursor = Cursor {
        data: buffer,
        pos: 0,
    };

    while cursor.remaining() > 0 {
        let tag = cursor.u8("TLV tag")?;
        match tag {
            TLV_NULL => continue,
            TLV_TERMINATOR => break,
            _ => {}
        }

        let len = match cursor.u8("TLV length")? {
            0xFF => u16::from_be_bytes(cursor.array("TLV length")?) as usize,
            len => len as usize,
        };
        let value = cursor.take(len, "TLV value")?;

        if tag == TLV_NDEF {
            return Ok(value);
        }
        trace!("Skipping TLV 0x{:02x} ({} bytes)", tag, len);
    }

    Err(WireError::NoNdefTlv)
}

//! Minimal wire-format splitting for the preserve-unknown guarantee.
//!
//! A protobuf message is a flat sequence of (key, value) records. Splitting
//! a message into those records — without interpreting the values — lets
//! the codec remove two specific metadata fields and re-emit everything
//! else byte-for-byte.

use prost::encoding::{decode_key, decode_varint, encode_key, encode_varint, WireType};

use crate::error::{CodecError, CodecResult};

/// One field as it appeared on the wire. For length-delimited fields `data`
/// is the payload without the length prefix; for all other wire types it is
/// the value bytes exactly as read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RawField {
    pub tag: u32,
    pub wire_type: WireType,
    pub data: Vec<u8>,
}

/// Split a message body into its top-level fields.
pub(crate) fn split_fields(mut buf: &[u8]) -> CodecResult<Vec<RawField>> {
    let mut fields = Vec::new();
    while !buf.is_empty() {
        let (tag, wire_type) =
            decode_key(&mut buf).map_err(|e| CodecError::Malformed(e.to_string()))?;
        let data = match wire_type {
            WireType::Varint => {
                let start = buf;
                let before = buf.len();
                decode_varint(&mut buf).map_err(|e| CodecError::Malformed(e.to_string()))?;
                start[..before - buf.len()].to_vec()
            }
            WireType::SixtyFourBit => take(&mut buf, 8)?,
            WireType::ThirtyTwoBit => take(&mut buf, 4)?,
            WireType::LengthDelimited => {
                let len =
                    decode_varint(&mut buf).map_err(|e| CodecError::Malformed(e.to_string()))?;
                take(&mut buf, len as usize)?
            }
            WireType::StartGroup | WireType::EndGroup => {
                return Err(CodecError::Malformed(format!(
                    "unexpected group wire type for field {tag}"
                )));
            }
        };
        fields.push(RawField {
            tag,
            wire_type,
            data,
        });
    }
    Ok(fields)
}

/// Re-emit a single field, restoring the length prefix where one existed.
pub(crate) fn emit_field(field: &RawField, out: &mut Vec<u8>) {
    encode_key(field.tag, field.wire_type, out);
    if field.wire_type == WireType::LengthDelimited {
        encode_varint(field.data.len() as u64, out);
    }
    out.extend_from_slice(&field.data);
}

/// Re-emit a sequence of fields in their original order.
pub(crate) fn emit_fields(fields: &[RawField], out: &mut Vec<u8>) {
    for field in fields {
        emit_field(field, out);
    }
}

/// Decode the numeric value of a varint field's raw bytes.
pub(crate) fn varint_value(data: &[u8]) -> CodecResult<u64> {
    let mut buf = data;
    decode_varint(&mut buf).map_err(|e| CodecError::Malformed(e.to_string()))
}

fn take(buf: &mut &[u8], n: usize) -> CodecResult<Vec<u8>> {
    if buf.len() < n {
        return Err(CodecError::Truncated);
    }
    let (head, rest) = buf.split_at(n);
    *buf = rest;
    Ok(head.to_vec())
}

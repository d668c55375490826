use prost::encoding::WireType;
use prost::Message;
use resetpv_types::ResourceKind;

use crate::envelope::{Time, TypeMeta, Unknown, STORAGE_MAGIC};
use crate::error::{CodecError, CodecResult};
use crate::wire::{emit_field, emit_fields, split_fields, varint_value, RawField};

// ObjectMeta field numbers from k8s.io/apimachinery's generated proto.
const META_FIELD: u32 = 1;
const META_NAME: u32 = 1;
const META_DELETION_TIMESTAMP: u32 = 9;
const META_DELETION_GRACE_PERIOD: u32 = 10;

/// One decoded storage record.
///
/// Holds the envelope's type metadata plus the wrapped object's top-level
/// fields in wire form. The metadata message (object field 1) is split one
/// level deeper so the deletion markers can be addressed; everything else
/// stays opaque and is re-emitted unchanged on encode.
///
/// A `StoredObject` lives for the duration of one repair invocation: it is
/// built from store bytes, optionally mutated once, re-encoded, and
/// discarded.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredObject {
    type_meta: TypeMeta,
    content_encoding: String,
    content_type: String,
    fields: Vec<ObjectField>,
}

#[derive(Clone, Debug, PartialEq)]
enum ObjectField {
    /// Object field 1, split into the metadata message's own fields.
    Metadata(Vec<RawField>),
    /// Any other top-level field, carried verbatim.
    Opaque(RawField),
}

impl StoredObject {
    /// Decode a storage record, checking that it holds an object of `kind`.
    pub fn decode(kind: ResourceKind, bytes: &[u8]) -> CodecResult<Self> {
        if bytes.len() < STORAGE_MAGIC.len() || bytes[..STORAGE_MAGIC.len()] != STORAGE_MAGIC {
            return Err(CodecError::MissingMagic);
        }
        let unknown = Unknown::decode(&bytes[STORAGE_MAGIC.len()..])
            .map_err(|e| CodecError::Envelope(e.to_string()))?;
        let type_meta = unknown
            .type_meta
            .ok_or_else(|| CodecError::Envelope("missing type metadata".into()))?;
        if type_meta.kind != kind.kind_name() || type_meta.api_version != kind.api_version() {
            return Err(CodecError::KindMismatch {
                expected: format!("{}/{}", kind.api_version(), kind.kind_name()),
                found: format!("{}/{}", type_meta.api_version, type_meta.kind),
            });
        }

        let mut fields = Vec::new();
        for field in split_fields(&unknown.raw)? {
            if field.tag == META_FIELD && field.wire_type == WireType::LengthDelimited {
                let meta = split_fields(&field.data)?;
                validate_deletion_fields(&meta)?;
                fields.push(ObjectField::Metadata(meta));
            } else if field.tag == META_FIELD {
                return Err(CodecError::Malformed(
                    "object metadata is not a message".into(),
                ));
            } else {
                fields.push(ObjectField::Opaque(field));
            }
        }

        Ok(Self {
            type_meta,
            content_encoding: unknown.content_encoding,
            content_type: unknown.content_type,
            fields,
        })
    }

    /// Re-encode into the storage format: magic prefix plus envelope.
    ///
    /// Deterministic for the same logical object. Not guaranteed to be
    /// byte-identical to the input (the envelope's empty optional strings
    /// may be framed differently), but all object fields outside the two
    /// deletion markers are emitted byte-for-byte.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let mut raw = Vec::new();
        for field in &self.fields {
            match field {
                ObjectField::Metadata(meta) => {
                    let mut payload = Vec::new();
                    emit_fields(meta, &mut payload);
                    emit_field(
                        &RawField {
                            tag: META_FIELD,
                            wire_type: WireType::LengthDelimited,
                            data: payload,
                        },
                        &mut raw,
                    );
                }
                ObjectField::Opaque(field) => emit_field(field, &mut raw),
            }
        }

        let unknown = Unknown {
            type_meta: Some(self.type_meta.clone()),
            raw,
            content_encoding: self.content_encoding.clone(),
            content_type: self.content_type.clone(),
        };
        let mut out = Vec::with_capacity(STORAGE_MAGIC.len() + unknown.encoded_len());
        out.extend_from_slice(&STORAGE_MAGIC);
        unknown
            .encode(&mut out)
            .map_err(|e| CodecError::Malformed(e.to_string()))?;
        Ok(out)
    }

    /// The envelope's type metadata.
    pub fn type_meta(&self) -> &TypeMeta {
        &self.type_meta
    }

    /// The object's name from metadata, if present and valid UTF-8.
    pub fn name(&self) -> Option<&str> {
        self.meta_field(META_NAME)
            .and_then(|f| std::str::from_utf8(&f.data).ok())
    }

    /// The deletion timestamp, if the object is terminating.
    pub fn deletion_timestamp(&self) -> Option<Time> {
        self.meta_field(META_DELETION_TIMESTAMP)
            .and_then(|f| Time::decode(&f.data[..]).ok())
    }

    /// The deletion grace period in seconds, if set.
    pub fn deletion_grace_period_seconds(&self) -> Option<i64> {
        self.meta_field(META_DELETION_GRACE_PERIOD)
            .and_then(|f| varint_value(&f.data).ok())
            .map(|v| v as i64)
    }

    /// Remove the deletion timestamp and grace period from metadata,
    /// reverting the object to a non-deleting state. No other field is
    /// touched.
    pub fn clear_deletion_markers(&mut self) {
        for field in &mut self.fields {
            if let ObjectField::Metadata(meta) = field {
                meta.retain(|f| {
                    f.tag != META_DELETION_TIMESTAMP && f.tag != META_DELETION_GRACE_PERIOD
                });
            }
        }
    }

    fn meta_field(&self, tag: u32) -> Option<&RawField> {
        self.fields.iter().find_map(|field| match field {
            ObjectField::Metadata(meta) => meta.iter().find(|f| f.tag == tag),
            ObjectField::Opaque(_) => None,
        })
    }
}

/// Reject records whose deletion fields exist but cannot be interpreted,
/// so the precondition check never runs against garbage.
fn validate_deletion_fields(meta: &[RawField]) -> CodecResult<()> {
    for field in meta {
        match field.tag {
            META_DELETION_TIMESTAMP => {
                if field.wire_type != WireType::LengthDelimited {
                    return Err(CodecError::Malformed(
                        "deletion timestamp is not a message".into(),
                    ));
                }
                Time::decode(&field.data[..])
                    .map_err(|e| CodecError::Malformed(format!("deletion timestamp: {e}")))?;
            }
            META_DELETION_GRACE_PERIOD => {
                if field.wire_type != WireType::Varint {
                    return Err(CodecError::Malformed(
                        "deletion grace period is not a varint".into(),
                    ));
                }
                varint_value(&field.data)?;
            }
            _ => {}
        }
    }
    Ok(())
}

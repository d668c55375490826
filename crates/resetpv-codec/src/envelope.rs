//! The `runtime.Unknown` storage envelope and its companion messages.
//!
//! Message shapes mirror `k8s.io/apimachinery`'s generated protos. They are
//! hand-derived with prost rather than compiled from `.proto` files because
//! only these three small fixed messages are ever needed.

/// Every protobuf-encoded record the apiserver writes to etcd starts with
/// these four bytes: `k8s` plus a format byte of zero.
pub const STORAGE_MAGIC: [u8; 4] = [0x6b, 0x38, 0x73, 0x00];

/// `runtime.TypeMeta`: the group/version and kind of the wrapped object.
#[derive(Clone, PartialEq, prost::Message)]
pub struct TypeMeta {
    #[prost(string, tag = "1")]
    pub api_version: String,
    #[prost(string, tag = "2")]
    pub kind: String,
}

/// `runtime.Unknown`: the storage envelope. `raw` holds the wrapped
/// object's own protobuf serialization, opaque at this layer.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Unknown {
    #[prost(message, optional, tag = "1")]
    pub type_meta: Option<TypeMeta>,
    #[prost(bytes = "vec", tag = "2")]
    pub raw: Vec<u8>,
    #[prost(string, tag = "3")]
    pub content_encoding: String,
    #[prost(string, tag = "4")]
    pub content_type: String,
}

/// `meta.v1.Time`: seconds and nanos since the epoch. The deletion
/// timestamp is stored as this message.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Time {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    #[prost(int32, tag = "2")]
    pub nanos: i32,
}

//! `bcwire`: a schema-driven, bincode-compatible binary codec over a
//! runtime type descriptor.
//!
//! Given a [`Descriptor`] naming a shape and a [`Value`] conforming to it,
//! [`encode`] produces bytes byte-identical to the reference bincode
//! implementation under the same [`Config`]; [`decode`] reconstructs the
//! value from those bytes. Neither direction allocates beyond its return
//! value or resizes the caller's buffer; see the module docs on
//! [`encoder`] and [`decoder`] for the recursive walk, and [`varint`] for
//! the prefix-tagged integer scheme that makes this wire-compatible with
//! bincode's `standard` configuration.
//!
//! Module list mirrors `isopack`'s flat `pub mod` + re-export structure.

pub mod config;
pub mod cursor;
pub mod decoder;
pub mod descriptor;
pub mod encoder;
pub mod error;
pub mod value;
pub mod varint;

pub use config::Config;
pub use descriptor::{CustomCodec, Descriptor, Field, Payload, Primitive, Variant};
pub use error::{Error, ErrorKind, Result};
pub use value::Value;

/// Encode `value` against `descriptor` into `buffer[offset..]`, returning
/// the offset past the last byte written.
#[tracing::instrument(level = "trace", skip(value, buffer), fields(kind = ?descriptor_kind(descriptor)))]
pub fn encode(descriptor: &Descriptor, value: &Value, buffer: &mut [u8], offset: usize, config: &Config) -> Result<usize> {
    encoder::encode(descriptor, value, buffer, offset, config)
}

/// Decode a value matching `descriptor` from `buffer[offset..]`, returning
/// the value and the offset past the last byte read.
#[tracing::instrument(level = "trace", skip(buffer), fields(kind = ?descriptor_kind(descriptor)))]
pub fn decode(descriptor: &Descriptor, buffer: &[u8], offset: usize, config: &Config) -> Result<(Value, usize)> {
    decoder::decode(descriptor, buffer, offset, config)
}

/// A short label for the descriptor's top-level kind, used only to keep the
/// `tracing` spans on `encode`/`decode` legible without dumping the whole
/// (potentially large) descriptor tree into every span.
fn descriptor_kind(descriptor: &Descriptor) -> &'static str {
    match descriptor {
        Descriptor::Primitive(_) => "primitive",
        Descriptor::Tuple(_) => "tuple",
        Descriptor::FixedArray { .. } => "fixed_array",
        Descriptor::Collection(_) => "collection",
        Descriptor::Struct(_) => "struct",
        Descriptor::Enum(_) => "enum",
        Descriptor::Option(_) => "option",
        Descriptor::Custom(_) => "custom",
    }
}

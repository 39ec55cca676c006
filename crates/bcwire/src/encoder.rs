//! The recursive encoder: walks a `(Descriptor, Value)` pair and emits bytes.
//!
//! Control flow is grounded on `isopack::encoder::Encoder`'s per-kind
//! dispatch (one method per `Tag`), but collapsed into a single recursive
//! function over the descriptor tree instead of a builder with scoped
//! sub-encoders: `isopack`'s `ListEncoder`/`RecordEncoder`/`PatchScope`
//! exist to patch a length placeholder after a streamed, arbitrary-order
//! write, which bincode never needs, since every length here is known up front
//! from `Value::Seq.len()`/`Value::String.len()` before a single byte is
//! written, so there is nothing to patch.

use crate::config::{Config, Endian, IntEncoding};
use crate::cursor::Writer;
use crate::descriptor::{Descriptor, Payload, Primitive};
use crate::error::{Error, Result};
use crate::value::Value;
use crate::varint;

/// Encode `value` against `descriptor` into `buffer[offset..]`, returning
/// the offset past the last byte written.
pub fn encode(descriptor: &Descriptor, value: &Value, buffer: &mut [u8], offset: usize, config: &Config) -> Result<usize> {
    let mut w = Writer::with_offset_and_limit(buffer, offset, config.limit());
    encode_into(descriptor, value, &mut w, config)?;
    Ok(w.pos())
}

fn encode_into(descriptor: &Descriptor, value: &Value, w: &mut Writer<'_>, config: &Config) -> Result<()> {
    match descriptor {
        Descriptor::Primitive(p) => encode_primitive(*p, value, w, config),
        Descriptor::Tuple(children) => encode_tuple(children, value, w, config),
        Descriptor::FixedArray { element, len } => encode_fixed_array(element, *len, value, w, config),
        Descriptor::Collection(element) => encode_collection(element, value, w, config),
        Descriptor::Struct(fields) => encode_struct(fields, value, w, config),
        Descriptor::Enum(variants) => encode_enum(variants, value, w, config),
        Descriptor::Option(inner) => encode_option(inner, value, w, config),
        Descriptor::Custom(codec) => (codec.encode)(w, value, config),
    }
}

fn type_mismatch(expected: &str, value: &Value) -> Error {
    Error::invalid_type(format!("expected a value matching {expected}, found {value:?}"))
}

fn write_length(w: &mut Writer<'_>, len: u64, config: &Config) -> Result<()> {
    match config.int_encoding() {
        IntEncoding::Variant => varint::write_varint_u64(w, len, config.endian()),
        IntEncoding::Fixed => w.write_u64(len, config.endian()),
    }
}

fn write_discriminant(w: &mut Writer<'_>, discriminant: u32, config: &Config) -> Result<()> {
    match config.int_encoding() {
        IntEncoding::Variant => varint::write_varint_u64(w, discriminant as u64, config.endian()),
        IntEncoding::Fixed => w.write_u32(discriminant, config.endian()),
    }
}

fn encode_primitive(p: Primitive, value: &Value, w: &mut Writer<'_>, config: &Config) -> Result<()> {
    let endian = config.endian();
    match (p, value) {
        (Primitive::F16, _) | (Primitive::F128, _) => {
            Err(Error::unimplemented(format!("{p:?} is reserved and not supported")))
        }
        (Primitive::U8, Value::U8(v)) => w.write_u8(*v),
        (Primitive::I8, Value::I8(v)) => w.write_i8(*v),
        (Primitive::Bool, Value::Bool(v)) => w.write_bool(*v),
        (Primitive::F32, Value::F32(v)) => w.write_f32(*v, endian),
        (Primitive::F64, Value::F64(v)) => w.write_f64(*v, endian),
        (Primitive::String, Value::String(v)) => {
            let bytes = v.as_bytes();
            write_length(w, bytes.len() as u64, config)?;
            w.write_bytes(bytes)
        }
        (Primitive::U16, Value::U16(v)) => match config.int_encoding() {
            IntEncoding::Fixed => w.write_u16(*v, endian),
            IntEncoding::Variant => varint::write_varint_u64(w, *v as u64, endian),
        },
        (Primitive::U32, Value::U32(v)) => match config.int_encoding() {
            IntEncoding::Fixed => w.write_u32(*v, endian),
            IntEncoding::Variant => varint::write_varint_u64(w, *v as u64, endian),
        },
        (Primitive::U64, Value::U64(v)) => match config.int_encoding() {
            IntEncoding::Fixed => w.write_u64(*v, endian),
            IntEncoding::Variant => varint::write_varint_u64(w, *v, endian),
        },
        (Primitive::U128, Value::U128(v)) => match config.int_encoding() {
            IntEncoding::Fixed => w.write_u128(*v, endian),
            IntEncoding::Variant => varint::write_varint_u128(w, *v, endian),
        },
        (Primitive::I16, Value::I16(v)) => match config.int_encoding() {
            IntEncoding::Fixed => w.write_i16(*v, endian),
            IntEncoding::Variant => varint::write_varint_u64(w, varint::zigzag_encode_i16(*v) as u64, endian),
        },
        (Primitive::I32, Value::I32(v)) => match config.int_encoding() {
            IntEncoding::Fixed => w.write_i32(*v, endian),
            IntEncoding::Variant => varint::write_varint_u64(w, varint::zigzag_encode_i32(*v) as u64, endian),
        },
        (Primitive::I64, Value::I64(v)) => match config.int_encoding() {
            IntEncoding::Fixed => w.write_i64(*v, endian),
            IntEncoding::Variant => varint::write_varint_u64(w, varint::zigzag_encode_i64(*v), endian),
        },
        (Primitive::I128, Value::I128(v)) => match config.int_encoding() {
            IntEncoding::Fixed => w.write_i128(*v, endian),
            IntEncoding::Variant => varint::write_varint_u128(w, varint::zigzag_encode_i128(*v), endian),
        },
        _ => Err(type_mismatch(&format!("{p:?}"), value)),
    }
}

fn encode_tuple(children: &[Descriptor], value: &Value, w: &mut Writer<'_>, config: &Config) -> Result<()> {
    let Value::Seq(items) = value else {
        return Err(type_mismatch("Tuple", value));
    };
    if items.len() != children.len() {
        return Err(Error::invalid_type(format!(
            "tuple arity mismatch: descriptor has {}, value has {}",
            children.len(),
            items.len()
        )));
    }
    for (child, item) in children.iter().zip(items) {
        encode_into(child, item, w, config)?;
    }
    Ok(())
}

fn encode_fixed_array(element: &Descriptor, len: usize, value: &Value, w: &mut Writer<'_>, config: &Config) -> Result<()> {
    let Value::Seq(items) = value else {
        return Err(type_mismatch("FixedArray", value));
    };
    if items.len() != len {
        return Err(Error::invalid_length(format!(
            "fixed array expects {len} elements, value has {}",
            items.len()
        )));
    }
    for item in items {
        encode_into(element, item, w, config)?;
    }
    Ok(())
}

fn encode_collection(element: &Descriptor, value: &Value, w: &mut Writer<'_>, config: &Config) -> Result<()> {
    let Value::Seq(items) = value else {
        return Err(type_mismatch("Collection", value));
    };
    write_length(w, items.len() as u64, config)?;
    for item in items {
        encode_into(element, item, w, config)?;
    }
    Ok(())
}

fn encode_struct(fields: &[crate::descriptor::Field], value: &Value, w: &mut Writer<'_>, config: &Config) -> Result<()> {
    let Value::Fields(provided) = value else {
        return Err(type_mismatch("Struct", value));
    };
    for field in fields {
        let item = Value::field(provided, field.name.as_ref())
            .ok_or_else(|| Error::invalid_type(format!("missing struct field `{}`", field.name)))?;
        encode_into(&field.descriptor, item, w, config)?;
    }
    Ok(())
}

fn encode_payload(payload: &Payload, value: Option<&Value>, w: &mut Writer<'_>, config: &Config) -> Result<()> {
    match payload {
        Payload::Tuple(children) => {
            // A single-field payload is carried as that field's bare value,
            // not a one-element Seq, since the field's own descriptor may
            // itself be a Collection/Tuple/FixedArray whose natural value is
            // already a Seq (a Seq there means "this field's elements", not
            // "these are the tuple's fields"). Arity is checked first so this
            // never shadows the `0`/`2+` cases.
            let seq = match (children.len(), value) {
                (0, None) => vec![],
                (1, Some(v)) => vec![v.clone()],
                (_, Some(Value::Seq(items))) => items.clone(),
                _ => return Err(Error::invalid_type("enum variant payload does not match tuple shape")),
            };
            encode_tuple(children, &Value::Seq(seq), w, config)
        }
        Payload::Struct(fields) => {
            let value = value.ok_or_else(|| Error::invalid_type("struct-payload variant requires a payload value"))?;
            encode_struct(fields, value, w, config)
        }
    }
}

fn encode_enum(variants: &[crate::descriptor::Variant], value: &Value, w: &mut Writer<'_>, config: &Config) -> Result<()> {
    let Value::Enum { variant, payload } = value else {
        return Err(type_mismatch("Enum", value));
    };
    let decl = Descriptor::find_variant_by_name(variants, variant)
        .ok_or_else(|| Error::invalid_variant(format!("unknown enum variant `{variant}`")))?;
    write_discriminant(w, decl.discriminant, config)?;
    match (&decl.payload, payload) {
        (None, None) => Ok(()),
        (None, Some(_)) => Err(Error::invalid_type(format!("variant `{variant}` takes no payload"))),
        (Some(p), payload) => encode_payload(p, payload.as_deref(), w, config),
    }
}

fn encode_option(inner: &Descriptor, value: &Value, w: &mut Writer<'_>, config: &Config) -> Result<()> {
    let Value::Option(opt) = value else {
        return Err(type_mismatch("Option", value));
    };
    match opt {
        None => w.write_u8(0),
        Some(v) => {
            w.write_u8(1)?;
            encode_into(inner, v, w, config)
        }
    }
}

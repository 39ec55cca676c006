//! The recursive decoder: walks a descriptor consuming bytes, producing
//! [`Value`]s.
//!
//! Mirrors `isopack::decoder::Decoder`'s `read_primitive::<T: FromBytes>`
//! pattern and its discriminant-to-variant lookup
//! (`ValueDecoder::from_untagged_bytes`), adapted from that crate's
//! self-describing tag-length-value layout to bincode's flat, schema-driven
//! one: there is no tag byte to dispatch on here, the descriptor *is* the
//! dispatch.

use crate::config::{Config, Endian, IntEncoding};
use crate::cursor::Reader;
use crate::descriptor::{Descriptor, Payload, Primitive};
use crate::error::{Error, Result};
use crate::value::Value;
use crate::varint;

/// Decode a value matching `descriptor` from `buffer[offset..]`, returning
/// the value and the offset past the last byte read.
pub fn decode(descriptor: &Descriptor, buffer: &[u8], offset: usize, config: &Config) -> Result<(Value, usize)> {
    let mut r = Reader::with_offset_and_limit(buffer, offset, config.limit());
    let value = decode_from(descriptor, &mut r, config)?;
    Ok((value, r.pos()))
}

fn decode_from(descriptor: &Descriptor, r: &mut Reader<'_>, config: &Config) -> Result<Value> {
    match descriptor {
        Descriptor::Primitive(p) => decode_primitive(*p, r, config),
        Descriptor::Tuple(children) => decode_tuple(children, r, config),
        Descriptor::FixedArray { element, len } => decode_fixed_array(element, *len, r, config),
        Descriptor::Collection(element) => decode_collection(element, r, config),
        Descriptor::Struct(fields) => decode_struct(fields, r, config),
        Descriptor::Enum(variants) => decode_enum(variants, r, config),
        Descriptor::Option(inner) => decode_option(inner, r, config),
        Descriptor::Custom(codec) => (codec.decode)(r, config),
    }
}

fn read_length(r: &mut Reader<'_>, config: &Config) -> Result<u64> {
    match config.int_encoding() {
        IntEncoding::Variant => varint::read_varint_u64(r, config.endian()),
        IntEncoding::Fixed => r.read_u64(config.endian()),
    }
}

fn read_discriminant(r: &mut Reader<'_>, config: &Config) -> Result<u32> {
    match config.int_encoding() {
        IntEncoding::Variant => {
            let v = varint::read_varint_u64(r, config.endian())?;
            u32::try_from(v).map_err(|_| Error::invalid_variant(format!("discriminant {v} exceeds u32")))
        }
        IntEncoding::Fixed => r.read_u32(config.endian()),
    }
}

/// Cap a length-prefix-driven pre-allocation to what the remaining buffer
/// could possibly hold, so a hostile stream declaring a huge element count
/// cannot force an unbounded allocation. This changes resource behavior only, never wire
/// semantics; the full `len` is still what gets decoded (or the decode
/// fails partway through with `OverflowLimit` once the buffer runs out).
fn capped_capacity(len: u64, remaining_bytes: usize, min_element_size: usize) -> usize {
    let max_possible_elements = if min_element_size == 0 { remaining_bytes } else { remaining_bytes / min_element_size };
    (len as usize).min(max_possible_elements).min(remaining_bytes)
}

fn decode_primitive(p: Primitive, r: &mut Reader<'_>, config: &Config) -> Result<Value> {
    let endian = config.endian();
    match p {
        Primitive::F16 | Primitive::F128 => Err(Error::unimplemented(format!("{p:?} is reserved and not supported"))),
        Primitive::U8 => Ok(Value::U8(r.read_u8()?)),
        Primitive::I8 => Ok(Value::I8(r.read_i8()?)),
        Primitive::Bool => Ok(Value::Bool(r.read_bool()?)),
        Primitive::F32 => Ok(Value::F32(r.read_f32(endian)?)),
        Primitive::F64 => Ok(Value::F64(r.read_f64(endian)?)),
        Primitive::String => {
            let len = read_length(r, config)?;
            let len = usize::try_from(len).map_err(|_| Error::invalid_length(format!("string length {len} does not fit in usize")))?;
            let bytes = r.read_bytes(len)?;
            let s = std::str::from_utf8(bytes).map_err(|_| Error::invalid_type("string bytes are not valid UTF-8"))?;
            Ok(Value::String(s.to_string()))
        }
        Primitive::U16 => Ok(Value::U16(match config.int_encoding() {
            IntEncoding::Fixed => r.read_u16(endian)?,
            IntEncoding::Variant => {
                let v = varint::read_varint_u64(r, endian)?;
                u16::try_from(v).map_err(|_| Error::bigint_out_of_range(format!("value {v} does not fit in u16")))?
            }
        })),
        Primitive::U32 => Ok(Value::U32(match config.int_encoding() {
            IntEncoding::Fixed => r.read_u32(endian)?,
            IntEncoding::Variant => {
                let v = varint::read_varint_u64(r, endian)?;
                u32::try_from(v).map_err(|_| Error::bigint_out_of_range(format!("value {v} does not fit in u32")))?
            }
        })),
        Primitive::U64 => Ok(Value::U64(match config.int_encoding() {
            IntEncoding::Fixed => r.read_u64(endian)?,
            IntEncoding::Variant => varint::read_varint_u64(r, endian)?,
        })),
        Primitive::U128 => Ok(Value::U128(match config.int_encoding() {
            IntEncoding::Fixed => r.read_u128(endian)?,
            IntEncoding::Variant => varint::read_varint_u128(r, endian)?,
        })),
        Primitive::I16 => Ok(Value::I16(match config.int_encoding() {
            IntEncoding::Fixed => r.read_i16(endian)?,
            IntEncoding::Variant => {
                let z = varint::read_varint_u64(r, endian)?;
                let z16 = u16::try_from(z).map_err(|_| Error::bigint_out_of_range(format!("zigzag value {z} does not fit in u16")))?;
                varint::zigzag_decode_i16(z16)
            }
        })),
        Primitive::I32 => Ok(Value::I32(match config.int_encoding() {
            IntEncoding::Fixed => r.read_i32(endian)?,
            IntEncoding::Variant => {
                let z = varint::read_varint_u64(r, endian)?;
                let z32 = u32::try_from(z).map_err(|_| Error::bigint_out_of_range(format!("zigzag value {z} does not fit in u32")))?;
                varint::zigzag_decode_i32(z32)
            }
        })),
        Primitive::I64 => Ok(Value::I64(match config.int_encoding() {
            IntEncoding::Fixed => r.read_i64(endian)?,
            IntEncoding::Variant => varint::zigzag_decode_i64(varint::read_varint_u64(r, endian)?),
        })),
        Primitive::I128 => Ok(Value::I128(match config.int_encoding() {
            IntEncoding::Fixed => r.read_i128(endian)?,
            IntEncoding::Variant => varint::zigzag_decode_i128(varint::read_varint_u128(r, endian)?),
        })),
    }
}

fn decode_tuple(children: &[Descriptor], r: &mut Reader<'_>, config: &Config) -> Result<Value> {
    let mut items = Vec::with_capacity(children.len());
    for child in children {
        items.push(decode_from(child, r, config)?);
    }
    Ok(Value::Seq(items))
}

fn decode_fixed_array(element: &Descriptor, len: usize, r: &mut Reader<'_>, config: &Config) -> Result<Value> {
    let mut items = Vec::with_capacity(len.min(r.remaining() + 1));
    for _ in 0..len {
        items.push(decode_from(element, r, config)?);
    }
    Ok(Value::Seq(items))
}

fn decode_collection(element: &Descriptor, r: &mut Reader<'_>, config: &Config) -> Result<Value> {
    let len = read_length(r, config)?;
    let cap = capped_capacity(len, r.remaining(), 1);
    let mut items = Vec::with_capacity(cap);
    for _ in 0..len {
        items.push(decode_from(element, r, config)?);
    }
    Ok(Value::Seq(items))
}

fn decode_struct(fields: &[crate::descriptor::Field], r: &mut Reader<'_>, config: &Config) -> Result<Value> {
    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        let v = decode_from(&field.descriptor, r, config)?;
        out.push((field.name.to_string(), v));
    }
    Ok(Value::Fields(out))
}

fn decode_payload(payload: &Payload, r: &mut Reader<'_>, config: &Config) -> Result<Option<Value>> {
    match payload {
        // An empty-tuple payload still decodes to `Some(Value::Seq(vec![]))`,
        // matching `encode_payload`'s accepted representation for the same
        // shape, not `None` (which means "this variant has no payload at
        // all", a different descriptor shape than `Payload::Tuple(vec![])`).
        Payload::Tuple(children) if children.is_empty() => Ok(Some(Value::Seq(vec![]))),
        // Mirrors `encode_payload`: a single-field payload decodes to that
        // field's bare value, not a one-element Seq.
        Payload::Tuple(children) if children.len() == 1 => Ok(Some(decode_from(&children[0], r, config)?)),
        Payload::Tuple(children) => Ok(Some(decode_tuple(children, r, config)?)),
        Payload::Struct(fields) => Ok(Some(decode_struct(fields, r, config)?)),
    }
}

fn decode_enum(variants: &[crate::descriptor::Variant], r: &mut Reader<'_>, config: &Config) -> Result<Value> {
    let discriminant = read_discriminant(r, config)?;
    let decl = Descriptor::find_variant_by_discriminant(variants, discriminant)
        .ok_or_else(|| Error::invalid_variant(format!("discriminant {discriminant} has no matching variant")))?;
    let payload = match &decl.payload {
        None => None,
        Some(p) => decode_payload(p, r, config)?,
    };
    Ok(Value::Enum { variant: decl.name.to_string(), payload: payload.map(Box::new) })
}

fn decode_option(inner: &Descriptor, r: &mut Reader<'_>, config: &Config) -> Result<Value> {
    match r.read_u8()? {
        0 => Ok(Value::Option(None)),
        1 => Ok(Value::Option(Some(Box::new(decode_from(inner, r, config)?)))),
        other => Err(Error::invalid_option_variant(format!("option tag byte {other} is neither 0 nor 1"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Field, Variant};
    use crate::encoder::encode;

    fn roundtrip(d: &Descriptor, v: &Value, config: &Config) {
        let mut buf = [0u8; 512];
        let n = encode(d, v, &mut buf, 0, config).unwrap();
        let (decoded, pos) = decode(d, &buf, 0, config).unwrap();
        assert_eq!(pos, n);
        assert_eq!(&decoded, v);
    }

    #[test]
    fn struct_roundtrip() {
        let d = Descriptor::struct_([
            Field::new("name", Descriptor::string()),
            Field::new("age", Descriptor::u8()),
            Field::new("is_active", Descriptor::bool()),
        ]);
        let v = Value::Fields(vec![
            ("name".into(), Value::str("Alice")),
            ("age".into(), Value::U8(30)),
            ("is_active".into(), Value::Bool(true)),
        ]);
        roundtrip(&d, &v, &Config::standard());
        roundtrip(&d, &v, &Config::legacy());
    }

    #[test]
    fn empty_tuple_payload_variant_roundtrips_as_empty_seq() {
        let d = Descriptor::enum_([Variant::new("Empty", 0, Some(Payload::Tuple(vec![])))]);
        let v = Value::enum_variant("Empty", Some(Value::Seq(vec![])));
        roundtrip(&d, &v, &Config::standard());
    }

    #[test]
    fn enum_discriminant_3_is_invalid_variant() {
        let d = Descriptor::enum_([Variant::new("A", 0, None), Variant::new("B", 5, None)]);
        let mut buf = [0u8; 8];
        encode(&d, &Value::enum_variant("A", None), &mut buf, 0, &Config::standard()).unwrap();
        buf[0] = 3;
        let err = decode(&d, &buf, 0, &Config::standard()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidVariant);
    }

    #[test]
    fn option_tag_byte_must_be_0_or_1() {
        let d = Descriptor::option(Descriptor::u32());
        let buf = [2u8];
        let err = decode(&d, &buf, 0, &Config::standard()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidOptionVariant);
    }

    #[test]
    fn bool_byte_out_of_domain_is_invalid_type() {
        let buf = [5u8];
        let err = decode(&Descriptor::bool(), &buf, 0, &Config::standard()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidType);
    }

    #[test]
    fn empty_collection_and_string_minimal_bytes() {
        roundtrip(&Descriptor::collection(Descriptor::u8()), &Value::Seq(vec![]), &Config::standard());
        roundtrip(&Descriptor::string(), &Value::str(""), &Config::standard());
        roundtrip(&Descriptor::unit(), &Value::unit(), &Config::standard());
    }

    #[test]
    fn unicode_string_roundtrip() {
        roundtrip(&Descriptor::string(), &Value::str("héllo 🦀 — no surrogates"), &Config::standard());
    }

    #[test]
    fn zigzag_min_roundtrips_every_width() {
        roundtrip(&Descriptor::i16(), &Value::I16(i16::MIN), &Config::standard());
        roundtrip(&Descriptor::i32(), &Value::I32(i32::MIN), &Config::standard());
        roundtrip(&Descriptor::i64(), &Value::I64(i64::MIN), &Config::standard());
        roundtrip(&Descriptor::i128(), &Value::I128(i128::MIN), &Config::standard());
    }

    #[test]
    fn hostile_length_prefix_does_not_overread() {
        // A collection claiming 2^32 elements but with only a few bytes
        // behind it must fail cleanly rather than attempt a huge allocation.
        let d = Descriptor::collection(Descriptor::u8());
        let mut buf = [0u8; 16];
        let mut w = crate::cursor::Writer::new(&mut buf);
        varint::write_varint_u64(&mut w, 1u64 << 32, Endian::Little).unwrap();
        let err = decode(&d, &buf, 0, &Config::standard()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::OverflowLimit);
    }

    #[test]
    fn no_overread_offset_matches_encoded_length() {
        let d = Descriptor::tuple([Descriptor::u8(), Descriptor::u32()]);
        let v = Value::Seq(vec![Value::U8(9), Value::U32(65536)]);
        let mut buf = [0u8; 32];
        let n = encode(&d, &v, &mut buf, 0, &Config::standard()).unwrap();
        let (_, pos) = decode(&d, &buf, 0, &Config::standard()).unwrap();
        assert_eq!(pos, n);
    }
}

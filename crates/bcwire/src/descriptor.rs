//! The runtime type-descriptor algebra.
//!
//! The original expresses the shape of a value through compile-time type
//! arithmetic; here the shape is ordinary runtime data, and `Descriptor` is a
//! tree built once (by a caller) and walked by [`crate::encoder`] and
//! [`crate::decoder`]. This plays the role `isopack::types::Tag` plays for
//! that crate's TLV format (a closed, `Debug`-able tag set) but as a tree of
//! owned nodes rather than a flat `#[repr(u8)]` enum, since a descriptor
//! here carries child shapes and field/variant names, not just a wire tag.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::value::Value;

/// One of the fourteen wire primitives. `F16`/`F128` are
/// reserved: every constructor and the encoder/decoder both agree they are
/// always `Unimplemented`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    F32,
    F64,
    Bool,
    String,
    F16,
    F128,
}

/// A named, ordered struct field or enum variant field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: Arc<str>,
    pub descriptor: Descriptor,
}

impl Field {
    pub fn new(name: impl Into<Arc<str>>, descriptor: Descriptor) -> Self {
        Self { name: name.into(), descriptor }
    }
}

/// The payload shape a variant carries: positional (tuple, possibly arity
/// zero) or record-style (named fields), or nothing at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Tuple(Vec<Descriptor>),
    Struct(Vec<Field>),
}

/// One enum variant: a unique numeric discriminant plus an optional payload
/// shape. Modeling "no payload" as `Option<Payload>` rather than a
/// `Payload::Unit` member keeps "has a payload or doesn't" out of the
/// payload-shape enum entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub name: Arc<str>,
    pub discriminant: u32,
    pub payload: Option<Payload>,
}

impl Variant {
    pub fn new(name: impl Into<Arc<str>>, discriminant: u32, payload: Option<Payload>) -> Self {
        Self { name: name.into(), discriminant, payload }
    }
}

/// An opaque, user-supplied wire format for a type the core descriptor
/// algebra cannot express directly. The engine treats
/// both closures as black boxes: it hands them a cursor and a `Config` and
/// trusts them to respect `limit` and endianness, exactly like an FFI call.
#[derive(Clone)]
pub struct CustomCodec {
    pub name: Arc<str>,
    pub encode: Arc<dyn Fn(&mut crate::cursor::Writer<'_>, &Value, &Config) -> Result<()> + Send + Sync>,
    pub decode: Arc<dyn Fn(&mut crate::cursor::Reader<'_>, &Config) -> Result<Value> + Send + Sync>,
}

impl std::fmt::Debug for CustomCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomCodec").field("name", &self.name).finish_non_exhaustive()
    }
}

impl PartialEq for CustomCodec {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// A descriptor tree node. Immutable once built; `Clone` is
/// cheap for the variable-size cases because children live behind `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    Primitive(Primitive),
    Tuple(Arc<[Descriptor]>),
    FixedArray { element: Arc<Descriptor>, len: usize },
    Collection(Arc<Descriptor>),
    Struct(Arc<[Field]>),
    Enum(Arc<[Variant]>),
    Option(Arc<Descriptor>),
    Custom(CustomCodec),
}

impl Descriptor {
    // --- primitives ---

    pub fn u8() -> Self {
        Descriptor::Primitive(Primitive::U8)
    }
    pub fn u16() -> Self {
        Descriptor::Primitive(Primitive::U16)
    }
    pub fn u32() -> Self {
        Descriptor::Primitive(Primitive::U32)
    }
    pub fn u64() -> Self {
        Descriptor::Primitive(Primitive::U64)
    }
    pub fn u128() -> Self {
        Descriptor::Primitive(Primitive::U128)
    }
    pub fn i8() -> Self {
        Descriptor::Primitive(Primitive::I8)
    }
    pub fn i16() -> Self {
        Descriptor::Primitive(Primitive::I16)
    }
    pub fn i32() -> Self {
        Descriptor::Primitive(Primitive::I32)
    }
    pub fn i64() -> Self {
        Descriptor::Primitive(Primitive::I64)
    }
    pub fn i128() -> Self {
        Descriptor::Primitive(Primitive::I128)
    }
    pub fn f32() -> Self {
        Descriptor::Primitive(Primitive::F32)
    }
    pub fn f64() -> Self {
        Descriptor::Primitive(Primitive::F64)
    }
    pub fn bool() -> Self {
        Descriptor::Primitive(Primitive::Bool)
    }
    pub fn string() -> Self {
        Descriptor::Primitive(Primitive::String)
    }
    /// Reserved; always fails with `Unimplemented`.
    pub fn f16() -> Self {
        Descriptor::Primitive(Primitive::F16)
    }
    /// Reserved; always fails with `Unimplemented`.
    pub fn f128() -> Self {
        Descriptor::Primitive(Primitive::F128)
    }

    // --- composite constructors ---

    pub fn tuple(children: impl IntoIterator<Item = Descriptor>) -> Self {
        Descriptor::Tuple(children.into_iter().collect::<Vec<_>>().into())
    }

    /// Arity-0 tuple: the unit value.
    pub fn unit() -> Self {
        Descriptor::tuple([])
    }

    pub fn fixed_array(element: Descriptor, len: usize) -> Self {
        Descriptor::FixedArray { element: Arc::new(element), len }
    }

    pub fn collection(element: Descriptor) -> Self {
        Descriptor::Collection(Arc::new(element))
    }

    /// `Vec = Set = Collection`: all three are the same shape
    /// on the wire, so they share one constructor under different names.
    pub fn vec(element: Descriptor) -> Self {
        Descriptor::collection(element)
    }
    pub fn set(element: Descriptor) -> Self {
        Descriptor::collection(element)
    }

    /// `Map(K, V) = Collection(Tuple(K, V))`.
    pub fn map(key: Descriptor, value: Descriptor) -> Self {
        Descriptor::collection(Descriptor::tuple([key, value]))
    }

    /// `Bytes = Collection(u8)`.
    pub fn bytes() -> Self {
        Descriptor::collection(Descriptor::u8())
    }

    pub fn struct_(fields: impl IntoIterator<Item = Field>) -> Self {
        Descriptor::Struct(fields.into_iter().collect::<Vec<_>>().into())
    }

    pub fn enum_(variants: impl IntoIterator<Item = Variant>) -> Self {
        Descriptor::Enum(variants.into_iter().collect::<Vec<_>>().into())
    }

    pub fn option(inner: Descriptor) -> Self {
        Descriptor::Option(Arc::new(inner))
    }

    /// `Result(T, E) = Enum{Ok=0 -> Tuple(T), Err=1 -> Tuple(E)}`.
    pub fn result(ok: Descriptor, err: Descriptor) -> Self {
        Descriptor::enum_([
            Variant::new("Ok", 0, Some(Payload::Tuple(vec![ok]))),
            Variant::new("Err", 1, Some(Payload::Tuple(vec![err]))),
        ])
    }

    pub fn custom(codec: CustomCodec) -> Self {
        Descriptor::Custom(codec)
    }

    /// Looks up a variant by its declared name. Used by the encoder, which
    /// receives an `(variantName, payload)` pair and must find the
    /// corresponding discriminant and payload shape to encode against.
    pub fn find_variant_by_name<'a>(variants: &'a [Variant], name: &str) -> Option<&'a Variant> {
        variants.iter().find(|v| v.name.as_ref() == name)
    }

    /// Looks up a variant by its wire discriminant. Used by the decoder.
    pub fn find_variant_by_discriminant(variants: &[Variant], discriminant: u32) -> Option<&Variant> {
        variants.iter().find(|v| v.discriminant == discriminant)
    }
}

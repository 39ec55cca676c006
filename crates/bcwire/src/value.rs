//! The language-neutral in-memory value representation.
//!
//! `Value` plays the role `isopack::decoder::ValueDecoder` plays for that
//! crate's TLV format, a single tagged enum mirroring the shape algebra,
//! but owned and direction-agnostic, since the same type is both the input
//! to `encode` and the output of `decode` here (isopack keeps separate
//! encoder-method and decoder-enum surfaces because its wire format is
//! self-describing and streamed).
//!
//! Rust has native 64-/128-bit integers, so unlike the TypeScript origin
//! (which needs a BigInt type to exceed safe double precision) `Value`'s
//! integer variants carry ordinary `u64`/`i64`/`u128`/`i128`; see DESIGN.md.

use std::any::Any;
use std::sync::Arc;

/// A single value conforming to some [`crate::descriptor::Descriptor`].
#[derive(Clone)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    F32(f32),
    F64(f64),
    Bool(bool),
    String(String),
    /// A tuple or fixed-array/collection element sequence, in order.
    Seq(Vec<Value>),
    /// A struct value: field-name/value pairs. Order need not match the
    /// descriptor's declaration order; the encoder looks each
    /// field up by name.
    Fields(Vec<(String, Value)>),
    /// An enum value: `(variantName, payload)`. Callers never touch the
    /// discriminant directly.
    Enum { variant: String, payload: Option<Box<Value>> },
    /// Absent, or exactly one inner value.
    Option(Option<Box<Value>>),
    /// Payload for a `Descriptor::Custom` round-trip. Type-erased so a
    /// custom codec can carry any Rust type it chooses without the engine
    /// needing to know its shape (DESIGN.md, Open Question 4).
    Custom(Arc<dyn Any + Send + Sync>),
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::U8(v) => write!(f, "U8({v})"),
            Value::U16(v) => write!(f, "U16({v})"),
            Value::U32(v) => write!(f, "U32({v})"),
            Value::U64(v) => write!(f, "U64({v})"),
            Value::U128(v) => write!(f, "U128({v})"),
            Value::I8(v) => write!(f, "I8({v})"),
            Value::I16(v) => write!(f, "I16({v})"),
            Value::I32(v) => write!(f, "I32({v})"),
            Value::I64(v) => write!(f, "I64({v})"),
            Value::I128(v) => write!(f, "I128({v})"),
            Value::F32(v) => write!(f, "F32({v})"),
            Value::F64(v) => write!(f, "F64({v})"),
            Value::Bool(v) => write!(f, "Bool({v})"),
            Value::String(v) => write!(f, "String({v:?})"),
            Value::Seq(v) => f.debug_tuple("Seq").field(v).finish(),
            Value::Fields(v) => f.debug_tuple("Fields").field(v).finish(),
            Value::Enum { variant, payload } => {
                f.debug_struct("Enum").field("variant", variant).field("payload", payload).finish()
            }
            Value::Option(v) => f.debug_tuple("Option").field(v).finish(),
            Value::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::U128(a), Value::U128(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::I128(a), Value::I128(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Fields(a), Value::Fields(b)) => a == b,
            (Value::Enum { variant: va, payload: pa }, Value::Enum { variant: vb, payload: pb }) => {
                va == vb && pa == pb
            }
            (Value::Option(a), Value::Option(b)) => a == b,
            // Custom values are opaque; equality is not meaningful without
            // knowing the concrete type, so two Customs never compare equal.
            (Value::Custom(_), Value::Custom(_)) => false,
            _ => false,
        }
    }
}

impl Value {
    pub fn unit() -> Self {
        Value::Seq(Vec::new())
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn some(inner: Value) -> Self {
        Value::Option(Some(Box::new(inner)))
    }

    pub fn none() -> Self {
        Value::Option(None)
    }

    pub fn enum_variant(variant: impl Into<String>, payload: Option<Value>) -> Self {
        Value::Enum { variant: variant.into(), payload: payload.map(Box::new) }
    }

    /// Looks up a field by name in a `Fields` value; struct values need not
    /// be stored in declaration order.
    pub fn field<'a>(fields: &'a [(String, Value)], name: &str) -> Option<&'a Value> {
        fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

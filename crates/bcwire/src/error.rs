//! Error taxonomy for the codec.
//!
//! The kind set is closed and part of the public contract: every
//! failure the engine can produce classifies under exactly one of these.

use std::fmt;

/// The closed set of failure kinds the engine can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A descriptor kind is reachable in principle but not supported (e.g. `f16`).
    Unimplemented,
    /// A read or write would cross the buffer end or the configured `limit`.
    OverflowLimit,
    /// A length or collection count is nonsensical.
    InvalidLength,
    /// An enum discriminant on the wire does not match any declared variant.
    InvalidVariant,
    /// An option tag byte is neither `0` nor `1`.
    InvalidOptionVariant,
    /// A descriptor argument is malformed, or a primitive byte is out of its nominal domain.
    InvalidType,
    /// A 128-bit arithmetic operand is out of range, or a varint discriminator byte is unknown.
    BigintOutOfRange,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Unimplemented => "unimplemented",
            ErrorKind::OverflowLimit => "overflow limit",
            ErrorKind::InvalidLength => "invalid length",
            ErrorKind::InvalidVariant => "invalid variant",
            ErrorKind::InvalidOptionVariant => "invalid option variant",
            ErrorKind::InvalidType => "invalid type",
            ErrorKind::BigintOutOfRange => "bigint out of range",
        };
        f.write_str(s)
    }
}

/// A codec failure: a closed [`ErrorKind`] plus a free-form message for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn unimplemented(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unimplemented, message)
    }

    pub(crate) fn overflow_limit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OverflowLimit, message)
    }

    pub(crate) fn invalid_length(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidLength, message)
    }

    pub(crate) fn invalid_variant(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidVariant, message)
    }

    pub(crate) fn invalid_option_variant(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidOptionVariant, message)
    }

    pub(crate) fn invalid_type(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidType, message)
    }

    pub(crate) fn bigint_out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BigintOutOfRange, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

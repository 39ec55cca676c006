//! Wire configuration: endianness, integer encoding mode, and an optional byte limit.
//!
//! This mirrors the method names of the `Options` builder in the reference
//! bincode-core lineage (`with_big_endian`, `with_varint_encoding`, ...) but
//! without that crate's generic type-state machinery: our descriptor is
//! already a runtime value, so there is nothing for the compiler to check
//! about the configuration at compile time. `Config` is a plain, cloneable
//! struct consumed by value at each call site.

/// Byte order applied to every multi-byte primitive and varint payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Selects whether multi-byte integers, lengths, and discriminants use the
/// varint scheme or raw fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntEncoding {
    Fixed,
    Variant,
}

/// The active wire configuration for one `encode`/`decode` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    endian: Endian,
    int_encoding: IntEncoding,
    limit: Option<u64>,
}

impl Config {
    /// The reference bincode "standard" configuration: little-endian, varint.
    pub const fn standard() -> Self {
        Self { endian: Endian::Little, int_encoding: IntEncoding::Variant, limit: None }
    }

    /// The legacy/fixed configuration: little-endian, fixed-width integers.
    pub const fn legacy() -> Self {
        Self { endian: Endian::Little, int_encoding: IntEncoding::Fixed, limit: None }
    }

    pub const fn endian(&self) -> Endian {
        self.endian
    }

    pub const fn int_encoding(&self) -> IntEncoding {
        self.int_encoding
    }

    pub const fn limit(&self) -> Option<u64> {
        self.limit
    }

    #[must_use]
    pub const fn with_little_endian(mut self) -> Self {
        self.endian = Endian::Little;
        self
    }

    #[must_use]
    pub const fn with_big_endian(mut self) -> Self {
        self.endian = Endian::Big;
        self
    }

    #[must_use]
    pub const fn with_variant_encoding(mut self) -> Self {
        self.int_encoding = IntEncoding::Variant;
        self
    }

    #[must_use]
    pub const fn with_fixed_int_encoding(mut self) -> Self {
        self.int_encoding = IntEncoding::Fixed;
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn with_no_limit(mut self) -> Self {
        self.limit = None;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_is_little_variant_unlimited() {
        let c = Config::standard();
        assert_eq!(c.endian(), Endian::Little);
        assert_eq!(c.int_encoding(), IntEncoding::Variant);
        assert_eq!(c.limit(), None);
    }

    #[test]
    fn legacy_is_little_fixed() {
        let c = Config::legacy();
        assert_eq!(c.endian(), Endian::Little);
        assert_eq!(c.int_encoding(), IntEncoding::Fixed);
    }

    #[test]
    fn builders_compose() {
        let c = Config::standard().with_big_endian().with_fixed_int_encoding().with_limit(64);
        assert_eq!(c.endian(), Endian::Big);
        assert_eq!(c.int_encoding(), IntEncoding::Fixed);
        assert_eq!(c.limit(), Some(64));
        let c = c.with_no_limit();
        assert_eq!(c.limit(), None);
    }
}

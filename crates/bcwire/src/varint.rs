//! Bincode's discriminator-tagged variable-length unsigned integer, and the
//! zigzag wrapper used to make signed integers compact.
//!
//! The discriminator scheme itself (`250` inline, `251/252/253/254` widening
//! to 16/32/64/128-bit payloads) is bincode's own wire convention, not the
//! LEB128-style scheme `other_examples` shows for `diamond-types`; that
//! format uses a different discriminator layout entirely, so only the
//! *shape* of the zigzag helpers (shift-based formulas, MIN-special-cased)
//! is grounded on `josephg-diamond-types__varint.rs`'s
//! `num_encode_zigzag_i64`/`strip_bit_u64`; the varint table below follows
//! bincode's own boundary table instead.
//!
//! Reads and writes go through [`Reader`]/[`Writer`] rather than a raw
//! slice so that every varint byte, discriminator and payload alike, is
//! still subject to the cursor's buffer-end and `limit` checks; there is no
//! separate unchecked fast path.

use crate::cursor::{Reader, Writer};
use crate::config::Endian;
use crate::error::{Error, Result};

const TAG_U16: u8 = 251;
const TAG_U32: u8 = 252;
const TAG_U64: u8 = 253;
const TAG_U128: u8 = 254;
const TAG_INVALID: u8 = 255;
const INLINE_MAX: u64 = 250;

/// Write `u` using bincode's discriminator-tagged varint encoding.
pub fn write_varint_u64(w: &mut Writer<'_>, u: u64, endian: Endian) -> Result<()> {
    if u <= INLINE_MAX {
        w.write_u8(u as u8)
    } else if u <= u16::MAX as u64 {
        w.write_u8(TAG_U16)?;
        w.write_u16(u as u16, endian)
    } else if u <= u32::MAX as u64 {
        w.write_u8(TAG_U32)?;
        w.write_u32(u as u32, endian)
    } else {
        w.write_u8(TAG_U64)?;
        w.write_u64(u, endian)
    }
}

/// Write `u` using bincode's discriminator-tagged varint encoding, with the
/// full `u128` widening tier available (used for 128-bit primitives).
pub fn write_varint_u128(w: &mut Writer<'_>, u: u128, endian: Endian) -> Result<()> {
    if u <= INLINE_MAX as u128 {
        w.write_u8(u as u8)
    } else if u <= u16::MAX as u128 {
        w.write_u8(TAG_U16)?;
        w.write_u16(u as u16, endian)
    } else if u <= u32::MAX as u128 {
        w.write_u8(TAG_U32)?;
        w.write_u32(u as u32, endian)
    } else if u <= u64::MAX as u128 {
        w.write_u8(TAG_U64)?;
        w.write_u64(u as u64, endian)
    } else {
        w.write_u8(TAG_U128)?;
        w.write_u128(u, endian)
    }
}

/// Read a varint-encoded value that fits in a `u64`; a `254`-tagged
/// (128-bit) payload is accepted only if its value does not exceed
/// `u64::MAX`, matching how an honest encoder never emits a wider tier than
/// the value requires but a decoder must still tolerate one.
pub fn read_varint_u64(r: &mut Reader<'_>, endian: Endian) -> Result<u64> {
    match r.read_u8()? {
        TAG_INVALID => Err(Error::bigint_out_of_range("varint discriminator 255 is reserved")),
        t if t as u64 <= INLINE_MAX => Ok(t as u64),
        TAG_U16 => Ok(r.read_u16(endian)? as u64),
        TAG_U32 => Ok(r.read_u32(endian)? as u64),
        TAG_U64 => r.read_u64(endian),
        TAG_U128 => {
            let v = r.read_u128(endian)?;
            u64::try_from(v)
                .map_err(|_| Error::bigint_out_of_range(format!("varint value {v} does not fit in u64")))
        }
        _ => unreachable!("all u8 values are covered above"),
    }
}

/// Read a varint-encoded value up to 128 bits wide.
pub fn read_varint_u128(r: &mut Reader<'_>, endian: Endian) -> Result<u128> {
    match r.read_u8()? {
        TAG_INVALID => Err(Error::bigint_out_of_range("varint discriminator 255 is reserved")),
        t if t as u128 <= INLINE_MAX as u128 => Ok(t as u128),
        TAG_U16 => Ok(r.read_u16(endian)? as u128),
        TAG_U32 => Ok(r.read_u32(endian)? as u128),
        TAG_U64 => Ok(r.read_u64(endian)? as u128),
        TAG_U128 => r.read_u128(endian),
        _ => unreachable!("all u8 values are covered above"),
    }
}

/// `zig(x) = (x << 1) ^ (x >> (W-1))`, with `MIN` special-cased since the
/// naive shift overflows at the most negative value of each width.
pub fn zigzag_encode_i16(x: i16) -> u16 {
    if x == i16::MIN {
        return u16::MAX;
    }
    ((x << 1) ^ (x >> 15)) as u16
}

pub fn zigzag_encode_i32(x: i32) -> u32 {
    if x == i32::MIN {
        return u32::MAX;
    }
    ((x << 1) ^ (x >> 31)) as u32
}

pub fn zigzag_encode_i64(x: i64) -> u64 {
    if x == i64::MIN {
        return u64::MAX;
    }
    ((x << 1) ^ (x >> 63)) as u64
}

pub fn zigzag_encode_i128(x: i128) -> u128 {
    if x == i128::MIN {
        return u128::MAX;
    }
    ((x << 1) ^ (x >> 127)) as u128
}

/// `unzig(z) = (z >> 1) ^ -(z & 1)`.
pub fn zigzag_decode_i16(z: u16) -> i16 {
    ((z >> 1) as i16) ^ -((z & 1) as i16)
}

pub fn zigzag_decode_i32(z: u32) -> i32 {
    ((z >> 1) as i32) ^ -((z & 1) as i32)
}

pub fn zigzag_decode_i64(z: u64) -> i64 {
    ((z >> 1) as i64) ^ -((z & 1) as i64)
}

pub fn zigzag_decode_i128(z: u128) -> i128 {
    ((z >> 1) as i128) ^ -((z & 1) as i128)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn enc(u: u64) -> Vec<u8> {
        let mut buf = [0u8; 32];
        let n = {
            let mut w = Writer::new(&mut buf);
            write_varint_u64(&mut w, u, Endian::Little).unwrap();
            w.pos()
        };
        buf[..n].to_vec()
    }

    #[test]
    fn inline_boundary_250_251() {
        assert_eq!(enc(250), vec![250]);
        assert_eq!(enc(251), vec![251, 251, 0]);
    }

    #[test]
    fn u16_boundary_65535_65536() {
        assert_eq!(enc(65535), vec![251, 255, 255]);
        assert_eq!(enc(65536), vec![252, 0, 0, 1, 0]);
    }

    #[test]
    fn u32_boundary() {
        assert_eq!(enc(u32::MAX as u64), vec![252, 255, 255, 255, 255]);
        assert_eq!(enc(u32::MAX as u64 + 1), vec![253, 0, 0, 0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn u64_max_roundtrip() {
        let buf = enc(u64::MAX);
        assert_eq!(buf[0], TAG_U64);
        let mut r = Reader::new(&buf);
        assert_eq!(read_varint_u64(&mut r, Endian::Little).unwrap(), u64::MAX);
        assert_eq!(r.pos(), buf.len());
    }

    #[test]
    fn discriminator_255_is_rejected() {
        let buf = [255u8, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut r = Reader::new(&buf);
        let err = read_varint_u64(&mut r, Endian::Little).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BigintOutOfRange);
    }

    #[test]
    fn roundtrip_sweep() {
        for &u in &[0u64, 1, 249, 250, 251, 252, 1000, 65535, 65536, u32::MAX as u64, u32::MAX as u64 + 1, u64::MAX] {
            let buf = enc(u);
            let mut r = Reader::new(&buf);
            assert_eq!(read_varint_u64(&mut r, Endian::Little).unwrap(), u);
            assert_eq!(r.pos(), buf.len());
        }
    }

    #[test]
    fn u128_tier_roundtrips() {
        let v: u128 = (u64::MAX as u128) + 12345;
        let mut buf = [0u8; 32];
        let n = {
            let mut w = Writer::new(&mut buf);
            write_varint_u128(&mut w, v, Endian::Little).unwrap();
            w.pos()
        };
        assert_eq!(buf[0], TAG_U128);
        let mut r = Reader::new(&buf[..n]);
        assert_eq!(read_varint_u128(&mut r, Endian::Little).unwrap(), v);
    }

    #[test]
    fn varint_respects_limit() {
        let mut buf = [0u8; 32];
        let mut w = Writer::with_offset_and_limit(&mut buf, 0, Some(2));
        let err = write_varint_u64(&mut w, 65536, Endian::Little).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OverflowLimit);
    }

    #[test]
    fn zigzag_i32_boundaries() {
        assert_eq!(zigzag_encode_i32(-1), 1);
        assert_eq!(zigzag_encode_i32(i32::MIN), u32::MAX);
        assert_eq!(zigzag_decode_i32(u32::MAX), i32::MIN);
        assert_eq!(zigzag_decode_i32(1), -1);
    }

    #[test]
    fn zigzag_roundtrip_sweep() {
        for x in [-1i64, 0, 1, 2, -2, i64::MIN, i64::MAX, 12345, -98765] {
            assert_eq!(zigzag_decode_i64(zigzag_encode_i64(x)), x);
        }
        for x in [-1i32, 0, 1, i32::MIN, i32::MAX] {
            assert_eq!(zigzag_decode_i32(zigzag_encode_i32(x)), x);
        }
        for x in [-1i16, 0, 1, i16::MIN, i16::MAX] {
            assert_eq!(zigzag_decode_i16(zigzag_encode_i16(x)), x);
        }
        for x in [-1i128, 0, 1, i128::MIN, i128::MAX] {
            assert_eq!(zigzag_decode_i128(zigzag_encode_i128(x)), x);
        }
    }
}

//! Bounded byte cursors over a caller-owned buffer.
//!
//! `Reader` and `Writer` are the read/write halves of the byte cursor.
//! Both track a position and an optional byte
//! `limit`; every accessor either advances by the fixed width of its type
//! or fails with `OverflowLimit`; nothing here silently truncates.
//!
//! Grounded on `isopack::cursor::Cursor`'s `need()`/bounds-check shape,
//! generalized into a read/write pair over a caller-owned slice instead of
//! a single read-only view over an internally-owned `Vec`.
//!
//! Rust has native `u128`/`i128` with `to_le_bytes`/`from_le_bytes`, so the
//! 128-bit accessors below convert directly through those rather than
//! manually splitting into two 64-bit halves, which is only required
//! in languages (like the TypeScript origin) that lack a native wide
//! integer type.

use crate::config::Endian;
use crate::error::{Error, Result};

trait FixedWidth: Sized + Copy {
    const SIZE: usize;
    fn from_le(bytes: &[u8]) -> Self;
    fn from_be(bytes: &[u8]) -> Self;
    fn write_le(self, out: &mut [u8]);
    fn write_be(self, out: &mut [u8]);
}

macro_rules! impl_fixed_width {
    ($ty:ty, $size:expr) => {
        impl FixedWidth for $ty {
            const SIZE: usize = $size;
            #[inline(always)]
            fn from_le(bytes: &[u8]) -> Self {
                Self::from_le_bytes(bytes.try_into().expect("slice has exact width"))
            }
            #[inline(always)]
            fn from_be(bytes: &[u8]) -> Self {
                Self::from_be_bytes(bytes.try_into().expect("slice has exact width"))
            }
            #[inline(always)]
            fn write_le(self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_le_bytes());
            }
            #[inline(always)]
            fn write_be(self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_be_bytes());
            }
        }
    };
}

impl_fixed_width!(u16, 2);
impl_fixed_width!(u32, 4);
impl_fixed_width!(u64, 8);
impl_fixed_width!(u128, 16);
impl_fixed_width!(i16, 2);
impl_fixed_width!(i32, 4);
impl_fixed_width!(i64, 8);
impl_fixed_width!(i128, 16);
impl_fixed_width!(f32, 4);
impl_fixed_width!(f64, 8);

/// A bounded read cursor over a borrowed, caller-owned slice.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    limit: Option<u64>,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0, limit: None }
    }

    pub fn with_offset_and_limit(buf: &'a [u8], offset: usize, limit: Option<u64>) -> Self {
        Self { buf, pos: offset, limit }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    fn check(&self, n: usize) -> Result<()> {
        let end = self.pos + n;
        if end > self.buf.len() {
            return Err(Error::overflow_limit(format!(
                "read of {n} bytes at offset {} exceeds buffer length {}",
                self.pos,
                self.buf.len()
            )));
        }
        if let Some(limit) = self.limit {
            if end as u64 > limit {
                return Err(Error::overflow_limit(format!(
                    "read of {n} bytes at offset {} exceeds configured limit {limit}",
                    self.pos
                )));
            }
        }
        Ok(())
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.check(n)?;
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_bytes(1)?[0] as i8)
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_bytes(1)?[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::invalid_type(format!("bool byte out of domain: {other}"))),
        }
    }

    fn read_fixed<T: FixedWidth>(&mut self, endian: Endian) -> Result<T> {
        let bytes = self.read_bytes(T::SIZE)?;
        Ok(match endian {
            Endian::Little => T::from_le(bytes),
            Endian::Big => T::from_be(bytes),
        })
    }

    pub fn read_u16(&mut self, endian: Endian) -> Result<u16> {
        self.read_fixed(endian)
    }
    pub fn read_u32(&mut self, endian: Endian) -> Result<u32> {
        self.read_fixed(endian)
    }
    pub fn read_u64(&mut self, endian: Endian) -> Result<u64> {
        self.read_fixed(endian)
    }
    pub fn read_u128(&mut self, endian: Endian) -> Result<u128> {
        self.read_fixed(endian)
    }
    pub fn read_i16(&mut self, endian: Endian) -> Result<i16> {
        self.read_fixed(endian)
    }
    pub fn read_i32(&mut self, endian: Endian) -> Result<i32> {
        self.read_fixed(endian)
    }
    pub fn read_i64(&mut self, endian: Endian) -> Result<i64> {
        self.read_fixed(endian)
    }
    pub fn read_i128(&mut self, endian: Endian) -> Result<i128> {
        self.read_fixed(endian)
    }
    pub fn read_f32(&mut self, endian: Endian) -> Result<f32> {
        self.read_fixed(endian)
    }
    pub fn read_f64(&mut self, endian: Endian) -> Result<f64> {
        self.read_fixed(endian)
    }
}

/// A bounded write cursor over a borrowed, caller-owned mutable slice.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
    limit: Option<u64>,
}

impl<'a> Writer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0, limit: None }
    }

    pub fn with_offset_and_limit(buf: &'a mut [u8], offset: usize, limit: Option<u64>) -> Self {
        Self { buf, pos: offset, limit }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    fn reserve(&mut self, n: usize) -> Result<&mut [u8]> {
        let end = self.pos + n;
        if end > self.buf.len() {
            return Err(Error::overflow_limit(format!(
                "write of {n} bytes at offset {} exceeds buffer length {}",
                self.pos,
                self.buf.len()
            )));
        }
        if let Some(limit) = self.limit {
            if end as u64 > limit {
                return Err(Error::overflow_limit(format!(
                    "write of {n} bytes at offset {} exceeds configured limit {limit}",
                    self.pos
                )));
            }
        }
        let slice = &mut self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.reserve(data.len())?.copy_from_slice(data);
        Ok(())
    }

    pub fn write_u8(&mut self, v: u8) -> Result<()> {
        self.reserve(1)?[0] = v;
        Ok(())
    }

    pub fn write_i8(&mut self, v: i8) -> Result<()> {
        self.reserve(1)?[0] = v as u8;
        Ok(())
    }

    pub fn write_bool(&mut self, v: bool) -> Result<()> {
        self.reserve(1)?[0] = v as u8;
        Ok(())
    }

    fn write_fixed<T: FixedWidth>(&mut self, v: T, endian: Endian) -> Result<()> {
        let out = self.reserve(T::SIZE)?;
        match endian {
            Endian::Little => v.write_le(out),
            Endian::Big => v.write_be(out),
        }
        Ok(())
    }

    pub fn write_u16(&mut self, v: u16, endian: Endian) -> Result<()> {
        self.write_fixed(v, endian)
    }
    pub fn write_u32(&mut self, v: u32, endian: Endian) -> Result<()> {
        self.write_fixed(v, endian)
    }
    pub fn write_u64(&mut self, v: u64, endian: Endian) -> Result<()> {
        self.write_fixed(v, endian)
    }
    pub fn write_u128(&mut self, v: u128, endian: Endian) -> Result<()> {
        self.write_fixed(v, endian)
    }
    pub fn write_i16(&mut self, v: i16, endian: Endian) -> Result<()> {
        self.write_fixed(v, endian)
    }
    pub fn write_i32(&mut self, v: i32, endian: Endian) -> Result<()> {
        self.write_fixed(v, endian)
    }
    pub fn write_i64(&mut self, v: i64, endian: Endian) -> Result<()> {
        self.write_fixed(v, endian)
    }
    pub fn write_i128(&mut self, v: i128, endian: Endian) -> Result<()> {
        self.write_fixed(v, endian)
    }
    pub fn write_f32(&mut self, v: f32, endian: Endian) -> Result<()> {
        self.write_fixed(v, endian)
    }
    pub fn write_f64(&mut self, v: f64, endian: Endian) -> Result<()> {
        self.write_fixed(v, endian)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn read_write_roundtrip_le() {
        let mut buf = [0u8; 16];
        {
            let mut w = Writer::new(&mut buf);
            w.write_u32(0x0102_0304, Endian::Little).unwrap();
            w.write_i16(-1, Endian::Little).unwrap();
        }
        let mut r = Reader::new(&buf);
        assert_eq!(r.read_u32(Endian::Little).unwrap(), 0x0102_0304);
        assert_eq!(r.read_i16(Endian::Little).unwrap(), -1);
    }

    #[test]
    fn read_write_roundtrip_be() {
        let mut buf = [0u8; 8];
        {
            let mut w = Writer::new(&mut buf);
            w.write_u64(0x0011_2233_4455_6677, Endian::Big).unwrap();
        }
        let mut r = Reader::new(&buf);
        assert_eq!(r.read_u64(Endian::Big).unwrap(), 0x0011_2233_4455_6677);
        assert_eq!(buf, [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77]);
    }

    #[test]
    fn u128_roundtrip() {
        let mut buf = [0u8; 16];
        let v: u128 = u128::MAX - 7;
        {
            let mut w = Writer::new(&mut buf);
            w.write_u128(v, Endian::Little).unwrap();
        }
        let mut r = Reader::new(&buf);
        assert_eq!(r.read_u128(Endian::Little).unwrap(), v);
    }

    #[test]
    fn overread_fails_with_overflow_limit() {
        let buf = [1u8, 2, 3];
        let mut r = Reader::new(&buf);
        let err = r.read_u32(Endian::Little).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OverflowLimit);
    }

    #[test]
    fn write_past_limit_fails() {
        let mut buf = [0u8; 16];
        let mut w = Writer::with_offset_and_limit(&mut buf, 0, Some(4));
        w.write_u32(1, Endian::Little).unwrap();
        let err = w.write_u8(2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OverflowLimit);
    }

    #[test]
    fn bool_rejects_invalid_byte() {
        let buf = [2u8];
        let mut r = Reader::new(&buf);
        let err = r.read_bool().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType);
    }
}

//! Little-endian binary primitives
//!
//! Fixed-width integers are written with `to_le_bytes` and no padding. Sizes
//! are `u64`. Strings are a size followed by raw UTF-8 bytes, no terminator.

use std::io::{self, Read, Write};
use tracing::warn;
use uuid::Uuid;

/// Longest string a reader will accept. Longer lengths in a stream are
/// treated as corruption and clamped.
pub const MAX_STRING_LEN: usize = 2048;

/// Writes primitives to any byte sink
pub struct ByteWriter<W: Write> {
    inner: W,
}

impl<W: Write> ByteWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.inner.write_all(&[value])
    }

    pub fn write_u32(&mut self, value: u32) -> io::Result<()> {
        self.inner.write_all(&value.to_le_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> io::Result<()> {
        self.inner.write_all(&value.to_le_bytes())
    }

    pub fn write_size(&mut self, value: usize) -> io::Result<()> {
        self.inner.write_all(&(value as u64).to_le_bytes())
    }

    pub fn write_uuid(&mut self, id: Uuid) -> io::Result<()> {
        self.inner.write_all(id.as_bytes())
    }

    pub fn write_str(&mut self, value: &str) -> io::Result<()> {
        self.write_size(value.len())?;
        self.inner.write_all(value.as_bytes())
    }
}

/// Reads primitives from any byte source
pub struct ByteReader<R: Read> {
    inner: R,
}

impl<R: Read> ByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    fn read_array<const N: usize>(&mut self) -> io::Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> io::Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u32(&mut self) -> io::Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> io::Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_size(&mut self) -> io::Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_uuid(&mut self) -> io::Result<Uuid> {
        Ok(Uuid::from_bytes(self.read_array()?))
    }

    /// Read a length-prefixed string.
    ///
    /// A length above [`MAX_STRING_LEN`] is clamped: only that many bytes are
    /// consumed and the result is whatever they decode to. The stream is then
    /// out of step, which later reads (and the trailing map tag) will catch.
    pub fn read_string(&mut self) -> io::Result<String> {
        let declared = self.read_size()?;
        let len = if declared > MAX_STRING_LEN as u64 {
            warn!(
                "String length {} exceeds limit of {}, reading a truncated string",
                declared, MAX_STRING_LEN
            );
            MAX_STRING_LEN
        } else {
            declared as usize
        };

        let mut buf = vec![0u8; len];
        self.inner.read_exact(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

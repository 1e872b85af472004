//! Field reader over the decompressed index stream.
//!
//! All index fields are fixed-width little-endian integers or fixed-size byte
//! arrays. The reader owns the zlib decoder, so dropping it on any exit path
//! releases the wrapped stream.

use crate::{IndexError, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use flate2::read::ZlibDecoder;
use std::io::{self, Read};

/// Reads index fields from a zlib-compressed stream.
pub struct FieldReader<R: Read> {
    inner: ZlibDecoder<R>,
    offset: u64,
}

impl<R: Read> FieldReader<R> {
    /// Wrap a compressed stream.
    pub fn new(reader: R) -> Self {
        Self {
            inner: ZlibDecoder::new(reader),
            offset: 0,
        }
    }

    /// Number of decompressed bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.field(1, |r| r.read_u8())
    }

    /// Read a one-byte flag; any non-zero value is true.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.field(2, |r| r.read_u16::<LittleEndian>())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.field(4, |r| r.read_u32::<LittleEndian>())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.field(4, |r| r.read_i32::<LittleEndian>())
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.field(8, |r| r.read_u64::<LittleEndian>())
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.field(8, |r| r.read_i64::<LittleEndian>())
    }

    /// Read a fixed-size byte array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.field(N, |r| {
            let mut buf = [0u8; N];
            r.read_exact(&mut buf)?;
            Ok(buf)
        })
    }

    /// Consume whatever is left of the stream, returning the byte count.
    pub fn drain(&mut self) -> Result<u64> {
        let offset = self.offset;
        let remaining = io::copy(&mut self.inner, &mut io::sink())
            .map_err(|e| classify_tail(e, offset))?;
        self.offset += remaining;
        Ok(remaining)
    }

    fn field<T>(
        &mut self,
        width: usize,
        read: impl FnOnce(&mut ZlibDecoder<R>) -> io::Result<T>,
    ) -> Result<T> {
        let value = read(&mut self.inner).map_err(|e| classify(e, self.offset, width))?;
        self.offset += width as u64;
        Ok(value)
    }
}

/// Errors past the last field: a short stream here has cut the zlib trailer,
/// not a field.
fn classify_tail(err: io::Error, offset: u64) -> IndexError {
    match err.kind() {
        io::ErrorKind::UnexpectedEof => IndexError::corrupt(format!(
            "stream ends before the zlib trailer (decompressed offset {offset})"
        )),
        _ => classify(err, offset, 0),
    }
}

/// Map an I/O error from the decompressor onto the index error kinds.
fn classify(err: io::Error, offset: u64, width: usize) -> IndexError {
    match err.kind() {
        io::ErrorKind::UnexpectedEof => IndexError::TruncatedStream { offset, width },
        io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => {
            IndexError::corrupt(err.to_string())
        }
        _ => IndexError::Io(err),
    }
}

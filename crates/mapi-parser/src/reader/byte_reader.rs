use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use mapi_core::{MapiError, Result};
use std::io::{Cursor, Read, Seek, SeekFrom};

/// A bounds-checked reader for parsing in-memory binary data
pub struct ByteReader<'a> {
    cursor: Cursor<&'a [u8]>,
    size: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a new ByteReader from a byte slice
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            size: data.len(),
            cursor: Cursor::new(data),
        }
    }

    /// Get the current position in the buffer
    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    /// Get the remaining bytes available to read
    pub fn remaining(&self) -> usize {
        self.size.saturating_sub(self.position())
    }

    /// Check if we've reached the end of the buffer
    pub fn is_eof(&self) -> bool {
        self.remaining() == 0
    }

    /// Skip n bytes forward
    pub fn skip(&mut self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(MapiError::BufferUnderflow {
                requested: n,
                available: self.remaining(),
            });
        }
        self.cursor.seek(SeekFrom::Current(n as i64))?;
        Ok(())
    }

    /// Seek to an absolute position
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.size {
            return Err(MapiError::BufferUnderflow {
                requested: pos,
                available: self.size,
            });
        }
        self.cursor.seek(SeekFrom::Start(pos as u64))?;
        Ok(())
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> Result<u8> {
        self.check(1)?;
        Ok(self.cursor.read_u8()?)
    }

    /// Read a signed byte
    pub fn read_i8(&mut self) -> Result<i8> {
        self.check(1)?;
        Ok(self.cursor.read_i8()?)
    }

    /// Read a 16-bit unsigned integer (little-endian)
    pub fn read_u16(&mut self) -> Result<u16> {
        self.check(2)?;
        Ok(self.cursor.read_u16::<LittleEndian>()?)
    }

    /// Read a 16-bit signed integer (little-endian)
    pub fn read_i16(&mut self) -> Result<i16> {
        self.check(2)?;
        Ok(self.cursor.read_i16::<LittleEndian>()?)
    }

    /// Read a 16-bit unsigned integer (big-endian)
    pub fn read_u16_be(&mut self) -> Result<u16> {
        self.check(2)?;
        Ok(self.cursor.read_u16::<BigEndian>()?)
    }

    /// Read a 32-bit unsigned integer (little-endian)
    pub fn read_u32(&mut self) -> Result<u32> {
        self.check(4)?;
        Ok(self.cursor.read_u32::<LittleEndian>()?)
    }

    /// Read a 32-bit signed integer (little-endian)
    pub fn read_i32(&mut self) -> Result<i32> {
        self.check(4)?;
        Ok(self.cursor.read_i32::<LittleEndian>()?)
    }

    /// Read a 64-bit unsigned integer (little-endian)
    pub fn read_u64(&mut self) -> Result<u64> {
        self.check(8)?;
        Ok(self.cursor.read_u64::<LittleEndian>()?)
    }

    /// Read a 64-bit signed integer (little-endian)
    pub fn read_i64(&mut self) -> Result<i64> {
        self.check(8)?;
        Ok(self.cursor.read_i64::<LittleEndian>()?)
    }

    /// Read n bytes into a vector
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        self.check(n)?;
        let mut buf = vec![0u8; n];
        self.cursor.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Read n bytes into an existing buffer
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.check(buf.len())?;
        self.cursor.read_exact(buf)?;
        Ok(())
    }

    /// Read all remaining bytes
    pub fn read_to_end(&mut self) -> Result<Vec<u8>> {
        let remaining = self.remaining();
        self.read_bytes(remaining)
    }

    /// Create a sub-reader over the next `size` bytes, advancing this
    /// reader past them
    pub fn sub_reader(&mut self, size: usize) -> Result<ByteReader<'a>> {
        self.check(size)?;
        let start = self.position();
        let data = self.cursor.get_ref();
        let sub_data = &data[start..start + size];
        self.skip(size)?;
        Ok(ByteReader::new(sub_data))
    }

    fn check(&self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(MapiError::BufferUnderflow {
                requested: n,
                available: self.remaining(),
            });
        }
        Ok(())
    }
}

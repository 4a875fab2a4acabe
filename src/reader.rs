use crate::error::Error;

/// Byte order governing every multi-byte integer and float after the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Positioned, endian-aware cursor over a borrowed byte slice.
///
/// Mirrors the lexer-over-`CharIndices` shape used elsewhere in this crate's
/// ancestry, but over raw bytes instead of `char`s, and with no lookahead
/// stack: every caller here knows exactly how many bytes it wants next.
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
    endian: Endian,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8], endian: Endian) -> Self {
        ByteReader {
            data,
            pos: 0,
            endian,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns the next `len` bytes without consuming them.
    pub fn peek(&self, len: usize) -> Result<&'a [u8], Error> {
        let end = self.pos.checked_add(len).ok_or(Error::TruncatedBlock)?;
        self.data.get(self.pos..end).ok_or(Error::TruncatedBlock)
    }

    /// Consumes and returns the next `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let bytes = self.peek(len)?;
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, Error> {
        let b = self.take(2)?;
        Ok(match self.endian {
            Endian::Little => u16::from_le_bytes([b[0], b[1]]),
            Endian::Big => u16::from_be_bytes([b[0], b[1]]),
        })
    }

    pub fn read_u32(&mut self) -> Result<u32, Error> {
        let b = self.take(4)?;
        let arr = [b[0], b[1], b[2], b[3]];
        Ok(match self.endian {
            Endian::Little => u32::from_le_bytes(arr),
            Endian::Big => u32::from_be_bytes(arr),
        })
    }

    pub fn read_u64(&mut self) -> Result<u64, Error> {
        let b = self.take(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(b);
        Ok(match self.endian {
            Endian::Little => u64::from_le_bytes(arr),
            Endian::Big => u64::from_be_bytes(arr),
        })
    }

    /// Reads an unsigned integer of `width` bytes (1, 2, 4 or 8), widened to
    /// `u64`. Used both for pointer-width fields and for primitive integer
    /// fields whose size comes from the schema's type-size table, neither of
    /// which is known at compile time.
    pub fn read_uint(&mut self, width: usize) -> Result<u64, Error> {
        match width {
            1 => self.read_u8().map(u64::from),
            2 => self.read_u16().map(u64::from),
            4 => self.read_u32().map(u64::from),
            8 => self.read_u64(),
            _ => Err(Error::MalformedSchema(format!(
                "unsupported integer width {width}"
            ))),
        }
    }

    pub fn read_f32(&mut self) -> Result<f32, Error> {
        let b = self.take(4)?;
        let arr = [b[0], b[1], b[2], b[3]];
        Ok(match self.endian {
            Endian::Little => f32::from_le_bytes(arr),
            Endian::Big => f32::from_be_bytes(arr),
        })
    }

    pub fn read_f64(&mut self) -> Result<f64, Error> {
        let b = self.take(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(b);
        Ok(match self.endian {
            Endian::Little => f64::from_le_bytes(arr),
            Endian::Big => f64::from_be_bytes(arr),
        })
    }

    /// Scans forward from the current position for the first occurrence of
    /// `tag` and repositions immediately after it. Used to skip alignment
    /// padding between schema sections.
    pub fn advance_past_tag(&mut self, tag: &[u8; 4]) -> Result<(), Error> {
        let offset = memchr::memmem::find(&self.data[self.pos..], tag).ok_or_else(|| {
            Error::MalformedSchema(format!(
                "expected tag {:?} not found",
                std::str::from_utf8(tag).unwrap_or("?")
            ))
        })?;
        self.pos += offset + tag.len();
        Ok(())
    }
}

/// Splits `data` at the first NUL byte, returning the leading slice. If no
/// NUL is present the whole slice is returned.
pub fn until_nul(data: &[u8]) -> &[u8] {
    match memchr::memchr(0, data) {
        Some(idx) => &data[..idx],
        None => data,
    }
}

//! Writing helpers for the little-endian, length-prefixed encodings used in
//! watch app archives.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::{Error, Result};

/// Extension methods for writing archive primitives to any [`Write`].
pub trait WriteExt: Write {
    /// Write a name as `[u8 len+1][bytes][0x00]`.
    ///
    /// The prefix counts the terminator, so names longer than 254 bytes are
    /// rejected with [`Error::LengthOverflow`].
    fn write_prefixed_cstring(&mut self, name: &str) -> Result<()> {
        let bytes = name.as_bytes();
        let encoded_len = u8::try_from(bytes.len() + 1).map_err(|_| Error::LengthOverflow {
            len: bytes.len(),
            width: 1,
        })?;
        self.write_u8(encoded_len)?;
        self.write_all(bytes)?;
        self.write_u8(0)?;
        Ok(())
    }

    /// Write a blob as `[u16 len][bytes]`.
    fn write_u16_prefixed(&mut self, data: &[u8]) -> Result<()> {
        let len = u16::try_from(data.len()).map_err(|_| Error::LengthOverflow {
            len: data.len(),
            width: 2,
        })?;
        self.write_u16::<LittleEndian>(len)?;
        self.write_all(data)?;
        Ok(())
    }

    /// Write a little-endian u32.
    fn write_u32_le(&mut self, value: u32) -> Result<()> {
        self.write_u32::<LittleEndian>(value)?;
        Ok(())
    }
}

impl<W: Write + ?Sized> WriteExt for W {}

//! File entries and their on-wire encoding.
//!
//! Each entry is written as:
//!
//! ```text
//! [u8 len(name)+1][name bytes][0x00][u16 size][size bytes]
//! ```

use std::io::Write;

use hrpack_common::WriteExt;

use crate::{Category, Error, Result};

/// Bytes an entry adds on top of its name and contents: length prefix,
/// name terminator and the two-byte size field.
pub const ENTRY_OVERHEAD: usize = 4;

/// Longest file name the single-byte prefix can describe.
pub const MAX_FILENAME_LEN: usize = u8::MAX as usize - 1;

/// Largest content size the two-byte size field can describe.
pub const MAX_CONTENT_SIZE: usize = u16::MAX as usize;

/// A single file collected from the app tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Category the file was found under.
    pub category: Category,
    /// File name, without any directory components.
    pub filename: String,
    /// File contents, including the trailing `0x00` for null-terminated categories.
    pub contents: Vec<u8>,
}

impl FileEntry {
    pub fn new(category: Category, filename: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            category,
            filename: filename.into(),
            contents,
        }
    }

    /// Content size as written to the size field.
    #[inline]
    pub fn size(&self) -> usize {
        self.contents.len()
    }

    /// Number of bytes this entry takes in the archive.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        self.size() + self.filename.len() + ENTRY_OVERHEAD
    }

    /// Check the name and size against the fixed-width fields.
    pub fn validate(&self) -> Result<()> {
        if self.filename.len() > MAX_FILENAME_LEN {
            return Err(Error::FilenameTooLong {
                name: self.filename.clone(),
                len: self.filename.len(),
            });
        }
        if self.size() > MAX_CONTENT_SIZE {
            return Err(Error::SizeOverflow {
                name: self.filename.clone(),
                size: self.size(),
            });
        }
        Ok(())
    }

    /// Encode this entry.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.validate()?;
        writer.write_prefixed_cstring(&self.filename)?;
        writer.write_u16_prefixed(&self.contents)?;
        Ok(())
    }
}

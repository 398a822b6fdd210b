//! App header and offset table.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{AppVersion, Category, CategorySizes, Error, Result};

/// Bytes before the payload: magic, format version, payload offset and length.
pub const CONTAINER_PREFIX_LEN: usize = 12;

/// Size of the header at the start of the payload.
pub const HEADER_LEN: usize = std::mem::size_of::<AppHeader>();

/// Absolute archive position of the first file entry.
pub const BASE_OFFSET: u32 = (CONTAINER_PREFIX_LEN + HEADER_LEN) as u32;

const _: () = assert!(HEADER_LEN == 76);
const _: () = assert!(BASE_OFFSET == 88);

/// Watch app header, the first 76 bytes of the payload.
///
/// Offsets are absolute positions in the archive file, which is how the
/// watch seeks to each category. All integers are stored little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct AppHeader {
    /// `major, minor, patch, 0`.
    pub version: [u8; 4],
    pub reserved: [u32; 2],
    pub code_start: u32,
    pub icons_start: u32,
    pub layout_start: u32,
    pub display_name_start: u32,
    /// Second copy of `display_name_start`. The firmware reads both slots.
    pub display_name_start_repeat: u32,
    pub config_start: u32,
    pub file_end: u32,
    pub padding: [u32; 9],
}

impl AppHeader {
    /// Build a header for `version` with the given offsets.
    pub fn new(version: AppVersion, offsets: &OffsetTable) -> Self {
        Self {
            version: version.to_header_bytes(),
            reserved: [0; 2],
            code_start: offsets.code.to_le(),
            icons_start: offsets.icons.to_le(),
            layout_start: offsets.layout.to_le(),
            display_name_start: offsets.display_name.to_le(),
            display_name_start_repeat: offsets.display_name.to_le(),
            config_start: offsets.config.to_le(),
            file_end: offsets.end.to_le(),
            padding: [0; 9],
        }
    }

    /// Decode the offset table stored in this header.
    pub fn offsets(&self) -> OffsetTable {
        OffsetTable {
            code: u32::from_le(self.code_start),
            icons: u32::from_le(self.icons_start),
            layout: u32::from_le(self.layout_start),
            display_name: u32::from_le(self.display_name_start),
            config: u32::from_le(self.config_start),
            end: u32::from_le(self.file_end),
        }
    }
}

/// Start of each category's region plus the end of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetTable {
    pub code: u32,
    pub icons: u32,
    pub layout: u32,
    pub display_name: u32,
    pub config: u32,
    pub end: u32,
}

impl OffsetTable {
    /// Lay the categories out one after another starting at [`BASE_OFFSET`].
    pub fn from_sizes(sizes: &CategorySizes) -> Result<Self> {
        let mut starts = [0u32; 6];
        let mut cursor = u64::from(BASE_OFFSET);
        for (slot, category) in Category::ALL.iter().enumerate() {
            starts[slot] = u32::try_from(cursor).map_err(|_| Error::ArchiveTooLarge(cursor))?;
            cursor += sizes.get(*category);
        }
        starts[5] = u32::try_from(cursor).map_err(|_| Error::ArchiveTooLarge(cursor))?;

        Ok(Self {
            code: starts[0],
            icons: starts[1],
            layout: starts[2],
            display_name: starts[3],
            config: starts[4],
            end: starts[5],
        })
    }

    /// Start offset of a category's region.
    pub fn start(&self, category: Category) -> u32 {
        match category {
            Category::Code => self.code,
            Category::Icons => self.icons,
            Category::Layout => self.layout,
            Category::DisplayName => self.display_name,
            Category::Config => self.config,
        }
    }

    /// End offset of a category's region.
    pub fn end_of(&self, category: Category) -> u32 {
        match category {
            Category::Code => self.icons,
            Category::Icons => self.layout,
            Category::Layout => self.display_name,
            Category::DisplayName => self.config,
            Category::Config => self.end,
        }
    }
}

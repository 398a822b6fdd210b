//! Archive construction.

use byteorder::{LittleEndian, WriteBytesExt};
use hrpack_common::{crc, WriteExt};
use tracing::info;
use zerocopy::IntoBytes;

use crate::header::{AppHeader, OffsetTable, CONTAINER_PREFIX_LEN};
use crate::{AppVersion, Category, CategorySizes, CollectedAssets, Error, FileEntry, Result};

/// Magic bytes at the start of every watch app archive.
pub const MAGIC: [u8; 2] = [0xFE, 0x15];

/// Container format version.
pub const FORMAT_VERSION: u16 = 3;

/// Offset of the payload field; the device expects zero.
const PAYLOAD_OFFSET: u32 = 0;

/// Builds a watch app archive from collected files.
///
/// # Example
///
/// ```
/// use hrpack_app::{AppVersion, ArchiveBuilder, Category, CategorySizes, FileEntry};
///
/// let files = vec![FileEntry::new(Category::Code, "main.bin", vec![1, 2, 3])];
/// let mut sizes = CategorySizes::new();
/// sizes.add_file(Category::Code, "main.bin", 3);
///
/// let archive = ArchiveBuilder::new(&files, &sizes, AppVersion::new(1, 2, 3)).build().unwrap();
/// assert_eq!(&archive.bytes()[..4], &[0xFE, 0x15, 0x03, 0x00]);
/// assert_eq!(archive.offsets().end, 103);
/// ```
#[derive(Debug)]
pub struct ArchiveBuilder<'a> {
    files: &'a [FileEntry],
    sizes: &'a CategorySizes,
    version: AppVersion,
}

impl<'a> ArchiveBuilder<'a> {
    /// Create a builder over files already in archive order.
    pub fn new(files: &'a [FileEntry], sizes: &'a CategorySizes, version: AppVersion) -> Self {
        Self {
            files,
            sizes,
            version,
        }
    }

    /// Create a builder from the output of [`collect`](crate::collect).
    pub fn from_assets(assets: &'a CollectedAssets, version: AppVersion) -> Self {
        Self::new(&assets.files, &assets.sizes, version)
    }

    /// Encode the header and entries and wrap them in the container.
    pub fn build(&self) -> Result<Archive> {
        self.check_layout()?;
        let offsets = OffsetTable::from_sizes(self.sizes)?;
        let payload = self.build_payload(&offsets)?;
        debug_assert_eq!(
            payload.len() + CONTAINER_PREFIX_LEN,
            offsets.end as usize
        );

        let archive = Archive::wrap(&payload, offsets)?;
        info!(
            version = %self.version,
            files = self.files.len(),
            len = archive.len(),
            checksum = format_args!("{:#010x}", archive.checksum()),
            "built archive"
        );
        Ok(archive)
    }

    /// Files must be grouped in category order and every category's declared
    /// size must match its entries, or the header offsets would point into
    /// the wrong region.
    fn check_layout(&self) -> Result<()> {
        let mut encoded = CategorySizes::new();
        let mut previous: Option<Category> = None;

        for file in self.files {
            if let Some(previous) = previous.filter(|&p| file.category < p) {
                return Err(Error::MisorderedFile {
                    name: file.filename.clone(),
                    category: file.category,
                    previous,
                });
            }
            previous = Some(file.category);
            encoded.add_file(file.category, &file.filename, file.size());
        }

        for category in Category::ALL {
            let (declared, actual) = (self.sizes.get(category), encoded.get(category));
            if declared != actual {
                return Err(Error::InconsistentSizes {
                    category,
                    declared,
                    actual,
                });
            }
        }
        Ok(())
    }

    fn build_payload(&self, offsets: &OffsetTable) -> Result<Vec<u8>> {
        let header = AppHeader::new(self.version, offsets);
        let entries_len: usize = self.files.iter().map(FileEntry::encoded_len).sum();

        let mut payload = Vec::with_capacity(header.as_bytes().len() + entries_len);
        payload.extend_from_slice(header.as_bytes());
        for file in self.files {
            file.write_to(&mut payload)?;
        }
        Ok(payload)
    }
}

/// A finished archive held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    bytes: Vec<u8>,
    offsets: OffsetTable,
    checksum: u32,
}

impl Archive {
    fn wrap(payload: &[u8], offsets: OffsetTable) -> Result<Self> {
        let payload_len =
            u32::try_from(payload.len()).map_err(|_| Error::ArchiveTooLarge(payload.len() as u64))?;
        let checksum = crc::hash_bytes(payload);

        let mut bytes = Vec::with_capacity(CONTAINER_PREFIX_LEN + payload.len() + 4);
        bytes.extend_from_slice(&MAGIC);
        bytes.write_u16::<LittleEndian>(FORMAT_VERSION)?;
        bytes.write_u32_le(PAYLOAD_OFFSET)?;
        bytes.write_u32_le(payload_len)?;
        bytes.extend_from_slice(payload);
        bytes.write_u32_le(checksum)?;

        Ok(Self {
            bytes,
            offsets,
            checksum,
        })
    }

    /// The complete archive.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the archive, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The checksum-protected region: header and entries.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[CONTAINER_PREFIX_LEN..self.bytes.len() - 4]
    }

    /// CRC32C of the payload.
    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    /// Offsets written into the header.
    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    /// Total archive length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; an archive holds at least its header.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Name to give the archive when none is chosen: the first file in archive
/// order, normally the main code file.
pub fn default_output_name(files: &[FileEntry]) -> Option<&str> {
    files.first().map(|f| f.filename.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(files: &[FileEntry]) -> CategorySizes {
        let mut sizes = CategorySizes::new();
        for f in files {
            sizes.add_file(f.category, &f.filename, f.size());
        }
        sizes
    }

    #[test]
    fn test_empty_app() {
        let sizes = CategorySizes::new();
        let archive = ArchiveBuilder::new(&[], &sizes, AppVersion::new(0, 1, 0))
            .build()
            .unwrap();

        assert_eq!(archive.len(), 12 + 76 + 4);
        assert_eq!(&archive.bytes()[8..12], &76u32.to_le_bytes());
        assert_eq!(archive.offsets().end, 88);
        assert_eq!(archive.checksum(), crc::hash_bytes(archive.payload()));
        assert_eq!(
            &archive.bytes()[88..],
            &crc::hash_bytes(archive.payload()).to_le_bytes()
        );
    }

    #[test]
    fn test_container_prefix() {
        let files = vec![FileEntry::new(Category::Code, "m", vec![0xAB])];
        let sizes = sized(&files);
        let archive = ArchiveBuilder::new(&files, &sizes, AppVersion::new(2, 0, 1))
            .build()
            .unwrap();
        let bytes = archive.bytes();

        assert_eq!(&bytes[0..2], &MAGIC);
        assert_eq!(&bytes[2..4], &[0x03, 0x00]);
        assert_eq!(&bytes[4..8], &[0; 4]);
        assert_eq!(u32::from_le_bytes(bytes[8..12].try_into().unwrap()), 76 + 6);
        assert_eq!(&bytes[12..16], &[2, 0, 1, 0]);
        assert_eq!(&bytes[88..94], &[0x02, b'm', 0x00, 0x01, 0x00, 0xAB]);
    }

    #[test]
    fn test_inconsistent_sizes_rejected() {
        let files = vec![FileEntry::new(Category::Code, "main.bin", vec![1, 2, 3])];
        let sizes = CategorySizes::new();

        assert!(matches!(
            ArchiveBuilder::new(&files, &sizes, AppVersion::new(1, 0, 0)).build(),
            Err(Error::InconsistentSizes {
                category: Category::Code,
                declared: 0,
                actual: 15
            })
        ));
    }

    #[test]
    fn test_sizes_booked_under_wrong_category_rejected() {
        let files = vec![FileEntry::new(Category::Code, "main.bin", vec![1, 2, 3])];
        let mut sizes = CategorySizes::new();
        sizes.add_file(Category::Config, "main.bin", 3);

        // Totals agree, but the code offset would not cover main.bin.
        assert_eq!(sizes.total(), sized(&files).total());
        assert!(matches!(
            ArchiveBuilder::new(&files, &sizes, AppVersion::new(1, 0, 0)).build(),
            Err(Error::InconsistentSizes {
                category: Category::Code,
                declared: 0,
                actual: 15
            })
        ));
    }

    #[test]
    fn test_misordered_files_rejected() {
        let files = vec![
            FileEntry::new(Category::Icons, "a.png", vec![0xFF]),
            FileEntry::new(Category::Code, "main.bin", vec![1, 2, 3]),
        ];
        let sizes = sized(&files);

        match ArchiveBuilder::new(&files, &sizes, AppVersion::new(1, 0, 0)).build() {
            Err(Error::MisorderedFile {
                name,
                category,
                previous,
            }) => {
                assert_eq!(name, "main.bin");
                assert_eq!(category, Category::Code);
                assert_eq!(previous, Category::Icons);
            }
            other => panic!("expected MisorderedFile, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_category_accepted() {
        let files = vec![
            FileEntry::new(Category::Code, "a", vec![1]),
            FileEntry::new(Category::Code, "b", vec![2]),
            FileEntry::new(Category::Config, "c", vec![3, 0]),
        ];
        let sizes = sized(&files);
        let archive = ArchiveBuilder::new(&files, &sizes, AppVersion::new(1, 0, 0))
            .build()
            .unwrap();

        assert_eq!(archive.offsets().icons, 88 + 6 + 6);
        assert_eq!(archive.offsets().config, 100);
        assert_eq!(archive.offsets().end, 107);
    }

    #[test]
    fn test_oversized_file_rejected() {
        let files = vec![FileEntry::new(Category::Icons, "huge", vec![0; 65536])];
        let sizes = sized(&files);

        assert!(matches!(
            ArchiveBuilder::new(&files, &sizes, AppVersion::new(1, 0, 0)).build(),
            Err(Error::SizeOverflow { size: 65536, .. })
        ));
    }

    #[test]
    fn test_default_output_name() {
        assert_eq!(default_output_name(&[]), None);

        let files = vec![
            FileEntry::new(Category::Code, "watchface", vec![]),
            FileEntry::new(Category::Icons, "bg.raw", vec![]),
        ];
        assert_eq!(default_output_name(&files), Some("watchface"));
    }
}

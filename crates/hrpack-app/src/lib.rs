//! Watch app archive builder for Fossil Hybrid HR devices.
//!
//! A watch app is a directory holding `app.json` and a `files/` tree with one
//! subdirectory per [`Category`]. Packing it produces a single archive the
//! watch's app loader accepts:
//!
//! ```text
//! [FE 15][03 00][u32 0][u32 payload_len][payload ...][u32 crc32c(payload)]
//! payload = 76-byte header + file entries, category by category
//! ```
//!
//! # Example
//!
//! ```no_run
//! use hrpack_app::{collect, AppManifest, ArchiveBuilder, Category};
//!
//! let manifest = AppManifest::load("my_app")?;
//! let assets = collect("my_app", &Category::ALL)?;
//! let archive = ArchiveBuilder::from_assets(&assets, manifest.app_version()?).build()?;
//! std::fs::write("my_app.wapp", archive.bytes())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod archive;
mod category;
mod collect;
mod entry;
mod error;
mod header;
mod manifest;
mod output;
mod version;

pub use archive::{default_output_name, Archive, ArchiveBuilder, FORMAT_VERSION, MAGIC};
pub use category::{Category, CategorySizes};
pub use collect::{collect, CollectedAssets, FILES_DIR};
pub use entry::{FileEntry, ENTRY_OVERHEAD, MAX_CONTENT_SIZE, MAX_FILENAME_LEN};
pub use error::{Error, Result};
pub use header::{AppHeader, OffsetTable, BASE_OFFSET, CONTAINER_PREFIX_LEN, HEADER_LEN};
pub use manifest::{AppManifest, MANIFEST_FILE};
pub use output::write_atomic;
pub use version::AppVersion;

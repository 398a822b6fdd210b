//! hrpack - watch app packing for Fossil Hybrid HR devices.
//!
//! This crate ties the hrpack crates together:
//!
//! - [`hrpack_common`] - Binary reading/writing and CRC32C
//! - [`hrpack_app`] - App tree collection and archive building
//!
//! # Example
//!
//! ```no_run
//! use hrpack::prelude::*;
//!
//! let report = pack("openSourceWatchface", None)?;
//! println!("{} ({} bytes)", report.output.display(), report.len);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::{Path, PathBuf};

use tracing::{info, warn};

pub use hrpack_app as app;
pub use hrpack_common as common;

pub use hrpack_app::{Error, Result};

use hrpack_app::{
    collect, default_output_name, write_atomic, AppManifest, ArchiveBuilder, Category,
    CategorySizes,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{pack, PackReport};
    pub use hrpack_app::{
        collect, AppManifest, AppVersion, Archive, ArchiveBuilder, Category, CategorySizes,
        FileEntry, OffsetTable,
    };
    pub use hrpack_common::{crc, BinaryReader};
}

/// Summary of a completed pack.
#[derive(Debug, Clone)]
pub struct PackReport {
    /// Where the archive was written.
    pub output: PathBuf,
    /// Archive length in bytes.
    pub len: usize,
    /// CRC32C of the payload.
    pub checksum: u32,
    /// Number of files packed.
    pub file_count: usize,
    /// Aggregate size per category.
    pub sizes: CategorySizes,
}

/// Pack the app tree at `root` into a single archive.
///
/// When `output` is `None` the archive is named after the first packed file
/// and written to the current directory. An existing file of that name is
/// replaced (with a warning logged), so packing from a directory that holds
/// a file called e.g. `main.bin` overwrites it. Nothing is written unless the
/// whole archive was built successfully.
pub fn pack(root: impl AsRef<Path>, output: Option<&Path>) -> Result<PackReport> {
    let root = root.as_ref();

    let manifest = AppManifest::load(root)?;
    let version = manifest.app_version()?;
    info!(
        root = %root.display(),
        %version,
        identifier = manifest.identifier.as_deref().unwrap_or("-"),
        "packing app"
    );

    let assets = collect(root, &Category::ALL)?;
    let archive = ArchiveBuilder::from_assets(&assets, version).build()?;

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let path =
                PathBuf::from(default_output_name(&assets.files).ok_or(Error::NoOutputName)?);
            if path.exists() {
                warn!(output = %path.display(), "replacing existing file with default output name");
            }
            path
        }
    };
    write_atomic(&output, archive.bytes())?;
    info!(output = %output.display(), "wrote archive");

    Ok(PackReport {
        output,
        len: archive.len(),
        checksum: archive.checksum(),
        file_count: assets.files.len(),
        sizes: assets.sizes,
    })
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

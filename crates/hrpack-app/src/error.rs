//! Error types for watch app packing.

use std::path::PathBuf;

use thiserror::Error;

use crate::Category;

/// Errors that can occur while packing a watch app.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] hrpack_common::Error),

    /// A required input directory does not exist.
    #[error("missing directory: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// `app.json` is absent from the app root.
    #[error("missing manifest: {}", .0.display())]
    MissingManifest(PathBuf),

    /// `app.json` exists but could not be parsed.
    #[error("invalid manifest {}: {source}", path.display())]
    InvalidManifest {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Version string is not `X.Y.Z` with components in 0..=255.
    #[error("invalid version {0:?}: expected three dot-separated numbers in 0..=255")]
    InvalidVersion(String),

    /// A file or directory could not be read.
    #[error("cannot read {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A file name is not valid UTF-8.
    #[error("file name is not valid UTF-8: {}", .0.display())]
    NonUtf8Filename(PathBuf),

    /// A file name does not fit the single-byte length prefix.
    #[error("file name too long ({len} bytes, max 254): {name}")]
    FilenameTooLong { name: String, len: usize },

    /// File contents do not fit the two-byte size field.
    #[error("file too large ({size} bytes, max 65535): {name}")]
    SizeOverflow { name: String, size: usize },

    /// The offset table does not fit in 32-bit fields.
    #[error("archive too large: {0} bytes exceeds 32-bit offsets")]
    ArchiveTooLarge(u64),

    /// A category's declared size disagrees with its encoded entries.
    #[error("{category} declares {declared} bytes but its entries encode {actual}")]
    InconsistentSizes {
        category: Category,
        declared: u64,
        actual: u64,
    },

    /// A file comes after a file of a later category.
    #[error("{name} ({category}) follows a {previous} file; files must be grouped in category order")]
    MisorderedFile {
        name: String,
        category: Category,
        previous: Category,
    },

    /// No output path was given and there is no file to name the archive after.
    #[error("no output path given and the app has no files to name it after")]
    NoOutputName,

    /// Writing the archive failed.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for packing operations.
pub type Result<T> = std::result::Result<T, Error>;

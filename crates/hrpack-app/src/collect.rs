//! Asset collection from an app directory tree.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{Category, CategorySizes, Error, FileEntry, Result, MAX_FILENAME_LEN};

/// Directory under the app root that holds one subdirectory per category.
pub const FILES_DIR: &str = "files";

/// Files gathered from an app tree, ready for the archive builder.
#[derive(Debug, Clone, Default)]
pub struct CollectedAssets {
    /// Files ordered by category, then by file name bytes.
    pub files: Vec<FileEntry>,
    /// Aggregate encoded size per category.
    pub sizes: CategorySizes,
}

impl CollectedAssets {
    /// Files belonging to one category, in archive order.
    pub fn files_in(&self, category: Category) -> impl Iterator<Item = &FileEntry> {
        self.files.iter().filter(move |f| f.category == category)
    }
}

/// Read every file under `<root>/files/<category>/` for each of `categories`.
///
/// Categories are visited in the order given and files within a category in
/// byte-wise name order. Contents of null-terminated categories get a
/// trailing `0x00`. Entries that are not regular files are skipped.
pub fn collect<P: AsRef<Path>>(root: P, categories: &[Category]) -> Result<CollectedAssets> {
    let files_dir = root.as_ref().join(FILES_DIR);
    let mut assets = CollectedAssets::default();

    for &category in categories {
        let dir = files_dir.join(category.dir_name());
        if !dir.is_dir() {
            return Err(Error::MissingDirectory(dir));
        }

        for (filename, path) in list_category(&dir)? {
            let mut contents = fs::read(&path).map_err(|source| Error::UnreadableFile {
                path: path.clone(),
                source,
            })?;
            if category.null_terminated() {
                contents.push(0);
            }

            debug!(%category, %filename, size = contents.len(), "collected file");
            assets.sizes.add_file(category, &filename, contents.len());
            assets.files.push(FileEntry::new(category, filename, contents));
        }

        info!(%category, size = assets.sizes.get(category), "collected category");
    }

    Ok(assets)
}

/// List the regular files directly inside `dir`, sorted by name bytes.
fn list_category(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut found = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
            Error::UnreadableFile {
                path,
                source: e.into(),
            }
        })?;

        if !entry.file_type().is_file() {
            warn!(path = %entry.path().display(), "skipping non-regular entry");
            continue;
        }

        let filename = entry
            .file_name()
            .to_str()
            .ok_or_else(|| Error::NonUtf8Filename(entry.path().to_path_buf()))?
            .to_string();
        if filename.len() > MAX_FILENAME_LEN {
            return Err(Error::FilenameTooLong {
                len: filename.len(),
                name: filename,
            });
        }

        found.push((filename, entry.into_path()));
    }

    found.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
    Ok(found)
}

//! Asset categories and their aggregate sizes.

use std::fmt;

use crate::entry::ENTRY_OVERHEAD;

/// One of the five asset classes of a watch app.
///
/// The declaration order is the traversal order of `files/` and the layout
/// order inside the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Compiled app code.
    Code,
    /// Image assets.
    Icons,
    /// Layout descriptions.
    Layout,
    /// Display name (and theme class) strings.
    DisplayName,
    /// Configuration documents.
    Config,
}

impl Category {
    /// All categories in archive order.
    pub const ALL: [Category; 5] = [
        Category::Code,
        Category::Icons,
        Category::Layout,
        Category::DisplayName,
        Category::Config,
    ];

    /// Name of the category's directory under `files/`.
    pub const fn dir_name(self) -> &'static str {
        match self {
            Category::Code => "code",
            Category::Icons => "icons",
            Category::Layout => "layout",
            Category::DisplayName => "display_name",
            Category::Config => "config",
        }
    }

    /// Whether file contents in this category get a trailing `0x00`.
    pub const fn null_terminated(self) -> bool {
        matches!(
            self,
            Category::Layout | Category::DisplayName | Category::Config
        )
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.dir_name())
    }
}

/// Aggregate encoded size of each category's entries.
///
/// A file contributes `size + len(filename) + 4`, which is exactly the
/// number of bytes its entry takes in the archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategorySizes {
    sizes: [u64; 5],
}

impl CategorySizes {
    /// Create an empty size map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate size of one category.
    pub fn get(&self, category: Category) -> u64 {
        self.sizes[category.index()]
    }

    /// Account for one file of `size` content bytes named `filename`.
    pub fn add_file(&mut self, category: Category, filename: &str, size: usize) {
        self.sizes[category.index()] += (size + filename.len() + ENTRY_OVERHEAD) as u64;
    }

    /// Sum over all categories.
    pub fn total(&self) -> u64 {
        self.sizes.iter().sum()
    }

    /// Iterate `(category, size)` pairs in archive order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        Category::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

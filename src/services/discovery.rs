//! File-system discovery for asset categories.
//!
//! Each enabled category gets a fresh [`DiscoveredFileIndex`] per build: the immediate
//! entries of every search directory, keyed by file name and mapped to their path
//! relative to the library root. Nothing is cached between builds since the library's
//! on-disk contents are build input.

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::fs;

use super::resolver::ResolveError;
use crate::models::{ASSET_CATALOG, AssetCategory, OptionKey};

/// Insertion-ordered index of the files available for one category.
///
/// When the same file name appears in several search directories the later
/// directory wins; the entry keeps the position where it was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredFileIndex {
    entries: IndexMap<String, Utf8PathBuf>,
}

impl DiscoveredFileIndex {
    /// List every search directory of `category` under `library_root`.
    ///
    /// Entries within a directory are visited in file-name order so that the
    /// result does not depend on the platform's directory iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Discovery`] if a search directory cannot be read.
    pub fn discover(
        library_root: &Utf8Path,
        category: &AssetCategory,
    ) -> Result<Self, ResolveError> {
        let mut index = Self::default();

        for directory in category.search_directories {
            let relative_dir = Utf8Path::new(directory);
            let absolute_dir = library_root.join(relative_dir);

            let read_dir = fs::read_dir(&absolute_dir).map_err(|source| ResolveError::Discovery {
                directory: absolute_dir.clone(),
                source,
            })?;

            let mut file_names = Vec::new();
            for entry in read_dir {
                let entry = entry.map_err(|source| ResolveError::Discovery {
                    directory: absolute_dir.clone(),
                    source,
                })?;

                match entry.file_name().into_string() {
                    Ok(name) => file_names.push(name),
                    Err(raw) => {
                        tracing::warn!("Skipping non UTF-8 file name {:?} in {}", raw, absolute_dir);
                    }
                }
            }
            file_names.sort();

            for name in file_names {
                let path = relative_dir.join(&name);
                index.insert(name, path);
            }
        }

        tracing::debug!(
            "Discovered {} file(s) for {} in {:?}",
            index.len(),
            category.label,
            category.search_directories
        );

        Ok(index)
    }

    /// Build an index from `(file name, relative path)` pairs, applying the same
    /// last-wins rule as discovery.
    pub fn from_entries<I, N, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Into<Utf8PathBuf>,
    {
        let mut index = Self::default();
        for (name, path) in entries {
            index.insert(name.into(), path.into());
        }
        index
    }

    fn insert(&mut self, file_name: String, path: Utf8PathBuf) {
        if let Some(previous) = self.entries.insert(file_name, path) {
            tracing::trace!("Discovery overwrote {}", previous);
        }
    }

    /// Relative path of the file called exactly `file_name`.
    pub fn get(&self, file_name: &str) -> Option<&Utf8Path> {
        self.entries.get(file_name).map(Utf8PathBuf::as_path)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.entries.contains_key(file_name)
    }

    /// Every distinct bare name, in index order.
    ///
    /// Entries without a bare name (dotfiles) are left out.
    pub fn bare_names(&self) -> Vec<String> {
        self.entries
            .keys()
            .map(|file_name| bare_name(file_name))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Utf8Path)> {
        self.entries
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The names a category offers, as printed by `froala-assets list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListing {
    pub label: &'static str,
    pub file_extension: &'static str,
    /// Bare names in index order, flagged when a file with the category's extension exists
    pub names: Vec<(String, bool)>,
}

impl CategoryListing {
    pub fn new(category: &AssetCategory, index: &DiscoveredFileIndex) -> Self {
        let names = index
            .bare_names()
            .into_iter()
            .map(|name| {
                let has_file = index.contains(&format!("{}{}", name, category.file_extension));
                (name, has_file)
            })
            .collect();

        Self {
            label: category.label,
            file_extension: category.file_extension,
            names,
        }
    }
}

impl fmt::Display for CategoryListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}):", self.label, self.file_extension)?;
        for (name, has_file) in &self.names {
            let marker = if *has_file { "" } else { " (no matching file)" };
            writeln!(f, "  {}{}", name, marker)?;
        }
        Ok(())
    }
}

/// Discover every catalog category (or only those driven by `option`) for listing.
///
/// # Errors
///
/// Returns [`ResolveError::Discovery`] if a search directory cannot be read.
pub fn list_available(
    library_root: &Utf8Path,
    option: Option<OptionKey>,
) -> Result<Vec<CategoryListing>, ResolveError> {
    ASSET_CATALOG
        .iter()
        .filter(|category| option.is_none_or(|key| category.option == key))
        .map(|category| {
            let index = DiscoveredFileIndex::discover(library_root, category)?;
            Ok(CategoryListing::new(category, &index))
        })
        .collect()
}

/// File name up to its first `.` (`table.min.js` → `table`).
pub fn bare_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

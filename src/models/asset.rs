use camino::Utf8PathBuf;
use serde::Serialize;

use super::options::OptionKey;

/// Core editor script, always registered first.
pub const CORE_SCRIPT: &str = "js/froala_editor.min.js";

/// Core editor stylesheets, always registered after the script.
pub const CORE_STYLESHEETS: [&str; 2] = ["css/froala_editor.css", "css/froala_style.css"];

/// Static description of one kind of bundleable asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetCategory {
    /// Human-readable label used in error messages
    pub label: &'static str,

    /// Option key whose selector drives this category
    pub option: OptionKey,

    /// Directories under the library root, in discovery order
    pub search_directories: &'static [&'static str],

    /// Extension appended to a requested name to find its file
    pub file_extension: &'static str,

    /// Missing files are dropped instead of aborting the build
    pub optional: bool,
}

/// Every category, in registration order.
///
/// Plugin stylesheets share the `plugins` selector with plugin scripts but are
/// best-effort: not every plugin ships a stylesheet.
pub const ASSET_CATALOG: [AssetCategory; 4] = [
    AssetCategory {
        label: "Plugin(s)",
        option: OptionKey::Plugins,
        search_directories: &["js/plugins", "js/third_party"],
        file_extension: ".min.js",
        optional: false,
    },
    AssetCategory {
        label: "Plugin CSS",
        option: OptionKey::Plugins,
        search_directories: &["css/plugins", "css/third_party"],
        file_extension: ".css",
        optional: true,
    },
    AssetCategory {
        label: "Language(s)",
        option: OptionKey::Languages,
        search_directories: &["js/languages"],
        file_extension: ".js",
        optional: false,
    },
    AssetCategory {
        label: "Themes(s)",
        option: OptionKey::Themes,
        search_directories: &["css/themes"],
        file_extension: ".css",
        optional: false,
    },
];

impl AssetCategory {
    /// Look up a catalog entry by its label.
    pub fn by_label(label: &str) -> Option<&'static AssetCategory> {
        ASSET_CATALOG.iter().find(|category| category.label == label)
    }

    /// Catalog entries driven by `option`.
    pub fn for_option(option: OptionKey) -> impl Iterator<Item = &'static AssetCategory> {
        ASSET_CATALOG
            .iter()
            .filter(move |category| category.option == option)
    }
}

/// Outcome of resolving a single category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionResult {
    /// Prefixed paths, in expansion order
    pub resolved_paths: Vec<Utf8PathBuf>,

    /// Requested names with no matching file
    pub missing: Vec<String>,
}

/// One file handed to the import sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub category: String,
    pub path: Utf8PathBuf,
}

impl Registration {
    pub fn new(category: impl Into<String>, path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            category: category.into(),
            path: path.into(),
        }
    }
}

use camino::Utf8PathBuf;
use serde_yaml_ng::Value;
use thiserror::Error;

use super::discovery::DiscoveredFileIndex;
use super::import::ImportPlan;
use crate::metrics::BuildMetrics;
use crate::models::{
    ASSET_CATALOG, AssetCategory, CORE_SCRIPT, CORE_STYLESHEETS, EffectiveConfig,
    ResolutionResult, Selector, Settings,
};

/// Errors that abort asset resolution
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(
        "{addon}: {label} option in the build configuration is an invalid type, \
         ensure it is either a boolean (all or none), string (just one), or array (specific list)"
    )]
    InvalidSelectorType { addon: String, label: String },

    #[error(
        "{addon}: {label} specified in the build configuration are missing, \
         make sure they are spelled correctly ({})",
        .missing.join(", ")
    )]
    MissingRequiredAssets {
        addon: String,
        label: String,
        missing: Vec<String>,
    },

    #[error("Failed to read asset directory {directory}: {source}")]
    Discovery {
        directory: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Maps an [`EffectiveConfig`] onto the concrete list of library files to bundle.
///
/// The resolver reads the library from `library_root` and prefixes every
/// registered library file with `import_prefix`. Resolution is all-or-nothing:
/// [`resolve`](Self::resolve) either returns the complete [`ImportPlan`] or the
/// first fatal error, and nothing is registered on failure.
#[derive(Debug)]
pub struct AssetResolver {
    addon: String,
    library_root: Utf8PathBuf,
    import_prefix: Utf8PathBuf,
    shim_path: Utf8PathBuf,
    fastboot: bool,
    metrics: BuildMetrics,
}

impl AssetResolver {
    pub fn new(addon: impl Into<String>, settings: &Settings) -> Self {
        Self {
            addon: addon.into(),
            library_root: settings.library_root.clone(),
            import_prefix: settings.import_prefix.clone(),
            shim_path: settings.shim_path.clone(),
            fastboot: settings.fastboot,
            metrics: BuildMetrics::new(),
        }
    }

    /// Override the server-side-rendering flag taken from settings.
    pub fn with_fastboot(mut self, fastboot: bool) -> Self {
        self.fastboot = fastboot;
        self
    }

    pub fn metrics(&self) -> &BuildMetrics {
        &self.metrics
    }

    /// Resolve every category into an ordered [`ImportPlan`].
    ///
    /// The plan always starts with the core script, the core stylesheets and the
    /// shim. In fastboot mode nothing else is added.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::InvalidSelectorType`] if an option value has an unsupported shape
    /// - [`ResolveError::MissingRequiredAssets`] if a required category lacks requested files
    /// - [`ResolveError::Discovery`] if a search directory cannot be read
    pub fn resolve(&self, config: &EffectiveConfig) -> Result<ImportPlan, ResolveError> {
        let mut plan = ImportPlan::new();

        plan.push("Core", self.import_prefix.join(CORE_SCRIPT));
        for stylesheet in CORE_STYLESHEETS {
            plan.push("Core", self.import_prefix.join(stylesheet));
        }
        plan.push("Shim", self.shim_path.clone());

        if self.fastboot {
            tracing::info!("Fastboot mode, skipping plugins, languages and themes");
            for _ in ASSET_CATALOG.iter() {
                self.metrics.record_category_skipped();
            }
            return Ok(plan);
        }

        for category in ASSET_CATALOG.iter() {
            match self.resolve_category(category, config.value(category.option))? {
                Some(result) => {
                    for path in result.resolved_paths {
                        plan.push(category.label, path);
                    }
                }
                None => self.metrics.record_category_skipped(),
            }
        }

        tracing::info!("Resolved {} import(s)", plan.registrations().len());
        Ok(plan)
    }

    /// Resolve a single category against its raw option value.
    ///
    /// Returns `Ok(None)` when the selector is disabled; no discovery happens in
    /// that case.
    pub fn resolve_category(
        &self,
        category: &AssetCategory,
        value: &Value,
    ) -> Result<Option<ResolutionResult>, ResolveError> {
        let selector =
            Selector::from_value(value).ok_or_else(|| ResolveError::InvalidSelectorType {
                addon: self.addon.clone(),
                label: category.label.to_string(),
            })?;

        if selector.is_disabled() {
            tracing::debug!("{} not requested", category.label);
            return Ok(None);
        }

        let index = DiscoveredFileIndex::discover(&self.library_root, category)?;
        self.metrics.record_files_discovered(index.len());

        let result = self.validate(category, &index, &selector);

        if !result.missing.is_empty() {
            if !category.optional {
                return Err(ResolveError::MissingRequiredAssets {
                    addon: self.addon.clone(),
                    label: category.label.to_string(),
                    missing: result.missing,
                });
            }
            tracing::debug!(
                "{}: {} optional file(s) not shipped",
                category.label,
                result.missing.len()
            );
            self.metrics.record_optional_misses(result.missing.len());
        }

        Ok(Some(result))
    }

    /// Expand `selector` against `index` and look up every requested name.
    pub fn validate(
        &self,
        category: &AssetCategory,
        index: &DiscoveredFileIndex,
        selector: &Selector,
    ) -> ResolutionResult {
        let requested = match selector {
            Selector::Disabled => return ResolutionResult::default(),
            Selector::All => index.bare_names(),
            Selector::Named(names) => names.clone(),
        };

        let mut result = ResolutionResult::default();
        for name in requested {
            let file_name = format!("{}{}", name, category.file_extension);
            match index.get(&file_name) {
                Some(relative) => result.resolved_paths.push(self.import_prefix.join(relative)),
                None => result.missing.push(name),
            }
        }

        result
    }
}

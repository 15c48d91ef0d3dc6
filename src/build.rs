//! One build pass: version gate, option merge, asset resolution, registration.

use thiserror::Error;

use crate::models::{BuildManifest, EffectiveConfig, Settings};
use crate::services::{
    AssetResolver, ConfigMerger, ImportPlan, ImportSink, ResolveError, VersionGate,
    VersionGateError,
};

/// Errors that abort a build pass
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    VersionGate(#[from] VersionGateError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Everything a successful build pass produced.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub config: EffectiveConfig,
    pub plan: ImportPlan,
    /// Set when `plugins` was not declared anywhere in the chain
    pub deprecation: Option<String>,
}

/// Run a complete build pass and register the resolved imports with `sink`.
///
/// Nothing is registered unless every step succeeds. The manifest's `fastboot`
/// flag, when present, overrides the settings value.
///
/// # Errors
///
/// - [`BuildError::VersionGate`] if host tooling is too old or missing
/// - [`BuildError::Resolve`] if an option is malformed or required files are missing
pub fn run_build(
    manifest: &BuildManifest,
    settings: &Settings,
    sink: &mut dyn ImportSink,
) -> Result<BuildOutcome, BuildError> {
    VersionGate::host_tooling(&manifest.addon).check(&manifest.host_versions)?;

    let config = ConfigMerger::new(&manifest.addon).merge_chain(&manifest.consumers);
    let deprecation = config.deprecation_notice(&manifest.addon);

    let fastboot = manifest.fastboot.unwrap_or(settings.fastboot);
    let resolver = AssetResolver::new(&manifest.addon, settings).with_fastboot(fastboot);
    let plan = resolver.resolve(&config)?;

    let registered = plan.register_all(sink);
    resolver.metrics().record_imports_registered(registered);
    resolver.metrics().log_summary();

    Ok(BuildOutcome {
        config,
        plan,
        deprecation,
    })
}

//! Option merging across the consumer chain.
//!
//! A project that embeds the addon may itself be embedded by another project, so
//! options can be declared at any level. The chain adapter
//! ([`ConsumerChain::option_blocks`]) extracts the declared blocks from the current
//! level up to the root; [`merge_option_blocks`] folds them with shallow key
//! overwrite so the root application's declarations always win.

use serde_yaml_ng::Mapping;

use crate::models::{ConsumerChain, EffectiveConfig, OptionKey};

/// Merges the declared option blocks of a consumer chain into an [`EffectiveConfig`].
#[derive(Debug, Clone)]
pub struct ConfigMerger {
    addon: String,
}

impl ConfigMerger {
    pub fn new(addon: impl Into<String>) -> Self {
        Self {
            addon: addon.into(),
        }
    }

    /// Merge every block the chain declares for this addon.
    pub fn merge_chain(&self, chain: &ConsumerChain) -> EffectiveConfig {
        let blocks = chain.option_blocks(&self.addon);
        tracing::debug!(
            "Merging {} option block(s) from {} consumer level(s)",
            blocks.len(),
            chain.len()
        );
        self.merge_blocks(&blocks)
    }

    /// Merge blocks ordered from the current level to the root.
    ///
    /// Does not report the `plugins` deprecation itself; callers read it from
    /// [`EffectiveConfig::deprecation_notice`] and surface it once.
    pub fn merge_blocks(&self, blocks: &[&Mapping]) -> EffectiveConfig {
        let config = merge_option_blocks(&EffectiveConfig::defaults(), blocks);
        tracing::debug!(
            "Merged options for {} (plugins declared: {})",
            self.addon,
            config.plugins_declared()
        );
        config
    }
}

/// Fold `blocks` onto `defaults`, later blocks overwriting earlier keys.
///
/// Never fails: value shapes are checked by the resolver.
pub fn merge_option_blocks(defaults: &Mapping, blocks: &[&Mapping]) -> EffectiveConfig {
    let mut effective = defaults.clone();
    let mut plugins_declared = false;

    for block in blocks {
        for (key, value) in block.iter() {
            if key.as_str() == Some(OptionKey::Plugins.as_str()) {
                plugins_declared = true;
            }
            effective.insert(key.clone(), value.clone());
        }
    }

    EffectiveConfig::from_merged(effective, plugins_declared)
}

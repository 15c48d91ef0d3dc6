//! Data models for froala-assets.
//!
//! This module contains the core data structures shared by the merger and the resolver:
//! - [`BuildManifest`]: The consumer chain and host tooling versions loaded from `froala-build.yaml`
//! - [`ConsumerChain`] / [`ConsumerNode`]: Every nesting level that may declare addon options
//! - [`Settings`]: Layered tool settings (library root, import prefix, fastboot flag, logging)
//! - [`EffectiveConfig`]: The single merged option set produced once per build
//! - [`Selector`]: The classified form of a category's option value
//! - [`AssetCategory`] / [`ASSET_CATALOG`]: The static description of what can be bundled
//!
//! # Architecture Note
//!
//! The models are designed to be:
//! - **Serializable**: Manifest and settings derive `Serialize`/`Deserialize` for YAML persistence
//! - **Immutable**: An [`EffectiveConfig`] is never mutated once the merger returns it
//! - **Static where possible**: The catalog is compiled in, only the consumer chain is build input

pub mod asset;
pub mod config;
pub mod options;

pub use asset::{
    ASSET_CATALOG, AssetCategory, CORE_SCRIPT, CORE_STYLESHEETS, Registration, ResolutionResult,
};
pub use config::{BuildManifest, ConsumerChain, ConsumerNode, HostApp, Settings};
pub use options::{EffectiveConfig, OptionKey, Selector};

// froala-assets - Build-time option merging and asset resolution for the Froala Editor
//
// This is the library crate containing the merger, the resolver and their data structures.
// The binary crate (main.rs) provides the command-line entry point.

pub mod build;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use build::{BuildError, BuildOutcome, run_build};
pub use config::ConfigManager;
pub use models::{BuildManifest, ConsumerChain, ConsumerNode, EffectiveConfig, Selector, Settings};
pub use services::{AssetResolver, ConfigMerger, ImportPlan, ImportSink, ResolveError};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Name the addon's option blocks are declared under
pub const DEFAULT_ADDON_NAME: &str = "ember-froala-editor";

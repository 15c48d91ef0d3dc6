//! Services module - Pure build-time logic for resolving editor assets.
//!
//! This module contains the core of froala-assets: merging the addon options declared
//! across a consumer chain and turning them into the concrete list of library files to
//! bundle. The services have no knowledge of how the manifest was loaded or where the
//! resulting imports go, making them testable against plain data and temp directories.
//!
//! # Components
//!
//! - [`ConfigMerger`]: Folds option blocks from the current consumer up to the root
//!   application, root-most declaration winning, and records whether `plugins` was
//!   declared anywhere.
//!
//! - [`AssetResolver`]: For every catalog category whose selector is enabled:
//!   - Discovers candidate files ([`DiscoveredFileIndex`])
//!   - Expands `true` / a name / a list of names into requested files
//!   - Validates existence, failing on required categories ([`ResolveError`])
//!
//! - [`ImportPlan`] / [`ImportSink`]: The ordered registrations and the collaborator
//!   that receives them.
//!
//! - [`VersionGate`]: Asserts host tooling versions before anything else runs.
//!
//! # Usage Example
//!
//! ```ignore
//! use froala_assets::services::{AssetResolver, ConfigMerger, ImportRecorder};
//!
//! let config = ConfigMerger::new(&manifest.addon).merge_chain(&manifest.consumers);
//! let plan = AssetResolver::new(&manifest.addon, &settings).resolve(&config)?;
//!
//! let mut recorder = ImportRecorder::new();
//! plan.register_all(&mut recorder);
//! ```
//!
//! # Execution Model
//!
//! Everything runs once per build, synchronously and to completion. Discovery reads the
//! library eagerly and is never cached; the first fatal error aborts the whole build.

pub mod discovery;
pub mod import;
pub mod merge;
pub mod resolver;
pub mod version_gate;

pub use discovery::{CategoryListing, DiscoveredFileIndex, bare_name, list_available};
pub use import::{ImportPlan, ImportRecorder, ImportSink};
pub use merge::{ConfigMerger, merge_option_blocks};
pub use resolver::{AssetResolver, ResolveError};
pub use version_gate::{VersionGate, VersionGateError, VersionRequirement};

use camino::Utf8PathBuf;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml_ng::Mapping;

use crate::DEFAULT_ADDON_NAME;

/// Build manifest from froala-build.yaml
///
/// Describes the consumer chain that embeds the addon and the host tooling
/// versions checked by the version gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildManifest {
    /// Addon name, used as the key of every declared option block
    #[serde(default = "default_addon_name")]
    pub addon: String,

    /// Server-side-rendering marker; overrides the settings value when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fastboot: Option<bool>,

    /// Installed host tooling versions (e.g. `ember-cli: 3.28.0`)
    #[serde(default)]
    pub host_versions: IndexMap<String, String>,

    /// Nesting levels, the consumer that directly includes the addon first
    #[serde(default)]
    pub consumers: ConsumerChain,
}

impl Default for BuildManifest {
    fn default() -> Self {
        let mut host_versions = IndexMap::new();
        host_versions.insert("ember-cli".to_string(), "3.28.0".to_string());
        host_versions.insert("ember-source".to_string(), "3.28.0".to_string());

        Self {
            addon: default_addon_name(),
            fastboot: None,
            host_versions,
            consumers: ConsumerChain::new(vec![ConsumerNode {
                name: "app".to_string(),
                options: None,
                app: Some(HostApp::default()),
            }]),
        }
    }
}

fn default_addon_name() -> String {
    DEFAULT_ADDON_NAME.to_string()
}

/// Host application attached to a consumer level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostApp {
    /// Option blocks keyed by addon name
    #[serde(default)]
    pub options: Mapping,
}

/// One level of the nesting chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumerNode {
    pub name: String,

    /// Option blocks declared by this level itself, keyed by addon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Mapping>,

    /// Present when this level is (or is directly owned by) the host application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<HostApp>,
}

impl ConsumerNode {
    /// Option block this level exposes for `addon`.
    ///
    /// A level with a host application reads the application's options,
    /// otherwise its own. Blocks that are not mappings are ignored.
    pub fn declared_block(&self, addon: &str) -> Option<&Mapping> {
        let source = match &self.app {
            Some(app) => Some(&app.options),
            None => self.options.as_ref(),
        }?;

        let block = source.get(addon)?;
        match block.as_mapping() {
            Some(mapping) => Some(mapping),
            None => {
                tracing::warn!(
                    "Ignoring non-mapping '{}' options declared by '{}'",
                    addon,
                    self.name
                );
                None
            }
        }
    }
}

/// Ordered consumer levels, the current level first and the root last.
///
/// The parent of the node at index `i` is the node at `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsumerChain {
    nodes: Vec<ConsumerNode>,
}

impl ConsumerChain {
    pub fn new(nodes: Vec<ConsumerNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[ConsumerNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The outermost level (the host application).
    pub fn root(&self) -> Option<&ConsumerNode> {
        self.nodes.last()
    }

    pub fn parent_of(&self, index: usize) -> Option<&ConsumerNode> {
        self.nodes.get(index + 1)
    }

    /// Extract every declared option block, walking from the current level up to the root.
    ///
    /// The returned order is merge order: later blocks take precedence.
    pub fn option_blocks(&self, addon: &str) -> Vec<&Mapping> {
        self.nodes
            .iter()
            .filter_map(|node| node.declared_block(addon))
            .collect()
    }
}

/// Tool settings, layered from defaults, `froala-assets.yaml` and `FROALA_ASSETS_*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// On-disk location of the editor package that discovery reads from
    #[serde(default = "default_library_root")]
    pub library_root: Utf8PathBuf,

    /// Prefix joined onto every library file handed to the import sink
    #[serde(default = "default_import_prefix")]
    pub import_prefix: Utf8PathBuf,

    /// Static compatibility shim, registered verbatim
    #[serde(default = "default_shim_path")]
    pub shim_path: Utf8PathBuf,

    #[serde(default)]
    pub fastboot: bool,

    #[serde(default = "default_log_dir")]
    pub log_dir: Utf8PathBuf,

    #[serde(default)]
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            library_root: default_library_root(),
            import_prefix: default_import_prefix(),
            shim_path: default_shim_path(),
            fastboot: false,
            log_dir: default_log_dir(),
            debug: false,
        }
    }
}

fn default_library_root() -> Utf8PathBuf {
    Utf8PathBuf::from("node_modules").join("froala-editor")
}

fn default_import_prefix() -> Utf8PathBuf {
    Utf8PathBuf::from("node_modules").join("froala-editor")
}

fn default_shim_path() -> Utf8PathBuf {
    Utf8PathBuf::from("vendor")
        .join("shims")
        .join("froala-editor.js")
}

fn default_log_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("logs")
}

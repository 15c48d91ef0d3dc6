use crate::models::{BuildManifest, Settings};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the build manifest inside a project directory
pub const MANIFEST_FILE: &str = "froala-build.yaml";

/// File name of the optional settings file inside a project directory
pub const SETTINGS_FILE: &str = "froala-assets.yaml";

/// Prefix of environment variables that override settings (e.g. `FROALA_ASSETS_FASTBOOT`)
pub const ENV_PREFIX: &str = "FROALA_ASSETS";

/// Configuration manager for the build manifest and tool settings.
///
/// Manages two files in the project directory:
/// - Build manifest (`froala-build.yaml`): Consumer chain, addon name, host tooling versions
/// - Settings (`froala-assets.yaml`): Library location, import prefix, fastboot, logging
#[derive(Debug, Clone)]
pub struct ConfigManager {
    project_dir: Utf8PathBuf,
    manifest_path: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager for the specified project directory.
    ///
    /// # Arguments
    /// * `project_dir` - Directory containing the manifest and settings files
    pub fn new<P: AsRef<Utf8Path>>(project_dir: P) -> Result<Self> {
        let project_dir = project_dir.as_ref().to_path_buf();

        if !project_dir.is_dir() {
            anyhow::bail!("Project directory not found: {}", project_dir);
        }

        Ok(Self {
            manifest_path: project_dir.join(MANIFEST_FILE),
            settings_path: project_dir.join(SETTINGS_FILE),
            project_dir,
        })
    }

    /// Use a manifest outside the project directory.
    pub fn with_manifest_path<P: AsRef<Utf8Path>>(mut self, manifest_path: P) -> Self {
        self.manifest_path = manifest_path.as_ref().to_path_buf();
        self
    }

    /// Load the build manifest.
    ///
    /// # Returns
    /// The loaded BuildManifest, or default if file doesn't exist
    pub fn load_manifest(&self) -> Result<BuildManifest> {
        if !self.manifest_path.exists() {
            tracing::warn!(
                "Build manifest not found at {}, using defaults",
                self.manifest_path
            );
            return Ok(BuildManifest::default());
        }

        let file_contents = fs::read_to_string(&self.manifest_path)
            .with_context(|| format!("Failed to read build manifest: {}", self.manifest_path))?;

        let manifest: BuildManifest = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse build manifest: {}", self.manifest_path))?;

        tracing::info!(
            "Loaded build manifest from {} ({} consumer level(s))",
            self.manifest_path,
            manifest.consumers.len()
        );
        Ok(manifest)
    }

    /// Save the build manifest.
    ///
    /// # Arguments
    /// * `manifest` - The BuildManifest to save
    pub fn save_manifest(&self, manifest: &BuildManifest) -> Result<()> {
        let yaml_string = serde_yaml_ng::to_string(manifest)
            .context("Failed to serialize build manifest to YAML")?;

        fs::write(&self.manifest_path, yaml_string)
            .with_context(|| format!("Failed to write build manifest: {}", self.manifest_path))?;

        tracing::info!("Saved build manifest to {}", self.manifest_path);
        Ok(())
    }

    /// Load tool settings.
    ///
    /// Layers, later winning: built-in defaults, `froala-assets.yaml` (if present),
    /// `FROALA_ASSETS_*` environment variables.
    pub fn load_settings(&self) -> Result<Settings> {
        self.load_settings_with_env(None)
    }

    /// Load tool settings, reading the environment layer from `env` instead of the
    /// process environment when given.
    pub fn load_settings_with_env(
        &self,
        env: Option<::config::Map<String, String>>,
    ) -> Result<Settings> {
        let settings: Settings = ::config::Config::builder()
            .add_source(::config::File::from(self.settings_path.as_std_path()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .with_context(|| format!("Failed to load settings: {}", self.settings_path))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        Ok(self.anchor(settings))
    }

    /// Resolve relative on-disk paths against the project directory.
    ///
    /// `import_prefix` and `shim_path` are bundle paths and stay relative.
    fn anchor(&self, mut settings: Settings) -> Settings {
        if settings.library_root.is_relative() {
            settings.library_root = self.project_dir.join(&settings.library_root);
        }
        if settings.log_dir.is_relative() {
            settings.log_dir = self.project_dir.join(&settings.log_dir);
        }
        settings
    }

    /// Get the project directory path.
    pub fn project_dir(&self) -> &Utf8Path {
        &self.project_dir
    }

    pub fn manifest_path(&self) -> &Utf8Path {
        &self.manifest_path
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}

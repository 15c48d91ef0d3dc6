//! Integration tests for ConfigManager and manifest handling
//!
//! These tests verify:
//! - Manifest loading, saving and defaults
//! - Consumer chain parsing (nested addons, host application options)
//! - Settings layering from froala-assets.yaml
//! - Merging a loaded chain into an EffectiveConfig

use camino::Utf8PathBuf;
use froala_assets::config::{MANIFEST_FILE, SETTINGS_FILE};
use froala_assets::services::ImportRecorder;
use froala_assets::{
    BuildError, BuildManifest, ConfigManager, ConfigMerger, DEFAULT_ADDON_NAME, ResolveError,
    run_build,
};
use serde_yaml_ng::Value;
use std::fs;
use tempfile::TempDir;

/// Stand-in for the process environment, scoped to one test.
fn environment(vars: &[(&str, &str)]) -> ::config::Map<String, String> {
    vars.iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn create_test_project_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let project_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, project_path)
}

const NESTED_MANIFEST: &str = r#"
addon: ember-froala-editor
host_versions:
  ember-cli: 3.28.0
  ember-source: 4.4.0
consumers:
  - name: editor-engine
    options:
      ember-froala-editor:
        plugins: [align, table]
        themes: gray
        toolbarInline: true
  - name: dummy-app
    app:
      options:
        ember-froala-editor:
          plugins: true
        some-other-addon:
          enabled: false
"#;

#[test]
fn test_create_config_manager() {
    let (_temp_dir, project_path) = create_test_project_dir();
    let manager = ConfigManager::new(&project_path).unwrap();

    assert_eq!(manager.project_dir(), &project_path);
    assert_eq!(manager.manifest_path(), project_path.join(MANIFEST_FILE));
    assert_eq!(manager.settings_path(), project_path.join(SETTINGS_FILE));
}

#[test]
fn test_load_default_manifest() {
    let (_temp_dir, project_path) = create_test_project_dir();
    let manager = ConfigManager::new(&project_path).unwrap();

    // Manifest file doesn't exist, should return defaults
    let manifest = manager.load_manifest().unwrap();

    assert_eq!(manifest.addon, DEFAULT_ADDON_NAME);
    assert!(manifest.fastboot.is_none());
    assert!(manifest.host_versions.contains_key("ember-cli"));
    assert!(manifest.host_versions.contains_key("ember-source"));
    assert_eq!(manifest.consumers.len(), 1);
}

#[test]
fn test_load_nested_manifest() {
    let (_temp_dir, project_path) = create_test_project_dir();
    fs::write(project_path.join(MANIFEST_FILE), NESTED_MANIFEST).unwrap();
    let manager = ConfigManager::new(&project_path).unwrap();

    let manifest = manager.load_manifest().unwrap();

    assert_eq!(manifest.consumers.len(), 2);
    assert_eq!(manifest.consumers.root().unwrap().name, "dummy-app");
    assert_eq!(manifest.consumers.parent_of(0).unwrap().name, "dummy-app");
    assert_eq!(manifest.host_versions["ember-source"], "4.4.0");
    assert_eq!(manifest.consumers.option_blocks(DEFAULT_ADDON_NAME).len(), 2);
}

#[test]
fn test_merge_loaded_manifest() {
    let (_temp_dir, project_path) = create_test_project_dir();
    fs::write(project_path.join(MANIFEST_FILE), NESTED_MANIFEST).unwrap();
    let manifest = ConfigManager::new(&project_path)
        .unwrap()
        .load_manifest()
        .unwrap();

    let config = ConfigMerger::new(&manifest.addon).merge_chain(&manifest.consumers);

    // The application's `plugins: true` wins over the engine's list
    assert_eq!(config.plugins(), &Value::Bool(true));
    assert_eq!(config.themes().as_str(), Some("gray"));
    assert_eq!(config.languages(), &Value::Bool(false));
    assert_eq!(config.extra().get("toolbarInline"), Some(&Value::Bool(true)));
    assert!(config.extra().get("enabled").is_none());
}

#[test]
fn test_save_and_load_manifest() {
    let (_temp_dir, project_path) = create_test_project_dir();
    let manager = ConfigManager::new(&project_path).unwrap();

    let mut manifest = BuildManifest::default();
    manifest.addon = "my-froala-wrapper".to_string();
    manifest
        .host_versions
        .insert("ember-cli".to_string(), "5.0.0".to_string());

    manager.save_manifest(&manifest).unwrap();
    let loaded = manager.load_manifest().unwrap();

    assert_eq!(loaded.addon, "my-froala-wrapper");
    assert_eq!(loaded.host_versions["ember-cli"], "5.0.0");
    assert_eq!(loaded, manifest);
}

#[test]
fn test_manifest_outside_project_dir() {
    let (_temp_dir, project_path) = create_test_project_dir();
    let (_other_dir, other_path) = create_test_project_dir();
    let manifest_path = other_path.join("custom.yaml");
    fs::write(&manifest_path, NESTED_MANIFEST).unwrap();

    let manager = ConfigManager::new(&project_path)
        .unwrap()
        .with_manifest_path(&manifest_path);

    assert_eq!(manager.load_manifest().unwrap().consumers.len(), 2);
}

#[test]
fn test_invalid_manifest_reports_path() {
    let (_temp_dir, project_path) = create_test_project_dir();
    fs::write(project_path.join(MANIFEST_FILE), "consumers: [unterminated").unwrap();
    let manager = ConfigManager::new(&project_path).unwrap();

    let err = manager.load_manifest().unwrap_err();
    assert!(format!("{err:#}").contains(MANIFEST_FILE));
}

#[test]
fn test_default_settings_are_anchored() {
    let (_temp_dir, project_path) = create_test_project_dir();
    let manager = ConfigManager::new(&project_path).unwrap();

    let settings = manager.load_settings().unwrap();

    assert_eq!(
        settings.library_root,
        project_path.join("node_modules").join("froala-editor")
    );
    assert_eq!(settings.log_dir, project_path.join("logs"));
    assert_eq!(settings.import_prefix, Utf8PathBuf::from("node_modules/froala-editor"));
}

#[test]
fn test_settings_file_overrides_defaults() {
    let (_temp_dir, project_path) = create_test_project_dir();
    fs::write(
        project_path.join(SETTINGS_FILE),
        "library_root: /opt/froala-editor\nfastboot: true\nshim_path: vendor/froala-shim.js\n",
    )
    .unwrap();
    let manager = ConfigManager::new(&project_path).unwrap();

    let settings = manager.load_settings().unwrap();

    assert_eq!(settings.library_root, Utf8PathBuf::from("/opt/froala-editor"));
    assert!(settings.fastboot);
    assert_eq!(settings.shim_path, Utf8PathBuf::from("vendor/froala-shim.js"));
}

#[test]
fn test_environment_overrides_settings_file() {
    let (_temp_dir, project_path) = create_test_project_dir();
    fs::write(
        project_path.join(SETTINGS_FILE),
        "library_root: vendor/froala\nfastboot: false\n",
    )
    .unwrap();
    let manager = ConfigManager::new(&project_path).unwrap();

    let env = environment(&[
        ("FROALA_ASSETS_FASTBOOT", "true"),
        ("FROALA_ASSETS_LIBRARY_ROOT", "/nowhere/lib"),
    ]);
    let settings = manager.load_settings_with_env(Some(env)).unwrap();

    assert!(settings.fastboot);
    assert_eq!(settings.library_root, Utf8PathBuf::from("/nowhere/lib"));

    // Without matching variables the file values stand
    let settings = manager.load_settings_with_env(Some(environment(&[]))).unwrap();
    assert!(!settings.fastboot);
    assert_eq!(settings.library_root, project_path.join("vendor/froala"));
}

#[test]
fn test_environment_fastboot_yields_to_manifest() {
    let (_temp_dir, project_path) = create_test_project_dir();
    let manager = ConfigManager::new(&project_path).unwrap();
    let env = environment(&[
        ("FROALA_ASSETS_FASTBOOT", "true"),
        ("FROALA_ASSETS_LIBRARY_ROOT", "/nowhere/lib"),
    ]);
    let settings = manager.load_settings_with_env(Some(env)).unwrap();

    let mut manifest: BuildManifest = serde_yaml_ng::from_str(NESTED_MANIFEST).unwrap();
    assert!(manifest.fastboot.is_none());

    // Fastboot from the environment: only the base imports, the library is never read
    let mut recorder = ImportRecorder::new();
    run_build(&manifest, &settings, &mut recorder).unwrap();
    assert_eq!(recorder.paths().len(), 4);

    // The manifest turning fastboot off sends the build to the (missing) library
    manifest.fastboot = Some(false);
    let mut recorder = ImportRecorder::new();
    let err = run_build(&manifest, &settings, &mut recorder).unwrap_err();

    assert!(matches!(
        err,
        BuildError::Resolve(ResolveError::Discovery { ref directory, .. })
            if directory.as_str() == "/nowhere/lib/js/plugins"
    ));
    assert!(recorder.paths().is_empty());
}

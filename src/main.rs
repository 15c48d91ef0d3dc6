//! froala-assets - Build-time asset resolution for the Froala Editor
//!
//! Main entry point for the command-line tool.
//!
//! # Overview
//!
//! This binary wraps the library's single build pass. It initializes:
//! - Settings ([`ConfigManager::load_settings`]: defaults, `froala-assets.yaml`, `FROALA_ASSETS_*`)
//! - Logging infrastructure (file rotation + optional stderr output)
//! - The build manifest ([`ConfigManager::load_manifest`])
//!
//! # Execution Flow (`resolve`)
//!
//! 1. Load settings and start logging → logs/froala-assets.<date>
//! 2. Load `froala-build.yaml` (consumer chain, host tooling versions)
//! 3. Assert host tooling versions
//! 4. Merge option blocks up the consumer chain
//! 5. Resolve plugins / languages / themes against the library on disk
//! 6. Print every registered import to stdout
//!
//! Any fatal error ends the process with a non-zero exit code and the message on stderr.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use froala_assets::models::{OptionKey, Settings};
use froala_assets::services::{ImportRecorder, list_available};
use froala_assets::{APP_NAME, BuildManifest, ConfigManager, VERSION};

#[derive(Parser)]
#[command(name = "froala-assets")]
#[command(about = "Resolve which Froala Editor assets a build should bundle", long_about = None)]
#[command(version)]
struct Cli {
    /// Project directory holding froala-build.yaml and froala-assets.yaml
    #[arg(long, global = true, default_value = ".")]
    project: Utf8PathBuf,

    /// Also log to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge options and print the imports to register
    Resolve {
        /// Path to the build manifest (defaults to <project>/froala-build.yaml)
        #[arg(long)]
        manifest: Option<Utf8PathBuf>,

        /// Override the on-disk location of the editor package
        #[arg(long)]
        library_root: Option<Utf8PathBuf>,

        /// Resolve as a server-side-rendering build
        #[arg(long)]
        fastboot: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Lines)]
        format: OutputFormat,
    },

    /// List the asset names available in the editor package
    List {
        /// Only list one option's categories
        #[arg(long, value_enum)]
        option: Option<OptionArg>,

        /// Override the on-disk location of the editor package
        #[arg(long)]
        library_root: Option<Utf8PathBuf>,
    },

    /// Write a template build manifest
    Init {
        /// Overwrite an existing manifest
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Lines,
    Yaml,
}

#[derive(Clone, Copy, ValueEnum)]
enum OptionArg {
    Plugins,
    Languages,
    Themes,
}

impl From<OptionArg> for OptionKey {
    fn from(arg: OptionArg) -> Self {
        match arg {
            OptionArg::Plugins => OptionKey::Plugins,
            OptionArg::Languages => OptionKey::Languages,
            OptionArg::Themes => OptionKey::Themes,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.project)?;
    let settings = config_manager.load_settings()?;

    let _guard = froala_assets::logging::setup_logging_with_console(
        &settings.log_dir,
        APP_NAME,
        settings.debug,
        cli.verbose,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    match cli.command {
        Commands::Resolve {
            manifest,
            library_root,
            fastboot,
            format,
        } => {
            let config_manager = match manifest {
                Some(path) => config_manager.with_manifest_path(path),
                None => config_manager,
            };
            let mut manifest = config_manager.load_manifest()?;
            if fastboot {
                manifest.fastboot = Some(true);
            }
            resolve(&manifest, with_library_root(settings, library_root), format)
        }
        Commands::List {
            option,
            library_root,
        } => list(&with_library_root(settings, library_root), option.map(OptionKey::from)),
        Commands::Init { force } => init(&config_manager, force),
    }
}

fn with_library_root(mut settings: Settings, library_root: Option<Utf8PathBuf>) -> Settings {
    if let Some(root) = library_root {
        settings.library_root = root;
    }
    settings
}

fn resolve(manifest: &BuildManifest, settings: Settings, format: OutputFormat) -> Result<()> {
    let mut recorder = ImportRecorder::new();
    let outcome = froala_assets::run_build(manifest, &settings, &mut recorder).map_err(|e| {
        tracing::error!("Build failed: {}", e);
        anyhow::Error::new(e)
    })?;

    if let Some(notice) = &outcome.deprecation {
        eprintln!("DEPRECATION: {}", notice);
    }

    match format {
        OutputFormat::Lines => {
            for path in recorder.paths() {
                println!("{}", path);
            }
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&outcome.plan)
                .context("Failed to serialize import plan to YAML")?;
            print!("{}", yaml);
        }
    }

    Ok(())
}

fn list(settings: &Settings, option: Option<OptionKey>) -> Result<()> {
    let listings = list_available(&settings.library_root, option)
        .with_context(|| format!("Failed to list assets under {}", settings.library_root))?;

    for listing in listings {
        print!("{}", listing);
    }

    Ok(())
}

fn init(config_manager: &ConfigManager, force: bool) -> Result<()> {
    if config_manager.manifest_path().exists() && !force {
        anyhow::bail!(
            "{} already exists, pass --force to overwrite",
            config_manager.manifest_path()
        );
    }

    config_manager.save_manifest(&BuildManifest::default())?;
    println!("Wrote {}", config_manager.manifest_path());
    Ok(())
}

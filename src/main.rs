#![forbid(unsafe_code)]

mod args_table;
mod batch;
mod binding;
mod catalog;
mod config;
mod constants;
mod document;
mod error;
mod gui;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::{Level as TraceLevel, info, warn};
use tracing_subscriber::FmtSubscriber;

use catalog::{Catalog, ModuleCategory, ModuleDescriptor};
use config::ToolSettings;
use constants::env::{ENABLE_SAVE, LOG_LEVEL};
use session::EditorSession;

#[derive(Parser)]
#[command(name = "lissa-config-tool", version, about = "Form editor for LiSSA trace-link pipeline configurations")]
struct App {
    /// Application root; relative paths and the templates directory hang off it
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Module catalog location (defaults to <root>/module_catalog.json)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Allow the editor to write exports to disk
    #[arg(long, global = true)]
    enable_save: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the editor window (default)
    Gui,
    /// Print a configuration after section repair and store normalization
    Show {
        path: PathBuf,
    },
    /// Normalize a configuration, writing it to a file or stdout
    Normalize {
        path: PathBuf,
        /// Destination (relative to the root); prints to stdout when omitted
        #[arg(long, short)]
        output: Option<String>,
    },
    /// Merge a JSON object of overrides into a configuration
    Merge {
        base: PathBuf,
        /// File holding the override object
        #[arg(long, conflicts_with = "json")]
        file: Option<PathBuf>,
        /// Override object given inline
        #[arg(long)]
        json: Option<String>,
        #[arg(long, short)]
        output: Option<String>,
    },
    /// List catalog modules, or show help for one module
    Catalog {
        /// Category slug, e.g. target-stores or classifier-modes
        category: Option<String>,
        /// Module name within the category
        module: Option<String>,
    },
    /// List base templates
    Templates,
    /// Write the req2req embedding batch, one configuration per dataset
    GenerateBatch {
        #[arg(long, default_value = batch::DEFAULT_OUTPUT_DIR)]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var(LOG_LEVEL)
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    let app = App::parse();
    let settings = ToolSettings::resolve(app.root, app.catalog, app.enable_save);

    match app.command.unwrap_or(Commands::Gui) {
        Commands::Gui => gui::run_gui(settings),
        Commands::Show { path } => {
            let session = open_session(settings, &path)?;
            print!("{}", session.preview());
            Ok(())
        }
        Commands::Normalize { path, output } => {
            let session = open_session(settings, &path)?;
            emit(&session, output.as_deref())
        }
        Commands::Merge { base, file, json, output } => {
            let overrides = match (file, json) {
                (Some(file), _) => std::fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read overrides from {}", file.display()))?,
                (None, Some(json)) => json,
                (None, None) => return Err(anyhow!("Provide overrides with --file or --json")),
            };
            let mut session = open_session(settings, &base)?;
            session.override_text = overrides;
            session.apply_overrides().context("Could not apply overrides")?;
            report_notes(&session);
            emit(&session, output.as_deref())
        }
        Commands::Catalog { category, module } => show_catalog(&settings, category.as_deref(), module.as_deref()),
        Commands::Templates => {
            let session = EditorSession::new(settings);
            let names = session.template_names();
            if names.is_empty() {
                warn!(dir = %session.settings().templates_dir.display(), "No templates found");
            }
            for name in names {
                println!("{name}");
            }
            Ok(())
        }
        Commands::GenerateBatch { out_dir } => {
            let out_dir = if out_dir.is_absolute() { out_dir } else { settings.app_root.join(out_dir) };
            let written = batch::generate(&out_dir)
                .with_context(|| format!("Failed to generate batch into {}", out_dir.display()))?;
            info!(count = written.len(), dir = %out_dir.display(), "Batch generation complete");
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}

fn open_session(settings: ToolSettings, path: &std::path::Path) -> Result<EditorSession> {
    let mut session = EditorSession::new(settings);
    session
        .import_file(path)
        .with_context(|| format!("Failed to load configuration {}", path.display()))?;
    report_notes(&session);
    Ok(session)
}

fn report_notes(session: &EditorSession) {
    for note in session.notes() {
        info!(note = %note, "Store configuration normalized");
    }
}

/// Write to `output` when given (requires saving to be enabled), else print
fn emit(session: &EditorSession, output: Option<&str>) -> Result<()> {
    match output {
        Some(output) => {
            let path = session.save_to(output).with_context(|| {
                format!("Failed to write {output} (saving needs --enable-save or {ENABLE_SAVE}=1)")
            })?;
            println!("{}", path.display());
        }
        None => print!("{}", session.preview()),
    }
    Ok(())
}

fn show_catalog(settings: &ToolSettings, category: Option<&str>, module: Option<&str>) -> Result<()> {
    let catalog = catalog::load_shared(&settings.catalog_path)
        .with_context(|| format!("Failed to load catalog {}", settings.catalog_path.display()))?;

    let Some(slug) = category else {
        for category in ModuleCategory::ALL {
            let names: Vec<&str> = catalog.descriptors(category).keys().map(String::as_str).collect();
            println!("{}: {}", category.slug(), names.join(", "));
        }
        let platforms: Vec<&str> = catalog.platforms().keys().map(String::as_str).collect();
        println!("classifier-platforms: {}", platforms.join(", "));
        return Ok(());
    };

    let category = ModuleCategory::from_slug(slug).ok_or_else(|| {
        let known: Vec<&str> = ModuleCategory::ALL.iter().map(|category| category.slug()).collect();
        anyhow!("Unknown category '{slug}' (expected one of: {})", known.join(", "))
    })?;
    let descriptors = catalog.descriptors(category);

    match module {
        None => {
            for (name, descriptor) in descriptors {
                match descriptor.description.as_deref() {
                    Some(description) if !description.is_empty() => println!("{name}: {description}"),
                    _ => println!("{name}"),
                }
            }
        }
        Some(name) => {
            let descriptor = descriptors
                .get(name)
                .ok_or_else(|| anyhow!("No module '{name}' in {slug}"))?;
            println!("{}", describe_module(catalog, descriptor));
        }
    }
    Ok(())
}

fn describe_module(catalog: &Catalog, descriptor: &ModuleDescriptor) -> String {
    let text = catalog::help::module_help_text(catalog, descriptor);
    if text.is_empty() { descriptor.name.clone() } else { text }
}

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use quilt_board::common::config::{self, Config};
use quilt_board::common::log;
use quilt_board::layout_engine::{LayoutEngine, WidgetCommand};
use quilt_board::model::migrate;
use quilt_board::model::store::{FileStore, LayoutStore};
use tracing::{error, warn};

#[derive(Parser)]
#[command(name = "quilt", about = "Inspect and maintain saved dashboard layouts")]
struct Cli {
    /// Path to the config file. Defaults to ~/.config/quilt/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the layout file. Defaults to ~/.quilt/layout.json.
    #[arg(long)]
    layout: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether the saved layout file can be loaded and migrated.
    Check,
    /// Print the widget table.
    Show,
    /// Auto-arrange all visible widgets and save the result.
    Arrange {
        /// Container width override in pixels.
        #[arg(long)]
        width: Option<f64>,
        /// Container height override in pixels.
        #[arg(long)]
        height: Option<f64>,
    },
    /// Reset the layout to the default widget set.
    Reset,
}

fn main() {
    log::init_logging();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        error!("{err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.unwrap_or_else(config::config_file);
    let config = Config::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    for issue in config.validate() {
        warn!("config: {issue}");
    }

    let store = FileStore::new(cli.layout.unwrap_or_else(config::layout_file));
    let mut settings = config.layout.clone();

    match cli.command {
        Command::Check => check(&store),
        Command::Show => {
            let engine = LayoutEngine::new(store, settings);
            print_table(&engine);
            Ok(())
        }
        Command::Arrange { width, height } => {
            if let Some(width) = width {
                settings.container.width = width;
            }
            if let Some(height) = height {
                settings.container.height = height;
            }
            let mut engine = LayoutEngine::new(store, settings);
            let response = engine.handle_command(&WidgetCommand::AutoArrange);
            println!("arranged {} widgets", response.changed.len());
            print_table(&engine);
            Ok(())
        }
        Command::Reset => {
            let mut engine = LayoutEngine::new(store, settings);
            let _ = engine.handle_command(&WidgetCommand::ResetLayout);
            println!("layout reset to defaults");
            Ok(())
        }
    }
}

fn check(store: &FileStore) -> anyhow::Result<()> {
    let Some(raw) = store.read()? else {
        println!("no layout file at {}", store.path().display());
        return Ok(());
    };
    let doc: serde_json::Value =
        serde_json::from_str(&raw).context("layout file is not valid JSON")?;
    let entries =
        migrate::migrate_entries(&doc).context("layout file is not a widget array")?;
    println!("layout file is valid: {} entries", entries.len());
    Ok(())
}

fn print_table(engine: &LayoutEngine<FileStore>) {
    for widget in engine.widgets() {
        let state = if widget.visible { "visible" } else { "hidden" };
        println!(
            "{:<18} {:>7}  x={:<6} y={:<6} w={:<6} h={:<6}  {}",
            widget.id,
            state,
            widget.frame.x,
            widget.frame.y,
            widget.frame.width,
            widget.frame.height,
            widget.title,
        );
    }
}

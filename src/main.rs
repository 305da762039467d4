#![forbid(unsafe_code)]

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level as TraceLevel, info, warn};
use tracing_subscriber::FmtSubscriber;

use chart_editor::constants;
use chart_editor::persistence::{self, JsonFileHost};
use chart_editor::{ChartEditor, DisplayArea, EditorConfig, PresentationMode};

#[derive(Parser, Debug)]
#[command(name = "chart-editor", version, about = "Headless editing of chart button layouts")]
struct Cli {
    /// Chart document (JSON)
    #[arg(long)]
    chart: PathBuf,

    /// Reference items and action buttons exported by the host (JSON)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Editor config (TOML); defaults to the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the chart and flag buttons outside their canvas
    Inspect,
    /// Set the canvas size; invalid values fall back to the minimum
    Resize {
        #[arg(long)]
        width: String,
        #[arg(long)]
        height: String,
    },
    /// Fit the canvas to a share of a display area
    Maximize {
        #[arg(long)]
        display_width: u32,
        #[arg(long)]
        display_height: u32,
        /// Use the compact embedded fractions
        #[arg(long)]
        embedded: bool,
    },
    /// Append a button with default settings
    Add {
        #[arg(long)]
        name: Option<String>,
    },
    /// Append an offset copy of a button
    Duplicate { id: String },
    /// Remove a button
    Delete { id: String },
    /// Show a button's resolved legend
    Legend { id: String },
}

fn init_tracing(config_level: &str) -> Result<()> {
    let level = std::env::var(constants::config::LOG_LEVEL_ENV)
        .unwrap_or_else(|_| config_level.to_string())
        .to_lowercase();
    let log_level = match level.as_str() {
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
    Ok(())
}

fn inspect(editor: &ChartEditor) {
    let canvas = editor.canvas();
    println!("{} ({}x{})", editor.name(), canvas.width, canvas.height);
    for button in editor.buttons().iter() {
        let link = button.linked_item.reference_id().unwrap_or(constants::link::LABEL_ONLY);
        let ok = button.geometry().satisfies_invariant(canvas);
        println!(
            "  {} \"{}\" [{:?} -> {}] at ({}, {}) {}x{}{}",
            button.id,
            button.name,
            button.kind,
            link,
            button.x,
            button.y,
            button.width,
            button.height,
            if ok { "" } else { "  OUT OF BOUNDS" }
        );
    }
    println!(
        "{} reference item(s), {} action button(s)",
        editor.catalog().reference_items().len(),
        editor.catalog().action_buttons().len()
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EditorConfig::load_from(path)?,
        None => EditorConfig::load()?,
    };
    init_tracing(&config.log_level)?;

    let chart = persistence::load_chart(&cli.chart)?;
    let catalog = persistence::load_catalog(cli.catalog.as_deref())?;
    let mut editor = ChartEditor::new(chart, Arc::new(catalog), config);

    match cli.command {
        Command::Inspect => {
            inspect(&editor);
            return Ok(());
        }
        Command::Resize { width, height } => {
            use chart_editor::Axis;
            editor.change_dimension(Axis::Width, &width);
            editor.commit_dimension(Axis::Width);
            editor.change_dimension(Axis::Height, &height);
            editor.commit_dimension(Axis::Height);
            let canvas = editor.canvas();
            info!(width = canvas.width, height = canvas.height, "Canvas resized");
        }
        Command::Maximize {
            display_width,
            display_height,
            embedded,
        } => {
            let mode = if embedded {
                PresentationMode::Embedded
            } else {
                PresentationMode::Full
            };
            editor.maximize_canvas(
                DisplayArea {
                    width: display_width,
                    height: display_height,
                },
                mode,
            );
        }
        Command::Add { name } => {
            let id = editor.add_button().id.clone();
            if let Some(name) = name {
                editor.update_properties(chart_editor::ButtonPatch {
                    name: Some(name),
                    ..Default::default()
                });
            }
            editor.save_properties();
            println!("{id}");
        }
        Command::Duplicate { id } => {
            if !editor.settings_click(&id) {
                bail!("No button with id '{id}'");
            }
            if let Some(copy) = editor.duplicate() {
                println!("{}", copy.id);
            }
        }
        Command::Delete { id } => {
            if !editor.settings_click(&id) {
                bail!("No button with id '{id}'");
            }
            editor.delete();
        }
        Command::Legend { id } => {
            if !editor.settings_click(&id) {
                bail!("No button with id '{id}'");
            }
            let entries = editor.legend_preview();
            if entries.is_empty() {
                warn!(button = %id, "Button has no linked legend");
            }
            for entry in entries {
                let marker = if entry.overridden { "*" } else { " " };
                println!("{marker} {}: {}", entry.key, entry.text);
            }
            editor.cancel_properties();
            return Ok(());
        }
    }

    let mut host = JsonFileHost::new(&cli.chart);
    editor.leave_editor(&mut host)?;
    Ok(())
}

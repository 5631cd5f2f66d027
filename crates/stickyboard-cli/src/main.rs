//! stickyboard CLI
//!
//! Command-line interface for stickyboard - a local-first sticky-notes board.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stickyboard_core::models::DATE_FORMAT;
use stickyboard_core::{
    open_backend, BackendKind, Color, Config, NewWidget, WidgetPatch, WidgetStore, STAMP_LABELS,
};

mod commands;
mod editor;
mod output;

use commands::theme::ThemeChange;
use commands::widget::ListFilter;
use commands::Board;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "stickyboard")]
#[command(about = "stickyboard - Local-first sticky notes with analytics")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log debug details
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the storage backend (sqlite, file, memory)
    #[arg(long, global = true)]
    backend: Option<BackendKind>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new widget
    #[command(alias = "create")]
    Add {
        /// Widget title
        title: String,
        /// Widget content
        #[arg(short, long)]
        content: Option<String>,
        /// Palette color (yellow, blue, green, pink, purple, orange)
        #[arg(long)]
        color: Option<Color>,
        /// Canvas X position
        #[arg(long, default_value_t = 50.0)]
        x: f64,
        /// Canvas Y position
        #[arg(long, default_value_t = 50.0)]
        y: f64,
        /// Markers to attach
        #[arg(short, long = "marker")]
        markers: Vec<String>,
    },
    /// List widgets in stacking order
    #[command(alias = "ls")]
    List {
        /// Only widgets created today
        #[arg(long, conflicts_with = "date")]
        today: bool,
        /// Only widgets created on this date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: Option<String>,
        /// Only widgets of this color
        #[arg(long)]
        color: Option<Color>,
        /// Only widgets carrying this marker
        #[arg(short, long)]
        marker: Option<String>,
        /// Only completed widgets
        #[arg(long, conflicts_with = "pending")]
        done: bool,
        /// Only pending widgets
        #[arg(long)]
        pending: bool,
    },
    /// List widgets created today
    Today,
    /// Show widget details
    Show {
        /// Widget ID (full ID or prefix)
        id: String,
    },
    /// Edit a widget (opens $EDITOR for the content when no flags are given)
    Edit {
        /// Widget ID (full ID or prefix)
        id: String,
        /// New title
        #[arg(short = 'T', long)]
        title: Option<String>,
        /// New content
        #[arg(short, long)]
        content: Option<String>,
        /// New color
        #[arg(long)]
        color: Option<Color>,
        /// Clear the stamp badge
        #[arg(long)]
        clear_stamp: bool,
    },
    /// Move a widget on the canvas
    Move {
        /// Widget ID (full ID or prefix)
        id: String,
        x: f64,
        y: f64,
    },
    /// Mark a widget as completed
    Done {
        /// Widget ID (full ID or prefix)
        id: String,
    },
    /// Mark a widget as pending
    Undone {
        /// Widget ID (full ID or prefix)
        id: String,
    },
    /// Flip a widget between completed and pending
    Toggle {
        /// Widget ID (full ID or prefix)
        id: String,
    },
    /// Toggle a stamp on a widget
    Stamp {
        /// Widget ID (full ID or prefix)
        id: String,
        /// Stamp label
        #[arg(value_parser = STAMP_LABELS)]
        label: String,
    },
    /// Replace a widget's markers
    Tag {
        /// Widget ID (full ID or prefix)
        id: String,
        /// Markers (none clears them all)
        markers: Vec<String>,
    },
    /// Delete a widget
    #[command(alias = "rm")]
    Delete {
        /// Widget ID (full ID or prefix)
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete every widget
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show board analytics
    #[command(alias = "analytics")]
    Stats {
        /// Only widgets created today
        #[arg(long)]
        today: bool,
    },
    /// Show or change the theme
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show status (storage, counts, theme)
    Status,
}

#[derive(Subcommand, Clone, Copy)]
enum ThemeCommands {
    /// Switch to dark mode
    Dark,
    /// Switch to light mode
    Light,
    /// Flip between dark and light
    Toggle,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, backend, default_color, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands work without opening the board
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let mut config = Config::load_with_cli_override(cli.config.as_ref())?;
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    init_logging(&config, cli.verbose);

    let mut board: Board = WidgetStore::open(open_backend(&config)?);

    match cli.command {
        Commands::Add {
            title,
            content,
            color,
            x,
            y,
            markers,
        } => {
            let fields = NewWidget::new(title)
                .content(content.unwrap_or_default())
                .color(color.unwrap_or(config.default_color))
                .at(x, y)
                .markers(markers);
            commands::widget::add(&mut board, fields, &output)
        }
        Commands::List {
            today,
            date,
            color,
            marker,
            done,
            pending,
        } => {
            let mut filter = ListFilter {
                date,
                color,
                marker,
                completed: match (done, pending) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            };
            if today {
                filter = filter.today();
            }
            commands::widget::list(&board, &filter, &output)
        }
        Commands::Today => {
            commands::widget::list(&board, &ListFilter::default().today(), &output)
        }
        Commands::Show { id } => commands::widget::show(&board, id, &output),
        Commands::Edit {
            id,
            title,
            content,
            color,
            clear_stamp,
        } => {
            let patch = WidgetPatch {
                title,
                content,
                color,
                stamp: if clear_stamp { Some(None) } else { None },
                ..WidgetPatch::default()
            };
            commands::widget::edit(&mut board, id, patch, &output)
        }
        Commands::Move { id, x, y } => commands::widget::move_to(&mut board, id, x, y, &output),
        Commands::Done { id } => commands::widget::set_completed(&mut board, id, Some(true), &output),
        Commands::Undone { id } => {
            commands::widget::set_completed(&mut board, id, Some(false), &output)
        }
        Commands::Toggle { id } => commands::widget::set_completed(&mut board, id, None, &output),
        Commands::Stamp { id, label } => commands::widget::stamp(&mut board, id, label, &output),
        Commands::Tag { id, markers } => commands::widget::tag(&mut board, id, markers, &output),
        Commands::Delete { id, yes } => commands::widget::delete(&mut board, id, yes, &output),
        Commands::Clear { yes } => commands::widget::clear(&mut board, yes, &output),
        Commands::Stats { today } => commands::stats::show(&board, today, &output),
        Commands::Theme { command } => {
            let change = command.map(|c| match c {
                ThemeCommands::Dark => ThemeChange::Dark,
                ThemeCommands::Light => ThemeChange::Light,
                ThemeCommands::Toggle => ThemeChange::Toggle,
            });
            commands::theme::theme(&mut board, change, &output)
        }
        Commands::Status => commands::status::show(&mut board, &config, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn parse_date(s: &str) -> std::result::Result<String, String> {
    chrono::NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|_| format!("'{}' is not a date in YYYY-MM-DD form", s))
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(config_path, key, value, output)
        }
    }
}

/// Install the tracing subscriber
///
/// `STICKYBOARD_LOG` takes an `EnvFilter` directive and wins over `--verbose`.
/// Logs go to the configured log file, or stderr.
fn init_logging(config: &Config, verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_env("STICKYBOARD_LOG").unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "stickyboard_core={},stickyboard={}",
            log_level, log_level
        ))
    });

    // Ignore error if already initialized
    match config.log_file {
        Some(ref log_path) => {
            let log_file = match File::options().create(true).append(true).open(log_path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
                    return;
                }
            };
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(log_file)
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }

    tracing::debug!("Logging initialized at {}", log_level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_options() {
        let cli = Cli::try_parse_from([
            "stickyboard", "add", "Buy milk", "--color", "green", "-m", "urgent", "--x", "120",
        ])
        .unwrap();

        match cli.command {
            Commands::Add {
                title,
                color,
                markers,
                x,
                y,
                ..
            } => {
                assert_eq!(title, "Buy milk");
                assert_eq!(color, Some(Color::Green));
                assert_eq!(markers, vec!["urgent"]);
                assert_eq!((x, y), (120.0, 50.0));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_stamp_label_is_validated() {
        assert!(Cli::try_parse_from(["stickyboard", "stamp", "abc", "urgent"]).is_ok());
        assert!(Cli::try_parse_from(["stickyboard", "stamp", "abc", "someday"]).is_err());
    }

    #[test]
    fn test_list_date_must_be_a_date() {
        assert!(Cli::try_parse_from(["stickyboard", "list", "--date", "2024-03-01"]).is_ok());
        assert!(Cli::try_parse_from(["stickyboard", "list", "--date", "yesterday"]).is_err());
    }

    #[test]
    fn test_backend_flag() {
        let cli = Cli::try_parse_from(["stickyboard", "--backend", "memory", "status"]).unwrap();
        assert_eq!(cli.backend, Some(BackendKind::Memory));
        assert!(Cli::try_parse_from(["stickyboard", "--backend", "floppy", "status"]).is_err());
    }
}

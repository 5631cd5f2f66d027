//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use anyhow::Result;
use serde::Serialize;

use stickyboard_core::{Analytics, Widget};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single widget
    pub fn print_widget(&self, widget: &Widget) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                let (x, y) = widget.display_position();
                println!("ID:        {}", widget.id);
                println!("Title:     {}", widget.title);
                println!(
                    "Status:    {}",
                    if widget.completed { "done" } else { "pending" }
                );
                println!("Color:     {} ({})", widget.color, widget.color.hex());
                println!("Position:  {:.0}, {:.0}  (layer {})", x, y, widget.z_index);
                println!("Created:   {}", widget.created_date);
                if !widget.markers.is_empty() {
                    println!("Markers:   {}", widget.markers.join(", "));
                }
                if let Some(ref stamp) = widget.stamp {
                    println!("Stamp:     {}", stamp.to_uppercase());
                }
                if !widget.content.is_empty() {
                    println!();
                    println!("{}", widget.content);
                }
            }
            OutputFormat::Json => print_json(widget)?,
            OutputFormat::Quiet => {
                println!("{}", widget.id);
            }
        }
        Ok(())
    }

    /// Print a list of widgets
    pub fn print_widgets(&self, widgets: &[&Widget]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if widgets.is_empty() {
                    println!("No widgets found.");
                    return Ok(());
                }
                for widget in widgets {
                    let check = if widget.completed { "x" } else { " " };
                    let stamp = widget
                        .stamp
                        .as_ref()
                        .map(|s| format!(" [{}]", s.to_uppercase()))
                        .unwrap_or_default();
                    println!(
                        "{} | [{}] {}{} | {} | {}",
                        short_id(widget),
                        check,
                        truncate(&widget.title, 35),
                        stamp,
                        widget.color,
                        widget.created_date
                    );
                }
                println!("\n{} widget(s)", widgets.len());
            }
            OutputFormat::Json => print_json(&widgets)?,
            OutputFormat::Quiet => {
                for widget in widgets {
                    println!("{}", widget.id);
                }
            }
        }
        Ok(())
    }

    /// Print the analytics panel
    pub fn print_analytics(&self, stats: &Analytics) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("Board Analytics");
                println!("===============");
                println!();
                println!("Total:      {}", stats.total_tasks);
                println!("Completed:  {}", stats.completed_tasks);
                println!("Pending:    {}", stats.pending_tasks);
                println!(
                    "Completion: {:.1}%  {}",
                    stats.completion_rate,
                    progress_bar(stats.completion_rate, 20)
                );

                if !stats.widgets_by_date.is_empty() {
                    println!();
                    println!("By date:");
                    for (date, count) in stats.widgets_by_date.iter() {
                        println!("  {}  {}", date, count);
                    }
                }

                if !stats.widgets_by_color.is_empty() {
                    println!();
                    println!("By color:");
                    for (color, count) in stats.widgets_by_color.iter() {
                        println!("  {:<8} {}", color.name(), count);
                    }
                }
            }
            OutputFormat::Json => print_json(stats)?,
            OutputFormat::Quiet => {
                println!("{:.1}", stats.completion_rate);
            }
        }
        Ok(())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Warn that a change only exists in this process
    pub fn warn(&self, message: &str) {
        if !self.is_quiet() {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Short form of a widget id for listings
///
/// Timestamp ids (`widget-<millis>`) differ at the end, so those keep their
/// last eight digits; everything else keeps its first eight characters.
pub fn short_id(widget: &Widget) -> String {
    let id = widget.id.as_str();
    let bare = id.strip_prefix("widget-").unwrap_or(id);
    if !bare.is_empty() && bare.bytes().all(|b| b.is_ascii_digit()) {
        bare[bare.len().saturating_sub(8)..].to_string()
    } else {
        bare.chars().take(8).collect()
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Text progress bar for a percentage
fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round().clamp(0.0, width as f64) as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

//! Command handlers

pub mod config;
pub mod stats;
pub mod status;
pub mod theme;
pub mod widget;

use anyhow::{bail, Result};

use stickyboard_core::{KeyValueStore, Persisted, StorageError, WidgetId, WidgetStore};

use crate::output::Output;

/// The store as the CLI opens it, over whichever backend is configured
pub type Board = WidgetStore<Box<dyn KeyValueStore>>;

/// Resolve a widget ID (full ID or unique prefix, with or without `widget-`)
///
/// Timestamp ids also match on their trailing digits, which is how
/// listings abbreviate them.
pub fn resolve_id(board: &Board, input: &str) -> Result<WidgetId> {
    let exact = WidgetId::from(input);
    if board.get(&exact).is_some() {
        return Ok(exact);
    }

    let matches: Vec<_> = board
        .list()
        .iter()
        .filter(|w| {
            let id = w.id.as_str();
            let bare = id.strip_prefix("widget-").unwrap_or(id);
            id.starts_with(input)
                || bare.starts_with(input)
                || (bare.bytes().all(|b| b.is_ascii_digit()) && bare.ends_with(input))
        })
        .collect();

    match matches.len() {
        0 => bail!("No widget found matching: {}", input),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple widgets match '{}':", input);
            for widget in &matches {
                eprintln!("  {} - {}", widget.id, widget.title);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

/// Tell the user when a change could not be written
pub fn report_write<T>(outcome: &Persisted<T>, output: &Output) {
    if let Some(err) = outcome.failure() {
        for line in write_warnings(err) {
            output.warn(&line);
        }
    }
}

fn write_warnings(err: &StorageError) -> Vec<String> {
    let mut lines = vec![format!("Change not saved: {}", err)];
    if err.is_recoverable() {
        if let Some(hint) = err.recovery_suggestion() {
            lines.push(hint.to_string());
        }
    } else {
        lines.push(
            "The storage backend is failing. Run `stickyboard status` to check where the board lives."
                .to_string(),
        );
    }
    lines
}

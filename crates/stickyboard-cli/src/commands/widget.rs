//! Widget command handlers

use anyhow::{bail, Context, Result};

use stickyboard_core::models::today;
use stickyboard_core::{Color, NewWidget, Widget, WidgetId, WidgetPatch};

use super::{report_write, resolve_id, Board};
use crate::editor::{confirm, edit_text};
use crate::output::{short_id, Output};

/// Which widgets `list` shows
#[derive(Debug, Default, Clone)]
pub struct ListFilter {
    pub date: Option<String>,
    pub color: Option<Color>,
    pub marker: Option<String>,
    pub completed: Option<bool>,
}

impl ListFilter {
    /// Restrict to widgets created today
    pub fn today(mut self) -> Self {
        self.date = Some(today());
        self
    }

    fn matches(&self, widget: &Widget) -> bool {
        self.date.as_ref().map_or(true, |d| &widget.created_date == d)
            && self.color.map_or(true, |c| widget.color == c)
            && self.marker.as_ref().map_or(true, |m| widget.has_marker(m))
            && self.completed.map_or(true, |c| widget.completed == c)
    }
}

/// Create a new widget
pub fn add(board: &mut Board, fields: NewWidget, output: &Output) -> Result<()> {
    let outcome = board.create(fields);
    report_write(&outcome, output);

    let widget = outcome.value();
    output.success(&format!("Created widget {}", short_id(widget)));
    output.print_widget(widget)
}

/// List widgets in render order
pub fn list(board: &Board, filter: &ListFilter, output: &Output) -> Result<()> {
    let widgets: Vec<&Widget> = board
        .stacked()
        .into_iter()
        .filter(|w| filter.matches(w))
        .collect();
    output.print_widgets(&widgets)
}

/// Show a single widget
pub fn show(board: &Board, id: String, output: &Output) -> Result<()> {
    let id = resolve_id(board, &id)?;
    let widget = board
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Widget not found: {}", id))?;
    output.print_widget(widget)
}

/// Apply a partial update; with nothing to change, edit the content in $EDITOR
pub fn edit(board: &mut Board, id: String, patch: WidgetPatch, output: &Output) -> Result<()> {
    let id = resolve_id(board, &id)?;

    let patch = if patch.is_empty() {
        let current = board
            .get(&id)
            .ok_or_else(|| anyhow::anyhow!("Widget not found: {}", id))?;
        let edited = edit_text(&current.content).context("Failed to edit widget content")?;
        let edited = edited.trim_end().to_string();
        if edited == current.content {
            output.message("No changes.");
            return Ok(());
        }
        WidgetPatch::new().content(edited)
    } else {
        patch
    };

    apply(board, &id, &patch, "Updated", output)
}

/// Move a widget on the canvas
pub fn move_to(board: &mut Board, id: String, x: f64, y: f64, output: &Output) -> Result<()> {
    let id = resolve_id(board, &id)?;
    apply(board, &id, &WidgetPatch::new().position(x, y), "Moved", output)
}

/// Mark a widget done or pending; `None` flips the current state
pub fn set_completed(
    board: &mut Board,
    id: String,
    completed: Option<bool>,
    output: &Output,
) -> Result<()> {
    let id = resolve_id(board, &id)?;
    let completed = match completed {
        Some(value) => value,
        None => {
            let widget = board
                .get(&id)
                .ok_or_else(|| anyhow::anyhow!("Widget not found: {}", id))?;
            !widget.completed
        }
    };

    let verb = if completed { "Completed" } else { "Reopened" };
    apply(board, &id, &WidgetPatch::new().completed(completed), verb, output)
}

/// Toggle a stamp: flips marker membership and records it as the latest stamp
pub fn stamp(board: &mut Board, id: String, label: String, output: &Output) -> Result<()> {
    let id = resolve_id(board, &id)?;
    let patch = board
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Widget not found: {}", id))?
        .toggle_stamp(&label);
    apply(board, &id, &patch, "Stamped", output)
}

/// Replace the marker set
pub fn tag(board: &mut Board, id: String, markers: Vec<String>, output: &Output) -> Result<()> {
    let id = resolve_id(board, &id)?;
    apply(board, &id, &WidgetPatch::new().markers(markers), "Tagged", output)
}

/// Delete a widget
pub fn delete(board: &mut Board, id: String, yes: bool, output: &Output) -> Result<()> {
    let id = resolve_id(board, &id)?;

    if !yes && output.should_prompt() {
        if let Some(widget) = board.get(&id) {
            println!("Delete widget: {} - {}", short_id(widget), widget.title);
        }
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let outcome = board.delete(&id);
    report_write(&outcome, output);
    match outcome.into_value() {
        Some(removed) => output.success(&format!("Deleted widget: {}", short_id(&removed))),
        None => output.message("Nothing to delete."),
    }
    Ok(())
}

/// Delete every widget
pub fn clear(board: &mut Board, yes: bool, output: &Output) -> Result<()> {
    if !yes {
        if !output.should_prompt() {
            bail!("Refusing to clear the board without --yes");
        }
        println!(
            "This deletes all {} widget(s) and cannot be undone.",
            board.len()
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let outcome = board.clear();
    report_write(&outcome, output);
    output.success(&format!("Cleared {} widget(s)", outcome.into_value()));
    Ok(())
}

fn apply(
    board: &mut Board,
    id: &WidgetId,
    patch: &WidgetPatch,
    verb: &str,
    output: &Output,
) -> Result<()> {
    let outcome = board.update(id, patch);
    report_write(&outcome, output);

    match outcome.into_value() {
        Some(widget) => {
            output.success(&format!("{} widget {}", verb, short_id(&widget)));
            output.print_widget(&widget)
        }
        None => bail!("Widget not found: {}", id),
    }
}

//! Theme command handler
//!
//! The dark-mode flag shares the board's backend but not its lifecycle.

use anyhow::{Context, Result};

use stickyboard_core::Preferences;

use super::Board;
use crate::output::{Output, OutputFormat};

/// Requested theme change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChange {
    Dark,
    Light,
    Toggle,
}

/// Show the theme, or change it when `change` is given
pub fn theme(board: &mut Board, change: Option<ThemeChange>, output: &Output) -> Result<()> {
    let mut prefs = Preferences::new(board.backend_mut());

    let dark = match change {
        None => prefs.dark_mode(),
        Some(ThemeChange::Toggle) => prefs
            .toggle_dark_mode()
            .context("Failed to save theme preference")?,
        Some(ThemeChange::Dark) | Some(ThemeChange::Light) => {
            let dark = change == Some(ThemeChange::Dark);
            prefs
                .set_dark_mode(dark)
                .context("Failed to save theme preference")?;
            dark
        }
    };

    let name = if dark { "dark" } else { "light" };
    match output.format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "dark_mode": dark })),
        OutputFormat::Quiet => println!("{}", name),
        OutputFormat::Human => println!("Theme: {}", name),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stickyboard_core::{KeyValueStore, MemoryKeyValueStore, WidgetStore};

    #[test]
    fn test_theme_changes_persist_in_backend() {
        let mut board: Board =
            WidgetStore::open(Box::new(MemoryKeyValueStore::new()) as Box<dyn KeyValueStore>);
        let output = Output::new(OutputFormat::Quiet);

        theme(&mut board, Some(ThemeChange::Dark), &output).unwrap();
        assert!(Preferences::new(board.backend_mut()).dark_mode());

        theme(&mut board, Some(ThemeChange::Toggle), &output).unwrap();
        assert!(!Preferences::new(board.backend_mut()).dark_mode());

        theme(&mut board, Some(ThemeChange::Light), &output).unwrap();
        assert_eq!(
            board.backend().get("widget-dark-mode").unwrap().as_deref(),
            Some("false")
        );
    }
}

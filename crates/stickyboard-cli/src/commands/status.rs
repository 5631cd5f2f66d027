//! Status command handler

use anyhow::Result;

use stickyboard_core::storage::WIDGETS_KEY;
use stickyboard_core::{Config, KeyValueStore, Preferences};

use super::Board;
use crate::output::{Output, OutputFormat};

/// Show where the board lives and what it holds
pub fn show(board: &mut Board, config: &Config, output: &Output) -> Result<()> {
    let persisted = board.backend().contains(WIDGETS_KEY)?;
    let dark_mode = Preferences::new(board.backend_mut()).dark_mode();
    let stats = board.analytics();
    let today = board.today_widgets().len();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "backend": config.backend.to_string(),
                    "data_dir": config.data_dir,
                    "persisted": persisted,
                    "dark_mode": dark_mode,
                    "counts": {
                        "widgets": stats.total_tasks,
                        "completed": stats.completed_tasks,
                        "today": today
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", stats.total_tasks);
        }
        OutputFormat::Human => {
            println!("stickyboard Status");
            println!("==================");
            println!();
            println!("Storage:");
            println!("  Backend:   {}", config.backend);
            println!("  Location:  {}", config.data_dir.display());
            println!(
                "  Saved:     {}",
                if persisted { "yes" } else { "nothing stored yet" }
            );
            println!();
            println!("Contents:");
            println!("  Widgets:   {}", stats.total_tasks);
            println!("  Completed: {}", stats.completed_tasks);
            println!("  Today:     {}", today);
            println!();
            println!("Theme: {}", if dark_mode { "dark" } else { "light" });
        }
    }

    Ok(())
}

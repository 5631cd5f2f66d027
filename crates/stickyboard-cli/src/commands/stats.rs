//! Analytics command handler

use anyhow::Result;

use stickyboard_core::Analytics;

use super::Board;
use crate::output::Output;

/// Show aggregate statistics, over the whole board or today's widgets only
pub fn show(board: &Board, today_only: bool, output: &Output) -> Result<()> {
    let stats = if today_only {
        Analytics::compute(&board.today_widgets())
    } else {
        board.analytics()
    };
    output.print_analytics(&stats)
}

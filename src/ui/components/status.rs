//! Loading / error status line.

use crate::ui::helpers::{truncate, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

/// Draws the loading indicator or error message on `row`.
pub fn render_status(frame: &mut Frame, row: usize, status: &StatusLine, theme: &Theme, cols: usize) -> usize {
    frame.move_to(row, 1);
    match status {
        StatusLine::Loading => {
            frame.fg(&theme.colors.text_dim);
            frame.centered("Loading…", cols);
        }
        StatusLine::Error(message) => {
            frame.fg(&theme.colors.error_fg);
            frame.centered(&truncate(message, cols.saturating_sub(2)), cols);
        }
    }
    frame.reset();
    row + 1
}

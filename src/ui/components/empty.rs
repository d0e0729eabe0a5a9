//! Empty state component renderer.

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the two-line empty state message starting at `row`, one blank line
/// below the table headers.
///
/// ```text
///              No Results for "zzz"
///     Check the spelling or try a new search.
/// ```
pub fn render_empty_state(frame: &mut Frame, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    frame.move_to(row + 1, 1);
    frame.push(Theme::bold());
    frame.fg(&theme.colors.empty_state_fg);
    frame.centered(&empty.message, cols);
    frame.reset();

    frame.move_to(row + 2, 1);
    frame.push(Theme::dim());
    frame.fg(&theme.colors.text_dim);
    frame.centered(&empty.subtitle, cols);
    frame.reset();

    row + 3
}

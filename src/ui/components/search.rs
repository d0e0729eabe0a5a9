//! Search bar component renderer.

use crate::ui::helpers::{char_len, truncate, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin on each side of the search box.
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the three-line search box.
///
/// ```text
/// [margin] ┌──────────────┐ [margin]
/// [margin] │ Search: ann_ │ [margin]
/// [margin] └──────────────┘ [margin]
/// ```
///
/// A trailing cursor marks the box while it has typing focus. Returns the next
/// free row.
pub fn render_search_bar(frame: &mut Frame, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = &theme.colors.search_bar_border;

    frame.move_to(row, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.fg(border);
    frame.push(&format!("┌{}┐", "─".repeat(inner_width)));
    frame.reset();

    let cursor = if search.is_focused { "_" } else { "" };
    let search_text = truncate(&format!(" Search: {}{cursor}", search.query), inner_width);

    frame.move_to(row + 1, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.fg(border);
    frame.push("│");
    frame.fg(&theme.colors.text_normal);
    frame.push(&search_text);
    frame.pad(inner_width.saturating_sub(char_len(&search_text)));
    frame.fg(border);
    frame.push("│");
    frame.reset();

    frame.move_to(row + 2, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.fg(border);
    frame.push(&format!("└{}┘", "─".repeat(inner_width)));
    frame.reset();

    row + 3
}

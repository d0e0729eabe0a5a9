//! User table renderer: NAME and ID columns with selection and search match
//! highlighting.

use crate::ui::helpers::{self, char_len, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Width of the NAME column including its gutter.
pub const NAME_COLUMN_WIDTH: usize = 37;

/// Longest name shown before truncation.
pub const NAME_MAX_CHARS: usize = NAME_COLUMN_WIDTH - 2;

/// Draws the NAME and ID column headers on `row`.
pub fn render_table_headers(frame: &mut Frame, row: usize, theme: &Theme) -> usize {
    frame.move_to(row, 1);
    frame.push(Theme::bold());
    frame.fg(&theme.colors.header_fg);
    frame.push(&format!("{:<NAME_COLUMN_WIDTH$}{}", "NAME", "ID"));
    frame.reset();
    row + 1
}

/// Renders every item from `row` down. Returns the next free row.
pub fn render_table_rows(frame: &mut Frame, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    items
        .iter()
        .fold(row, |current, item| render_table_row(frame, current, item, theme, cols))
}

/// Renders one row padded to the full width so the selection background
/// spans the line.
///
/// ```text
/// NAME (up to 35 chars)                ID [padding]
/// ```
fn render_table_row(frame: &mut Frame, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    frame.move_to(row, 1);

    if item.is_selected {
        frame.fg(&theme.colors.selection_fg);
        frame.bg(&theme.colors.selection_bg);
    } else {
        frame.fg(&theme.colors.text_normal);
    }

    helpers::render_highlighted_text(frame, &item.name, &item.highlight_ranges, theme, item.is_selected);

    let name_len = char_len(&item.name).min(NAME_MAX_CHARS);
    frame.pad(NAME_COLUMN_WIDTH.saturating_sub(name_len));

    if !item.is_selected {
        frame.fg(&theme.colors.text_dim);
    }
    frame.push(&item.id);

    frame.pad(cols.saturating_sub(NAME_COLUMN_WIDTH + char_len(&item.id)));
    frame.reset();
    row + 1
}

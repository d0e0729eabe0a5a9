//! Header component renderer.

use crate::ui::helpers::{char_len, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centered title with the sort indicator flush right.
///
/// The sort indicator is dropped on terminals too narrow to fit it beside the
/// title.
///
/// Returns the next free row.
pub fn render_header(frame: &mut Frame, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    frame.move_to(row, 1);
    frame.push(Theme::bold());
    frame.fg(&theme.colors.header_fg);
    if let Some(bg) = &theme.colors.header_bg {
        frame.bg(bg);
    }
    frame.centered(&header.title, cols);

    let sort_len = char_len(&header.sort);
    let title_len = char_len(&header.title);
    if !header.sort.is_empty() && cols >= title_len + (sort_len + 2) * 2 {
        frame.move_to(row, cols - sort_len);
        frame.fg(&theme.colors.section_title_fg);
        frame.push(&header.sort);
    }

    frame.reset();
    row + 1
}

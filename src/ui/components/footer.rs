//! Footer component renderer.

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the dimmed keybinding hints, centered and truncated to `cols`.
///
/// Returns the next free row.
pub fn render_footer(frame: &mut Frame, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    frame.move_to(row, 1);
    frame.fg(&theme.colors.text_dim);
    frame.centered(&footer.keybindings, cols);
    frame.reset();
    row + 1
}

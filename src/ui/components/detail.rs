//! Detail screen body: titled sections of label/value rows.

use crate::ui::helpers::{truncate, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InfoSection;

/// Width of the label column, including the leading indent.
const LABEL_WIDTH: usize = 14;

/// Renders `sections` from `row`, stopping before `last_row`.
///
/// ```text
/// Personal Information
///   Name        Emily Johnson
///   Age         28
///
/// Work
///   Company     Dooley, Kozey and Cronin
/// ```
///
/// Returns the next free row.
pub fn render_sections(
    frame: &mut Frame,
    row: usize,
    last_row: usize,
    sections: &[InfoSection],
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current = row;
    for (index, section) in sections.iter().enumerate() {
        if index > 0 {
            current += 1;
        }
        if current >= last_row {
            break;
        }

        frame.move_to(current, 1);
        frame.push(Theme::bold());
        frame.fg(&theme.colors.section_title_fg);
        frame.push(&section.title);
        frame.reset();
        current += 1;

        for info in &section.rows {
            if current >= last_row {
                break;
            }
            frame.move_to(current, 1);
            frame.fg(&theme.colors.text_dim);
            frame.push(&format!("  {:<width$}", info.title, width = LABEL_WIDTH - 2));
            frame.fg(&theme.colors.text_normal);
            frame.push(&truncate(&info.value, cols.saturating_sub(LABEL_WIDTH)));
            frame.reset();
            current += 1;
        }
    }
    current
}

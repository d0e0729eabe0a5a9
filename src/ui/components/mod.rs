//! Composable UI component renderers.
//!
//! - [`header`]: title bar with sort indicator
//! - [`footer`]: keybinding hints
//! - [`search`]: search input box
//! - [`table`]: user list with NAME and ID columns
//! - [`empty`]: message shown when there are no users
//! - [`status`]: loading / error line
//! - [`detail`]: sections of the user detail screen
//!
//! Two layouts compose them: [`render_list_mode`] and [`render_detail_mode`].

mod detail;
mod empty;
mod footer;
mod header;
mod search;
mod status;
mod table;

pub use table::{NAME_COLUMN_WIDTH, NAME_MAX_CHARS};

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailView, FooterInfo, HeaderInfo, StatusLine, UIViewModel};

use detail::render_sections;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use status::render_status;
use table::{render_table_headers, render_table_rows};

/// Rows used by the list layout around the table when the search bar is
/// hidden: blank, header, border, column headers, error line, border, footer.
pub const LIST_CHROME_ROWS: usize = 7;

/// Extra rows taken by the search box.
pub const SEARCH_BAR_ROWS: usize = 3;

fn render_border(frame: &mut Frame, row: usize, color: &str, cols: usize) -> usize {
    frame.move_to(row, 1);
    frame.fg(color);
    frame.push(&"─".repeat(cols));
    frame.reset();
    row + 1
}

/// Draws the error line, border and footer anchored to the bottom.
fn render_bottom(frame: &mut Frame, status: Option<&StatusLine>, footer: &FooterInfo, theme: &Theme, cols: usize, rows: usize) {
    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);

    if let Some(status @ StatusLine::Error(_)) = status {
        render_status(frame, border_row.saturating_sub(1), status, theme, cols);
    }
    render_border(frame, border_row, &theme.colors.border, cols);
    render_footer(frame, footer_row, footer, theme, cols);
}

/// Renders the user list.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines, search mode only]
/// [Table Headers]
/// [Table Rows | Empty State]
/// [Loading row, while fetching]
/// [blank padding]
/// [Error line, after a failed fetch]
/// [Border]
/// [Footer]
/// ```
pub fn render_list_mode(frame: &mut Frame, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(frame, current_row, &vm.header, theme, cols);
    current_row = render_border(frame, current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(frame, current_row, search, theme, cols);
    }
    current_row = render_table_headers(frame, current_row, theme);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(frame, current_row, empty, theme, cols);
    } else {
        current_row = render_table_rows(frame, current_row, &vm.display_items, theme, cols);
        if let Some(status @ StatusLine::Loading) = &vm.status {
            render_status(frame, current_row, status, theme, cols);
        }
    }

    render_bottom(frame, vm.status.as_ref(), &vm.footer, theme, cols, rows);
}

/// Renders one user's detail screen.
pub fn render_detail_mode(frame: &mut Frame, vm: &UIViewModel, detail: &DetailView, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    let header = HeaderInfo {
        title: format!(" {} ", detail.title),
        sort: String::new(),
    };
    current_row = render_header(frame, current_row, &header, theme, cols);
    current_row = render_border(frame, current_row, &theme.colors.border, cols);

    let last_row = rows.saturating_sub(3);
    current_row = render_sections(frame, current_row + 1, last_row, &detail.sections, theme, cols);
    if let Some(status @ StatusLine::Loading) = &detail.status {
        render_status(frame, current_row, status, theme, cols);
    }

    render_bottom(frame, detail.status.as_ref(), &vm.footer, theme, cols, rows);
}

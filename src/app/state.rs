//! Application state and view model computation.
//!
//! [`AppState`] is the single owner of everything the plugin knows: the list
//! and detail controllers, the cursor, the active modes and the theme. The
//! event handler mutates it; the renderer only reads snapshots of it through
//! [`AppState::compute_viewmodel`].
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use userdeck::api::UserApiClient;
//! use userdeck::ui::Theme;
//! use userdeck::AppState;
//!
//! let state = AppState::new(UserApiClient::default(), Duration::from_secs(10), Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.header.title, " Users (0 of 0) ");
//! ```

use std::time::Duration;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use super::detail::{DetailController, DetailScreen};
use super::list::ListController;
use super::modes::{InputMode, SearchFocus, ViewMode};
use crate::api::UserApiClient;
use crate::domain::{SortDirection, UserSummary};
use crate::ui::components::{LIST_CHROME_ROWS, NAME_MAX_CHARS, SEARCH_BAR_ROWS};
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailView, DisplayItem, EmptyState, FooterInfo, HeaderInfo, InfoRow, InfoSection, SearchBarInfo, StatusLine,
    UIViewModel,
};

/// Central application state container.
///
/// Holds both controllers plus the transient UI state around them: cursor,
/// modes, theme and the last known pane height. Mutated only by the event
/// handler; view models are computed on demand from it.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Paginated, searchable user list and its fetch bookkeeping.
    pub list: ListController,

    /// Detail screen for a single user.
    pub detail: DetailController,

    /// Cursor position within the loaded users.
    ///
    /// Clamped, never wraps: reaching the last row is one of the triggers
    /// for loading the next page. Re-clamped after every event because reset
    /// fetches shrink the list.
    pub selected_index: usize,

    /// Current input handling mode.
    ///
    /// Determines active keybindings and whether the search bar takes up
    /// rows.
    pub input_mode: InputMode,

    /// Whether the list or the detail screen is shown.
    pub view_mode: ViewMode,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Pane height from the most recent render, 0 until the first one.
    ///
    /// Used to tell whether the last loaded user is on screen.
    pub viewport_rows: usize,
}

impl AppState {
    /// Creates the application state with an empty list and default modes.
    ///
    /// Both controllers share the same client configuration and timeout.
    ///
    /// # Parameters
    ///
    /// * `client` - Users endpoint client
    /// * `request_timeout` - Upper bound for any single fetch
    /// * `theme` - Color scheme for UI rendering
    ///
    /// # Returns
    ///
    /// A new `AppState` in list view and normal input mode. Nothing is
    /// fetched until `Event::Initialize` is handled.
    #[must_use]
    pub fn new(client: UserApiClient, request_timeout: Duration, theme: Theme) -> Self {
        Self {
            list: ListController::new(client.clone(), request_timeout),
            detail: DetailController::new(client, request_timeout),
            selected_index: 0,
            input_mode: InputMode::Normal,
            view_mode: ViewMode::List,
            theme,
            viewport_rows: 0,
        }
    }

    /// Moves the cursor down by one user, stopping at the last loaded one.
    ///
    /// Called by the `KeyDown` handler, which then decides whether the next
    /// page is due. No-op on an empty list.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use std::time::Duration;
    /// # use userdeck::api::UserApiClient;
    /// # use userdeck::ui::Theme;
    /// # use userdeck::AppState;
    /// let mut state = AppState::new(UserApiClient::default(), Duration::from_secs(10), Theme::default());
    /// state.move_selection_down();
    /// assert_eq!(state.selected_index, 0);
    /// ```
    pub fn move_selection_down(&mut self) {
        let len = self.list.state().items.len();
        if len > 0 && self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    /// Moves the cursor up by one user, stopping at the first.
    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Whether the cursor sits on the last loaded user.
    #[must_use]
    pub fn is_at_last_row(&self) -> bool {
        let len = self.list.state().items.len();
        len > 0 && self.selected_index + 1 >= len
    }

    /// Returns the user under the cursor.
    ///
    /// # Returns
    ///
    /// - `Some(&UserSummary)` if the list has users
    /// - `None` if it is empty
    #[must_use]
    pub fn selected_user(&self) -> Option<&UserSummary> {
        self.list.state().items.get(self.selected_index)
    }

    /// Keeps the cursor inside the loaded users after the list shrinks.
    pub fn clamp_selection(&mut self) {
        let len = self.list.state().items.len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    /// Whether the last loaded user is inside the visible window of the
    /// most recently rendered pane.
    ///
    /// Always `false` before the first render, on the detail screen and on
    /// an empty list.
    #[must_use]
    pub fn is_end_visible(&self) -> bool {
        let len = self.list.state().items.len();
        if self.viewport_rows == 0 || self.view_mode == ViewMode::Detail || len == 0 {
            return false;
        }
        let (_, visible_end) = self.visible_range(self.viewport_rows);
        visible_end == len
    }

    /// Window of loaded users shown in a pane `rows` tall.
    ///
    /// Centered on the selection and shifted to stay full near the ends of
    /// the list. One row is held back for the loading indicator while a
    /// fetch is in flight.
    fn visible_range(&self, rows: usize) -> (usize, usize) {
        let list = self.list.state();
        let mut available_rows = self.calculate_available_rows(rows);
        if list.is_loading {
            available_rows = available_rows.saturating_sub(1);
        }

        let total = list.items.len();
        let selected = self.selected_index.min(total.saturating_sub(1));
        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(total);
        if visible_end - visible_start < available_rows && total >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }
        (visible_start.min(visible_end), visible_end)
    }

    /// Computes a renderable snapshot for a `rows` x `cols` pane.
    ///
    /// Transforms state into a structure the components draw directly:
    /// windowing, fuzzy match highlighting of the committed query, name
    /// truncation, status and empty-state selection. On the detail screen
    /// the list fields are left empty and `detail` is filled instead.
    ///
    /// # Parameters
    ///
    /// * `rows` - Pane height in terminal rows
    /// * `cols` - Pane width in terminal columns
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let footer = self.compute_footer();

        if self.view_mode == ViewMode::Detail {
            if let Some(screen) = self.detail.screen() {
                return UIViewModel {
                    display_items: vec![],
                    selected_index: 0,
                    header: self.compute_header(),
                    footer,
                    empty_state: None,
                    search_bar: None,
                    status: None,
                    detail: Some(Self::compute_detail(screen)),
                };
            }
        }

        let list = self.list.state();
        let status = if list.is_loading {
            Some(StatusLine::Loading)
        } else {
            list.error.clone().map(StatusLine::Error)
        };

        let (visible_start, visible_end) = self.visible_range(rows);

        let matcher = (!list.search_query.is_empty()).then(SkimMatcherV2::default);

        let display_items = list.items[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, user)| self.compute_display_item(user, visible_start + offset, cols, matcher.as_ref()))
            .collect();

        UIViewModel {
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            header: self.compute_header(),
            footer,
            empty_state: self.compute_empty_state(),
            search_bar: self.compute_search_bar(),
            status,
            detail: None,
        }
    }

    /// Names are cut to the NAME column, or shorter on panes too narrow to
    /// also fit the ID column.
    fn compute_display_item(
        &self,
        user: &UserSummary,
        absolute_idx: usize,
        cols: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        const ID_COLUMN_MIN: usize = 6;

        let full_name = user.full_name();
        let name_width = NAME_MAX_CHARS.min(cols.saturating_sub(ID_COLUMN_MIN));
        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            let ranges = Self::compute_highlight_ranges(&full_name, &self.list.state().search_query, m);
            ranges.into_iter().filter(|&(start, _)| start < name_width).collect()
        });

        DisplayItem {
            name: truncate(&full_name, name_width),
            id: user.id.to_string(),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    /// Coalesces the matcher's character indices into `(start, end)` runs.
    fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        if self.view_mode == ViewMode::Detail {
            return HeaderInfo {
                title: " User ".to_string(),
                sort: String::new(),
            };
        }

        let list = self.list.state();
        let title = if list.search_query.is_empty() {
            format!(" Users ({} of {}) ", list.items.len(), list.total)
        } else {
            format!(
                " Users matching \"{}\" ({} of {}) ",
                list.search_query,
                list.items.len(),
                list.total
            )
        };
        let arrow = match list.sort_direction {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        };

        HeaderInfo {
            title,
            sort: format!("{} {arrow}", list.sort_field.label()),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.view_mode, self.input_mode) {
            (ViewMode::Detail, _) => "ESC/q: back",
            (ViewMode::List, InputMode::Search(SearchFocus::Typing)) => {
                "ESC: clear search  Enter: results  Ctrl+n/p: navigate  Type to search"
            }
            (ViewMode::List, InputMode::Search(SearchFocus::Navigating)) => {
                "ESC: clear search  /: edit query  j/k: navigate  Enter: details"
            }
            (ViewMode::List, InputMode::Normal) => {
                "j/k: navigate  /: search  s: sort field  o: order  r: reload  Enter: details  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.list.search_input().to_string(),
                is_focused: focus == SearchFocus::Typing,
            }),
            InputMode::Normal => None,
        }
    }

    /// Empty list message. Suppressed while loading and after a failed fetch,
    /// where the status line says what happened instead.
    fn compute_empty_state(&self) -> Option<EmptyState> {
        let list = self.list.state();
        if !list.items.is_empty() || list.is_loading || list.error.is_some() {
            return None;
        }

        Some(if list.search_query.is_empty() {
            EmptyState {
                message: "No Users".to_string(),
                subtitle: "There are no users available.".to_string(),
            }
        } else {
            EmptyState {
                message: format!("No Results for \"{}\"", list.search_query),
                subtitle: "Check the spelling or try a new search.".to_string(),
            }
        })
    }

    fn compute_detail(screen: &DetailScreen) -> DetailView {
        let status = if screen.is_loading {
            Some(StatusLine::Loading)
        } else {
            screen.error.clone().map(StatusLine::Error)
        };

        let sections = screen.user.as_ref().map_or_else(Vec::new, |user| {
            vec![
                InfoSection {
                    title: "Personal Information".to_string(),
                    rows: vec![
                        InfoRow::new("Name", user.full_name()),
                        InfoRow::new("Age", user.age.to_string()),
                        InfoRow::new("Gender", user.display_gender()),
                        InfoRow::new("Email", user.email.clone()),
                        InfoRow::new("Phone", user.phone.clone()),
                    ],
                },
                InfoSection {
                    title: "Work".to_string(),
                    rows: vec![
                        InfoRow::new("Company", user.company.name.clone()),
                        InfoRow::new("Department", user.company.department.clone()),
                        InfoRow::new("Title", user.company.title.clone()),
                    ],
                },
                InfoSection {
                    title: "Address".to_string(),
                    rows: vec![
                        InfoRow::new("Street", user.address.address.clone()),
                        InfoRow::new("City", user.address.city.clone()),
                        InfoRow::new("State", user.address.state.clone()),
                        InfoRow::new("Country", user.address.country.clone()),
                    ],
                },
            ]
        });

        DetailView {
            title: screen.full_name.clone(),
            sections,
            status,
        }
    }

    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(LIST_CHROME_ROWS),
            InputMode::Search(_) => total_rows.saturating_sub(LIST_CHROME_ROWS + SEARCH_BAR_ROWS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use crate::app::Action;

    fn page_body(count: i64, total: usize) -> Vec<u8> {
        let users: Vec<serde_json::Value> = (1..=count)
            .map(|id| serde_json::json!({"id": id, "firstName": format!("Anna{id}"), "lastName": "Lee"}))
            .collect();
        serde_json::json!({"users": users, "total": total}).to_string().into_bytes()
    }

    fn state_with_users(count: i64, total: usize) -> AppState {
        let now = Instant::now();
        let mut state = AppState::new(UserApiClient::default(), Duration::from_secs(10), Theme::default());
        let generation = state
            .list
            .fetch(true, now)
            .iter()
            .find_map(|a| match a {
                Action::Fetch(req) => Some(req.tag.generation),
                _ => None,
            })
            .unwrap();
        state.list.on_page_response(generation, 200, &page_body(count, total), now);
        state
    }

    #[test]
    fn selection_is_clamped_not_wrapped() {
        let mut state = state_with_users(3, 3);
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);

        state.move_selection_down();
        state.move_selection_down();
        state.move_selection_down();
        assert_eq!(state.selected_index, 2);
        assert!(state.is_at_last_row());
        assert_eq!(state.selected_user().unwrap().id, 3);
    }

    #[test]
    fn header_counts_loaded_and_total() {
        let state = state_with_users(15, 42);
        let vm = state.compute_viewmodel(40, 80);
        assert_eq!(vm.header.title, " Users (15 of 42) ");
        assert_eq!(vm.header.sort, "First Name ↑");
        assert_eq!(vm.display_items.len(), 15);
        assert!(vm.display_items[0].is_selected);
        assert!(vm.empty_state.is_none());
        assert!(vm.status.is_none());
    }

    #[test]
    fn window_follows_selection() {
        let mut state = state_with_users(15, 42);
        for _ in 0..14 {
            state.move_selection_down();
        }
        // 12 rows minus 7 rows of chrome leaves a 5 row window.
        let vm = state.compute_viewmodel(12, 80);
        assert_eq!(vm.display_items.len(), 5);
        assert_eq!(vm.display_items[4].id, "15");
        assert_eq!(vm.selected_index, 4);
    }

    #[test]
    fn empty_states_depend_on_search() {
        let state = state_with_users(0, 0);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.unwrap().message, "No Users");

        let mut state = state_with_users(0, 0);
        state.list.on_search_text_changed("zzz", Instant::now());
        assert!(state.compute_viewmodel(24, 80).empty_state.is_some());

        let start = Instant::now();
        state.list.on_search_text_changed("zzz", start);
        state.list.on_tick(start + Duration::from_millis(300));
        // Loading: no empty state, loading line instead.
        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.empty_state.is_none());
        assert_eq!(vm.status, Some(StatusLine::Loading));
    }

    #[test]
    fn committed_search_is_highlighted() {
        let start = Instant::now();
        let mut state = state_with_users(2, 2);
        state.list.on_search_text_changed("anna", start);
        let generation = state
            .list
            .on_tick(start + Duration::from_millis(300))
            .iter()
            .find_map(|a| match a {
                Action::Fetch(req) => Some(req.tag.generation),
                _ => None,
            })
            .unwrap();
        state
            .list
            .on_page_response(generation, 200, &page_body(2, 2), start + Duration::from_millis(400));

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.header.title, " Users matching \"anna\" (2 of 2) ");
        assert_eq!(vm.display_items[1].highlight_ranges, vec![(0, 4)]);
    }

    #[test]
    fn end_visibility_follows_viewport() {
        let mut state = state_with_users(15, 42);
        assert!(!state.is_end_visible());

        // 7 rows of chrome plus 15 users fit in 22 rows.
        state.viewport_rows = 22;
        assert!(state.is_end_visible());

        state.viewport_rows = 12;
        assert!(!state.is_end_visible());
        for _ in 0..14 {
            state.move_selection_down();
        }
        assert!(state.is_end_visible());

        state.view_mode = ViewMode::Detail;
        assert!(!state.is_end_visible());
    }

    #[test]
    fn search_bar_shows_uncommitted_text() {
        let mut state = state_with_users(1, 1);
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        state.list.on_search_text_changed("em", Instant::now());

        let bar = state.compute_viewmodel(24, 80).search_bar.unwrap();
        assert_eq!(bar.query, "em");
        assert!(bar.is_focused);
    }
}

//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They hold no
//! business logic, only display-ready data such as highlight ranges and
//! pre-formatted labels.
//!
//! # Example
//!
//! ```rust
//! use userdeck::ui::viewmodel::{DisplayItem, FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     display_items: vec![DisplayItem {
//!         name: "Emily Johnson".to_string(),
//!         id: "1".to_string(),
//!         is_selected: true,
//!         highlight_ranges: vec![(0, 2)],
//!     }],
//!     selected_index: 0,
//!     header: HeaderInfo {
//!         title: " Users (1 of 208) ".to_string(),
//!         sort: "First Name ↑".to_string(),
//!     },
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//!     empty_state: None,
//!     search_bar: None,
//!     status: None,
//!     detail: None,
//! };
//! assert_eq!(vm.display_items.len(), 1);
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Rows of the visible window of the user list.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,

    pub footer: FooterInfo,

    /// Shown instead of the table when no users are loaded and nothing is loading.
    pub empty_state: Option<EmptyState>,

    /// Present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Loading indicator or error line below the table.
    pub status: Option<StatusLine>,

    /// Present when the detail screen is shown; replaces the list.
    pub detail: Option<DetailView>,
}

/// One row of the user table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Full name, truncated to the name column.
    pub name: String,

    pub id: String,

    pub is_selected: bool,

    /// Character ranges of `name` matching the committed search, as
    /// `(start, end)` with exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Title bar contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Active sort, e.g. `"Last Name ↓"`.
    pub sort: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Message shown in place of an empty table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search input contents and focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Text as typed, which may not have been committed yet.
    pub query: String,
    pub is_focused: bool,
}

/// Single line shown under the table or detail body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Loading,
    Error(String),
}

/// Detail screen for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    /// Empty until the record has loaded.
    pub sections: Vec<InfoSection>,
    pub status: Option<StatusLine>,
}

/// Titled group of label/value rows on the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoSection {
    pub title: String,
    pub rows: Vec<InfoRow>,
}

/// One labelled value on the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    pub title: String,
    pub value: String,
}

impl InfoRow {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

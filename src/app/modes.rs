//! Input and view mode state types for the application.
//!
//! These enums decide which keybindings are active and which screen renders.
//!
//! - **Normal**: navigation and commands on the user list
//! - **Search**: editing the search text, or navigating its results
//!
//! The view mode switches between the list and a single user's detail screen.

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Typing in the search input. Every edit restarts the debounce.
    Typing,

    /// Navigating the results with the search bar still visible.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// j/k (navigate), / (search), s/o (sort), r (reload), enter (details), q (quit).
    Normal,

    /// Active search with focus state.
    Search(SearchFocus),
}

/// Which screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    List,
    Detail,
}

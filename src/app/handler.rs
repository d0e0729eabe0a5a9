//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only entry point that mutates [`AppState`]. The
//! plugin runtime translates keys, timer wake-ups and HTTP results into
//! [`Event`]s, calls the handler, renders if asked to, and executes the
//! returned [`Action`]s.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `Select`, `Back`
//! - **Search input**: `SearchMode`, `FocusSearchBar`, `FocusResults`,
//!   `Char`, `Backspace`, `Escape`
//! - **List commands**: `SortFieldChanged`, `SortDirectionChanged`, `Reload`
//! - **Runtime**: `Initialize`, `Viewport`, `Tick`, `WebResponse`, `CloseFocus`
//!
//! # Loading More
//!
//! The next page is requested as soon as the last loaded user is on screen:
//! when the cursor lands on it, when a page arrives that does not fill the
//! pane, or when the pane grows. A failed page is not retried this way;
//! the next cursor move or resize retries it.
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use userdeck::api::UserApiClient;
//! use userdeck::ui::Theme;
//! use userdeck::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::new(UserApiClient::default(), Duration::from_secs(10), Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::Initialize, Instant::now())?;
//! assert!(should_render);
//! assert!(matches!(actions[0], Action::Fetch(_)));
//! # Ok::<(), userdeck::UserdeckError>(())
//! ```

use std::time::Instant;

use super::modes::{InputMode, SearchFocus, ViewMode};
use crate::api::{RequestKind, RequestTag};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{SortDirection, SortField};

/// Events triggered by user input, timers, or HTTP responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Permissions are granted; load the first page.
    Initialize,

    /// Moves the cursor down. Landing on the last loaded user requests the
    /// next page.
    KeyDown,
    /// Moves the cursor up.
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// Opens the detail screen for the selected user.
    Select,
    /// Enters search mode with typing focus.
    SearchMode,
    /// Returns focus from the results to the search input.
    FocusSearchBar,
    /// Moves focus from the search input to the results.
    FocusResults,
    /// Appends a character to the search text.
    Char(char),
    /// Removes the last search character, or leaves the detail screen.
    Backspace,
    /// Clears the search and leaves search mode, or leaves the detail screen.
    Escape,

    /// Sorts by the given field, restarting from the first page.
    SortFieldChanged(SortField),
    /// Sorts in the given direction, restarting from the first page.
    SortDirectionChanged(SortDirection),
    /// Refetches from the first page.
    Reload,
    /// Returns from the detail screen to the list.
    Back,

    /// The pane was rendered at a new height.
    Viewport { rows: usize },

    /// A scheduled wake-up arrived. Carries no owner; every timer checks it.
    Tick,

    /// An HTTP request issued through [`Action::Fetch`] completed.
    WebResponse {
        tag: RequestTag,
        status: u16,
        body: Vec<u8>,
    },
}

impl Event {
    /// Short name for spans and logs. Response bodies stay out of traces.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::KeyDown => "key_down",
            Self::KeyUp => "key_up",
            Self::CloseFocus => "close_focus",
            Self::Select => "select",
            Self::SearchMode => "search_mode",
            Self::FocusSearchBar => "focus_search_bar",
            Self::FocusResults => "focus_results",
            Self::Char(_) => "char",
            Self::Backspace => "backspace",
            Self::Escape => "escape",
            Self::SortFieldChanged(_) => "sort_field_changed",
            Self::SortDirectionChanged(_) => "sort_direction_changed",
            Self::Reload => "reload",
            Self::Back => "back",
            Self::Viewport { .. } => "viewport",
            Self::Tick => "tick",
            Self::WebResponse { .. } => "web_response",
        }
    }
}

/// Processes an event at time `now`, mutating `state`.
///
/// # Parameters
///
/// * `state` - Application state to mutate
/// * `event` - Event to process
/// * `now` - Current time, used by the debounce and timeout timers
///
/// # Returns
///
/// A tuple of `(should_render, actions)`: whether the UI should re-render,
/// and the actions to execute, in order.
///
/// # Errors
///
/// Currently every event is handled infallibly; the `Result` is kept so the
/// runtime reports future failures in one place.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event, now: Instant) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    let outcome = match event {
        Event::Initialize => (true, state.list.initialize(now)),
        Event::KeyDown => {
            if state.view_mode == ViewMode::Detail {
                return Ok((false, vec![]));
            }
            state.move_selection_down();
            let actions = if state.is_at_last_row() || state.is_end_visible() {
                state.list.on_reached_end(now)
            } else {
                vec![]
            };
            (true, actions)
        }
        Event::KeyUp => {
            if state.view_mode == ViewMode::Detail {
                return Ok((false, vec![]));
            }
            state.move_selection_up();
            (true, vec![])
        }
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
        Event::Select => {
            if state.view_mode == ViewMode::Detail {
                return Ok((false, vec![]));
            }
            let Some(user) = state.selected_user().cloned() else {
                tracing::debug!("no user selected");
                return Ok((false, vec![]));
            };
            tracing::debug!(user_id = user.id, "opening user detail");
            state.view_mode = ViewMode::Detail;
            (true, state.detail.open(&user, now))
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            (true, vec![])
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            (true, vec![])
        }
        Event::FocusResults => {
            state.input_mode = if state.list.search_input().is_empty() {
                InputMode::Normal
            } else {
                InputMode::Search(SearchFocus::Navigating)
            };
            (true, vec![])
        }
        Event::Char(c) => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            let mut text = state.list.search_input().to_string();
            text.push(*c);
            (true, state.list.on_search_text_changed(text, now))
        }
        Event::Backspace => match (state.view_mode, state.input_mode) {
            (ViewMode::Detail, _) => (true, back_to_list(state)),
            (ViewMode::List, InputMode::Search(_)) => {
                let mut text = state.list.search_input().to_string();
                if text.pop().is_none() {
                    return Ok((false, vec![]));
                }
                (true, state.list.on_search_text_changed(text, now))
            }
            (ViewMode::List, InputMode::Normal) => return Ok((false, vec![])),
        },
        Event::Escape => {
            if state.view_mode == ViewMode::Detail {
                (true, back_to_list(state))
            } else {
                tracing::debug!(query = %state.list.state().search_query, "clearing search");
                state.input_mode = InputMode::Normal;
                let has_search = !state.list.search_input().is_empty() || !state.list.state().search_query.is_empty();
                let actions = if has_search {
                    state.list.on_search_text_changed(String::new(), now)
                } else {
                    vec![]
                };
                (true, actions)
            }
        }
        Event::SortFieldChanged(field) => {
            let actions = state.list.on_sort_field_changed(*field, now);
            state.selected_index = 0;
            (true, actions)
        }
        Event::SortDirectionChanged(direction) => {
            let actions = state.list.on_sort_direction_changed(*direction, now);
            state.selected_index = 0;
            (true, actions)
        }
        Event::Reload => {
            tracing::debug!("reload requested");
            state.selected_index = 0;
            (true, state.list.reload(now))
        }
        Event::Back => (true, back_to_list(state)),
        Event::Viewport { rows } => {
            state.viewport_rows = *rows;
            (false, load_more_if_end_visible(state, now))
        }
        Event::Tick => {
            let mut actions = state.list.on_tick(now);
            actions.extend(state.detail.on_tick(now));
            (true, actions)
        }
        Event::WebResponse { tag, status, body } => {
            tracing::debug!(
                kind = ?tag.kind,
                generation = tag.generation,
                status = status,
                bytes = body.len(),
                "web response received"
            );
            let actions = match tag.kind {
                RequestKind::Page => {
                    let mut actions = state.list.on_page_response(tag.generation, *status, body, now);
                    if state.list.state().error.is_none() {
                        state.clamp_selection();
                        actions.extend(load_more_if_end_visible(state, now));
                    }
                    actions
                }
                RequestKind::Detail => {
                    state.detail.on_response(tag.generation, *status, body);
                    vec![]
                }
            };
            (true, actions)
        }
    };

    state.clamp_selection();
    Ok(outcome)
}

/// Requests the next page if the last loaded user is already on screen.
/// No-op while a fetch is in flight or when everything is loaded.
fn load_more_if_end_visible(state: &mut AppState, now: Instant) -> Vec<Action> {
    if state.is_end_visible() {
        tracing::debug!(rows = state.viewport_rows, "end of list visible");
        state.list.on_reached_end(now)
    } else {
        vec![]
    }
}

fn back_to_list(state: &mut AppState) -> Vec<Action> {
    tracing::debug!("closing user detail");
    state.detail.close();
    state.view_mode = ViewMode::List;
    vec![]
}

//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the API/domain layers. Data
//! flows one way:
//!
//! ```text
//! Keys / Timer / HTTP → Event → handle_event → State mutations → Actions
//!          ↑                                                        ↓
//!          └──────────── runtime executes Fetch / ScheduleWake ─────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects the runtime performs
//! - [`handler`]: event dispatch
//! - [`list`]: paging, search debounce, sort and the in-flight guard
//! - [`detail`]: the single-user screen
//! - [`timer`]: single-slot timers over non-cancellable wake-ups
//! - [`modes`]: input and view modes
//! - [`state`]: the state container and view model computation

pub mod actions;
pub mod detail;
pub mod handler;
pub mod list;
pub mod modes;
pub mod state;
pub mod timer;

pub use actions::Action;
pub use detail::{DetailController, DetailScreen};
pub use handler::{handle_event, Event};
pub use list::{ListController, ListState, DEFAULT_REQUEST_TIMEOUT, SEARCH_DEBOUNCE};
pub use modes::{InputMode, SearchFocus, ViewMode};
pub use state::AppState;
pub use timer::{TimerPoll, TimerSlot};

//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! controllers never perform I/O or schedule timers themselves; they describe
//! the work here and the runtime (`main.rs`) carries it out in order.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use userdeck::api::{ApiRequest, RequestTag};
//! use userdeck::Action;
//!
//! let actions = vec![
//!     Action::Fetch(ApiRequest {
//!         url: "https://dummyjson.com/users?limit=15&skip=0".to_string(),
//!         tag: RequestTag::page(1),
//!     }),
//!     Action::ScheduleWake(Duration::from_secs(10)),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use std::time::Duration;

use crate::api::ApiRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Performs an HTTP GET. The response must come back as
    /// [`Event::WebResponse`](crate::app::Event::WebResponse) carrying the
    /// same tag.
    Fetch(ApiRequest),

    /// Requests a [`Event::Tick`](crate::app::Event::Tick) after the given
    /// delay. Wake-ups cannot be cancelled; stale ones are ignored.
    ScheduleWake(Duration),
}

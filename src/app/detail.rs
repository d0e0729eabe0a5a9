//! Controller for the single-user detail screen.
//!
//! Opening a user starts one detail fetch tagged with its own generation.
//! Closing the screen (or opening another user) retires that generation, so a
//! response that arrives afterwards is dropped instead of overwriting the
//! wrong screen.

use std::time::{Duration, Instant};

use super::timer::{TimerPoll, TimerSlot};
use crate::api::{ApiRequest, RequestTag, UserApiClient};
use crate::app::Action;
use crate::domain::{UserDetail, UserSummary, UserdeckError};

/// What the detail screen currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailScreen {
    pub user_id: i64,
    /// Name from the list row, shown while the full record loads.
    pub full_name: String,
    pub user: Option<UserDetail>,
    pub is_loading: bool,
    pub error: Option<String>,
    generation: u64,
}

/// Fetches and holds the user shown on the detail screen.
///
/// At most one detail fetch is in flight; it has its own request timeout,
/// independent of the list's.
#[derive(Debug, Clone)]
pub struct DetailController {
    client: UserApiClient,
    request_timeout: Duration,
    timeout: TimerSlot,
    next_generation: u64,
    screen: Option<DetailScreen>,
}

impl DetailController {
    /// Creates a controller with no screen open.
    ///
    /// # Parameters
    ///
    /// * `client` - Builds the `{base}/{id}` URL and decodes the record
    /// * `request_timeout` - How long a detail fetch may stay unanswered
    #[must_use]
    pub fn new(client: UserApiClient, request_timeout: Duration) -> Self {
        Self {
            client,
            request_timeout,
            timeout: TimerSlot::new(),
            next_generation: 1,
            screen: None,
        }
    }

    /// The open screen, or `None` while the list is shown.
    #[must_use]
    pub const fn screen(&self) -> Option<&DetailScreen> {
        self.screen.as_ref()
    }

    /// Shows `user` and starts fetching the full record.
    ///
    /// Any previously open screen is replaced and its fetch retired.
    ///
    /// # Returns
    ///
    /// `Fetch` plus a timeout `ScheduleWake` when one is needed. Nothing if
    /// the URL could not be built, in which case the screen shows the error.
    pub fn open(&mut self, user: &UserSummary, now: Instant) -> Vec<Action> {
        let generation = self.next_generation;
        self.next_generation += 1;

        let mut screen = DetailScreen {
            user_id: user.id,
            full_name: user.full_name(),
            user: None,
            is_loading: false,
            error: None,
            generation,
        };

        let actions = match self.client.detail_url(user.id) {
            Ok(url) => {
                screen.is_loading = true;
                tracing::debug!(user_id = user.id, generation = generation, "fetching user detail");
                let mut actions = vec![Action::Fetch(ApiRequest {
                    url,
                    tag: RequestTag::detail(generation),
                })];
                actions.extend(self.timeout.arm(now, self.request_timeout).map(Action::ScheduleWake));
                actions
            }
            Err(e) => {
                tracing::warn!(user_id = user.id, error = %e, "failed to build detail request");
                screen.error = Some(e.to_string());
                vec![]
            }
        };

        self.screen = Some(screen);
        actions
    }

    /// Closes the screen. A response still on its way is dropped on arrival.
    pub fn close(&mut self) {
        self.timeout.cancel();
        self.screen = None;
    }

    /// Applies a detail response delivered by the runtime.
    ///
    /// # Parameters
    ///
    /// * `generation` - Generation echoed back in the request tag
    /// * `status` - HTTP status code
    /// * `body` - Raw response body
    ///
    /// Ignored unless the open screen is still waiting on `generation`.
    pub fn on_response(&mut self, generation: u64, status: u16, body: &[u8]) {
        let Some(screen) = self.screen.as_mut().filter(|s| s.is_loading && s.generation == generation) else {
            tracing::debug!(generation = generation, "discarding stale detail response");
            return;
        };

        self.timeout.cancel();
        screen.is_loading = false;
        match self.client.decode_detail(status, body) {
            Ok(user) => screen.user = Some(user),
            Err(e) => {
                tracing::warn!(user_id = screen.user_id, error = %e, "detail fetch failed");
                screen.error = Some(e.to_string());
            }
        }
    }

    /// Expires the detail fetch if its timeout has passed.
    pub fn on_tick(&mut self, now: Instant) -> Vec<Action> {
        match self.timeout.poll(now) {
            TimerPoll::Fired => {
                if let Some(screen) = self.screen.as_mut().filter(|s| s.is_loading) {
                    tracing::warn!(user_id = screen.user_id, "detail request timed out");
                    screen.is_loading = false;
                    let err = UserdeckError::Transport(format!(
                        "request timed out after {}s",
                        self.request_timeout.as_secs()
                    ));
                    screen.error = Some(err.to_string());
                    // Retire the generation so a late response is ignored.
                    screen.generation = 0;
                }
                vec![]
            }
            TimerPoll::Pending(remaining) => vec![Action::ScheduleWake(remaining)],
            TimerPoll::Waiting | TimerPoll::Idle => vec![],
        }
    }
}

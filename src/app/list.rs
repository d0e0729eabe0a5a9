//! Incremental-load and search-debounce controller for the user list.
//!
//! [`ListController`] owns the [`ListState`] the list screen renders from and
//! is the only thing that mutates it. Every operation returns the
//! [`Action`]s the runtime must perform (HTTP requests, timer wake-ups); the
//! results come back as later calls on the same thread, so no locking is
//! needed.
//!
//! # Fetch lifecycle
//!
//! ```text
//! Idle ──fetch()──▶ Loading ──response / timeout──▶ Idle (items or error)
//! ```
//!
//! There is never more than one fetch in flight. `fetch` while loading is
//! dropped. Filter changes while loading are recorded immediately and
//! collapse into a single queued reset fetch that starts as soon as the
//! in-flight one completes; the in-flight payload is then discarded because
//! it was computed for the old filter.
//!
//! Each started fetch gets a fresh generation id. Only a response carrying the
//! in-flight generation is applied; anything else (for example a response
//! arriving after its fetch timed out) is dropped.

use std::time::{Duration, Instant};

use super::timer::{TimerPoll, TimerSlot};
use crate::api::{ApiRequest, ListQuery, RequestTag, UserApiClient};
use crate::app::Action;
use crate::domain::error::{Result, UserdeckError};
use crate::domain::{Page, SortDirection, SortField, UserSummary};

/// Quiet period after the last search edit before the search is fetched.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default upper bound on how long a fetch may stay in flight.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Observable list state consumed by the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    /// Loaded users in fetch order.
    pub items: Vec<UserSummary>,
    pub current_page_index: usize,
    pub is_loading: bool,
    /// Committed search text; empty means unfiltered.
    pub search_query: String,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    /// Server count of users matching the current filter.
    pub total: usize,
    /// Message from the last failed fetch, cleared when a new fetch starts.
    pub error: Option<String>,
}

impl ListState {
    /// Whether the server reports users beyond the ones loaded.
    ///
    /// # Returns
    ///
    /// `true` while `items.len() < total`. Always `false` before the first
    /// successful fetch, since `total` is still 0.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.items.len() < self.total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchMode {
    Reset,
    Append,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    generation: u64,
    mode: FetchMode,
    /// Page index to restore if an append fetch fails.
    restore_page_index: usize,
}

/// Owns the list state and decides when to fetch.
///
/// Holds two [`TimerSlot`]s, one for the search debounce and one for the
/// request timeout, and the bookkeeping for the single in-flight fetch.
#[derive(Debug, Clone)]
pub struct ListController {
    state: ListState,
    client: UserApiClient,
    search_input: String,
    debounce: TimerSlot,
    timeout: TimerSlot,
    request_timeout: Duration,
    in_flight: Option<InFlight>,
    next_generation: u64,
    reset_queued: bool,
}

impl ListController {
    /// Creates a controller with an empty list and nothing in flight.
    ///
    /// # Parameters
    ///
    /// * `client` - Builds request URLs and decodes responses
    /// * `request_timeout` - How long a fetch may stay unanswered before it is
    ///   abandoned with a transport error
    ///
    /// # Example
    ///
    /// ```rust
    /// use userdeck::api::UserApiClient;
    /// use userdeck::app::{ListController, DEFAULT_REQUEST_TIMEOUT};
    ///
    /// let list = ListController::new(UserApiClient::default(), DEFAULT_REQUEST_TIMEOUT);
    /// assert!(list.state().items.is_empty());
    /// assert!(!list.state().is_loading);
    /// ```
    #[must_use]
    pub fn new(client: UserApiClient, request_timeout: Duration) -> Self {
        Self {
            state: ListState::default(),
            client,
            search_input: String::new(),
            debounce: TimerSlot::new(),
            timeout: TimerSlot::new(),
            request_timeout,
            in_flight: None,
            next_generation: 1,
            reset_queued: false,
        }
    }

    /// Read-only view of the list for rendering and tests.
    #[must_use]
    pub const fn state(&self) -> &ListState {
        &self.state
    }

    /// Search text as typed, possibly not yet committed by the debounce.
    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Whether a reset fetch is waiting for the in-flight fetch to finish.
    #[must_use]
    pub const fn is_reset_queued(&self) -> bool {
        self.reset_queued
    }

    /// Loads the first page if nothing has been loaded yet.
    pub fn initialize(&mut self, now: Instant) -> Vec<Action> {
        if self.state.items.is_empty() {
            self.fetch(true, now)
        } else {
            vec![]
        }
    }

    /// Records a search edit and restarts the debounce.
    ///
    /// Only the text present when the quiet period elapses is fetched.
    ///
    /// # Returns
    ///
    /// A `ScheduleWake` for the debounce when no earlier wake-up is already
    /// pending, otherwise nothing.
    pub fn on_search_text_changed(&mut self, text: impl Into<String>, now: Instant) -> Vec<Action> {
        self.search_input = text.into();
        tracing::trace!(input = %self.search_input, "search input changed");
        self.debounce.arm(now, SEARCH_DEBOUNCE).map(Action::ScheduleWake).into_iter().collect()
    }

    /// Switches the sort field and restarts from the first page.
    ///
    /// The new field is visible in [`ListState`] immediately. If a fetch is in
    /// flight the reset is queued behind it instead.
    ///
    /// # Returns
    ///
    /// The reset fetch actions, or nothing if `field` is already active or
    /// the reset was queued.
    pub fn on_sort_field_changed(&mut self, field: SortField, now: Instant) -> Vec<Action> {
        if self.state.sort_field == field {
            return vec![];
        }
        tracing::debug!(sort_field = ?field, "sort field changed");
        self.state.sort_field = field;
        self.request_reset(now)
    }

    /// Switches the sort direction. Same rules as
    /// [`ListController::on_sort_field_changed`].
    pub fn on_sort_direction_changed(&mut self, direction: SortDirection, now: Instant) -> Vec<Action> {
        if self.state.sort_direction == direction {
            return vec![];
        }
        tracing::debug!(sort_direction = ?direction, "sort direction changed");
        self.state.sort_direction = direction;
        self.request_reset(now)
    }

    /// Reloads from the first page with the current filter.
    pub fn reload(&mut self, now: Instant) -> Vec<Action> {
        self.request_reset(now)
    }

    /// Loads the next page when the end of the loaded list becomes visible.
    ///
    /// No-op while a fetch is in flight or when everything is loaded, so a
    /// burst of calls produces at most one page increment.
    pub fn on_reached_end(&mut self, now: Instant) -> Vec<Action> {
        if self.state.is_loading || !self.state.has_more() {
            tracing::trace!(
                is_loading = self.state.is_loading,
                loaded = self.state.items.len(),
                total = self.state.total,
                "reached end ignored"
            );
            return vec![];
        }
        let restore_page_index = self.state.current_page_index;
        self.state.current_page_index += 1;
        self.start_fetch(false, restore_page_index, now)
    }

    /// Starts a fetch of page `current_page_index`. Dropped entirely if one
    /// is already in flight.
    ///
    /// A reset fetch clears the loaded users and restarts from page 0 before
    /// the request is issued. An append fetch requests the current page as is;
    /// use [`ListController::on_reached_end`] to advance to the next one. If
    /// an append fails, the page index is left where this call found it.
    ///
    /// # Returns
    ///
    /// `Fetch` plus a `ScheduleWake` for the request timeout when one is
    /// needed, or nothing if the fetch was dropped or its URL could not be
    /// built (the error is then set on the state).
    pub fn fetch(&mut self, reset: bool, now: Instant) -> Vec<Action> {
        self.start_fetch(reset, self.state.current_page_index, now)
    }

    fn start_fetch(&mut self, reset: bool, restore_page_index: usize, now: Instant) -> Vec<Action> {
        if self.state.is_loading {
            tracing::debug!(reset = reset, "fetch dropped, another fetch is in flight");
            return vec![];
        }

        if reset {
            self.state.items.clear();
            self.state.current_page_index = 0;
            self.state.total = 0;
        }

        let query = ListQuery {
            page_index: self.state.current_page_index,
            sort_field: self.state.sort_field,
            sort_direction: self.state.sort_direction,
            search: self.state.search_query.clone(),
        };

        let url = match self.client.list_url(&query) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, "failed to build users request");
                if !reset {
                    self.state.current_page_index = restore_page_index;
                }
                self.state.error = Some(e.to_string());
                return vec![];
            }
        };

        let generation = self.next_generation;
        self.next_generation += 1;

        self.in_flight = Some(InFlight {
            generation,
            mode: if reset { FetchMode::Reset } else { FetchMode::Append },
            restore_page_index: if reset { 0 } else { restore_page_index },
        });
        self.state.is_loading = true;
        self.state.error = None;

        tracing::debug!(
            generation = generation,
            reset = reset,
            skip = query.skip(),
            search = %query.search,
            "fetching users"
        );

        let mut actions = vec![Action::Fetch(ApiRequest {
            url,
            tag: RequestTag::page(generation),
        })];
        actions.extend(self.timeout.arm(now, self.request_timeout).map(Action::ScheduleWake));
        actions
    }

    /// Applies a page response delivered by the runtime.
    ///
    /// # Parameters
    ///
    /// * `generation` - Generation echoed back in the request tag
    /// * `status` - HTTP status code
    /// * `body` - Raw response body
    ///
    /// # Returns
    ///
    /// The actions of a queued reset fetch, if one was waiting; otherwise
    /// nothing. Responses for any generation other than the in-flight one
    /// are dropped.
    pub fn on_page_response(&mut self, generation: u64, status: u16, body: &[u8], now: Instant) -> Vec<Action> {
        match self.in_flight {
            Some(flight) if flight.generation == generation => {
                self.in_flight = None;
                let outcome = self.client.decode_page(status, body);
                self.complete(flight, outcome, now)
            }
            _ => {
                tracing::debug!(generation = generation, "discarding stale users response");
                vec![]
            }
        }
    }

    /// Handles a timer wake-up: fires the search debounce and the request
    /// timeout when due, and re-schedules this controller's own wake-ups that
    /// arrived early.
    pub fn on_tick(&mut self, now: Instant) -> Vec<Action> {
        let mut actions = vec![];

        match self.debounce.poll(now) {
            TimerPoll::Fired => {
                tracing::debug!(query = %self.search_input, "search debounce elapsed");
                self.state.search_query.clone_from(&self.search_input);
                actions.extend(self.request_reset(now));
            }
            TimerPoll::Pending(remaining) => actions.push(Action::ScheduleWake(remaining)),
            TimerPoll::Waiting | TimerPoll::Idle => {}
        }

        match self.timeout.poll(now) {
            TimerPoll::Fired => {
                if let Some(flight) = self.in_flight.take() {
                    tracing::warn!(generation = flight.generation, "users request timed out");
                    let err = UserdeckError::Transport(format!(
                        "request timed out after {}s",
                        self.request_timeout.as_secs()
                    ));
                    actions.extend(self.complete(flight, Err(err), now));
                }
            }
            TimerPoll::Pending(remaining) => actions.push(Action::ScheduleWake(remaining)),
            TimerPoll::Waiting | TimerPoll::Idle => {}
        }

        actions
    }

    /// Resets now, or queues one reset behind the in-flight fetch.
    fn request_reset(&mut self, now: Instant) -> Vec<Action> {
        if self.state.is_loading {
            tracing::debug!("fetch in flight, queueing reset");
            self.reset_queued = true;
            return vec![];
        }
        self.fetch(true, now)
    }

    /// Ends the in-flight fetch. `is_loading` is cleared on every path.
    fn complete(&mut self, flight: InFlight, outcome: Result<Page>, now: Instant) -> Vec<Action> {
        self.timeout.cancel();
        self.state.is_loading = false;

        if self.reset_queued {
            self.reset_queued = false;
            tracing::debug!(
                generation = flight.generation,
                "filter changed while loading, discarding result and refetching"
            );
            return self.fetch(true, now);
        }

        match outcome {
            Ok(page) => {
                match flight.mode {
                    FetchMode::Reset => self.state.items = page.items,
                    FetchMode::Append => self.state.items.extend(page.items),
                }
                self.state.total = page.total;
                tracing::debug!(
                    generation = flight.generation,
                    loaded = self.state.items.len(),
                    total = self.state.total,
                    "users page applied"
                );
            }
            Err(e) => {
                tracing::warn!(generation = flight.generation, error = %e, "users fetch failed");
                if flight.mode == FetchMode::Append {
                    self.state.current_page_index = flight.restore_page_index;
                }
                self.state.error = Some(e.to_string());
            }
        }

        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(range: std::ops::Range<i64>) -> Vec<UserSummary> {
        range
            .map(|id| UserSummary {
                id,
                first_name: format!("First{id}"),
                last_name: format!("Last{id}"),
            })
            .collect()
    }

    fn body(range: std::ops::Range<i64>, total: usize) -> Vec<u8> {
        let users: Vec<serde_json::Value> = users(range)
            .into_iter()
            .map(|u| {
                serde_json::json!({
                    "id": u.id,
                    "firstName": u.first_name,
                    "lastName": u.last_name,
                    "age": 30,
                })
            })
            .collect();
        serde_json::json!({ "users": users, "total": total, "skip": 0, "limit": 15 })
            .to_string()
            .into_bytes()
    }

    fn fetches(actions: &[Action]) -> Vec<&ApiRequest> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::Fetch(req) => Some(req),
                _ => None,
            })
            .collect()
    }

    fn controller() -> ListController {
        ListController::new(UserApiClient::default(), DEFAULT_REQUEST_TIMEOUT)
    }

    /// Controller holding the first 15 of 42 users.
    fn loaded(now: Instant) -> ListController {
        let mut c = controller();
        let actions = c.fetch(true, now);
        let generation = fetches(&actions)[0].tag.generation;
        c.on_page_response(generation, 200, &body(1..16, 42), now);
        c
    }

    #[test]
    fn reset_fetch_loads_first_page() {
        let now = Instant::now();
        let mut c = controller();

        let actions = c.fetch(true, now);
        let reqs = fetches(&actions);
        assert_eq!(reqs.len(), 1);
        assert!(reqs[0].url.contains("skip=0"));
        assert!(reqs[0].url.contains("limit=15"));
        assert!(actions.contains(&Action::ScheduleWake(DEFAULT_REQUEST_TIMEOUT)));
        assert!(c.state().is_loading);

        let generation = reqs[0].tag.generation;
        c.on_page_response(generation, 200, &body(1..16, 42), now);

        let state = c.state();
        assert_eq!(state.items.len(), 15);
        assert_eq!(state.total, 42);
        assert_eq!(state.current_page_index, 0);
        assert!(!state.is_loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn reached_end_appends_next_page() {
        let now = Instant::now();
        let mut c = loaded(now);

        let actions = c.on_reached_end(now);
        let reqs = fetches(&actions);
        assert_eq!(reqs.len(), 1);
        assert!(reqs[0].url.contains("skip=15"));
        assert_eq!(c.state().current_page_index, 1);

        c.on_page_response(reqs[0].tag.generation, 200, &body(16..31, 42), now);
        let state = c.state();
        assert_eq!(state.items.len(), 30);
        assert_eq!(state.items, users(1..31));
        assert!(state.items.len() <= state.total);
    }

    #[test]
    fn repeated_reached_end_while_loading_starts_one_fetch() {
        let now = Instant::now();
        let mut c = loaded(now);

        let mut started = fetches(&c.on_reached_end(now)).len();
        for _ in 0..5 {
            started += fetches(&c.on_reached_end(now)).len();
        }
        assert_eq!(started, 1);
        assert_eq!(c.state().current_page_index, 1);
    }

    #[test]
    fn reached_end_is_noop_when_everything_is_loaded() {
        let now = Instant::now();
        let mut c = controller();
        let generation = fetches(&c.fetch(true, now))[0].tag.generation;
        c.on_page_response(generation, 200, &body(1..6, 5), now);

        assert!(c.on_reached_end(now).is_empty());
        assert_eq!(c.state().current_page_index, 0);
    }

    #[test]
    fn search_edits_within_window_fetch_once_with_last_text() {
        let start = Instant::now();
        let mut c = loaded(start);

        let wake = c.on_search_text_changed("ann", start);
        assert_eq!(wake, vec![Action::ScheduleWake(SEARCH_DEBOUNCE)]);
        c.on_search_text_changed("anna", start + Duration::from_millis(100));

        // Wake-up scheduled by the first edit: not due yet, reschedules.
        let early = c.on_tick(start + Duration::from_millis(300));
        assert!(fetches(&early).is_empty());
        assert!(early.contains(&Action::ScheduleWake(Duration::from_millis(100))));

        let fired = c.on_tick(start + Duration::from_millis(400));
        let reqs = fetches(&fired);
        assert_eq!(reqs.len(), 1);
        assert!(reqs[0].url.contains("/users/search?"));
        assert!(reqs[0].url.ends_with("q=anna"));
        assert_eq!(c.state().search_query, "anna");

        // Nothing else fires afterwards.
        assert!(fetches(&c.on_tick(start + Duration::from_secs(1))).is_empty());
    }

    #[test]
    fn reset_success_replaces_items() {
        let now = Instant::now();
        let mut c = loaded(now);
        let generation = fetches(&c.on_reached_end(now))[0].tag.generation;
        c.on_page_response(generation, 200, &body(16..31, 42), now);

        let actions = c.on_sort_field_changed(SortField::LastName, now);
        let req = fetches(&actions)[0].clone();
        assert!(req.url.contains("sortBy=lastName"));
        assert!(c.state().items.is_empty());
        assert_eq!(c.state().current_page_index, 0);

        c.on_page_response(req.tag.generation, 200, &body(100..115, 42), now);
        assert_eq!(c.state().items, users(100..115));
        assert_eq!(c.state().current_page_index, 0);
    }

    #[test]
    fn sort_change_while_loading_is_queued_and_stale_payload_discarded() {
        let now = Instant::now();
        let mut c = loaded(now);
        let append = fetches(&c.on_reached_end(now))[0].clone();

        let actions = c.on_sort_field_changed(SortField::LastName, now);
        assert!(fetches(&actions).is_empty());
        assert_eq!(c.state().sort_field, SortField::LastName);
        assert!(c.is_reset_queued());

        // A second change collapses into the same queued fetch.
        assert!(fetches(&c.on_sort_direction_changed(SortDirection::Desc, now)).is_empty());

        let actions = c.on_page_response(append.tag.generation, 200, &body(16..31, 42), now);
        let reqs = fetches(&actions);
        assert_eq!(reqs.len(), 1);
        assert!(reqs[0].url.contains("skip=0"));
        assert!(reqs[0].url.contains("sortBy=lastName"));
        assert!(reqs[0].url.contains("order=desc"));
        assert!(c.state().items.is_empty());
        assert!(c.state().is_loading);
        assert!(!c.is_reset_queued());
    }

    #[test]
    fn setting_same_sort_value_does_nothing() {
        let now = Instant::now();
        let mut c = loaded(now);
        assert!(c.on_sort_field_changed(SortField::FirstName, now).is_empty());
        assert!(c.on_sort_direction_changed(SortDirection::Asc, now).is_empty());
        assert_eq!(c.state().items.len(), 15);
    }

    #[test]
    fn malformed_json_keeps_items_and_sets_error() {
        let now = Instant::now();
        let mut c = loaded(now);
        let generation = fetches(&c.on_reached_end(now))[0].tag.generation;

        c.on_page_response(generation, 200, b"{ not json", now);

        let state = c.state();
        assert!(!state.is_loading);
        assert_eq!(state.items, users(1..16));
        assert!(state.error.as_deref().is_some_and(|e| e.starts_with("Error decoding users")));
        // Failed append does not skip a page on the next attempt.
        assert_eq!(state.current_page_index, 0);
        let retry = c.on_reached_end(now);
        assert!(fetches(&retry)[0].url.contains("skip=15"));
        assert!(c.state().error.is_none());
    }

    #[test]
    fn failed_direct_append_keeps_page_index() {
        let now = Instant::now();
        let mut c = loaded(now);
        let generation = fetches(&c.on_reached_end(now))[0].tag.generation;
        c.on_page_response(generation, 200, &body(16..31, 42), now);
        assert_eq!(c.state().current_page_index, 1);

        let retry = fetches(&c.fetch(false, now))[0].clone();
        assert!(retry.url.contains("skip=15"));
        c.on_page_response(retry.tag.generation, 500, b"boom", now);
        assert_eq!(c.state().current_page_index, 1);
        assert_eq!(c.state().items.len(), 30);

        let next = fetches(&c.on_reached_end(now))[0].clone();
        assert!(next.url.contains("skip=30"));
        c.on_page_response(next.tag.generation, 200, &body(31..43, 42), now);
        let state = c.state();
        assert_eq!(state.items, users(1..43));
        assert!(state.items.len() <= state.total);
    }

    #[test]
    fn failed_append_url_restores_page_index() {
        let now = Instant::now();
        let mut c = loaded(now);
        c.client = UserApiClient::new("nope");

        assert!(c.on_reached_end(now).is_empty());
        assert_eq!(c.state().current_page_index, 0);
        assert!(c.fetch(false, now).is_empty());
        assert_eq!(c.state().current_page_index, 0);
        assert!(!c.state().is_loading);
    }

    #[test]
    fn typing_during_fetch_schedules_few_wake_ups() {
        let start = Instant::now();
        let mut c = loaded(start);
        let append = c.on_reached_end(start);
        let mut wakes: Vec<Duration> = append
            .iter()
            .filter_map(|a| match a {
                Action::ScheduleWake(d) => Some(*d),
                _ => None,
            })
            .collect();

        let mut text = String::new();
        let mut fetched = 0;
        for i in 0..20u64 {
            text.push('a');
            let at = start + Duration::from_millis(10 * i);
            let actions = c.on_search_text_changed(text.clone(), at);
            wakes.extend(actions.iter().filter_map(|a| match a {
                Action::ScheduleWake(d) => Some(*d),
                _ => None,
            }));
            // Wake-ups requested by other timers keep arriving during the burst.
            let tick = c.on_tick(at);
            fetched += fetches(&tick).len();
            wakes.extend(tick.iter().filter_map(|a| match a {
                Action::ScheduleWake(d) => Some(*d),
                _ => None,
            }));
        }

        assert_eq!(fetched, 0);
        // The append reuses the timeout wake-up left over from the first page,
        // so the debounce is the only one that asks for a new one.
        assert_eq!(wakes, vec![SEARCH_DEBOUNCE]);
    }

    #[test]
    fn transport_failure_is_surfaced_without_retry() {
        let now = Instant::now();
        let mut c = controller();
        let generation = fetches(&c.fetch(true, now))[0].tag.generation;

        let actions = c.on_page_response(generation, 500, b"boom", now);
        assert!(actions.is_empty());
        assert!(!c.state().is_loading);
        assert_eq!(c.state().error.as_deref(), Some("Network error: HTTP 500: boom"));
    }

    #[test]
    fn fetch_while_loading_is_dropped() {
        let now = Instant::now();
        let mut c = controller();
        assert_eq!(fetches(&c.fetch(true, now)).len(), 1);
        assert!(c.fetch(true, now).is_empty());
        assert!(c.fetch(false, now).is_empty());
    }

    #[test]
    fn timeout_clears_loading_and_discards_late_response() {
        let start = Instant::now();
        let mut c = controller();
        let generation = fetches(&c.fetch(true, start))[0].tag.generation;

        // A wake-up meant for another timer leaves the timeout alone.
        assert!(c.on_tick(start + Duration::from_secs(5)).is_empty());
        assert!(c.state().is_loading);

        c.on_tick(start + DEFAULT_REQUEST_TIMEOUT);
        assert!(!c.state().is_loading);
        assert!(c
            .state()
            .error
            .as_deref()
            .is_some_and(|e| e.contains("timed out")));

        // The late response belongs to a retired generation.
        c.on_page_response(generation, 200, &body(1..16, 42), start + Duration::from_secs(11));
        assert!(c.state().items.is_empty());
    }

    #[test]
    fn stale_generation_is_ignored_while_newer_fetch_in_flight() {
        let start = Instant::now();
        let mut c = controller();
        let first = fetches(&c.fetch(true, start))[0].tag.generation;
        c.on_tick(start + DEFAULT_REQUEST_TIMEOUT);

        let second = fetches(&c.fetch(true, start + DEFAULT_REQUEST_TIMEOUT))[0].tag.generation;
        assert!(second > first);

        c.on_page_response(first, 200, &body(1..16, 42), start + DEFAULT_REQUEST_TIMEOUT);
        assert!(c.state().is_loading);
        assert!(c.state().items.is_empty());

        c.on_page_response(second, 200, &body(50..65, 42), start + DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(c.state().items, users(50..65));
    }

    #[test]
    fn initialize_only_fetches_when_empty() {
        let now = Instant::now();
        let mut c = controller();
        assert_eq!(fetches(&c.initialize(now)).len(), 1);

        let mut c = loaded(now);
        assert!(c.initialize(now).is_empty());
    }

    #[test]
    fn invalid_base_url_surfaces_error_without_loading() {
        let now = Instant::now();
        let mut c = ListController::new(UserApiClient::new("nope"), DEFAULT_REQUEST_TIMEOUT);
        assert!(c.fetch(true, now).is_empty());
        assert!(!c.state().is_loading);
        assert!(c
            .state()
            .error
            .as_deref()
            .is_some_and(|e| e.starts_with("Invalid request")));
    }
}

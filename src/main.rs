//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the userdeck library and the Zellij host:
//! it maps host events to library [`Event`]s, calls [`handle_event`], and
//! performs the returned [`Action`]s with host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build `AppState`
//! 2. **Permissions**: request `WebAccess`; the first page loads once granted
//! 3. **Update**: translate events, delegate to the library, run actions
//! 4. **Render**: report height changes as `Event::Viewport`, then call the
//!    library renderer
//!
//! # Event Mapping
//!
//! - `Key` → navigation, search and sort events depending on mode
//! - `Timer` → `Event::Tick`
//! - `WebRequestResult` → `Event::WebResponse`, matched by its context tag
//! - `PermissionRequestResult(Granted)` → `Event::Initialize`
//!
//! # Keybindings
//!
//! Everywhere in the list: `Ctrl+n`/`Ctrl+p` and arrows move.
//!
//! Normal mode: `j`/`k` move, `/` search, `s` toggle sort field, `o` toggle
//! sort order, `r` reload, `Enter` details, `Esc` clear search, `q` close.
//!
//! Search mode: characters edit the query, `Enter` moves to the results,
//! `/` returns to the query, `Esc` clears the search.
//!
//! Detail screen: `Esc`, `q` or `Backspace` go back.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::time::Instant;

use zellij_tile::prelude::*;

use userdeck::api::RequestTag;
use userdeck::{handle_event, Action, Config, Event, InputMode, SearchFocus, ViewMode};

register_plugin!(State);

struct State {
    app: userdeck::AppState,
    /// Height of the last render, so only changes are reported.
    rendered_rows: usize,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: userdeck::initialize(&Config::default()),
            rendered_rows: 0,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        userdeck::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(base_url = %config.base_url, "parsed configuration");

        self.app = userdeck::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _guard = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Tick,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                tracing::debug!("web access granted - loading users");
                Event::Initialize
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                tracing::warn!("web access denied - users cannot be loaded");
                return false;
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        if rows != self.rendered_rows {
            self.rendered_rows = rows;
            self.dispatch(&Event::Viewport { rows });
        }
        userdeck::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs `event` through the library and executes the resulting actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event, Instant::now()) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render = should_render, "event handled");
                for action in actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_web_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(tag) = RequestTag::from_context(context) else {
            tracing::debug!(status = status, "ignoring web result without a userdeck tag");
            return None;
        };
        Some(Event::WebResponse { tag, status, body })
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if self.app.view_mode == ViewMode::Detail {
            return match key.bare_key {
                BareKey::Esc => Some(Event::Escape),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Char('q') => Some(Event::Back),
                _ => None,
            };
        }

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        let list = self.app.list.state();
        Some(match (self.app.input_mode, key.bare_key) {
            (_, BareKey::Down) => Event::KeyDown,
            (_, BareKey::Up) => Event::KeyUp,
            (_, BareKey::Esc) => Event::Escape,
            (_, BareKey::Backspace) => Event::Backspace,

            (InputMode::Search(SearchFocus::Typing), BareKey::Enter) => Event::FocusResults,
            (InputMode::Search(SearchFocus::Typing), BareKey::Char(c)) => Event::Char(c),

            (InputMode::Search(SearchFocus::Navigating), BareKey::Char('/')) => Event::FocusSearchBar,
            (_, BareKey::Enter) => Event::Select,
            (_, BareKey::Char('j')) => Event::KeyDown,
            (_, BareKey::Char('k')) => Event::KeyUp,

            (InputMode::Normal, BareKey::Char('/')) => Event::SearchMode,
            (InputMode::Normal, BareKey::Char('s')) => Event::SortFieldChanged(list.sort_field.toggled()),
            (InputMode::Normal, BareKey::Char('o')) => Event::SortDirectionChanged(list.sort_direction.toggled()),
            (InputMode::Normal, BareKey::Char('r')) => Event::Reload,
            (InputMode::Normal, BareKey::Char('q')) => Event::CloseFocus,
            _ => return None,
        })
    }

    #[tracing::instrument(level = "debug")]
    fn execute_action(action: Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::Fetch(request) => {
                tracing::debug!(url = %request.url, generation = request.tag.generation, "issuing web request");
                let headers = BTreeMap::from([("Accept".to_string(), "application/json".to_string())]);
                web_request(request.url, HttpVerb::Get, headers, vec![], request.tag.to_context());
            }
            Action::ScheduleWake(delay) => set_timeout(delay.as_secs_f64()),
        }
    }
}

//! Userdeck: a Zellij plugin for browsing the users of a REST API.
//!
//! - Incremental loading, fifteen users per page, once the end of the list is on screen
//! - Server-side search with a 300 ms debounce
//! - Sorting by first or last name, ascending or descending
//! - A detail screen with each user's personal, work and address information
//! - Themeable ANSI rendering and OpenTelemetry tracing to a local file
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← web_request, set_timeout
//! └─────────────────────────────────────────────────────┘
//!                        │ Event / Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling                                   │
//! │  - List / detail controllers                        │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                   │
//! ┌───────────────┐                  ┌────────────────────┐
//! │ UI Layer      │                  │ API Layer          │
//! │ (ui/)         │                  │ (api/)             │
//! │ - Rendering   │                  │ - URL building     │
//! │ - Theming     │                  │ - Response decode  │
//! └───────────────┘                  └────────────────────┘
//!         │                                   │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure & Observability             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library never calls into the Zellij host. Controllers return
//! [`Action`]s; the shim performs them and feeds results back as [`Event`]s,
//! which keeps every state transition testable off-host.
//!
//! # Configuration
//!
//! ```kdl
//! plugin location="file:/path/to/userdeck.wasm" {
//!     base_url "https://dummyjson.com/users"
//!     request_timeout_secs "10"
//!     theme "catppuccin-mocha"
//!     theme_file "~/.config/zellij/userdeck-theme.toml"
//!     trace_level "info"
//! }
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus, ViewMode};
pub use domain::{Page, Result, SortDirection, SortField, UserDetail, UserSummary, UserdeckError};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::time::Duration;

use api::{UserApiClient, DEFAULT_BASE_URL};
use infrastructure::paths::expand_tilde;

/// Request timeout used when `request_timeout_secs` is absent or invalid.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Plugin configuration read from the Zellij layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Users endpoint. A value that does not parse is kept and reported on the
    /// first fetch.
    pub base_url: String,

    /// Seconds before an unanswered fetch is abandoned.
    pub request_timeout_secs: u64,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme; `~` maps to the sandbox `/host` mount.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the string map Zellij hands to `load`.
    ///
    /// Unknown keys are ignored and invalid values fall back to defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use userdeck::Config;
    ///
    /// let map = BTreeMap::from([
    ///     ("base_url".to_string(), "http://localhost:8080/users".to_string()),
    ///     ("request_timeout_secs".to_string(), "soon".to_string()),
    /// ]);
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.base_url, "http://localhost:8080/users");
    /// assert_eq!(config.request_timeout_secs, 10);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let base_url = config
            .get("base_url")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or_else(|| DEFAULT_BASE_URL.to_string(), String::from);

        let request_timeout_secs = config.get("request_timeout_secs").map_or(DEFAULT_REQUEST_TIMEOUT_SECS, |raw| {
            parse_timeout_secs(raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "using default request timeout");
                DEFAULT_REQUEST_TIMEOUT_SECS
            })
        });

        Self {
            base_url,
            request_timeout_secs,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// `request_timeout_secs` as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_timeout_secs(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(UserdeckError::Config("request_timeout_secs must be positive".to_string())),
        Ok(secs) => Ok(secs),
        Err(e) => Err(UserdeckError::Config(format!("request_timeout_secs {raw:?}: {e}"))),
    }
}

/// Resolves the theme: `theme_file`, then `theme`, then the default. Failures
/// are logged and fall through to the default.
fn resolve_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = expand_tilde(theme_file);
        match Theme::from_file(&path) {
            Ok(theme) => return theme,
            Err(e) => tracing::warn!(theme_file = %path, error = %e, "failed to load theme file, using default"),
        }
    }

    config.theme_name.as_deref().map_or_else(Theme::default, |name| {
        Theme::from_name(name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %name, "unknown theme, using default");
            Theme::default()
        })
    })
}

/// Builds the initial [`AppState`] from `config`. Nothing is fetched until
/// the runtime sends [`Event::Initialize`].
///
/// ```rust
/// use userdeck::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert!(state.list.state().items.is_empty());
/// assert_eq!(state.theme.name, "catppuccin-mocha");
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(base_url = %config.base_url, timeout_secs = config.request_timeout_secs, "initializing userdeck");

    AppState::new(
        UserApiClient::new(config.base_url.clone()),
        config.request_timeout(),
        resolve_theme(config),
    )
}

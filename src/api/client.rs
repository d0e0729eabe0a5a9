//! REST client for the users endpoint.
//!
//! [`UserApiClient`] owns URL construction and response decoding. It does not
//! perform I/O itself: the plugin runtime executes the request and feeds the
//! status and body back through [`UserApiClient::decode_page`] or
//! [`UserApiClient::decode_detail`].

use serde::Deserialize;
use url::Url;

use super::request::{ListQuery, PAGE_SIZE};
use crate::domain::error::{Result, UserdeckError};
use crate::domain::{Page, UserDetail, UserSummary};

/// Default users endpoint.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com/users";

/// Longest slice of an error body kept in a transport error message.
const ERROR_BODY_LIMIT: usize = 120;

/// JSON envelope returned by the list and search endpoints.
#[derive(Debug, Deserialize)]
struct UsersEnvelope {
    users: Vec<UserSummary>,
    total: usize,
    #[serde(default)]
    skip: usize,
    #[serde(default)]
    limit: usize,
}

/// Builds requests against a users endpoint and decodes its responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserApiClient {
    base_url: String,
}

impl Default for UserApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl UserApiClient {
    /// Creates a client for `base_url`.
    ///
    /// The URL is validated lazily: a malformed base surfaces as
    /// [`UserdeckError::InvalidRequest`] from the request builders.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Configured endpoint, exactly as given.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the URL for one list page.
    ///
    /// A non-empty search routes to `{base}/search` and adds `q`.
    ///
    /// # Errors
    ///
    /// Returns [`UserdeckError::InvalidRequest`] if the base URL does not parse
    /// or cannot carry path segments.
    ///
    /// # Example
    ///
    /// ```
    /// use userdeck::api::{ListQuery, UserApiClient};
    /// use userdeck::{SortDirection, SortField};
    ///
    /// let client = UserApiClient::default();
    /// let url = client.list_url(&ListQuery {
    ///     page_index: 1,
    ///     sort_field: SortField::LastName,
    ///     sort_direction: SortDirection::Desc,
    ///     search: "anna".to_string(),
    /// })?;
    /// assert_eq!(
    ///     url,
    ///     "https://dummyjson.com/users/search?limit=15&skip=15&sortBy=lastName&order=desc&q=anna"
    /// );
    /// # Ok::<(), userdeck::UserdeckError>(())
    /// ```
    pub fn list_url(&self, query: &ListQuery) -> Result<String> {
        let mut url = self.parse_base()?;

        if !query.search.is_empty() {
            Self::push_segment(&mut url, "search")?;
        }

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("limit", &PAGE_SIZE.to_string())
                .append_pair("skip", &query.skip().to_string())
                .append_pair("sortBy", query.sort_field.as_param())
                .append_pair("order", query.sort_direction.as_param());
            if !query.search.is_empty() {
                pairs.append_pair("q", &query.search);
            }
        }

        Ok(url.into())
    }

    /// Builds the URL for a single user's record, `{base}/{id}`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`UserApiClient::list_url`].
    pub fn detail_url(&self, id: i64) -> Result<String> {
        let mut url = self.parse_base()?;
        Self::push_segment(&mut url, &id.to_string())?;
        Ok(url.into())
    }

    /// Decodes a list/search response into a [`Page`].
    ///
    /// # Errors
    ///
    /// - [`UserdeckError::Transport`] for a non-2xx status
    /// - [`UserdeckError::Decode`] if the body does not match the envelope
    pub fn decode_page(&self, status: u16, body: &[u8]) -> Result<Page> {
        Self::check_status(status, body)?;
        let envelope: UsersEnvelope = serde_json::from_slice(body)?;

        tracing::debug!(
            received = envelope.users.len(),
            total = envelope.total,
            skip = envelope.skip,
            limit = envelope.limit,
            "decoded users page"
        );

        Ok(Page {
            items: envelope.users,
            total: envelope.total,
        })
    }

    /// Decodes a single-user response.
    ///
    /// # Errors
    ///
    /// Same conditions as [`UserApiClient::decode_page`].
    pub fn decode_detail(&self, status: u16, body: &[u8]) -> Result<UserDetail> {
        Self::check_status(status, body)?;
        Ok(serde_json::from_slice(body)?)
    }

    fn parse_base(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    fn push_segment(url: &mut Url, segment: &str) -> Result<()> {
        let base = url.as_str().to_string();
        url.path_segments_mut()
            .map_err(|()| UserdeckError::InvalidRequest(format!("{base} cannot be a base URL")))?
            .pop_if_empty()
            .push(segment);
        Ok(())
    }

    fn check_status(status: u16, body: &[u8]) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }
        let text = String::from_utf8_lossy(body);
        let snippet: String = text.trim().chars().take(ERROR_BODY_LIMIT).collect();
        Err(UserdeckError::Transport(if snippet.is_empty() {
            format!("HTTP {status}")
        } else {
            format!("HTTP {status}: {snippet}")
        }))
    }
}

//! Outbound request descriptions and their correlation tags.
//!
//! The plugin runtime performs HTTP asynchronously and hands the result back as
//! a separate event. Each request therefore carries a [`RequestTag`] that is
//! round-tripped through the runtime's string context map, so the response can
//! be matched to the fetch generation that issued it.

use std::collections::BTreeMap;

use crate::domain::{SortDirection, SortField};

/// Number of users requested per page.
pub const PAGE_SIZE: usize = 15;

const CONTEXT_KIND: &str = "userdeck_kind";
const CONTEXT_GENERATION: &str = "userdeck_generation";

/// What a request fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// One page of the user list.
    Page,
    /// A single user's full record.
    Detail,
}

impl RequestKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Detail => "detail",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "page" => Some(Self::Page),
            "detail" => Some(Self::Detail),
            _ => None,
        }
    }
}

/// Correlates a response with the fetch that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag {
    pub kind: RequestKind,
    pub generation: u64,
}

impl RequestTag {
    /// Tag for a list or search page fetch.
    #[must_use]
    pub const fn page(generation: u64) -> Self {
        Self { kind: RequestKind::Page, generation }
    }

    /// Tag for a single-user fetch.
    #[must_use]
    pub const fn detail(generation: u64) -> Self {
        Self { kind: RequestKind::Detail, generation }
    }

    /// Encodes the tag into the runtime's request context map.
    #[must_use]
    pub fn to_context(self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (CONTEXT_KIND.to_string(), self.kind.as_str().to_string()),
            (CONTEXT_GENERATION.to_string(), self.generation.to_string()),
        ])
    }

    /// Decodes a tag from a response context map.
    ///
    /// Returns `None` for responses that were not issued by this plugin or
    /// whose context was mangled.
    ///
    /// ```
    /// use userdeck::api::RequestTag;
    ///
    /// let tag = RequestTag::page(4);
    /// assert_eq!(RequestTag::from_context(&tag.to_context()), Some(tag));
    /// ```
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let kind = RequestKind::parse(context.get(CONTEXT_KIND)?)?;
        let generation = context.get(CONTEXT_GENERATION)?.parse().ok()?;
        Some(Self { kind, generation })
    }
}

/// A GET request ready for the runtime to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: String,
    pub tag: RequestTag,
}

/// Parameters of one list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page_index: usize,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    /// Empty means no filter.
    pub search: String,
}

impl ListQuery {
    /// Offset of the first user on this page: `page_index * PAGE_SIZE`.
    #[must_use]
    pub const fn skip(&self) -> usize {
        self.page_index * PAGE_SIZE
    }
}

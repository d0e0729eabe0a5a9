//! Users REST API collaborator.
//!
//! Builds the GET requests the controllers need and decodes the JSON the
//! runtime hands back. All network I/O is performed by the plugin runtime
//! (`web_request`), so this module stays synchronous and testable.
//!
//! # Modules
//!
//! - `client`: URL construction and response decoding
//! - `request`: Request descriptions, list query parameters, correlation tags

pub mod client;
pub mod request;

pub use client::{UserApiClient, DEFAULT_BASE_URL};
pub use request::{ApiRequest, ListQuery, RequestKind, RequestTag, PAGE_SIZE};

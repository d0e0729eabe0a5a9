//! Domain layer for the userdeck plugin.
//!
//! Core types independent of Zellij APIs and of the HTTP transport.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`user`]: User summary/detail models and the [`Page`] batch
//! - [`sort`]: Sort field and direction

pub mod error;
pub mod sort;
pub mod user;

pub use error::{Result, UserdeckError};
pub use sort::{SortDirection, SortField};
pub use user::{Address, Company, Page, UserDetail, UserSummary};

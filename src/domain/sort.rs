//! Sort configuration for the user list.
//!
//! Both enums serialize to the exact strings the API expects in the `sortBy`
//! and `order` query parameters.

use serde::{Deserialize, Serialize};

/// Field the server sorts users by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortField {
    #[default]
    #[serde(rename = "firstName")]
    FirstName,
    #[serde(rename = "lastName")]
    LastName,
}

impl SortField {
    /// Value of the `sortBy` query parameter.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
        }
    }

    /// Header label, e.g. `First Name`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
        }
    }

    /// The other field. Used by the `s` keybinding.
    /// The other field, for the single-key toggle.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::FirstName => Self::LastName,
            Self::LastName => Self::FirstName,
        }
    }
}

/// Sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Value of the `order` query parameter.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

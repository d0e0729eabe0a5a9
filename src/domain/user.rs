//! User domain models.
//!
//! [`UserSummary`] is the list row fetched page by page; [`UserDetail`] is the
//! full record shown on the detail screen. Both deserialize straight from the
//! API's camelCase JSON and ignore fields they do not name.

use serde::{Deserialize, Serialize};

/// One row of the user list. Identity is `id`; immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl UserSummary {
    /// Returns `"first last"`.
    ///
    /// ```
    /// use userdeck::UserSummary;
    ///
    /// let user = UserSummary { id: 1, first_name: "Emily".into(), last_name: "Johnson".into() };
    /// assert_eq!(user.full_name(), "Emily Johnson");
    /// ```
    /// `"{first} {last}"`, as shown in the list.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One batch of users returned by a single list fetch.
///
/// `total` is the server's count of every user matching the current filter,
/// not just the ones in `items`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub items: Vec<UserSummary>,
    pub total: usize,
}

/// Full user record for the detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub image: String,
    pub company: Company,
    pub address: Address,
}

impl UserDetail {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Gender with the first letter upper-cased (`"female"` → `"Female"`).
    #[must_use]
    pub fn display_gender(&self) -> String {
        let mut chars = self.gender.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
        })
    }
}

/// Employer block of a user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub department: String,
    pub title: String,
}

/// Postal address block of a user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

//! Skip/limit pagination for list endpoints.
//!
//! The backend pages with `skip` and `limit` query parameters rather than
//! page numbers, so `PageWindow` speaks that dialect directly.

use serde::{Deserialize, Serialize};

/// A skip/limit window over a list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// Number of items to skip.
    #[serde(default)]
    pub skip: u32,
    /// Maximum number of items to return.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    10
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl PageWindow {
    /// Creates a window starting at the first item.
    #[must_use]
    pub const fn first(limit: u32) -> Self {
        Self { skip: 0, limit }
    }
}

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending (newest first).
    #[default]
    Desc,
}

impl SortOrder {
    /// Returns the query-string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;

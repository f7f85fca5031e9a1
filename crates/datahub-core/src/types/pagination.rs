//! Offset-based paging for child listings.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 50;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 500;

/// Request parameters for a page of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of entries to fetch.
    pub limit: u64,
    /// Number of entries to skip.
    pub offset: u64,
}

impl PageRequest {
    /// Create the first page with the given size.
    pub fn first(limit: u64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            offset: 0,
        }
    }

    /// The page following this one.
    pub fn next(&self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset + self.limit,
        }
    }

    /// Whether a page that returned `fetched` entries may have successors.
    pub fn may_have_more(&self, fetched: usize) -> bool {
        fetched as u64 >= self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

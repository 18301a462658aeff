//! Domain types for the user directory.

use crate::error::FetchError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user record as served by the directory endpoint
///
/// Fields the endpoint sends beyond these are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Numeric identifier
    pub id: u64,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number, free-form
    pub phone: String,
    /// Website, without scheme
    pub website: String,
}

/// Identifies what is being fetched
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey(String);

impl QueryKey {
    /// Creates a query key
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key of the full user list
    #[must_use]
    pub fn users() -> Self {
        Self::new("users")
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token identifying one fetch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Creates a request id from a raw value
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fetch-{}", self.0)
    }
}

/// State of the user directory
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectoryState {
    /// Key of the last requested fetch
    pub key: Option<QueryKey>,
    /// Token of the fetch in flight
    pub pending: Option<RequestId>,
    /// Resolved records (empty while loading)
    pub users: Vec<UserRecord>,
    /// Message of the last failed fetch
    pub error: Option<String>,
    /// Value of the next [`RequestId`] to allocate
    pub next_request: u64,
}

impl DirectoryState {
    /// Creates an empty, idle directory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fetch is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Allocates a fresh request token
    pub fn allocate_request(&mut self) -> RequestId {
        let request = RequestId(self.next_request);
        self.next_request = self.next_request.wrapping_add(1);
        request
    }
}

/// User directory actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectoryAction {
    /// Start fetching `key`, superseding any fetch in flight
    Fetch {
        /// What to fetch
        key: QueryKey,
    },
    /// Abandon the fetch in flight
    Cancel,
    /// A fetch resolved
    Loaded {
        /// Token of the fetch
        request: RequestId,
        /// Records returned by the source
        users: Vec<UserRecord>,
    },
    /// A fetch failed
    Failed {
        /// Token of the fetch
        request: RequestId,
        /// Why it failed
        error: FetchError,
    },
}

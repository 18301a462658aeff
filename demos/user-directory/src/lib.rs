//! User directory
//!
//! A data-fetching container: give it a query key and a [`UserSource`], and it
//! exposes a loading flag, the resolved records, and the last error.
//!
//! - Each fetch runs as a cancellable effect; a newer fetch supersedes an older one
//! - Failures are held in state (error-boundary style), never returned
//! - No caching and no retry
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use user_directory::{HttpUserSource, QueryKey, UserDirectory};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = UserDirectory::new(Arc::new(HttpUserSource::default()));
//! directory.fetch(QueryKey::users()).await?;
//!
//! match directory.error().await {
//!     Some(error) => println!("failed: {error}"),
//!     None => println!("{} users", directory.users().await.len()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod directory;
pub mod error;
pub mod reducer;
pub mod source;
pub mod types;

pub use directory::{DirectoryStore, UserDirectory};
pub use error::FetchError;
pub use reducer::{DirectoryEnvironment, DirectoryReducer, FETCH_EFFECT};
pub use source::{parse_users, HttpUserSource, StaticUserSource, UserSource, DEFAULT_USERS_URL};
pub use types::{DirectoryAction, DirectoryState, QueryKey, RequestId, UserRecord};

//! Todo list container built on the composable UI architecture.
//!
//! The container holds an ordered list of todos and a single-line input
//! buffer. It demonstrates:
//!
//! - A synchronous reducer with no side effects
//! - A container facade ([`TodoList`]) over a [`Store`](composable_ui_runtime::Store)
//! - Testing with `ReducerTest`
//!
//! # Quick Start
//!
//! ```no_run
//! use todo::TodoList;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let list = TodoList::new();
//!
//! list.set_input("buy milk").await?;
//! list.add_todo().await?;
//!
//! for todo in list.todos().await {
//!     println!("- {}", todo.text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod list;
pub mod reducer;
pub mod types;

// Re-export commonly used types
pub use list::{TodoList, TodoStore};
pub use reducer::TodoReducer;
pub use types::{Todo, TodoAction, TodoState};

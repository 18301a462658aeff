//! Domain types for the todo list.

use serde::{Deserialize, Serialize};

/// A single todo item
///
/// Todos are appended and never edited or removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Text entered by the user (may be empty)
    pub text: String,
}

impl Todo {
    /// Creates a new todo
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// State of the todo list
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Todos in insertion order
    pub todos: Vec<Todo>,
    /// Current contents of the input buffer
    pub input: String,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            todos: Vec::new(),
            input: String::new(),
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }
}

/// Actions on the todo list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    /// Replace the input buffer
    SetInput {
        /// New buffer contents
        value: String,
    },
    /// Append the buffer as a todo and clear it
    AddTodo,
}

//! The todo list container a view binds to.

use crate::reducer::TodoReducer;
use crate::types::{Todo, TodoAction, TodoState};
use composable_ui_runtime::{Store, StoreError};
use tokio::sync::watch;

/// Store type driving a todo list
pub type TodoStore = Store<TodoState, TodoAction, (), TodoReducer>;

/// Todo list container
///
/// Clones share the same list.
#[derive(Clone)]
pub struct TodoList {
    store: TodoStore,
}

impl TodoList {
    /// Creates an empty todo list
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(TodoState::new())
    }

    /// Creates a todo list starting from `state`
    #[must_use]
    pub fn with_state(state: TodoState) -> Self {
        Self {
            store: Store::new(state, TodoReducer::new(), ()),
        }
    }

    /// Replace the input buffer
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store was shut down.
    pub async fn set_input(&self, value: impl Into<String>) -> Result<(), StoreError> {
        self.store
            .send(TodoAction::SetInput { value: value.into() })
            .await
            .map(drop)
    }

    /// Append the input buffer as a todo and clear the buffer
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store was shut down.
    pub async fn add_todo(&self) -> Result<(), StoreError> {
        self.store.send(TodoAction::AddTodo).await.map(drop)
    }

    /// Todos in insertion order
    pub async fn todos(&self) -> Vec<Todo> {
        self.store.state(|s| s.todos.clone()).await
    }

    /// Current input buffer
    pub async fn input(&self) -> String {
        self.store.state(|s| s.input.clone()).await
    }

    /// Subscribe to state changes
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.store.subscribe()
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &TodoStore {
        &self.store
    }
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new()
    }
}

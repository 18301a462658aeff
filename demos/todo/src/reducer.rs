//! Reducer logic for the todo list.

use crate::types::{Todo, TodoAction, TodoState};
use composable_ui_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Reducer for the todo list
///
/// Has no dependencies, so its environment is `()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::SetInput { value } => {
                state.input = value;
            },
            TodoAction::AddTodo => {
                // Empty input still produces a todo
                let text = std::mem::take(&mut state.input);
                tracing::debug!(len = text.len(), "Todo added");
                state.todos.push(Todo { text });
            },
        }

        smallvec![Effect::None]
    }
}

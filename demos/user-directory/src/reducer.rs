//! Reducer for the user directory.
//!
//! A fetch clears the previous result and error, marks the directory as
//! loading and starts the source call as a cancellable effect. Starting a new
//! fetch aborts the one in flight; a completion whose token is not the pending
//! one is discarded.

use crate::source::UserSource;
use crate::types::{DirectoryAction, DirectoryState};
use composable_ui_core::{cancellable, effect::Effect, effect::EffectId, reducer::Reducer, smallvec, SmallVec};
use std::sync::Arc;

/// Effect id of the fetch in flight
pub const FETCH_EFFECT: EffectId = EffectId::new("directory/fetch");

/// Dependencies of the directory reducer
#[derive(Clone)]
pub struct DirectoryEnvironment {
    /// Where records come from
    pub source: Arc<dyn UserSource>,
}

impl DirectoryEnvironment {
    /// Creates an environment around `source`
    #[must_use]
    pub fn new(source: Arc<dyn UserSource>) -> Self {
        Self { source }
    }
}

/// User directory reducer
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectoryReducer;

impl DirectoryReducer {
    /// Creates a new `DirectoryReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for DirectoryReducer {
    type State = DirectoryState;
    type Action = DirectoryAction;
    type Environment = DirectoryEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            DirectoryAction::Fetch { key } => {
                let request = state.allocate_request();
                if let Some(previous) = state.pending.replace(request) {
                    tracing::debug!(%previous, %request, "Fetch superseded");
                }
                state.users.clear();
                state.error = None;

                let call = env.source.fetch(&key);
                state.key = Some(key);

                smallvec![cancellable! {
                    id: FETCH_EFFECT,
                    async {
                        Some(match call.await {
                            Ok(users) => DirectoryAction::Loaded { request, users },
                            Err(error) => DirectoryAction::Failed { request, error },
                        })
                    }
                }]
            },

            DirectoryAction::Cancel => {
                if state.pending.take().is_some() {
                    smallvec![Effect::Cancel(FETCH_EFFECT)]
                } else {
                    smallvec![Effect::None]
                }
            },

            DirectoryAction::Loaded { request, users } => {
                if state.pending == Some(request) {
                    state.pending = None;
                    state.users = users;
                } else {
                    tracing::debug!(%request, "Stale fetch result discarded");
                }
                smallvec![Effect::None]
            },

            DirectoryAction::Failed { request, error } => {
                if state.pending == Some(request) {
                    tracing::warn!(%request, %error, "User fetch failed");
                    state.pending = None;
                    state.error = Some(error.to_string());
                } else {
                    tracing::debug!(%request, "Stale fetch failure discarded");
                }
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::source::StaticUserSource;
    use crate::types::{QueryKey, RequestId};
    use composable_ui_testing::{assertions, resolve_effects, ReducerTest};

    fn env() -> DirectoryEnvironment {
        DirectoryEnvironment::new(Arc::new(StaticUserSource::sample()))
    }

    fn loading(request: u64) -> DirectoryState {
        DirectoryState {
            key: Some(QueryKey::users()),
            pending: Some(RequestId::new(request)),
            next_request: request + 1,
            ..DirectoryState::default()
        }
    }

    #[test]
    fn fetch_enters_loading() {
        ReducerTest::new(DirectoryReducer::new())
            .with_env(env())
            .given_state(DirectoryState {
                error: Some("old failure".into()),
                ..DirectoryState::default()
            })
            .when_action(DirectoryAction::Fetch { key: QueryKey::users() })
            .then_state(|state| {
                assert!(state.is_loading());
                assert!(state.users.is_empty());
                assert!(state.error.is_none());
                assert_eq!(state.key, Some(QueryKey::users()));
            })
            .then_effects(|effects| {
                assertions::assert_has_cancellable_effect(effects, &FETCH_EFFECT);
            })
            .run();
    }

    #[test]
    fn failure_is_captured_in_state() {
        ReducerTest::new(DirectoryReducer::new())
            .with_env(env())
            .given_state(loading(0))
            .when_action(DirectoryAction::Failed {
                request: RequestId::new(0),
                error: FetchError::Http("connection refused".into()),
            })
            .then_state(|state| {
                assert!(!state.is_loading());
                assert_eq!(state.error.as_deref(), Some("Request failed: connection refused"));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn stale_result_is_discarded() {
        ReducerTest::new(DirectoryReducer::new())
            .with_env(env())
            .given_state(loading(2))
            .when_action(DirectoryAction::Loaded {
                request: RequestId::new(1),
                users: Vec::new(),
            })
            .then_state(|state| {
                assert_eq!(state.pending, Some(RequestId::new(2)));
            })
            .run();
    }

    #[test]
    fn cancel_stops_loading() {
        ReducerTest::new(DirectoryReducer::new())
            .with_env(env())
            .given_state(loading(0))
            .when_action(DirectoryAction::Cancel)
            .then_state(|state| assert!(!state.is_loading()))
            .then_effects(|effects| assertions::assert_cancels(effects, &FETCH_EFFECT))
            .run();
    }

    #[tokio::test]
    async fn fetch_resolves_inline() {
        let reducer = DirectoryReducer::new();
        let env = env();
        let mut state = DirectoryState::new();

        let effects = reducer.reduce(&mut state, DirectoryAction::Fetch { key: QueryKey::users() }, &env);
        for action in resolve_effects(effects).await {
            reducer.reduce(&mut state, action, &env);
        }

        assert!(!state.is_loading());
        assert_eq!(state.users.len(), 3);
    }
}

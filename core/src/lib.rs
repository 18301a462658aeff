//! # Composable UI Core
//!
//! Core traits and types for building UI state containers as reducers.
//!
//! A state container is split into a pure core and an imperative shell:
//!
//! - **State**: The fields a view renders
//! - **Action**: Every input to a container (user intents and async results)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution), optionally cancellable
//! - **Environment**: Injected dependencies via traits
//!
//! The runtime crate owns execution: it holds the state, runs the reducer and
//! executes the effects it returns, feeding their result actions back in.
//!
//! ## Example
//!
//! ```
//! use composable_ui_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct InputState {
//!     value: String,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum InputAction {
//!     Changed(String),
//!     Cleared,
//! }
//!
//! struct InputReducer;
//!
//! impl Reducer for InputReducer {
//!     type State = InputState;
//!     type Action = InputAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut InputState,
//!         action: InputAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<InputAction>; 4]> {
//!         match action {
//!             InputAction::Changed(value) => state.value = value,
//!             InputAction::Cleared => state.value.clear(),
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = InputState::default();
//! InputReducer.reduce(&mut state, InputAction::Changed("hello".into()), &());
//! assert_eq!(state.value, "hello");
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{smallvec, SmallVec};

/// Declarative macros for building effects
pub mod effect_macros;

/// Reducer module - The core trait for container logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They hold every transition of a container and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for container logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Decides whether the action applies to the current state
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Returns
        ///
        /// The effects to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable and cancellable.
pub mod effect {
    use std::borrow::Cow;
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Identifier used to cancel in-flight effects
    ///
    /// Effects wrapped in [`Effect::Cancellable`] are registered under their id.
    /// Starting a new cancellable effect with the same id cancels the previous
    /// one, and [`Effect::Cancel`] aborts every effect registered under the id.
    ///
    /// # Examples
    ///
    /// ```
    /// use composable_ui_core::effect::EffectId;
    ///
    /// const PAYMENT: EffectId = EffectId::new("checkout/payment");
    /// assert_eq!(PAYMENT.as_str(), "checkout/payment");
    /// ```
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct EffectId(Cow<'static, str>);

    impl EffectId {
        /// Create an effect id from a static string
        #[must_use]
        pub const fn new(id: &'static str) -> Self {
            Self(Cow::Borrowed(id))
        }

        /// Get the id as a string slice
        #[must_use]
        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl From<String> for EffectId {
        fn from(id: String) -> Self {
            Self(Cow::Owned(id))
        }
    }

    impl std::fmt::Display for EffectId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timeouts, simulated latency)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

        /// Run `effect` under a cancellation id
        ///
        /// Any effect already in flight under the same id is cancelled first.
        Cancellable {
            /// Cancellation id
            id: EffectId,
            /// The effect to run
            effect: Box<Effect<Action>>,
        },

        /// Cancel every in-flight effect registered under the id
        Cancel(EffectId),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Cancellable { id, effect } => f
                    .debug_struct("Effect::Cancellable")
                    .field("id", id)
                    .field("effect", effect)
                    .finish(),
                Effect::Cancel(id) => f.debug_tuple("Effect::Cancel").field(id).finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Register this effect under a cancellation id
        #[must_use]
        pub fn cancellable(self, id: EffectId) -> Effect<Action> {
            Effect::Cancellable {
                id,
                effect: Box::new(self),
            }
        }

        /// Whether this effect does nothing when executed
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    effects.iter().all(Effect::is_none)
                },
                Effect::Cancellable { effect, .. } => effect.is_none(),
                Effect::Delay { .. } | Effect::Future(_) | Effect::Cancel(_) => false,
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// External dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::{Effect, EffectId};
    use std::time::Duration;

    #[derive(Clone, Debug)]
    enum TestAction {
        Done,
    }

    #[test]
    fn nested_noops_are_none() {
        let effect: Effect<TestAction> = Effect::merge(vec![
            Effect::None,
            Effect::chain(vec![Effect::None]),
        ]);
        assert!(effect.is_none());
    }

    #[test]
    fn delay_and_cancel_are_not_none() {
        let delay = Effect::Delay {
            duration: Duration::from_millis(10),
            action: Box::new(TestAction::Done),
        };
        assert!(!delay.is_none());
        assert!(!Effect::<TestAction>::Cancel(EffectId::new("x")).is_none());
    }

    #[test]
    fn cancellable_wraps_effect() {
        let effect = Effect::<TestAction>::None.cancellable(EffectId::new("fetch"));
        match effect {
            Effect::Cancellable { id, effect } => {
                assert_eq!(id.as_str(), "fetch");
                assert!(effect.is_none());
            },
            other => unreachable!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn effect_id_from_owned_string() {
        let id = EffectId::from(format!("users/{}", 7));
        assert_eq!(id, EffectId::from("users/7".to_string()));
        assert_eq!(id.to_string(), "users/7");
    }
}

//! # Composable UI Testing
//!
//! Testing utilities and helpers for composable UI state containers.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then builder for reducers ([`ReducerTest`])
//! - Assertion helpers for effects
//! - [`resolve_effects`], which runs effects inline without a store
//!
//! ## Example
//!
//! ```ignore
//! use composable_ui_testing::{test_clock, ReducerTest, assertions};
//!
//! ReducerTest::new(CounterReducer::new())
//!     .with_env(CounterEnvironment::new(test_clock()))
//!     .given_state(CounterState::default())
//!     .when_action(CounterAction::Tick)
//!     .then_state(|state| assert_eq!(state.count, 1))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use composable_ui_core::environment::Clock;


pub use reducer_test::{assertions, resolve_effects, ReducerTest};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use chrono::TimeZone;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use composable_ui_testing::mocks::FixedClock;
    /// use composable_ui_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            Utc.timestamp_opt(1_735_689_600, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock};

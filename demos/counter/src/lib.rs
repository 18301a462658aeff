//! # Counter
//!
//! A repeating counter "hook" built on the composable UI architecture.
//!
//! The counter is a monotonic integer that starts at zero and is incremented
//! once per period while the hook is active. Activation starts a timer on the
//! store; dropping the hook cancels the timer and tears the store down, so no
//! tick ever lands after deactivation.
//!
//! The hook's count never goes down: besides its own ticks it only accepts a
//! manual [`IntervalCounter::increment`]. The free-standing
//! [`SignalCounter`] runs the same reducer without a timer and also takes
//! `Decrement` and `Reset`. Both observe changes through the store's
//! state-change subscription.
//!
//! ## Example
//!
//! ```no_run
//! use counter::{IntervalCounter, DEFAULT_TICK_PERIOD};
//!
//! # async fn example() {
//! let counter = IntervalCounter::activate(DEFAULT_TICK_PERIOD);
//! tokio::time::sleep(DEFAULT_TICK_PERIOD * 3).await;
//! println!("count = {}", counter.count().await);
//! drop(counter); // timer cancelled
//! # }
//! ```

use composable_ui_core::{
    effect::Effect,
    environment::{Clock, SystemClock},
    reducer::Reducer,
    smallvec, DateTime, SmallVec, Utc,
};
use composable_ui_runtime::{EffectHandle, Store, StoreError, Subscription};
use std::time::Duration;
use tokio::sync::watch;

/// Period used when a consumer does not pick one
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(1000);

/// Shortest period the timer runs at; shorter requests are raised to it
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Counter state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterState {
    /// Current count value
    pub count: i64,
    /// Clock time of the most recent timer tick
    pub last_tick_at: Option<DateTime<Utc>>,
}

/// Counter actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterAction {
    /// One timer period elapsed
    Tick,
    /// Increment the counter by 1
    Increment,
    /// Decrement the counter by 1
    Decrement,
    /// Reset the counter to 0
    Reset,
}

/// Counter environment
#[derive(Debug, Clone)]
pub struct CounterEnvironment<C: Clock> {
    /// Clock used to stamp ticks
    pub clock: C,
}

impl<C: Clock> CounterEnvironment<C> {
    /// Create a new counter environment with the given clock
    #[must_use]
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }
}

/// Counter reducer
///
/// Pure state machine: every action returns `Effect::None`. The repeating
/// timer lives in the store ([`Store::interval`]), not in the reducer.
#[derive(Debug, Clone, Copy)]
pub struct CounterReducer<C> {
    _phantom: std::marker::PhantomData<C>,
}

impl<C> CounterReducer<C> {
    /// Create a new counter reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<C> Default for CounterReducer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Reducer for CounterReducer<C> {
    type State = CounterState;
    type Action = CounterAction;
    type Environment = CounterEnvironment<C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CounterAction::Tick => {
                state.count = state.count.saturating_add(1);
                state.last_tick_at = Some(environment.clock.now());
                tracing::trace!(count = state.count, "Counter ticked");
            },
            CounterAction::Increment => {
                state.count = state.count.saturating_add(1);
            },
            CounterAction::Decrement => {
                state.count = state.count.saturating_sub(1);
            },
            CounterAction::Reset => {
                state.count = 0;
            },
        }

        smallvec![Effect::None]
    }
}

/// Store type driving a counter
pub type CounterStore<C> = Store<CounterState, CounterAction, CounterEnvironment<C>, CounterReducer<C>>;

/// The repeating counter hook
///
/// Holds the store and the timer subscription. Dropping it deactivates the
/// hook: the timer is aborted and the store rejects every further action.
pub struct IntervalCounter<C: Clock + Clone + 'static = SystemClock> {
    store: CounterStore<C>,
    period: Duration,
    ticker: Subscription,
}

impl IntervalCounter<SystemClock> {
    /// Activate a counter ticking every `period` on the system clock
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn activate(period: Duration) -> Self {
        Self::with_environment(period, CounterEnvironment::new(SystemClock))
    }
}

impl<C: Clock + Clone + 'static> IntervalCounter<C> {
    /// Activate a counter with an explicit environment
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn with_environment(period: Duration, environment: CounterEnvironment<C>) -> Self {
        let period = period.max(MIN_TICK_PERIOD);
        let store = Store::new(CounterState::default(), CounterReducer::new(), environment);
        let ticker = store.interval(period, CounterAction::Tick);
        tracing::debug!(period_ms = period.as_millis(), "Interval counter activated");

        Self {
            store,
            period,
            ticker,
        }
    }

    /// Current count
    pub async fn count(&self) -> i64 {
        self.store.state(|s| s.count).await
    }

    /// Snapshot of the full state
    pub async fn snapshot(&self) -> CounterState {
        self.store.state(Clone::clone).await
    }

    /// Current tick period, as the timer runs it
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Restart the timer with a new period, keeping the accumulated count
    ///
    /// The old timer is cancelled before the first tick of the new one can fire.
    pub fn set_period(&mut self, period: Duration) {
        let period = period.max(MIN_TICK_PERIOD);
        if period == self.period {
            return;
        }
        self.ticker = self.store.interval(period, CounterAction::Tick);
        self.period = period;
        tracing::debug!(period_ms = period.as_millis(), "Interval counter period changed");
    }

    /// Bump the count by one outside the timer
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store was torn down.
    pub async fn increment(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(CounterAction::Increment).await
    }

    /// Subscribe to state changes
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.store.subscribe()
    }
}

impl<C: Clock + Clone + 'static> Drop for IntervalCounter<C> {
    fn drop(&mut self) {
        self.store.teardown();
        tracing::debug!(finished = self.ticker.is_finished(), "Interval counter deactivated");
    }
}

/// A counter driven only by manual actions
///
/// Runs the counter reducer without a timer. Unlike [`IntervalCounter`] it can
/// count down and be reset.
#[derive(Clone)]
pub struct SignalCounter {
    store: CounterStore<SystemClock>,
}

impl SignalCounter {
    /// Create a counter at zero
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Store::new(
                CounterState::default(),
                CounterReducer::new(),
                CounterEnvironment::new(SystemClock),
            ),
        }
    }

    /// Add one
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store was shut down.
    pub async fn increment(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(CounterAction::Increment).await
    }

    /// Subtract one
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store was shut down.
    pub async fn decrement(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(CounterAction::Decrement).await
    }

    /// Back to zero
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store was shut down.
    pub async fn reset(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(CounterAction::Reset).await
    }

    /// Current count
    pub async fn count(&self) -> i64 {
        self.store.state(|s| s.count).await
    }

    /// Subscribe to state changes
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.store.subscribe()
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &CounterStore<SystemClock> {
        &self.store
    }
}

impl Default for SignalCounter {
    fn default() -> Self {
        Self::new()
    }
}

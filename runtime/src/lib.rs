//! # Composable UI Runtime
//!
//! Runtime implementation for composable UI state containers.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that owns state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to reducers
//! - **In-flight registry**: Tracks running effects so they can be cancelled by id or on teardown
//! - **Subscriptions**: State-change notifications and interval timers with drop-cancellation
//!
//! ## Example
//!
//! ```ignore
//! use composable_ui_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//!
//! // Unmount: reject further actions and abort in-flight effects
//! store.teardown();
//! ```

use composable_ui_core::{
    effect::{Effect, EffectId},
    reducer::Reducer,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::AbortHandle;

/// Prometheus metrics for observability
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down (or torn down) and not accepting new actions
        ///
        /// Returned by `send()` after `shutdown()` or `teardown()`. Results of
        /// effects that finish after teardown are rejected with this error and
        /// never reach the reducer.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for effects or a terminal action
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use composable_ui_runtime::StoreConfig;
/// use std::time::Duration;
///
/// let config = StoreConfig::default()
///     .with_broadcast_capacity(64)
///     .with_shutdown_timeout(Duration::from_secs(5));
/// assert_eq!(config.broadcast_capacity, 64);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Capacity of the action broadcast channel
    pub broadcast_capacity: usize,
    /// Default timeout for graceful shutdown
    pub default_shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(broadcast_capacity: usize, default_shutdown_timeout: Duration) -> Self {
        Self {
            broadcast_capacity,
            default_shutdown_timeout,
        }
    }

    /// Set the action broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Set the default shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.default_shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
            default_shutdown_timeout: Duration::from_secs(30),
        }
    }
}

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for the effects of one action
/// to complete. An effect counts as complete once its result action (if any)
/// has been reduced, or once it has been cancelled.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(Action::Start).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// // All effects from Action::Start are now complete
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a new handle together with the tracking context used by the executor
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: Arc::new(tx),
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    ///
    /// Useful for initialization in loops where you need a `last_handle`.
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Number of effects still running for this action
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait for all effects to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                // Every tracker is gone, so nothing can still be running
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: Effect tracking context passed through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: Arc<watch::Sender<()>>,
}

impl EffectTracking {
    /// Increment the effect counter (effect started)
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Decrement the effect counter (effect completed)
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Counter reached zero, notify waiters
            self.notifier.send_replace(());
        }
    }
}

/// Internal: RAII guard that decrements effect counter on drop
///
/// Built before the task is spawned so that a task aborted before its first
/// poll still releases its slot.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Registry entries stay valid even if a holder panicked
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Internal: one running effect task
struct InFlightTask {
    id: Option<EffectId>,
    abort: AbortHandle,
}

/// Internal: registry of running effect tasks
///
/// Entries are removed by the task itself when it finishes and by
/// `cancel`/`cancel_all` when it is aborted.
#[derive(Clone, Default)]
struct InFlight {
    next_key: Arc<AtomicU64>,
    tasks: Arc<Mutex<HashMap<u64, InFlightTask>>>,
}

/// Internal: removes a task from the registry when the task is dropped
struct InFlightGuard {
    key: u64,
    tasks: Arc<Mutex<HashMap<u64, InFlightTask>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock(&self.tasks).remove(&self.key);
    }
}

impl InFlight {
    fn spawn<F>(&self, id: Option<EffectId>, task: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let key = self.next_key.fetch_add(1, Ordering::Relaxed);
        let guard = InFlightGuard {
            key,
            tasks: Arc::clone(&self.tasks),
        };

        // Hold the lock across spawn so the entry exists before the task can remove it
        let mut tasks = lock(&self.tasks);
        let handle = tokio::spawn(async move {
            let _guard = guard;
            task.await;
        });
        tasks.insert(
            key,
            InFlightTask {
                id,
                abort: handle.abort_handle(),
            },
        );
    }

    /// Abort every task registered under `id`, returning how many were aborted
    fn cancel(&self, id: &EffectId) -> usize {
        let aborted: Vec<AbortHandle> = {
            let mut tasks = lock(&self.tasks);
            let keys: Vec<u64> = tasks
                .iter()
                .filter(|(_, task)| task.id.as_ref() == Some(id))
                .map(|(key, _)| *key)
                .collect();
            keys.into_iter()
                .filter_map(|key| tasks.remove(&key))
                .map(|task| task.abort)
                .collect()
        };

        for handle in &aborted {
            handle.abort();
        }
        aborted.len()
    }

    /// Abort every registered task
    fn cancel_all(&self) -> usize {
        let aborted: Vec<AbortHandle> = lock(&self.tasks)
            .drain()
            .map(|(_, task)| task.abort)
            .collect();

        for handle in &aborted {
            handle.abort();
        }
        aborted.len()
    }

    fn len(&self) -> usize {
        lock(&self.tasks).len()
    }
}

/// Guard for a running subscription (interval timer)
///
/// Dropping the guard cancels the subscription; no timer outlives it.
#[derive(Debug)]
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    abort: AbortHandle,
}

impl Subscription {
    /// Cancel the subscription explicitly
    pub fn cancel(self) {
        drop(self);
    }

    /// Whether the subscription task has stopped
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

/// Store module - The runtime for reducers
///
/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, DecrementGuard, Duration, Effect,
        EffectHandle, EffectId, EffectTracking, InFlight, Ordering, Reducer, RwLock, StoreConfig,
        StoreError, Subscription,
    };
    use tokio::sync::{broadcast, watch};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (container logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop and cancellation)
    ///
    /// A store is an explicit value: create one per container instance and
    /// pass it to whatever needs it. Clones share the same state.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        in_flight: InFlight,
        /// Action broadcast channel for observing actions produced by effects
        action_broadcast: broadcast::Sender<A>,
        /// State version, bumped after every reduced action
        changes: Arc<watch::Sender<u64>>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default()`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with a custom configuration
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));
            let (changes, _) = watch::channel(0);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                config,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                in_flight: InFlight::default(),
                action_broadcast,
                changes: Arc::new(changes),
            }
        }

        /// The configuration this store was built with
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }

        /// Whether the store has been shut down or torn down
        #[must_use]
        pub fn is_shut_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// Number of effect tasks currently running
        #[must_use]
        pub fn in_flight(&self) -> usize {
            self.in_flight.len()
        }

        /// Send an action to the store
        ///
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Starts the returned effects
        /// 4. Effects may produce more actions (feedback loop)
        ///
        /// `send()` returns after starting effect execution, not completion.
        /// Use the returned [`EffectHandle`] to wait for completion.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::debug!("Rejected action: store is shut down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("store.commands.total").increment(1);

            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");

                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());
                effects
            };

            self.changes.send_modify(|version| *version += 1);

            for effect in effects {
                self.execute_effect_internal(effect, tracking.clone(), None);
            }

            Ok(handle)
        }

        /// Send an action and wait until all of its effects have completed
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`]: Store is shutting down
        /// - [`StoreError::Timeout`]: Effects still running after `timeout`
        pub async fn send_and_wait(&self, action: A, timeout: Duration) -> Result<(), StoreError> {
            let mut handle = self.send(action).await?;
            handle.wait_with_timeout(timeout).await
        }

        /// Send an action and wait for a matching result action
        ///
        /// Subscribes to the action broadcast before sending, then returns the
        /// first action produced by an effect that matches `predicate`.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: Timeout expired before matching action received
        /// - [`StoreError::ChannelClosed`]: Action broadcast channel closed
        /// - [`StoreError::ShutdownInProgress`]: Store is shutting down
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            F: Fn(&A) -> bool,
        {
            // Subscribe BEFORE sending to avoid race condition
            let mut rx = self.action_broadcast.subscribe();

            self.send(action).await?;

            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Action observer lagged, {} actions skipped", skipped);
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Subscribe to all actions produced by effects
        ///
        /// Only actions produced by effects are broadcast, not the actions
        /// sent directly through [`Store::send`]. A result is broadcast after
        /// the store has reduced it; results a shut-down store rejects are not.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Subscribe to state changes
        ///
        /// The receiver holds a version number that is bumped after every
        /// reduced action. A view awaits `changed()` and then re-reads state
        /// through [`Store::state`].
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<u64> {
            self.changes.subscribe()
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let cart_len = store.state(|s| s.cart.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Dispatch `action` every `period` until the returned [`Subscription`] is dropped
        ///
        /// The first action is dispatched one full period after the call. Missed
        /// ticks are delayed rather than bursted. The timer also stops once the
        /// store rejects actions. A zero period is raised to one millisecond.
        pub fn interval(&self, period: Duration, action: A) -> Subscription {
            let period = period.max(Duration::from_millis(1));
            let store = self.clone();

            let handle = tokio::spawn(async move {
                let start = tokio::time::Instant::now() + period;
                let mut ticker = tokio::time::interval_at(start, period);
                ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

                loop {
                    ticker.tick().await;
                    if store.send(action.clone()).await.is_err() {
                        tracing::debug!("Interval stopped: store no longer accepts actions");
                        break;
                    }
                }
            });

            tracing::debug!(period_ms = period.as_millis(), "Interval subscription started");
            Subscription {
                abort: handle.abort_handle(),
            }
        }

        /// Cancel every in-flight effect registered under `id`
        ///
        /// Returns how many effects were aborted.
        pub fn cancel(&self, id: &EffectId) -> usize {
            let cancelled = self.in_flight.cancel(id);
            if cancelled > 0 {
                tracing::debug!(effect_id = %id, cancelled, "Cancelled in-flight effects");
                metrics::counter!("store.effects.cancelled").increment(cancelled as u64);
            }
            cancelled
        }

        /// Tear the store down immediately
        ///
        /// Rejects every further action (including results of effects that are
        /// still running) and aborts all in-flight effects. This is the
        /// "view unmounted" path: nothing resolves into a store nobody observes.
        pub fn teardown(&self) {
            self.shutdown.store(true, Ordering::Release);
            let aborted = self.in_flight.cancel_all();
            tracing::debug!(aborted, "Store torn down");
            if aborted > 0 {
                metrics::counter!("store.effects.cancelled").increment(aborted as u64);
            }
        }

        /// Initiate graceful shutdown of the store
        ///
        /// 1. Sets the shutdown flag (rejecting new actions)
        /// 2. Waits for pending effects to complete (with timeout)
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before all
        /// pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);

            let start = tokio::time::Instant::now();
            let poll_interval = Duration::from_millis(10);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    metrics::counter!("store.shutdown.completed").increment(1);
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(pending_effects = pending, "Shutdown timeout: {} effects still running", pending);
                    metrics::counter!("store.shutdown.timeout").increment(1);
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Spawn a tracked effect task
        ///
        /// The task counts towards the action's [`EffectHandle`], the store-wide
        /// pending counter and the in-flight registry (under `cancel_id`).
        fn spawn_tracked<F>(&self, tracking: &EffectTracking, cancel_id: Option<EffectId>, task: F)
        where
            F: std::future::Future<Output = ()> + Send + 'static,
        {
            tracking.increment();
            let guard = DecrementGuard(tracking.clone());

            self.pending_effects.fetch_add(1, Ordering::SeqCst);
            let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

            self.in_flight.spawn(cancel_id, async move {
                let _guard = guard;
                let _pending_guard = pending_guard;
                task.await;
            });
        }

        /// Send an effect's result action and broadcast it once the store accepted it
        async fn feed_back(&self, action: A) {
            match self.send(action.clone()).await {
                Ok(_) => {
                    let _ = self.action_broadcast.send(action);
                },
                Err(error) => tracing::debug!(%error, "Effect result dropped"),
            }
        }

        /// Execute an effect with tracking
        ///
        /// # Effect Types
        ///
        /// - `None`: No-op
        /// - `Future`: Executes async computation, sends resulting action if `Some`
        /// - `Delay`: Waits for duration, then sends action
        /// - `Parallel`: Executes effects concurrently
        /// - `Sequential`: Executes effects in order, waiting for each to complete
        /// - `Cancellable`: Cancels effects in flight under the id, then runs the inner effect under it
        /// - `Cancel`: Aborts effects in flight under the id
        ///
        /// Result actions of effects go through [`Store::feed_back`], so a
        /// store that has been torn down drops them.
        #[allow(clippy::needless_pass_by_value)] // tracking is cloned into tasks
        #[tracing::instrument(skip(self, effect, tracking), name = "execute_effect")]
        fn execute_effect_internal(
            &self,
            effect: Effect<A>,
            tracking: EffectTracking,
            cancel_id: Option<EffectId>,
        ) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                },
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);

                    let store = self.clone();
                    self.spawn_tracked(&tracking, cancel_id, async move {
                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action, sending to store");
                            store.feed_back(action).await;
                        }
                    });
                },
                Effect::Delay { duration, action } => {
                    tracing::trace!("Executing Effect::Delay (duration: {:?})", duration);
                    metrics::counter!("store.effects.executed", "type" => "delay").increment(1);

                    let store = self.clone();
                    self.spawn_tracked(&tracking, cancel_id, async move {
                        tokio::time::sleep(duration).await;
                        store.feed_back(*action).await;
                    });
                },
                Effect::Parallel(effects) => {
                    tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                    metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);

                    for effect in effects {
                        self.execute_effect_internal(effect, tracking.clone(), cancel_id.clone());
                    }
                },
                Effect::Sequential(effects) => {
                    tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                    metrics::counter!("store.effects.executed", "type" => "sequential").increment(1);

                    let store = self.clone();
                    let inner_id = cancel_id.clone();
                    self.spawn_tracked(&tracking, cancel_id, async move {
                        for effect in effects {
                            let (mut step, step_tracking) = EffectHandle::new();
                            store.execute_effect_internal(effect, step_tracking, inner_id.clone());
                            step.wait().await;
                        }
                        tracing::trace!("Effect::Sequential completed");
                    });
                },
                Effect::Cancellable { id, effect } => {
                    tracing::trace!(effect_id = %id, "Executing Effect::Cancellable");
                    self.cancel(&id);
                    self.execute_effect_internal(*effect, tracking, Some(id));
                },
                Effect::Cancel(id) => {
                    tracing::trace!(effect_id = %id, "Executing Effect::Cancel");
                    self.cancel(&id);
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                config: self.config.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                in_flight: self.in_flight.clone(),
                action_broadcast: self.action_broadcast.clone(),
                changes: Arc::clone(&self.changes),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;

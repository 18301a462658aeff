//! The application container.
//!
//! One [`App`] is built per application instance and owns every container.
//! Nothing is global: views get at containers through the `App` they were
//! handed.

use crate::config::Config;
use composable_ui_runtime::StoreError;
use counter::IntervalCounter;
use order_workflow::{CheckoutGateway, OrderEnvironment, OrderWorkflow, SimulatedGateway};
use std::sync::Arc;
use todo::TodoList;
use user_directory::{HttpUserSource, StaticUserSource, UserDirectory, UserSource};

/// Every container of the showcase
pub struct App {
    config: Config,
    counter: IntervalCounter,
    todos: TodoList,
    orders: OrderWorkflow,
    users: UserDirectory,
}

impl App {
    /// Build the application from configuration
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime (the counter starts its timer).
    #[must_use]
    pub fn new(config: Config) -> Self {
        let gateway: Arc<dyn CheckoutGateway> = Arc::new(SimulatedGateway::new(
            config.payment_latency(),
            config.order_latency(),
        ));
        let source: Arc<dyn UserSource> = match &config.users_url {
            Some(url) => Arc::new(HttpUserSource::new(url.clone())),
            None => Arc::new(StaticUserSource::sample()),
        };
        Self::with_dependencies(config, gateway, source)
    }

    /// Build the application with explicit backends
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime (the counter starts its timer).
    #[must_use]
    pub fn with_dependencies(config: Config, gateway: Arc<dyn CheckoutGateway>, source: Arc<dyn UserSource>) -> Self {
        tracing::info!(tick_ms = config.tick_ms, users_url = ?config.users_url, "Building application");

        Self {
            counter: IntervalCounter::activate(config.tick_period()),
            todos: TodoList::new(),
            orders: OrderWorkflow::new(OrderEnvironment::new(gateway)),
            users: UserDirectory::new(source),
            config,
        }
    }

    /// Configuration the app was built with
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The repeating counter
    #[must_use]
    pub const fn counter(&self) -> &IntervalCounter {
        &self.counter
    }

    /// The repeating counter, for changing its period
    pub const fn counter_mut(&mut self) -> &mut IntervalCounter {
        &mut self.counter
    }

    /// The todo list
    #[must_use]
    pub const fn todos(&self) -> &TodoList {
        &self.todos
    }

    /// The checkout workflow
    #[must_use]
    pub const fn orders(&self) -> &OrderWorkflow {
        &self.orders
    }

    /// The user directory
    #[must_use]
    pub const fn users(&self) -> &UserDirectory {
        &self.users
    }

    /// Shut every container down
    ///
    /// The counter is deactivated first so it stops ticking. Containers with
    /// async work then get the configured timeout to finish it; whatever is
    /// still running afterwards is aborted when the app drops.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects were still running
    /// when the timeout expired.
    pub async fn shutdown(self) -> Result<(), StoreError> {
        let timeout = self.config.shutdown_timeout();
        tracing::info!(timeout_ms = self.config.shutdown_timeout_ms, "Shutting down");
        drop(self.counter);

        let (orders, users, todos) = tokio::join!(
            self.orders.store().shutdown(timeout),
            self.users.store().shutdown(timeout),
            self.todos.store().shutdown(timeout),
        );
        orders.and(users).and(todos)
    }
}

//! The order container a view binds to.

use crate::environment::OrderEnvironment;
use crate::reducer::OrderReducer;
use crate::types::{OrderAction, OrderStage, OrderState};
use composable_ui_runtime::{Store, StoreError};
use tokio::sync::watch;

/// Store type driving the order workflow
pub type OrderStore = Store<OrderState, OrderAction, OrderEnvironment, OrderReducer>;

/// Order workflow container
///
/// Owns its store. Dropping the container unmounts it: pending gateway calls
/// are aborted and nothing resolves into the state afterwards.
pub struct OrderWorkflow {
    store: OrderStore,
}

impl OrderWorkflow {
    /// Creates a workflow in `browsing` with an empty cart
    #[must_use]
    pub fn new(environment: OrderEnvironment) -> Self {
        Self {
            store: Store::new(OrderState::new(), OrderReducer::new(), environment),
        }
    }

    /// Append `item` to the cart
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the container is torn down.
    pub async fn add_to_cart(&self, item: impl Into<String>) -> Result<(), StoreError> {
        self.store
            .send(OrderAction::AddToCart { item: item.into() })
            .await
            .map(drop)
    }

    /// Jump to payment entry, cancelling any pending gateway call
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the container is torn down.
    pub async fn go_to_checkout(&self) -> Result<(), StoreError> {
        self.store.send(OrderAction::GoToCheckout).await.map(drop)
    }

    /// Step back one phase (no-op outside payment entry and confirmation)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the container is torn down.
    pub async fn go_back(&self) -> Result<(), StoreError> {
        self.store.send(OrderAction::GoBack).await.map(drop)
    }

    /// Submit payment and wait for the gateway
    ///
    /// Resolves once the payment succeeded, failed, or was cancelled, and
    /// returns the stage the workflow ended in. A gateway failure is not an
    /// error here: it shows up in [`OrderWorkflow::error`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the container is torn down.
    pub async fn submit_payment(&self, details: impl Into<String>) -> Result<OrderStage, StoreError> {
        let mut handle = self
            .store
            .send(OrderAction::SubmitPayment {
                details: details.into(),
            })
            .await?;
        handle.wait().await;
        Ok(self.stage().await)
    }

    /// Place the order and wait for the gateway
    ///
    /// Same contract as [`OrderWorkflow::submit_payment`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the container is torn down.
    pub async fn place_order(&self) -> Result<OrderStage, StoreError> {
        let mut handle = self.store.send(OrderAction::PlaceOrder).await?;
        handle.wait().await;
        Ok(self.stage().await)
    }

    /// Current stage label
    pub async fn stage(&self) -> OrderStage {
        self.store.state(OrderState::stage).await
    }

    /// Cart contents in insertion order
    pub async fn cart(&self) -> Vec<String> {
        self.store.state(|s| s.cart.clone()).await
    }

    /// Details of the accepted payment, if any
    pub async fn payment_details(&self) -> Option<String> {
        self.store.state(|s| s.payment_details().map(str::to_owned)).await
    }

    /// Message of the last failed step, if any
    pub async fn error(&self) -> Option<String> {
        self.store.state(|s| s.error.clone()).await
    }

    /// Snapshot of the full state
    pub async fn snapshot(&self) -> OrderState {
        self.store.state(Clone::clone).await
    }

    /// Subscribe to state changes
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.store.subscribe()
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &OrderStore {
        &self.store
    }
}

impl Default for OrderWorkflow {
    fn default() -> Self {
        Self::new(OrderEnvironment::default())
    }
}

impl Drop for OrderWorkflow {
    fn drop(&mut self) {
        self.store.teardown();
    }
}

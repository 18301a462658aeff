//! Checkout gateway abstraction and the simulated implementation.

use crate::error::WorkflowError;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;

/// Default latency of both simulated gateway calls
pub const DEFAULT_GATEWAY_LATENCY: Duration = Duration::from_millis(1000);

/// Backend the order workflow talks to
///
/// Implementations return `'static` futures so the reducer can move them into
/// an effect without borrowing the environment.
pub trait CheckoutGateway: Send + Sync {
    /// Authorise a payment
    fn submit_payment(&self, details: String) -> BoxFuture<'static, Result<(), WorkflowError>>;

    /// Place an order for `cart` paid with `payment_details`
    fn place_order(
        &self,
        cart: Vec<String>,
        payment_details: String,
    ) -> BoxFuture<'static, Result<(), WorkflowError>>;
}

/// Gateway that always succeeds after a fixed latency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedGateway {
    payment_latency: Duration,
    order_latency: Duration,
}

impl SimulatedGateway {
    /// Creates a gateway with explicit latencies
    #[must_use]
    pub const fn new(payment_latency: Duration, order_latency: Duration) -> Self {
        Self {
            payment_latency,
            order_latency,
        }
    }

    /// Latency of `submit_payment`
    #[must_use]
    pub const fn payment_latency(&self) -> Duration {
        self.payment_latency
    }

    /// Latency of `place_order`
    #[must_use]
    pub const fn order_latency(&self) -> Duration {
        self.order_latency
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY_LATENCY, DEFAULT_GATEWAY_LATENCY)
    }
}

impl CheckoutGateway for SimulatedGateway {
    fn submit_payment(&self, details: String) -> BoxFuture<'static, Result<(), WorkflowError>> {
        let latency = self.payment_latency;
        Box::pin(async move {
            tokio::time::sleep(latency).await;
            tracing::debug!(details_len = details.len(), "Simulated payment accepted");
            Ok(())
        })
    }

    fn place_order(
        &self,
        cart: Vec<String>,
        _payment_details: String,
    ) -> BoxFuture<'static, Result<(), WorkflowError>> {
        let latency = self.order_latency;
        Box::pin(async move {
            tokio::time::sleep(latency).await;
            tracing::debug!(items = cart.len(), "Simulated order placed");
            Ok(())
        })
    }
}

/// Dependencies of the order reducer
#[derive(Clone)]
pub struct OrderEnvironment {
    /// Checkout backend
    pub gateway: Arc<dyn CheckoutGateway>,
}

impl OrderEnvironment {
    /// Creates an environment around `gateway`
    #[must_use]
    pub fn new(gateway: Arc<dyn CheckoutGateway>) -> Self {
        Self { gateway }
    }

    /// Environment backed by a [`SimulatedGateway`]
    #[must_use]
    pub fn simulated(gateway: SimulatedGateway) -> Self {
        Self::new(Arc::new(gateway))
    }
}

impl Default for OrderEnvironment {
    fn default() -> Self {
        Self::simulated(SimulatedGateway::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn simulated_gateway_waits_then_succeeds() {
        let gateway = SimulatedGateway::new(Duration::from_millis(250), Duration::from_millis(50));
        let start = tokio::time::Instant::now();

        assert_eq!(gateway.submit_payment("visa".into()).await, Ok(()));
        assert!(start.elapsed() >= Duration::from_millis(250));

        assert_eq!(gateway.place_order(vec!["a".into()], "visa".into()).await, Ok(()));
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[test]
    fn default_latencies() {
        let gateway = SimulatedGateway::default();
        assert_eq!(gateway.payment_latency(), DEFAULT_GATEWAY_LATENCY);
        assert_eq!(gateway.order_latency(), DEFAULT_GATEWAY_LATENCY);
    }
}

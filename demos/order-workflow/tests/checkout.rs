//! End-to-end checkout tests against the store runtime

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use futures::future::BoxFuture;
use order_workflow::{
    CheckoutGateway, OrderEnvironment, OrderStage, OrderWorkflow, SimulatedGateway, WorkflowError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_test::assert_ok;

const LATENCY: Duration = Duration::from_millis(100);

/// Gateway failing the first `fail_payments` / `fail_orders` calls
#[derive(Default)]
struct FlakyGateway {
    fail_payments: usize,
    fail_orders: usize,
    payment_calls: AtomicUsize,
    order_calls: AtomicUsize,
}

impl CheckoutGateway for FlakyGateway {
    fn submit_payment(&self, _details: String) -> BoxFuture<'static, Result<(), WorkflowError>> {
        let call = self.payment_calls.fetch_add(1, Ordering::SeqCst);
        let fail = call < self.fail_payments;
        Box::pin(async move {
            tokio::time::sleep(LATENCY).await;
            if fail {
                Err(WorkflowError::operation_failed("card declined"))
            } else {
                Ok(())
            }
        })
    }

    fn place_order(&self, _cart: Vec<String>, _payment_details: String) -> BoxFuture<'static, Result<(), WorkflowError>> {
        let call = self.order_calls.fetch_add(1, Ordering::SeqCst);
        let fail = call < self.fail_orders;
        Box::pin(async move {
            tokio::time::sleep(LATENCY).await;
            if fail {
                Err(WorkflowError::operation_failed("inventory unavailable"))
            } else {
                Ok(())
            }
        })
    }
}

fn simulated() -> OrderWorkflow {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    OrderWorkflow::new(OrderEnvironment::simulated(SimulatedGateway::new(LATENCY, LATENCY)))
}

fn flaky(gateway: FlakyGateway) -> (OrderWorkflow, Arc<FlakyGateway>) {
    let gateway = Arc::new(gateway);
    let workflow = OrderWorkflow::new(OrderEnvironment::new(gateway.clone()));
    (workflow, gateway)
}

#[tokio::test(start_paused = true)]
async fn test_happy_path() {
    let workflow = simulated();

    assert_ok!(workflow.add_to_cart("book").await);
    assert_ok!(workflow.add_to_cart("pen").await);
    assert_eq!(workflow.stage().await, OrderStage::Browsing);

    workflow.go_to_checkout().await.unwrap();
    assert_eq!(workflow.stage().await, OrderStage::PaymentEntry);

    assert_eq!(workflow.submit_payment("visa-4242").await.unwrap(), OrderStage::ConfirmOrder);
    assert_eq!(workflow.payment_details().await.as_deref(), Some("visa-4242"));
    assert_eq!(workflow.error().await, None);

    assert_eq!(workflow.place_order().await.unwrap(), OrderStage::OrderComplete);
    assert_eq!(workflow.cart().await, vec!["book", "pen"]);

    // Terminal: back does nothing
    workflow.go_back().await.unwrap();
    assert_eq!(workflow.stage().await, OrderStage::OrderComplete);
}

#[tokio::test(start_paused = true)]
async fn test_processing_is_observable() {
    let workflow = simulated();
    workflow.go_to_checkout().await.unwrap();

    let mut handle = workflow
        .store()
        .send(order_workflow::OrderAction::SubmitPayment {
            details: "visa".into(),
        })
        .await
        .unwrap();
    assert_eq!(workflow.stage().await, OrderStage::ProcessingPayment);

    handle.wait().await;
    assert_eq!(workflow.stage().await, OrderStage::ConfirmOrder);
}

#[tokio::test(start_paused = true)]
async fn test_payment_failure_then_retry() {
    let (workflow, gateway) = flaky(FlakyGateway {
        fail_payments: 1,
        ..FlakyGateway::default()
    });
    workflow.go_to_checkout().await.unwrap();

    assert_eq!(workflow.submit_payment("visa").await.unwrap(), OrderStage::PaymentEntry);
    assert_eq!(workflow.error().await.as_deref(), Some("card declined"));
    assert_eq!(workflow.payment_details().await, None);

    // Next attempt clears the error
    assert_eq!(workflow.submit_payment("visa").await.unwrap(), OrderStage::ConfirmOrder);
    assert_eq!(workflow.error().await, None);
    assert_eq!(gateway.payment_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_order_failure_rolls_back_to_confirm() {
    let (workflow, _gateway) = flaky(FlakyGateway {
        fail_orders: 1,
        ..FlakyGateway::default()
    });
    workflow.add_to_cart("book").await.unwrap();
    workflow.go_to_checkout().await.unwrap();
    workflow.submit_payment("visa").await.unwrap();

    assert_eq!(workflow.place_order().await.unwrap(), OrderStage::ConfirmOrder);
    assert_eq!(workflow.error().await.as_deref(), Some("inventory unavailable"));
    assert_eq!(workflow.payment_details().await.as_deref(), Some("visa"));

    assert_eq!(workflow.place_order().await.unwrap(), OrderStage::OrderComplete);
    assert_eq!(workflow.error().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_double_submit_calls_gateway_once() {
    let (workflow, gateway) = flaky(FlakyGateway::default());
    workflow.go_to_checkout().await.unwrap();

    let (first, second) = tokio::join!(workflow.submit_payment("visa"), workflow.submit_payment("amex"));
    assert_eq!(first.unwrap(), OrderStage::ConfirmOrder);
    assert!(second.is_ok());

    assert_eq!(gateway.payment_calls.load(Ordering::SeqCst), 1);
    assert_eq!(workflow.payment_details().await.as_deref(), Some("visa"));
}

#[tokio::test(start_paused = true)]
async fn test_go_to_checkout_cancels_pending_payment() {
    let workflow = simulated();
    workflow.go_to_checkout().await.unwrap();

    let mut handle = workflow
        .store()
        .send(order_workflow::OrderAction::SubmitPayment {
            details: "visa".into(),
        })
        .await
        .unwrap();
    tokio::time::sleep(LATENCY / 2).await;

    workflow.go_to_checkout().await.unwrap();
    handle.wait().await;
    tokio::time::sleep(LATENCY * 2).await;

    assert_eq!(workflow.stage().await, OrderStage::PaymentEntry);
    assert_eq!(workflow.payment_details().await, None);
    assert_eq!(workflow.store().in_flight(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_drop_discards_pending_result() {
    let workflow = simulated();
    workflow.go_to_checkout().await.unwrap();
    let store = workflow.store().clone();

    let mut handle = store
        .send(order_workflow::OrderAction::SubmitPayment {
            details: "visa".into(),
        })
        .await
        .unwrap();
    drop(workflow);
    handle.wait().await;
    tokio::time::sleep(LATENCY * 2).await;

    assert_eq!(store.state(|s| s.stage()).await, OrderStage::ProcessingPayment);
    assert!(store.is_shut_down());
}

//! Order checkout workflow
//!
//! A small finite-state workflow (cart, payment, confirmation, completion)
//! expressed as a reducer over a tagged phase enum.
//!
//! # Key Concepts Demonstrated
//!
//! - **Tagged state**: each [`OrderPhase`] variant carries only the data valid in it
//! - **Guarded async actions**: `submitPayment` and `placeOrder` are accepted
//!   once per attempt; a second call while one is pending is ignored
//! - **Cancellation**: gateway calls run as cancellable effects; restarting
//!   checkout or dropping the container aborts them
//! - **Stale results**: every attempt carries a [`RequestId`]; completions for
//!   an older attempt are discarded
//! - **Error boundary**: gateway failures land in the `error` field and roll
//!   the phase back one step
//!
//! # Usage
//!
//! ```no_run
//! use order_workflow::{OrderEnvironment, OrderStage, OrderWorkflow, SimulatedGateway};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workflow = OrderWorkflow::new(OrderEnvironment::simulated(SimulatedGateway::default()));
//!
//! workflow.add_to_cart("book").await?;
//! workflow.go_to_checkout().await?;
//! assert_eq!(workflow.submit_payment("visa-4242").await?, OrderStage::ConfirmOrder);
//! assert_eq!(workflow.place_order().await?, OrderStage::OrderComplete);
//! # Ok(())
//! # }
//! ```

pub mod environment;
pub mod error;
pub mod reducer;
pub mod types;
pub mod workflow;

pub use environment::{CheckoutGateway, OrderEnvironment, SimulatedGateway, DEFAULT_GATEWAY_LATENCY};
pub use error::WorkflowError;
pub use reducer::{OrderReducer, ORDER_EFFECT, PAYMENT_EFFECT};
pub use types::{OrderAction, OrderPhase, OrderStage, OrderState, RequestId};
pub use workflow::{OrderStore, OrderWorkflow};

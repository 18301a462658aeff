//! Domain types for the order checkout workflow.

use crate::error::WorkflowError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token identifying one async checkout attempt
///
/// Allocated from [`OrderState::next_request`]. A completion carrying a token
/// that does not match the current processing phase is stale and discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    /// Creates a request id from a raw value
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// The six workflow labels a view renders
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderStage {
    /// Adding items to the cart
    Browsing,
    /// Entering payment details
    PaymentEntry,
    /// Payment submitted, waiting for the gateway
    ProcessingPayment,
    /// Payment accepted, reviewing the order
    ConfirmOrder,
    /// Order submitted, waiting for the gateway
    ProcessingOrder,
    /// Order placed (terminal)
    OrderComplete,
}

impl OrderStage {
    /// All stages in workflow order
    pub const ALL: [Self; 6] = [
        Self::Browsing,
        Self::PaymentEntry,
        Self::ProcessingPayment,
        Self::ConfirmOrder,
        Self::ProcessingOrder,
        Self::OrderComplete,
    ];

    /// The label as a view would key on it
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browsing => "browsing",
            Self::PaymentEntry => "paymentEntry",
            Self::ProcessingPayment => "processingPayment",
            Self::ConfirmOrder => "confirmOrder",
            Self::ProcessingOrder => "processingOrder",
            Self::OrderComplete => "orderComplete",
        }
    }

    /// Whether an async checkout step is pending
    #[must_use]
    pub const fn is_processing(self) -> bool {
        matches!(self, Self::ProcessingPayment | Self::ProcessingOrder)
    }
}

impl fmt::Display for OrderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow phase
///
/// Each variant carries only the data that is valid in it: payment details
/// exist from the moment payment succeeds, request tokens only while a
/// gateway call is pending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OrderPhase {
    /// Adding items to the cart
    #[default]
    Browsing,
    /// Entering payment details
    PaymentEntry,
    /// Payment submitted
    ProcessingPayment {
        /// Token of the pending payment call
        request: RequestId,
    },
    /// Payment accepted
    ConfirmOrder {
        /// Details of the accepted payment
        payment_details: String,
    },
    /// Order submitted
    ProcessingOrder {
        /// Token of the pending order call
        request: RequestId,
        /// Details of the accepted payment
        payment_details: String,
    },
    /// Order placed
    OrderComplete {
        /// Details of the accepted payment
        payment_details: String,
    },
}

impl OrderPhase {
    /// The label of this phase
    #[must_use]
    pub const fn stage(&self) -> OrderStage {
        match self {
            Self::Browsing => OrderStage::Browsing,
            Self::PaymentEntry => OrderStage::PaymentEntry,
            Self::ProcessingPayment { .. } => OrderStage::ProcessingPayment,
            Self::ConfirmOrder { .. } => OrderStage::ConfirmOrder,
            Self::ProcessingOrder { .. } => OrderStage::ProcessingOrder,
            Self::OrderComplete { .. } => OrderStage::OrderComplete,
        }
    }

    /// Payment details, once a payment has been accepted
    #[must_use]
    pub fn payment_details(&self) -> Option<&str> {
        match self {
            Self::ConfirmOrder { payment_details }
            | Self::ProcessingOrder { payment_details, .. }
            | Self::OrderComplete { payment_details } => Some(payment_details.as_str()),
            Self::Browsing | Self::PaymentEntry | Self::ProcessingPayment { .. } => None,
        }
    }

    /// Token of the pending gateway call, if any
    #[must_use]
    pub const fn pending_request(&self) -> Option<RequestId> {
        match self {
            Self::ProcessingPayment { request } | Self::ProcessingOrder { request, .. } => Some(*request),
            _ => None,
        }
    }
}

/// State of the order workflow
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderState {
    /// Current phase
    pub phase: OrderPhase,
    /// Item identifiers in the order they were added; never cleared
    pub cart: Vec<String>,
    /// Message of the last failed async step
    pub error: Option<String>,
    /// Value of the next [`RequestId`] to allocate
    pub next_request: u64,
}

impl OrderState {
    /// Creates the initial state (`browsing`, empty cart)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The label of the current phase
    #[must_use]
    pub const fn stage(&self) -> OrderStage {
        self.phase.stage()
    }

    /// Payment details, once a payment has been accepted
    #[must_use]
    pub fn payment_details(&self) -> Option<&str> {
        self.phase.payment_details()
    }

    /// Allocates a fresh request token
    pub fn allocate_request(&mut self) -> RequestId {
        let request = RequestId(self.next_request);
        self.next_request = self.next_request.wrapping_add(1);
        request
    }
}

/// Order workflow actions
///
/// The first five are user intents; the rest are gateway completions fed
/// back by effects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderAction {
    /// Append an item to the cart
    AddToCart {
        /// Item identifier
        item: String,
    },
    /// Jump to payment entry
    GoToCheckout,
    /// Step back one phase
    GoBack,
    /// Submit payment details
    SubmitPayment {
        /// Opaque payment details
        details: String,
    },
    /// Submit the order
    PlaceOrder,
    /// Gateway accepted the payment
    PaymentSucceeded {
        /// Token of the attempt
        request: RequestId,
        /// Details that were submitted
        details: String,
    },
    /// Gateway rejected the payment
    PaymentFailed {
        /// Token of the attempt
        request: RequestId,
        /// Why it failed
        error: WorkflowError,
    },
    /// Gateway accepted the order
    OrderSucceeded {
        /// Token of the attempt
        request: RequestId,
    },
    /// Gateway rejected the order
    OrderFailed {
        /// Token of the attempt
        request: RequestId,
        /// Why it failed
        error: WorkflowError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_labels() {
        let labels: Vec<_> = OrderStage::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            labels,
            [
                "browsing",
                "paymentEntry",
                "processingPayment",
                "confirmOrder",
                "processingOrder",
                "orderComplete"
            ]
        );
    }

    #[test]
    fn payment_details_only_after_payment() {
        assert_eq!(OrderPhase::PaymentEntry.payment_details(), None);
        assert_eq!(
            OrderPhase::ProcessingPayment {
                request: RequestId::new(0)
            }
            .payment_details(),
            None
        );
        assert_eq!(
            OrderPhase::OrderComplete {
                payment_details: "visa".into()
            }
            .payment_details(),
            Some("visa")
        );
    }

    #[test]
    fn requests_are_monotonic() {
        let mut state = OrderState::new();
        let first = state.allocate_request();
        let second = state.allocate_request();
        assert!(second > first);
        assert_eq!(second.to_string(), "req-1");
    }
}

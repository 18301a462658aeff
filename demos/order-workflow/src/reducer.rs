//! Reducer for the order checkout workflow.
//!
//! ```text
//! browsing        --goToCheckout-->  paymentEntry
//! paymentEntry    --submitPayment--> processingPayment --ok--> confirmOrder
//!                                                      --err-> paymentEntry
//! confirmOrder    --placeOrder-->    processingOrder   --ok--> orderComplete
//!                                                      --err-> confirmOrder
//! paymentEntry    --goBack-->        browsing
//! confirmOrder    --goBack-->        paymentEntry
//! ```
//!
//! `goToCheckout` is accepted in every phase. When it interrupts a pending
//! gateway call, the call is cancelled.

use crate::environment::OrderEnvironment;
use crate::types::{OrderAction, OrderPhase, OrderState, RequestId};
use composable_ui_core::{cancellable, effect::Effect, effect::EffectId, reducer::Reducer, smallvec, SmallVec};

/// Effect id of the pending payment call
pub const PAYMENT_EFFECT: EffectId = EffectId::new("order/payment");

/// Effect id of the pending order call
pub const ORDER_EFFECT: EffectId = EffectId::new("order/place");

/// Order workflow reducer
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderReducer;

impl OrderReducer {
    /// Creates a new `OrderReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn is_current(state: &OrderState, request: RequestId) -> bool {
        state.phase.pending_request() == Some(request)
    }
}

impl Reducer for OrderReducer {
    type State = OrderState;
    type Action = OrderAction;
    type Environment = OrderEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per transition
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            OrderAction::AddToCart { item } => {
                tracing::debug!(%item, stage = %state.stage(), "Item added to cart");
                state.cart.push(item);
                smallvec![Effect::None]
            },

            OrderAction::GoToCheckout => {
                let interrupted = state.stage().is_processing();
                state.phase = OrderPhase::PaymentEntry;

                if interrupted {
                    tracing::debug!("Checkout restarted while a gateway call was pending");
                    smallvec![Effect::Cancel(PAYMENT_EFFECT), Effect::Cancel(ORDER_EFFECT)]
                } else {
                    smallvec![Effect::None]
                }
            },

            OrderAction::GoBack => {
                match std::mem::take(&mut state.phase) {
                    OrderPhase::PaymentEntry => state.phase = OrderPhase::Browsing,
                    OrderPhase::ConfirmOrder { .. } => state.phase = OrderPhase::PaymentEntry,
                    other => {
                        tracing::debug!(stage = %other.stage(), "goBack ignored");
                        state.phase = other;
                    },
                }
                smallvec![Effect::None]
            },

            OrderAction::SubmitPayment { details } => {
                if !matches!(state.phase, OrderPhase::PaymentEntry) {
                    tracing::warn!(stage = %state.stage(), "submitPayment ignored");
                    return smallvec![Effect::None];
                }

                let request = state.allocate_request();
                state.phase = OrderPhase::ProcessingPayment { request };
                state.error = None;
                tracing::debug!(%request, "Submitting payment");

                let call = env.gateway.submit_payment(details.clone());
                smallvec![cancellable! {
                    id: PAYMENT_EFFECT,
                    async {
                        Some(match call.await {
                            Ok(()) => OrderAction::PaymentSucceeded { request, details },
                            Err(error) => OrderAction::PaymentFailed { request, error },
                        })
                    }
                }]
            },

            OrderAction::PlaceOrder => {
                let OrderPhase::ConfirmOrder { payment_details } = &state.phase else {
                    tracing::warn!(stage = %state.stage(), "placeOrder ignored");
                    return smallvec![Effect::None];
                };
                let payment_details = payment_details.clone();

                let request = state.allocate_request();
                let call = env
                    .gateway
                    .place_order(state.cart.clone(), payment_details.clone());
                state.phase = OrderPhase::ProcessingOrder {
                    request,
                    payment_details,
                };
                state.error = None;
                tracing::debug!(%request, items = state.cart.len(), "Placing order");

                smallvec![cancellable! {
                    id: ORDER_EFFECT,
                    async {
                        Some(match call.await {
                            Ok(()) => OrderAction::OrderSucceeded { request },
                            Err(error) => OrderAction::OrderFailed { request, error },
                        })
                    }
                }]
            },

            OrderAction::PaymentSucceeded { request, details } => {
                if Self::is_current(state, request) {
                    tracing::debug!(%request, "Payment accepted");
                    state.phase = OrderPhase::ConfirmOrder {
                        payment_details: details,
                    };
                } else {
                    tracing::debug!(%request, "Stale payment result discarded");
                }
                smallvec![Effect::None]
            },

            OrderAction::PaymentFailed { request, error } => {
                if Self::is_current(state, request) {
                    tracing::debug!(%request, %error, "Payment failed");
                    state.phase = OrderPhase::PaymentEntry;
                    state.error = Some(error.to_string());
                } else {
                    tracing::debug!(%request, "Stale payment failure discarded");
                }
                smallvec![Effect::None]
            },

            OrderAction::OrderSucceeded { request } => {
                match std::mem::take(&mut state.phase) {
                    OrderPhase::ProcessingOrder {
                        request: pending,
                        payment_details,
                    } if pending == request => {
                        tracing::debug!(%request, "Order placed");
                        state.phase = OrderPhase::OrderComplete { payment_details };
                    },
                    other => {
                        tracing::debug!(%request, "Stale order result discarded");
                        state.phase = other;
                    },
                }
                smallvec![Effect::None]
            },

            OrderAction::OrderFailed { request, error } => {
                match std::mem::take(&mut state.phase) {
                    OrderPhase::ProcessingOrder {
                        request: pending,
                        payment_details,
                    } if pending == request => {
                        tracing::debug!(%request, %error, "Order failed");
                        state.phase = OrderPhase::ConfirmOrder { payment_details };
                        state.error = Some(error.to_string());
                    },
                    other => {
                        tracing::debug!(%request, "Stale order failure discarded");
                        state.phase = other;
                    },
                }
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::SimulatedGateway;
    use crate::error::WorkflowError;
    use crate::types::OrderStage;
    use composable_ui_testing::{assertions, resolve_effects, ReducerTest};
    use std::time::Duration;

    fn env() -> OrderEnvironment {
        OrderEnvironment::simulated(SimulatedGateway::new(Duration::from_millis(10), Duration::from_millis(10)))
    }

    fn confirm(details: &str) -> OrderState {
        OrderState {
            phase: OrderPhase::ConfirmOrder {
                payment_details: details.to_string(),
            },
            cart: vec!["book".to_string()],
            ..OrderState::default()
        }
    }

    #[test]
    fn go_to_checkout_from_browsing() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState::new())
            .when_action(OrderAction::GoToCheckout)
            .then_state(|state| assert_eq!(state.stage(), OrderStage::PaymentEntry))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn go_to_checkout_is_unguarded() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState {
                phase: OrderPhase::OrderComplete {
                    payment_details: "visa".into(),
                },
                ..OrderState::default()
            })
            .when_action(OrderAction::GoToCheckout)
            .then_state(|state| assert_eq!(state.stage(), OrderStage::PaymentEntry))
            .run();
    }

    #[test]
    fn go_to_checkout_cancels_pending_call() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState {
                phase: OrderPhase::ProcessingPayment {
                    request: RequestId::new(0),
                },
                next_request: 1,
                ..OrderState::default()
            })
            .when_action(OrderAction::GoToCheckout)
            .then_state(|state| assert_eq!(state.phase, OrderPhase::PaymentEntry))
            .then_effects(|effects| {
                assertions::assert_cancels(effects, &PAYMENT_EFFECT);
                assertions::assert_cancels(effects, &ORDER_EFFECT);
            })
            .run();
    }

    #[test]
    fn go_back_steps() {
        let reducer = OrderReducer::new();
        let env = env();

        let mut state = OrderState {
            phase: OrderPhase::PaymentEntry,
            ..OrderState::default()
        };
        reducer.reduce(&mut state, OrderAction::GoBack, &env);
        assert_eq!(state.stage(), OrderStage::Browsing);

        let mut state = confirm("visa");
        reducer.reduce(&mut state, OrderAction::GoBack, &env);
        assert_eq!(state.stage(), OrderStage::PaymentEntry);

        for phase in [
            OrderPhase::Browsing,
            OrderPhase::ProcessingPayment {
                request: RequestId::new(3),
            },
            OrderPhase::ProcessingOrder {
                request: RequestId::new(4),
                payment_details: "visa".into(),
            },
            OrderPhase::OrderComplete {
                payment_details: "visa".into(),
            },
        ] {
            let mut state = OrderState {
                phase: phase.clone(),
                ..OrderState::default()
            };
            reducer.reduce(&mut state, OrderAction::GoBack, &env);
            assert_eq!(state.phase, phase);
        }
    }

    #[test]
    fn submit_payment_starts_cancellable_call() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState {
                phase: OrderPhase::PaymentEntry,
                error: Some("previous failure".into()),
                ..OrderState::default()
            })
            .when_action(OrderAction::SubmitPayment {
                details: "visa".into(),
            })
            .then_state(|state| {
                assert_eq!(
                    state.phase,
                    OrderPhase::ProcessingPayment {
                        request: RequestId::new(0)
                    }
                );
                assert!(state.error.is_none());
            })
            .then_effects(|effects| {
                assertions::assert_has_cancellable_effect(effects, &PAYMENT_EFFECT);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn second_submit_while_processing_is_ignored() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState {
                phase: OrderPhase::PaymentEntry,
                ..OrderState::default()
            })
            .when_action(OrderAction::SubmitPayment {
                details: "visa".into(),
            })
            .when_action(OrderAction::SubmitPayment {
                details: "amex".into(),
            })
            .then_state(|state| {
                assert_eq!(
                    state.phase,
                    OrderPhase::ProcessingPayment {
                        request: RequestId::new(0)
                    }
                );
                assert_eq!(state.next_request, 1);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn place_order_outside_confirm_is_ignored() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState::new())
            .when_action(OrderAction::PlaceOrder)
            .then_state(|state| {
                assert_eq!(state.phase, OrderPhase::Browsing);
                assert_eq!(state.next_request, 0);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn order_complete_ignores_checkout_intents() {
        let complete = OrderPhase::OrderComplete {
            payment_details: "visa".into(),
        };

        for action in [
            OrderAction::SubmitPayment {
                details: "amex".into(),
            },
            OrderAction::PlaceOrder,
        ] {
            let expected = complete.clone();
            ReducerTest::new(OrderReducer::new())
                .with_env(env())
                .given_state(OrderState {
                    phase: complete.clone(),
                    cart: vec!["book".into()],
                    next_request: 2,
                    ..OrderState::default()
                })
                .when_action(action)
                .then_state(move |state| {
                    assert_eq!(state.phase, expected);
                    assert_eq!(state.cart, ["book"]);
                    assert_eq!(state.next_request, 2);
                    assert!(state.error.is_none());
                })
                .then_effects(assertions::assert_no_effects)
                .run();
        }
    }

    #[test]
    fn payment_failure_rolls_back() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState {
                phase: OrderPhase::ProcessingPayment {
                    request: RequestId::new(4),
                },
                next_request: 5,
                ..OrderState::default()
            })
            .when_action(OrderAction::PaymentFailed {
                request: RequestId::new(4),
                error: WorkflowError::operation_failed("card declined"),
            })
            .then_state(|state| {
                assert_eq!(state.phase, OrderPhase::PaymentEntry);
                assert_eq!(state.error.as_deref(), Some("card declined"));
            })
            .run();
    }

    #[test]
    fn stale_payment_result_is_discarded() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState {
                phase: OrderPhase::ProcessingPayment {
                    request: RequestId::new(2),
                },
                next_request: 3,
                ..OrderState::default()
            })
            .when_action(OrderAction::PaymentSucceeded {
                request: RequestId::new(1),
                details: "old".into(),
            })
            .then_state(|state| {
                assert_eq!(state.stage(), OrderStage::ProcessingPayment);
                assert_eq!(state.payment_details(), None);
            })
            .run();
    }

    #[test]
    fn order_failure_keeps_payment_details() {
        ReducerTest::new(OrderReducer::new())
            .with_env(env())
            .given_state(OrderState {
                phase: OrderPhase::ProcessingOrder {
                    request: RequestId::new(1),
                    payment_details: "visa".into(),
                },
                next_request: 2,
                ..OrderState::default()
            })
            .when_action(OrderAction::OrderFailed {
                request: RequestId::new(1),
                error: WorkflowError::operation_failed("out of stock"),
            })
            .then_state(|state| {
                assert_eq!(state.stage(), OrderStage::ConfirmOrder);
                assert_eq!(state.payment_details(), Some("visa"));
                assert_eq!(state.error.as_deref(), Some("out of stock"));
            })
            .run();
    }

    #[tokio::test(start_paused = true)]
    async fn full_checkout_resolves_inline() {
        let reducer = OrderReducer::new();
        let env = env();
        let mut state = OrderState::new();

        reducer.reduce(&mut state, OrderAction::AddToCart { item: "book".into() }, &env);
        reducer.reduce(&mut state, OrderAction::GoToCheckout, &env);

        let effects = reducer.reduce(&mut state, OrderAction::SubmitPayment { details: "visa".into() }, &env);
        for action in resolve_effects(effects).await {
            reducer.reduce(&mut state, action, &env);
        }
        assert_eq!(state, OrderState {
            phase: OrderPhase::ConfirmOrder {
                payment_details: "visa".into()
            },
            cart: vec!["book".into()],
            error: None,
            next_request: 1,
        });

        let effects = reducer.reduce(&mut state, OrderAction::PlaceOrder, &env);
        for action in resolve_effects(effects).await {
            reducer.reduce(&mut state, action, &env);
        }
        assert_eq!(state.stage(), OrderStage::OrderComplete);
        assert_eq!(state.payment_details(), Some("visa"));
    }

    proptest::proptest! {
        #[test]
        fn cart_preserves_order(items in proptest::collection::vec("[a-z]{1,8}", 0..32)) {
            let reducer = OrderReducer::new();
            let env = env();
            let mut state = OrderState::new();

            for item in &items {
                reducer.reduce(&mut state, OrderAction::AddToCart { item: item.clone() }, &env);
            }

            proptest::prop_assert_eq!(&state.cart, &items);
            proptest::prop_assert_eq!(state.stage(), OrderStage::Browsing);
        }
    }
}

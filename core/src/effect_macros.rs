//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants, particularly
//! the async and cancellable ones returned by container reducers.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use composable_ui_core::async_effect;
///
/// async_effect! {
///     let users = source.fetch(&key).await;
///     Some(DirectoryAction::Fetched { users })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use composable_ui_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_secs(1),
///     action: CounterAction::Tick
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}

/// Create an `Effect::Cancellable` wrapping an async block
///
/// Starting the effect cancels any effect still in flight under the same id.
///
/// # Example
///
/// ```rust,ignore
/// use composable_ui_core::cancellable;
///
/// cancellable! {
///     id: PAYMENT_EFFECT,
///     async {
///         let result = gateway.submit_payment(details).await;
///         Some(OrderAction::PaymentResolved { request, result })
///     }
/// }
/// ```
#[macro_export]
macro_rules! cancellable {
    (
        id: $id:expr,
        async { $($body:tt)* }
    ) => {
        $crate::effect::Effect::Cancellable {
            id: $id,
            effect: ::std::boxed::Box::new($crate::async_effect! { $($body)* }),
        }
    };
}

//! Plain-text renderings of container state, standing in for the view layer.

use counter::CounterState;
use order_workflow::OrderState;
use std::fmt::Write;
use todo::TodoState;
use user_directory::DirectoryState;

/// Render the counter
#[must_use]
pub fn counter(state: &CounterState) -> String {
    format!("Count: {}", state.count)
}

/// Render the todo list with its input box
#[must_use]
pub fn todos(state: &TodoState) -> String {
    let mut out = format!("[{}] (input)\n", state.input);
    for todo in &state.todos {
        let _ = writeln!(out, "  - {}", todo.text);
    }
    out
}

/// Render the user list
#[must_use]
pub fn users(state: &DirectoryState) -> String {
    if state.is_loading() {
        return "Loading...".to_string();
    }
    if let Some(error) = &state.error {
        return format!("Something went wrong: {error}");
    }

    let mut out = String::new();
    for user in &state.users {
        let _ = writeln!(out, "  {:>2}. {} <{}> {} {}", user.id, user.name, user.email, user.phone, user.website);
    }
    out
}

/// Render the checkout panel
#[must_use]
pub fn order(state: &OrderState) -> String {
    let mut out = format!("Stage: {}\nCart: [{}]", state.stage(), state.cart.join(", "));
    if let Some(details) = state.payment_details() {
        let _ = write!(out, "\nPayment: {details}");
    }
    if let Some(error) = &state.error {
        let _ = write!(out, "\nError: {error}");
    }
    out
}

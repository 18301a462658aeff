//! Showcase binary
//!
//! Runs a scripted walkthrough of every container and prints the state a view
//! would render after each step.

use anyhow::Context;
use composable_ui_runtime::metrics::MetricsRecorder;
use showcase::{view, App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user_directory::QueryKey;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env().context("loading configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut metrics = MetricsRecorder::new();
    if config.metrics {
        metrics.install().context("installing metrics recorder")?;
    }

    println!("=== Composable UI Showcase ===\n");
    let mut app = App::new(config);

    // ----- Repeating counter -----
    println!(">>> Counter: running for three ticks");
    let tick = app.config().tick_period();
    tokio::time::sleep(tick * 3 + tick / 2).await;
    println!("{}", view::counter(&app.counter().snapshot().await));

    println!(">>> Counter: doubling the rate");
    app.counter_mut().set_period(tick / 2);
    tokio::time::sleep(tick * 2).await;
    println!("{}\n", view::counter(&app.counter().snapshot().await));

    // ----- Todo list -----
    let todos = app.todos();
    println!(">>> Todo: add \"buy milk\", then an empty one");
    todos.set_input("buy milk").await?;
    todos.add_todo().await?;
    todos.set_input("walk the dog").await?;
    println!("{}", view::todos(&todos.store().state(Clone::clone).await));
    todos.set_input("").await?;
    todos.add_todo().await?;
    println!("{}", view::todos(&todos.store().state(Clone::clone).await));

    // ----- User directory -----
    let users = app.users();
    println!(">>> Users: fetching");
    users.start_fetch(QueryKey::users()).await?;
    println!("{}", view::users(&users.store().state(Clone::clone).await));
    let mut changes = users.changes();
    while users.is_loading().await {
        if changes.changed().await.is_err() {
            break;
        }
    }
    println!("{}", view::users(&users.store().state(Clone::clone).await));

    // ----- Checkout -----
    let orders = app.orders();
    println!(">>> Orders: add two items and check out");
    orders.add_to_cart("rust-book").await?;
    orders.add_to_cart("ferris-plush").await?;
    orders.go_to_checkout().await?;
    println!("{}\n", view::order(&orders.snapshot().await));

    println!(">>> Orders: back to the cart and forward again");
    orders.go_back().await?;
    println!("{}", orders.stage().await);
    orders.go_to_checkout().await?;

    println!(">>> Orders: submit payment");
    orders.submit_payment("visa **** 4242").await?;
    println!("{}\n", view::order(&orders.snapshot().await));

    println!(">>> Orders: place order");
    orders.place_order().await?;
    println!("{}\n", view::order(&orders.snapshot().await));

    if let Some(text) = metrics.render() {
        println!("=== Metrics ===\n{text}");
    }

    app.shutdown().await.context("shutting down")?;
    println!("=== Walkthrough complete ===");
    Ok(())
}

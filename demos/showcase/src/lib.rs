//! Showcase application
//!
//! Wires the counter, todo, order and user-directory containers into one
//! [`App`], configured from the environment ([`Config`]). The `showcase`
//! binary drives a scripted walkthrough and prints what a view would render.

pub mod app;
pub mod config;
pub mod view;

pub use app::App;
pub use config::{Config, ConfigError};

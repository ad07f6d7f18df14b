#[macro_use]
extern crate rust_i18n;

pub mod api;
pub mod calendar;
pub mod client;
pub mod config;
pub mod error;
pub mod i18n;
pub mod models;
pub mod server;
pub mod shutdown;
pub mod startup;
pub mod state;
pub mod store;
pub mod web;

// Initialize i18n
i18n!("locales", fallback = "en");

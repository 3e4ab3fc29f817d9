//! Web dashboard over the monitor's SQLite store and event log.
//!
//! Every page view re-reads both files; the browser reloads the page on a
//! user-selected interval. Nothing is cached between requests.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod render;
pub mod state;

#[cfg(test)]
mod tests;

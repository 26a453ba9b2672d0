//! Stockdesk - scan-driven stock movement entry for inventory servers.
//!
//! Core library providing the barcode/SKU-aware entry engine (debounced
//! product search, selection state machine, submission, inline quantity
//! reconciliation, page-local totals) and the terminal UI hosting it.

pub mod api;
pub mod config;
pub mod engine;
pub mod logging;
pub mod tui;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

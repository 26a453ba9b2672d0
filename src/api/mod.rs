//! HTTP client for the inventory server's stock-movement endpoints.

mod client;
mod error;
mod models;

pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use models::{
    CreateMovement, Page, PriceSnapshot, ProductRef, ProductSuggestion, StockMovementRow,
    UpdateMovement,
};

//! Wire types exchanged with the inventory server.

use serde::{Deserialize, Serialize};

/// A candidate product returned by the text/barcode lookup.
///
/// Ephemeral: lives only for the duration of one search response.
/// `on_hand_quantity` is populated only by the stock-out search endpoint
/// and is an advisory snapshot, not authoritative.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProductSuggestion {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub on_hand_quantity: Option<i64>,
}

/// Unit prices captured at the moment a movement row was created.
///
/// Preferred over the product's current prices when valuing history;
/// legacy rows created before snapshotting carry none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceSnapshot {
    pub unit_price: f64,
    #[serde(default)]
    pub unit_sales_price: Option<f64>,
}

/// Embedded product reference on a movement row, with current prices
/// used as fallback when the price snapshot is absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRef {
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub unit_sales_price: Option<f64>,
}

/// A recorded stock movement. The canonical copy lives server-side;
/// only `quantity` and `note` are mutable, via a full-payload update.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StockMovementRow {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub note: String,
    /// Kept as the server's literal string so updates echo it verbatim.
    pub timestamp: String,
    pub product: ProductRef,
    #[serde(default)]
    pub price_snapshot: Option<PriceSnapshot>,
}

/// One page of movement rows plus paging metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// Create request body for `POST /stock-{in|out}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateMovement {
    pub product_id: i64,
    pub quantity: i64,
    pub note: String,
}

/// Update request body for `PUT /stock-{in|out}/{id}`.
///
/// The ledger does not support partial updates; the full row payload
/// is carried, with `timestamp` echoed unchanged.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpdateMovement {
    pub product_id: i64,
    pub quantity: i64,
    pub note: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_optional_fields_default() {
        let s: ProductSuggestion =
            serde_json::from_str(r#"{"id": 7, "name": "Beans 1kg"}"#).unwrap();
        assert_eq!(s.id, 7);
        assert!(s.sku.is_none());
        assert!(s.barcode.is_none());
        assert!(s.on_hand_quantity.is_none());
    }

    #[test]
    fn test_row_without_snapshot() {
        let json = r#"{
            "id": 1, "product_id": 2, "quantity": 3,
            "timestamp": "2026-08-30 10:00:00",
            "product": {"name": "Beans 1kg", "sku": "B-1"}
        }"#;
        let row: StockMovementRow = serde_json::from_str(json).unwrap();
        assert!(row.price_snapshot.is_none());
        assert_eq!(row.note, "");
        assert_eq!(row.timestamp, "2026-08-30 10:00:00");
    }

    #[test]
    fn test_page_metadata() {
        let json = r#"{"data": [], "current_page": 2, "last_page": 5, "per_page": 10, "total": 42}"#;
        let page: Page<StockMovementRow> = serde_json::from_str(json).unwrap();
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total, 42);
    }
}

//! Page-local totals.
//!
//! Pure recomputation over the currently loaded page of rows — never
//! the full dataset. Recomputed from scratch on every row-set change;
//! no incremental maintenance at this scale.

use crate::api::StockMovementRow;

/// Aggregate figures for the loaded page.
///
/// `total_unit_price_sum` sums raw unit prices once per row rather
/// than weighting by quantity (a price-list figure), while
/// `total_amount` is the quantity-weighted value. The asymmetry is
/// deliberate and matches the ledger display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageTotals {
    pub total_qty: i64,
    pub total_unit_price_sum: f64,
    pub total_amount: f64,
    pub total_unit_sales_price_sum: f64,
    pub total_sales_amount: f64,
}

impl PageTotals {
    pub fn compute(rows: &[StockMovementRow]) -> Self {
        let mut totals = Self::default();
        for row in rows {
            let unit_price = resolve_unit_price(row);
            let sales_price = resolve_unit_sales_price(row);

            totals.total_qty += row.quantity;
            totals.total_unit_price_sum += unit_price;
            totals.total_amount += row.quantity as f64 * unit_price;
            totals.total_unit_sales_price_sum += sales_price.unwrap_or(0.0);
            totals.total_sales_amount += row.quantity as f64 * sales_price.unwrap_or(0.0);
        }
        totals
    }
}

/// Historical unit price: snapshot first, current product price as the
/// legacy-row fallback, zero when neither exists.
pub fn resolve_unit_price(row: &StockMovementRow) -> f64 {
    row.price_snapshot
        .as_ref()
        .map(|s| s.unit_price)
        .or(row.product.unit_price)
        .unwrap_or(0.0)
}

/// Analogous chain for the sales price; `None` when absent end to end.
pub fn resolve_unit_sales_price(row: &StockMovementRow) -> Option<f64> {
    row.price_snapshot
        .as_ref()
        .and_then(|s| s.unit_sales_price)
        .or(row.product.unit_sales_price)
}

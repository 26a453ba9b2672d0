//! Direction parameterization for the two entry engines.
//!
//! Stock-in and stock-out share one state machine; they differ only in
//! endpoint set, an advisory stock-availability check (out only), and a
//! role-based delete gate (out only). Those differences live here as a
//! strategy object so the rest of the engine stays direction-agnostic.

use crate::api::ProductSuggestion;

/// Which ledger is being operated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Receiving stock.
    In,
    /// Dispatching/selling stock.
    Out,
}

impl Direction {
    /// URL path segment for the server's direction-scoped endpoints.
    pub fn path_segment(self) -> &'static str {
        match self {
            Direction::In => "stock-in",
            Direction::Out => "stock-out",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::In => "Stock In",
            Direction::Out => "Stock Out",
        }
    }
}

/// Roles that may not delete stock-out rows. The server re-enforces
/// this authoritatively; the gate here only avoids a doomed request.
const OUT_DELETE_FORBIDDEN_ROLES: &[&str] = &["cashier", "staff"];

/// Per-direction behavior hooks. Both hooks are `None` for stock-in,
/// which makes the permissive default explicit at the call sites.
pub struct DirectionProfile {
    pub direction: Direction,
    check_stock: Option<fn(&ProductSuggestion) -> bool>,
    can_delete: Option<fn(&str) -> bool>,
}

impl DirectionProfile {
    pub fn stock_in() -> Self {
        Self {
            direction: Direction::In,
            check_stock: None,
            can_delete: None,
        }
    }

    pub fn stock_out() -> Self {
        Self {
            direction: Direction::Out,
            // Advisory only: absent on-hand data counts as available and
            // the server remains authoritative at commit time.
            check_stock: Some(|s| s.on_hand_quantity.map_or(true, |q| q > 0)),
            can_delete: Some(|role| {
                !OUT_DELETE_FORBIDDEN_ROLES
                    .iter()
                    .any(|f| f.eq_ignore_ascii_case(role))
            }),
        }
    }

    pub fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::In => Self::stock_in(),
            Direction::Out => Self::stock_out(),
        }
    }

    /// Local pre-check before submitting; `true` when submission may
    /// proceed.
    pub fn stock_available(&self, suggestion: &ProductSuggestion) -> bool {
        self.check_stock.map_or(true, |f| f(suggestion))
    }

    /// Whether the given role may delete rows in this direction.
    pub fn can_delete(&self, role: &str) -> bool {
        self.can_delete.map_or(true, |f| f(role))
    }

    /// Escape cancels an open inline edit only for stock-out.
    pub fn allows_edit_cancel(&self) -> bool {
        self.direction == Direction::Out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(on_hand: Option<i64>) -> ProductSuggestion {
        ProductSuggestion {
            id: 1,
            name: "Beans 1kg".into(),
            sku: Some("B-1".into()),
            barcode: None,
            on_hand_quantity: on_hand,
        }
    }

    #[test]
    fn test_stock_in_never_blocks_on_stock() {
        let profile = DirectionProfile::stock_in();
        assert!(profile.stock_available(&suggestion(Some(0))));
        assert!(profile.stock_available(&suggestion(None)));
    }

    #[test]
    fn test_stock_out_blocks_zero_on_hand() {
        let profile = DirectionProfile::stock_out();
        assert!(!profile.stock_available(&suggestion(Some(0))));
        assert!(!profile.stock_available(&suggestion(Some(-3))));
        assert!(profile.stock_available(&suggestion(Some(5))));
    }

    #[test]
    fn test_stock_out_missing_on_hand_is_advisory_pass() {
        let profile = DirectionProfile::stock_out();
        assert!(profile.stock_available(&suggestion(None)));
    }

    #[test]
    fn test_delete_gate_only_for_out() {
        let stock_in = DirectionProfile::stock_in();
        assert!(stock_in.can_delete("cashier"));

        let stock_out = DirectionProfile::stock_out();
        assert!(!stock_out.can_delete("cashier"));
        assert!(!stock_out.can_delete("Staff"));
        assert!(stock_out.can_delete("manager"));
        assert!(stock_out.can_delete("admin"));
    }

    #[test]
    fn test_edit_cancel_only_for_out() {
        assert!(!DirectionProfile::stock_in().allows_edit_cancel());
        assert!(DirectionProfile::stock_out().allows_edit_cancel());
    }

    #[test]
    fn test_path_segments() {
        assert_eq!(Direction::In.path_segment(), "stock-in");
        assert_eq!(Direction::Out.path_segment(), "stock-out");
    }
}

//! Pending entry and submission validation.
//!
//! Exactly one [`PendingEntry`] is live per view. Validation here is
//! pure: it either yields the create payload to dispatch or a typed
//! refusal, so "never issues a network request" is decidable without
//! any network in sight.

use crate::api::CreateMovement;

use super::direction::DirectionProfile;
use super::selection::SelectionState;

/// Quantity and note awaiting submission alongside the armed product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEntry {
    /// Always ≥ 1; raw input is coerced eagerly on every change.
    pub quantity: i64,
    pub note: String,
}

impl Default for PendingEntry {
    fn default() -> Self {
        Self {
            quantity: 1,
            note: String::new(),
        }
    }
}

impl PendingEntry {
    /// Coerce and store a raw quantity string.
    pub fn set_quantity_raw(&mut self, raw: &str) {
        self.quantity = coerce_quantity(raw);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Parse a raw quantity, silently coercing anything non-finite,
/// non-numeric, or below one to `1`.
pub fn coerce_quantity(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if let Ok(q) = trimmed.parse::<i64>() {
        return q.max(1);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => (f.floor() as i64).max(1),
        _ => 1,
    }
}

/// Why a submission was refused locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlock {
    NoProductSelected,
    NoAvailableStock,
}

impl SubmitBlock {
    /// Single-line text for the notification overlay.
    pub fn message(self) -> &'static str {
        match self {
            SubmitBlock::NoProductSelected => "Select a product first",
            SubmitBlock::NoAvailableStock => "No available stock for this product.",
        }
    }
}

/// Validate the pending entry against the armed selection and the
/// direction's stock hook. `Ok` carries the payload to POST; `Err`
/// names the refusal and guarantees nothing was dispatched.
pub fn prepare_submission(
    profile: &DirectionProfile,
    selection: &SelectionState,
    entry: &PendingEntry,
) -> Result<CreateMovement, SubmitBlock> {
    let selected = selection.selected().ok_or(SubmitBlock::NoProductSelected)?;
    if !profile.stock_available(&selected.suggestion) {
        return Err(SubmitBlock::NoAvailableStock);
    }
    Ok(CreateMovement {
        product_id: selected.suggestion.id,
        quantity: entry.quantity.max(1),
        note: entry.note.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ProductSuggestion;

    fn armed(on_hand: Option<i64>) -> SelectionState {
        let mut sel = SelectionState::new();
        sel.select(ProductSuggestion {
            id: 11,
            name: "Beans 1kg".into(),
            sku: Some("B-1".into()),
            barcode: None,
            on_hand_quantity: on_hand,
        });
        sel
    }

    #[test]
    fn test_coerce_invalid_inputs_to_one() {
        for raw in ["0", "-5", "abc", "", "  ", "NaN", "inf"] {
            assert_eq!(coerce_quantity(raw), 1, "raw = {raw:?}");
        }
    }

    #[test]
    fn test_coerce_valid_inputs() {
        assert_eq!(coerce_quantity("1"), 1);
        assert_eq!(coerce_quantity("42"), 42);
        assert_eq!(coerce_quantity(" 7 "), 7);
        assert_eq!(coerce_quantity("3.9"), 3);
    }

    #[test]
    fn test_submit_without_selection_blocked() {
        let profile = DirectionProfile::stock_in();
        let selection = SelectionState::new();
        let entry = PendingEntry::default();
        let err = prepare_submission(&profile, &selection, &entry).unwrap_err();
        assert_eq!(err, SubmitBlock::NoProductSelected);
        assert_eq!(err.message(), "Select a product first");
    }

    #[test]
    fn test_stock_out_zero_on_hand_blocked() {
        let profile = DirectionProfile::stock_out();
        let selection = armed(Some(0));
        let entry = PendingEntry::default();
        let err = prepare_submission(&profile, &selection, &entry).unwrap_err();
        assert_eq!(err, SubmitBlock::NoAvailableStock);
        assert_eq!(err.message(), "No available stock for this product.");
    }

    #[test]
    fn test_stock_in_ignores_on_hand() {
        let profile = DirectionProfile::stock_in();
        let selection = armed(Some(0));
        let entry = PendingEntry::default();
        assert!(prepare_submission(&profile, &selection, &entry).is_ok());
    }

    #[test]
    fn test_payload_carries_entry_fields() {
        let profile = DirectionProfile::stock_out();
        let selection = armed(Some(9));
        let entry = PendingEntry {
            quantity: 4,
            note: "damaged box".into(),
        };
        let payload = prepare_submission(&profile, &selection, &entry).unwrap();
        assert_eq!(
            payload,
            CreateMovement {
                product_id: 11,
                quantity: 4,
                note: "damaged box".into(),
            }
        );
    }

    #[test]
    fn test_entry_reset() {
        let mut entry = PendingEntry {
            quantity: 12,
            note: "x".into(),
        };
        entry.reset();
        assert_eq!(entry, PendingEntry::default());
        assert_eq!(entry.quantity, 1);
    }

    #[test]
    fn test_set_quantity_raw_is_eager() {
        let mut entry = PendingEntry::default();
        entry.set_quantity_raw("25");
        assert_eq!(entry.quantity, 25);
        entry.set_quantity_raw("-1");
        assert_eq!(entry.quantity, 1);
    }
}

//! Inline per-row quantity editor.
//!
//! At most one row is interactively open, but draft values persist per
//! row id until committed or cancelled, so hopping between rows does
//! not lose an unsaved draft. Committing with an unchanged value is a
//! no-op by contract: zero network calls.

use std::collections::HashMap;

use crate::api::{StockMovementRow, UpdateMovement};

/// What committing an edit requires of the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitDecision {
    /// Draft equals the stored quantity: exit edit mode, nothing sent.
    NoChange,
    /// Dispatch this full-payload update for the row, then refetch.
    Update { row_id: i64, body: UpdateMovement },
}

#[derive(Debug, Default)]
pub struct EditSession {
    open_row: Option<i64>,
    drafts: HashMap<i64, i64>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a row for editing. Seeds the draft from the row's current
    /// quantity unless an unsaved draft for it already exists.
    pub fn open(&mut self, row: &StockMovementRow) {
        self.open_row = Some(row.id);
        self.drafts.entry(row.id).or_insert(row.quantity);
    }

    /// Update the open row's draft (already-coerced value).
    pub fn set_draft(&mut self, quantity: i64) {
        if let Some(id) = self.open_row {
            self.drafts.insert(id, quantity.max(1));
        }
    }

    pub fn draft_for(&self, row_id: i64) -> Option<i64> {
        self.drafts.get(&row_id).copied()
    }

    /// Commit the open edit (blur or Enter). Exits edit mode either
    /// way; the update carries the full row payload because the ledger
    /// does not support partial updates.
    pub fn commit(&mut self, row: &StockMovementRow) -> CommitDecision {
        let Some(open) = self.open_row.take() else {
            return CommitDecision::NoChange;
        };
        debug_assert_eq!(open, row.id);
        let Some(draft) = self.drafts.remove(&open) else {
            return CommitDecision::NoChange;
        };
        if draft == row.quantity {
            return CommitDecision::NoChange;
        }
        CommitDecision::Update {
            row_id: row.id,
            body: UpdateMovement {
                product_id: row.product_id,
                quantity: draft,
                note: row.note.clone(),
                timestamp: row.timestamp.clone(),
            },
        }
    }

    /// Discard the open row's draft and exit edit mode (Escape,
    /// stock-out only — the caller gates this on the direction).
    pub fn cancel(&mut self) {
        if let Some(id) = self.open_row.take() {
            self.drafts.remove(&id);
        }
    }

    pub fn open_row(&self) -> Option<i64> {
        self.open_row
    }

    pub fn is_editing(&self, row_id: i64) -> bool {
        self.open_row == Some(row_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ProductRef;

    fn row(id: i64, quantity: i64) -> StockMovementRow {
        StockMovementRow {
            id,
            product_id: 70 + id,
            quantity,
            note: "initial".into(),
            timestamp: "2026-08-29 14:03:12".into(),
            product: ProductRef {
                name: "Beans 1kg".into(),
                sku: Some("B-1".into()),
                barcode: None,
                unit_price: Some(10.0),
                unit_sales_price: Some(12.5),
            },
            price_snapshot: None,
        }
    }

    #[test]
    fn test_open_seeds_draft_from_row() {
        let mut edit = EditSession::new();
        let r = row(1, 6);
        edit.open(&r);
        assert!(edit.is_editing(1));
        assert_eq!(edit.draft_for(1), Some(6));
    }

    #[test]
    fn test_unchanged_draft_commits_nothing() {
        let mut edit = EditSession::new();
        let r = row(1, 6);
        edit.open(&r);
        assert_eq!(edit.commit(&r), CommitDecision::NoChange);
        assert_eq!(edit.open_row(), None);
        assert_eq!(edit.draft_for(1), None);
    }

    #[test]
    fn test_changed_draft_commits_full_payload() {
        let mut edit = EditSession::new();
        let r = row(3, 6);
        edit.open(&r);
        edit.set_draft(9);
        match edit.commit(&r) {
            CommitDecision::Update { row_id, body } => {
                assert_eq!(row_id, 3);
                assert_eq!(
                    body,
                    UpdateMovement {
                        product_id: 73,
                        quantity: 9,
                        note: "initial".into(),
                        timestamp: "2026-08-29 14:03:12".into(),
                    }
                );
            }
            other => panic!("expected update, got {other:?}"),
        }
        assert_eq!(edit.open_row(), None);
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut edit = EditSession::new();
        let r = row(2, 4);
        edit.open(&r);
        edit.set_draft(99);
        edit.cancel();
        assert_eq!(edit.open_row(), None);
        assert_eq!(edit.draft_for(2), None);

        // Reopening seeds from the row again.
        edit.open(&r);
        assert_eq!(edit.draft_for(2), Some(4));
    }

    #[test]
    fn test_draft_survives_switching_rows() {
        let mut edit = EditSession::new();
        let first = row(1, 6);
        let second = row(2, 3);

        edit.open(&first);
        edit.set_draft(8); // unsaved
        edit.open(&second); // switch without committing
        assert!(edit.is_editing(2));
        assert_eq!(edit.draft_for(1), Some(8)); // retained

        // Reopening row 1 keeps the unsaved draft rather than reseeding.
        edit.open(&first);
        assert_eq!(edit.draft_for(1), Some(8));
    }

    #[test]
    fn test_set_draft_floors_at_one() {
        let mut edit = EditSession::new();
        let r = row(1, 6);
        edit.open(&r);
        edit.set_draft(0);
        assert_eq!(edit.draft_for(1), Some(1));
    }
}

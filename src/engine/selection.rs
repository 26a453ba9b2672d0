//! Product selection state machine.
//!
//! Owns which product (if any) is armed for submission and the
//! open/closed/highlighted state of the suggestion list.
//!
//! Phases: Empty → Pending (lookup scheduled/in flight) → Suggesting
//! (list open) → Selected (product armed, search UI suppressed). Any
//! raw-query mutation disarms the selection.

use crate::api::ProductSuggestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Empty,
    Pending,
    Suggesting,
    Selected,
}

/// A product armed for submission, with the composed display label that
/// replaces the raw query text (`"<barcode-or-sku> - <name>"`).
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedProduct {
    pub suggestion: ProductSuggestion,
    pub label: String,
}

/// Classification of an arriving (current) search response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsOutcome {
    /// Exactly one candidate whose barcode or sku equals the query:
    /// committed unattended, scanner-style.
    AutoCommitted(SelectedProduct),
    /// List opened (possibly empty) for manual navigation.
    Listed,
}

/// Result of pressing Enter in the search field.
#[derive(Debug, Clone, PartialEq)]
pub enum EnterOutcome {
    /// The highlighted (or exactly matched) product is now armed.
    Selected(SelectedProduct),
    /// No exact match in the fetched candidate set; state unchanged.
    UnknownIdentifier { query: String },
    /// Nothing to act on (no candidates fetched yet, blank query).
    Ignored,
}

#[derive(Debug)]
pub struct SelectionState {
    phase: SelectionPhase,
    /// Most recently fetched candidate set. Survives list closing so a
    /// later Enter can still resolve an exact match against it.
    candidates: Vec<ProductSuggestion>,
    list_open: bool,
    highlight: usize,
    selected: Option<SelectedProduct>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            phase: SelectionPhase::Empty,
            candidates: Vec::new(),
            list_open: false,
            highlight: 0,
            selected: None,
        }
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// A character was typed or erased in the search field. Always
    /// disarms the current selection.
    pub fn on_query_mutated(&mut self, query_is_empty: bool) {
        self.selected = None;
        if query_is_empty {
            self.phase = SelectionPhase::Empty;
            self.candidates.clear();
            self.list_open = false;
            self.highlight = 0;
        } else if self.phase != SelectionPhase::Suggesting {
            self.phase = SelectionPhase::Pending;
        }
    }

    /// The debounce fired on an empty query: clear the list.
    pub fn on_cleared(&mut self) {
        self.candidates.clear();
        self.list_open = false;
        self.highlight = 0;
        if self.phase != SelectionPhase::Selected {
            self.phase = SelectionPhase::Empty;
        }
    }

    /// A current (non-stale) lookup response arrived.
    pub fn on_results(
        &mut self,
        query: &str,
        mut results: Vec<ProductSuggestion>,
    ) -> ResultsOutcome {
        if results.len() == 1 && matches_identifier(&results[0], query) {
            let only = results.remove(0);
            return ResultsOutcome::AutoCommitted(self.select(only));
        }
        self.candidates = results;
        self.list_open = true;
        self.highlight = 0;
        self.phase = SelectionPhase::Suggesting;
        ResultsOutcome::Listed
    }

    pub fn highlight_down(&mut self) {
        if self.list_open && !self.candidates.is_empty() {
            self.highlight = (self.highlight + 1).min(self.candidates.len() - 1);
        }
    }

    pub fn highlight_up(&mut self) {
        if self.list_open {
            self.highlight = self.highlight.saturating_sub(1);
        }
    }

    /// Enter in the search field. With an open non-empty list, the
    /// highlighted item is armed; otherwise the trimmed query is
    /// resolved as an exact barcode/sku match against the most recently
    /// fetched candidate set.
    pub fn enter(&mut self, query: &str) -> EnterOutcome {
        if self.list_open && !self.candidates.is_empty() {
            let chosen = self.candidates[self.highlight].clone();
            return EnterOutcome::Selected(self.select(chosen));
        }

        let trimmed = query.trim();
        if trimmed.is_empty() {
            return EnterOutcome::Ignored;
        }
        if let Some(hit) = self
            .candidates
            .iter()
            .find(|c| matches_identifier(c, query))
            .cloned()
        {
            return EnterOutcome::Selected(self.select(hit));
        }
        EnterOutcome::UnknownIdentifier {
            query: trimmed.to_string(),
        }
    }

    /// Escape: close the list without clearing the query text.
    pub fn escape(&mut self) {
        self.list_open = false;
    }

    /// Arm a product. Closes and clears the suggestion list; the caller
    /// rewrites the query text to `label` and suppresses the search
    /// cycle that rewrite would otherwise trigger.
    pub fn select(&mut self, suggestion: ProductSuggestion) -> SelectedProduct {
        let label = compose_label(&suggestion);
        let selected = SelectedProduct { suggestion, label };
        self.selected = Some(selected.clone());
        self.phase = SelectionPhase::Selected;
        self.candidates.clear();
        self.list_open = false;
        self.highlight = 0;
        selected
    }

    /// Back to Empty (after a successful submission).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn selected(&self) -> Option<&SelectedProduct> {
        self.selected.as_ref()
    }

    pub fn selected_product_id(&self) -> Option<i64> {
        self.selected.as_ref().map(|s| s.suggestion.id)
    }

    pub fn list_open(&self) -> bool {
        self.list_open
    }

    pub fn candidates(&self) -> &[ProductSuggestion] {
        &self.candidates
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive equality of the trimmed query against the
/// suggestion's barcode or sku.
fn matches_identifier(suggestion: &ProductSuggestion, query: &str) -> bool {
    let q = query.trim();
    if q.is_empty() {
        return false;
    }
    let eq = |field: &Option<String>| {
        field
            .as_deref()
            .map_or(false, |v| v.trim().to_lowercase() == q.to_lowercase())
    };
    eq(&suggestion.barcode) || eq(&suggestion.sku)
}

/// `"<barcode-or-sku> - <name>"`, falling back to the id for products
/// carrying neither identifier.
fn compose_label(suggestion: &ProductSuggestion) -> String {
    let ident = suggestion
        .barcode
        .as_deref()
        .or(suggestion.sku.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| suggestion.id.to_string());
    format!("{ident} - {}", suggestion.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, sku: Option<&str>, barcode: Option<&str>) -> ProductSuggestion {
        ProductSuggestion {
            id,
            name: name.into(),
            sku: sku.map(Into::into),
            barcode: barcode.map(Into::into),
            on_hand_quantity: None,
        }
    }

    #[test]
    fn test_typing_while_selected_disarms() {
        let mut sel = SelectionState::new();
        sel.select(product(1, "Beans 1kg", Some("B-1"), None));
        assert!(sel.selected_product_id().is_some());

        sel.on_query_mutated(false);
        assert_eq!(sel.selected_product_id(), None);
        assert_eq!(sel.phase(), SelectionPhase::Pending);
    }

    #[test]
    fn test_clearing_query_goes_empty() {
        let mut sel = SelectionState::new();
        sel.on_results("be", vec![product(1, "Beans", Some("B-1"), None)]);
        sel.on_query_mutated(true);
        assert_eq!(sel.phase(), SelectionPhase::Empty);
        assert!(sel.candidates().is_empty());
    }

    #[test]
    fn test_single_exact_barcode_auto_commits() {
        let mut sel = SelectionState::new();
        let outcome = sel.on_results(
            "4006381333931",
            vec![product(9, "Marker", Some("MK-1"), Some("4006381333931"))],
        );
        match outcome {
            ResultsOutcome::AutoCommitted(s) => {
                assert_eq!(s.suggestion.id, 9);
                assert_eq!(s.label, "4006381333931 - Marker");
            }
            other => panic!("expected auto-commit, got {other:?}"),
        }
        assert_eq!(sel.phase(), SelectionPhase::Selected);
    }

    #[test]
    fn test_single_exact_sku_case_insensitive_auto_commits() {
        let mut sel = SelectionState::new();
        let outcome = sel.on_results("  mk-1  ", vec![product(9, "Marker", Some("MK-1"), None)]);
        assert!(matches!(outcome, ResultsOutcome::AutoCommitted(_)));
    }

    #[test]
    fn test_single_inexact_result_only_lists() {
        let mut sel = SelectionState::new();
        let outcome = sel.on_results("mark", vec![product(9, "Marker", Some("MK-1"), None)]);
        assert_eq!(outcome, ResultsOutcome::Listed);
        assert_eq!(sel.phase(), SelectionPhase::Suggesting);
        assert!(sel.list_open());
    }

    #[test]
    fn test_two_exact_results_do_not_auto_commit() {
        let mut sel = SelectionState::new();
        let outcome = sel.on_results(
            "MK-1",
            vec![
                product(9, "Marker", Some("MK-1"), None),
                product(10, "Marker XL", Some("MK-1X"), None),
            ],
        );
        assert_eq!(outcome, ResultsOutcome::Listed);
    }

    #[test]
    fn test_highlight_clamps_to_bounds() {
        let mut sel = SelectionState::new();
        sel.on_results(
            "m",
            vec![
                product(1, "A", None, None),
                product(2, "B", None, None),
                product(3, "C", None, None),
            ],
        );
        sel.highlight_up();
        assert_eq!(sel.highlight(), 0);
        for _ in 0..10 {
            sel.highlight_down();
        }
        assert_eq!(sel.highlight(), 2);
    }

    #[test]
    fn test_enter_selects_highlighted() {
        let mut sel = SelectionState::new();
        sel.on_results(
            "m",
            vec![product(1, "A", Some("A1"), None), product(2, "B", Some("B1"), None)],
        );
        sel.highlight_down();
        match sel.enter("m") {
            EnterOutcome::Selected(s) => assert_eq!(s.suggestion.id, 2),
            other => panic!("expected selection, got {other:?}"),
        }
        assert!(!sel.list_open());
        assert!(sel.candidates().is_empty());
    }

    #[test]
    fn test_enter_closed_list_exact_match() {
        let mut sel = SelectionState::new();
        sel.on_results("x", vec![product(5, "Tape", Some("X9"), None)]);
        sel.escape();
        assert!(!sel.list_open());

        match sel.enter("x9") {
            EnterOutcome::Selected(s) => assert_eq!(s.suggestion.id, 5),
            other => panic!("expected selection, got {other:?}"),
        }
    }

    #[test]
    fn test_enter_no_exact_match_reports_unknown() {
        let mut sel = SelectionState::new();
        sel.on_results("x", vec![product(5, "Tape", Some("T-4"), None)]);
        sel.escape();

        let outcome = sel.enter("X9");
        assert_eq!(
            outcome,
            EnterOutcome::UnknownIdentifier {
                query: "X9".into()
            }
        );
        // State unchanged: still no selection, candidates retained.
        assert_eq!(sel.selected_product_id(), None);
        assert_eq!(sel.candidates().len(), 1);
    }

    #[test]
    fn test_escape_keeps_candidates() {
        let mut sel = SelectionState::new();
        sel.on_results("t", vec![product(5, "Tape", Some("T-4"), None)]);
        sel.escape();
        assert!(!sel.list_open());
        assert_eq!(sel.candidates().len(), 1);
    }

    #[test]
    fn test_label_prefers_barcode_over_sku() {
        let mut sel = SelectionState::new();
        let s = sel.select(product(1, "Beans", Some("B-1"), Some("400123")));
        assert_eq!(s.label, "400123 - Beans");

        let s = sel.select(product(2, "Rice", Some("R-2"), None));
        assert_eq!(s.label, "R-2 - Rice");

        let s = sel.select(product(3, "Salt", None, None));
        assert_eq!(s.label, "3 - Salt");
    }
}

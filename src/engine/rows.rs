//! Row list store: paginated view of previously recorded movements.
//!
//! Fetches are keyed by `(page, per_page)`. State is never patched in
//! place after a create/update/delete; the current page is refetched so
//! the server stays the single source of truth for price snapshots and
//! pagination counts.

use crate::api::{Page, StockMovementRow};

/// Page sizes offered by the per-page cycler.
pub const PER_PAGE_CHOICES: &[u64] = &[10, 25, 50, 100];

#[derive(Debug)]
pub struct RowStore {
    rows: Vec<StockMovementRow>,
    page: u64,
    per_page: u64,
    last_page: u64,
    total: u64,
    loading: bool,
}

impl RowStore {
    pub fn new(per_page: u64) -> Self {
        Self {
            rows: Vec::new(),
            page: 1,
            per_page: per_page.max(1),
            last_page: 1,
            total: 0,
            loading: false,
        }
    }

    /// Replace contents with a freshly fetched page.
    pub fn apply_page(&mut self, page: Page<StockMovementRow>) {
        self.rows = page.data;
        self.page = page.current_page.max(1);
        self.last_page = page.last_page.max(1);
        self.per_page = page.per_page.max(1);
        self.total = page.total;
        self.loading = false;
    }

    /// Mark a fetch as dispatched (drives the loading indicator).
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn load_failed(&mut self) {
        self.loading = false;
    }

    // ── Navigation; each returns true when a refetch is needed ──────

    pub fn next_page(&mut self) -> bool {
        self.go_to(self.page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.go_to(self.page.saturating_sub(1))
    }

    /// Jump to a page, clamped to `[1, last_page]`.
    pub fn go_to(&mut self, page: u64) -> bool {
        let clamped = page.clamp(1, self.last_page);
        if clamped == self.page {
            return false;
        }
        self.page = clamped;
        true
    }

    /// Change the page size; resets to page 1.
    pub fn set_per_page(&mut self, per_page: u64) -> bool {
        let per_page = per_page.max(1);
        if per_page == self.per_page {
            return false;
        }
        self.per_page = per_page;
        self.page = 1;
        true
    }

    /// Next entry in [`PER_PAGE_CHOICES`], wrapping; returns true when
    /// a refetch is needed.
    pub fn cycle_per_page(&mut self) -> bool {
        let idx = PER_PAGE_CHOICES
            .iter()
            .position(|&c| c == self.per_page)
            .map(|i| (i + 1) % PER_PAGE_CHOICES.len())
            .unwrap_or(0);
        self.set_per_page(PER_PAGE_CHOICES[idx])
    }

    /// Previous entry in [`PER_PAGE_CHOICES`], wrapping.
    pub fn cycle_per_page_back(&mut self) -> bool {
        let len = PER_PAGE_CHOICES.len();
        let idx = PER_PAGE_CHOICES
            .iter()
            .position(|&c| c == self.per_page)
            .map(|i| (i + len - 1) % len)
            .unwrap_or(0);
        self.set_per_page(PER_PAGE_CHOICES[idx])
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn rows(&self) -> &[StockMovementRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&StockMovementRow> {
        self.rows.get(index)
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn last_page(&self) -> u64 {
        self.last_page
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_meta(current: u64, last: u64, per_page: u64) -> Page<StockMovementRow> {
        Page {
            data: Vec::new(),
            current_page: current,
            last_page: last,
            per_page,
            total: last * per_page,
        }
    }

    #[test]
    fn test_new_store_starts_at_page_one() {
        let store = RowStore::new(10);
        assert_eq!(store.page(), 1);
        assert_eq!(store.last_page(), 1);
        assert!(store.rows().is_empty());
    }

    #[test]
    fn test_navigation_clamps() {
        let mut store = RowStore::new(10);
        store.apply_page(page_meta(1, 3, 10));

        assert!(!store.prev_page()); // already at 1
        assert!(store.next_page());
        assert_eq!(store.page(), 2);
        assert!(store.go_to(99));
        assert_eq!(store.page(), 3); // clamped to last_page
        assert!(!store.next_page());
        assert!(store.go_to(0));
        assert_eq!(store.page(), 1);
    }

    #[test]
    fn test_go_to_same_page_needs_no_fetch() {
        let mut store = RowStore::new(10);
        store.apply_page(page_meta(2, 5, 10));
        assert!(!store.go_to(2));
    }

    #[test]
    fn test_per_page_change_resets_page() {
        let mut store = RowStore::new(10);
        store.apply_page(page_meta(3, 5, 10));
        assert!(store.set_per_page(25));
        assert_eq!(store.page(), 1);
        assert_eq!(store.per_page(), 25);
        assert!(!store.set_per_page(25)); // unchanged
    }

    #[test]
    fn test_cycle_per_page_wraps() {
        let mut store = RowStore::new(100);
        assert!(store.cycle_per_page());
        assert_eq!(store.per_page(), 10);
        assert!(store.cycle_per_page_back());
        assert_eq!(store.per_page(), 100);
    }

    #[test]
    fn test_apply_page_normalizes_degenerate_meta() {
        let mut store = RowStore::new(10);
        store.apply_page(page_meta(0, 0, 10));
        assert_eq!(store.page(), 1);
        assert_eq!(store.last_page(), 1);
    }

    #[test]
    fn test_loading_flag_lifecycle() {
        let mut store = RowStore::new(10);
        store.begin_load();
        assert!(store.is_loading());
        store.apply_page(page_meta(1, 1, 10));
        assert!(!store.is_loading());
        store.begin_load();
        store.load_failed();
        assert!(!store.is_loading());
    }
}

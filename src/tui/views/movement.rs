//! Movement entry view — one instance per direction.
//!
//! Hosts the whole entry engine for its direction: the debounced
//! product search with suggestion list, the armed-product display,
//! quantity/note entry, the paginated row table with inline quantity
//! editing and gated deletion, and the page-local totals footer.
//!
//! Two keyboard areas, vim-style: *entry mode* types into the search /
//! quantity / note fields (Tab cycles them, Esc drops to the table),
//! *table mode* navigates rows (`i` or `/` returns to entry mode).

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::api::{ApiError, Page, ProductSuggestion, StockMovementRow};
use crate::engine::{
    coerce_quantity, prepare_submission, CommitDecision, DirectionProfile, EditSession,
    EnterOutcome, PageTotals, PendingEntry, ResultsOutcome, RowStore, SearchDispatch, SearchEval,
    SearchPipeline, SelectedProduct, SelectionState,
};
use crate::tui::events::{AppEvent, Notification, NotificationLevel};
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;

/// Which keyboard area is active within the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Entry,
    Table,
}

/// Which entry field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryField {
    Search,
    Quantity,
    Note,
}

impl EntryField {
    fn next(self) -> Self {
        match self {
            EntryField::Search => EntryField::Quantity,
            EntryField::Quantity => EntryField::Note,
            EntryField::Note => EntryField::Search,
        }
    }
}

pub struct MovementViewState {
    profile: DirectionProfile,
    mode: ViewMode,
    field: EntryField,

    // Entry area
    query: InputBuffer,
    quantity_input: InputBuffer,
    note_input: InputBuffer,
    selection: SelectionState,
    search: SearchPipeline,
    entry: PendingEntry,
    submitting: bool,

    // Row area
    store: RowStore,
    totals: PageTotals,
    cursor: usize,
    edit: EditSession,
    edit_input: InputBuffer,
    confirm_delete: Option<i64>,
}

impl MovementViewState {
    pub fn new(profile: DirectionProfile, per_page: u64) -> Self {
        Self {
            profile,
            mode: ViewMode::Entry,
            field: EntryField::Search,
            query: InputBuffer::new(),
            quantity_input: InputBuffer::with_text("1"),
            note_input: InputBuffer::new(),
            selection: SelectionState::new(),
            search: SearchPipeline::new(),
            entry: PendingEntry::default(),
            submitting: false,
            store: RowStore::new(per_page),
            totals: PageTotals::default(),
            cursor: 0,
            edit: EditSession::new(),
            edit_input: InputBuffer::new(),
            confirm_delete: None,
        }
    }

    /// Whether any backend call is outstanding (status-bar indicator).
    pub fn is_busy(&self) -> bool {
        self.search.is_loading() || self.store.is_loading() || self.submitting
    }

    // ── Async dispatch ──────────────────────────────────────────────

    /// Fetch the current page. Safe to call repeatedly; every mutation
    /// path ends here rather than patching rows locally.
    pub fn reload_rows(&mut self, services: &Services) {
        self.store.begin_load();
        let api = services.api.clone();
        let tx = services.event_tx.clone();
        let direction = self.profile.direction;
        let (page, per_page) = (self.store.page(), self.store.per_page());
        tokio::spawn(async move {
            let result = api.list_movements(direction, page, per_page).await;
            let _ = tx.send(AppEvent::PageLoaded { direction, result });
        });
    }

    fn dispatch_search(&self, services: &Services, dispatch: SearchDispatch) {
        let api = services.api.clone();
        let tx = services.event_tx.clone();
        let direction = self.profile.direction;
        let SearchDispatch { seq, query } = dispatch;
        log::debug!("search #{seq} ({direction:?}): {query:?}");
        tokio::spawn(async move {
            let result = api.search_products(direction, &query).await;
            let _ = tx.send(AppEvent::SearchResults {
                direction,
                seq,
                query,
                result,
            });
        });
    }

    fn submit(&mut self, services: &Services) {
        if self.submitting {
            return;
        }
        match prepare_submission(&self.profile, &self.selection, &self.entry) {
            Err(block) => notify(services, block.message(), NotificationLevel::Error),
            Ok(body) => {
                self.submitting = true;
                let api = services.api.clone();
                let tx = services.event_tx.clone();
                let direction = self.profile.direction;
                tokio::spawn(async move {
                    let result = api.create_movement(direction, &body).await;
                    let _ = tx.send(AppEvent::MovementCreated { direction, result });
                });
            }
        }
    }

    fn commit_edit(&mut self, services: &Services) {
        let Some(row_id) = self.edit.open_row() else {
            return;
        };
        let Some(row) = self.store.rows().iter().find(|r| r.id == row_id).cloned() else {
            self.edit.cancel();
            return;
        };
        match self.edit.commit(&row) {
            CommitDecision::NoChange => {}
            CommitDecision::Update { row_id, body } => {
                let api = services.api.clone();
                let tx = services.event_tx.clone();
                let direction = self.profile.direction;
                tokio::spawn(async move {
                    let result = api.update_movement(direction, row_id, &body).await;
                    let _ = tx.send(AppEvent::MovementUpdated { direction, result });
                });
            }
        }
    }

    fn dispatch_delete(&mut self, services: &Services, row_id: i64) {
        let api = services.api.clone();
        let tx = services.event_tx.clone();
        let direction = self.profile.direction;
        tokio::spawn(async move {
            let result = api.delete_movement(direction, row_id).await;
            let _ = tx.send(AppEvent::MovementDeleted { direction, result });
        });
    }

    // ── Backend event handlers ──────────────────────────────────────

    /// Tick: evaluate the debounce quiet period.
    pub fn on_tick(&mut self, services: &Services) {
        match self.search.evaluate(self.query.text(), Instant::now()) {
            SearchEval::Idle => {}
            SearchEval::Clear => self.selection.on_cleared(),
            SearchEval::Dispatch(dispatch) => self.dispatch_search(services, dispatch),
        }
    }

    pub fn on_search_results(
        &mut self,
        services: &Services,
        seq: u64,
        query: String,
        result: Result<Vec<ProductSuggestion>, ApiError>,
    ) {
        if !self.search.accept_response(seq) {
            log::debug!("dropping stale search response #{seq}");
            return;
        }
        match result {
            Err(e) => notify(services, &e.user_message(), NotificationLevel::Error),
            Ok(items) => match self.selection.on_results(&query, items) {
                ResultsOutcome::AutoCommitted(selected) => self.apply_selection(selected),
                ResultsOutcome::Listed => {}
            },
        }
    }

    pub fn on_page_loaded(
        &mut self,
        services: &Services,
        result: Result<Page<StockMovementRow>, ApiError>,
    ) {
        match result {
            Err(e) => {
                self.store.load_failed();
                notify(services, &e.user_message(), NotificationLevel::Error);
            }
            Ok(page) => {
                self.store.apply_page(page);
                self.totals = PageTotals::compute(self.store.rows());
                self.cursor = self
                    .cursor
                    .min(self.store.rows().len().saturating_sub(1));
                // Deleting the last row of the last page can leave us
                // past the end; fall back and refetch.
                if self.store.page() > self.store.last_page()
                    && self.store.go_to(self.store.last_page())
                {
                    self.reload_rows(services);
                }
            }
        }
    }

    pub fn on_created(
        &mut self,
        services: &Services,
        result: Result<StockMovementRow, ApiError>,
    ) {
        self.submitting = false;
        match result {
            Err(e) => {
                // Entry and selection stay intact so the operator can
                // correct and retry without re-scanning.
                notify(services, &e.user_message(), NotificationLevel::Error);
            }
            Ok(row) => {
                services.audio.play_success();
                notify(
                    services,
                    &format!("Recorded {} x {}", row.quantity, row.product.name),
                    NotificationLevel::Success,
                );
                self.entry.reset();
                self.quantity_input.set_text("1");
                self.note_input.clear();
                self.selection.reset();
                self.search.reset();
                self.query.clear();
                self.mode = ViewMode::Entry;
                self.field = EntryField::Search;
                self.reload_rows(services);
            }
        }
    }

    pub fn on_updated(
        &mut self,
        services: &Services,
        result: Result<StockMovementRow, ApiError>,
    ) {
        match result {
            Err(e) => notify(services, &e.user_message(), NotificationLevel::Error),
            Ok(_) => {
                notify(services, "Quantity updated", NotificationLevel::Success);
                self.reload_rows(services);
            }
        }
    }

    pub fn on_deleted(&mut self, services: &Services, result: Result<(), ApiError>) {
        match result {
            Err(e) => notify(services, &e.user_message(), NotificationLevel::Error),
            Ok(()) => {
                notify(services, "Entry deleted", NotificationLevel::Success);
                self.reload_rows(services);
            }
        }
    }

    // ── Input handling ──────────────────────────────────────────────

    /// Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };
        let (modifiers, code) = (*modifiers, *code);

        // The confirmation modal swallows everything while open.
        if let Some(row_id) = self.confirm_delete {
            match code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.confirm_delete = None;
                    self.dispatch_delete(services, row_id);
                }
                KeyCode::Char('n') | KeyCode::Esc => self.confirm_delete = None,
                _ => {}
            }
            return true;
        }

        match self.mode {
            ViewMode::Entry => self.handle_entry_input(modifiers, code, services),
            ViewMode::Table => self.handle_table_input(modifiers, code, services),
        }
    }

    fn handle_entry_input(
        &mut self,
        modifiers: KeyModifiers,
        code: KeyCode,
        services: &Services,
    ) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match code {
            KeyCode::Tab => {
                self.field = self.field.next();
                true
            }
            KeyCode::Esc => {
                if self.selection.list_open() {
                    self.selection.escape();
                } else {
                    self.mode = ViewMode::Table;
                }
                true
            }
            _ => match self.field {
                EntryField::Search => self.handle_search_key(code, services),
                EntryField::Quantity => self.handle_quantity_key(code, services),
                EntryField::Note => self.handle_note_key(code, services),
            },
        }
    }

    fn handle_search_key(&mut self, code: KeyCode, services: &Services) -> bool {
        match code {
            KeyCode::Char(c) => {
                self.query.insert_char(c);
                self.on_query_mutated();
                true
            }
            KeyCode::Backspace => {
                self.query.backspace();
                self.on_query_mutated();
                true
            }
            KeyCode::Left => {
                self.query.move_left();
                true
            }
            KeyCode::Right => {
                self.query.move_right();
                true
            }
            KeyCode::Down => {
                self.selection.highlight_down();
                true
            }
            KeyCode::Up => {
                self.selection.highlight_up();
                true
            }
            KeyCode::Enter => {
                match self.selection.enter(self.query.text()) {
                    EnterOutcome::Selected(selected) => self.apply_selection(selected),
                    EnterOutcome::UnknownIdentifier { query } => notify(
                        services,
                        &format!("Unknown barcode / SKU: {query}"),
                        NotificationLevel::Error,
                    ),
                    EnterOutcome::Ignored => {}
                }
                true
            }
            _ => false,
        }
    }

    fn handle_quantity_key(&mut self, code: KeyCode, services: &Services) -> bool {
        match code {
            // Digits only; anything else would be coerced away anyway.
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.quantity_input.insert_char(c);
                self.coerce_quantity_field();
                true
            }
            KeyCode::Char(_) => true,
            KeyCode::Backspace => {
                self.quantity_input.backspace();
                self.coerce_quantity_field();
                true
            }
            KeyCode::Enter => {
                self.submit(services);
                true
            }
            _ => false,
        }
    }

    fn handle_note_key(&mut self, code: KeyCode, services: &Services) -> bool {
        match code {
            KeyCode::Char(c) => {
                self.note_input.insert_char(c);
                self.entry.note = self.note_input.text().to_string();
                true
            }
            KeyCode::Backspace => {
                self.note_input.backspace();
                self.entry.note = self.note_input.text().to_string();
                true
            }
            KeyCode::Left => {
                self.note_input.move_left();
                true
            }
            KeyCode::Right => {
                self.note_input.move_right();
                true
            }
            KeyCode::Enter => {
                self.submit(services);
                true
            }
            _ => false,
        }
    }

    fn handle_table_input(
        &mut self,
        modifiers: KeyModifiers,
        code: KeyCode,
        services: &Services,
    ) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        // Inline edit captures keys while a row is open.
        if self.edit.open_row().is_some() {
            return self.handle_edit_key(code, services);
        }

        match code {
            KeyCode::Char('i') | KeyCode::Char('/') => {
                self.mode = ViewMode::Entry;
                self.field = EntryField::Search;
                true
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.cursor = (self.cursor + 1)
                    .min(self.store.rows().len().saturating_sub(1));
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(row) = self.store.row(self.cursor) {
                    self.edit.open(row);
                    let seed = self
                        .edit
                        .draft_for(row.id)
                        .unwrap_or(row.quantity)
                        .to_string();
                    self.edit_input.set_text(seed);
                }
                true
            }
            KeyCode::Char('d') => {
                if let Some(row) = self.store.row(self.cursor) {
                    if !self.profile.can_delete(&services.role) {
                        notify(
                            services,
                            "You do not have permission to delete stock-out entries.",
                            NotificationLevel::Warning,
                        );
                    } else {
                        self.confirm_delete = Some(row.id);
                    }
                }
                true
            }
            KeyCode::Char(']') => {
                if self.store.next_page() {
                    self.reload_rows(services);
                }
                true
            }
            KeyCode::Char('[') => {
                if self.store.prev_page() {
                    self.reload_rows(services);
                }
                true
            }
            KeyCode::Char('+') => {
                if self.store.cycle_per_page() {
                    self.reload_rows(services);
                }
                true
            }
            KeyCode::Char('-') => {
                if self.store.cycle_per_page_back() {
                    self.reload_rows(services);
                }
                true
            }
            KeyCode::Char('r') => {
                self.reload_rows(services);
                true
            }
            _ => false,
        }
    }

    fn handle_edit_key(&mut self, code: KeyCode, services: &Services) -> bool {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.edit_input.insert_char(c);
                self.edit
                    .set_draft(coerce_quantity(self.edit_input.text()));
                true
            }
            KeyCode::Backspace => {
                self.edit_input.backspace();
                self.edit
                    .set_draft(coerce_quantity(self.edit_input.text()));
                true
            }
            KeyCode::Enter => {
                self.commit_edit(services);
                true
            }
            // Moving away from the row is a blur: commit first.
            KeyCode::Char('j') | KeyCode::Down => {
                self.commit_edit(services);
                self.cursor = (self.cursor + 1)
                    .min(self.store.rows().len().saturating_sub(1));
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.commit_edit(services);
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Esc => {
                if self.profile.allows_edit_cancel() {
                    self.edit.cancel();
                } else {
                    self.commit_edit(services);
                }
                true
            }
            _ => true,
        }
    }

    // ── Entry helpers ───────────────────────────────────────────────

    /// Shared path for every raw query mutation: disarm the selection
    /// and re-arm the debounce deadline.
    fn on_query_mutated(&mut self) {
        self.selection.on_query_mutated(self.query.is_empty());
        self.search.note_input(Instant::now());
    }

    /// Arm a product: rewrite the query text to the composed label,
    /// suppress the search cycle that rewrite schedules, and move the
    /// keyboard focus to the quantity field.
    fn apply_selection(&mut self, selected: SelectedProduct) {
        self.query.set_text(selected.label.as_str());
        self.search.suppress_next();
        self.search.note_input(Instant::now());
        self.mode = ViewMode::Entry;
        self.field = EntryField::Quantity;
    }

    /// Eagerly coerce the quantity field; the displayed text always
    /// equals the value that would be submitted.
    fn coerce_quantity_field(&mut self) {
        self.entry.set_quantity_raw(self.quantity_input.text());
        self.quantity_input.set_text(self.entry.quantity.to_string());
    }

    // ── Rendering ───────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(7), // Entry panel
            Constraint::Min(4),    // Row table
            Constraint::Length(3), // Totals footer
        ])
        .split(area);

        self.render_entry_panel(frame, chunks[0]);
        self.render_table(frame, chunks[1]);
        self.render_totals(frame, chunks[2]);

        if self.selection.list_open() {
            self.render_suggestions(frame, chunks[0]);
        }
        if self.confirm_delete.is_some() {
            self.render_confirm_modal(frame, area);
        }
    }

    fn render_entry_panel(&self, frame: &mut Frame, area: Rect) {
        let focused = |field| self.mode == ViewMode::Entry && self.field == field;
        let field_style = |field| {
            if focused(field) {
                Style::default().fg(theme::ACCENT)
            } else {
                Style::default().fg(theme::TEXT)
            }
        };

        let search_hint = if self.search.is_loading() {
            Span::styled("  searching...", Style::default().fg(theme::INFO))
        } else {
            Span::raw("")
        };

        let armed = match self.selection.selected() {
            Some(sel) => {
                let mut spans = vec![
                    Span::styled("Armed: ", Style::default().fg(theme::TEXT_MUTED)),
                    Span::styled(sel.label.clone(), theme::highlight()),
                ];
                if let Some(on_hand) = sel.suggestion.on_hand_quantity {
                    spans.push(Span::styled(
                        format!("  (on hand: {on_hand})"),
                        Style::default().fg(if on_hand > 0 {
                            theme::TEXT_MUTED
                        } else {
                            theme::WARNING
                        }),
                    ));
                }
                Line::from(spans)
            }
            None => Line::styled(
                "No product armed — scan a barcode or type to search",
                Style::default().fg(theme::TEXT_DIM),
            ),
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("Scan / search: ", Style::default().fg(theme::TEXT_MUTED)),
                Span::styled(self.query.text().to_string(), field_style(EntryField::Search)),
                cursor_span(focused(EntryField::Search)),
                search_hint,
            ]),
            armed,
            Line::from(vec![
                Span::styled("Qty: ", Style::default().fg(theme::TEXT_MUTED)),
                Span::styled(
                    self.quantity_input.text().to_string(),
                    field_style(EntryField::Quantity),
                ),
                cursor_span(focused(EntryField::Quantity)),
                Span::styled("   Note: ", Style::default().fg(theme::TEXT_MUTED)),
                Span::styled(self.note_input.text().to_string(), field_style(EntryField::Note)),
                cursor_span(focused(EntryField::Note)),
            ]),
            Line::from(vec![
                Span::styled("Enter", theme::key_hint()),
                Span::raw(":select/submit  "),
                Span::styled("Tab", theme::key_hint()),
                Span::raw(":field  "),
                Span::styled("Esc", theme::key_hint()),
                Span::raw(":rows"),
            ]),
        ];

        let block = Block::default()
            .title(format!(" {} — New Entry ", self.profile.direction.label()))
            .borders(Borders::ALL)
            .border_style(if self.mode == ViewMode::Entry {
                Style::default().fg(theme::PRIMARY)
            } else {
                Style::default().fg(theme::TEXT_DIM)
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_suggestions(&self, frame: &mut Frame, entry_area: Rect) {
        let candidates = self.selection.candidates();
        let height = (candidates.len() as u16).clamp(1, 8) + 2;
        let width = entry_area.width.saturating_sub(4).min(60).max(20);
        let popup = Rect::new(
            entry_area.x + 2,
            entry_area.y + 2,
            width,
            height.min(frame.area().height.saturating_sub(entry_area.y + 2)),
        );

        let lines: Vec<Line> = if candidates.is_empty() {
            vec![Line::styled(
                "  No matching products",
                Style::default().fg(theme::TEXT_DIM),
            )]
        } else {
            candidates
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let ident = c
                        .barcode
                        .as_deref()
                        .or(c.sku.as_deref())
                        .unwrap_or("-");
                    let text = format!(" {ident}  {}", c.name);
                    if i == self.selection.highlight() {
                        Line::styled(format!("▸{text}"), theme::highlight())
                    } else {
                        Line::raw(format!(" {text}"))
                    }
                })
                .collect()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::PRIMARY_LIGHT));
        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(vec!["Product", "SKU / Barcode", "Qty", "Unit", "Amount", "When"])
            .style(Style::default().fg(theme::TEXT_MUTED).add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .store
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let unit = crate::engine::resolve_unit_price(row);
                let qty_cell = if self.edit.is_editing(row.id) {
                    Cell::from(format!("[{}]", self.edit_input.text()))
                        .style(Style::default().fg(theme::ACCENT))
                } else {
                    Cell::from(row.quantity.to_string())
                };
                let ident = row
                    .product
                    .barcode
                    .as_deref()
                    .or(row.product.sku.as_deref())
                    .unwrap_or("-");
                let style = if self.mode == ViewMode::Table && i == self.cursor {
                    theme::highlight()
                } else {
                    Style::default().fg(theme::TEXT)
                };
                Row::new(vec![
                    Cell::from(row.product.name.clone()),
                    Cell::from(ident.to_string()),
                    qty_cell,
                    Cell::from(format!("{unit:.2}")),
                    Cell::from(format!("{:.2}", row.quantity as f64 * unit)),
                    Cell::from(display_timestamp(&row.timestamp)),
                ])
                .style(style)
            })
            .collect();

        let title = format!(
            " Entries · page {}/{} ({} total){} ",
            self.store.page(),
            self.store.last_page(),
            self.store.total(),
            if self.store.is_loading() { " ⟳" } else { "" },
        );
        let table = Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Length(16),
                Constraint::Length(7),
                Constraint::Length(9),
                Constraint::Length(11),
                Constraint::Length(20),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(if self.mode == ViewMode::Table {
                    Style::default().fg(theme::PRIMARY)
                } else {
                    Style::default().fg(theme::TEXT_DIM)
                }),
        );
        frame.render_widget(table, area);
    }

    fn render_totals(&self, frame: &mut Frame, area: Rect) {
        let t = &self.totals;
        let line = Line::from(vec![
            Span::styled("Qty ", Style::default().fg(theme::TEXT_MUTED)),
            Span::styled(t.total_qty.to_string(), theme::highlight()),
            Span::styled("   Unit Σ ", Style::default().fg(theme::TEXT_MUTED)),
            Span::raw(format!("{:.2}", t.total_unit_price_sum)),
            Span::styled("   Amount ", Style::default().fg(theme::TEXT_MUTED)),
            Span::styled(format!("{:.2}", t.total_amount), theme::highlight()),
            Span::styled("   Sales Σ ", Style::default().fg(theme::TEXT_MUTED)),
            Span::raw(format!("{:.2}", t.total_unit_sales_price_sum)),
            Span::styled("   Sales amount ", Style::default().fg(theme::TEXT_MUTED)),
            Span::raw(format!("{:.2}", t.total_sales_amount)),
        ]);
        let block = Block::default()
            .title(" Page totals ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::TEXT_DIM));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn render_confirm_modal(&self, frame: &mut Frame, area: Rect) {
        let width = 44.min(area.width);
        let height = 5.min(area.height);
        let modal = Rect::new(
            (area.width.saturating_sub(width)) / 2,
            (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );
        let lines = vec![
            Line::raw(""),
            Line::from(Span::raw("  Delete this entry? It cannot be undone.")),
            Line::from(vec![
                Span::raw("  "),
                Span::styled("y", theme::key_hint()),
                Span::raw(":delete  "),
                Span::styled("n", theme::key_hint()),
                Span::raw(":cancel"),
            ]),
        ];
        let block = Block::default()
            .title(" Confirm delete ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::WARNING));
        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

fn cursor_span(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("█", Style::default().fg(theme::PRIMARY_LIGHT))
    } else {
        Span::raw("")
    }
}

/// Server timestamps stay verbatim in the row (update echoes them back
/// unchanged); this only shortens them for the table column.
fn display_timestamp(raw: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

fn notify(services: &Services, message: &str, level: NotificationLevel) {
    let _ = services.event_tx.send(AppEvent::Notification(Notification {
        id: 0, // assigned by the app
        message: message.to_string(),
        level,
        ttl_ticks: 100,
    }));
}

use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::engine::{Direction, DirectionProfile};

use super::events::{Action, AppEvent, Focus, Notification, NotificationLevel};
use super::services::Services;
use super::theme;
use super::views::movement::MovementViewState;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Currently focused movement view.
    pub focus: Focus,
    /// Stock-in entry view.
    pub stock_in: MovementViewState,
    /// Stock-out entry view.
    pub stock_out: MovementViewState,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Sender for pushing events from within the app.
    #[allow(dead_code)]
    event_tx: mpsc::UnboundedSender<AppEvent>,
    /// Backend services handle.
    services: Services,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        services: Services,
    ) -> Self {
        let per_page = config.session.per_page;
        Self {
            running: true,
            focus: Focus::StockIn,
            stock_in: MovementViewState::new(DirectionProfile::stock_in(), per_page),
            stock_out: MovementViewState::new(DirectionProfile::stock_out(), per_page),
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            event_rx,
            event_tx,
            services,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        // Prime both movement tables before the first keystroke.
        self.stock_in.reload_rows(&self.services);
        self.stock_out.reload_rows(&self.services);

        while self.running {
            // Render
            terminal.draw(|frame| self.render(frame))?;

            // Select next event
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 2: Focused view
                let Self {
                    focus,
                    stock_in,
                    stock_out,
                    services,
                    ..
                } = self;
                let view = match focus {
                    Focus::StockIn => stock_in,
                    Focus::StockOut => stock_out,
                };
                if view.handle_input(&crossterm_event, services) {
                    return;
                }

                // Priority 3: Global keybindings
                if let Some(action) = self.map_input_to_action(crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::Tick => self.on_tick(),
            AppEvent::SearchResults {
                direction,
                seq,
                query,
                result,
            } => {
                let (view, services) = self.view_for(direction);
                view.on_search_results(services, seq, query, result);
            }
            AppEvent::PageLoaded { direction, result } => {
                let (view, services) = self.view_for(direction);
                view.on_page_loaded(services, result);
            }
            AppEvent::MovementCreated { direction, result } => {
                let (view, services) = self.view_for(direction);
                view.on_created(services, result);
            }
            AppEvent::MovementUpdated { direction, result } => {
                let (view, services) = self.view_for(direction);
                view.on_updated(services, result);
            }
            AppEvent::MovementDeleted { direction, result } => {
                let (view, services) = self.view_for(direction);
                view.on_deleted(services, result);
            }
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    fn focused_view(&self) -> &MovementViewState {
        match self.focus {
            Focus::StockIn => &self.stock_in,
            Focus::StockOut => &self.stock_out,
        }
    }

    /// Split-borrow: the view for `direction` plus the services handle.
    fn view_for(&mut self, direction: Direction) -> (&mut MovementViewState, &Services) {
        let view = match direction {
            Direction::In => &mut self.stock_in,
            Direction::Out => &mut self.stock_out,
        };
        (view, &self.services)
    }

    // ── Input mapping ───────────────────────────────────────────────────

    /// Map help modal input to action.
    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (modifiers, code) {
            // Ctrl+C → quit
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Tab => Some(Action::TabNext),
                KeyCode::BackTab => Some(Action::TabPrev),
                KeyCode::Char('1') => Some(Action::FocusStockIn),
                KeyCode::Char('2') => Some(Action::FocusStockOut),
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::FocusStockIn => self.set_focus(Focus::StockIn),
            Action::FocusStockOut => self.set_focus(Focus::StockOut),
            Action::TabNext => self.set_focus(self.focus.next()),
            Action::TabPrev => self.set_focus(self.focus.prev()),
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.focus = focus;
            let (view, services) = self.view_for(focus.direction());
            view.reload_rows(services);
        }
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: 100,
        });

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired, run the
    /// views' debounce evaluation.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);

        self.stock_in.on_tick(&self.services);
        self.stock_out.on_tick(&self.services);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);

        self.focused_view().render(frame, chunks[0]);
        self.render_status_bar(frame, chunks[1]);

        // Overlays
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let activity = if self.focused_view().is_busy() {
            Span::styled("working", Style::default().fg(theme::PRIMARY_LIGHT))
        } else {
            Span::styled("ready", Style::default().fg(theme::TEXT_MUTED))
        };

        let status = Line::from(vec![
            Span::styled(" STOCKDESK ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled(
                self.focus.label(),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            activity,
            Span::raw(" │ "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":switch "),
            Span::styled("1/2", theme::key_hint()),
            Span::raw(":in/out "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1;

        let notification_area = Rect::new(x, y, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(format!(" {prefix} "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::raw(&n.message),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = vec![
            ("Global:", ""),
            ("q", "Quit application"),
            ("?", "Toggle this help"),
            ("Tab / Shift+Tab", "Switch stock-in / stock-out"),
            ("1 / 2", "Jump to stock-in / stock-out"),
            ("Ctrl+C", "Force quit"),
            ("", ""),
            ("Entry panel:", ""),
            ("Tab", "Cycle search / quantity / note"),
            ("Down/Up", "Move suggestion highlight"),
            ("Enter (search)", "Pick highlighted suggestion"),
            ("Enter (quantity)", "Submit the movement"),
            ("Esc", "Close suggestions, then table"),
            ("", ""),
            ("Table:", ""),
            ("i / /", "Back to entry panel"),
            ("j/k", "Move row cursor"),
            ("e / Enter", "Edit quantity inline"),
            ("d", "Delete row (with confirm)"),
            ("[ / ]", "Previous / next page"),
            ("+ / -", "Cycle rows per page"),
            ("r", "Reload current page"),
            ("", ""),
            ("Inline edit:", ""),
            ("Enter", "Commit quantity"),
            ("j/k", "Commit and move cursor"),
            ("Esc", "Cancel (stock-out only)"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<22}", key),
                        Style::default()
                            .fg(theme::PRIMARY_LIGHT)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("?", Style::default()
                            .fg(theme::PRIMARY_LIGHT)
                            .add_modifier(Modifier::BOLD)),
            Span::raw(" or "),
            Span::styled("Esc", Style::default()
                            .fg(theme::PRIMARY_LIGHT)
                            .add_modifier(Modifier::BOLD)),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> AppState {
        let (tx, rx) = mpsc::unbounded_channel();
        let config = AppConfig::default();
        let services = Services::init(&config, tx.clone());
        AppState::new(&config, rx, tx, services)
    }

    #[test]
    fn test_push_notification_dedup_and_cap() {
        let mut a = app();
        a.push_notification("saved".into(), NotificationLevel::Success);
        a.push_notification("saved".into(), NotificationLevel::Success);
        assert_eq!(a.notifications.len(), 1);

        a.push_notification("one".into(), NotificationLevel::Info);
        a.push_notification("two".into(), NotificationLevel::Info);
        a.push_notification("three".into(), NotificationLevel::Info);
        assert_eq!(a.notifications.len(), 3);
        // Oldest evicted first
        assert!(a.notifications.iter().all(|n| n.message != "saved"));
    }

    #[test]
    fn test_notifications_expire_on_tick() {
        let mut a = app();
        a.push_notification("ephemeral".into(), NotificationLevel::Info);
        a.notifications[0].ttl_ticks = 2;
        a.on_tick();
        assert_eq!(a.notifications.len(), 1);
        a.on_tick();
        assert!(a.notifications.is_empty());
    }

    // Switching focus refetches the newly focused view, so a runtime
    // must be present for the spawned fetch.
    #[tokio::test]
    async fn test_tab_switches_focus() {
        let mut a = app();
        assert_eq!(a.focus, Focus::StockIn);
        a.handle_action(Action::TabNext);
        assert_eq!(a.focus, Focus::StockOut);
        a.handle_action(Action::TabPrev);
        assert_eq!(a.focus, Focus::StockIn);
    }

    #[test]
    fn test_question_mark_opens_help() {
        let mut a = app();
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE));
        // Focused view is in Entry mode with search focused, so '?' is
        // typed into the query instead of opening help.
        a.handle_event(AppEvent::Input(ev.clone()));
        assert!(!a.show_help);

        a.handle_action(Action::ShowHelp);
        assert!(a.show_help);
        a.handle_event(AppEvent::Input(ev));
        assert!(!a.show_help);
    }

    #[test]
    fn test_quit_event_stops_loop() {
        let mut a = app();
        a.handle_event(AppEvent::Quit);
        assert!(!a.running);
    }

    #[test]
    fn test_centered_rect_within_parent() {
        let area = Rect::new(0, 0, 100, 50);
        let centered = centered_rect(50, 50, area);
        assert!(centered.x > 0);
        assert!(centered.y > 0);
        assert!(centered.x + centered.width <= area.width);
        assert!(centered.y + centered.height <= area.height);
    }
}

//! Events flowing through the Elm-architecture event loop.

use crate::api::{ApiError, Page, ProductSuggestion, StockMovementRow};
use crate::engine::Direction;

/// Events delivered to the app's select loop. Backend completions are
/// tagged with their direction so the app can route them to the right
/// view instance.
#[derive(Debug)]
pub enum AppEvent {
    /// Periodic tick: debounce evaluation, notification TTLs.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// A product lookup finished. `seq` ties it back to its dispatch
    /// so stale responses can be discarded.
    SearchResults {
        direction: Direction,
        seq: u64,
        query: String,
        result: Result<Vec<ProductSuggestion>, ApiError>,
    },
    /// A page fetch finished.
    PageLoaded {
        direction: Direction,
        result: Result<Page<StockMovementRow>, ApiError>,
    },
    /// A create request finished.
    MovementCreated {
        direction: Direction,
        result: Result<StockMovementRow, ApiError>,
    },
    /// An inline-edit update finished.
    MovementUpdated {
        direction: Direction,
        result: Result<StockMovementRow, ApiError>,
    },
    /// A delete finished.
    MovementDeleted {
        direction: Direction,
        result: Result<(), ApiError>,
    },
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the global input mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FocusStockIn,
    FocusStockOut,
    TabNext,
    TabPrev,
    ShowHelp,
    CloseHelp,
    Quit,
}

/// Which movement view has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    StockIn,
    StockOut,
}

impl Focus {
    pub fn direction(self) -> Direction {
        match self {
            Focus::StockIn => Direction::In,
            Focus::StockOut => Direction::Out,
        }
    }

    pub fn label(self) -> &'static str {
        self.direction().label()
    }

    pub fn next(self) -> Focus {
        match self {
            Focus::StockIn => Focus::StockOut,
            Focus::StockOut => Focus::StockIn,
        }
    }

    pub fn prev(self) -> Focus {
        // Two views: prev and next coincide.
        self.next()
    }
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

//! Headless stock-movement entry engine.
//!
//! Everything here is synchronous, deterministic state-machine logic:
//! the debounced search pipeline, the product selection state machine,
//! submission validation, pagination, inline quantity editing, and
//! page-local totals. Network and terminal concerns live in `api` and
//! `tui`; the engine only decides *what* should happen.

mod direction;
mod edit;
mod entry;
mod rows;
mod search;
mod selection;
mod totals;

pub use direction::{Direction, DirectionProfile};
pub use edit::{CommitDecision, EditSession};
pub use entry::{coerce_quantity, prepare_submission, PendingEntry, SubmitBlock};
pub use rows::RowStore;
pub use search::{SearchDispatch, SearchEval, SearchPipeline, DEBOUNCE_QUIET_PERIOD};
pub use selection::{EnterOutcome, ResultsOutcome, SelectedProduct, SelectionPhase, SelectionState};
pub use totals::{resolve_unit_price, resolve_unit_sales_price, PageTotals};

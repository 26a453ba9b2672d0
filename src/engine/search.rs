//! Debounced search pipeline.
//!
//! Every raw-query keystroke re-arms a single quiet-period deadline;
//! only the most recently armed deadline is ever honored, no matter how
//! fast a scanner emits characters. When the deadline fires, the
//! pipeline either clears (empty query), consumes a pending suppress
//! token (programmatic query rewrite after a selection), or dispatches
//! a lookup tagged with a monotonically increasing sequence number.
//!
//! Dispatched lookups are never aborted. Instead, responses carry their
//! sequence number back and anything that is not the latest dispatch is
//! dropped, so an out-of-order slow response can never overwrite
//! fresher suggestion state.

use std::time::{Duration, Instant};

/// Quiet period after the last keystroke before a lookup is issued.
pub const DEBOUNCE_QUIET_PERIOD: Duration = Duration::from_millis(180);

/// A lookup the caller must now dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDispatch {
    pub seq: u64,
    pub query: String,
}

/// What the quiet-period evaluation decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEval {
    /// Nothing due (no deadline armed, or not yet elapsed, or a
    /// suppress token was consumed).
    Idle,
    /// Query is empty: close and clear the suggestion list, no lookup.
    Clear,
    /// Issue this lookup.
    Dispatch(SearchDispatch),
}

#[derive(Debug)]
pub struct SearchPipeline {
    deadline: Option<Instant>,
    suppress: bool,
    next_seq: u64,
    latest_seq: u64,
    in_flight: bool,
}

impl SearchPipeline {
    pub fn new() -> Self {
        Self {
            deadline: None,
            suppress: false,
            next_seq: 0,
            latest_seq: 0,
            in_flight: false,
        }
    }

    /// Note a raw query mutation. Cancels any armed deadline and arms a
    /// fresh one; call once per keystroke or programmatic rewrite.
    pub fn note_input(&mut self, now: Instant) {
        self.deadline = Some(now + DEBOUNCE_QUIET_PERIOD);
    }

    /// Arm the one-shot suppress token. The next deadline that fires is
    /// consumed silently instead of dispatching, so a programmatic query
    /// rewrite (the composed label after selection) cannot re-open the
    /// suggestion list.
    pub fn suppress_next(&mut self) {
        self.suppress = true;
    }

    /// Evaluate the quiet period. Call from the event-loop tick with the
    /// current query text.
    pub fn evaluate(&mut self, query: &str, now: Instant) -> SearchEval {
        match self.deadline {
            Some(deadline) if now >= deadline => {}
            _ => return SearchEval::Idle,
        }
        self.deadline = None;

        if self.suppress {
            self.suppress = false;
            return SearchEval::Idle;
        }

        if query.trim().is_empty() {
            // Invalidate any outstanding dispatch: a late response for
            // the erased query must not reopen (or auto-commit) the
            // list. Burning a sequence number keeps it stale forever.
            self.next_seq += 1;
            self.latest_seq = self.next_seq;
            self.in_flight = false;
            return SearchEval::Clear;
        }

        self.next_seq += 1;
        self.latest_seq = self.next_seq;
        self.in_flight = true;
        SearchEval::Dispatch(SearchDispatch {
            seq: self.next_seq,
            query: query.to_string(),
        })
    }

    /// Report a response arriving for dispatch `seq`. Returns `true`
    /// when the response is current; stale responses return `false`
    /// and must be discarded by the caller.
    pub fn accept_response(&mut self, seq: u64) -> bool {
        if seq != self.latest_seq {
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Whether a lookup is outstanding (drives the loading indicator).
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Drop any armed deadline and pending token (after a successful
    /// submission reset). Sequence numbers keep increasing so a late
    /// pre-reset response still classifies as stale.
    pub fn reset(&mut self) {
        self.deadline = None;
        self.suppress = false;
        self.in_flight = false;
    }
}

impl Default for SearchPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> Instant {
        Instant::now()
    }

    #[test]
    fn test_idle_without_input() {
        let mut p = SearchPipeline::new();
        assert_eq!(p.evaluate("abc", t0()), SearchEval::Idle);
    }

    #[test]
    fn test_quiet_period_not_elapsed() {
        let mut p = SearchPipeline::new();
        let now = t0();
        p.note_input(now);
        assert_eq!(
            p.evaluate("abc", now + Duration::from_millis(100)),
            SearchEval::Idle
        );
    }

    #[test]
    fn test_dispatch_after_quiet_period() {
        let mut p = SearchPipeline::new();
        let now = t0();
        p.note_input(now);
        let eval = p.evaluate("abc", now + DEBOUNCE_QUIET_PERIOD);
        assert_eq!(
            eval,
            SearchEval::Dispatch(SearchDispatch {
                seq: 1,
                query: "abc".into()
            })
        );
        assert!(p.is_loading());
    }

    #[test]
    fn test_burst_of_keystrokes_dispatches_once() {
        // A scanner emitting ten characters re-arms the deadline ten
        // times; only the last one fires.
        let mut p = SearchPipeline::new();
        let now = t0();
        for i in 0..10 {
            p.note_input(now + Duration::from_millis(i * 20));
            assert_eq!(
                p.evaluate("4006381333931", now + Duration::from_millis(i * 20)),
                SearchEval::Idle
            );
        }
        let last = now + Duration::from_millis(9 * 20);
        let eval = p.evaluate("4006381333931", last + DEBOUNCE_QUIET_PERIOD);
        assert!(matches!(eval, SearchEval::Dispatch(d) if d.seq == 1));
        // Deadline is consumed; nothing further fires.
        assert_eq!(
            p.evaluate("4006381333931", last + Duration::from_secs(5)),
            SearchEval::Idle
        );
    }

    #[test]
    fn test_empty_query_clears_without_dispatch() {
        let mut p = SearchPipeline::new();
        let now = t0();
        p.note_input(now);
        assert_eq!(
            p.evaluate("   ", now + DEBOUNCE_QUIET_PERIOD),
            SearchEval::Clear
        );
        assert!(!p.is_loading());
    }

    #[test]
    fn test_clear_invalidates_outstanding_dispatch() {
        let mut p = SearchPipeline::new();
        let now = t0();

        p.note_input(now);
        let SearchEval::Dispatch(d) = p.evaluate("be", now + DEBOUNCE_QUIET_PERIOD) else {
            panic!("expected dispatch");
        };

        // Operator erases the query before the response lands.
        let later = now + Duration::from_millis(300);
        p.note_input(later);
        assert_eq!(
            p.evaluate("", later + DEBOUNCE_QUIET_PERIOD),
            SearchEval::Clear
        );

        // The late response for the erased query is stale now.
        assert!(!p.accept_response(d.seq));
    }

    #[test]
    fn test_suppress_token_consumed_once() {
        let mut p = SearchPipeline::new();
        let now = t0();

        // Programmatic rewrite: suppressed.
        p.suppress_next();
        p.note_input(now);
        assert_eq!(
            p.evaluate("0001 - Beans 1kg", now + DEBOUNCE_QUIET_PERIOD),
            SearchEval::Idle
        );

        // Next genuine keystroke searches normally.
        let later = now + Duration::from_secs(1);
        p.note_input(later);
        assert!(matches!(
            p.evaluate("0001 - Beans 1kgx", later + DEBOUNCE_QUIET_PERIOD),
            SearchEval::Dispatch(_)
        ));
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut p = SearchPipeline::new();
        let now = t0();

        p.note_input(now);
        let SearchEval::Dispatch(first) = p.evaluate("be", now + DEBOUNCE_QUIET_PERIOD) else {
            panic!("expected dispatch");
        };

        let later = now + Duration::from_secs(1);
        p.note_input(later);
        let SearchEval::Dispatch(second) = p.evaluate("bean", later + DEBOUNCE_QUIET_PERIOD)
        else {
            panic!("expected dispatch");
        };

        // Out-of-order arrival: the older response must be dropped.
        assert!(!p.accept_response(first.seq));
        assert!(p.is_loading());
        assert!(p.accept_response(second.seq));
        assert!(!p.is_loading());
    }

    #[test]
    fn test_reset_keeps_sequence_monotonic() {
        let mut p = SearchPipeline::new();
        let now = t0();
        p.note_input(now);
        let SearchEval::Dispatch(d1) = p.evaluate("a", now + DEBOUNCE_QUIET_PERIOD) else {
            panic!("expected dispatch");
        };
        p.reset();

        let later = now + Duration::from_secs(1);
        p.note_input(later);
        let SearchEval::Dispatch(d2) = p.evaluate("b", later + DEBOUNCE_QUIET_PERIOD) else {
            panic!("expected dispatch");
        };
        assert!(d2.seq > d1.seq);
        // Pre-reset response is stale even after the reset.
        assert!(!p.accept_response(d1.seq));
    }
}

//! Request ordering for the report page.
//!
//! Only the most recently started fetch may commit its result, debounced
//! triggers collapse into the last one, and every request carries an abort
//! signal that fires when it is superseded or times out.

use std::cell::Cell;
use std::rc::Rc;

use contracts::dashboards::d410_ads_reports::ReportQuery;
use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use web_sys::{AbortController, AbortSignal};

use super::error::ReportsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Generation counter for fetches; a result is committed only if its ticket is still current
#[derive(Debug, Default)]
pub struct FetchGate {
    generation: Cell<u64>,
}

impl FetchGate {
    pub fn begin(&self) -> FetchTicket {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        FetchTicket(next)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.generation.get() == ticket.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Trailing-edge debouncer: a ticket fires only if nothing was scheduled after it
#[derive(Debug, Default)]
pub struct Debouncer {
    latest: Cell<u64>,
}

impl Debouncer {
    pub fn schedule(&self) -> DebounceTicket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        DebounceTicket(next)
    }

    pub fn should_fire(&self, ticket: DebounceTicket) -> bool {
        self.latest.get() == ticket.0
    }

    /// Invalidates every pending ticket
    pub fn cancel(&self) {
        self.latest.set(self.latest.get() + 1);
    }
}

/// How a finished fetch lands on the page
#[derive(Debug, Clone, PartialEq)]
pub enum Settled<T> {
    Commit(T),
    Fail(ReportsError),
    /// Still the latest fetch but aborted; stop loading, keep what is shown
    Idle,
    /// A newer fetch started meanwhile
    Discard,
}

/// Fetch decisions of the report page, apart from the browser.
///
/// Times are milliseconds on the caller's clock (`Date.now()` in the page).
#[derive(Debug)]
pub struct FetchCoordinator {
    gate: FetchGate,
    debouncer: Debouncer,
    debounce_ms: u32,
    due_at: Cell<f64>,
}

impl FetchCoordinator {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            gate: FetchGate::default(),
            debouncer: Debouncer::default(),
            debounce_ms,
            due_at: Cell::new(0.0),
        }
    }

    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    /// Starts a fetch for `query` right away.
    ///
    /// Any pending debounced trigger is dropped and older fetches become stale,
    /// even when the query is rejected.
    pub fn start(&self, query: &ReportQuery) -> Result<FetchTicket, ReportsError> {
        self.debouncer.cancel();
        let ticket = self.gate.begin();
        query
            .date_range
            .validate()
            .map_err(ReportsError::InvalidDateRange)?;
        Ok(ticket)
    }

    /// Registers a debounced trigger at `now_ms`
    pub fn schedule(&self, now_ms: f64) -> DebounceTicket {
        self.due_at.set(now_ms + f64::from(self.debounce_ms));
        self.debouncer.schedule()
    }

    /// Milliseconds the trigger `ticket` still has to wait at `now_ms`; `None` once superseded
    pub fn remaining_ms(&self, ticket: DebounceTicket, now_ms: f64) -> Option<u32> {
        if !self.debouncer.should_fire(ticket) {
            return None;
        }
        let left = (self.due_at.get() - now_ms).ceil().max(0.0);
        Some(left.min(f64::from(u32::MAX)) as u32)
    }

    pub fn settle<T>(&self, ticket: FetchTicket, result: Result<T, ReportsError>) -> Settled<T> {
        if !self.gate.is_current(ticket) {
            return Settled::Discard;
        }
        match result {
            Ok(data) => Settled::Commit(data),
            Err(e) if e.is_cancelled() => Settled::Idle,
            Err(e) => Settled::Fail(e),
        }
    }
}

/// Abort handle and timeout of one in-flight request
#[derive(Clone)]
pub struct RequestGuard {
    controller: Option<AbortController>,
    timeout_ms: u32,
    timed_out: Rc<Cell<bool>>,
    finished: Rc<Cell<bool>>,
}

impl RequestGuard {
    pub fn new(timeout_ms: u32) -> Self {
        let controller = AbortController::new()
            .map_err(|e| log::warn!("AbortController unavailable: {:?}", e))
            .ok();
        Self {
            controller,
            timeout_ms,
            timed_out: Rc::new(Cell::new(false)),
            finished: Rc::new(Cell::new(false)),
        }
    }

    pub fn signal(&self) -> Option<AbortSignal> {
        self.controller.as_ref().map(|c| c.signal())
    }

    /// Starts the timeout timer; the request is aborted unless it finishes first
    pub fn arm_timeout(&self) {
        if self.timeout_ms == 0 {
            return;
        }
        let guard = self.clone();
        spawn_local(async move {
            TimeoutFuture::new(guard.timeout_ms).await;
            if !guard.finished.get() {
                log::warn!("Request timed out after {} ms", guard.timeout_ms);
                guard.timed_out.set(true);
                guard.abort();
            }
        });
    }

    /// Aborts a superseded request
    pub fn abort(&self) {
        if let Some(controller) = &self.controller {
            controller.abort();
        }
    }

    pub fn finish(&self) {
        self.finished.set(true);
    }

    fn was_aborted(&self) -> bool {
        self.signal().is_some_and(|s| s.aborted())
    }

    /// Classifies a transport failure of this request
    pub fn transport_error(&self, err: impl std::fmt::Display) -> ReportsError {
        self.finish();
        classify_failure(
            self.timed_out.get(),
            self.was_aborted(),
            self.timeout_ms,
            err.to_string(),
        )
    }

    /// Classifies a failure while reading the response body
    pub fn body_error(&self, err: impl std::fmt::Display) -> ReportsError {
        if self.timed_out.get() || self.was_aborted() {
            self.transport_error(err)
        } else {
            ReportsError::Parse(err.to_string())
        }
    }
}

pub fn classify_failure(
    timed_out: bool,
    aborted: bool,
    timeout_ms: u32,
    message: String,
) -> ReportsError {
    if timed_out {
        ReportsError::Timeout {
            after_ms: timeout_ms,
        }
    } else if aborted {
        ReportsError::Cancelled
    } else {
        ReportsError::Network(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d410_ads_reports::{DateRange, EntityFilters, SelectionState};

    fn query(start: &str, end: &str) -> ReportQuery {
        ReportQuery {
            date_range: DateRange::new(start, end),
            selection: SelectionState::default(),
            filters: EntityFilters::default(),
            account_id: None,
        }
    }

    #[test]
    fn test_typing_fires_once_after_the_last_keystroke() {
        let fetches = FetchCoordinator::new(500);
        // keystrokes at 0, 120 and 300 ms
        let first = fetches.schedule(0.0);
        let second = fetches.schedule(120.0);
        let last = fetches.schedule(300.0);

        // timers wake 500 ms after each keystroke
        assert_eq!(fetches.remaining_ms(first, 500.0), None);
        assert_eq!(fetches.remaining_ms(second, 620.0), None);
        assert_eq!(fetches.remaining_ms(last, 799.0), Some(1));
        assert_eq!(fetches.remaining_ms(last, 800.0), Some(0));
    }

    #[test]
    fn test_early_timer_waits_out_the_rest() {
        let fetches = FetchCoordinator::new(500);
        let ticket = fetches.schedule(1_000.0);
        assert_eq!(fetches.remaining_ms(ticket, 1_499.0), Some(1));
        assert_eq!(fetches.remaining_ms(ticket, 1_500.0), Some(0));
        assert_eq!(fetches.remaining_ms(ticket, 2_000.0), Some(0));

        fetches.schedule(1_200.0);
        assert_eq!(fetches.remaining_ms(ticket, 1_500.0), None);
    }

    #[test]
    fn test_immediate_fetch_cancels_pending_debounce() {
        let fetches = FetchCoordinator::new(500);
        let pending = fetches.schedule(0.0);
        let ticket = fetches.start(&query("2024-03-01", "2024-03-31"));
        assert!(ticket.is_ok());
        assert_eq!(fetches.remaining_ms(pending, 10_000.0), None);
    }

    #[test]
    fn test_invalid_range_is_rejected_and_supersedes_in_flight() {
        let fetches = FetchCoordinator::new(500);
        let in_flight = fetches.start(&query("2024-03-01", "2024-03-31"));
        let Ok(in_flight) = in_flight else {
            panic!("valid range rejected");
        };

        let rejected = fetches.start(&query("2024-04-01", "2024-03-01"));
        assert!(matches!(rejected, Err(ReportsError::InvalidDateRange(_))));
        assert_eq!(fetches.settle(in_flight, Ok("old rows")), Settled::Discard);
    }

    #[test]
    fn test_out_of_order_results_commit_only_the_latest() {
        let fetches = FetchCoordinator::new(500);
        let range = query("2024-03-01", "2024-03-31");
        let (Ok(a), Ok(b)) = (fetches.start(&range), fetches.start(&range)) else {
            panic!("valid range rejected");
        };

        assert_eq!(fetches.settle(b, Ok("B")), Settled::Commit("B"));
        assert_eq!(fetches.settle(a, Ok("A")), Settled::Discard);
    }

    #[test]
    fn test_failures_of_the_latest_fetch() {
        let fetches = FetchCoordinator::new(500);
        let Ok(ticket) = fetches.start(&query("2024-03-01", "2024-03-31")) else {
            panic!("valid range rejected");
        };
        let timeout = ReportsError::Timeout { after_ms: 30_000 };
        assert_eq!(
            fetches.settle::<()>(ticket, Err(timeout.clone())),
            Settled::Fail(timeout)
        );
        assert_eq!(fetches.settle::<()>(ticket, Err(ReportsError::Cancelled)), Settled::Idle);
    }

    #[test]
    fn test_latest_fetch_wins() {
        // A (slow) starts, then B starts; A resolves after B
        let gate = FetchGate::default();
        let mut displayed: Option<&str> = None;

        let a = gate.begin();
        let b = gate.begin();

        if gate.is_current(b) {
            displayed = Some("B");
        }
        if gate.is_current(a) {
            displayed = Some("A");
        }

        assert_eq!(displayed, Some("B"));
        assert!(gate.is_current(b));
    }

    #[test]
    fn test_single_fetch_commits() {
        let gate = FetchGate::default();
        let ticket = gate.begin();
        assert!(gate.is_current(ticket));
    }

    #[test]
    fn test_keystroke_burst_fires_once() {
        let debouncer = Debouncer::default();
        // three keystrokes within the debounce window
        let tickets: Vec<_> = (0..3).map(|_| debouncer.schedule()).collect();

        let fired: Vec<_> = tickets
            .iter()
            .filter(|t| debouncer.should_fire(**t))
            .collect();
        assert_eq!(fired.len(), 1);
        assert_eq!(*fired[0], tickets[2]);
    }

    #[test]
    fn test_spaced_schedules_each_fire() {
        let debouncer = Debouncer::default();
        let first = debouncer.schedule();
        assert!(debouncer.should_fire(first));
        let second = debouncer.schedule();
        assert!(debouncer.should_fire(second));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let debouncer = Debouncer::default();
        let ticket = debouncer.schedule();
        debouncer.cancel();
        assert!(!debouncer.should_fire(ticket));
    }

    #[test]
    fn test_failure_classification() {
        assert_eq!(
            classify_failure(true, true, 30_000, "aborted".into()),
            ReportsError::Timeout { after_ms: 30_000 }
        );
        assert_eq!(
            classify_failure(false, true, 30_000, "aborted".into()),
            ReportsError::Cancelled
        );
        assert_eq!(
            classify_failure(false, false, 30_000, "offline".into()),
            ReportsError::Network("offline".into())
        );
    }
}

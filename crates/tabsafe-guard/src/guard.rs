//! The resilience guard: a single owned interceptor registry.
//!
//! Installed once at process start, it layers three interception points over
//! the host (error channel, rejection channel, primitive shims), plus two
//! repair-request producers (render-change notifications and a periodic
//! monitor) feeding one coalesced repair task. It is a safety net, not a
//! correctness mechanism: suppressed faults leave the view empty or
//! partially repaired, with a diagnostic trail for later investigation.

use std::cell::RefCell;
use std::rc::Rc;

use tabsafe_model::{AnomalyTrace, FaultKind, TraceLog};
use tabsafe_normalize::to_rows;

use crate::host::{
    Disposition, FaultEvent, HostEnvironment, RenderTree, Scheduler,
};
use crate::ops::GuardedOps;
use crate::signature::matches_fault_signature;

/// Ticks between periodic fault-counter checks.
///
/// Some faults happen inside rendering cycles the error channel never sees;
/// the only symptom is a discrepancy in rendered output, so periodic
/// reconciliation is the backstop.
pub const MONITOR_INTERVAL_TICKS: u64 = 5;

/// Mutable state owned exclusively by the guard. The host is
/// single-threaded, so `RefCell` mutations are atomic with respect to the
/// event loop.
#[derive(Debug, Default)]
pub(crate) struct GuardState {
    installed: bool,
    traces: TraceLog,
    /// Accumulator the monitor checks and resets.
    fault_count: u64,
    /// Lifetime total, for operational visibility.
    suppressed_total: u64,
    /// At most one repair pass may be scheduled at a time.
    repair_pending: bool,
    repairs_run: u64,
}

impl GuardState {
    pub(crate) fn record_fault(&mut self, kind: FaultKind, offending: impl Into<String>) {
        self.traces.record(kind, offending);
        self.fault_count += 1;
        self.suppressed_total += 1;
    }
}

pub(crate) type SharedState = Rc<RefCell<GuardState>>;

/// Process-wide guard against the known collection-type fault class.
///
/// `Uninstalled -> Installed` is the only state transition; there is no
/// teardown because the host process is short-lived per page session.
#[derive(Debug, Default)]
pub struct ResilienceGuard {
    state: SharedState,
}

impl ResilienceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install every interception layer on `host`. Re-entrant calls are
    /// no-ops; nothing is ever double-patched.
    pub fn install(&self, host: &mut dyn HostEnvironment) {
        {
            let mut state = self.state.borrow_mut();
            if state.installed {
                tracing::debug!("resilience guard already installed, skipping");
                return;
            }
            state.installed = true;
        }
        tracing::info!("installing resilience guard");

        let scheduler = host.scheduler();
        let tree = host.render_tree();

        let state = Rc::clone(&self.state);
        let handler_scheduler = Rc::clone(&scheduler);
        let handler_tree = Rc::clone(&tree);
        host.on_uncaught_error(Box::new(move |event| {
            channel_fault(
                FaultKind::UncaughtError,
                event,
                &state,
                &handler_scheduler,
                &handler_tree,
            )
        }));

        let state = Rc::clone(&self.state);
        let handler_scheduler = Rc::clone(&scheduler);
        let handler_tree = Rc::clone(&tree);
        host.on_unhandled_rejection(Box::new(move |event| {
            channel_fault(
                FaultKind::UnhandledRejection,
                event,
                &state,
                &handler_scheduler,
                &handler_tree,
            )
        }));

        let state = Rc::clone(&self.state);
        host.replace_collection_ops(Box::new(move |inner| {
            Box::new(GuardedOps::new(inner, state))
        }));

        // Render changes only matter while faults are outstanding; an
        // unconditional request here would loop through the repair pass.
        let state = Rc::clone(&self.state);
        let change_scheduler = Rc::clone(&scheduler);
        let change_tree = Rc::clone(&tree);
        host.on_render_change(Box::new(move || {
            if state.borrow().fault_count > 0 {
                request_repair(&state, &change_scheduler, &change_tree);
            }
        }));

        let state = Rc::clone(&self.state);
        let monitor_scheduler = Rc::clone(&scheduler);
        let monitor_tree = Rc::clone(&tree);
        scheduler.every(
            MONITOR_INTERVAL_TICKS,
            Box::new(move || {
                {
                    let mut guard_state = state.borrow_mut();
                    if guard_state.fault_count == 0 {
                        return;
                    }
                    tracing::debug!(
                        faults = guard_state.fault_count,
                        "monitor observed outstanding faults"
                    );
                    guard_state.fault_count = 0;
                }
                request_repair(&state, &monitor_scheduler, &monitor_tree);
            }),
        );
    }

    pub fn is_installed(&self) -> bool {
        self.state.borrow().installed
    }

    /// Total faults suppressed over the guard's lifetime.
    pub fn suppressed_count(&self) -> u64 {
        self.state.borrow().suppressed_total
    }

    /// Repair passes executed so far.
    pub fn repairs_run(&self) -> u64 {
        self.state.borrow().repairs_run
    }

    /// Snapshot of the diagnostic trail, oldest first. Read-only; the trail
    /// never drives control flow.
    pub fn trace_snapshot(&self) -> Vec<AnomalyTrace> {
        self.state.borrow().traces.to_vec()
    }
}

fn channel_fault(
    kind: FaultKind,
    event: &FaultEvent,
    state: &SharedState,
    scheduler: &Rc<dyn Scheduler>,
    tree: &Rc<RefCell<dyn RenderTree>>,
) -> Disposition {
    if !matches_fault_signature(&event.message) {
        return Disposition::Propagate;
    }
    tracing::warn!(
        message = %event.message,
        offending = %event.offending,
        ?kind,
        "suppressed collection-type fault"
    );
    {
        let mut guard_state = state.borrow_mut();
        let offending = if event.offending.is_empty() {
            event.message.clone()
        } else {
            event.offending.clone()
        };
        guard_state.record_fault(kind, offending);
    }
    request_repair(state, scheduler, tree);
    Disposition::Suppressed
}

/// Schedule a repair pass on the next tick, coalescing bursts: while one
/// pass is pending, further requests are no-ops.
pub(crate) fn request_repair(
    state: &SharedState,
    scheduler: &Rc<dyn Scheduler>,
    tree: &Rc<RefCell<dyn RenderTree>>,
) {
    {
        let mut guard_state = state.borrow_mut();
        if guard_state.repair_pending {
            return;
        }
        guard_state.repair_pending = true;
    }
    let state = Rc::clone(state);
    let tree = Rc::clone(tree);
    scheduler.next_tick(Box::new(move || run_repair_pass(&state, &tree)));
}

/// Walk the render tree and re-feed every tabular node with normalized
/// rows. Best-effort and diagnostic-only: the faulty view may still be
/// wrong afterwards, but the process keeps running.
fn run_repair_pass(state: &SharedState, tree: &Rc<RefCell<dyn RenderTree>>) {
    state.borrow_mut().repair_pending = false;
    let mut repaired = 0usize;
    tree.borrow_mut().for_each_tabular(&mut |node| {
        if !node.looks_tabular() {
            return;
        }
        let rows = to_rows(node.raw());
        node.apply_rows(rows);
        repaired += 1;
    });
    let mut guard_state = state.borrow_mut();
    guard_state.repairs_run += 1;
    tracing::debug!(nodes = repaired, "repair pass completed");
}

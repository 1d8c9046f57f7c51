#![allow(missing_docs)]

use serde_json::json;
use tabsafe_guard::{Disposition, ResilienceGuard, SimHost};
use tabsafe_model::FaultKind;

const FAULT_TEXT: &str = "TypeError: rawData.some is not a function";

fn installed_host() -> (SimHost, ResilienceGuard) {
    let mut host = SimHost::new();
    let guard = ResilienceGuard::new();
    guard.install(&mut host);
    (host, guard)
}

#[test]
fn known_fault_is_suppressed_with_one_trace() {
    let (mut host, guard) = installed_host();
    assert!(guard.is_installed());

    let disposition = host.emit_uncaught_error(FAULT_TEXT, "raw data was {}");
    assert_eq!(disposition, Disposition::Suppressed);

    let traces = guard.trace_snapshot();
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].kind, FaultKind::UncaughtError);
    assert_eq!(traces[0].offending, "raw data was {}");
    assert_eq!(guard.suppressed_count(), 1);
}

#[test]
fn rejection_channel_uses_same_matching() {
    let (mut host, guard) = installed_host();

    let disposition = host.emit_unhandled_rejection(FAULT_TEXT, "");
    assert_eq!(disposition, Disposition::Suppressed);

    let traces = guard.trace_snapshot();
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].kind, FaultKind::UnhandledRejection);
    // Falls back to the message when the host knows nothing more.
    assert_eq!(traces[0].offending, FAULT_TEXT);
}

#[test]
fn unrelated_faults_propagate_untouched() {
    let (mut host, guard) = installed_host();

    let disposition = host.emit_uncaught_error("ReferenceError: x is not defined", "");
    assert_eq!(disposition, Disposition::Propagate);
    assert!(guard.trace_snapshot().is_empty());
    assert_eq!(guard.suppressed_count(), 0);
}

#[test]
fn reinstall_is_a_noop() {
    let mut host = SimHost::new();
    let guard = ResilienceGuard::new();
    guard.install(&mut host);
    guard.install(&mut host);

    // A double-patched host would record this fault twice.
    host.emit_uncaught_error(FAULT_TEXT, "");
    assert_eq!(guard.trace_snapshot().len(), 1);

    let found = host
        .ops()
        .any(&json!(null), &|_| true)
        .expect("shim never propagates");
    assert!(!found);
    assert_eq!(guard.trace_snapshot().len(), 2);
}

#[test]
fn existence_shim_coerces_dictionary_receivers() {
    let (host, guard) = installed_host();

    // The dictionary is rebuilt as key/value rows before re-invoking.
    let found = host
        .ops()
        .any(&json!({"status": "open"}), &|element| {
            element.get("value") == Some(&json!("open"))
        })
        .expect("shim never propagates");
    assert!(found);

    let traces = guard.trace_snapshot();
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].kind, FaultKind::ExistenceCheck);
}

#[test]
fn enumeration_shims_unwrap_or_return_identity() {
    let (host, guard) = installed_host();

    let keys = host
        .ops()
        .keys(&json!([{"a": 1, "b": 2}]))
        .expect("shim never propagates");
    assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);

    let values = host
        .ops()
        .values(&json!(42))
        .expect("shim never propagates");
    assert!(values.is_empty());

    let kinds: Vec<FaultKind> = guard.trace_snapshot().iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![FaultKind::KeyEnumeration, FaultKind::ValueEnumeration]
    );
}

#[test]
fn repair_passes_are_coalesced_per_tick() {
    let (mut host, guard) = installed_host();
    host.add_table("orders", json!({"pending": 2, "done": 5}));

    for _ in 0..3 {
        host.emit_uncaught_error(FAULT_TEXT, "");
    }
    assert_eq!(guard.suppressed_count(), 3);
    assert_eq!(guard.repairs_run(), 0);

    host.run_ticks(1);
    assert_eq!(guard.repairs_run(), 1);
    assert_eq!(host.table_refreshes("orders"), Some(1));

    let rows = host.table_rows("orders").expect("node exists");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].identity, "pending");
}

#[test]
fn monitor_backstops_faults_the_channels_never_saw() {
    let (mut host, guard) = installed_host();
    host.add_table("report", json!("not a table"));

    // Shim interception only counts the fault; no repair is scheduled yet.
    let _ = host.ops().any(&json!("not a table"), &|_| true);
    assert_eq!(guard.repairs_run(), 0);

    host.run_ticks(4);
    assert_eq!(guard.repairs_run(), 0);

    // Tick 5: the monitor sees the counter, resets it, schedules a repair.
    // Tick 6: the repair task runs.
    host.run_ticks(2);
    assert_eq!(guard.repairs_run(), 1);

    // Counter was reset; an idle interval schedules nothing further.
    host.run_ticks(5);
    assert_eq!(guard.repairs_run(), 1);
}

#[test]
fn render_changes_trigger_repair_only_with_outstanding_faults() {
    let (mut host, guard) = installed_host();
    host.add_table("users", json!([{"id": 1}]));

    host.mutate_table("users", json!([{"id": 1}, {"id": 2}]));
    host.run_ticks(1);
    assert_eq!(guard.repairs_run(), 0);

    let _ = host.ops().any(&json!(null), &|_| true);
    host.mutate_table("users", json!(null));
    host.run_ticks(1);
    assert_eq!(guard.repairs_run(), 1);
}

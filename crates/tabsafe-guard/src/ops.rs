//! Lenient shims over the host's collection primitives.
//!
//! Wrapping happens exactly once, through the guard's install routine. Each
//! shim delegates to the strict primitive first; only a wrong-shaped
//! receiver takes the repair path, so correctly-typed calls pay nothing.

use std::backtrace::Backtrace;

use serde_json::Value;
use tabsafe_model::{FaultKind, Kind, classify};
use tabsafe_normalize::to_rows;

use crate::guard::SharedState;
use crate::host::{CollectionOps, TypeFault};

pub(crate) struct GuardedOps {
    inner: Box<dyn CollectionOps>,
    state: SharedState,
}

impl GuardedOps {
    pub(crate) fn new(inner: Box<dyn CollectionOps>, state: SharedState) -> Self {
        Self { inner, state }
    }

    fn note_fault(&self, kind: FaultKind, fault: &TypeFault) {
        let description = format!("{fault}; at {}", stack_snippet());
        tracing::warn!(%fault, ?kind, "intercepted primitive type fault");
        self.state.borrow_mut().record_fault(kind, description);
    }
}

impl CollectionOps for GuardedOps {
    fn any(
        &self,
        receiver: &Value,
        predicate: &dyn Fn(&Value) -> bool,
    ) -> Result<bool, TypeFault> {
        match self.inner.any(receiver, predicate) {
            Ok(found) => Ok(found),
            Err(fault) => {
                self.note_fault(FaultKind::ExistenceCheck, &fault);
                let coerced = coerce_to_list(receiver);
                // Identity value of the existence check is false.
                Ok(self.inner.any(&coerced, predicate).unwrap_or(false))
            }
        }
    }

    fn keys(&self, receiver: &Value) -> Result<Vec<String>, TypeFault> {
        match self.inner.keys(receiver) {
            Ok(keys) => Ok(keys),
            Err(fault) => {
                self.note_fault(FaultKind::KeyEnumeration, &fault);
                match unwrap_record(receiver) {
                    Some(record) => Ok(self.inner.keys(record).unwrap_or_default()),
                    None => Ok(Vec::new()),
                }
            }
        }
    }

    fn values(&self, receiver: &Value) -> Result<Vec<Value>, TypeFault> {
        match self.inner.values(receiver) {
            Ok(values) => Ok(values),
            Err(fault) => {
                self.note_fault(FaultKind::ValueEnumeration, &fault);
                match unwrap_record(receiver) {
                    Some(record) => Ok(self.inner.values(record).unwrap_or_default()),
                    None => Ok(Vec::new()),
                }
            }
        }
    }
}

/// Rebuild the receiver as a proper list through row normalization: each
/// normalized row contributes its field mapping as one element. Null and
/// scalar receivers come back as an empty or single-element list, which the
/// strict primitive then accepts.
fn coerce_to_list(receiver: &Value) -> Value {
    let elements = to_rows(receiver)
        .into_iter()
        .map(|row| Value::Object(row.fields))
        .collect();
    Value::Array(elements)
}

/// Structural unwrapping for the record-enumeration primitives: a record
/// passes through, a list yields its first record-like element, anything
/// else has no record to offer.
fn unwrap_record(receiver: &Value) -> Option<&Value> {
    match classify(receiver) {
        Kind::Record => Some(receiver),
        Kind::List => receiver
            .as_array()
            .and_then(|items| items.iter().find(|item| item.is_object())),
        Kind::Scalar | Kind::Empty => None,
    }
}

/// First few frames of the current call stack, flattened for the trace
/// entry. Capture is forced so diagnostics do not depend on environment
/// variables; this only runs on the fault path.
fn stack_snippet() -> String {
    let backtrace = Backtrace::force_capture().to_string();
    backtrace
        .lines()
        .map(str::trim)
        .take(6)
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coercion_rebuilds_lists_from_any_shape() {
        assert_eq!(coerce_to_list(&json!(null)), json!([]));
        let from_dict = coerce_to_list(&json!({"a": 1}));
        assert_eq!(from_dict, json!([{"key": "a", "value": 1}]));
        let from_scalar = coerce_to_list(&json!(7));
        assert_eq!(from_scalar, json!([{"value": 7}]));
    }

    #[test]
    fn unwrap_record_finds_first_record_in_lists() {
        let list = json!([1, {"a": 1}, {"b": 2}]);
        assert_eq!(unwrap_record(&list), Some(&json!({"a": 1})));
        assert_eq!(unwrap_record(&json!("x")), None);
        let record = json!({"k": 1});
        assert_eq!(unwrap_record(&record), Some(&record));
    }
}

//! Collaborator interfaces the guard registers against.
//!
//! The host rendering environment is opaque to the guard: it exposes a
//! top-level error/rejection channel, a change-notification subscription, a
//! task scheduler, a render tree, and the swappable slot holding the
//! collection primitives its rendering code calls. The guard never assumes
//! anything beyond these traits.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use tabsafe_model::{Kind, NormalizedRow};

/// A fault surfaced on one of the host's top-level channels.
#[derive(Debug, Clone)]
pub struct FaultEvent {
    /// The host framework's exact error text.
    pub message: String,
    /// Short description of the offending value, when the host knows it.
    pub offending: String,
}

/// What a channel handler decided about a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The fault was recognized and swallowed; default propagation must not
    /// happen.
    Suppressed,
    /// Not ours: pass through to whatever handling existed before.
    Propagate,
}

pub type ErrorHandler = Box<dyn FnMut(&FaultEvent) -> Disposition>;
pub type Task = Box<dyn FnOnce()>;
pub type RepeatingTask = Box<dyn FnMut()>;

/// Opaque token for a registered interval timer. Dropping the host releases
/// the timer; there is no explicit cancellation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(pub u64);

/// The host's task queue. Work handed to it runs outside the current
/// dispatch, never synchronously inside an interception handler.
pub trait Scheduler {
    /// Run `task` once on the next tick.
    fn next_tick(&self, task: Task);
    /// Run `task` every `interval_ticks` ticks until the host shuts down.
    fn every(&self, interval_ticks: u64, task: RepeatingTask) -> TimerHandle;
}

/// One container node in the host's render tree.
pub trait TabularNode {
    /// Whether this node renders tabular data and is worth repairing.
    fn looks_tabular(&self) -> bool;
    /// The raw value the node was last given.
    fn raw(&self) -> &Value;
    /// Nudge the node to re-render from normalized rows.
    fn apply_rows(&mut self, rows: Vec<NormalizedRow>);
}

/// The host's render tree, walked during a repair pass.
pub trait RenderTree {
    fn for_each_tabular(&mut self, visit: &mut dyn FnMut(&mut dyn TabularNode));
}

/// Raised by a strict collection primitive when its receiver has the wrong
/// shape. Carries enough context for the diagnostic trail.
#[derive(Debug, Clone)]
pub struct TypeFault {
    /// Name of the primitive that was invoked.
    pub primitive: &'static str,
    /// The receiver's actual shape.
    pub receiver: Kind,
}

impl TypeFault {
    pub fn new(primitive: &'static str, receiver: Kind) -> Self {
        Self {
            primitive,
            receiver,
        }
    }
}

impl fmt::Display for TypeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} invoked on {:?} receiver",
            self.primitive, self.receiver
        )
    }
}

/// The collection primitives the host's rendering code calls. Strict
/// implementations fail with [`TypeFault`] on a wrong-shaped receiver; the
/// guard wraps the slot with a lenient shim.
pub trait CollectionOps {
    /// Existence check over a list's elements.
    fn any(
        &self,
        receiver: &Value,
        predicate: &dyn Fn(&Value) -> bool,
    ) -> Result<bool, TypeFault>;
    /// Enumerate a record's own keys.
    fn keys(&self, receiver: &Value) -> Result<Vec<String>, TypeFault>;
    /// Enumerate a record's own values.
    fn values(&self, receiver: &Value) -> Result<Vec<Value>, TypeFault>;
}

/// The host rendering environment, as far as the guard can see it.
pub trait HostEnvironment {
    /// Subscribe to the top-level uncaught-error channel.
    fn on_uncaught_error(&mut self, handler: ErrorHandler);
    /// Subscribe to the top-level unhandled-rejection channel.
    fn on_unhandled_rejection(&mut self, handler: ErrorHandler);
    /// Subscribe to render-tree mutation notifications.
    fn on_render_change(&mut self, callback: Box<dyn FnMut()>);
    /// The host's task queue.
    fn scheduler(&self) -> Rc<dyn Scheduler>;
    /// The host's render tree.
    fn render_tree(&self) -> Rc<RefCell<dyn RenderTree>>;
    /// Swap the collection-primitive slot, wrapping the current
    /// implementation. Called exactly once per install.
    fn replace_collection_ops(
        &mut self,
        wrap: Box<dyn FnOnce(Box<dyn CollectionOps>) -> Box<dyn CollectionOps>>,
    );
}

//! Resilience guard for the tabular pipeline.
//!
//! Prevents one fault class from unmounting the whole application: a host
//! rendering component invoking a collection primitive on a value that is
//! not a collection. The guard installs a layered net over the host
//! (top-level error channel, rejection channel, primitive shims), records a
//! bounded diagnostic trail, and schedules coalesced best-effort repair
//! passes that re-normalize tabular views.
//!
//! Explicitly lossy: a genuine application bug carrying the known fault
//! signature is suppressed identically to a cosmetic one.

pub mod guard;
pub mod host;
pub mod signature;
pub mod sim;

mod ops;

pub use guard::{MONITOR_INTERVAL_TICKS, ResilienceGuard};
pub use host::{
    CollectionOps, Disposition, ErrorHandler, FaultEvent, HostEnvironment, RenderTree,
    RepeatingTask, Scheduler, TabularNode, Task, TimerHandle, TypeFault,
};
pub use signature::{FAULT_SIGNATURES, matches_fault_signature};
pub use sim::{SimHost, StrictOps, TickQueue};

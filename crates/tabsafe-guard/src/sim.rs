//! Deterministic single-threaded host environment.
//!
//! Implements the collaborator traits over an explicit tick loop: one-shot
//! tasks run on the tick after they were queued, interval timers fire after
//! them. Used by the guard's integration tests and the CLI demo; a real
//! embedding would supply its own [`HostEnvironment`].

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::Value;
use tabsafe_model::{NormalizedRow, classify};

use crate::host::{
    CollectionOps, Disposition, ErrorHandler, FaultEvent, HostEnvironment, RenderTree,
    RepeatingTask, Scheduler, TabularNode, Task, TimerHandle, TypeFault,
};

/// Strict collection primitives: exactly the receiver shapes the real host
/// accepts, a [`TypeFault`] for everything else.
#[derive(Debug, Default)]
pub struct StrictOps;

impl CollectionOps for StrictOps {
    fn any(
        &self,
        receiver: &Value,
        predicate: &dyn Fn(&Value) -> bool,
    ) -> Result<bool, TypeFault> {
        match receiver {
            Value::Array(items) => Ok(items.iter().any(|item| predicate(item))),
            other => Err(TypeFault::new("existence check", classify(other))),
        }
    }

    fn keys(&self, receiver: &Value) -> Result<Vec<String>, TypeFault> {
        match receiver {
            Value::Object(map) => Ok(map.keys().cloned().collect()),
            other => Err(TypeFault::new("key enumeration", classify(other))),
        }
    }

    fn values(&self, receiver: &Value) -> Result<Vec<Value>, TypeFault> {
        match receiver {
            Value::Object(map) => Ok(map.values().cloned().collect()),
            other => Err(TypeFault::new("value enumeration", classify(other))),
        }
    }
}

struct Timer {
    interval: u64,
    next_due: u64,
    task: RepeatingTask,
}

/// Tick-driven task queue implementing [`Scheduler`].
#[derive(Default)]
pub struct TickQueue {
    now: Cell<u64>,
    tasks: RefCell<VecDeque<Task>>,
    timers: RefCell<Vec<Timer>>,
    next_timer_id: Cell<u64>,
}

impl Scheduler for TickQueue {
    fn next_tick(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }

    fn every(&self, interval_ticks: u64, task: RepeatingTask) -> TimerHandle {
        let id = self.next_timer_id.get();
        self.next_timer_id.set(id + 1);
        let interval = interval_ticks.max(1);
        self.timers.borrow_mut().push(Timer {
            interval,
            next_due: self.now.get() + interval,
            task,
        });
        TimerHandle(id)
    }
}

impl TickQueue {
    fn advance(&self) {
        let now = self.now.get() + 1;
        self.now.set(now);
        // Tasks queued before this tick run now; anything they enqueue
        // waits for the next tick.
        let due: Vec<Task> = self.tasks.borrow_mut().drain(..).collect();
        for task in due {
            task();
        }
        // Timers run after one-shot work. The vector is taken out so a
        // firing timer may register new timers without re-borrowing.
        let mut timers = self.timers.take();
        for timer in &mut timers {
            if now >= timer.next_due {
                (timer.task)();
                timer.next_due = now + timer.interval;
            }
        }
        let mut slot = self.timers.borrow_mut();
        timers.append(&mut *slot);
        *slot = timers;
    }
}

/// One rendered table in the simulated tree.
pub struct SimNode {
    name: String,
    raw: Value,
    rows: Vec<NormalizedRow>,
    refresh_count: usize,
}

impl TabularNode for SimNode {
    fn looks_tabular(&self) -> bool {
        true
    }

    fn raw(&self) -> &Value {
        &self.raw
    }

    fn apply_rows(&mut self, rows: Vec<NormalizedRow>) {
        self.rows = rows;
        self.refresh_count += 1;
    }
}

#[derive(Default)]
pub struct SimRenderTree {
    nodes: Vec<SimNode>,
}

impl RenderTree for SimRenderTree {
    fn for_each_tabular(&mut self, visit: &mut dyn FnMut(&mut dyn TabularNode)) {
        for node in &mut self.nodes {
            visit(node);
        }
    }
}

/// The simulated host: error/rejection channels, change notifications, a
/// tick scheduler, a render tree, and the strict primitive slot.
pub struct SimHost {
    queue: Rc<TickQueue>,
    tree: Rc<RefCell<SimRenderTree>>,
    error_handlers: Vec<ErrorHandler>,
    rejection_handlers: Vec<ErrorHandler>,
    change_callbacks: Vec<Box<dyn FnMut()>>,
    ops: Box<dyn CollectionOps>,
}

impl Default for SimHost {
    fn default() -> Self {
        Self {
            queue: Rc::new(TickQueue::default()),
            tree: Rc::new(RefCell::new(SimRenderTree::default())),
            error_handlers: Vec::new(),
            rejection_handlers: Vec::new(),
            change_callbacks: Vec::new(),
            ops: Box::new(StrictOps),
        }
    }
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a table node fed with `raw` data.
    pub fn add_table(&mut self, name: impl Into<String>, raw: Value) {
        self.tree.borrow_mut().nodes.push(SimNode {
            name: name.into(),
            raw,
            rows: Vec::new(),
            refresh_count: 0,
        });
    }

    /// Replace a table's raw data and fire the change-notification
    /// callbacks, as the real host does on a render-tree mutation.
    pub fn mutate_table(&mut self, name: &str, raw: Value) {
        {
            let mut tree = self.tree.borrow_mut();
            if let Some(node) = tree.nodes.iter_mut().find(|node| node.name == name) {
                node.raw = raw;
            }
        }
        for callback in &mut self.change_callbacks {
            callback();
        }
    }

    /// Dispatch an uncaught error to the subscribed handlers, in
    /// installation order. The first handler that suppresses wins.
    pub fn emit_uncaught_error(&mut self, message: &str, offending: &str) -> Disposition {
        let event = FaultEvent {
            message: message.to_string(),
            offending: offending.to_string(),
        };
        dispatch(&mut self.error_handlers, &event)
    }

    /// Asynchronous form of the same channel.
    pub fn emit_unhandled_rejection(&mut self, message: &str, offending: &str) -> Disposition {
        let event = FaultEvent {
            message: message.to_string(),
            offending: offending.to_string(),
        };
        dispatch(&mut self.rejection_handlers, &event)
    }

    /// Advance the event loop by `count` ticks.
    pub fn run_ticks(&self, count: u64) {
        for _ in 0..count {
            self.queue.advance();
        }
    }

    /// The primitive slot, as the host's rendering code sees it.
    pub fn ops(&self) -> &dyn CollectionOps {
        self.ops.as_ref()
    }

    pub fn table_rows(&self, name: &str) -> Option<Vec<NormalizedRow>> {
        self.tree
            .borrow()
            .nodes
            .iter()
            .find(|node| node.name == name)
            .map(|node| node.rows.clone())
    }

    pub fn table_refreshes(&self, name: &str) -> Option<usize> {
        self.tree
            .borrow()
            .nodes
            .iter()
            .find(|node| node.name == name)
            .map(|node| node.refresh_count)
    }
}

fn dispatch(handlers: &mut [ErrorHandler], event: &FaultEvent) -> Disposition {
    for handler in handlers {
        if handler(event) == Disposition::Suppressed {
            return Disposition::Suppressed;
        }
    }
    Disposition::Propagate
}

impl HostEnvironment for SimHost {
    fn on_uncaught_error(&mut self, handler: ErrorHandler) {
        self.error_handlers.push(handler);
    }

    fn on_unhandled_rejection(&mut self, handler: ErrorHandler) {
        self.rejection_handlers.push(handler);
    }

    fn on_render_change(&mut self, callback: Box<dyn FnMut()>) {
        self.change_callbacks.push(callback);
    }

    fn scheduler(&self) -> Rc<dyn Scheduler> {
        Rc::clone(&self.queue) as Rc<dyn Scheduler>
    }

    fn render_tree(&self) -> Rc<RefCell<dyn RenderTree>> {
        Rc::clone(&self.tree) as Rc<RefCell<dyn RenderTree>>
    }

    fn replace_collection_ops(
        &mut self,
        wrap: Box<dyn FnOnce(Box<dyn CollectionOps>) -> Box<dyn CollectionOps>>,
    ) {
        let inner = std::mem::replace(&mut self.ops, Box::new(StrictOps));
        self.ops = wrap(inner);
    }
}

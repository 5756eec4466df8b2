use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

/// Identifies a task handed to a [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// A deferred task.
pub type Task = Box<dyn FnOnce()>;

/// "Run this after N ms, cancellable."
///
/// This is the only source of asynchrony in the crate. Implementations wrap the platform's
/// timers (e.g. `setTimeout`) or a deterministic clock such as [`ManualScheduler`].
///
/// Contract:
/// - `schedule` must not run `task` synchronously; it runs later, on the same thread.
/// - `cancel` of an unknown, cancelled or already executed task is a no-op.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u64, task: Task) -> TaskId;

    fn cancel(&self, id: TaskId);
}

struct PendingTask {
    id: TaskId,
    due_ms: u64,
    task: Task,
}

#[derive(Default)]
struct ManualState {
    now_ms: u64,
    next_id: u64,
    pending: Vec<PendingTask>,
}

/// A virtual-clock scheduler driven by the caller.
///
/// Nothing runs until the adapter (or a test) advances the clock. Due tasks run in deadline
/// order, ties broken by scheduling order. Tasks scheduled while advancing run during the same
/// advance when they fall due before the target time.
#[derive(Default)]
pub struct ManualScheduler {
    state: RefCell<ManualState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Number of scheduled tasks that have neither run nor been cancelled.
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn advance_by(&self, delta_ms: u64) -> usize {
        let target = self.now_ms().saturating_add(delta_ms);
        self.advance_to(target)
    }

    /// Moves the clock to `now_ms`, running every task that falls due. Returns the number of
    /// tasks run. Moving backwards is ignored.
    pub fn advance_to(&self, now_ms: u64) -> usize {
        let mut ran = 0usize;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_ms <= now_ms)
                    .min_by_key(|(_, t)| (t.due_ms, t.id))
                    .map(|(i, _)| i);
                let task = due.map(|i| state.pending.remove(i));
                if let Some(task) = &task {
                    state.now_ms = state.now_ms.max(task.due_ms);
                }
                task.map(|t| t.task)
            };
            // The borrow is released here so the task may schedule or cancel.
            let Some(task) = next else {
                break;
            };
            task();
            ran += 1;
        }

        let mut state = self.state.borrow_mut();
        state.now_ms = state.now_ms.max(now_ms);
        ran
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u64, task: Task) -> TaskId {
        let mut state = self.state.borrow_mut();
        let id = TaskId(state.next_id);
        state.next_id += 1;
        let due_ms = state.now_ms.saturating_add(delay_ms);
        state.pending.push(PendingTask { id, due_ms, task });
        id
    }

    fn cancel(&self, id: TaskId) {
        self.state.borrow_mut().pending.retain(|t| t.id != id);
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualScheduler")
            .field("now_ms", &state.now_ms)
            .field("pending", &state.pending.len())
            .finish()
    }
}

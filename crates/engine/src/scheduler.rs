// Chunk: docs/chunks/scheduler - Cooperative deadline-driven task queue

//! A cooperative, single-threaded task queue.
//!
//! Tasks are closures that receive a deadline and return whether they want
//! to run again. The host drives the queue by calling
//! [`Scheduler::dispatch`] from its idle loop with a deadline of its
//! choosing; every queued task runs once per dispatch.
//!
//! The queue is re-entrant: a running task may add tasks, or remove any
//! task including itself. A task removed while running is dropped as soon
//! as it returns, whatever it returned.

use std::cell::{Cell, RefCell};
use std::num::NonZeroU64;
use std::time::{Duration, Instant};

use tracing::trace;

/// Returned by a task to say whether it has more work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskControl {
    /// Keep the task queued for the next dispatch.
    Continue,
    /// The task is done; drop it.
    Stop,
}

/// Identifies a queued task. Removing a stale handle is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(NonZeroU64);

type Task = Box<dyn FnMut(Instant) -> TaskControl>;

struct Slot {
    handle: TaskHandle,
    /// `None` while the task is running.
    task: Option<Task>,
}

pub struct Scheduler {
    slots: RefCell<Vec<Slot>>,
    next_id: Cell<u64>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler").field("tasks", &self.len()).finish()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// Queues a task to run on the next dispatch.
    pub fn add(&self, task: impl FnMut(Instant) -> TaskControl + 'static) -> TaskHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let handle = TaskHandle(NonZeroU64::new(id).unwrap_or(NonZeroU64::MIN));
        self.slots.borrow_mut().push(Slot {
            handle,
            task: Some(Box::new(task)),
        });
        trace!(target: "sheen::scheduler", handle = id, "task added");
        handle
    }

    /// Cancels a task. Returns false if the handle is not queued.
    pub fn remove(&self, handle: TaskHandle) -> bool {
        let removed = {
            let mut slots = self.slots.borrow_mut();
            let pos = slots.iter().position(|slot| slot.handle == handle);
            pos.map(|pos| slots.remove(pos))
        };
        // Dropped outside the borrow: a task's captures may call back in.
        let found = removed.is_some();
        drop(removed);
        if found {
            trace!(target: "sheen::scheduler", handle = handle.0.get(), "task removed");
        }
        found
    }

    pub fn contains(&self, handle: TaskHandle) -> bool {
        self.slots.borrow().iter().any(|slot| slot.handle == handle)
    }

    /// Number of queued tasks.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_idle(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// Runs every currently queued task once with `deadline`.
    ///
    /// Tasks added during this dispatch first run on the next one.
    /// Returns how many tasks ran.
    pub fn dispatch(&self, deadline: Instant) -> usize {
        let handles: Vec<TaskHandle> = self.slots.borrow().iter().map(|s| s.handle).collect();
        let mut ran = 0;

        for handle in handles {
            let task = {
                let mut slots = self.slots.borrow_mut();
                slots
                    .iter_mut()
                    .find(|slot| slot.handle == handle)
                    .and_then(|slot| slot.task.take())
            };
            let Some(mut task) = task else {
                continue;
            };

            let control = task(deadline);
            ran += 1;

            let finished = {
                let mut slots = self.slots.borrow_mut();
                match slots.iter().position(|slot| slot.handle == handle) {
                    // Removed while running.
                    None => Some(task),
                    Some(pos) if control == TaskControl::Stop => {
                        slots.remove(pos);
                        Some(task)
                    }
                    Some(pos) => {
                        slots[pos].task = Some(task);
                        None
                    }
                }
            };
            drop(finished);
        }

        ran
    }

    /// Dispatches with a fresh `quanta` deadline until the queue drains or
    /// `max_rounds` dispatches have run. Returns the number of rounds.
    pub fn run_until_idle(&self, quanta: Duration, max_rounds: usize) -> usize {
        let mut rounds = 0;
        while !self.is_idle() && rounds < max_rounds {
            self.dispatch(Instant::now() + quanta);
            rounds += 1;
        }
        rounds
    }
}

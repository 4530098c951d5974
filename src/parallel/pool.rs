//! Fixed-size worker pool with task ids.
//!
//! Workers are a FIFO `rayon` pool. Bookkeeping of which task ids are still queued or running
//! lives in a single mutex with a condition variable that is broadcast whenever a task
//! finishes, so callers can block on any subset of ids.
//!
//! [`ThreadPool::scope`] lets tasks borrow data from the caller's stack; the scope body runs
//! on the calling thread, which therefore acts as one more worker.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::foundation::error::{PixError, PixResult};

/// Upper bound for auto-detected worker counts.
pub const MAX_AUTO_THREADS: usize = 8;

/// Identifier of a submitted task. Ids strictly increase in submission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

#[derive(Default)]
struct TrackerState {
    next_id: u64,
    pending: BTreeSet<u64>,
    stopping: bool,
}

#[derive(Default)]
struct Tracker {
    state: Mutex<TrackerState>,
    done: Condvar,
}

impl Tracker {
    fn enqueue(&self) -> TaskId {
        let mut state = self.state.lock();
        assert!(!state.stopping, "task submitted to a stopped thread pool");
        state.next_id += 1;
        let id = state.next_id;
        state.pending.insert(id);
        TaskId(id)
    }

    fn complete(&self, id: TaskId) {
        let mut state = self.state.lock();
        state.pending.remove(&id.0);
        self.done.notify_all();
    }

    fn wait(&self, ids: &[TaskId]) {
        let mut state = self.state.lock();
        while ids.iter().any(|id| state.pending.contains(&id.0)) {
            self.done.wait(&mut state);
        }
    }

    fn drain(&self) {
        let mut state = self.state.lock();
        state.stopping = true;
        while !state.pending.is_empty() {
            self.done.wait(&mut state);
        }
    }
}

/// Number of worker threads that have not exited yet.
struct LiveWorkers {
    count: Mutex<usize>,
    gone: Condvar,
}

impl LiveWorkers {
    fn exited(&self) {
        let mut count = self.count.lock();
        *count = count.saturating_sub(1);
        self.gone.notify_all();
    }
}

/// Joins the workers when dropped. Every worker is counted up front and uncounted by rayon's
/// exit handler, so the count only reaches zero once all threads are gone.
struct Join(Arc<LiveWorkers>);

impl Drop for Join {
    fn drop(&mut self) {
        let mut count = self.0.count.lock();
        while *count > 0 {
            self.0.gone.wait(&mut count);
        }
    }
}

/// Marks a task finished when dropped, so a panicking task still releases its waiters.
struct Completion {
    tracker: Arc<Tracker>,
    id: TaskId,
}

impl Drop for Completion {
    fn drop(&mut self) {
        self.tracker.complete(self.id);
    }
}

/// Long-lived worker pool shared by every render call of one [`crate::Render`].
///
/// Dropping the pool waits for pending tasks and then joins the worker threads, so it must
/// not be dropped from inside one of its own tasks.
pub struct ThreadPool {
    workers: rayon::ThreadPool,
    // Dropped after `workers`: rayon only starts shutting down once its pool is dropped.
    join: Join,
    tracker: Arc<Tracker>,
    size: usize,
}

impl ThreadPool {
    /// Start `threads` workers; `0` picks the hardware concurrency clamped to
    /// `[1, MAX_AUTO_THREADS]`.
    pub fn new(threads: usize) -> PixResult<Self> {
        let size = if threads == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .clamp(1, MAX_AUTO_THREADS)
        } else {
            threads
        };

        let live = Arc::new(LiveWorkers {
            count: Mutex::new(size),
            gone: Condvar::new(),
        });
        let exits = Arc::clone(&live);
        let workers = rayon::ThreadPoolBuilder::new()
            .num_threads(size)
            .thread_name(|i| format!("pixrender-worker-{i}"))
            .exit_handler(move |_| exits.exited())
            .build()
            .map_err(|e| PixError::validation(format!("failed to start thread pool: {e}")))?;

        tracing::debug!(threads = size, requested = threads, "thread pool started");
        Ok(Self {
            workers,
            join: Join(live),
            tracker: Arc::new(Tracker::default()),
            size,
        })
    }

    /// Number of worker threads (the calling thread not included).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Queue an owned task and return immediately.
    pub fn add<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = self.tracker.enqueue();
        let done = Completion {
            tracker: Arc::clone(&self.tracker),
            id,
        };
        self.workers.spawn_fifo(move || {
            let _done = done;
            task();
        });
        id
    }

    /// Block until `id` is neither queued nor running.
    pub fn wait(&self, id: TaskId) {
        self.tracker.wait(&[id]);
    }

    /// Block until every id in `ids` is neither queued nor running.
    pub fn wait_all(&self, ids: &[TaskId]) {
        self.tracker.wait(ids);
    }

    /// Run `body` on the calling thread with a [`Scope`] whose tasks may borrow from the
    /// enclosing stack frame. Returns once `body` and every task it added have finished.
    pub fn scope<'env, F, R>(&self, body: F) -> R
    where
        F: FnOnce(&Scope<'_, 'env>) -> R,
    {
        self.workers.in_place_scope_fifo(|inner| {
            let scope = Scope {
                inner,
                tracker: &self.tracker,
            };
            body(&scope)
        })
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.tracker.drain();
    }
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool").field("size", &self.size).finish()
    }
}

/// Task submission handle inside [`ThreadPool::scope`].
pub struct Scope<'s, 'env> {
    inner: &'s rayon::ScopeFifo<'env>,
    tracker: &'s Arc<Tracker>,
}

impl<'env> Scope<'_, 'env> {
    /// Queue a task that may borrow anything outliving the scope.
    pub fn add<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'env,
    {
        let id = self.tracker.enqueue();
        let done = Completion {
            tracker: Arc::clone(self.tracker),
            id,
        };
        self.inner.spawn_fifo(move |_| {
            let _done = done;
            task();
        });
        id
    }

    /// Block until `id` is neither queued nor running.
    pub fn wait(&self, id: TaskId) {
        self.tracker.wait(&[id]);
    }

    /// Block until every id in `ids` is neither queued nor running.
    pub fn wait_all(&self, ids: &[TaskId]) {
        self.tracker.wait(ids);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parallel/pool.rs"]
mod tests;

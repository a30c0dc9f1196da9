// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed-size worker pool with a pending-work barrier.
//!
//! N named threads drain one FIFO of boxed tasks. One mutex guards the queue,
//! the pending counter and the shutdown flag; two condition variables hang off
//! it, one for "there is work" and one for "all work is done".
//!
//! The pending counter is the whole point. [`WorkQueue::submit`] enqueues the
//! task and bumps the counter in the same critical section, and a worker only
//! decrements it after the task has returned. A task that submits follow-up
//! work therefore raises the count before its own decrement lands, and
//! [`WorkQueue::finish`] cannot observe zero while reachable work is still in
//! flight. That is what makes recursive crawling terminate cleanly.
//!
//! Tasks return `Result<()>`. Errors and panics stop at the pool boundary: they
//! are logged, the counter still drops, and the worker goes back to the queue.

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};

use crate::config::DEFAULT_THREADS;
use crate::error::{Error, Result};

type Task = Box<dyn FnOnce() -> Result<()> + Send + 'static>;

#[derive(Default)]
struct QueueState {
    tasks: VecDeque<Task>,
    pending: usize,
    shutdown: bool,
}

#[derive(Default)]
struct Shared {
    state: Mutex<QueueState>,
    work_available: Condvar,
    work_finished: Condvar,
}

impl Shared {
    fn submit(&self, task: Task) -> Result<()> {
        let mut state = self.state.lock();
        if state.shutdown {
            return Err(Error::QueueClosed);
        }
        state.pending += 1;
        state.tasks.push_back(task);
        drop(state);
        self.work_available.notify_one();
        Ok(())
    }

    fn decrement_pending(&self) {
        let mut state = self.state.lock();
        debug_assert!(state.pending > 0, "pending underflow");
        state.pending -= 1;
        if state.pending == 0 {
            self.work_finished.notify_all();
        }
    }

    /// Block until a task is available. `None` means shut down and drained.
    fn next_task(&self) -> Option<Task> {
        let mut state = self.state.lock();
        while state.tasks.is_empty() && !state.shutdown {
            self.work_available.wait(&mut state);
        }
        state.tasks.pop_front()
    }
}

/// Worker pool draining a shared task queue.
pub struct WorkQueue {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkQueue {
    /// Start `threads` workers. Zero threads is a configuration error.
    pub fn new(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(Error::NoWorkers);
        }

        let shared = Arc::new(Shared::default());
        let mut workers = Vec::with_capacity(threads);
        for id in 0..threads {
            let worker_shared = Arc::clone(&shared);
            let spawned = thread::Builder::new()
                .name(format!("stemdex-worker-{id}"))
                .spawn(move || run_worker(&worker_shared));
            match spawned {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    // Let the threads that did start exit before reporting.
                    let queue = Self { shared, workers };
                    drop(queue);
                    return Err(Error::Spawn(e));
                }
            }
        }

        tracing::debug!(threads, "work queue started");
        Ok(Self { shared, workers })
    }

    /// Start a pool with [`DEFAULT_THREADS`] workers.
    pub fn with_default_threads() -> Result<Self> {
        Self::new(DEFAULT_THREADS)
    }

    /// Enqueue a task. Fails only after [`shutdown`](Self::shutdown).
    pub fn submit<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        self.shared.submit(Box::new(task))
    }

    /// A cloneable handle that can submit work but does not own the threads.
    ///
    /// Tasks that enqueue follow-up work carry one of these.
    pub fn spawner(&self) -> Spawner {
        Spawner {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Block until every task submitted so far has completed.
    ///
    /// Submissions that arrive while waiting extend the wait. Calling this from
    /// inside a task deadlocks, since that task is itself pending.
    pub fn finish(&self) {
        let mut state = self.shared.state.lock();
        while state.pending > 0 {
            self.shared.work_finished.wait(&mut state);
        }
    }

    /// Stop accepting work. Queued tasks still run; running tasks are never interrupted.
    pub fn shutdown(&self) {
        let mut state = self.shared.state.lock();
        if !state.shutdown {
            state.shutdown = true;
            tracing::debug!(queued = state.tasks.len(), "work queue shutting down");
        }
        drop(state);
        self.shared.work_available.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.shared.state.lock().shutdown
    }

    /// Tasks submitted but not yet completed.
    pub fn pending(&self) -> usize {
        self.shared.state.lock().pending
    }

    /// Number of worker threads.
    pub fn size(&self) -> usize {
        self.workers.len()
    }
}

impl Drop for WorkQueue {
    fn drop(&mut self) {
        self.shutdown();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                tracing::warn!("work queue worker exited abnormally");
            }
        }
    }
}

impl fmt::Debug for WorkQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("WorkQueue")
            .field("workers", &self.workers.len())
            .field("queued", &state.tasks.len())
            .field("pending", &state.pending)
            .field("shutdown", &state.shutdown)
            .finish()
    }
}

/// Submit-only handle to a [`WorkQueue`].
#[derive(Clone)]
pub struct Spawner {
    shared: Arc<Shared>,
}

impl Spawner {
    pub fn submit<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        self.shared.submit(Box::new(task))
    }
}

impl fmt::Debug for Spawner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spawner").finish_non_exhaustive()
    }
}

fn run_worker(shared: &Shared) {
    while let Some(task) = shared.next_task() {
        match panic::catch_unwind(AssertUnwindSafe(task)) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "task failed"),
            Err(payload) => {
                tracing::warn!(panic = panic_message(payload.as_ref()), "task panicked");
            }
        }
        shared.decrement_pending();
    }
    tracing::trace!("worker exiting");
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

//! Bounded task queue for subtree scans.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::trace;

use scandir_core::ScanError;

type TaskFuture<T> = Pin<Box<dyn Future<Output = Result<T, ScanError>> + Send + 'static>>;

/// Runs at most `concurrency` tasks at once, queueing the rest in FIFO order.
///
/// Tasks are spawned onto the current tokio runtime. Outputs are handed back
/// to a single consumer through [`TaskQueue::wait_idle`], which may push
/// follow-up tasks while draining. Dropping the queue aborts anything still
/// running.
pub struct TaskQueue<T> {
    permits: Option<Arc<Semaphore>>,
    pending: VecDeque<TaskFuture<T>>,
    running: JoinSet<Result<T, ScanError>>,
}

impl<T: Send + 'static> TaskQueue<T> {
    /// Create a queue. `None` means unbounded.
    pub fn new(concurrency: Option<usize>) -> Self {
        Self {
            permits: permits_for(concurrency),
            pending: VecDeque::new(),
            running: JoinSet::new(),
        }
    }

    /// Enqueue a task; it starts as soon as a slot is free.
    pub fn push<F>(&mut self, task: F)
    where
        F: Future<Output = Result<T, ScanError>> + Send + 'static,
    {
        self.pending.push_back(Box::pin(task));
        self.fill();
    }

    /// Number of tasks currently running.
    pub fn in_flight(&self) -> usize {
        self.running.len()
    }

    /// Number of tasks waiting for a slot.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is running or waiting.
    pub fn is_idle(&self) -> bool {
        self.running.is_empty() && self.pending.is_empty()
    }

    /// Wait for the next task to finish.
    ///
    /// Returns `None` once the queue is idle. A panicked or cancelled task is
    /// reported as [`ScanError::Task`].
    pub async fn join_next(&mut self) -> Option<Result<T, ScanError>> {
        self.fill();
        let joined = self.running.join_next().await?;
        Some(joined.unwrap_or_else(|e| {
            Err(ScanError::Task {
                message: e.to_string(),
            })
        }))
    }

    /// Drain the queue until idle, feeding each output to `on_output`.
    ///
    /// `on_output` may push more tasks. The first failure stops draining and
    /// is returned; tasks still in flight are aborted.
    pub async fn wait_idle<F>(&mut self, mut on_output: F) -> Result<(), ScanError>
    where
        F: FnMut(&mut Self, T),
    {
        while let Some(outcome) = self.join_next().await {
            match outcome {
                Ok(output) => on_output(self, output),
                Err(err) => {
                    self.abort_all();
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Drop queued tasks and abort running ones.
    pub fn abort_all(&mut self) {
        self.pending.clear();
        self.running.abort_all();
    }

    /// Start queued tasks while slots are available.
    fn fill(&mut self) {
        while !self.pending.is_empty() {
            let permit = match &self.permits {
                Some(permits) => match Arc::clone(permits).try_acquire_owned() {
                    Ok(permit) => Some(permit),
                    Err(_) => break,
                },
                None => None,
            };

            let Some(task) = self.pending.pop_front() else {
                break;
            };
            self.running.spawn(async move {
                let output = task.await;
                drop(permit);
                output
            });
        }

        if !self.pending.is_empty() {
            trace!(
                running = self.running.len(),
                pending = self.pending.len(),
                "Task queue saturated"
            );
        }
    }
}

/// Semaphore enforcing `concurrency`, or `None` when it is effectively unbounded.
///
/// Bounds at or above [`Semaphore::MAX_PERMITS`] cannot be represented and
/// are treated as unbounded.
pub(crate) fn permits_for(concurrency: Option<usize>) -> Option<Arc<Semaphore>> {
    concurrency
        .filter(|&n| n < Semaphore::MAX_PERMITS)
        .map(|n| Arc::new(Semaphore::new(n.max(1))))
}

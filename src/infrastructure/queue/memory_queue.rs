//! In-process job queue implementation.

use super::service::{JobQueue, QueueError, QueueResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

struct Inner {
    items: Mutex<VecDeque<String>>,
    notify: Notify,
    closed: AtomicBool,
    fail_pops: AtomicUsize,
}

/// In-memory queue backing the integration tests.
///
/// FIFO over a `VecDeque`; `pop` parks on a `Notify` until a payload arrives
/// or the queue is closed. Remaining payloads are drained before `Closed` is
/// reported. `fail_next_pops` injects transport errors to exercise the
/// consumer's backoff path.
#[derive(Clone)]
pub struct MemoryJobQueue {
    inner: Arc<Inner>,
}

impl MemoryJobQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                items: Mutex::new(VecDeque::new()),
                notify: Notify::new(),
                closed: AtomicBool::new(false),
                fail_pops: AtomicUsize::new(0),
            }),
        }
    }

    /// Marks the queue as closed and wakes blocked consumers.
    ///
    /// Already-queued payloads are still handed out; once drained, `pop`
    /// returns [`QueueError::Closed`].
    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// Makes the next `n` calls to `pop` fail with a transport error.
    pub fn fail_next_pops(&self, n: usize) {
        self.inner.fail_pops.store(n, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// Number of queued payloads. Test helper.
    pub fn len(&self) -> usize {
        self.inner.items.lock().map(|q| q.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn take_fail_token(&self) -> bool {
        self.inner
            .fail_pops
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl Default for MemoryJobQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobQueue for MemoryJobQueue {
    async fn pop(&self) -> QueueResult<String> {
        loop {
            if self.take_fail_token() {
                return Err(QueueError::Transport("simulated transport error".into()));
            }

            // Register the waiter before the checks: `notify_waiters` wakes
            // only already-registered waiters, so a close() landing between
            // the closed check and the await would otherwise be lost.
            let notified = self.inner.notify.notified();

            {
                let mut items = self
                    .inner
                    .items
                    .lock()
                    .map_err(|_| QueueError::Transport("queue lock poisoned".into()))?;

                if let Some(payload) = items.pop_front() {
                    return Ok(payload);
                }
            }

            if self.inner.closed.load(Ordering::SeqCst) {
                return Err(QueueError::Closed);
            }

            notified.await;
        }
    }

    async fn push(&self, payload: &str) -> QueueResult<()> {
        if self.inner.closed.load(Ordering::SeqCst) {
            return Err(QueueError::Closed);
        }

        {
            let mut items = self
                .inner
                .items
                .lock()
                .map_err(|_| QueueError::Transport("queue lock poisoned".into()))?;
            items.push_back(payload.to_string());
        }
        self.inner.notify.notify_one();

        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.inner.closed.load(Ordering::SeqCst)
    }
}

// Bounded Priority Queue - the synchronization core
//
// One mutex guards the heap and status; two condition variables carry the
// "not full" and "not empty" wake-ups. The queue owns no threads.

mod entry;
mod error;

pub use error::{PopError, PushError, QueueError};

use crate::domain::Priority;
use entry::Entry;
use parking_lot::{Condvar, Mutex, MutexGuard};
use serde::Serialize;
use std::collections::BinaryHeap;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Anything the queue can rank
pub trait Prioritized {
    /// Lower value is served first
    fn priority(&self) -> Priority;
}

/// Lifecycle of a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueueStatus {
    /// Accepting pushes and pops
    Open,
    /// No more pushes; pops drain what is left
    Closed,
    /// No more pushes or pops; resident items were handed back by `abort`
    Aborted,
}

impl std::fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueStatus::Open => write!(f, "OPEN"),
            QueueStatus::Closed => write!(f, "CLOSED"),
            QueueStatus::Aborted => write!(f, "ABORTED"),
        }
    }
}

/// Counters captured under the queue lock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    /// Items accepted by a push
    pub pushed: u64,
    /// Items handed out by a pop
    pub popped: u64,
    /// Largest number of resident items ever observed
    pub high_water_mark: usize,
}

struct State<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
    status: QueueStatus,
    stats: QueueStats,
}

/// Thread-safe, fixed-capacity priority queue.
///
/// * `push` waits while the queue is full.
/// * `pop` waits while the queue is empty and returns the item with the
///   lowest priority value; equal priorities leave in arrival order.
/// * `close` and `abort` release every waiter, so no thread ever has to be
///   killed to shut the queue down.
///
/// Share it between threads with an `Arc`.
pub struct BoundedPriorityQueue<T> {
    capacity: NonZeroUsize,
    state: Mutex<State<T>>,
    not_full: Condvar,
    not_empty: Condvar,
}

impl<T: Prioritized> BoundedPriorityQueue<T> {
    /// Create an open, empty queue
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            state: Mutex::new(State {
                heap: BinaryHeap::with_capacity(capacity.get()),
                next_seq: 0,
                status: QueueStatus::Open,
                stats: QueueStats::default(),
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }

    /// Create a queue from a plain integer capacity
    pub fn with_capacity(capacity: usize) -> Result<Self, QueueError> {
        NonZeroUsize::new(capacity)
            .map(Self::new)
            .ok_or(QueueError::ZeroCapacity)
    }

    /// Insert an item, waiting for a free slot.
    ///
    /// Only fails with `PushError::Closed` once the queue is closed or aborted.
    pub fn push(&self, item: T) -> Result<(), PushError<T>> {
        let mut state = self.state.lock();
        loop {
            if state.status != QueueStatus::Open {
                return Err(PushError::Closed(item));
            }
            if state.heap.len() < self.capacity.get() {
                break;
            }
            self.not_full.wait(&mut state);
        }
        self.insert(state, item);
        Ok(())
    }

    /// Like `push`, but gives up with `PushError::Timeout` after `timeout`
    pub fn push_timeout(&self, item: T, timeout: Duration) -> Result<(), PushError<T>> {
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => return self.push(item),
        };

        let mut state = self.state.lock();
        loop {
            if state.status != QueueStatus::Open {
                return Err(PushError::Closed(item));
            }
            if state.heap.len() < self.capacity.get() {
                break;
            }
            if Instant::now() >= deadline {
                return Err(PushError::Timeout(item));
            }
            self.not_full.wait_until(&mut state, deadline);
        }
        self.insert(state, item);
        Ok(())
    }

    /// Insert without waiting
    pub fn try_push(&self, item: T) -> Result<(), PushError<T>> {
        let state = self.state.lock();
        if state.status != QueueStatus::Open {
            return Err(PushError::Closed(item));
        }
        if state.heap.len() >= self.capacity.get() {
            return Err(PushError::Full(item));
        }
        self.insert(state, item);
        Ok(())
    }

    /// Remove the highest priority item, waiting while the queue is empty.
    ///
    /// After `close` the remaining items are still handed out; `PopError::Closed`
    /// is returned once nothing is left. After `abort` it is returned at once.
    pub fn pop(&self) -> Result<T, PopError> {
        let mut state = self.state.lock();
        loop {
            if let Some(entry) = state.heap.pop() {
                return Ok(self.dequeued(state, entry));
            }
            if state.status != QueueStatus::Open {
                return Err(PopError::Closed);
            }
            self.not_empty.wait(&mut state);
        }
    }

    /// Like `pop`, but gives up with `PopError::Timeout` after `timeout`
    pub fn pop_timeout(&self, timeout: Duration) -> Result<T, PopError> {
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => return self.pop(),
        };

        let mut state = self.state.lock();
        loop {
            if let Some(entry) = state.heap.pop() {
                return Ok(self.dequeued(state, entry));
            }
            if state.status != QueueStatus::Open {
                return Err(PopError::Closed);
            }
            if Instant::now() >= deadline {
                return Err(PopError::Timeout);
            }
            self.not_empty.wait_until(&mut state, deadline);
        }
    }

    /// Remove without waiting
    pub fn try_pop(&self) -> Result<T, PopError> {
        let mut state = self.state.lock();
        match state.heap.pop() {
            Some(entry) => Ok(self.dequeued(state, entry)),
            None if state.status == QueueStatus::Open => Err(PopError::Empty),
            None => Err(PopError::Closed),
        }
    }

    /// Stop accepting pushes. Consumers keep popping until the queue is empty.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.status != QueueStatus::Open {
            return;
        }
        state.status = QueueStatus::Closed;
        info!(resident = state.heap.len(), "Order queue closed, draining");
        drop(state);

        self.not_full.notify_all();
        self.not_empty.notify_all();
    }

    /// Stop immediately and hand back every resident item, highest priority first
    pub fn abort(&self) -> Vec<T> {
        let mut state = self.state.lock();
        state.status = QueueStatus::Aborted;
        let heap = std::mem::take(&mut state.heap);
        drop(state);

        self.not_full.notify_all();
        self.not_empty.notify_all();

        let abandoned: Vec<T> = heap.into_sorted_vec().into_iter().rev().map(|e| e.item).collect();
        if !abandoned.is_empty() {
            warn!(abandoned = abandoned.len(), "Order queue aborted with items still queued");
        } else {
            info!("Order queue aborted");
        }
        abandoned
    }

    fn insert(&self, mut state: MutexGuard<'_, State<T>>, item: T) {
        let priority = item.priority();
        let seq = state.next_seq;
        state.next_seq += 1;
        state.heap.push(Entry::new(item, priority, seq));

        let resident = state.heap.len();
        state.stats.pushed += 1;
        state.stats.high_water_mark = state.stats.high_water_mark.max(resident);
        debug!(priority, seq, resident, "Item queued");
        drop(state);

        self.not_empty.notify_one();
    }

    fn dequeued(&self, mut state: MutexGuard<'_, State<T>>, entry: Entry<T>) -> T {
        state.stats.popped += 1;
        debug!(priority = entry.item.priority(), resident = state.heap.len(), "Item dequeued");
        drop(state);

        self.not_full.notify_one();
        entry.item
    }
}

impl<T> BoundedPriorityQueue<T> {
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Number of resident items (a snapshot)
    pub fn len(&self) -> usize {
        self.state.lock().heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.state.lock().heap.len() >= self.capacity.get()
    }

    pub fn status(&self) -> QueueStatus {
        self.state.lock().status
    }

    /// True once `close` or `abort` has been called
    pub fn is_closed(&self) -> bool {
        self.state.lock().status != QueueStatus::Open
    }

    pub fn stats(&self) -> QueueStats {
        self.state.lock().stats
    }
}

//! Tombstoned priority queues for the two book sides.
//!
//! Each side keeps a binary heap of advisory entries `(price, timestamp, id)`.
//! Entries are never removed on cancel or fill; the authoritative order index
//! decides whether an entry is still live. Stale entries (tombstones) are
//! skipped on pop and purged wholesale by [`BookQueue::rebuild`].
//!
//! Ordering is strict price-time priority:
//! - bids: descending price, then ascending timestamp (FIFO within a level)
//! - asks: ascending price, then ascending timestamp
//!
//! A partially filled order is pushed back under its *original* key, so it
//! keeps its place in the FIFO at its price level.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{OrderId, Price, Side, Timestamp};

/// An advisory pointer into the authoritative order index.
///
/// Holds a snapshot of the order's priority key. Never trusted for quantity;
/// the index is the single source of truth for whether the order is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueEntry {
    pub price: Price,
    pub timestamp: Timestamp,
    pub id: OrderId,
    side: Side,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: "greater" means closer to the top.
        let by_price = match self.side {
            Side::Buy => self.price.cmp(&other.price),
            Side::Sell => other.price.cmp(&self.price),
        };
        by_price
            .then_with(|| other.timestamp.cmp(&self.timestamp))
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One side's priority queue.
#[derive(Clone, Debug)]
pub struct BookQueue {
    side: Side,
    heap: BinaryHeap<QueueEntry>,
}

impl BookQueue {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            heap: BinaryHeap::new(),
        }
    }

    /// Queue an entry for the given order key.
    pub fn push(&mut self, price: Price, timestamp: Timestamp, id: OrderId) {
        self.heap.push(QueueEntry {
            price,
            timestamp,
            id,
            side: self.side,
        });
    }

    /// Push a previously popped entry back, keeping its original key.
    pub fn push_back(&mut self, entry: QueueEntry) {
        debug_assert_eq!(entry.side, self.side);
        self.heap.push(entry);
    }

    /// Pop the best-priority entry. May be a tombstone; the caller checks
    /// the id against the index.
    pub fn pop(&mut self) -> Option<QueueEntry> {
        self.heap.pop()
    }

    /// Peek at the best-priority entry without removing it.
    pub fn peek(&self) -> Option<&QueueEntry> {
        self.heap.peek()
    }

    /// Rebuild the heap, dropping every entry for which `is_live` is false.
    ///
    /// This is the only place tombstones are purged; without periodic calls
    /// the queue grows by one entry per cancellation or full fill.
    pub fn rebuild(&mut self, is_live: impl Fn(OrderId) -> bool) {
        let entries = std::mem::take(&mut self.heap);
        self.heap = entries
            .into_iter()
            .filter(|entry| is_live(entry.id))
            .collect();
    }

    /// Number of queued entries, tombstones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

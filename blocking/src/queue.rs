use crate::utils::deadline_after;
use std::{
    num::NonZeroUsize,
    time::{Duration, Instant},
};

/// Bounded FIFO queue that can be accessed concurrently by any number of producers and consumers.
///
/// Items are returned in the order they were inserted.
/// No fairness is guaranteed between threads waiting on the same boundary.
///
/// Every access comes in three flavours:
///
/// | Mode         | Extraction                  | Insertion                          |
/// |--------------|-----------------------------|------------------------------------|
/// | blocking     | [`get`](Self::get)          | [`put`](Self::put)                 |
/// | non-blocking | [`remove`](Self::remove)    | [`add`](Self::add)                 |
/// | timed        | [`poll`](Self::poll)        | [`offer`](Self::offer)             |
///
/// A failed non-blocking or timed access leaves the queue exactly as it was and returns the item back to the caller.
pub trait BoundedQueue<T> {
    /// Capacity of the queue.
    ///
    /// It is constant during the whole queue lifetime.
    fn capacity(&self) -> NonZeroUsize;

    /// The number of items stored.
    ///
    /// *The value may become irrelevant at any time because of concurrent activity.*
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn is_full(&self) -> bool {
        self.len() == self.capacity().get()
    }

    /// Removes the oldest item, blocking until there is one.
    fn get(&self) -> T;

    /// Appends an item, blocking until there is a free slot.
    fn put(&self, item: T);

    /// Removes the oldest item if there is one.
    fn remove(&self) -> Option<T>;

    /// Appends an item if there is a free slot, otherwise returns it back.
    fn add(&self, item: T) -> Result<(), T>;

    /// Removes the oldest item, waiting for one no longer than until `deadline`.
    fn poll(&self, deadline: Instant) -> Option<T>;

    /// Appends an item, waiting for a free slot no longer than until `deadline`.
    ///
    /// On timeout the item is returned back.
    fn offer(&self, item: T, deadline: Instant) -> Result<(), T>;

    /// Same as [`poll`](Self::poll) with deadline `timeout` from now.
    fn poll_timeout(&self, timeout: Duration) -> Option<T> {
        match deadline_after(timeout) {
            Some(deadline) => self.poll(deadline),
            None => Some(self.get()),
        }
    }

    /// Same as [`offer`](Self::offer) with deadline `timeout` from now.
    fn offer_timeout(&self, item: T, timeout: Duration) -> Result<(), T> {
        match deadline_after(timeout) {
            Some(deadline) => self.offer(item, deadline),
            None => {
                self.put(item);
                Ok(())
            }
        }
    }
}

use crate::utils::lock;
use protbuf::{Activity, Observer, Operation};
use std::sync::Mutex;

/// Observer that records the outcome of every access.
#[derive(Default, Debug)]
pub struct ActivityLog {
    entries: Mutex<Vec<(Operation, bool)>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(operation, succeeded)` pairs in the order the accesses happened.
    pub fn entries(&self) -> Vec<(Operation, bool)> {
        lock(&self.entries).clone()
    }

    pub fn succeeded(&self, operation: Operation) -> usize {
        self.count(operation, true)
    }
    pub fn failed(&self, operation: Operation) -> usize {
        self.count(operation, false)
    }

    /// Total number of items that went into the buffer.
    pub fn inserted(&self) -> usize {
        lock(&self.entries).iter().filter(|(op, ok)| *ok && op.is_insertion()).count()
    }
    /// Total number of items that went out of the buffer.
    pub fn extracted(&self) -> usize {
        lock(&self.entries).iter().filter(|(op, ok)| *ok && !op.is_insertion()).count()
    }

    pub fn clear(&self) {
        lock(&self.entries).clear();
    }

    fn count(&self, operation: Operation, succeeded: bool) -> usize {
        lock(&self.entries).iter().filter(|&&entry| entry == (operation, succeeded)).count()
    }
}

impl<T> Observer<T> for ActivityLog {
    fn observe(&self, activity: Activity<'_, T>) {
        lock(&self.entries).push((activity.operation, activity.succeeded()));
    }
}

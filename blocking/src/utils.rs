use std::{
    sync::{LockResult, Mutex, MutexGuard},
    time::{Duration, Instant},
};

pub(crate) const POISONED: &str = "protected buffer lock poisoned by a panicking thread";

/// Locks the mutex, propagating a panic of another thread that held it.
#[inline]
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    unpoison(mutex.lock())
}

#[inline]
pub(crate) fn unpoison<G>(result: LockResult<G>) -> G {
    match result {
        Ok(guard) => guard,
        Err(_) => panic!("{}", POISONED),
    }
}

/// Yields the time remaining until the deadline, and stops once it has passed.
#[derive(Clone, Debug)]
pub struct DeadlineIterator {
    deadline: Instant,
}

impl DeadlineIterator {
    pub fn new(deadline: Instant) -> Self {
        Self { deadline }
    }
}

impl Iterator for DeadlineIterator {
    type Item = Duration;
    fn next(&mut self) -> Option<Self::Item> {
        let now = Instant::now();
        if self.deadline > now {
            Some(self.deadline - now)
        } else {
            None
        }
    }
}

/// Deadline `timeout` from now, or `None` if it is too far to be represented.
pub(crate) fn deadline_after(timeout: Duration) -> Option<Instant> {
    Instant::now().checked_add(timeout)
}

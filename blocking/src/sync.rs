use crate::utils::{lock, unpoison, DeadlineIterator};
use std::{
    fmt,
    sync::{Condvar, Mutex, MutexGuard},
    time::Instant,
};

/// Counting semaphore.
///
/// Holds a number of permits. Acquiring a permit decrements the counter, waiting while it is zero.
/// Releasing a permit increments the counter and wakes one waiting acquirer.
///
/// ```
/// use protbuf_blocking::sync::Semaphore;
///
/// let sem = Semaphore::new(1);
/// assert!(sem.try_acquire());
/// assert!(!sem.try_acquire());
/// sem.release();
/// assert_eq!(sem.available(), 1);
/// ```
#[derive(Default)]
pub struct Semaphore {
    permits: Mutex<usize>,
    condvar: Condvar,
}

impl Semaphore {
    pub fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            condvar: Condvar::new(),
        }
    }

    /// Takes a permit, blocking until one is available.
    pub fn acquire(&self) {
        let mut permits = lock(&self.permits);
        while *permits == 0 {
            permits = unpoison(self.condvar.wait(permits));
        }
        *permits -= 1;
    }

    /// Takes a permit if one is available right now.
    pub fn try_acquire(&self) -> bool {
        Self::take(&mut lock(&self.permits))
    }

    /// Takes a permit, waiting no longer than until `deadline`.
    ///
    /// If the deadline has already passed, only a single attempt is made.
    pub fn acquire_until(&self, deadline: Instant) -> bool {
        let mut permits = lock(&self.permits);
        for timeout in DeadlineIterator::new(deadline) {
            if Self::take(&mut permits) {
                return true;
            }
            permits = unpoison(self.condvar.wait_timeout(permits, timeout)).0;
        }
        Self::take(&mut permits)
    }

    /// Returns a permit.
    pub fn release(&self) {
        let mut permits = lock(&self.permits);
        *permits += 1;
        self.condvar.notify_one();
    }

    /// The number of permits that can be acquired without waiting.
    ///
    /// *The value may become irrelevant at any time because of concurrent activity.*
    pub fn available(&self) -> usize {
        *lock(&self.permits)
    }

    fn take(permits: &mut MutexGuard<'_, usize>) -> bool {
        if **permits > 0 {
            **permits -= 1;
            true
        } else {
            false
        }
    }
}

impl fmt::Debug for Semaphore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Semaphore").field("available", &self.available()).finish()
    }
}

use crate::{
    traits::BoundedQueue,
    utils::{lock, unpoison, DeadlineIterator},
};
use protbuf::{Activity, Error, Observer, Operation, RingStore};
use std::{
    num::NonZeroUsize,
    sync::{Condvar, Mutex, MutexGuard},
    time::Instant,
};

/// Protected buffer synchronized with a mutex and two condition variables.
///
/// Waiters always re-check the store after wakeup, so spurious wakeups are harmless.
/// Every successful access wakes *all* threads waiting on the opposite boundary.
pub struct CondvarQueue<T, O = ()> {
    store: Mutex<RingStore<T>>,
    /// Signalled when a slot becomes vacant.
    not_full: Condvar,
    /// Signalled when an item becomes available.
    not_empty: Condvar,
    observer: O,
}

impl<T> CondvarQueue<T> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::with_observer(capacity, ())
    }

    pub fn try_new(capacity: usize) -> Result<Self, Error> {
        NonZeroUsize::new(capacity).map(Self::new).ok_or(Error::ZeroCapacity)
    }
}

impl<T, O: Observer<T>> CondvarQueue<T, O> {
    pub fn with_observer(capacity: NonZeroUsize, observer: O) -> Self {
        tracing::trace!(capacity = capacity.get(), strategy = "condvar", "protected buffer created");
        Self {
            store: Mutex::new(RingStore::new(capacity)),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            observer,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Must be called with the store still locked.
    fn popped(&self, operation: Operation, item: &T) {
        self.not_full.notify_all();
        self.observer.observe(Activity::done(operation, item));
    }

    /// Must be called with the store still locked.
    fn pushed(&self, operation: Operation, store: &RingStore<T>) {
        self.not_empty.notify_all();
        self.observer.observe(Activity {
            operation,
            item: store.back(),
        });
    }

    fn failed(&self, operation: Operation, store: MutexGuard<'_, RingStore<T>>) {
        drop(store);
        self.observer.observe(Activity::failed(operation));
    }
}

impl<T, O: Observer<T>> BoundedQueue<T> for CondvarQueue<T, O> {
    fn capacity(&self) -> NonZeroUsize {
        lock(&self.store).capacity()
    }
    fn len(&self) -> usize {
        lock(&self.store).occupied_len()
    }

    fn get(&self) -> T {
        let mut store = lock(&self.store);
        loop {
            if let Some(item) = store.try_pop() {
                self.popped(Operation::Get, &item);
                return item;
            }
            store = unpoison(self.not_empty.wait(store));
        }
    }

    fn put(&self, mut item: T) {
        let mut store = lock(&self.store);
        loop {
            item = match store.try_push(item) {
                Ok(()) => return self.pushed(Operation::Put, &store),
                Err(item) => item,
            };
            store = unpoison(self.not_full.wait(store));
        }
    }

    fn remove(&self) -> Option<T> {
        let mut store = lock(&self.store);
        match store.try_pop() {
            Some(item) => {
                self.popped(Operation::Remove, &item);
                Some(item)
            }
            None => {
                self.failed(Operation::Remove, store);
                None
            }
        }
    }

    fn add(&self, item: T) -> Result<(), T> {
        let mut store = lock(&self.store);
        match store.try_push(item) {
            Ok(()) => {
                self.pushed(Operation::Add, &store);
                Ok(())
            }
            Err(item) => {
                self.failed(Operation::Add, store);
                Err(item)
            }
        }
    }

    fn poll(&self, deadline: Instant) -> Option<T> {
        let mut store = lock(&self.store);
        let mut timeouts = DeadlineIterator::new(deadline);
        loop {
            if let Some(item) = store.try_pop() {
                self.popped(Operation::Poll, &item);
                return Some(item);
            }
            match timeouts.next() {
                Some(timeout) => store = unpoison(self.not_empty.wait_timeout(store, timeout)).0,
                None => {
                    self.failed(Operation::Poll, store);
                    return None;
                }
            }
        }
    }

    fn offer(&self, mut item: T, deadline: Instant) -> Result<(), T> {
        let mut store = lock(&self.store);
        let mut timeouts = DeadlineIterator::new(deadline);
        loop {
            item = match store.try_push(item) {
                Ok(()) => {
                    self.pushed(Operation::Offer, &store);
                    return Ok(());
                }
                Err(item) => item,
            };
            match timeouts.next() {
                Some(timeout) => store = unpoison(self.not_full.wait_timeout(store, timeout)).0,
                None => {
                    self.failed(Operation::Offer, store);
                    return Err(item);
                }
            }
        }
    }
}

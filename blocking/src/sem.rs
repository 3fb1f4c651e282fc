use crate::{
    sync::Semaphore,
    traits::BoundedQueue,
    utils::{lock, POISONED},
};
use crossbeam_utils::CachePadded;
use protbuf::{Activity, Error, Observer, Operation, RingStore};
use std::{num::NonZeroUsize, sync::Mutex, time::Instant};

/// Protected buffer synchronized with a mutex and two counting semaphores.
///
/// `empty_slots` counts vacant slots and `full_slots` counts stored items.
/// A thread first takes a permit from one of them, then locks the store only for the bookkeeping,
/// and finally hands a permit to the other one.
/// Capacity bounds are enforced by the semaphores alone.
pub struct SemaphoreQueue<T, O = ()> {
    store: Mutex<RingStore<T>>,
    empty_slots: CachePadded<Semaphore>,
    full_slots: CachePadded<Semaphore>,
    observer: O,
}

impl<T> SemaphoreQueue<T> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::with_observer(capacity, ())
    }

    pub fn try_new(capacity: usize) -> Result<Self, Error> {
        NonZeroUsize::new(capacity).map(Self::new).ok_or(Error::ZeroCapacity)
    }
}

impl<T, O: Observer<T>> SemaphoreQueue<T, O> {
    pub fn with_observer(capacity: NonZeroUsize, observer: O) -> Self {
        tracing::trace!(
            capacity = capacity.get(),
            strategy = "semaphore",
            "protected buffer created"
        );
        Self {
            store: Mutex::new(RingStore::new(capacity)),
            empty_slots: CachePadded::new(Semaphore::new(capacity.get())),
            full_slots: CachePadded::new(Semaphore::new(0)),
            observer,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Permits currently held by the `(empty_slots, full_slots)` semaphores.
    ///
    /// Their sum equals capacity whenever no access is in progress.
    pub fn permits(&self) -> (usize, usize) {
        (self.empty_slots.available(), self.full_slots.available())
    }

    /// Stores an item. The caller must own a permit taken from `empty_slots`.
    fn insert(&self, operation: Operation, item: T) {
        let mut store = lock(&self.store);
        if store.try_push(item).is_err() {
            panic!(
                "`{}` acquired a vacant slot but the store is full: semaphores drifted from occupancy",
                operation
            );
        }
        // The item is stored, so the permit is handed over even if the observer unwinds.
        let release = Release(&self.full_slots);
        self.observer.observe(Activity {
            operation,
            item: store.back(),
        });
        drop(store);
        drop(release);
    }

    /// Takes the oldest item. The caller must own a permit taken from `full_slots`.
    fn extract(&self, operation: Operation) -> T {
        let mut store = lock(&self.store);
        let item = match store.try_pop() {
            Some(item) => item,
            None => panic!(
                "`{}` acquired an occupied slot but the store is empty: semaphores drifted from occupancy",
                operation
            ),
        };
        let release = Release(&self.empty_slots);
        self.observer.observe(Activity::done(operation, &item));
        drop(store);
        drop(release);
        item
    }

    /// Reports a failed access. Panics if another thread panicked inside the store.
    fn failed(&self, operation: Operation) {
        if self.store.is_poisoned() {
            panic!("{}", POISONED);
        }
        self.observer.observe(Activity::failed(operation));
    }
}

/// Releases a semaphore permit on drop.
struct Release<'a>(&'a Semaphore);

impl Drop for Release<'_> {
    fn drop(&mut self) {
        self.0.release();
    }
}

impl<T, O: Observer<T>> BoundedQueue<T> for SemaphoreQueue<T, O> {
    fn capacity(&self) -> NonZeroUsize {
        lock(&self.store).capacity()
    }
    fn len(&self) -> usize {
        lock(&self.store).occupied_len()
    }

    fn get(&self) -> T {
        self.full_slots.acquire();
        self.extract(Operation::Get)
    }

    fn put(&self, item: T) {
        self.empty_slots.acquire();
        self.insert(Operation::Put, item)
    }

    fn remove(&self) -> Option<T> {
        if self.full_slots.try_acquire() {
            Some(self.extract(Operation::Remove))
        } else {
            self.failed(Operation::Remove);
            None
        }
    }

    fn add(&self, item: T) -> Result<(), T> {
        if self.empty_slots.try_acquire() {
            self.insert(Operation::Add, item);
            Ok(())
        } else {
            self.failed(Operation::Add);
            Err(item)
        }
    }

    fn poll(&self, deadline: Instant) -> Option<T> {
        if self.full_slots.acquire_until(deadline) {
            Some(self.extract(Operation::Poll))
        } else {
            self.failed(Operation::Poll);
            None
        }
    }

    fn offer(&self, item: T, deadline: Instant) -> Result<(), T> {
        if self.empty_slots.acquire_until(deadline) {
            self.insert(Operation::Offer, item);
            Ok(())
        } else {
            self.failed(Operation::Offer);
            Err(item)
        }
    }
}

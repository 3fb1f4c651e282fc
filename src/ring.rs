use crate::{utils::wrap_index, Error};
use alloc::{boxed::Box, vec::Vec};
use core::{fmt, num::NonZeroUsize};

/// Fixed-capacity circular FIFO storage.
///
/// Not synchronized: every method that changes the contents takes `&mut self`,
/// so concurrent access has to be serialized by the owner (usually with a mutex).
///
/// Items are owned by the store between a successful [`try_push`](Self::try_push) and the
/// [`try_pop`](Self::try_pop) that hands them back. Items remaining on drop are dropped with the store.
///
/// ```
/// use protbuf::RingStore;
///
/// let mut rs = RingStore::try_new(2).unwrap();
/// assert_eq!(rs.try_push(1), Ok(()));
/// assert_eq!(rs.try_push(2), Ok(()));
/// assert_eq!(rs.try_push(3), Err(3));
/// assert_eq!(rs.try_pop(), Some(1));
/// assert_eq!(rs.try_push(3), Ok(()));
/// assert_eq!(rs.try_pop(), Some(2));
/// assert_eq!(rs.try_pop(), Some(3));
/// assert_eq!(rs.try_pop(), None);
/// ```
pub struct RingStore<T> {
    slots: Box<[Option<T>]>,
    capacity: NonZeroUsize,
    head: usize,
    count: usize,
}

impl<T> RingStore<T> {
    /// Creates an empty store holding at most `capacity` items.
    pub fn new(capacity: NonZeroUsize) -> Self {
        let slots = (0..capacity.get()).map(|_| None).collect::<Vec<_>>().into_boxed_slice();
        Self {
            slots,
            capacity,
            head: 0,
            count: 0,
        }
    }

    /// Creates an empty store, rejecting zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, Error> {
        NonZeroUsize::new(capacity).map(Self::new).ok_or(Error::ZeroCapacity)
    }

    /// Capacity of the store.
    ///
    /// It is constant during the whole store lifetime.
    #[inline]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// The number of items stored.
    #[inline]
    pub fn occupied_len(&self) -> usize {
        self.count
    }

    /// The number of remaining free slots.
    #[inline]
    pub fn vacant_len(&self) -> usize {
        self.capacity.get() - self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.capacity.get()
    }

    /// Appends an item after the newest one.
    ///
    /// On failure the store is full, nothing is changed and the item is returned back.
    pub fn try_push(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        let index = wrap_index(self.head, self.count, self.capacity);
        let slot = &mut self.slots[index];
        debug_assert!(slot.is_none(), "slot {} past the occupied range is not vacant", index);
        *slot = Some(item);
        self.count += 1;
        Ok(())
    }

    /// Removes the oldest item.
    ///
    /// Returns `None` and changes nothing if the store is empty.
    pub fn try_pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.slots[self.head].take();
        debug_assert!(item.is_some(), "occupied slot {} is vacant", self.head);
        self.head = wrap_index(self.head, 1, self.capacity);
        self.count -= 1;
        item
    }

    /// The oldest item, the one [`try_pop`](Self::try_pop) returns next.
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    /// The most recently pushed item.
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[wrap_index(self.head, self.count - 1, self.capacity)].as_ref()
    }

    /// Iterates over stored items from the oldest to the newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.count).filter_map(move |i| self.slots[wrap_index(self.head, i, self.capacity)].as_ref())
    }
}

impl<T: fmt::Debug> fmt::Debug for RingStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

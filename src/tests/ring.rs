use crate::{Error, RingStore};
use alloc::{rc::Rc, vec::Vec};
use core::{cell::Cell, num::NonZeroUsize};

fn occupancy<T>(rs: &RingStore<T>) -> (usize, usize) {
    (rs.occupied_len(), rs.vacant_len())
}

#[test]
fn capacity() {
    const CAP: usize = 13;
    let rs = RingStore::<i32>::try_new(CAP).unwrap();
    assert_eq!(rs.capacity().get(), CAP);
    assert_eq!(occupancy(&rs), (0, CAP));
}

#[test]
fn zero_capacity() {
    assert_eq!(RingStore::<i32>::try_new(0).unwrap_err(), Error::ZeroCapacity);
}

#[test]
fn try_push() {
    let mut rs = RingStore::new(NonZeroUsize::new(2).unwrap());

    assert_eq!(rs.try_push(123), Ok(()));
    assert_eq!(occupancy(&rs), (1, 1));

    assert_eq!(rs.try_push(234), Ok(()));
    assert_eq!(occupancy(&rs), (2, 0));

    assert_eq!(rs.try_push(345), Err(345));
    assert_eq!(occupancy(&rs), (2, 0));
}

#[test]
fn pop_empty() {
    let mut rs = RingStore::<i32>::try_new(2).unwrap();

    assert_eq!(rs.try_pop(), None);
    assert_eq!(occupancy(&rs), (0, 2));
    assert_eq!(rs.front(), None);
    assert_eq!(rs.back(), None);
}

#[test]
fn push_pop_one() {
    let mut rs = RingStore::try_new(2).unwrap();

    for v in [12, 34, 56, 78, 90] {
        assert_eq!(rs.try_push(v), Ok(()));
        assert_eq!(occupancy(&rs), (1, 1));

        assert_eq!(rs.try_pop(), Some(v));
        assert_eq!(occupancy(&rs), (0, 2));

        assert_eq!(rs.try_pop(), None);
    }
}

#[test]
fn push_pop_all() {
    let mut rs = RingStore::try_new(2).unwrap();

    for v in [(12, 34, 13), (56, 78, 57), (90, 10, 91)] {
        assert_eq!(rs.try_push(v.0), Ok(()));
        assert_eq!(rs.try_push(v.1), Ok(()));
        assert_eq!(rs.try_push(v.2), Err(v.2));
        assert!(rs.is_full());

        assert_eq!(rs.try_pop(), Some(v.0));
        assert_eq!(rs.try_pop(), Some(v.1));
        assert_eq!(rs.try_pop(), None);
        assert!(rs.is_empty());
    }
}

#[test]
fn wrap_around() {
    let mut rs = RingStore::try_new(3).unwrap();

    assert_eq!(rs.try_push(1), Ok(()));
    assert_eq!(rs.try_push(2), Ok(()));
    assert_eq!(rs.try_pop(), Some(1));
    assert_eq!(rs.try_push(3), Ok(()));
    assert_eq!(rs.try_push(4), Ok(()));
    assert_eq!(rs.try_push(5), Err(5));

    assert_eq!(rs.iter().copied().collect::<Vec<_>>(), [2, 3, 4]);
    assert_eq!(rs.front(), Some(&2));
    assert_eq!(rs.back(), Some(&4));
    assert_eq!(alloc::format!("{:?}", rs), "[2, 3, 4]");

    assert_eq!(rs.try_pop(), Some(2));
    assert_eq!(rs.try_pop(), Some(3));
    assert_eq!(rs.try_pop(), Some(4));
    assert_eq!(rs.try_pop(), None);
}

#[test]
fn fifo_order() {
    const CAP: usize = 5;
    let mut rs = RingStore::try_new(CAP).unwrap();
    let mut popped = Vec::new();
    let mut next = 0;

    // Interleave bursts of different sizes so the head walks around the storage several times.
    for burst in [1, 3, 5, 2, 4, 5, 1] {
        for _ in 0..burst {
            if rs.try_push(next).is_ok() {
                next += 1;
            }
        }
        assert!(rs.occupied_len() <= CAP);
        for _ in 0..(burst + 1) / 2 {
            popped.extend(rs.try_pop());
        }
    }
    popped.extend(core::iter::from_fn(|| rs.try_pop()));

    assert_eq!(popped, (0..next).collect::<Vec<_>>());
}

#[test]
fn drop_remaining() {
    struct Dropper<'a>(&'a Cell<usize>);
    impl Drop for Dropper<'_> {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    let dropped = Cell::new(0);
    {
        let mut rs = RingStore::try_new(3).unwrap();
        assert!(rs.try_push(Dropper(&dropped)).is_ok());
        assert!(rs.try_push(Dropper(&dropped)).is_ok());
        assert!(rs.try_push(Dropper(&dropped)).is_ok());
        drop(rs.try_pop());
        assert_eq!(dropped.get(), 1);
    }
    assert_eq!(dropped.get(), 3);
}

#[test]
fn rejected_item_returned() {
    let item = Rc::new(7);
    let mut rs = RingStore::try_new(1).unwrap();
    assert!(rs.try_push(item.clone()).is_ok());

    let back = rs.try_push(item.clone()).unwrap_err();
    assert!(Rc::ptr_eq(&back, &item));
    assert_eq!(Rc::strong_count(&item), 3);
}

use crate::{sync::Semaphore, traits::*, SemaphoreQueue};
use crossbeam_utils::thread::scope;
use std::{
    sync::atomic::{AtomicUsize, Ordering},
    thread,
    time::{Duration, Instant},
};

#[test]
fn try_acquire() {
    let sem = Semaphore::new(2);
    assert!(sem.try_acquire());
    assert!(sem.try_acquire());
    assert!(!sem.try_acquire());
    assert_eq!(sem.available(), 0);

    sem.release();
    assert_eq!(sem.available(), 1);
    assert!(sem.try_acquire());
}

#[test]
fn acquire_past_deadline() {
    let sem = Semaphore::new(1);
    let past = Instant::now();
    assert!(sem.acquire_until(past));
    assert!(!sem.acquire_until(past));
    assert_eq!(sem.available(), 0);
}

#[test]
#[cfg_attr(miri, ignore)]
fn acquire_times_out() {
    let sem = Semaphore::default();
    let timeout = Duration::from_millis(20);
    let start = Instant::now();
    assert!(!sem.acquire_until(start + timeout));
    assert!(start.elapsed() >= timeout);
    assert_eq!(sem.available(), 0);
}

#[test]
#[cfg_attr(miri, ignore)]
fn release_wakes_acquirers() {
    const WAITERS: usize = 4;
    let sem = Semaphore::new(0);
    let acquired = AtomicUsize::new(0);
    scope(|s| {
        for _ in 0..WAITERS {
            s.spawn(|_| {
                sem.acquire();
                acquired.fetch_add(1, Ordering::SeqCst);
            });
        }
        thread::sleep(Duration::from_millis(20));
        assert_eq!(acquired.load(Ordering::SeqCst), 0);
        for _ in 0..WAITERS {
            sem.release();
        }
    })
    .unwrap();
    assert_eq!(acquired.load(Ordering::SeqCst), WAITERS);
    assert_eq!(sem.available(), 0);
}

#[test]
fn permits_follow_occupancy() {
    const CAP: usize = 3;
    let queue = SemaphoreQueue::try_new(CAP).unwrap();
    assert_eq!(queue.permits(), (CAP, 0));

    queue.put(1);
    assert_eq!(queue.add(2), Ok(()));
    assert_eq!(queue.permits(), (1, 2));

    assert_eq!(queue.offer(3, Instant::now()), Ok(()));
    assert_eq!(queue.offer(4, Instant::now()), Err(4));
    assert_eq!(queue.add(4), Err(4));
    assert_eq!(queue.permits(), (0, CAP));

    assert_eq!(queue.get(), 1);
    assert_eq!(queue.remove(), Some(2));
    assert_eq!(queue.poll(Instant::now()), Some(3));
    assert_eq!(queue.remove(), None);
    assert_eq!(queue.poll(Instant::now()), None);
    assert_eq!(queue.permits(), (CAP, 0));

    let (empty, full) = queue.permits();
    assert_eq!(empty + full, queue.capacity().get());
    assert_eq!(full, queue.len());
}

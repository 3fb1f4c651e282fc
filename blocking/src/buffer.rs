use crate::{
    config::{Config, Strategy},
    cond::CondvarQueue,
    sem::SemaphoreQueue,
    traits::BoundedQueue,
};
use protbuf::{Error, Observer};
use std::{num::NonZeroUsize, time::Instant};

/// Protected buffer with the synchronization strategy chosen at construction.
///
/// ```
/// use protbuf_blocking::{traits::*, ProtectedBuffer, Strategy};
///
/// let buf = ProtectedBuffer::new(Strategy::Semaphore, 2).unwrap();
/// buf.put(1);
/// buf.put(2);
/// assert_eq!(buf.add(3), Err(3));
/// assert_eq!(buf.get(), 1);
/// assert_eq!(buf.add(3), Ok(()));
/// assert_eq!(buf.get(), 2);
/// assert_eq!(buf.get(), 3);
/// ```
pub enum ProtectedBuffer<T, O = ()> {
    Condvar(CondvarQueue<T, O>),
    Semaphore(SemaphoreQueue<T, O>),
}

macro_rules! dispatch {
    ($self:expr, $queue:ident => $call:expr) => {
        match $self {
            ProtectedBuffer::Condvar($queue) => $call,
            ProtectedBuffer::Semaphore($queue) => $call,
        }
    };
}

impl<T> ProtectedBuffer<T> {
    pub fn new(strategy: Strategy, capacity: usize) -> Result<Self, Error> {
        Self::with_observer(strategy, capacity, ())
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::from_config_with_observer(config, ())
    }
}

impl<T, O: Observer<T>> ProtectedBuffer<T, O> {
    pub fn with_observer(strategy: Strategy, capacity: usize, observer: O) -> Result<Self, Error> {
        Self::from_config_with_observer(&Config::new(strategy, capacity), observer)
    }

    pub fn from_config_with_observer(config: &Config, observer: O) -> Result<Self, Error> {
        let capacity = config.validate()?;
        Ok(match config.strategy {
            Strategy::Condvar => Self::Condvar(CondvarQueue::with_observer(capacity, observer)),
            Strategy::Semaphore => Self::Semaphore(SemaphoreQueue::with_observer(capacity, observer)),
        })
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Condvar(_) => Strategy::Condvar,
            Self::Semaphore(_) => Strategy::Semaphore,
        }
    }

    pub fn observer(&self) -> &O {
        dispatch!(self, q => q.observer())
    }
}

impl<T, O: Observer<T>> BoundedQueue<T> for ProtectedBuffer<T, O> {
    fn capacity(&self) -> NonZeroUsize {
        dispatch!(self, q => q.capacity())
    }
    fn len(&self) -> usize {
        dispatch!(self, q => q.len())
    }

    fn get(&self) -> T {
        dispatch!(self, q => q.get())
    }
    fn put(&self, item: T) {
        dispatch!(self, q => q.put(item))
    }
    fn remove(&self) -> Option<T> {
        dispatch!(self, q => q.remove())
    }
    fn add(&self, item: T) -> Result<(), T> {
        dispatch!(self, q => q.add(item))
    }
    fn poll(&self, deadline: Instant) -> Option<T> {
        dispatch!(self, q => q.poll(deadline))
    }
    fn offer(&self, item: T, deadline: Instant) -> Result<(), T> {
        dispatch!(self, q => q.offer(item, deadline))
    }
}

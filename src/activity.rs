//! Optional side channel reporting the outcome of each buffer access.

use core::fmt;

/// Buffer access mode.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Operation {
    /// Blocking extraction.
    Get,
    /// Blocking insertion.
    Put,
    /// Non-blocking extraction.
    Remove,
    /// Non-blocking insertion.
    Add,
    /// Extraction bounded by a deadline.
    Poll,
    /// Insertion bounded by a deadline.
    Offer,
}

impl Operation {
    pub const ALL: [Operation; 6] = [Self::Get, Self::Put, Self::Remove, Self::Add, Self::Poll, Self::Offer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Remove => "remove",
            Self::Add => "add",
            Self::Poll => "poll",
            Self::Offer => "offer",
        }
    }

    /// Whether the operation moves an item into the buffer.
    pub fn is_insertion(&self) -> bool {
        matches!(self, Self::Put | Self::Add | Self::Offer)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single buffer access.
#[derive(Debug)]
pub struct Activity<'a, T> {
    pub operation: Operation,
    /// Item that was moved in or out of the buffer, `None` if the access failed.
    pub item: Option<&'a T>,
}

impl<'a, T> Clone for Activity<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for Activity<'a, T> {}

impl<'a, T> Activity<'a, T> {
    pub fn done(operation: Operation, item: &'a T) -> Self {
        Self { operation, item: Some(item) }
    }
    pub fn failed(operation: Operation) -> Self {
        Self { operation, item: None }
    }

    #[inline]
    pub fn succeeded(&self) -> bool {
        self.item.is_some()
    }
}

/// Receiver of buffer activity.
///
/// Successful accesses are reported while the buffer still holds its internal lock,
/// so the order of reported activity matches the order of items in the buffer.
/// Implementations must not access the observed buffer and should return quickly.
/// A panicking observer poisons the buffer.
pub trait Observer<T>: Send + Sync {
    fn observe(&self, activity: Activity<'_, T>);
}

/// Discards all activity.
impl<T> Observer<T> for () {
    #[inline]
    fn observe(&self, _: Activity<'_, T>) {}
}

impl<T, O: Observer<T> + ?Sized> Observer<T> for &O {
    fn observe(&self, activity: Activity<'_, T>) {
        (**self).observe(activity)
    }
}

#[cfg(feature = "std")]
impl<T, O: Observer<T> + ?Sized> Observer<T> for std::sync::Arc<O> {
    fn observe(&self, activity: Activity<'_, T>) {
        (**self).observe(activity)
    }
}

/// Emits a `tracing` event for every access.
///
/// Successful accesses are logged at `DEBUG` level with the item, failed ones at `TRACE`.
#[derive(Clone, Copy, Default, Debug)]
pub struct TracingObserver;

impl<T: fmt::Debug> Observer<T> for TracingObserver {
    fn observe(&self, activity: Activity<'_, T>) {
        match activity.item {
            Some(item) => tracing::debug!(operation = %activity.operation, ?item, "buffer access"),
            None => tracing::trace!(operation = %activity.operation, "buffer access failed"),
        }
    }
}

use core::num::NonZeroUsize;

/// Index of the slot that lies `offset` slots after `head`, wrapping at `capacity`.
///
/// `head` must be less than `capacity` and `offset` must not exceed it, so the sum wraps at most once.
#[inline]
pub fn wrap_index(head: usize, offset: usize, capacity: NonZeroUsize) -> usize {
    debug_assert!(head < capacity.get() && offset <= capacity.get());
    let index = head + offset;
    if index >= capacity.get() {
        index - capacity.get()
    } else {
        index
    }
}

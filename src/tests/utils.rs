use crate::utils::wrap_index;
use core::num::NonZeroUsize;

#[test]
fn wrap_index_bounds() {
    let cap = NonZeroUsize::new(4).unwrap();
    assert_eq!(wrap_index(0, 0, cap), 0);
    assert_eq!(wrap_index(1, 2, cap), 3);
    assert_eq!(wrap_index(3, 1, cap), 0);
    assert_eq!(wrap_index(3, 3, cap), 2);
    // `offset` may reach capacity: a full store ends where it starts.
    assert_eq!(wrap_index(0, 4, cap), 0);
    assert_eq!(wrap_index(2, 4, cap), 2);
    assert_eq!(wrap_index(3, 4, cap), 3);
}

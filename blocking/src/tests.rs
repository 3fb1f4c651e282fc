use crate::{ProtectedBuffer, Strategy};

mod sync;

/// Runs the test body against a fresh buffer of every strategy.
fn for_each_strategy<T>(capacity: usize, f: impl Fn(ProtectedBuffer<T>)) {
    for strategy in Strategy::ALL {
        let buf = ProtectedBuffer::new(strategy, capacity).unwrap();
        assert_eq!(buf.strategy(), strategy);
        f(buf);
    }
}

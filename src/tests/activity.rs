use crate::{Activity, Observer, Operation, TracingObserver};
use alloc::string::ToString;
use tracing_test::traced_test;

#[test]
fn operation_names() {
    let names = Operation::ALL.map(|op| op.to_string());
    assert_eq!(names, ["get", "put", "remove", "add", "poll", "offer"]);

    let insertions = Operation::ALL.iter().filter(|op| op.is_insertion()).count();
    assert_eq!(insertions, 3);
}

#[test]
fn activity_outcome() {
    let item = 5;
    assert!(Activity::done(Operation::Put, &item).succeeded());
    assert!(!Activity::<i32>::failed(Operation::Remove).succeeded());
}

#[test]
#[traced_test]
fn tracing_observer() {
    let observer = TracingObserver;
    observer.observe(Activity::done(Operation::Offer, &1042));
    observer.observe(Activity::<i32>::failed(Operation::Poll));

    assert!(logs_contain("operation=offer"));
    assert!(logs_contain("item=1042"));
    assert!(logs_contain("buffer access failed"));
}

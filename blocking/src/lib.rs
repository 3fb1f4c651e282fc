//! Bounded FIFO buffers shared between producer and consumer threads.
//!
//! Two interchangeable synchronization strategies are provided over [`protbuf::RingStore`]:
//!
//! + [`CondvarQueue`] waits on a pair of condition variables,
//! + [`SemaphoreQueue`] counts free and occupied slots with a pair of semaphores.
//!
//! Both implement [`BoundedQueue`](traits::BoundedQueue) and can be selected at runtime with [`ProtectedBuffer`].

pub mod buffer;
pub mod cond;
pub mod config;
pub mod log;
pub mod sem;
pub mod sync;
mod utils;

pub mod traits {
    pub use crate::queue::BoundedQueue;
}
mod queue;

pub use buffer::ProtectedBuffer;
pub use cond::CondvarQueue;
pub use config::{Config, Strategy};
pub use log::ActivityLog;
pub use protbuf::{Activity, Error, Observer, Operation, TracingObserver};
pub use sem::SemaphoreQueue;

#[cfg(test)]
mod tests;

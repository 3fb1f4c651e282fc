#![cfg_attr(not(test), no_std)]

extern crate alloc;
#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod activity;
pub mod error;
pub mod ring;
mod utils;

pub use activity::{Activity, Observer, Operation, TracingObserver};
pub use error::Error;
pub use ring::RingStore;

#[cfg(test)]
mod tests;

use alloc::string::String;
use thiserror::Error;

/// Configuration error reported when a buffer is constructed.
///
/// Full and empty conditions are never errors: they are reported by return values of the access operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cannot create buffer: capacity must be positive.
    #[error("buffer capacity must be greater than zero")]
    ZeroCapacity,
    /// Cannot select strategy: name is not recognized.
    #[error("unknown synchronization strategy `{0}`, expected `condvar` or `semaphore`")]
    UnknownStrategy(String),
}

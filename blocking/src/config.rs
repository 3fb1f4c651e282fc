use protbuf::Error;
use std::{fmt, num::NonZeroUsize, str::FromStr};

/// Synchronization strategy of a [`ProtectedBuffer`](crate::ProtectedBuffer).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Strategy {
    /// Mutex and two condition variables, see [`CondvarQueue`](crate::CondvarQueue).
    #[default]
    Condvar,
    /// Mutex and two counting semaphores, see [`SemaphoreQueue`](crate::SemaphoreQueue).
    Semaphore,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Self::Condvar, Self::Semaphore];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Condvar => "condvar",
            Self::Semaphore => "semaphore",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the strategy names, their short forms, and the numeric codes `0` and `1`.
impl FromStr for Strategy {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "condvar" | "cond" | "0" => Ok(Self::Condvar),
            "semaphore" | "sem" | "1" => Ok(Self::Semaphore),
            _ => Err(Error::UnknownStrategy(s.to_string())),
        }
    }
}

/// Construction parameters of a [`ProtectedBuffer`](crate::ProtectedBuffer).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Config {
    pub strategy: Strategy,
    pub capacity: usize,
}

impl Config {
    pub const DEFAULT_CAPACITY: usize = 16;

    pub fn new(strategy: Strategy, capacity: usize) -> Self {
        Self { strategy, capacity }
    }

    /// Checks the configuration and returns the capacity to use.
    pub fn validate(&self) -> Result<NonZeroUsize, Error> {
        NonZeroUsize::new(self.capacity).ok_or(Error::ZeroCapacity)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Strategy::default(), Self::DEFAULT_CAPACITY)
    }
}

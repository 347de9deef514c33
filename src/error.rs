//! The error type shared by the fallible operations of this crate.
//!
//! Most containers here follow the `std` collections and return [`Option`] when
//! they are empty. The indexed priority queue is different: every one of its
//! operations has preconditions on the external index, and violating them is
//! reported as an [`Error`] without touching the queue.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// A structure was asked to be built with a negative or otherwise
    /// unrepresentable size.
    #[error("invalid capacity: must be a non-negative integer that fits in usize")]
    InvalidCapacity,

    #[error("index {index} is out of range for capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },

    #[error("index {0} is already in the priority queue")]
    DuplicateIndex(usize),

    #[error("index {0} is not in the priority queue")]
    NotFound(usize),

    #[error("priority queue underflow")]
    Underflow,

    /// `increase_key` got a key that is not strictly more extremal than the current
    /// one, `decrease_key` got one that is not strictly less extremal, or a key
    /// that isn't comparable with itself (such as `NaN`) was offered.
    #[error("the new key for index {index} does not move in the required direction")]
    InvalidKeyUpdate { index: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

//! Basic containers: a LIFO [`Stack`] and a FIFO [`Queue`].

mod queue;
mod stack;

pub use queue::*;
pub use stack::*;

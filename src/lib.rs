//! Textbook algorithms and data structures, centered on an indexed priority queue.
//!
//! The main type is [`pq::IndexPQ`]: a binary heap over a fixed set of indices
//! `0..capacity`, where every index carries a mutable key. It is what makes the
//! eager version of Prim's algorithm ([`graph::PrimMst`]) and Dijkstra's algorithm
//! ([`graph::DijkstraSp`]) possible.
//!
//! Around it live the smaller structures those algorithms need:
//! containers ([`collections`]), disjoint sets ([`union_find`]), symbol tables
//! ([`symbol_table`]), sorting ([`sort`]), graphs ([`graph`]) and a percolation
//! simulation ([`percolation`]).
//!
//! Operations that can fail on caller input return [`Result`] with this crate's
//! [`Error`]. Violating a documented precondition, such as naming a vertex that
//! isn't in the graph, panics.

mod error;
pub use error::{Error, Result};

pub mod collections;
pub mod graph;
pub mod percolation;
pub mod pq;
pub mod sort;
pub mod symbol_table;
pub mod union_find;

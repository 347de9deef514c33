//! Priority queues.
//!
//! Every queue in this module is generic over an [`Orientation`], which decides
//! whether the largest or the smallest key sits at the top.
//!
//! * [`IndexPQ`]: fixed capacity, elements addressed by external index, keys mutable.
//! * [`BinaryHeapPQ`]: unbounded, elements are the keys themselves.
//! * [`MedianFinder`]: two heaps keeping track of a running median.

mod binary_heap;
mod index_pq;
mod median;

pub use binary_heap::*;
pub use index_pq::*;
pub use median::*;

/// Decides which of two keys belongs closer to the root of a heap.
pub trait Orientation {
    /// Returns `true` if `a` is strictly more extremal than `b`,
    /// i.e. `a` should sit above `b` in the heap.
    ///
    /// Incomparable keys (such as `NaN`) are never above each other.
    fn above<K: PartialOrd + ?Sized>(a: &K, b: &K) -> bool;
}

/// The largest key is at the top.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Max;

/// The smallest key is at the top.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Min;

impl Orientation for Max {
    fn above<K: PartialOrd + ?Sized>(a: &K, b: &K) -> bool {
        a > b
    }
}

impl Orientation for Min {
    fn above<K: PartialOrd + ?Sized>(a: &K, b: &K) -> bool {
        a < b
    }
}

pub type IndexMaxPQ<K> = IndexPQ<K, Max>;
pub type IndexMinPQ<K> = IndexPQ<K, Min>;
pub type MaxPQ<K> = BinaryHeapPQ<K, Max>;
pub type MinPQ<K> = BinaryHeapPQ<K, Min>;

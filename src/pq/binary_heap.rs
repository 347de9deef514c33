//! An unbounded priority queue backed by a growable binary heap.

use std::marker::PhantomData;

use log::trace;

use super::{Max, Orientation};

/// A priority queue of keys, with no capacity limit.
///
/// Unlike [`super::IndexPQ`], keys can't be addressed once inserted: the only
/// element that can be read or removed is the top one.
///
///```
/// use hedgerow::pq::MinPQ;
///
/// let mut pq: MinPQ<i32> = [5, 1, 4].into_iter().collect();
/// pq.insert(2);
/// assert_eq!(pq.pop(), Some(1));
/// assert_eq!(pq.into_sorted_vec(), vec![2, 4, 5]);
///```
#[derive(Clone, Debug)]
pub struct BinaryHeapPQ<K, O = Max> {
    /// 0-based heap: the children of `i` are `2i + 1` and `2i + 2`.
    data: Vec<K>,
    phantom: PhantomData<O>,
}

impl<K, O> BinaryHeapPQ<K, O> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty queue with room for `capacity` keys before reallocating.
    /// This is only a hint, the queue grows as needed.
    pub fn with_capacity(capacity: usize) -> Self {
        BinaryHeapPQ {
            data: Vec::with_capacity(capacity),
            phantom: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The top key, if any.
    /// O(1)
    pub fn peek(&self) -> Option<&K> {
        self.data.first()
    }
}

impl<K, O> Default for BinaryHeapPQ<K, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialOrd, O: Orientation> BinaryHeapPQ<K, O> {
    /// O(log N) amortized
    pub fn insert(&mut self, key: K) {
        if self.data.len() == self.data.capacity() {
            trace!("growing heap past {} keys", self.data.len());
        }
        self.data.push(key);
        self.swim(self.data.len() - 1);
    }

    /// Removes and returns the top key.
    /// O(log N)
    pub fn pop(&mut self) -> Option<K> {
        if self.data.is_empty() {
            return None;
        }
        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let top = self.data.pop();
        self.sink(0);
        top
    }

    /// Consumes the queue, returning the keys top first.
    /// O(N log N)
    pub fn into_sorted_vec(mut self) -> Vec<K> {
        let mut res = Vec::with_capacity(self.len());
        while let Some(key) = self.pop() {
            res.push(key);
        }
        res
    }

    /// Panics if the heap order is violated. O(N), meant for tests.
    pub fn assert_correctness(&self) {
        for child in 1..self.data.len() {
            let parent = (child - 1) / 2;
            assert!(
                !O::above(&self.data[child], &self.data[parent]),
                "heap order violated between {parent} and its child {child}"
            );
        }
    }

    fn swim(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !O::above(&self.data[i], &self.data[parent]) {
                break;
            }
            self.data.swap(i, parent);
            i = parent;
        }
    }

    fn sink(&mut self, mut i: usize) {
        let len = self.data.len();
        loop {
            let mut child = 2 * i + 1;
            if child >= len {
                break;
            }
            if child + 1 < len && O::above(&self.data[child + 1], &self.data[child]) {
                child += 1;
            }
            if !O::above(&self.data[child], &self.data[i]) {
                break;
            }
            self.data.swap(i, child);
            i = child;
        }
    }
}

impl<K: PartialOrd, O: Orientation> FromIterator<K> for BinaryHeapPQ<K, O> {
    /// Builds the heap bottom-up.
    /// O(N)
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut res = BinaryHeapPQ {
            data: iter.into_iter().collect(),
            phantom: PhantomData,
        };
        for i in (0..res.data.len() / 2).rev() {
            res.sink(i);
        }
        res
    }
}

impl<K: PartialOrd, O: Orientation> Extend<K> for BinaryHeapPQ<K, O> {
    fn extend<T: IntoIterator<Item = K>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        let (lower_bound, _) = iter.size_hint();
        self.data.reserve(lower_bound);
        for key in iter {
            self.insert(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::pq::{MaxPQ, MinPQ};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn heapify_and_drain() {
        let mut rng = StdRng::seed_from_u64(7);
        let keys: Vec<i32> = (0..300).map(|_| rng.gen_range(-50..50)).collect();

        let pq: MaxPQ<i32> = keys.iter().cloned().collect();
        pq.assert_correctness();
        let mut expected = keys.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(pq.into_sorted_vec(), expected);
    }

    #[test]
    fn interleaved() {
        let mut pq = MinPQ::new();
        assert_eq!(pq.pop(), None);
        pq.extend([3, 1, 2]);
        assert_eq!(pq.peek(), Some(&1));
        assert_eq!(pq.pop(), Some(1));
        pq.insert(0);
        pq.insert(5);
        pq.assert_correctness();
        assert_eq!(pq.len(), 4);
        assert_eq!(pq.into_sorted_vec(), vec![0, 2, 3, 5]);
    }
}

//! An indexed priority queue with mutable keys.
//!
//! See [`IndexPQ`].

use std::marker::PhantomData;

use super::{Max, Orientation};
use crate::{Error, Result};

const MISSING_KEY_ERROR: &str = "invariant violated: contained index has no key";

/// A binary heap over a subset of the indices `0..capacity`, where every index
/// carries a key that can be changed while it is in the queue.
///
/// Elements are addressed by a stable external index chosen by the caller, not
/// by their position in the heap. This makes it possible to change the key of an
/// element, or remove it from the middle of the heap, in `O(log N)`.
///
/// The capacity is fixed at construction, and the backing arrays are allocated once.
///
/// Every fallible method checks all its preconditions before modifying anything,
/// so a call that returns `Err` leaves the queue as it was.
///
///```
/// use hedgerow::pq::IndexMaxPQ;
///
/// let mut pq = IndexMaxPQ::new(10);
/// pq.insert(0, 10).unwrap();
/// pq.insert(1, 20).unwrap();
/// pq.insert(2, 15).unwrap();
/// assert_eq!(pq.peek_index(), Ok(1));
///
/// pq.change_key(0, 25).unwrap();
/// assert_eq!(pq.pop(), Ok(0));
/// assert_eq!(pq.pop(), Ok(1));
/// # pq.assert_correctness();
///```
#[derive(Clone, Debug)]
pub struct IndexPQ<K, O = Max> {
    /// `heap[slot]` is the index stored at that heap slot. Slots are 1-based,
    /// only `1..=len` are meaningful, and `heap[0]` is never read.
    heap: Vec<usize>,
    /// `inverse[i]` is the slot of index `i`, or `None` if `i` is absent.
    inverse: Vec<Option<usize>>,
    /// `keys[i]` is present exactly when `inverse[i]` is.
    keys: Vec<Option<K>>,
    len: usize,
    phantom: PhantomData<O>,
}

impl<K, O> IndexPQ<K, O> {
    /// Creates an empty queue accepting the indices `0..capacity`.
    ///
    /// Panics if the backing arrays can't be allocated, like [`Vec::with_capacity`].
    /// See [`IndexPQ::try_with_capacity`] for the fallible version.
    pub fn new(capacity: usize) -> Self {
        IndexPQ {
            heap: vec![0; capacity + 1],
            inverse: vec![None; capacity],
            keys: std::iter::repeat_with(|| None).take(capacity).collect(),
            len: 0,
            phantom: PhantomData,
        }
    }

    /// Like [`IndexPQ::new`], but accepts any integer type.
    /// Fails with [`Error::InvalidCapacity`] if `capacity` is negative, or too
    /// large for the backing arrays to be allocated.
    ///
    ///```
    /// use hedgerow::{pq::IndexMinPQ, Error};
    ///
    /// assert!(IndexMinPQ::<u32>::try_with_capacity(5i32).is_ok());
    /// assert_eq!(IndexMinPQ::<u32>::try_with_capacity(-1i32).unwrap_err(), Error::InvalidCapacity);
    ///```
    pub fn try_with_capacity<C: TryInto<usize>>(capacity: C) -> Result<Self> {
        let capacity: usize = capacity.try_into().map_err(|_| Error::InvalidCapacity)?;
        let slots = capacity.checked_add(1).ok_or(Error::InvalidCapacity)?;
        let (mut heap, mut inverse, mut keys) = (Vec::new(), Vec::new(), Vec::new());
        heap.try_reserve_exact(slots)
            .and_then(|()| inverse.try_reserve_exact(capacity))
            .and_then(|()| keys.try_reserve_exact(capacity))
            .map_err(|_| Error::InvalidCapacity)?;
        heap.resize(slots, 0);
        inverse.resize(capacity, None);
        keys.resize_with(capacity, || None);
        Ok(IndexPQ {
            heap,
            inverse,
            keys,
            len: 0,
            phantom: PhantomData,
        })
    }

    /// The number of indices currently in the queue.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The exclusive upper bound on indices, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.inverse.len()
    }

    /// Returns whether index `i` is currently in the queue.
    /// Fails with [`Error::IndexOutOfRange`] if `i >= capacity`.
    pub fn contains(&self, i: usize) -> Result<bool> {
        self.check_index(i)?;
        Ok(self.inverse[i].is_some())
    }

    /// Returns the key currently associated with index `i`.
    pub fn key_of(&self, i: usize) -> Result<&K> {
        self.slot_of(i)?;
        Ok(self.key(i))
    }

    /// Returns the index at the top of the queue.
    /// O(1)
    pub fn peek_index(&self) -> Result<usize> {
        if self.is_empty() {
            return Err(Error::Underflow);
        }
        Ok(self.heap[1])
    }

    /// Returns the key at the top of the queue.
    /// O(1)
    pub fn peek(&self) -> Result<&K> {
        let i = self.peek_index()?;
        Ok(self.key(i))
    }

    /// Iterates over the contained indices and their keys, in heap order
    /// (the first item is the top, the rest are in no particular order).
    pub fn iter(&self) -> impl Iterator<Item = (usize, &K)> + '_ {
        self.heap[1..=self.len].iter().map(move |&i| (i, self.key(i)))
    }

    /// Removes every index from the queue. The capacity stays the same.
    pub fn clear(&mut self) {
        for slot in 1..=self.len {
            let i = self.heap[slot];
            self.inverse[i] = None;
            self.keys[i] = None;
        }
        self.len = 0;
    }

    fn check_index(&self, i: usize) -> Result<()> {
        if i >= self.capacity() {
            return Err(Error::IndexOutOfRange {
                index: i,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    /// The slot of a contained index. Range is checked before presence.
    fn slot_of(&self, i: usize) -> Result<usize> {
        self.check_index(i)?;
        self.inverse[i].ok_or(Error::NotFound(i))
    }

    /// Only call for indices known to be contained.
    fn key(&self, i: usize) -> &K {
        self.keys[i].as_ref().expect(MISSING_KEY_ERROR)
    }

    fn exchange(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.inverse[self.heap[a]] = Some(a);
        self.inverse[self.heap[b]] = Some(b);
    }
}

/// Keys that can't be compared with themselves (such as `NaN`) would stall the
/// heap below them, so they are never admitted.
fn check_comparable<K: PartialOrd>(i: usize, key: &K) -> Result<()> {
    if key.partial_cmp(key).is_none() {
        return Err(Error::InvalidKeyUpdate { index: i });
    }
    Ok(())
}

impl<K: PartialOrd, O: Orientation> IndexPQ<K, O> {
    /// Associates `key` with index `i` and adds it to the queue.
    /// Fails with [`Error::DuplicateIndex`] if `i` is already in the queue, and with
    /// [`Error::InvalidKeyUpdate`] if `key` isn't comparable with itself.
    /// O(log N)
    pub fn insert(&mut self, i: usize, key: K) -> Result<()> {
        if self.contains(i)? {
            return Err(Error::DuplicateIndex(i));
        }
        check_comparable(i, &key)?;
        self.len += 1;
        self.heap[self.len] = i;
        self.inverse[i] = Some(self.len);
        self.keys[i] = Some(key);
        self.swim(self.len);
        Ok(())
    }

    /// Removes the top of the queue and returns its index.
    /// O(log N)
    pub fn pop(&mut self) -> Result<usize> {
        self.pop_with_key().map(|(i, _)| i)
    }

    /// Removes the top of the queue and returns its index together with its key.
    /// O(log N)
    pub fn pop_with_key(&mut self) -> Result<(usize, K)> {
        let top = self.peek_index()?;
        self.exchange(1, self.len);
        self.len -= 1;
        self.sink(1);
        Ok((top, self.forget(top)))
    }

    /// Replaces the key of index `i`, whichever direction it moves in.
    /// Like [`IndexPQ::insert`], rejects keys that aren't comparable with themselves.
    /// O(log N)
    pub fn change_key(&mut self, i: usize, key: K) -> Result<()> {
        let slot = self.slot_of(i)?;
        check_comparable(i, &key)?;
        self.keys[i] = Some(key);
        self.swim(slot);
        let slot = self.inverse[i].expect(MISSING_KEY_ERROR);
        self.sink(slot);
        Ok(())
    }

    /// Replaces the key of index `i` with a strictly more extremal `key`: a greater
    /// one in a max-oriented queue, a smaller one in a min-oriented queue.
    /// Fails with [`Error::InvalidKeyUpdate`] otherwise. The element can only move up.
    /// O(log N)
    pub fn increase_key(&mut self, i: usize, key: K) -> Result<()> {
        let slot = self.slot_of(i)?;
        if !O::above(&key, self.key(i)) {
            return Err(Error::InvalidKeyUpdate { index: i });
        }
        self.keys[i] = Some(key);
        self.swim(slot);
        Ok(())
    }

    /// Replaces the key of index `i` with a strictly less extremal `key`.
    /// Fails with [`Error::InvalidKeyUpdate`] otherwise. The element can only move down.
    /// O(log N)
    pub fn decrease_key(&mut self, i: usize, key: K) -> Result<()> {
        let slot = self.slot_of(i)?;
        if !O::above(self.key(i), &key) {
            return Err(Error::InvalidKeyUpdate { index: i });
        }
        self.keys[i] = Some(key);
        self.sink(slot);
        Ok(())
    }

    /// Removes index `i` from the queue and returns its key.
    /// O(log N)
    pub fn delete(&mut self, i: usize) -> Result<K> {
        let slot = self.slot_of(i)?;
        self.exchange(slot, self.len);
        self.len -= 1;
        // The element now at `slot` came from the bottom of the heap, and may
        // belong either above or below its new position.
        if slot <= self.len {
            self.swim(slot);
            self.sink(slot);
        }
        Ok(self.forget(i))
    }

    /// Empties the queue in order, top first.
    ///
    ///```
    /// use hedgerow::pq::IndexMinPQ;
    ///
    /// let mut pq: IndexMinPQ<char> = IndexMinPQ::new(4);
    /// for (i, c) in "dbca".chars().enumerate() {
    ///     pq.insert(i, c).unwrap();
    /// }
    /// let order: Vec<_> = pq.drain_sorted().collect();
    /// assert_eq!(order, vec![(3, 'a'), (1, 'b'), (2, 'c'), (0, 'd')]);
    /// assert!(pq.is_empty());
    ///```
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, K, O> {
        DrainSorted { pq: self }
    }

    /// Consumes the queue, returning its indices and keys top first.
    pub fn into_sorted_vec(mut self) -> Vec<(usize, K)> {
        self.drain_sorted().collect()
    }

    /// Checks the heap order and the consistency of the three arrays.
    /// Panics if anything is wrong. Takes `O(capacity)` time, meant for tests.
    pub fn assert_correctness(&self) {
        let contained = self.inverse.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(contained, self.len, "wrong number of contained indices");
        for (i, slot) in self.inverse.iter().enumerate() {
            if let Some(key) = &self.keys[i] {
                assert!(key.partial_cmp(key).is_some(), "index {i} has an incomparable key");
            }
            assert_eq!(
                slot.is_some(),
                self.keys[i].is_some(),
                "index {i} has a slot but no key, or a key but no slot"
            );
        }
        for slot in 1..=self.len {
            let i = self.heap[slot];
            assert_eq!(self.inverse[i], Some(slot), "inverse of slot {slot} is wrong");
            for child in [2 * slot, 2 * slot + 1] {
                if child <= self.len {
                    assert!(
                        !self.above(child, slot),
                        "heap order violated between slot {slot} and its child {child}"
                    );
                }
            }
        }
    }

    /// Clears the bookkeeping of an index that was already moved past `len`.
    fn forget(&mut self, i: usize) -> K {
        self.inverse[i] = None;
        self.keys[i].take().expect(MISSING_KEY_ERROR)
    }

    /// Is the element at slot `a` strictly more extremal than the one at slot `b`
    fn above(&self, a: usize, b: usize) -> bool {
        O::above(self.key(self.heap[a]), self.key(self.heap[b]))
    }

    fn swim(&mut self, mut slot: usize) {
        while slot > 1 && self.above(slot, slot / 2) {
            self.exchange(slot, slot / 2);
            slot /= 2;
        }
    }

    fn sink(&mut self, mut slot: usize) {
        while 2 * slot <= self.len {
            let mut child = 2 * slot;
            if child < self.len && self.above(child + 1, child) {
                child += 1;
            }
            if !self.above(child, slot) {
                break;
            }
            self.exchange(slot, child);
            slot = child;
        }
    }
}

/// Pops the queue until it is empty. See [`IndexPQ::drain_sorted`].
pub struct DrainSorted<'a, K, O> {
    pq: &'a mut IndexPQ<K, O>,
}

impl<'a, K: PartialOrd, O: Orientation> Iterator for DrainSorted<'a, K, O> {
    type Item = (usize, K);

    fn next(&mut self) -> Option<Self::Item> {
        self.pq.pop_with_key().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pq.len(), Some(self.pq.len()))
    }
}

//! A hash table with open addressing and linear probing.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use log::trace;

use super::SymbolTable;

const MIN_CAPACITY: usize = 4;

/// A hash map that resolves collisions by scanning forward to the next empty slot.
///
/// The table is kept at most half full by doubling, and at least one eighth full
/// by halving, so that probe sequences stay short.
///
/// An empty slot is `None`, not a reserved key or value.
///
///```
/// use hedgerow::symbol_table::{LinearProbingMap, SymbolTable};
///
/// let mut map = LinearProbingMap::new();
/// map.put("zero", 0);
/// map.put("one", 1);
/// assert_eq!(map.get(&"zero"), Some(&0));
/// assert_eq!(map.remove(&"one"), Some(1));
/// assert!(!map.contains(&"one"));
///```
#[derive(Clone)]
pub struct LinearProbingMap<K, V> {
    slots: Vec<Option<(K, V)>>,
    len: usize,
}

impl<K, V> LinearProbingMap<K, V> {
    pub fn new() -> Self {
        Self::with_slots(MIN_CAPACITY)
    }

    fn with_slots(slots: usize) -> Self {
        LinearProbingMap {
            slots: std::iter::repeat_with(|| None).take(slots).collect(),
            len: 0,
        }
    }

    /// Iterates over the entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref().map(|(key, value)| (key, value)))
    }
}

impl<K: Hash + Eq, V> LinearProbingMap<K, V> {
    fn hash(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.slots.len() as u64) as usize
    }

    /// The slot holding `key`, or the empty slot ending its probe sequence.
    fn probe(&self, key: &K) -> usize {
        let mut i = self.hash(key);
        while let Some((k, _)) = &self.slots[i] {
            if k == key {
                break;
            }
            i = (i + 1) % self.slots.len();
        }
        i
    }

    fn resize(&mut self, slots: usize) {
        trace!("resizing hash table from {} to {} slots", self.slots.len(), slots);
        let old = std::mem::replace(self, Self::with_slots(slots));
        for (key, value) in old.slots.into_iter().flatten() {
            let i = self.probe(&key);
            self.slots[i] = Some((key, value));
            self.len += 1;
        }
    }
}

impl<K: Hash + Eq, V> SymbolTable<K, V> for LinearProbingMap<K, V> {
    fn put(&mut self, key: K, value: V) -> Option<V> {
        if 2 * (self.len + 1) > self.slots.len() {
            self.resize(2 * self.slots.len());
        }
        let i = self.probe(&key);
        if let Some((_, old)) = &mut self.slots[i] {
            return Some(std::mem::replace(old, value));
        }
        self.slots[i] = Some((key, value));
        self.len += 1;
        None
    }

    fn get(&self, key: &K) -> Option<&V> {
        let i = self.probe(key);
        self.slots[i].as_ref().map(|(_, value)| value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let mut i = self.probe(key);
        let (_, value) = self.slots[i].take()?;
        self.len -= 1;

        // The rest of the cluster may have probed past `i`; put it back in place.
        i = (i + 1) % self.slots.len();
        while let Some((k, v)) = self.slots[i].take() {
            let j = self.probe(&k);
            self.slots[j] = Some((k, v));
            i = (i + 1) % self.slots.len();
        }

        if self.len > 0 && 8 * self.len <= self.slots.len() && self.slots.len() / 2 >= MIN_CAPACITY {
            self.resize(self.slots.len() / 2);
        }
        Some(value)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn keys(&self) -> Vec<&K> {
        self.iter().map(|(key, _)| key).collect()
    }
}

impl<K, V> Default for LinearProbingMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for LinearProbingMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut res = Self::new();
        res.extend(iter);
        res
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for LinearProbingMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for LinearProbingMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::collections::HashMap;

    #[test]
    fn matches_hashmap() {
        let mut rng = StdRng::seed_from_u64(19);
        let mut map = LinearProbingMap::new();
        let mut reference = HashMap::new();
        for round in 0..5000 {
            let key: u16 = rng.gen_range(0..300);
            // bias towards removals in the second half, to exercise shrinking
            let p_put = if round < 2500 { 0.7 } else { 0.3 };
            if rng.gen_bool(p_put) {
                assert_eq!(map.put(key, round), reference.insert(key, round));
            } else {
                assert_eq!(map.remove(&key), reference.remove(&key));
            }
            assert_eq!(map.len(), reference.len());
            assert!(map.slots.len() >= 2 * map.len());
        }
        for (key, value) in &reference {
            assert_eq!(map.get(key), Some(value));
        }
        assert_eq!(
            map.keys().into_iter().sorted().collect_vec(),
            reference.keys().sorted().collect_vec()
        );
    }

    #[test]
    fn zero_is_a_value() {
        let mut map = LinearProbingMap::new();
        map.put(0u8, 0u8);
        assert_eq!(map.get(&0), Some(&0));
        assert!(map.contains(&0));
        assert_eq!(map.get(&1), None);
    }
}

//! A running median, kept with two heaps.

use super::{MaxPQ, MinPQ};

/// Keeps track of the median of a growing (and shrinking) collection of keys.
///
/// The lower half lives in a max-heap and the upper half in a min-heap. The
/// lower half is always the same size as the upper half, or one larger, so the
/// median is the top of the lower half. For an even number of keys this is the
/// lower of the two middle keys.
///
///```
/// use hedgerow::pq::MedianFinder;
///
/// let mut median = MedianFinder::new();
/// for x in [5, 15, 1, 3] {
///     median.insert(x);
/// }
/// assert_eq!(median.median(), Some(&3));
/// median.insert(8);
/// assert_eq!(median.median(), Some(&5));
///```
#[derive(Clone, Debug)]
pub struct MedianFinder<K> {
    lower: MaxPQ<K>,
    upper: MinPQ<K>,
}

impl<K: PartialOrd> MedianFinder<K> {
    pub fn new() -> Self {
        MedianFinder {
            lower: MaxPQ::new(),
            upper: MinPQ::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.lower.len() + self.upper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// O(log N)
    pub fn insert(&mut self, key: K) {
        match self.lower.peek() {
            Some(top) if key > *top => self.upper.insert(key),
            _ => self.lower.insert(key),
        }
        self.rebalance();
    }

    /// The lower median. O(1)
    pub fn median(&self) -> Option<&K> {
        self.lower.peek()
    }

    /// Removes and returns the lower median.
    /// O(log N)
    pub fn pop_median(&mut self) -> Option<K> {
        let res = self.lower.pop();
        self.rebalance();
        res
    }

    fn rebalance(&mut self) {
        if self.lower.len() > self.upper.len() + 1 {
            if let Some(key) = self.lower.pop() {
                self.upper.insert(key);
            }
        } else if self.upper.len() > self.lower.len() {
            if let Some(key) = self.upper.pop() {
                self.lower.insert(key);
            }
        }
    }
}

impl<K: PartialOrd> Default for MedianFinder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialOrd> Extend<K> for MedianFinder<K> {
    fn extend<T: IntoIterator<Item = K>>(&mut self, iter: T) {
        for key in iter {
            self.insert(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn matches_sorting() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut median = MedianFinder::new();
        let mut seen = vec![];
        for _ in 0..200 {
            let x: i64 = rng.gen_range(-1000..1000);
            median.insert(x);
            seen.push(x);
            seen.sort_unstable();
            assert_eq!(median.median(), Some(&seen[(seen.len() - 1) / 2]));
            assert_eq!(median.len(), seen.len());
        }
    }

    #[test]
    fn pop_until_empty() {
        let mut median = MedianFinder::default();
        median.extend([4, 1, 3, 2, 5]);
        assert_eq!(median.pop_median(), Some(3));
        assert_eq!(median.pop_median(), Some(2));
        assert_eq!(median.pop_median(), Some(4));
        assert_eq!(median.pop_median(), Some(1));
        assert_eq!(median.pop_median(), Some(5));
        assert_eq!(median.pop_median(), None);
        assert!(median.is_empty());
    }
}

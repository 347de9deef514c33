//! An ordered symbol table kept in an unbalanced binary search tree.
//!
//! Going down the tree mutably and then rebuilding the subtree sizes on the way
//! back up is done with [`recursive_reference::RecRef`], which keeps the whole
//! path of mutable references without upsetting the borrow checker.

use std::cmp::Ordering;

use recursive_reference::RecRef;

use super::SymbolTable;

const NO_VALUE_ERROR: &str = "invariant violated: a non-empty subtree has a minimum";

/// A binary search tree. Might be empty.
enum Tree<K, V> {
    Empty,
    Root(Box<Node<K, V>>),
}
use Tree::*;

struct Node<K, V> {
    key: K,
    value: V,
    /// The number of nodes in this subtree, this one included.
    size: usize,
    left: Tree<K, V>,
    right: Tree<K, V>,
}

impl<K, V> Tree<K, V> {
    fn leaf(key: K, value: V) -> Self {
        Root(Box::new(Node {
            key,
            value,
            size: 1,
            left: Empty,
            right: Empty,
        }))
    }

    fn size(&self) -> usize {
        match self {
            Empty => 0,
            Root(node) => node.size,
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Empty)
    }

    fn into_node_boxed(self) -> Option<Box<Node<K, V>>> {
        match self {
            Root(node) => Some(node),
            Empty => None,
        }
    }

    /// Recomputes the size of the root, assuming its sons are correct.
    fn rebuild(&mut self) {
        if let Root(node) = self {
            node.size = 1 + node.left.size() + node.right.size();
        }
    }

    /// Detaches the node with the smallest key, returning it without sons.
    fn remove_min_node(&mut self) -> Option<Box<Node<K, V>>> {
        let mut rec_ref = RecRef::new(self);
        while RecRef::extend_result(&mut rec_ref, |tree| match tree {
            Root(node) if !node.left.is_empty() => Ok(&mut node.left),
            _ => Err(()),
        })
        .is_ok()
        {}
        let mut node = std::mem::replace(&mut *rec_ref, Empty).into_node_boxed()?;
        *rec_ref = std::mem::replace(&mut node.right, Empty);
        node.size = 1;
        rebuild_to_root(rec_ref);
        Some(node)
    }
}

/// Walks down from the root of `tree` to the subtree where `key` is, or would be inserted.
fn search<'a, K: Ord, V>(tree: &'a mut Tree<K, V>, key: &K) -> RecRef<'a, Tree<K, V>> {
    let mut rec_ref = RecRef::new(tree);
    while RecRef::extend_result(&mut rec_ref, |tree| match tree {
        Root(node) => match key.cmp(&node.key) {
            Ordering::Less => Ok(&mut node.left),
            Ordering::Greater => Ok(&mut node.right),
            Ordering::Equal => Err(()),
        },
        Empty => Err(()),
    })
    .is_ok()
    {}
    rec_ref
}

/// Rebuilds every subtree on the path, from the current position up to the root.
fn rebuild_to_root<K, V>(mut rec_ref: RecRef<'_, Tree<K, V>>) {
    rec_ref.rebuild();
    while RecRef::pop(&mut rec_ref).is_some() {
        rec_ref.rebuild();
    }
}

/// The auto-generated deallocation code for [`Tree`] is recursive, and an
/// unbalanced tree can be as deep as it is large. This deallocates iteratively.
struct IterativeDeallocator<K, V> {
    stack: Vec<Box<Node<K, V>>>,
}

impl<K, V> IterativeDeallocator<K, V> {
    fn step(&mut self) -> Option<()> {
        let mut node = self.stack.pop()?;
        self.push(std::mem::replace(&mut node.left, Empty));
        self.push(std::mem::replace(&mut node.right, Empty));
        Some(())
    }

    fn push(&mut self, tree: Tree<K, V>) {
        if let Some(node) = tree.into_node_boxed() {
            self.stack.push(node);
        }
    }
}

fn deallocate_iteratively<K, V>(tree: &mut Tree<K, V>) {
    let my_tree = std::mem::replace(tree, Empty);
    let mut deallocator = IterativeDeallocator { stack: vec![] };
    deallocator.push(my_tree);
    while deallocator.step().is_some() {}
}

/// An ordered map from keys to values.
///
/// The tree isn't balanced: operations take time proportional to its height,
/// which is `O(log N)` for keys inserted in random order and `O(N)` for sorted ones.
///
///```
/// use hedgerow::symbol_table::{BstMap, SymbolTable};
///
/// let mut map: BstMap<_, _> = "searchexample".chars().zip(0..).collect();
/// assert_eq!(map.get(&'e'), Some(&12));
/// assert_eq!(map.len(), 10);
/// assert_eq!(map.min(), Some(&'a'));
/// assert_eq!(map.floor(&'q'), Some(&'p'));
/// assert_eq!(map.rank(&'h'), 3);
/// assert_eq!(map.select(3), Some(&'h'));
/// assert_eq!(map.remove(&'e'), Some(12));
/// # map.assert_correctness();
///```
pub struct BstMap<K, V> {
    root: Tree<K, V>,
}

impl<K, V> BstMap<K, V> {
    pub fn new() -> Self {
        BstMap { root: Empty }
    }

    /// Iterates over the entries in increasing order of keys.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut res = Iter { stack: vec![] };
        res.push_left(&self.root);
        res
    }

    pub fn min(&self) -> Option<&K> {
        let mut node = self.root_node()?;
        while let Root(left) = &node.left {
            node = &**left;
        }
        Some(&node.key)
    }

    pub fn max(&self) -> Option<&K> {
        let mut node = self.root_node()?;
        while let Root(right) = &node.right {
            node = &**right;
        }
        Some(&node.key)
    }

    /// Removes the entry with the smallest key.
    pub fn remove_min(&mut self) -> Option<(K, V)> {
        let node = self.root.remove_min_node()?;
        let Node { key, value, .. } = *node;
        Some((key, value))
    }

    /// The key of rank `k`, i.e. the key with exactly `k` smaller keys in the table.
    pub fn select(&self, mut k: usize) -> Option<&K> {
        let mut tree = &self.root;
        while let Root(node) = tree {
            let left = node.left.size();
            match k.cmp(&left) {
                Ordering::Less => tree = &node.left,
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => {
                    k -= left + 1;
                    tree = &node.right;
                }
            }
        }
        None
    }

    fn root_node(&self) -> Option<&Node<K, V>> {
        match &self.root {
            Root(node) => Some(&**node),
            Empty => None,
        }
    }
}

impl<K: Ord, V> BstMap<K, V> {
    /// The largest key in the table that is at most `key`.
    pub fn floor(&self, key: &K) -> Option<&K> {
        let mut tree = &self.root;
        let mut best = None;
        while let Root(node) = tree {
            match key.cmp(&node.key) {
                Ordering::Equal => return Some(&node.key),
                Ordering::Less => tree = &node.left,
                Ordering::Greater => {
                    best = Some(&node.key);
                    tree = &node.right;
                }
            }
        }
        best
    }

    /// The smallest key in the table that is at least `key`.
    pub fn ceiling(&self, key: &K) -> Option<&K> {
        let mut tree = &self.root;
        let mut best = None;
        while let Root(node) = tree {
            match key.cmp(&node.key) {
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => tree = &node.right,
                Ordering::Less => {
                    best = Some(&node.key);
                    tree = &node.left;
                }
            }
        }
        best
    }

    /// The number of keys in the table strictly smaller than `key`.
    pub fn rank(&self, key: &K) -> usize {
        let mut tree = &self.root;
        let mut rank = 0;
        while let Root(node) = tree {
            match key.cmp(&node.key) {
                Ordering::Less => tree = &node.left,
                Ordering::Equal => return rank + node.left.size(),
                Ordering::Greater => {
                    rank += 1 + node.left.size();
                    tree = &node.right;
                }
            }
        }
        rank
    }

    /// Checks that the keys are in order and that the subtree sizes are right.
    /// Panics otherwise. O(N), meant for tests.
    pub fn assert_correctness(&self) {
        let keys: Vec<&K> = self.iter().map(|(key, _)| key).collect();
        assert!(
            keys.windows(2).all(|pair| pair[0] < pair[1]),
            "keys are out of order"
        );
        let mut stack: Vec<&Node<K, V>> = self.root_node().into_iter().collect();
        while let Some(node) = stack.pop() {
            assert_eq!(
                node.size,
                1 + node.left.size() + node.right.size(),
                "wrong subtree size"
            );
            for son in [&node.left, &node.right] {
                if let Root(son) = son {
                    stack.push(&**son);
                }
            }
        }
    }
}

impl<K: Ord, V> SymbolTable<K, V> for BstMap<K, V> {
    fn put(&mut self, key: K, value: V) -> Option<V> {
        let mut rec_ref = search(&mut self.root, &key);
        if let Root(node) = &mut *rec_ref {
            return Some(std::mem::replace(&mut node.value, value));
        }
        *rec_ref = Tree::leaf(key, value);
        rebuild_to_root(rec_ref);
        None
    }

    fn get(&self, key: &K) -> Option<&V> {
        let mut tree = &self.root;
        while let Root(node) = tree {
            match key.cmp(&node.key) {
                Ordering::Less => tree = &node.left,
                Ordering::Greater => tree = &node.right,
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Hibbard deletion: a node with two sons is replaced by the minimum of its right subtree.
    fn remove(&mut self, key: &K) -> Option<V> {
        let mut rec_ref = search(&mut self.root, key);
        let node = std::mem::replace(&mut *rec_ref, Empty).into_node_boxed()?;
        let Node {
            value, left, right, ..
        } = *node;
        *rec_ref = match (left, right) {
            (Empty, right) => right,
            (left, Empty) => left,
            (left, mut right) => {
                let mut successor = right.remove_min_node().expect(NO_VALUE_ERROR);
                successor.left = left;
                successor.right = right;
                Root(successor)
            }
        };
        rebuild_to_root(rec_ref);
        Some(value)
    }

    fn len(&self) -> usize {
        self.root.size()
    }

    fn keys(&self) -> Vec<&K> {
        self.iter().map(|(key, _)| key).collect()
    }
}

impl<K, V> Default for BstMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for BstMap<K, V> {
    fn drop(&mut self) {
        deallocate_iteratively(&mut self.root);
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BstMap<K, V> {
    /// Later entries overwrite earlier ones with the same key.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut res = Self::new();
        res.extend(iter);
        res
    }
}

impl<K: Ord, V> Extend<(K, V)> for BstMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for BstMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// In-order iterator over a [`BstMap`].
pub struct Iter<'a, K, V> {
    /// The nodes whose left subtree was already pushed, deepest last.
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left(&mut self, mut tree: &'a Tree<K, V>) {
        while let Root(node) = tree {
            self.stack.push(&**node);
            tree = &node.left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(&node.right);
        Some((&node.key, &node.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
    use std::collections::BTreeMap;

    #[test]
    fn matches_btreemap() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut map = BstMap::new();
        let mut reference = BTreeMap::new();
        for round in 0..3000 {
            let key: i32 = rng.gen_range(0..200);
            if rng.gen_bool(0.6) {
                assert_eq!(map.put(key, round), reference.insert(key, round));
            } else {
                assert_eq!(map.remove(&key), reference.remove(&key));
            }
            assert_eq!(map.len(), reference.len());
            if round % 100 == 0 {
                map.assert_correctness();
            }
        }
        map.assert_correctness();
        assert!(map.iter().eq(reference.iter()));
        for k in 0..map.len() {
            let key = map.select(k).unwrap();
            assert_eq!(map.rank(key), k);
        }
        assert_eq!(map.select(map.len()), None);
        assert_eq!(map.min(), reference.keys().next());
        assert_eq!(map.max(), reference.keys().next_back());
    }

    #[test]
    fn floor_and_ceiling() {
        let map: BstMap<i32, ()> = [10, 20, 30].into_iter().map(|k| (k, ())).collect();
        assert_eq!(map.floor(&5), None);
        assert_eq!(map.floor(&25), Some(&20));
        assert_eq!(map.floor(&30), Some(&30));
        assert_eq!(map.ceiling(&25), Some(&30));
        assert_eq!(map.ceiling(&31), None);
        assert_eq!(map.rank(&25), 2);
    }

    #[test]
    fn default_values_are_present() {
        let mut map = BstMap::new();
        map.put(0, 0);
        assert!(map.contains(&0));
        assert_eq!(map.get(&0), Some(&0));
        assert_eq!(map.remove_min(), Some((0, 0)));
        assert!(map.is_empty());
    }

    #[test]
    fn remove_min_in_order() {
        let mut keys: Vec<u32> = (0..100).collect();
        keys.shuffle(&mut StdRng::seed_from_u64(5));
        let mut map: BstMap<_, _> = keys.into_iter().map(|k| (k, k * 2)).collect();
        for k in 0..100 {
            assert_eq!(map.remove_min(), Some((k, k * 2)));
            map.assert_correctness();
        }
        assert_eq!(map.remove_min(), None);
    }

    #[test]
    fn deep_tree_drops() {
        // sorted insertion makes a path
        let map: BstMap<u32, ()> = (0..5_000).map(|k| (k, ())).collect();
        assert_eq!(map.len(), 5_000);
        assert_eq!(map.keys().len(), 5_000);
        drop(map);
    }
}

//! Symbol tables: maps from keys to values.
//!
//! * [`BstMap`]: an unbalanced binary search tree, ordered by key.
//! * [`LinearProbingMap`]: a hash table with open addressing.
//!
//! Neither of them reserves a key or value to mean "absent". Presence is always
//! explicit (an empty tree variant, an empty slot), so `0`, `""` or any other
//! default value is a legitimate key or value.

mod bst;
mod linear_probing;

pub use bst::*;
pub use linear_probing::*;

pub trait SymbolTable<K, V> {
    /// Associates `value` with `key`, returning the value previously associated with it.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    fn get(&self, key: &K) -> Option<&V>;

    fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key` from the table, returning its value.
    fn remove(&mut self, key: &K) -> Option<V>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All the keys in the table. Ordered tables return them in order.
    fn keys(&self) -> Vec<&K>;
}

//! Optimized collection types for Zeta.
//!
//! This module provides:
//! - Re-exports of optimized hash collections using AHash
//! - An insertion-ordered map that hashes with AHash

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

/// Type alias for the standard HashMap with AHash for better performance.
pub type AHashMap<K, V> = ahash::AHashMap<K, V>;

/// Type alias for the standard HashSet with AHash for better performance.
pub type AHashSet<T> = ahash::AHashSet<T>;

/// Insertion-ordered map backed by AHash.
///
/// Iteration follows insertion order, which makes dispatch order over the
/// map deterministic.
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, RandomState>;

/// Creates an empty [`IndexMap`].
pub fn index_map<K, V>() -> IndexMap<K, V> {
    IndexMap::with_hasher(RandomState::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert("key", "value");
        assert_eq!(map.get("key"), Some(&"value"));
    }

    #[test]
    fn test_hashset_ahash() {
        let mut set = HashSet::new();
        set.insert(42);
        assert!(set.contains(&42));
    }

    #[test]
    fn test_index_map_keeps_insertion_order() {
        let mut map = index_map();
        map.insert(3, "c");
        map.insert(1, "a");
        map.insert(2, "b");
        map.shift_remove(&1);
        map.insert(1, "a");

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec![3, 2, 1]);
    }
}

//! Fixed-size hash table with separate chaining.
//!
//! # Responsibility
//! - Own keyed entities and resolve bucket collisions deterministically.
//!
//! # Invariants
//! - Keys are unique across the whole map; a duplicate insert is rejected
//!   and the offered value is dropped.
//! - New keys are appended at the tail of their chain, so iteration order is
//!   bucket order, then insertion order within a bucket.
//! - The bucket count is fixed at construction; there is no rehash.

use log::warn;
use std::fmt::{Debug, Formatter};

/// Bucket count used when none is configured.
pub const DEFAULT_TABLE_SIZE: usize = 100;

struct ChainedEntry<V> {
    key: i32,
    value: V,
    next: Option<Box<ChainedEntry<V>>>,
}

/// Integer-keyed owning map.
pub struct ChainedMap<V> {
    slots: Vec<Option<Box<ChainedEntry<V>>>>,
    len: usize,
}

impl<V> Debug for ChainedMap<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainedMap")
            .field("table_size", &self.slots.len())
            .field("len", &self.len)
            .finish()
    }
}

impl<V> Default for ChainedMap<V> {
    fn default() -> Self {
        Self::with_table_size(DEFAULT_TABLE_SIZE)
    }
}

impl<V> ChainedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with `table_size` buckets (at least one).
    pub fn with_table_size(table_size: usize) -> Self {
        let mut slots = Vec::with_capacity(table_size.max(1));
        slots.resize_with(table_size.max(1), || None);
        Self { slots, len: 0 }
    }

    pub fn table_size(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bucket for `key`: `key mod table_size`, non-negative for negative keys.
    pub fn bucket_of(&self, key: i32) -> usize {
        i64::from(key).rem_euclid(self.slots.len() as i64) as usize
    }

    /// Inserts `value` under `key`.
    ///
    /// Returns `false` and drops `value` when `key` is already present.
    pub fn insert(&mut self, key: i32, value: V) -> bool {
        let bucket = self.bucket_of(key);
        let mut link = &mut self.slots[bucket];
        while let Some(entry) = link {
            if entry.key == key {
                warn!("event=entry_rejected module=chained_map status=duplicate key={key}");
                return false;
            }
            link = &mut entry.next;
        }

        *link = Some(Box::new(ChainedEntry {
            key,
            value,
            next: None,
        }));
        self.len += 1;
        true
    }

    pub fn retrieve(&self, key: i32) -> Option<&V> {
        let mut link = self.slots[self.bucket_of(key)].as_deref();
        while let Some(entry) = link {
            if entry.key == key {
                return Some(&entry.value);
            }
            link = entry.next.as_deref();
        }
        None
    }

    pub fn retrieve_mut(&mut self, key: i32) -> Option<&mut V> {
        let bucket = self.bucket_of(key);
        let mut link = self.slots[bucket].as_deref_mut();
        while let Some(entry) = link {
            if entry.key == key {
                return Some(&mut entry.value);
            }
            link = entry.next.as_deref_mut();
        }
        None
    }

    /// Number of entries chained in `bucket`.
    #[cfg(test)]
    pub(crate) fn chain_len(&self, bucket: usize) -> usize {
        let mut count = 0;
        let mut link = self.slots.get(bucket).and_then(|slot| slot.as_deref());
        while let Some(entry) = link {
            count += 1;
            link = entry.next.as_deref();
        }
        count
    }

    /// Iterates entries in bucket order, then chain order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &V)> + '_ {
        self.slots.iter().flat_map(|slot| {
            let mut link = slot.as_deref();
            std::iter::from_fn(move || {
                let entry = link?;
                link = entry.next.as_deref();
                Some((entry.key, &entry.value))
            })
        })
    }

    /// Walks every chain and releases every entry.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            let mut link = slot.take();
            while let Some(mut entry) = link {
                link = entry.next.take();
            }
        }
        self.len = 0;
    }
}

impl<V> Drop for ChainedMap<V> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{ChainedMap, DEFAULT_TABLE_SIZE};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn colliding_keys_are_all_retrievable_in_any_order() {
        let mut map = ChainedMap::new();
        let keys = [1001, 101, 5001, 1, 301];
        for key in keys {
            assert!(map.insert(key, format!("patron-{key}")));
        }
        assert_eq!(map.chain_len(1), keys.len());
        for key in keys.iter().rev() {
            assert_eq!(map.retrieve(*key), Some(&format!("patron-{key}")));
        }
        assert_eq!(map.len(), keys.len());
    }

    #[test]
    fn duplicate_key_keeps_original_value() {
        let mut map = ChainedMap::new();
        assert!(map.insert(1001, "Mickey"));
        assert!(map.insert(1101, "Minnie"));
        assert!(!map.insert(1001, "Impostor"));
        assert!(!map.insert(1101, "Impostor"));
        assert_eq!(map.retrieve(1001), Some(&"Mickey"));
        assert_eq!(map.retrieve(1101), Some(&"Minnie"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn rejected_value_is_dropped() {
        let drops = Rc::new(Cell::new(0));
        struct Tracked(Rc<Cell<u32>>);
        impl Drop for Tracked {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let mut map = ChainedMap::new();
        map.insert(7, Tracked(drops.clone()));
        map.insert(7, Tracked(drops.clone()));
        assert_eq!(drops.get(), 1);
        drop(map);
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn iteration_follows_bucket_then_chain_order() {
        let mut map = ChainedMap::with_table_size(10);
        map.insert(13, 'a');
        map.insert(3, 'b');
        map.insert(1, 'c');
        map.insert(23, 'd');
        let keys: Vec<i32> = map.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![1, 13, 3, 23]);
    }

    #[test]
    fn negative_keys_hash_into_table() {
        let mut map = ChainedMap::new();
        assert_eq!(map.bucket_of(-1), DEFAULT_TABLE_SIZE - 1);
        assert!(map.insert(-1, "negative"));
        assert_eq!(map.retrieve(-1), Some(&"negative"));
    }

    #[test]
    fn missing_key_is_none_and_mutation_is_in_place() {
        let mut map = ChainedMap::new();
        map.insert(42, 1);
        assert!(map.retrieve(9999).is_none());
        *map.retrieve_mut(42).expect("present") += 1;
        assert_eq!(map.retrieve(42), Some(&2));
    }

    #[test]
    fn clear_empties_every_chain() {
        let mut map = ChainedMap::with_table_size(1);
        for key in 0..5_000 {
            map.insert(key, key);
        }
        assert_eq!(map.chain_len(0), 5_000);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.chain_len(0), 0);
        assert!(map.retrieve(10).is_none());
    }
}

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use log::debug;

/// Memo table with a hard size cap.
///
/// Entries are never evicted one at a time. Once the cap is exceeded the oldest half of the table is dropped in bulk.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    entries: HashMap<K, V>,
    order: VecDeque<K>,
    capacity: usize,
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);

        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.entries.insert(key.clone(), value).is_none() {
            self.order.push_back(key);
        }

        if self.entries.len() > self.capacity {
            self.truncate();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn truncate(&mut self) {
        let retain = self.capacity / 2;
        let dropped = self.order.len() - retain;

        for key in self.order.drain(..dropped) {
            self.entries.remove(&key);
        }

        debug!("Truncated memo table from {} to {} entries", retain + dropped, retain);
    }
}

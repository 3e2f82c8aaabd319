//! Append-only attribute tables
//!
//! Each table hands out a stable index per distinct value, in first-seen
//! order. The value-to-index map lives inside the table so the two can
//! never disagree.

use std::collections::HashMap;
use std::hash::Hash;

/// Ordered set of unique values with O(1) value lookup
#[derive(Debug, Clone)]
pub struct AttributeTable<T> {
    entries: Vec<T>,
    lookup: HashMap<T, u32>,
}

impl<T: Copy + Eq + Hash> AttributeTable<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Index of `value`, appending it on first sight
    pub fn intern(&mut self, value: T) -> u32 {
        if let Some(index) = self.index_of(&value) {
            return index;
        }
        let index = self.entries.len() as u32;
        self.entries.push(value);
        self.lookup.insert(value, index);
        index
    }

    pub fn index_of(&self, value: &T) -> Option<u32> {
        self.lookup.get(value).copied()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Copy + Eq + Hash> Default for AttributeTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

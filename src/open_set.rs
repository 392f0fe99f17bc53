//! Priority-ordered open set with decrease-key support.
//!
//! Entries are grouped into buckets keyed by priority. Within a bucket values leave in the
//! order they arrived, which makes tie-breaking between equal priorities deterministic
//! without needing any ordering on the values themselves.
use crate::error::{GridError, Result};
use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, VecDeque};

/// Totally ordered wrapper around an [f32] priority, using [f32::total_cmp].
#[derive(Clone, Copy, Debug)]
pub struct Priority(pub f32);

impl Eq for Priority {}

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug)]
pub struct OpenSet<V> {
    buckets: BTreeMap<Priority, VecDeque<V>>,
    len: usize,
}

impl<V> Default for OpenSet<V> {
    fn default() -> OpenSet<V> {
        OpenSet {
            buckets: BTreeMap::new(),
            len: 0,
        }
    }
}

impl<V: PartialEq> OpenSet<V> {
    pub fn new() -> OpenSet<V> {
        OpenSet::default()
    }

    /// Adds `value` at the back of the bucket for `priority`.
    pub fn insert(&mut self, priority: f32, value: V) {
        self.buckets
            .entry(Priority(priority))
            .or_default()
            .push_back(value);
        self.len += 1;
    }

    /// Removes the earliest inserted value among those with the smallest priority.
    pub fn extract_min(&mut self) -> Result<V> {
        let mut bucket = self.buckets.first_entry().ok_or(GridError::EmptyOpenSet)?;
        let value = bucket.get_mut().pop_front();
        if bucket.get().is_empty() {
            bucket.remove();
        }
        let value = value.ok_or(GridError::EmptyOpenSet)?;
        self.len -= 1;
        Ok(value)
    }

    /// Moves `value` from the bucket at `old_priority` to the back of the bucket at
    /// `new_priority`. Does nothing if `value` is not stored under `old_priority`, so a
    /// stale priority never produces a duplicate entry. Returns whether the value moved.
    pub fn decrease_key(&mut self, old_priority: f32, new_priority: f32, value: V) -> bool {
        let Entry::Occupied(mut bucket) = self.buckets.entry(Priority(old_priority)) else {
            return false;
        };
        let Some(pos) = bucket.get().iter().position(|v| *v == value) else {
            return false;
        };
        bucket.get_mut().remove(pos);
        if bucket.get().is_empty() {
            bucket.remove();
        }
        self.len -= 1;
        self.insert(new_priority, value);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }
}

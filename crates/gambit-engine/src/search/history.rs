//! History heuristic keyed by board placement.

use std::collections::{HashMap, VecDeque};

use gambit_core::BoardKey;

/// Counts how often a placement was the best child of a resolved node.
///
/// Holds at most `capacity` entries. Inserting a new key into a full table
/// evicts exactly one entry, the oldest inserted (FIFO). Increments of an
/// existing key do not refresh its age.
#[derive(Debug, Clone)]
pub struct HistoryTable {
    counts: HashMap<BoardKey, u32>,
    order: VecDeque<BoardKey>,
    capacity: usize,
}

impl HistoryTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            counts: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Ordering value of `key`, 0 when never rewarded.
    #[inline]
    pub fn get(&self, key: &BoardKey) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Increment the counter for `key`, inserting it at 1 if absent.
    pub fn reward(&mut self, key: BoardKey) {
        if let Some(count) = self.counts.get_mut(&key) {
            *count = count.saturating_add(1);
            return;
        }
        if self.counts.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.counts.remove(&oldest);
            }
        }
        self.counts.insert(key, 1);
        self.order.push_back(key);
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.counts.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use gambit_core::{BoardKey, Position};

    use super::HistoryTable;

    fn keys(n: usize) -> Vec<BoardKey> {
        let root = Position::starting_position();
        root.legal_moves()
            .into_iter()
            .take(n)
            .map(|mv| root.play(mv).key())
            .collect()
    }

    #[test]
    fn missing_keys_read_zero() {
        let table = HistoryTable::new(4);
        assert_eq!(table.get(&Position::starting_position().key()), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn reward_increments() {
        let mut table = HistoryTable::new(4);
        let key = keys(1)[0];
        table.reward(key);
        table.reward(key);
        assert_eq!(table.get(&key), 2);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn full_table_evicts_oldest_only() {
        let keys = keys(5);
        let mut table = HistoryTable::new(3);
        for &key in &keys[..3] {
            table.reward(key);
        }
        table.reward(keys[0]);
        assert_eq!(table.len(), 3);

        table.reward(keys[3]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(&keys[0]), 0);
        assert_eq!(table.get(&keys[1]), 1);

        table.reward(keys[4]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(&keys[1]), 0);
        assert_eq!(table.get(&keys[2]), 1);
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut table = HistoryTable::new(7);
        for key in keys(20) {
            table.reward(key);
            assert!(table.len() <= table.capacity());
        }
        assert_eq!(table.len(), 7);
    }
}

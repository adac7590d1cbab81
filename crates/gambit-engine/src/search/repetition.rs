//! Move lineage and the repetition rule.

use gambit_core::MoveKey;

/// From/to keys of the moves leading to the current node, oldest first.
///
/// Seeded with the game's recent plies and extended by the search as it
/// descends, so the repetition test can look a few plies back across the
/// root.
#[derive(Debug, Clone, Default)]
pub struct Lineage {
    keys: Vec<MoveKey>,
}

impl Lineage {
    pub fn new(prior: &[MoveKey]) -> Self {
        Self { keys: prior.to_vec() }
    }

    #[inline]
    pub fn push(&mut self, key: MoveKey) {
        self.keys.push(key);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<MoveKey> {
        self.keys.pop()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// `true` when playing `candidate` repeats the from/to cycle of the last
    /// plies: with `h` the lineage, `candidate == h[n-4]`,
    /// `h[n-1] == h[n-5]` and `h[n-2] == h[n-6]`.
    pub fn would_repeat(&self, candidate: MoveKey) -> bool {
        let h = &self.keys;
        let n = h.len();
        n >= 6 && candidate == h[n - 4] && h[n - 1] == h[n - 5] && h[n - 2] == h[n - 6]
    }
}

#[cfg(test)]
mod tests {
    use gambit_core::{MoveKey, Square};

    use super::Lineage;

    fn key(from: Square, to: Square) -> MoveKey {
        MoveKey::new(from, to)
    }

    fn shuffle() -> Vec<MoveKey> {
        // Nf3 Nf6 Ng1 Ng8 Nf3 Nf6
        vec![
            key(Square::G1, Square::F3),
            key(Square::G8, Square::F6),
            key(Square::F3, Square::G1),
            key(Square::F6, Square::G8),
            key(Square::G1, Square::F3),
            key(Square::G8, Square::F6),
        ]
    }

    #[test]
    fn completing_the_cycle_repeats() {
        let lineage = Lineage::new(&shuffle());
        assert!(lineage.would_repeat(key(Square::F3, Square::G1)));
        assert!(!lineage.would_repeat(key(Square::F3, Square::E5)));
    }

    #[test]
    fn short_lineage_never_repeats() {
        let lineage = Lineage::new(&shuffle()[..5]);
        assert!(!lineage.would_repeat(key(Square::G8, Square::F6)));
    }

    #[test]
    fn push_pop_track_the_path() {
        let mut lineage = Lineage::new(&shuffle()[..5]);
        assert!(!lineage.would_repeat(key(Square::F3, Square::G1)));
        lineage.push(key(Square::G8, Square::F6));
        assert!(lineage.would_repeat(key(Square::F3, Square::G1)));
        assert_eq!(lineage.pop(), Some(key(Square::G8, Square::F6)));
        assert_eq!(lineage.len(), 5);
    }
}

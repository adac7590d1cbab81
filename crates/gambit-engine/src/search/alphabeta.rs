//! Fail-soft alpha-beta with explicit MAX and MIN roles, plus quiescence.
//!
//! Values are always from the root side's point of view. MAX nodes are the
//! root side to move and read the evaluator directly; MIN nodes negate it.

use std::cmp::Reverse;

use gambit_core::{Move, Position, Side, in_check, legal_captures, legal_moves};

use crate::eval::Evaluator;
use crate::search::SearchStats;
use crate::search::control::SearchControl;
use crate::search::history::HistoryTable;
use crate::search::repetition::Lineage;

/// Magnitude returned for a node with no legal moves.
pub const NO_MOVES_SCORE: i32 = 1_000_000;

/// Window bound; never produced by a resolved node.
pub(crate) const INF: i32 = i32::MAX;

/// Whose turn a node is, relative to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Max,
    Min,
}

impl Role {
    #[inline]
    pub fn flip(self) -> Role {
        match self {
            Role::Max => Role::Min,
            Role::Min => Role::Max,
        }
    }

    /// Worst possible value for this role, the fail-soft starting point.
    #[inline]
    fn worst(self) -> i32 {
        match self {
            Role::Max => -INF,
            Role::Min => INF,
        }
    }
}

/// Value of a node and the move that produced it, when one did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub value: i32,
    pub best: Option<Move>,
}

impl Outcome {
    fn leaf(value: i32) -> Outcome {
        Outcome { value, best: None }
    }
}

/// Result of one sibling scan.
struct Scan {
    value: i32,
    /// Index of the child that set `value`.
    best: Option<usize>,
    /// The deadline stopped the scan before the node was resolved.
    interrupted: bool,
}

impl Scan {
    fn resolved(value: i32, best: Option<usize>) -> Scan {
        Scan { value, best, interrupted: false }
    }

    fn interrupted(value: i32) -> Scan {
        Scan { value, best: None, interrupted: true }
    }
}

/// Mutable state for one depth-limited walk.
pub(crate) struct Walk<'a> {
    pub evaluator: &'a Evaluator,
    pub history: &'a mut HistoryTable,
    pub stats: &'a mut SearchStats,
    pub lineage: Lineage,
    pub control: &'a SearchControl,
    /// When `false` the walk runs to completion regardless of the clock.
    pub enforce_deadline: bool,
    pub stalemate_is_draw: bool,
}

impl Walk<'_> {
    /// Search the root: a MAX node with a full window.
    pub fn root(&mut self, pos: &Position, depth: u8, quiescence: u8) -> Outcome {
        self.expand(pos, depth, quiescence, -INF, INF, Role::Max, true)
    }

    pub fn alpha_beta(
        &mut self,
        pos: &Position,
        depth: u8,
        quiescence: u8,
        alpha: i32,
        beta: i32,
        role: Role,
    ) -> Outcome {
        if depth > 0 {
            return self.expand(pos, depth, quiescence, alpha, beta, role, false);
        }
        if quiescence > 0 {
            let captures = legal_captures(pos);
            if !captures.is_empty() {
                self.stats.non_quiescent += 1;
                let mut children: Vec<(Move, Position)> =
                    captures.into_iter().map(|mv| (mv, pos.play(mv))).collect();
                let stand_pat = self.static_value(pos, role);
                let scan = self.scan(&mut children, 0, quiescence - 1, alpha, beta, role, stand_pat);
                return Outcome::leaf(scan.value);
            }
        }
        Outcome::leaf(self.static_value(pos, role))
    }

    #[allow(clippy::too_many_arguments)]
    fn expand(
        &mut self,
        pos: &Position,
        depth: u8,
        quiescence: u8,
        alpha: i32,
        beta: i32,
        role: Role,
        at_root: bool,
    ) -> Outcome {
        let moves = legal_moves(pos);
        if moves.is_empty() {
            return Outcome::leaf(self.no_moves_value(pos, role));
        }
        self.stats.expanded += 1;

        let mut children: Vec<(Move, Position)> = moves
            .as_slice()
            .iter()
            .filter(|mv| !self.lineage.would_repeat(mv.key()))
            .map(|&mv| (mv, self.child(pos, mv)))
            .collect();

        if children.is_empty() {
            if !at_root {
                return Outcome::leaf(0);
            }
            // Every root move repeats: play on rather than return nothing.
            children = moves.into_iter().map(|mv| (mv, self.child(pos, mv))).collect();
        }

        children.sort_by_key(|(_, child)| Reverse(child.ordering_key()));

        let scan = self.scan(&mut children, depth - 1, quiescence, alpha, beta, role, role.worst());
        if scan.interrupted {
            return Outcome::leaf(scan.value);
        }
        let best = scan.best.map(|i| {
            let (mv, child) = children[i];
            self.history.reward(child.key());
            mv
        });
        Outcome { value: scan.value, best }
    }

    /// Visit `children` left to right from `best`, tightening the window and
    /// stopping at a cutoff or the deadline.
    #[allow(clippy::too_many_arguments)]
    fn scan(
        &mut self,
        children: &mut [(Move, Position)],
        child_depth: u8,
        quiescence: u8,
        mut alpha: i32,
        mut beta: i32,
        role: Role,
        mut best: i32,
    ) -> Scan {
        let mut best_index = None;
        match role {
            Role::Max if best >= beta => return Scan::resolved(best, None),
            Role::Min if best <= alpha => return Scan::resolved(best, None),
            Role::Max => alpha = alpha.max(best),
            Role::Min => beta = beta.min(best),
        }

        for (i, (mv, child)) in children.iter_mut().enumerate() {
            if self.timed_out() {
                return Scan::interrupted(best);
            }

            self.lineage.push(mv.key());
            let value = self.alpha_beta(child, child_depth, quiescence, alpha, beta, role.flip()).value;
            self.lineage.pop();

            // A subtree cut off by the clock has no trustworthy value.
            if self.timed_out() {
                return Scan::interrupted(best);
            }
            child.set_score(value);

            match role {
                Role::Max => {
                    if value > best {
                        best = value;
                        best_index = Some(i);
                    }
                    if best >= beta {
                        self.stats.pruned += 1;
                        break;
                    }
                    alpha = alpha.max(best);
                }
                Role::Min => {
                    if value < best {
                        best = value;
                        best_index = Some(i);
                    }
                    if best <= alpha {
                        self.stats.pruned += 1;
                        break;
                    }
                    beta = beta.min(best);
                }
            }
        }
        Scan::resolved(best, best_index)
    }

    #[inline]
    fn timed_out(&self) -> bool {
        self.enforce_deadline && self.control.expired()
    }

    fn child(&self, pos: &Position, mv: Move) -> Position {
        let mut child = pos.play(mv);
        child.set_ordering_key(self.history.get(&child.key()));
        child
    }

    #[inline]
    fn static_value(&self, pos: &Position, role: Role) -> i32 {
        let value = self.evaluator.evaluate(pos);
        match role {
            Role::Max => value,
            Role::Min => -value,
        }
    }

    fn no_moves_value(&self, pos: &Position, role: Role) -> i32 {
        if self.stalemate_is_draw && !in_check(pos, Side::Own) {
            return 0;
        }
        match role {
            Role::Max => -NO_MOVES_SCORE,
            Role::Min => NO_MOVES_SCORE,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use gambit_core::Position;

    use super::*;
    use crate::config::EngineConfig;

    fn walk_value(fen: &str, depth: u8, quiescence: u8, stalemate_is_draw: bool) -> Outcome {
        let pos: Position = fen.parse().unwrap();
        let evaluator = Evaluator::new(&EngineConfig::default());
        let mut history = HistoryTable::new(1024);
        let mut stats = SearchStats::default();
        let control = SearchControl::unbounded();
        let mut walk = Walk {
            evaluator: &evaluator,
            history: &mut history,
            stats: &mut stats,
            lineage: Lineage::default(),
            control: &control,
            enforce_deadline: true,
            stalemate_is_draw,
        };
        walk.root(&pos, depth, quiescence)
    }

    #[test]
    fn mate_in_one_reaches_the_sentinel() {
        // Back-rank mate: Ra8#.
        let outcome = walk_value("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 2, 0, false);
        assert_eq!(outcome.value, NO_MOVES_SCORE);
        assert_eq!(outcome.best.map(|mv| mv.to().to_string()), Some("a8".to_string()));
    }

    #[test]
    fn stalemate_conflated_with_mate_by_default() {
        let fen = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1";
        let outcome = walk_value(fen, 1, 0, false);
        assert_eq!(outcome.value, -NO_MOVES_SCORE);
        assert_eq!(outcome.best, None);

        let outcome = walk_value(fen, 1, 0, true);
        assert_eq!(outcome.value, 0);
    }

    #[test]
    fn quiescence_sees_the_recapture() {
        // Qxd5 looks like a free pawn until the recapture exd5 is seen.
        let fen = "4k3/8/4p3/3p4/8/8/8/3QK3 w - - 0 1";
        let flat = walk_value(fen, 1, 0, false);
        let extended = walk_value(fen, 1, 4, false);
        assert!(extended.value < flat.value);
    }

    #[test]
    fn expired_walk_rewards_nothing() {
        let pos = Position::starting_position();
        let evaluator = Evaluator::new(&EngineConfig::default());
        let mut history = HistoryTable::new(1024);
        let mut stats = SearchStats::default();
        let control = SearchControl::new(Duration::ZERO);
        let outcome = Walk {
            evaluator: &evaluator,
            history: &mut history,
            stats: &mut stats,
            lineage: Lineage::default(),
            control: &control,
            enforce_deadline: true,
            stalemate_is_draw: false,
        }
        .root(&pos, 3, 4);

        assert_eq!(outcome.best, None);
        assert!(history.is_empty());
        assert_eq!(stats.pruned, 0);
    }

    #[test]
    fn role_flip() {
        assert_eq!(Role::Max.flip(), Role::Min);
        assert_eq!(Role::Min.flip(), Role::Max);
    }
}

//! Iterative-deepening search driver.

pub mod alphabeta;
pub mod control;
pub mod history;
pub mod repetition;

use tracing::{debug, trace};

use gambit_core::{Move, MoveKey, Position};

use crate::config::EngineConfig;
use crate::eval::Evaluator;

use alphabeta::{Outcome, Walk};
use control::SearchControl;
use history::HistoryTable;
use repetition::Lineage;

/// Result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move of the deepest completed depth. `None` when the root has no
    /// legal moves.
    pub best_move: Option<Move>,
    /// Value of the root from the mover's perspective.
    pub score: i32,
    /// Deepest completed depth.
    pub depth: u8,
}

/// Counters kept across turns until [`Searcher::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Sibling scans cut short by an alpha or beta cutoff.
    pub pruned: u64,
    /// Nodes whose legal moves were generated and searched.
    pub expanded: u64,
    /// Depth-0 nodes extended over captures.
    pub non_quiescent: u64,
    /// Deepest depth ever completed.
    pub deepest: u8,
}

/// Iterative-deepening alpha-beta searcher with a persistent history table.
#[derive(Debug, Clone)]
pub struct Searcher {
    config: EngineConfig,
    evaluator: Evaluator,
    history: HistoryTable,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            evaluator: Evaluator::new(&config),
            history: HistoryTable::new(config.history_max_size),
            stats: SearchStats::default(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn history(&self) -> &HistoryTable {
        &self.history
    }

    /// Forget the history table and zero the statistics.
    pub fn reset(&mut self) {
        self.history.clear();
        self.stats = SearchStats::default();
    }

    fn walk(
        &mut self,
        root: &Position,
        lineage: &[MoveKey],
        depth: u8,
        control: &SearchControl,
        enforce_deadline: bool,
    ) -> Outcome {
        let mut walk = Walk {
            evaluator: &self.evaluator,
            history: &mut self.history,
            stats: &mut self.stats,
            lineage: Lineage::new(lineage),
            control,
            enforce_deadline,
            stalemate_is_draw: self.config.stalemate_is_draw,
        };
        walk.root(root, depth, self.config.quiescence_depth)
    }

    /// One complete walk at exactly `depth`, ignoring the clock.
    pub fn search_depth(&mut self, root: &Position, lineage: &[MoveKey], depth: u8) -> SearchResult {
        let outcome = self.walk(root, lineage, depth.max(1), &SearchControl::unbounded(), false);
        SearchResult {
            best_move: outcome.best,
            score: outcome.value,
            depth: depth.max(1),
        }
    }

    /// Search depths 1 through `max_depth` until `control` expires. A
    /// `max_depth` of 0 is treated as 1.
    ///
    /// Depth 1 always runs to completion so a position with legal moves
    /// always yields one. Any later depth during or after which the deadline
    /// passes is discarded and the previous depth's move stands.
    pub fn id_search(&mut self, root: &Position, lineage: &[MoveKey], control: &SearchControl) -> SearchResult {
        let mut completed = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
        };

        for depth in 1..=self.config.max_depth.max(1) {
            let enforce = depth > 1;
            if enforce && control.expired() {
                break;
            }

            let outcome = self.walk(root, lineage, depth, control, enforce);
            if enforce && control.expired() {
                trace!(depth, "discarding incomplete depth");
                break;
            }

            completed = SearchResult {
                best_move: outcome.best,
                score: outcome.value,
                depth,
            };
            self.stats.deepest = self.stats.deepest.max(depth);
            debug!(
                depth,
                score = outcome.value,
                expanded = self.stats.expanded,
                pruned = self.stats.pruned,
                best = ?outcome.best.map(|mv| mv.to_string()),
                "completed depth"
            );

            if outcome.best.is_none() {
                break;
            }
        }
        completed
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use gambit_core::{Position, Square};

    use super::*;
    use crate::search::alphabeta::NO_MOVES_SCORE;

    fn config(max_depth: u8) -> EngineConfig {
        EngineConfig { max_depth, ..EngineConfig::default() }
    }

    #[test]
    fn depth_1_returns_legal_move() {
        let pos = Position::starting_position();
        let mut searcher = Searcher::new(config(1));
        let result = searcher.id_search(&pos, &[], &SearchControl::unbounded());
        let best = result.best_move.unwrap();
        assert!(pos.legal_moves().as_slice().contains(&best));
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn expired_clock_still_completes_depth_1() {
        let pos = Position::starting_position();
        let mut searcher = Searcher::new(config(6));
        let result = searcher.id_search(&pos, &[], &SearchControl::new(Duration::ZERO));
        assert_eq!(result.depth, 1);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn zero_max_depth_still_moves() {
        let pos = Position::starting_position();
        let mut searcher = Searcher::new(config(0));
        let result = searcher.id_search(&pos, &[], &SearchControl::unbounded());
        assert_eq!(result.depth, 1);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn finds_back_rank_mate() {
        let pos: Position = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1".parse().unwrap();
        let mut searcher = Searcher::new(config(3));
        let result = searcher.id_search(&pos, &[], &SearchControl::unbounded());
        assert_eq!(result.best_move.map(|mv| mv.to()), Some(Square::A8));
        assert_eq!(result.score, NO_MOVES_SCORE);
    }

    #[test]
    fn checkmated_root_has_no_move() {
        let pos: Position = "7k/6Q1/5K2/8/8/8/8/8 b - - 0 1".parse().unwrap();
        let mut searcher = Searcher::new(config(4));
        let result = searcher.id_search(&pos, &[], &SearchControl::unbounded());
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -NO_MOVES_SCORE);
    }

    #[test]
    fn captures_hanging_queen() {
        let pos: Position = "4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1".parse().unwrap();
        let mut searcher = Searcher::new(config(2));
        let result = searcher.id_search(&pos, &[], &SearchControl::unbounded());
        assert_eq!(result.best_move.map(|mv| mv.to()), Some(Square::D5));
    }

    #[test]
    fn stats_accumulate_until_reset() {
        let pos = Position::starting_position();
        let mut searcher = Searcher::new(config(3));
        searcher.id_search(&pos, &[], &SearchControl::unbounded());
        let first = searcher.stats();
        assert_eq!(first.deepest, 3);
        assert!(first.expanded > 0 && first.pruned > 0);
        assert!(!searcher.history().is_empty());

        searcher.id_search(&pos, &[], &SearchControl::unbounded());
        assert!(searcher.stats().expanded > first.expanded);

        searcher.reset();
        assert_eq!(searcher.stats(), SearchStats::default());
        assert!(searcher.history().is_empty());
    }
}

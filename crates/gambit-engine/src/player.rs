//! Turn driver: snapshot in, chosen move out.

use std::fmt;
use std::time::Duration;

use tracing::{info, warn};

use gambit_core::{GameSnapshot, Move, PieceKind};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::search::Searcher;
use crate::search::control::SearchControl;
use crate::time::TimeManager;

/// Tablebases are only consulted with this many pieces or fewer on the board.
pub const TABLEBASE_MAX_PIECES: u32 = 5;

/// A move in the shell's coordinates: file letters and one-based ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChosenMove {
    pub from_file: char,
    pub from_rank: u8,
    pub to_file: char,
    pub to_rank: u8,
    /// Always `Some(Queen)` for a promotion.
    pub promotion: Option<PieceKind>,
}

impl From<Move> for ChosenMove {
    fn from(mv: Move) -> Self {
        ChosenMove {
            from_file: mv.from().file_char(),
            from_rank: mv.from().rank() + 1,
            to_file: mv.to().file_char(),
            to_rank: mv.to().rank() + 1,
            promotion: mv.is_promotion().then_some(PieceKind::Queen),
        }
    }
}

impl fmt::Display for ChosenMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.from_file, self.from_rank, self.to_file, self.to_rank)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.fen_char())?;
        }
        Ok(())
    }
}

/// An endgame tablebase that may answer instead of the search.
pub trait TablebaseProbe {
    /// Look up the position given as FEN. `None` when the position is not
    /// covered or the lookup failed.
    fn probe(&self, fen: &str) -> Option<ChosenMove>;
}

/// The default probe: never answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTablebase;

impl TablebaseProbe for NoTablebase {
    fn probe(&self, _fen: &str) -> Option<ChosenMove> {
        None
    }
}

/// Plays one side of a game, one [`choose_move`](Player::choose_move) per turn.
pub struct Player {
    searcher: Searcher,
    time: TimeManager,
    tablebase: Box<dyn TablebaseProbe>,
}

impl Player {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            time: TimeManager::new(&config),
            searcher: Searcher::new(config),
            tablebase: Box::new(NoTablebase),
        })
    }

    pub fn with_tablebase(mut self, tablebase: Box<dyn TablebaseProbe>) -> Self {
        self.tablebase = tablebase;
        self
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    pub fn config(&self) -> &EngineConfig {
        self.searcher.config()
    }

    /// Pick a move for the side to move in `snapshot`.
    ///
    /// Returns `Ok(None)` when that side has no legal move.
    pub fn choose_move(&mut self, snapshot: &GameSnapshot) -> Result<Option<ChosenMove>, EngineError> {
        let (root, lineage) = snapshot.root()?;

        if self.config().use_endgame_tables && root.piece_count() <= TABLEBASE_MAX_PIECES {
            match self.tablebase.probe(&snapshot.fen) {
                Some(chosen) => {
                    info!(%chosen, "tablebase move");
                    return Ok(Some(chosen));
                }
                None => warn!(fen = %snapshot.fen, "tablebase had no answer, searching"),
            }
        }

        let budget = self.time.slice(Duration::from_nanos(snapshot.time_remaining_ns));
        let control = SearchControl::new(budget);
        let result = self.searcher.id_search(&root, &lineage, &control);
        let stats = self.searcher.stats();

        let chosen = result.best_move.map(ChosenMove::from);
        info!(
            chosen = ?chosen.map(|mv| mv.to_string()),
            score = result.score,
            depth = result.depth,
            budget_ms = budget.as_millis() as u64,
            elapsed_ms = control.elapsed().as_millis() as u64,
            expanded = stats.expanded,
            pruned = stats.pruned,
            non_quiescent = stats.non_quiescent,
            "chose move"
        );
        Ok(chosen)
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("searcher", &self.searcher)
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}

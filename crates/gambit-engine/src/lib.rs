//! Search and evaluation for gambit.

pub mod config;
pub mod error;
pub mod eval;
pub mod player;
pub mod search;
pub mod time;

pub use config::{ConfigError, EngineConfig};
pub use error::EngineError;
pub use eval::Evaluator;
pub use player::{ChosenMove, NoTablebase, Player, TABLEBASE_MAX_PIECES, TablebaseProbe};
pub use search::alphabeta::{NO_MOVES_SCORE, Role};
pub use search::control::SearchControl;
pub use search::history::HistoryTable;
pub use search::repetition::Lineage;
pub use search::{SearchResult, SearchStats, Searcher};
pub use time::TimeManager;

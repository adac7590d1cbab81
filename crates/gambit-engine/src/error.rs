//! Turn driver errors.

use gambit_core::SnapshotError;

use crate::config::ConfigError;

/// Errors that can stop the engine from producing a move.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The snapshot handed over by the shell does not describe a playable board.
    #[error("bad game snapshot: {source}")]
    Snapshot {
        #[from]
        source: SnapshotError,
    },

    /// The tunables are inconsistent.
    #[error("bad engine configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}

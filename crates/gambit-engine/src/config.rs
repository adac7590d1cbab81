//! Engine tunables.
//!
//! Every weight the evaluator and search read lives here. The turn shell
//! configures them by `name = value` pairs using lowercase names such as
//! `queenval` or `maxdepth`.

use tracing::{debug, warn};

use gambit_core::PieceKind;

/// Errors raised while configuring the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The name is not one of the known tunables.
    #[error("unknown configuration name \"{name}\"")]
    UnknownName { name: String },

    /// The value could not be parsed for the tunable's type.
    #[error("invalid value \"{value}\" for {name}")]
    InvalidValue { name: String, value: String },

    #[error("maximum depth must be at least 1")]
    ZeroDepth,

    #[error("history table size must be at least 1")]
    ZeroHistorySize,

    /// The moves estimate must leave room above the threshold.
    #[error("moves estimate {estimate} must exceed moves threshold {threshold}")]
    EstimateBelowThreshold { estimate: u32, threshold: u32 },
}

/// Immutable weights and limits shared by [`Evaluator`](crate::Evaluator)
/// and [`Searcher`](crate::Searcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub king_value: i32,
    pub queen_value: i32,
    pub rook_value: i32,
    pub knight_value: i32,
    pub bishop_value: i32,
    pub pawn_value: i32,
    /// Charged per blocked, doubled or isolated pawn.
    pub pawn_penalty: i32,
    /// Weight of the pseudo-legal move count difference. Zero disables it.
    pub mobility_weight: i32,
    pub moves_threshold: u32,
    pub moves_estimate: u32,
    pub max_depth: u8,
    pub history_max_size: usize,
    pub quiescence_depth: u8,
    pub use_endgame_tables: bool,
    /// Piece-square table weight in percent.
    pub pst_weight: i32,
    /// Score a position with no legal moves and no check as a draw.
    pub stalemate_is_draw: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            king_value: 20_000,
            queen_value: 900,
            rook_value: 500,
            knight_value: 320,
            bishop_value: 330,
            pawn_value: 100,
            pawn_penalty: 15,
            mobility_weight: 0,
            moves_threshold: 10,
            moves_estimate: 40,
            max_depth: 6,
            history_max_size: 65_536,
            quiescence_depth: 4,
            use_endgame_tables: false,
            pst_weight: 100,
            stalemate_is_draw: false,
        }
    }
}

impl EngineConfig {
    /// Material weight of `kind`.
    pub fn piece_value(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => self.pawn_value,
            PieceKind::Knight => self.knight_value,
            PieceKind::Bishop => self.bishop_value,
            PieceKind::Rook => self.rook_value,
            PieceKind::Queen => self.queen_value,
            PieceKind::King => self.king_value,
        }
    }

    /// Assign one tunable by its configuration name.
    ///
    /// Numeric values are parsed as integers. Flags accept `0`/`1` as well as
    /// `true`/`false`.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match name.trim().to_ascii_lowercase().as_str() {
            "kingval" => self.king_value = parse(name, value)?,
            "queenval" => self.queen_value = parse(name, value)?,
            "rookval" => self.rook_value = parse(name, value)?,
            "knightval" => self.knight_value = parse(name, value)?,
            "bishopval" => self.bishop_value = parse(name, value)?,
            "pawnval" => self.pawn_value = parse(name, value)?,
            "pawnpenalty" => self.pawn_penalty = parse(name, value)?,
            "mobpenalty" => self.mobility_weight = parse(name, value)?,
            "movesthreshold" => self.moves_threshold = parse(name, value)?,
            "movesestimate" => self.moves_estimate = parse(name, value)?,
            "maxdepth" => self.max_depth = parse(name, value)?,
            "histtablemaxsz" => self.history_max_size = parse(name, value)?,
            "quiescencedepth" => self.quiescence_depth = parse(name, value)?,
            "useendgametables" => self.use_endgame_tables = parse_flag(name, value)?,
            "pstweight" => self.pst_weight = parse(name, value)?,
            "stalemateisdraw" => self.stalemate_is_draw = parse_flag(name, value)?,
            _ => return Err(ConfigError::UnknownName { name: name.to_string() }),
        }
        debug!(name, value, "assigned tunable");
        Ok(())
    }

    /// Build a configuration from defaults plus `name = value` pairs.
    ///
    /// Unknown names are logged and skipped; malformed values and an
    /// inconsistent result are errors.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<EngineConfig, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = EngineConfig::default();
        for (name, value) in pairs {
            match config.set(name, value) {
                Err(ConfigError::UnknownName { name }) => warn!(%name, "ignoring unknown tunable"),
                other => other?,
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.history_max_size == 0 {
            return Err(ConfigError::ZeroHistorySize);
        }
        if self.moves_estimate <= self.moves_threshold {
            return Err(ConfigError::EstimateBelowThreshold {
                estimate: self.moves_estimate,
                threshold: self.moves_threshold,
            });
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        config.validate().unwrap();
        assert_eq!(config.piece_value(PieceKind::Queen), 900);
        assert_eq!(config.piece_value(PieceKind::King), 20_000);
        assert!(!config.stalemate_is_draw);
    }

    #[test]
    fn set_by_name() {
        let mut config = EngineConfig::default();
        config.set("queenval", "950").unwrap();
        config.set("MaxDepth", " 4 ").unwrap();
        config.set("useendgametables", "1").unwrap();
        config.set("stalemateisdraw", "true").unwrap();
        assert_eq!(config.queen_value, 950);
        assert_eq!(config.max_depth, 4);
        assert!(config.use_endgame_tables);
        assert!(config.stalemate_is_draw);
    }

    #[test]
    fn set_rejects_bad_input() {
        let mut config = EngineConfig::default();
        assert_eq!(
            config.set("rookvalue", "1"),
            Err(ConfigError::UnknownName { name: "rookvalue".to_string() })
        );
        assert!(matches!(config.set("maxdepth", "deep"), Err(ConfigError::InvalidValue { .. })));
        assert!(matches!(config.set("maxdepth", "-1"), Err(ConfigError::InvalidValue { .. })));
        assert!(matches!(config.set("useendgametables", "maybe"), Err(ConfigError::InvalidValue { .. })));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn from_pairs_skips_unknown_names() {
        let config = EngineConfig::from_pairs([("pawnval", "90"), ("nonsense", "3")]).unwrap();
        assert_eq!(config.pawn_value, 90);
    }

    #[test]
    fn validate_rejects_inconsistent_limits() {
        let config = EngineConfig { max_depth: 0, ..EngineConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDepth));

        let config = EngineConfig { history_max_size: 0, ..EngineConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroHistorySize));

        assert_eq!(
            EngineConfig::from_pairs([("movesestimate", "10")]),
            Err(ConfigError::EstimateBelowThreshold { estimate: 10, threshold: 10 })
        );
    }
}

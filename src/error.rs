use std::path::PathBuf;

/// Errors returned by [`Board::apply`](crate::game::Board::apply) and
/// [`Board::undo`](crate::game::Board::undo).
///
/// These are caller-input errors: the front-end is expected to report or
/// ignore them, never to retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is out of range")]
    InvalidColumn { column: usize },

    #[error("no move to undo")]
    EmptyHistory,

    #[error("the game is already over")]
    GameOver,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        assert_eq!(
            MoveError::ColumnFull { column: 3 }.to_string(),
            "column 3 is full"
        );
        assert_eq!(
            MoveError::InvalidColumn { column: 9 }.to_string(),
            "column 9 is out of range"
        );
        assert_eq!(MoveError::EmptyHistory.to_string(), "no move to undo");
        assert_eq!(MoveError::GameOver.to_string(), "the game is already over");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("search.time_budget_ms must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: search.time_budget_ms must be > 0"
        );
    }
}

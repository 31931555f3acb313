use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::grid::Vector2i;

/// Errors raised while building a session or loading its configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size {grid_size} is too small, need at least 2 cells per side")]
    GridTooSmall { grid_size: u16 },

    #[error("snake body must contain at least one segment")]
    EmptyBody,

    #[error("initial length {initial_length} does not fit a {grid_size}-cell column")]
    BodyTooLong { initial_length: u16, grid_size: u16 },

    #[error("cell ({}, {}) lies outside a {grid_size}x{grid_size} grid", .cell.x, .cell.y)]
    CellOutOfBounds { cell: Vector2i, grid_size: u16 },

    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no room for the initial food")]
    NoRoomForFood(#[from] SpawnError),
}

impl From<ConfigError> for io::Error {
    fn from(error: ConfigError) -> Self {
        let kind = match error {
            ConfigError::Read { ref source, .. } => source.kind(),
            ConfigError::Parse(_) => io::ErrorKind::InvalidData,
            _ => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, error)
    }
}

/// Raw input that does not name one of the four headings.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unrecognized heading {input:?}")]
pub struct HeadingParseError {
    pub input: String,
}

/// Food placement failures.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SpawnError {
    #[error("no free cell left on a {grid_size}x{grid_size} board")]
    BoardFull { grid_size: u16 },
}

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported puzzle size {size}, expected one of 2, 3, 4")]
    UnsupportedPuzzleSize { size: usize },

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("unknown heuristic {0:?}")]
    UnknownHeuristic(String),

    /// The frontier ran dry. Expected for unsolvable inputs.
    #[error("no solution found after {expanded} expansions")]
    NotFound { expanded: usize },

    #[error("gave up after {limit} expansions")]
    ExpansionLimit { limit: usize },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("unrecognized puzzle set file name {0:?}")]
    SetFileName(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

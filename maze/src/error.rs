use thiserror::Error;

use solver::InputError;

/// Problems with a maze description or its encoding
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("missing header line {0} (nodes, treasures, step bound)")]
    MissingHeader(usize),

    #[error("line 3: `{0}` is not a valid step bound")]
    InvalidStepBound(String),

    #[error("there is no START node")]
    MissingStart,

    #[error("line {line}: unknown node `{node}`")]
    UnknownNode { line: usize, node: String },

    #[error("line {line}: unknown treasure `{treasure}`")]
    UnknownTreasure { line: usize, treasure: String },

    #[error("line {line}: `{name}` is declared twice")]
    Duplicate { line: usize, name: String },

    #[error("line {line}: expected keyword `{keyword}`")]
    MissingKeyword { line: usize, keyword: &'static str },

    #[error("proposition `{0}` has no atom number")]
    Unnumbered(String),

    #[error(transparent)]
    Input(#[from] InputError),
}

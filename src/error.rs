use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("failed to allocate transposition table with {entries} entries")]
    TableAllocation { entries: usize },

    #[error("transposition table requested but none was allocated")]
    TableUnavailable,

    #[error("hash bits must be in 1..=32, got {0}")]
    InvalidHashBits(u32),

    #[error("move index {index} out of range for {moves_per_state} moves per state")]
    InvalidMove { index: usize, moves_per_state: usize },

    #[error("{moves_per_state} moves per state is incompatible with a mixing table of {diffs} entries")]
    InvalidBranchingFactor { moves_per_state: usize, diffs: usize },

    #[error("requested depth {depth} exceeds configured maximum {max_depth}")]
    DepthTooLarge { depth: u32, max_depth: u32 },
}

pub type Result<T> = std::result::Result<T, SearchError>;

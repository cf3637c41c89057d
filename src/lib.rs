pub mod board;
pub mod config;
pub mod error;
pub mod movegen;
pub mod search;
pub mod transposition;

pub use board::{Player, State};
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use movegen::{Move, MoveGenerator};
pub use search::{Search, SearchResult, SearchStats};
pub use transposition::{TranspositionEntry, TranspositionTable};

/// Root position of the benchmark run.
pub const BENCHMARK_STATE: State = State::new(4923481029348345);

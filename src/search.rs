use crate::board::State;
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::movegen::{Move, MoveGenerator};
use crate::transposition::TranspositionTable;
use std::time::{Duration, Instant};

/// Initial window, matching the range of leaf values.
pub const MIN_VALUE: u8 = 0;
pub const MAX_VALUE: u8 = u8::MAX;

/// Counters accumulated over one top-level search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Interior nodes expanded; leaves are not counted.
    pub nodes: u64,
    pub cache_hits: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub root_value: u8,
    /// `None` when the root is a leaf.
    pub best_move: Option<Move>,
    pub depth: u32,
    pub nodes: u64,
    pub cache_hits: u64,
    pub elapsed: Duration,
}

impl SearchResult {
    pub fn hit_rate(&self) -> f64 {
        if self.nodes == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.nodes as f64
        }
    }
}

pub struct Search {
    move_generator: MoveGenerator,
    transposition_table: Option<TranspositionTable>,
    max_depth: u32,
}

impl Search {
    pub fn new(
        move_generator: MoveGenerator,
        transposition_table: Option<TranspositionTable>,
        max_depth: u32,
    ) -> Self {
        Self {
            move_generator,
            transposition_table,
            max_depth,
        }
    }

    /// Validates `config` and allocates the table when it is enabled.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        let move_generator = config.move_generator()?;
        let transposition_table = if config.use_table {
            Some(TranspositionTable::new(config.hash_bits)?)
        } else {
            None
        };
        Ok(Self::new(move_generator, transposition_table, config.max_depth))
    }

    pub fn move_generator(&self) -> &MoveGenerator {
        &self.move_generator
    }

    pub fn transposition_table(&self) -> Option<&TranspositionTable> {
        self.transposition_table.as_ref()
    }

    pub fn clear_table(&mut self) {
        if let Some(table) = self.transposition_table.as_mut() {
            table.clear();
        }
    }

    /// Searches to the configured maximum depth, using the table if one was
    /// allocated.
    pub fn search(&mut self, state: State) -> Result<SearchResult> {
        let use_table = self.transposition_table.is_some();
        self.run(state, self.max_depth, use_table)
    }

    /// Searches `state` to `depth` plies. The table is not cleared between
    /// runs; call [`Search::clear_table`] for an isolated measurement.
    pub fn run(&mut self, state: State, depth: u32, use_table: bool) -> Result<SearchResult> {
        if depth > self.max_depth {
            return Err(SearchError::DepthTooLarge {
                depth,
                max_depth: self.max_depth,
            });
        }
        let table = if use_table {
            Some(
                self.transposition_table
                    .as_mut()
                    .ok_or(SearchError::TableUnavailable)?,
            )
        } else {
            None
        };

        log::debug!(
            "search start: state {:#018x}, depth {}, table {}",
            state.data(),
            depth,
            use_table
        );

        let start_time = Instant::now();
        let mut stats = SearchStats::default();
        let (root_value, best_move) = alpha_beta(
            &self.move_generator,
            table,
            state,
            depth,
            MIN_VALUE,
            MAX_VALUE,
            &mut stats,
        );
        let elapsed = start_time.elapsed();

        log::debug!(
            "search done: value {}, nodes {}, cache hits {}, {:?}",
            root_value,
            stats.nodes,
            stats.cache_hits,
            elapsed
        );

        Ok(SearchResult {
            root_value,
            best_move,
            depth,
            nodes: stats.nodes,
            cache_hits: stats.cache_hits,
            elapsed,
        })
    }

    /// Exhaustive minimax without pruning or table.
    pub fn minimax(&self, state: State, depth: u32) -> u8 {
        minimax(&self.move_generator, state, depth)
    }
}

/// Alpha-beta over `[alpha, beta]`. Player A maximises, player B minimises.
///
/// A table hit is a full cutoff: the cached value is returned whatever depth
/// or window it was computed under. On ties the later move wins `best_move`.
pub fn alpha_beta(
    move_generator: &MoveGenerator,
    mut table: Option<&mut TranspositionTable>,
    state: State,
    depth: u32,
    mut alpha: u8,
    mut beta: u8,
    stats: &mut SearchStats,
) -> (u8, Option<Move>) {
    if depth == 0 {
        return (state.value(), None);
    }

    stats.nodes += 1;

    let key = match table.as_deref() {
        Some(table) => {
            let key = table.key(&state);
            if let Some(entry) = table.lookup(key) {
                stats.cache_hits += 1;
                return (entry.value(), Some(entry.best_move()));
            }
            Some(key)
        }
        None => None,
    };

    let maximizing = state.player_to_move().is_maximizing();
    let mut best_move = Move::new(0);

    for mv in move_generator.generate_moves(&state) {
        let child = move_generator.successor(state, mv);
        let (value, _) = alpha_beta(
            move_generator,
            table.as_deref_mut(),
            child,
            depth - 1,
            alpha,
            beta,
            stats,
        );

        if maximizing {
            if value >= alpha {
                alpha = value;
                best_move = mv;
            }
        } else if value <= beta {
            beta = value;
            best_move = mv;
        }

        if beta <= alpha {
            break;
        }
    }

    let value = if maximizing { alpha } else { beta };

    if let (Some(table), Some(key)) = (table, key) {
        table.insert(key, value, best_move);
    }

    (value, Some(best_move))
}

pub fn minimax(move_generator: &MoveGenerator, state: State, depth: u32) -> u8 {
    if depth == 0 {
        return state.value();
    }

    let values = move_generator
        .generate_moves(&state)
        .map(|mv| minimax(move_generator, move_generator.successor(state, mv), depth - 1));

    if state.player_to_move().is_maximizing() {
        values.max().unwrap_or(MIN_VALUE)
    } else {
        values.min().unwrap_or(MAX_VALUE)
    }
}

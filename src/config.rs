use crate::error::{Result, SearchError};
use crate::movegen::{MoveGenerator, DEFAULT_DIFFS};
use crate::transposition::{DEFAULT_HASH_BITS, MAX_HASH_BITS};

pub const DEFAULT_MAX_DEPTH: u32 = 15;
pub const MAX_SEARCH_DEPTH: u32 = 64;

/// Knobs fixed for the lifetime of a [`Search`](crate::search::Search).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub hash_bits: u32,
    pub moves_per_state: usize,
    pub diffs: Vec<u32>,
    pub max_depth: u32,
    pub use_table: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            hash_bits: DEFAULT_HASH_BITS,
            moves_per_state: 4,
            diffs: DEFAULT_DIFFS.to_vec(),
            max_depth: DEFAULT_MAX_DEPTH,
            use_table: true,
        }
    }
}

impl SearchConfig {
    pub fn with_hash_bits(mut self, hash_bits: u32) -> Self {
        self.hash_bits = hash_bits;
        self
    }

    pub fn with_moves_per_state(mut self, moves_per_state: usize) -> Self {
        self.moves_per_state = moves_per_state;
        self
    }

    pub fn with_diffs(mut self, diffs: &[u32]) -> Self {
        self.diffs = diffs.to_vec();
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_table(mut self, use_table: bool) -> Self {
        self.use_table = use_table;
        self
    }

    /// Checks every knob without allocating anything.
    pub fn validate(&self) -> Result<()> {
        if self.hash_bits == 0 || self.hash_bits > MAX_HASH_BITS {
            return Err(SearchError::InvalidHashBits(self.hash_bits));
        }
        if self.max_depth > MAX_SEARCH_DEPTH {
            return Err(SearchError::DepthTooLarge {
                depth: self.max_depth,
                max_depth: MAX_SEARCH_DEPTH,
            });
        }
        self.move_generator().map(|_| ())
    }

    pub fn move_generator(&self) -> Result<MoveGenerator> {
        MoveGenerator::new(self.moves_per_state, &self.diffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.hash_bits, 28);
        assert_eq!(config.moves_per_state, 4);
        assert_eq!(config.max_depth, 15);
    }

    #[test]
    fn test_rejects_bad_hash_bits() {
        let config = SearchConfig::default().with_hash_bits(40);
        assert_eq!(config.validate(), Err(SearchError::InvalidHashBits(40)));
    }

    #[test]
    fn test_rejects_branching_factor_larger_than_diffs() {
        let config = SearchConfig::default()
            .with_moves_per_state(3)
            .with_diffs(&[2, 3, 5, 7]);
        assert_eq!(
            config.validate(),
            Err(SearchError::InvalidBranchingFactor {
                moves_per_state: 3,
                diffs: 4
            })
        );
    }

    #[test]
    fn test_rejects_excessive_depth() {
        let config = SearchConfig::default().with_max_depth(MAX_SEARCH_DEPTH + 1);
        assert!(matches!(
            config.validate(),
            Err(SearchError::DepthTooLarge { .. })
        ));
    }
}

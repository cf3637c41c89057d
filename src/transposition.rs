use crate::board::State;
use crate::error::{Result, SearchError};
use crate::movegen::Move;

pub const DEFAULT_HASH_BITS: u32 = 28;
pub const MAX_HASH_BITS: u32 = 32;

const OCCUPIED: u8 = 1 << 7;

/// Two bytes: the cached value and the best move, whose top bit doubles as
/// the occupied flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranspositionEntry {
    value: u8,
    packed_move: u8,
}

impl TranspositionEntry {
    pub const EMPTY: TranspositionEntry = TranspositionEntry {
        value: 0,
        packed_move: 0,
    };

    fn occupied(value: u8, best_move: Move) -> Self {
        Self {
            value,
            packed_move: (best_move.index() as u8) | OCCUPIED,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.packed_move & OCCUPIED != 0
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn best_move(&self) -> Move {
        Move::new(self.packed_move & !OCCUPIED)
    }
}

/// Direct-mapped cache addressed by the low `hash_bits` bits of a state.
///
/// There is no verification key: two states sharing their low bits share a
/// slot, and the last write wins. Entries carry neither depth nor bound
/// information, so a hit may return a value searched to a different depth or
/// under a different window.
pub struct TranspositionTable {
    entries: Vec<TranspositionEntry>,
    hash_bits: u32,
    mask: u64,
}

impl TranspositionTable {
    pub fn new(hash_bits: u32) -> Result<Self> {
        if hash_bits == 0 || hash_bits > MAX_HASH_BITS {
            return Err(SearchError::InvalidHashBits(hash_bits));
        }
        let size = 1usize
            .checked_shl(hash_bits)
            .ok_or(SearchError::TableAllocation { entries: usize::MAX })?;

        let mut entries = Vec::new();
        entries
            .try_reserve_exact(size)
            .map_err(|_| SearchError::TableAllocation { entries: size })?;
        entries.resize(size, TranspositionEntry::EMPTY);

        log::info!(
            "allocated transposition table: 2^{} entries ({} bytes)",
            hash_bits,
            size * std::mem::size_of::<TranspositionEntry>()
        );

        Ok(Self {
            entries,
            hash_bits,
            mask: (1u64 << hash_bits) - 1,
        })
    }

    pub fn hash_bits(&self) -> u32 {
        self.hash_bits
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Table slot for a state: its low `hash_bits` bits.
    #[inline]
    pub fn key(&self, state: &State) -> u64 {
        state.data() & self.mask
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key & self.mask) as usize
    }

    #[inline]
    pub fn lookup(&self, key: u64) -> Option<TranspositionEntry> {
        let entry = self.entries[self.index(key)];
        if entry.is_occupied() {
            Some(entry)
        } else {
            None
        }
    }

    #[inline]
    pub fn insert(&mut self, key: u64, value: u8, best_move: Move) {
        let index = self.index(key);
        self.entries[index] = TranspositionEntry::occupied(value, best_move);
    }

    pub fn clear(&mut self) {
        self.entries.fill(TranspositionEntry::EMPTY);
        log::trace!("cleared transposition table");
    }

    pub fn occupied(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_occupied()).count()
    }

    /// Occupied slots per thousand.
    pub fn fill_permille(&self) -> usize {
        self.occupied() * 1000 / self.capacity()
    }
}

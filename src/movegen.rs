use crate::board::{Player, State};
use crate::error::{Result, SearchError};
use std::fmt;

/// Mixing iterations per (move, mover) pair, indexed by `2 * move + offset`
/// where the offset is 0 for player A and 1 for player B.
pub const DEFAULT_DIFFS: [u32; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

/// Move indices share a byte with the table's occupied flag.
pub const MAX_MOVES_PER_STATE: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move(u8);

impl Move {
    pub const fn new(index: u8) -> Self {
        Move(index)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Expects a 63-bit input: the player bit must already be stripped.
#[inline]
fn xorshift(mut x: u64) -> u64 {
    x ^= x >> 13;
    x ^= (x << 8) >> 1;
    x ^= x >> 17;
    x
}

#[inline]
fn finish(mut x: u64) -> u64 {
    x ^= x >> 12;
    x ^= (x << 26) >> 1;
    x ^= x >> 27;
    x
}

#[derive(Debug, Clone)]
pub struct MoveGenerator {
    moves_per_state: usize,
    diffs: Vec<u32>,
}

impl MoveGenerator {
    pub fn new(moves_per_state: usize, diffs: &[u32]) -> Result<Self> {
        if moves_per_state == 0
            || moves_per_state > MAX_MOVES_PER_STATE
            || diffs.len() < 2 * moves_per_state
        {
            return Err(SearchError::InvalidBranchingFactor {
                moves_per_state,
                diffs: diffs.len(),
            });
        }

        Ok(Self {
            moves_per_state,
            diffs: diffs[..2 * moves_per_state].to_vec(),
        })
    }

    pub fn moves_per_state(&self) -> usize {
        self.moves_per_state
    }

    pub fn diffs(&self) -> &[u32] {
        &self.diffs
    }

    /// Every move is legal in every state; moves come out in increasing order.
    pub fn generate_moves(&self, _state: &State) -> impl Iterator<Item = Move> {
        (0..self.moves_per_state).map(|index| Move(index as u8))
    }

    pub fn is_move_valid(&self, mv: Move) -> bool {
        mv.index() < self.moves_per_state
    }

    pub fn apply_move(&self, state: State, mv: Move) -> Result<State> {
        if !self.is_move_valid(mv) {
            return Err(SearchError::InvalidMove {
                index: mv.index(),
                moves_per_state: self.moves_per_state,
            });
        }
        Ok(self.successor(state, mv))
    }

    /// Successor of `state` under a move already known to be in range.
    pub(crate) fn successor(&self, state: State, mv: Move) -> State {
        let mover = state.player_to_move();
        let offset = match mover {
            Player::A => 0,
            Player::B => 1,
        };
        let iterations = self.diffs[2 * mv.index() + offset];

        let mut x = state.position();
        for _ in 0..iterations {
            x = xorshift(x);
        }
        State::from_parts(finish(x), mover.opposite())
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        Self {
            moves_per_state: 4,
            diffs: DEFAULT_DIFFS[..8].to_vec(),
        }
    }
}

use std::fmt;

const PLAYER_BIT: u64 = 1 << 63;
const POSITION_MASK: u64 = !PLAYER_BIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    A,
    B,
}

impl Player {
    pub fn opposite(&self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Player A maximises, player B minimises.
    pub fn is_maximizing(&self) -> bool {
        *self == Player::A
    }
}

/// A game position: the top bit is the player to move, the remaining 63
/// bits are an opaque position encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State(u64);

impl State {
    pub const fn new(data: u64) -> Self {
        State(data)
    }

    /// Builds a state from a 63-bit position and the player to move.
    /// Bits above the position width are discarded.
    pub fn from_parts(position: u64, player: Player) -> Self {
        let player_bit = match player {
            Player::A => 0,
            Player::B => PLAYER_BIT,
        };
        State((position & POSITION_MASK) | player_bit)
    }

    pub const fn data(&self) -> u64 {
        self.0
    }

    pub const fn position(&self) -> u64 {
        self.0 & POSITION_MASK
    }

    pub fn player_to_move(&self) -> Player {
        if self.0 & PLAYER_BIT == 0 {
            Player::A
        } else {
            Player::B
        }
    }

    /// Leaf evaluation: the low byte of the encoding.
    pub const fn value(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:064b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_from_top_bit() {
        assert_eq!(State::new(0x0011_7002_88A5_9CB9).player_to_move(), Player::A);
        assert_eq!(State::new(1 << 63).player_to_move(), Player::B);
        assert_eq!(State::new(u64::MAX).player_to_move(), Player::B);
    }

    #[test]
    fn test_value_is_low_byte() {
        assert_eq!(State::new(0x0011_7002_88A5_9CB9).value(), 0xB9);
        assert_eq!(State::new(1 << 63).value(), 0);
        assert_eq!(State::new(u64::MAX).value(), 255);
    }

    #[test]
    fn test_from_parts_strips_position_top_bit() {
        let state = State::from_parts(u64::MAX, Player::A);
        assert_eq!(state.player_to_move(), Player::A);
        assert_eq!(state.position(), u64::MAX >> 1);

        let state = State::from_parts(42, Player::B);
        assert_eq!(state.player_to_move(), Player::B);
        assert_eq!(state.position(), 42);
        assert_eq!(state.value(), 42);
    }

    #[test]
    fn test_display_is_64_bit_binary() {
        let rendered = State::new(5 | (1 << 63)).to_string();
        assert_eq!(rendered.len(), 64);
        assert!(rendered.starts_with('1'));
        assert!(rendered.ends_with("101"));
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Player::A.opposite(), Player::B);
        assert_eq!(Player::B.opposite(), Player::A);
        assert!(Player::A.is_maximizing());
        assert!(!Player::B.is_maximizing());
    }
}

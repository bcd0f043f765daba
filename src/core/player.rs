//! Player identity for the two-player game.

use serde::{Deserialize, Serialize};

/// One of the two players.
///
/// The board is mover-relative: `First` always reads its tiers from the
/// leading plane block. Drivers that speak the classic `+1 / -1`
/// convention can convert through [`Player::sign`] and
/// [`Player::from_sign`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The player whose tiers occupy the leading plane block.
    First,
    /// The other player.
    Second,
}

impl Player {
    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Signed representation: `+1` for `First`, `-1` for `Second`.
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Player::First => 1,
            Player::Second => -1,
        }
    }

    /// Convert from the signed convention.
    ///
    /// # Panics
    ///
    /// Panics on any value other than `+1` or `-1`.
    #[must_use]
    pub fn from_sign(sign: i8) -> Player {
        match sign {
            1 => Player::First,
            -1 => Player::Second,
            other => panic!("player sign must be +1 or -1, got {other}"),
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::First => write!(f, "Player(+1)"),
            Player::Second => write!(f, "Player(-1)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        assert_eq!(Player::First.opponent(), Player::Second);
        assert_eq!(Player::Second.opponent(), Player::First);
        assert_eq!(Player::First.opponent().opponent(), Player::First);
    }

    #[test]
    fn test_sign_round_trip() {
        for player in [Player::First, Player::Second] {
            assert_eq!(Player::from_sign(player.sign()), player);
        }
    }

    #[test]
    #[should_panic(expected = "player sign")]
    fn test_bad_sign() {
        Player::from_sign(0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Player::First), "Player(+1)");
        assert_eq!(format!("{}", Player::Second), "Player(-1)");
    }
}

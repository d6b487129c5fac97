//! Score counters: a yellow and a green counter per player.
//!
//! Counters are floored at zero and have no upper bound.

use serde::Serialize;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    /// Jogador 1.
    One,
    /// Jogador 2.
    Two,
}

impl Player {
    /// Both players in display order.
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::One => "Jogador 1",
            Self::Two => "Jogador 2",
        }
    }
}

/// Which counter of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CounterKind {
    /// Yellow (amarelo) counter.
    Yellow,
    /// Green (verde) counter.
    Green,
}

impl CounterKind {
    /// Both counters in display order.
    pub const ALL: [CounterKind; 2] = [CounterKind::Yellow, CounterKind::Green];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Yellow => "Amarelo",
            Self::Green => "Verde",
        }
    }
}

/// A unit step applied to a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Delta {
    /// +1.
    Up,
    /// -1.
    Down,
}

impl Delta {
    /// The signed step.
    pub fn value(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// A player's two counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScorePair {
    /// Yellow counter.
    pub yellow: u32,
    /// Green counter.
    pub green: u32,
}

impl ScorePair {
    /// Current value of a counter.
    pub fn get(&self, kind: CounterKind) -> u32 {
        match kind {
            CounterKind::Yellow => self.yellow,
            CounterKind::Green => self.green,
        }
    }

    fn slot(&mut self, kind: CounterKind) -> &mut u32 {
        match kind {
            CounterKind::Yellow => &mut self.yellow,
            CounterKind::Green => &mut self.green,
        }
    }
}

/// Result of adjusting a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    /// Value after the adjustment.
    pub value: u32,
    /// False when a decrement was clamped at zero.
    pub changed: bool,
}

/// Scores of both players.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    /// Player one's counters.
    pub player1: ScorePair,
    /// Player two's counters.
    pub player2: ScorePair,
}

impl Scoreboard {
    /// A player's counters.
    pub fn pair(&self, player: Player) -> &ScorePair {
        match player {
            Player::One => &self.player1,
            Player::Two => &self.player2,
        }
    }

    /// Current value of one counter.
    pub fn get(&self, player: Player, kind: CounterKind) -> u32 {
        self.pair(player).get(kind)
    }

    /// Step a counter by one, flooring at zero. Returns the new value.
    pub fn adjust(&mut self, player: Player, kind: CounterKind, delta: Delta) -> Adjustment {
        let pair = match player {
            Player::One => &mut self.player1,
            Player::Two => &mut self.player2,
        };
        let slot = pair.slot(kind);
        let before = *slot;
        *slot = match delta {
            Delta::Up => before.saturating_add(1),
            Delta::Down => before.saturating_sub(1),
        };
        Adjustment {
            value: *slot,
            changed: *slot != before,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let board = Scoreboard::default();
        for player in Player::ALL {
            for kind in CounterKind::ALL {
                assert_eq!(board.get(player, kind), 0);
            }
        }
    }

    #[test]
    fn decrement_at_zero_is_clamped() {
        let mut board = Scoreboard::default();
        let adj = board.adjust(Player::One, CounterKind::Yellow, Delta::Down);
        assert_eq!(adj, Adjustment { value: 0, changed: false });
    }

    #[test]
    fn decrement_from_one() {
        let mut board = Scoreboard::default();
        board.adjust(Player::One, CounterKind::Yellow, Delta::Up);
        let adj = board.adjust(Player::One, CounterKind::Yellow, Delta::Down);
        assert_eq!(adj, Adjustment { value: 0, changed: true });
    }

    #[test]
    fn counters_are_independent() {
        let mut board = Scoreboard::default();
        board.adjust(Player::Two, CounterKind::Green, Delta::Up);
        board.adjust(Player::Two, CounterKind::Green, Delta::Up);
        board.adjust(Player::One, CounterKind::Green, Delta::Up);
        assert_eq!(board.player2.green, 2);
        assert_eq!(board.player1.green, 1);
        assert_eq!(board.player1.yellow, 0);
        assert_eq!(board.player2.yellow, 0);
    }

    #[test]
    fn no_upper_bound() {
        let mut board = Scoreboard::default();
        for _ in 0..500 {
            board.adjust(Player::One, CounterKind::Green, Delta::Up);
        }
        assert_eq!(board.get(Player::One, CounterKind::Green), 500);
    }

    #[test]
    fn labels() {
        assert_eq!(Player::Two.label(), "Jogador 2");
        assert_eq!(CounterKind::Yellow.label(), "Amarelo");
        assert_eq!(Delta::Down.value(), -1);
    }
}

//! Top-level views of the game.

use serde::Serialize;

/// Identifies which view is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum TabId {
    /// Roulette of moments.
    #[default]
    Roulette,
    /// Heart die.
    Dice,
    /// Score counters.
    Score,
}

impl TabId {
    /// All tabs in display order.
    pub const ALL: [TabId; 3] = [TabId::Roulette, TabId::Dice, TabId::Score];

    /// Parse a tab name (English or Portuguese).
    pub fn from_name(name: &str) -> Option<TabId> {
        match name.trim().to_lowercase().as_str() {
            "roulette" | "roleta" => Some(TabId::Roulette),
            "dice" | "dado" => Some(TabId::Dice),
            "score" | "scores" | "pontuacao" | "pontuação" => Some(TabId::Score),
            _ => None,
        }
    }

    /// Display title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Roulette => "Roleta",
            Self::Dice => "Dado",
            Self::Score => "Pontuação",
        }
    }

    /// Index of this tab in the tab bar.
    pub fn index(self) -> usize {
        TabId::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Get the next tab (wrapping).
    pub fn next(self) -> TabId {
        TabId::ALL[(self.index() + 1) % TabId::ALL.len()]
    }

    /// Get the previous tab (wrapping).
    pub fn prev(self) -> TabId {
        TabId::ALL[(self.index() + TabId::ALL.len() - 1) % TabId::ALL.len()]
    }
}

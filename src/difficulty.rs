//! Difficulty profiles and the search strategy each one maps to.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::constants::{EASY_DEPTH, EXPECTIMAX_DEPTH, HARD_DEPTH, MEDIUM_DEPTH};

/// How the machine picks its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Uniform draw over the empty cells.
    Random,
    /// Alpha-beta minimax with the given depth limit.
    Minimax { max_depth: u32 },
    /// Expectimax with the given depth limit.
    Expectimax { max_depth: u32 },
}

/// Named difficulty selected by the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    #[default]
    Random,
    MinimaxEasy,
    MinimaxMedium,
    MinimaxHard,
    Expectimax,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty: '{0}'")]
pub struct UnknownDifficulty(pub String);

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Random,
        Difficulty::MinimaxEasy,
        Difficulty::MinimaxMedium,
        Difficulty::MinimaxHard,
        Difficulty::Expectimax,
    ];

    /// Display name, as sent by clients.
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Random => "Random",
            Difficulty::MinimaxEasy => "Minimax Easy",
            Difficulty::MinimaxMedium => "Minimax Medium",
            Difficulty::MinimaxHard => "Minimax Hard",
            Difficulty::Expectimax => "Expectimax",
        }
    }

    pub fn strategy(self) -> Strategy {
        match self {
            Difficulty::Random => Strategy::Random,
            Difficulty::MinimaxEasy => Strategy::Minimax { max_depth: EASY_DEPTH },
            Difficulty::MinimaxMedium => Strategy::Minimax { max_depth: MEDIUM_DEPTH },
            Difficulty::MinimaxHard => Strategy::Minimax { max_depth: HARD_DEPTH },
            Difficulty::Expectimax => Strategy::Expectimax { max_depth: EXPECTIMAX_DEPTH },
        }
    }

    /// Parses a client-supplied name, degrading to [`Difficulty::Random`]
    /// when it is not recognized.
    pub fn from_name_lenient(name: &str) -> Difficulty {
        name.parse().unwrap_or_else(|err: UnknownDifficulty| {
            warn!(%err, "falling back to Random");
            Difficulty::Random
        })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Only the exact display names parse; anything else is
/// [`UnknownDifficulty`].
impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.name() == s)
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}

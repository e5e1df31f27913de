//! Pass-through types for the AI bet-suggestion collaborator.
//!
//! The core hands a game and a bet count to a host-provided backend and
//! displays whatever comes back. Suggestions are never validated against the
//! game rules and never stored.

use futures::future::BoxFuture;
use serde::Deserialize;
use thiserror::Error;

/// Brazilian lottery games the generator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LotteryGame {
    /// 6 numbers from 1 to 60.
    MegaSena,
    /// 15 numbers from 1 to 25.
    Lotofacil,
    /// 5 numbers from 1 to 80.
    Quina,
}

impl LotteryGame {
    /// Every supported game, in selector order.
    pub const ALL: [LotteryGame; 3] = [
        LotteryGame::MegaSena,
        LotteryGame::Lotofacil,
        LotteryGame::Quina,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            LotteryGame::MegaSena => "Mega-Sena",
            LotteryGame::Lotofacil => "Lotofácil",
            LotteryGame::Quina => "Quina",
        }
    }

    /// How many numbers one bet contains.
    pub fn numbers_per_bet(self) -> usize {
        match self {
            LotteryGame::MegaSena => 6,
            LotteryGame::Lotofacil => 15,
            LotteryGame::Quina => 5,
        }
    }

    /// Inclusive numeric range a bet draws from.
    pub fn number_range(self) -> (u8, u8) {
        match self {
            LotteryGame::MegaSena => (1, 60),
            LotteryGame::Lotofacil => (1, 25),
            LotteryGame::Quina => (1, 80),
        }
    }
}

/// Structured result returned by the AI backend, displayed verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BetSuggestion {
    /// Short strategy explanation.
    pub analysis: String,
    /// Suggested bets; each inner list holds one bet's numbers.
    pub bets: Vec<Vec<u8>>,
}

/// Failure reported by the suggestion backend.
#[derive(Debug, Error)]
pub enum SuggestionError {
    /// The backend could not produce a suggestion.
    #[error("suggestion backend failed: {0}")]
    Backend(String),
}

/// Host-provided backend producing bet suggestions.
pub trait SuggestionProvider: Send + Sync {
    /// Request `count` bets for `game`.
    fn suggest(
        &self,
        game: LotteryGame,
        count: usize,
    ) -> BoxFuture<'static, Result<BetSuggestion, SuggestionError>>;
}

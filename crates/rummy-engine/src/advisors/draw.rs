//! Open deck or closed deck.

use crate::heuristics::Heuristics;
use crate::melds;
use crate::opponent_model::OpponentModel;
use rummy_core::{Card, Hand};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickSource {
    OpenDeck,
    ClosedDeck,
}

impl PickSource {
    pub fn label(self) -> &'static str {
        match self {
            PickSource::OpenDeck => "Open Deck",
            PickSource::ClosedDeck => "Closed Deck",
        }
    }
}

impl fmt::Display for PickSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickReason {
    /// Nothing is face up.
    NoOpenCard,
    /// The open card finishes a run or a set in hand.
    CompletesMeld,
    /// The opponent shows no interest in the open card.
    UnwantedByOpponent,
    /// The opponent may want it; take an unknown card instead.
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickAdvice {
    pub source: PickSource,
    pub reason: PickReason,
}

impl PickAdvice {
    fn new(source: PickSource, reason: PickReason) -> Self {
        Self { source, reason }
    }
}

/// Chooses where to draw from.
///
/// With an open card present the opponent model is first refreshed from
/// `opponent_picks` and `opponent_discards`.
pub fn suggest_pick_source(
    hand: &Hand,
    _joker: Option<Card>,
    open_card: Option<Card>,
    opponent: &mut OpponentModel,
    opponent_picks: &[Card],
    opponent_discards: &[Card],
    heuristics: &Heuristics,
) -> PickAdvice {
    let Some(open_card) = open_card else {
        return PickAdvice::new(PickSource::ClosedDeck, PickReason::NoOpenCard);
    };

    opponent.update(opponent_picks, opponent_discards, heuristics);

    let advice = if completes_group(hand, open_card) {
        PickAdvice::new(PickSource::OpenDeck, PickReason::CompletesMeld)
    } else if !opponent.is_likely_wanted(open_card, heuristics) {
        PickAdvice::new(PickSource::OpenDeck, PickReason::UnwantedByOpponent)
    } else {
        PickAdvice::new(PickSource::ClosedDeck, PickReason::Default)
    };
    debug!(%open_card, source = %advice.source, reason = ?advice.reason, "suggested pick source");
    advice
}

/// True when `card` would finish a three card run, or join two or more held
/// cards of its rank.
pub fn completes_group(hand: &Hand, card: Card) -> bool {
    melds::completes_sequence(hand, card) || hand.rank_count(card.rank) >= 2
}

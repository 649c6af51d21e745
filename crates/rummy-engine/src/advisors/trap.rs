//! Trap suggestions: bait the opponent with a card they seem to want.

use crate::heuristics::Heuristics;
use crate::melds;
use crate::opponent_model::OpponentModel;
use rummy_core::{Card, Hand};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// How many times each card has been suggested as a trap this session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapHistory {
    counts: BTreeMap<Card, u32>,
}

impl TrapHistory {
    pub fn record(&mut self, card: Card) {
        *self.counts.entry(card).or_insert(0) += 1;
    }

    pub fn count(&self, card: Card) -> u32 {
        self.counts.get(&card).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

/// Returns the first non-joker card that looks like it finishes a run and
/// that the opponent is likely to want, recording it in `history`.
///
/// "Looks like it finishes a run" is [`melds::completes_sequence`]: both
/// neighbors held, or the two ranks below, or the two ranks above. Note that
/// a sandwiched card is in fact part of a real run.
pub fn suggest_trap_card(
    hand: &Hand,
    joker: Option<Card>,
    opponent: &OpponentModel,
    history: &mut TrapHistory,
    heuristics: &Heuristics,
) -> Option<Card> {
    let card = hand
        .cards
        .iter()
        .copied()
        .filter(|card| !card.is_joker(joker))
        .find(|&card| {
            is_false_sequence_card(hand, card) && opponent.is_likely_wanted(card, heuristics)
        })?;

    history.record(card);
    debug!(%card, times = history.count(card), "suggested trap card");
    Some(card)
}

pub fn is_false_sequence_card(hand: &Hand, card: Card) -> bool {
    melds::completes_sequence(hand, card)
}

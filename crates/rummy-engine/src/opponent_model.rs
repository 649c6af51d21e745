//! Opponent profile inferred from observed open-deck picks and discards

use crate::error::EngineError;
use crate::heuristics::Heuristics;
use rummy_core::io::card_parser::try_parse_cards;
use rummy_core::Card;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Default for [`Heuristics::wanted_rank_picks`].
pub const WANTED_RANK_PICKS: u32 = 1;
/// Default for [`Heuristics::wanted_suit_picks`].
pub const WANTED_SUIT_PICKS: u32 = 2;
/// Default for [`Heuristics::preference_margin`]: how far one kind of clue
/// must outnumber the other to set a preference.
pub const PREFERENCE_MARGIN: usize = 2;

/// What the opponent has been seen doing this game.
///
/// Counters only ever grow, and a preference flag once set stays set for the
/// rest of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentModel {
    /// Cards taken from the open deck, with how often each was seen.
    pub open_picks: BTreeMap<Card, u32>,
    /// Cards thrown away, with how often each was seen.
    pub discards: BTreeMap<Card, u32>,
    pub sequences_preferred: bool,
    pub sets_preferred: bool,
}

impl OpponentModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one batch of observations.
    ///
    /// Every card passed is counted again, so callers hand over only actions
    /// they have not reported before.
    pub fn update(&mut self, picks: &[Card], discards: &[Card], heuristics: &Heuristics) {
        for card in picks {
            *self.open_picks.entry(*card).or_insert(0) += 1;
        }
        for card in discards {
            *self.discards.entry(*card).or_insert(0) += 1;
        }

        let sequence_clues = picks.iter().filter(|c| is_sequence_clue(**c, picks)).count();
        let set_clues = picks.iter().filter(|c| is_set_clue(**c, picks)).count();

        let margin = heuristics.preference_margin;
        if sequence_clues > set_clues + margin {
            self.sequences_preferred = true;
        } else if set_clues > sequence_clues + margin {
            self.sets_preferred = true;
        }

        debug!(
            picks = picks.len(),
            discards = discards.len(),
            sequence_clues,
            set_clues,
            sequences_preferred = self.sequences_preferred,
            sets_preferred = self.sets_preferred,
            "updated opponent model"
        );
    }

    /// Like [`OpponentModel::update`] but from raw tokens. Nothing is recorded
    /// unless every token parses.
    pub fn update_from_tokens<S: AsRef<str>>(
        &mut self,
        picks: &[S],
        discards: &[S],
        heuristics: &Heuristics,
    ) -> Result<(), EngineError> {
        let picks = try_parse_cards(picks)?;
        let discards = try_parse_cards(discards)?;
        self.update(&picks, &discards, heuristics);
        Ok(())
    }

    /// True when the opponent has picked more than `wanted_rank_picks` cards
    /// of this rank, or more than `wanted_suit_picks` of this suit.
    pub fn is_likely_wanted(&self, card: Card, heuristics: &Heuristics) -> bool {
        let rank_picks: u32 = self
            .open_picks
            .iter()
            .filter(|(c, _)| c.rank == card.rank)
            .map(|(_, n)| n)
            .sum();
        let suit_picks: u32 = self
            .open_picks
            .iter()
            .filter(|(c, _)| c.suit == card.suit)
            .map(|(_, n)| n)
            .sum();

        rank_picks > heuristics.wanted_rank_picks || suit_picks > heuristics.wanted_suit_picks
    }

    pub fn times_picked(&self, card: Card) -> u32 {
        self.open_picks.get(&card).copied().unwrap_or(0)
    }

    pub fn times_discarded(&self, card: Card) -> u32 {
        self.discards.get(&card).copied().unwrap_or(0)
    }

    pub fn total_picks(&self) -> u32 {
        self.open_picks.values().sum()
    }

    pub fn total_discards(&self) -> u32 {
        self.discards.values().sum()
    }

    /// Every picked card, repeated as often as it was seen.
    pub fn observed_picks(&self) -> Vec<Card> {
        self.open_picks
            .iter()
            .flat_map(|(card, n)| std::iter::repeat(*card).take(*n as usize))
            .collect()
    }
}

/// A pick whose same-suit neighbor was picked too.
fn is_sequence_clue(card: Card, picks: &[Card]) -> bool {
    [-1, 1]
        .into_iter()
        .filter_map(|delta| card.neighbor(delta))
        .any(|neighbor| picks.contains(&neighbor))
}

/// A pick whose rank appears at least twice among the picks.
fn is_set_clue(card: Card, picks: &[Card]) -> bool {
    picks.iter().filter(|c| c.rank == card.rank).count() >= 2
}

impl fmt::Display for OpponentModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} picks, {} discards",
            self.total_picks(),
            self.total_discards()
        )?;
        match (self.sequences_preferred, self.sets_preferred) {
            (true, true) => write!(f, ", collects sequences and sets"),
            (true, false) => write!(f, ", prefers sequences"),
            (false, true) => write!(f, ", prefers sets"),
            (false, false) => Ok(()),
        }
    }
}

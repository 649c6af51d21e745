//! Discard selection
//!
//! Every unprotected card is scored as usefulness to us minus the danger of
//! handing it to the opponent; the lowest score is thrown.

use crate::melds;
use rummy_core::{Card, Hand};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Scoring of one hand card, in hand order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardScore {
    pub card: Card,
    /// Part of a complete meld, and so never scored.
    pub protected: bool,
    pub usefulness: f64,
    pub danger: f64,
    /// Usefulness minus danger; `None` for protected cards.
    pub score: Option<f64>,
}

impl CardScore {
    /// The score used for ranking, with protected cards at +inf.
    pub fn rank_value(&self) -> f64 {
        self.score.unwrap_or(f64::INFINITY)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscardAdvice {
    pub card: Card,
    /// Every card was protected, so a complete meld has to be broken.
    pub forced_meld_break: bool,
    pub scores: Vec<CardScore>,
}

/// Picks the card to discard, or `None` for an empty hand.
///
/// Ties go to the card that comes first in the hand. When the whole hand is
/// protected the first card is returned and the advice is marked as a forced
/// meld break.
pub fn suggest_discard(
    hand: &Hand,
    joker: Option<Card>,
    discard_pile: &[Card],
    opponent_picks: &[Card],
    opponent_discards: &[Card],
) -> Option<DiscardAdvice> {
    if hand.is_empty() {
        return None;
    }

    let protected = melds::protected_cards(hand, joker);
    let scores: Vec<CardScore> = hand
        .cards
        .iter()
        .map(|&card| {
            if protected.contains(&card) {
                return CardScore {
                    card,
                    protected: true,
                    usefulness: 0.0,
                    danger: 0.0,
                    score: None,
                };
            }
            let usefulness = card_usefulness(hand, card, joker);
            let danger = discard_danger(card, opponent_picks);
            CardScore {
                card,
                protected: false,
                usefulness,
                danger,
                score: Some(usefulness - danger),
            }
        })
        .collect();

    let mut best = 0;
    for (idx, entry) in scores.iter().enumerate() {
        if entry.rank_value() < scores[best].rank_value() {
            best = idx;
        }
    }

    let card = scores[best].card;
    let forced_meld_break = scores[best].protected;
    if forced_meld_break {
        warn!(%card, "every card is in a complete meld; breaking one");
    }
    debug!(
        %card,
        score = scores[best].rank_value(),
        protected = protected.len(),
        pile = discard_pile.len(),
        opponent_picks = opponent_picks.len(),
        opponent_discards = opponent_discards.len(),
        "suggested discard"
    );

    Some(DiscardAdvice {
        card,
        forced_meld_break,
        scores,
    })
}

/// 1.0 if the card is in a two card partial run, a pair, or is the joker.
pub fn card_usefulness(hand: &Hand, card: Card, joker: Option<Card>) -> f64 {
    let sequence_value = if melds::has_partial_run(hand, card) { 1.0 } else { 0.0 };
    let set_value = if melds::has_pair(hand, card) { 1.0 } else { 0.0 };
    let joker_value = if card.is_joker(joker) { 1.0 } else { 0.0 };
    f64::max(sequence_value, f64::max(set_value, joker_value))
}

/// Share of opponent picks matching the card's rank or suit, whichever is
/// larger. The `+ 1` keeps the ratio defined with no observations and pulls
/// it toward zero while they are few.
pub fn discard_danger(card: Card, opponent_picks: &[Card]) -> f64 {
    let denominator = (opponent_picks.len() + 1) as f64;
    let same_rank = opponent_picks.iter().filter(|c| c.rank == card.rank).count() as f64;
    let same_suit = opponent_picks.iter().filter(|c| c.suit == card.suit).count() as f64;
    f64::max(same_rank / denominator, same_suit / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rummy_core::parse_cards;

    fn hand(s: &str) -> Hand {
        Hand::parse(s).unwrap()
    }

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_hand_has_no_advice() {
        assert_eq!(suggest_discard(&Hand::default(), None, &[], &[], &[]), None);
    }

    #[test]
    fn test_single_unprotected_card_is_discarded() {
        let h = hand("7C 8C 9C JH QH KH 3S 3D 3C 4D 5D 6D 9S");
        let advice = suggest_discard(&h, Some(card("2S")), &[], &[], &[]).unwrap();
        assert_eq!(advice.card, card("9S"));
        assert!(!advice.forced_meld_break);
        assert_eq!(advice.scores.len(), 13);
        assert_eq!(advice.scores.iter().filter(|s| s.protected).count(), 12);
    }

    #[test]
    fn test_prefers_useless_card_over_partial_meld() {
        let h = hand("5S 6S 9D 9C KH");
        let advice = suggest_discard(&h, Some(card("2C")), &[], &[], &[]).unwrap();
        assert_eq!(advice.card, card("KH"));
    }

    #[test]
    fn test_ties_go_to_first_card() {
        let h = hand("2H 9C KS");
        let advice = suggest_discard(&h, None, &[], &[], &[]).unwrap();
        assert_eq!(advice.card, card("2H"));
    }

    #[test]
    fn test_danger_lowers_score() {
        // Both are dead weight; the opponent has been taking spades.
        let h = hand("2H KS");
        let picks = parse_cards("4S 9S").unwrap();
        let advice = suggest_discard(&h, None, &[], &picks, &[]).unwrap();
        assert_eq!(advice.card, card("KS"));
        let ks = advice.scores.iter().find(|s| s.card == card("KS")).unwrap();
        assert!((ks.danger - 2.0 / 3.0).abs() < 1e-9);
        assert!((ks.rank_value() + 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_joker_is_useful() {
        let h = hand("7D KS");
        let joker = Some(card("7D"));
        assert_eq!(card_usefulness(&h, card("7D"), joker), 1.0);
        assert_eq!(card_usefulness(&h, card("KS"), joker), 0.0);
        let advice = suggest_discard(&h, joker, &[], &[], &[]).unwrap();
        assert_eq!(advice.card, card("KS"));
    }

    #[test]
    fn test_all_protected_forces_meld_break() {
        let h = hand("4H 5H 6H 9C 9D 9S");
        let advice = suggest_discard(&h, None, &[], &[], &[]).unwrap();
        assert!(advice.forced_meld_break);
        assert_eq!(advice.card, card("4H"));
        assert!(advice.scores.iter().all(|s| s.score.is_none()));
        assert!(advice.scores.iter().all(|s| s.rank_value() == f64::INFINITY));
    }

    #[test]
    fn test_advice_survives_json_round_trip() {
        let h = hand("4H 5H 6H KS");
        let picks = parse_cards("9S").unwrap();
        let advice = suggest_discard(&h, None, &[], &picks, &[]).unwrap();
        let json = serde_json::to_string(&advice).unwrap();
        assert!(json.contains("\"score\":null"));
        let back: DiscardAdvice = serde_json::from_str(&json).unwrap();
        assert_eq!(back, advice);
        assert_eq!(back.card, card("KS"));
    }

    #[test]
    fn test_danger_without_observations_is_zero() {
        assert_eq!(discard_danger(card("5H"), &[]), 0.0);
    }

    #[test]
    fn test_danger_takes_larger_of_rank_and_suit() {
        let picks = parse_cards("5C 5D 2H").unwrap();
        // rank: 2/4, suit: 1/4
        assert!((discard_danger(card("5H"), &picks) - 0.5).abs() < 1e-9);
    }
}

//! Opening hand evaluation: a weighted score used to suggest Play or Drop.

use crate::heuristics::Heuristics;
use crate::melds;
use rummy_core::{Card, Hand};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitialAction {
    Play,
    Drop,
}

impl InitialAction {
    pub fn label(self) -> &'static str {
        match self {
            InitialAction::Play => "Play",
            InitialAction::Drop => "Drop",
        }
    }
}

impl fmt::Display for InitialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The terms behind an opening score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HandStrength {
    pub pure_sequences: usize,
    pub potential_sequences: f64,
    pub sets: usize,
    /// Weighted sum clamped to 1.0. Not a probability.
    pub score: f64,
}

/// Scores the hand. An empty hand or a missing joker scores zero.
pub fn evaluate_hand(hand: &Hand, joker: Option<Card>, heuristics: &Heuristics) -> HandStrength {
    if hand.is_empty() || joker.is_none() {
        return HandStrength::default();
    }

    let pure_sequences = melds::count_pure_sequences(hand);
    let potential_sequences =
        melds::count_potential_sequences_with_bonus(hand, joker, heuristics.joker_potential_bonus);
    let sets = melds::count_sets(hand);

    let raw = pure_sequences as f64 * heuristics.pure_sequence_weight
        + potential_sequences * heuristics.potential_sequence_weight
        + sets as f64 * heuristics.set_weight;

    HandStrength {
        pure_sequences,
        potential_sequences,
        sets,
        score: raw.min(1.0),
    }
}

pub fn evaluate_hand_strength(hand: &Hand, joker: Option<Card>, heuristics: &Heuristics) -> f64 {
    evaluate_hand(hand, joker, heuristics).score
}

pub fn suggest_initial_action(
    hand: &Hand,
    joker: Option<Card>,
    heuristics: &Heuristics,
) -> InitialAction {
    action_for_score(evaluate_hand_strength(hand, joker, heuristics), heuristics)
}

pub fn action_for_score(score: f64, heuristics: &Heuristics) -> InitialAction {
    if score >= heuristics.play_threshold {
        InitialAction::Play
    } else {
        InitialAction::Drop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(s: &str) -> Hand {
        Hand::parse(s).unwrap()
    }

    fn joker() -> Option<Card> {
        Some("7D".parse().unwrap())
    }

    #[test]
    fn test_strong_hand_plays() {
        let h = hand("7C 8C 9C KH QH JH 3S 3D 3C 5S 6S 2D JC");
        let strength = evaluate_hand(&h, joker(), &Heuristics::default());
        assert_eq!(strength.pure_sequences, 2);
        assert_eq!(strength.potential_sequences, 4.0);
        assert_eq!(strength.sets, 2);
        assert_eq!(strength.score, 1.0);
        assert_eq!(
            suggest_initial_action(&h, joker(), &Heuristics::default()),
            InitialAction::Play
        );
    }

    #[test]
    fn test_scattered_hand_drops() {
        // Hearts and diamonds alternate ranks, so nothing connects.
        let h = hand("2H 3D 4H 5D 6H 7D 8H 9D 10H JD QH KD AH");
        let strength = evaluate_hand(&h, joker(), &Heuristics::default());
        assert_eq!(strength.pure_sequences, 0);
        assert_eq!(strength.sets, 0);
        // only the per-suit joker bonus remains
        assert!((strength.score - 0.3).abs() < 1e-9);
        assert_eq!(
            suggest_initial_action(&h, joker(), &Heuristics::default()),
            InitialAction::Drop
        );
    }

    #[test]
    fn test_tiny_hands_score_zero() {
        let h = Heuristics::default();
        assert_eq!(evaluate_hand_strength(&Hand::default(), joker(), &h), 0.0);
        assert_eq!(evaluate_hand_strength(&hand("AS"), joker(), &h), 0.0);
    }

    #[test]
    fn test_missing_joker_scores_zero() {
        let h = hand("7C 8C 9C KH QH JH");
        assert_eq!(evaluate_hand_strength(&h, None, &Heuristics::default()), 0.0);
    }

    #[test]
    fn test_score_monotonic_in_pure_sequences() {
        let heuristics = Heuristics::default();
        let weaker = hand("7C 8C 2H 9S");
        let stronger = hand("7C 8C 9C 2H 9S");
        assert!(
            evaluate_hand_strength(&stronger, joker(), &heuristics)
                >= evaluate_hand_strength(&weaker, joker(), &heuristics)
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let heuristics = Heuristics::default();
        assert_eq!(action_for_score(0.5, &heuristics), InitialAction::Play);
        assert_eq!(action_for_score(0.49, &heuristics), InitialAction::Drop);
    }

    #[test]
    fn test_labels() {
        assert_eq!(InitialAction::Play.to_string(), "Play");
        assert_eq!(InitialAction::Drop.label(), "Drop");
    }
}

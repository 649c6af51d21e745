//! Meld detection
//!
//! Finds sequences (same suit, consecutive ranks) and sets (same rank) in a
//! hand, and which cards sit inside a complete meld.
//!
//! Sequence counting is an overlapping count, not a partition: within a run,
//! every card from the third onward adds one sequence, so a five card run
//! counts three.

use rummy_core::{Card, Hand};
use std::collections::BTreeSet;

/// Shortest run that counts as a sequence.
pub const MIN_SEQUENCE_LEN: usize = 3;
/// Same-rank cards needed for a set to score in the opening evaluation.
pub const SET_SCORE_THRESHOLD: usize = 2;
/// Same-rank cards needed for a set to be complete, and so protected.
pub const SET_PROTECT_THRESHOLD: usize = 3;
/// Flat credit per suit holding two or more cards, standing in for the
/// chance of finishing a run with the joker.
pub const JOKER_POTENTIAL_BONUS: f64 = 0.5;

/// Pure sequences in the hand, counted without the joker.
pub fn count_pure_sequences(hand: &Hand) -> usize {
    hand.by_suit()
        .values()
        .map(|cards| count_sequences_in_suit(cards))
        .sum()
}

/// Pure sequences plus [`JOKER_POTENTIAL_BONUS`] for every suit with at least
/// two cards. Without a joker there is nothing to count.
pub fn count_potential_sequences(hand: &Hand, joker: Option<Card>) -> f64 {
    count_potential_sequences_with_bonus(hand, joker, JOKER_POTENTIAL_BONUS)
}

pub fn count_potential_sequences_with_bonus(hand: &Hand, joker: Option<Card>, bonus: f64) -> f64 {
    if joker.is_none() {
        return 0.0;
    }
    hand.by_suit()
        .values()
        .map(|cards| {
            let potential = if cards.len() >= 2 { bonus } else { 0.0 };
            count_sequences_in_suit(cards) as f64 + potential
        })
        .sum()
}

/// Ranks held at least [`SET_SCORE_THRESHOLD`] times. Pairs count here even
/// though they are not complete sets.
pub fn count_sets(hand: &Hand) -> usize {
    hand.by_rank()
        .values()
        .filter(|cards| cards.len() >= SET_SCORE_THRESHOLD)
        .count()
}

/// Overlapping sequence count over one suit's cards in ascending rank order.
fn count_sequences_in_suit(sorted: &[Card]) -> usize {
    if sorted.len() < MIN_SEQUENCE_LEN {
        return 0;
    }

    let mut sequences = 0;
    let mut current_run = 1;
    for pair in sorted.windows(2) {
        if is_consecutive(pair[0], pair[1]) {
            current_run += 1;
            if current_run >= MIN_SEQUENCE_LEN {
                sequences += 1;
            }
        } else {
            current_run = 1;
        }
    }
    sequences
}

fn is_consecutive(lower: Card, upper: Card) -> bool {
    upper.rank.index() == lower.rank.index() + 1
}

/// Every maximal same-suit run of at least [`MIN_SEQUENCE_LEN`] cards.
pub fn maximal_runs(hand: &Hand) -> Vec<Vec<Card>> {
    let mut runs = Vec::new();
    for cards in hand.by_suit().values() {
        let mut run: Vec<Card> = Vec::new();
        for &card in cards {
            match run.last() {
                Some(&last) if is_consecutive(last, card) => run.push(card),
                _ => {
                    if run.len() >= MIN_SEQUENCE_LEN {
                        runs.push(std::mem::take(&mut run));
                    }
                    run = vec![card];
                }
            }
        }
        if run.len() >= MIN_SEQUENCE_LEN {
            runs.push(run);
        }
    }
    runs
}

/// Cards inside a complete meld: every card of a maximal run, and every card
/// of a rank held at least [`SET_PROTECT_THRESHOLD`] times. Cards that are
/// only part of a pair are not protected.
///
/// The joker is judged on its natural rank and suit like any other card.
pub fn protected_cards(hand: &Hand, _joker: Option<Card>) -> BTreeSet<Card> {
    let mut protected: BTreeSet<Card> = maximal_runs(hand).into_iter().flatten().collect();
    for cards in hand.by_rank().values() {
        if cards.len() >= SET_PROTECT_THRESHOLD {
            protected.extend(cards.iter().copied());
        }
    }
    protected
}

/// True when a same-suit neighbor one rank away is in the hand.
pub fn has_partial_run(hand: &Hand, card: Card) -> bool {
    [-1, 1]
        .into_iter()
        .filter_map(|delta| card.neighbor(delta))
        .any(|neighbor| hand.contains(&neighbor))
}

/// True when the hand holds another card of the same rank.
pub fn has_pair(hand: &Hand, card: Card) -> bool {
    let others = hand.rank_count(card.rank) - usize::from(hand.contains(&card));
    others + 1 >= SET_SCORE_THRESHOLD
}

/// True when `card` sits in a three card run with cards from the hand: both
/// neighbors held, or the two ranks below, or the two ranks above.
pub fn completes_sequence(hand: &Hand, card: Card) -> bool {
    let held = |delta: i8| card.neighbor(delta).is_some_and(|c| hand.contains(&c));

    let sandwiched = held(-1) && held(1);
    let tops_run = held(-1) && held(-2);
    let starts_run = held(1) && held(2);
    sandwiched || tops_run || starts_run
}

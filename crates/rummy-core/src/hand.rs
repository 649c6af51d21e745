use crate::card::Card;
use crate::error::CardParseError;
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cards held by the player: 13 after the deal, 14 between a draw and the
/// following discard. Order is the order the caller supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Parse a whitespace separated list of card tokens, e.g. "7C 8C 10H".
    pub fn parse(s: &str) -> Result<Self, CardParseError> {
        crate::io::card_parser::parse_cards(s).map(Self::new)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes the first copy of `card`, returning whether it was held.
    pub fn remove(&mut self, card: &Card) -> bool {
        match self.cards.iter().position(|c| c == card) {
            Some(idx) => {
                self.cards.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn length(&self, suit: Suit) -> usize {
        self.cards.iter().filter(|c| c.suit == suit).count()
    }

    /// Number of held cards of `rank`, across all suits.
    pub fn rank_count(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|c| c.rank == rank).count()
    }

    /// Cards of one suit in ascending rank order.
    pub fn cards_of_suit(&self, suit: Suit) -> Vec<Card> {
        let mut cards: Vec<Card> = self.cards.iter().filter(|c| c.suit == suit).copied().collect();
        cards.sort_by_key(|c| c.rank);
        cards
    }

    /// Cards grouped by suit, each group in ascending rank order.
    pub fn by_suit(&self) -> BTreeMap<Suit, Vec<Card>> {
        let mut groups: BTreeMap<Suit, Vec<Card>> = BTreeMap::new();
        for card in &self.cards {
            groups.entry(card.suit).or_default().push(*card);
        }
        for cards in groups.values_mut() {
            cards.sort_by_key(|c| c.rank);
        }
        groups
    }

    /// Cards grouped by rank, each group in hand order.
    pub fn by_rank(&self) -> BTreeMap<Rank, Vec<Card>> {
        let mut groups: BTreeMap<Rank, Vec<Card>> = BTreeMap::new();
        for card in &self.cards {
            groups.entry(card.rank).or_default().push(*card);
        }
        groups
    }

    /// Display order: see [`sort_cards`].
    pub fn sort(&mut self, joker: Option<Card>) {
        self.cards = sort_cards(&self.cards, joker);
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self::new(cards)
    }
}

/// Sorts cards for display: the joker first, then by rank from Ace down, then
/// by suit in reverse `H D C S` order.
///
/// The ordering is total over distinct cards, so sorting a sorted list leaves
/// it unchanged.
pub fn sort_cards(cards: &[Card], joker: Option<Card>) -> Vec<Card> {
    let mut sorted = cards.to_vec();
    sorted.sort_by(|a, b| {
        let key = |c: &Card| (c.is_joker(joker), c.rank.index(), c.suit.index());
        key(b).cmp(&key(a))
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_len() {
        let hand = Hand::parse("7C 8C 9C KH").unwrap();
        assert_eq!(hand.len(), 4);
        assert!(hand.contains(&card("KH")));
        assert!(!hand.is_empty());
        assert!(Hand::parse("7C 8Z").is_err());
    }

    #[test]
    fn test_suit_and_rank_counts() {
        let hand = Hand::parse("3S 3D 3C 5S 6S").unwrap();
        assert_eq!(hand.length(Suit::Spades), 3);
        assert_eq!(hand.length(Suit::Hearts), 0);
        assert_eq!(hand.rank_count(Rank::Three), 3);
        assert_eq!(hand.rank_count(Rank::Ace), 0);
    }

    #[test]
    fn test_cards_of_suit_sorted() {
        let hand = Hand::parse("KH 2S QH JH").unwrap();
        assert_eq!(
            hand.cards_of_suit(Suit::Hearts),
            vec![card("JH"), card("QH"), card("KH")]
        );
    }

    #[test]
    fn test_by_suit_and_by_rank() {
        let hand = Hand::parse("9C 7C 8C 3S 3D").unwrap();
        let suits = hand.by_suit();
        assert_eq!(suits[&Suit::Clubs], vec![card("7C"), card("8C"), card("9C")]);
        assert_eq!(suits.len(), 3);
        let ranks = hand.by_rank();
        assert_eq!(ranks[&Rank::Three], vec![card("3S"), card("3D")]);
    }

    #[test]
    fn test_remove_first_copy_only() {
        let mut hand = Hand::parse("5H 6H 5H").unwrap();
        assert!(hand.remove(&card("5H")));
        assert_eq!(hand.cards, vec![card("6H"), card("5H")]);
        assert!(!hand.remove(&card("AS")));
    }

    #[test]
    fn test_sort_puts_joker_first_then_rank_descending() {
        let hand = Hand::parse("2H 7D AS 10C 10S").unwrap();
        let sorted = sort_cards(&hand.cards, Some(card("2H")));
        assert_eq!(
            sorted,
            vec![card("2H"), card("AS"), card("10S"), card("10C"), card("7D")]
        );
    }

    #[test]
    fn test_sort_is_a_fixed_point() {
        let hand = Hand::parse("7C 8C 9C KH QH JH 3S 3D 3C 5S 6S 2D JC").unwrap();
        let joker = Some(card("7D"));
        let once = sort_cards(&hand.cards, joker);
        let twice = sort_cards(&once, joker);
        assert_eq!(once, twice);

        let mut in_place = hand.clone();
        in_place.sort(joker);
        assert_eq!(in_place.cards, once);
    }
}

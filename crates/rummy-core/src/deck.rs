use crate::card::Card;
use crate::rank::Rank;
use crate::suit::Suit;
use rand::seq::SliceRandom;

/// A single 52-card deck, drawn from the back.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards in suit-major order.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn shuffled(rng: &mut impl rand::Rng) -> Self {
        let mut deck = Self::standard();
        deck.cards.shuffle(rng);
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Deals up to `n` cards; fewer if the deck runs out.
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        let take = n.min(self.cards.len());
        self.cards.split_off(self.cards.len() - take)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_standard_deck_has_52_distinct_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), 52);
        let unique: HashSet<Card> = deck.cards.iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_deal_and_draw() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = Deck::shuffled(&mut rng);
        let hand = deck.deal(13);
        assert_eq!(hand.len(), 13);
        assert_eq!(deck.len(), 39);
        let joker = deck.draw().unwrap();
        assert!(!hand.contains(&joker));
        assert_eq!(deck.deal(100).len(), 38);
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn test_seeded_shuffle_is_deterministic() {
        let a = Deck::shuffled(&mut StdRng::seed_from_u64(42)).deal(13);
        let b = Deck::shuffled(&mut StdRng::seed_from_u64(42)).deal(13);
        assert_eq!(a, b);
    }
}

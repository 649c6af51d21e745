use crate::error::CardParseError;
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A playing card. Cards are plain values: two cards with the same rank and
/// suit are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// True when this card is the designated joker.
    pub fn is_joker(&self, joker: Option<Card>) -> bool {
        joker == Some(*self)
    }

    /// Same-suit card `delta` ranks away, if it exists.
    pub fn neighbor(&self, delta: i8) -> Option<Card> {
        self.rank.offset(delta).map(|rank| Card::new(rank, self.suit))
    }

    pub fn token(&self) -> String {
        format!("{}{}", self.rank.token(), self.suit.to_char())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.token(), self.suit.to_char())
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::io::card_parser::parse_card(s)
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.token())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

use crate::card::Card;
use crate::error::CardParseError;
use crate::rank::Rank;
use crate::suit::Suit;
use once_cell::sync::Lazy;
use regex::Regex;

static CARD_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(10|[2-9JQKA])([HDCS])$").expect("valid card token regex"));

/// Parses a single card token such as `"10H"` or `"qs"`.
///
/// The token is a rank (`2`-`10`, `J`, `Q`, `K`, `A`) followed by a one
/// letter suit (`H`, `D`, `C`, `S`). Surrounding whitespace is ignored.
pub fn parse_card(token: &str) -> Result<Card, CardParseError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CardParseError::Empty);
    }
    if let Some(caps) = CARD_TOKEN.captures(token) {
        let rank = Rank::from_token(&caps[1])
            .ok_or_else(|| CardParseError::UnknownRank(token.to_string()))?;
        let suit = caps[2]
            .chars()
            .next()
            .and_then(Suit::from_char)
            .ok_or_else(|| CardParseError::UnknownSuit(token.to_string()))?;
        return Ok(Card::new(rank, suit));
    }

    // Tell the caller which half of the token was wrong.
    let mut chars = token.chars();
    let suit_char = chars.next_back();
    let rank_part = chars.as_str();
    if rank_part.is_empty() {
        return Err(CardParseError::Malformed(token.to_string()));
    }
    if Rank::from_token(rank_part).is_none() {
        return Err(CardParseError::UnknownRank(token.to_string()));
    }
    if suit_char.and_then(Suit::from_char).is_none() {
        return Err(CardParseError::UnknownSuit(token.to_string()));
    }
    Err(CardParseError::Malformed(token.to_string()))
}

/// Parses a whitespace separated list of card tokens, failing on the first
/// malformed one.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CardParseError> {
    s.split_whitespace().map(parse_card).collect()
}

/// Non-panicking helper to parse already split tokens.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, CardParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens.into_iter().map(|s| parse_card(s.as_ref())).collect()
}

/// Space-joined tokens.
pub fn cards_to_string(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

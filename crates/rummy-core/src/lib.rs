pub mod suit;
pub mod rank;
pub mod card;
pub mod hand;
pub mod deck;
pub mod error;
pub mod io;

pub use suit::Suit;
pub use rank::Rank;
pub use card::Card;
pub use hand::{sort_cards, Hand};
pub use deck::Deck;
pub use error::CardParseError;
pub use io::card_parser::{cards_to_string, parse_card, parse_cards};

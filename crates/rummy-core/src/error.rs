use thiserror::Error;

/// A card token that does not decompose into a rank and a suit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardParseError {
    #[error("empty card token")]
    Empty,
    #[error("unknown rank in card token {0:?}")]
    UnknownRank(String),
    #[error("unknown suit in card token {0:?}")]
    UnknownSuit(String),
    #[error("malformed card token {0:?}")]
    Malformed(String),
}

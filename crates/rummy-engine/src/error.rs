use rummy_core::{Card, CardParseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A card token reached the engine despite the caller's validation.
    #[error(transparent)]
    MalformedCard(#[from] CardParseError),
    #[error("card {0} is not in hand")]
    CardNotInHand(Card),
    #[error("no active session")]
    NoSession,
    #[error("invalid heuristics config: {0}")]
    Config(#[from] serde_yaml::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

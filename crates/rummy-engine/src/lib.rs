//! Rummy advisory engine
//!
//! Given a hand, the joker and what the opponent has been seen doing,
//! suggests whether to play or drop, where to draw from, what to discard and
//! when to bait the opponent with a trap card.

pub mod advisors;
pub mod error;
pub mod evaluator;
pub mod heuristics;
pub mod melds;
pub mod opponent_model;
pub mod session;

pub use advisors::{CardScore, DiscardAdvice, PickAdvice, PickReason, PickSource, TrapHistory};
pub use error::EngineError;
pub use evaluator::{HandStrength, InitialAction};
pub use heuristics::Heuristics;
pub use opponent_model::OpponentModel;
pub use session::{OpeningAdvice, Session, SessionStore, TurnAdvice};

use rummy_core::{Card, Hand};

/// Entry point for the advisory operations, carrying the scoring weights.
#[derive(Debug, Clone, Default)]
pub struct Advisor {
    pub heuristics: Heuristics,
}

impl Advisor {
    pub fn new(heuristics: Heuristics) -> Self {
        Self { heuristics }
    }

    pub fn evaluate_hand(&self, hand: &Hand, joker: Option<Card>) -> HandStrength {
        evaluator::evaluate_hand(hand, joker, &self.heuristics)
    }

    /// Opening strength in `[0, 1]`.
    pub fn evaluate_hand_strength(&self, hand: &Hand, joker: Option<Card>) -> f64 {
        evaluator::evaluate_hand_strength(hand, joker, &self.heuristics)
    }

    pub fn suggest_initial_action(&self, hand: &Hand, joker: Option<Card>) -> InitialAction {
        evaluator::suggest_initial_action(hand, joker, &self.heuristics)
    }

    pub fn suggest_pick_source(
        &self,
        opponent: &mut OpponentModel,
        hand: &Hand,
        joker: Option<Card>,
        open_card: Option<Card>,
        opponent_picks: &[Card],
        opponent_discards: &[Card],
    ) -> PickAdvice {
        advisors::suggest_pick_source(
            hand,
            joker,
            open_card,
            opponent,
            opponent_picks,
            opponent_discards,
            &self.heuristics,
        )
    }

    pub fn suggest_discard(
        &self,
        hand: &Hand,
        joker: Option<Card>,
        discard_pile: &[Card],
        opponent_picks: &[Card],
        opponent_discards: &[Card],
    ) -> Option<DiscardAdvice> {
        advisors::suggest_discard(hand, joker, discard_pile, opponent_picks, opponent_discards)
    }

    /// Reads `opponent` as it stands; fold new observations in first with
    /// [`Advisor::observe`] or [`Advisor::suggest_pick_source`].
    pub fn suggest_trap_card(
        &self,
        opponent: &OpponentModel,
        history: &mut TrapHistory,
        hand: &Hand,
        joker: Option<Card>,
    ) -> Option<Card> {
        advisors::suggest_trap_card(hand, joker, opponent, history, &self.heuristics)
    }

    /// Records opponent actions under this advisor's thresholds.
    pub fn observe(&self, opponent: &mut OpponentModel, picks: &[Card], discards: &[Card]) {
        opponent.update(picks, discards, &self.heuristics);
    }
}

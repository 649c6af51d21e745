//! Per-player game sessions and the store that owns them.

use crate::advisors::{DiscardAdvice, PickAdvice, TrapHistory};
use crate::error::EngineError;
use crate::evaluator::{HandStrength, InitialAction};
use crate::opponent_model::OpponentModel;
use crate::Advisor;
use rummy_core::{Card, Hand};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::info;

/// Opening advice: the score and the action it suggests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpeningAdvice {
    pub strength: HandStrength,
    pub action: InitialAction,
}

/// Everything suggested for one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnAdvice {
    pub pick: PickAdvice,
    pub trap: Option<Card>,
    pub discard: Option<DiscardAdvice>,
}

/// One player's view of one game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub hand: Hand,
    pub joker: Card,
    /// Append-only, oldest first.
    pub discard_pile: Vec<Card>,
    pub open_card: Option<Card>,
    /// The last card drawn, if any.
    pub picked_card: Option<Card>,
    pub opponent: OpponentModel,
    pub trap_history: TrapHistory,
    pub trap_armed: bool,
}

impl Session {
    pub fn new(hand: Hand, joker: Card) -> Self {
        Self {
            hand,
            joker,
            discard_pile: Vec::new(),
            open_card: None,
            picked_card: None,
            opponent: OpponentModel::new(),
            trap_history: TrapHistory::default(),
            trap_armed: false,
        }
    }

    pub fn set_open_card(&mut self, card: Option<Card>) {
        self.open_card = card;
    }

    /// Adds a drawn card to the hand. Drawing the open card clears it.
    pub fn draw(&mut self, card: Card) {
        if self.open_card == Some(card) {
            self.open_card = None;
        }
        self.hand.push(card);
        self.picked_card = Some(card);
    }

    /// Moves a card from the hand to the discard pile, where it becomes the
    /// open card. Nothing changes if the card is not held.
    pub fn discard(&mut self, card: Card) -> Result<(), EngineError> {
        if !self.hand.remove(&card) {
            return Err(EngineError::CardNotInHand(card));
        }
        self.discard_pile.push(card);
        self.open_card = Some(card);
        Ok(())
    }

    pub fn observe_opponent(&mut self, advisor: &Advisor, picks: &[Card], discards: &[Card]) {
        advisor.observe(&mut self.opponent, picks, discards);
    }

    /// Clears the trap flag once the baited card has been dealt with.
    pub fn resolve_trap(&mut self) {
        self.trap_armed = false;
    }

    pub fn advise_opening(&self, advisor: &Advisor) -> OpeningAdvice {
        let strength = advisor.evaluate_hand(&self.hand, Some(self.joker));
        OpeningAdvice {
            strength,
            action: crate::evaluator::action_for_score(strength.score, &advisor.heuristics),
        }
    }

    /// Runs the per-turn advisors in order: pick source, trap, discard.
    ///
    /// `picks` and `discards` are the opponent actions seen since the last
    /// call. They reach the opponent model exactly once, through the pick
    /// source advisor when a card is face up and directly otherwise.
    pub fn advise_turn(&mut self, advisor: &Advisor, picks: &[Card], discards: &[Card]) -> TurnAdvice {
        let joker = Some(self.joker);
        let pick = advisor.suggest_pick_source(
            &mut self.opponent,
            &self.hand,
            joker,
            self.open_card,
            picks,
            discards,
        );
        if self.open_card.is_none() {
            advisor.observe(&mut self.opponent, picks, discards);
        }

        let trap =
            advisor.suggest_trap_card(&self.opponent, &mut self.trap_history, &self.hand, joker);
        if trap.is_some() {
            self.trap_armed = true;
        }

        let opponent_picks = self.opponent.observed_picks();
        let discard = advisor.suggest_discard(
            &self.hand,
            joker,
            &self.discard_pile,
            &opponent_picks,
            discards,
        );

        TurnAdvice {
            pick,
            trap,
            discard,
        }
    }

    /// Discard advice for the current hand, e.g. right after a draw.
    pub fn advise_discard(&self, advisor: &Advisor) -> Option<DiscardAdvice> {
        let opponent_picks = self.opponent.observed_picks();
        advisor.suggest_discard(
            &self.hand,
            Some(self.joker),
            &self.discard_pile,
            &opponent_picks,
            &[],
        )
    }
}

/// Sessions keyed by player. The store does no locking: callers serialise
/// access per key.
#[derive(Debug, Clone)]
pub struct SessionStore<K> {
    sessions: HashMap<K, Session>,
}

impl<K> Default for SessionStore<K> {
    fn default() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Debug> SessionStore<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh game for `key`, replacing any previous one.
    pub fn start(&mut self, key: K, hand: Hand, joker: Card) -> &mut Session {
        info!(?key, cards = hand.len(), %joker, "starting session");
        let session = Session::new(hand, joker);
        match self.sessions.entry(key) {
            Entry::Occupied(mut entry) => {
                entry.insert(session);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(session),
        }
    }

    pub fn get(&self, key: &K) -> Option<&Session> {
        self.sessions.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut Session> {
        self.sessions.get_mut(key)
    }

    pub fn require_mut(&mut self, key: &K) -> Result<&mut Session, EngineError> {
        self.sessions.get_mut(key).ok_or(EngineError::NoSession)
    }

    /// Ends the game for `key`, returning its last state.
    pub fn cancel(&mut self, key: &K) -> Option<Session> {
        let removed = self.sessions.remove(key);
        if removed.is_some() {
            info!(?key, "cancelled session");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisors::{PickReason, PickSource};
    use rummy_core::parse_cards;

    fn hand(s: &str) -> Hand {
        Hand::parse(s).unwrap()
    }

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_store_lifecycle() {
        let mut store: SessionStore<u64> = SessionStore::new();
        assert!(store.is_empty());

        store.start(1, hand("7C 8C 9C"), card("7D"));
        store.start(2, hand("2H"), card("AS"));
        assert_eq!(store.len(), 2);

        store.get_mut(&1).unwrap().discard_pile.push(card("KS"));
        // restarting replaces the old game
        let restarted = store.start(1, hand("3H"), card("7D"));
        assert!(restarted.discard_pile.is_empty());
        assert_eq!(store.len(), 2);

        assert!(store.cancel(&2).is_some());
        assert!(store.cancel(&2).is_none());
        assert!(store.get(&2).is_none());
        assert!(matches!(store.require_mut(&2), Err(EngineError::NoSession)));
        assert!(store.require_mut(&1).is_ok());
    }

    #[test]
    fn test_draw_and_discard() {
        let mut session = Session::new(hand("7C 8C 9C KS"), card("7D"));
        session.set_open_card(Some(card("2H")));
        session.draw(card("2H"));
        assert_eq!(session.hand.len(), 5);
        assert_eq!(session.picked_card, Some(card("2H")));
        assert_eq!(session.open_card, None);

        session.discard(card("KS")).unwrap();
        assert_eq!(session.hand.len(), 4);
        assert_eq!(session.discard_pile, vec![card("KS")]);
        assert_eq!(session.open_card, Some(card("KS")));
    }

    #[test]
    fn test_discard_missing_card_changes_nothing() {
        let mut session = Session::new(hand("7C 8C"), card("7D"));
        let err = session.discard(card("AS")).unwrap_err();
        assert!(matches!(err, EngineError::CardNotInHand(c) if c == card("AS")));
        assert_eq!(session.hand.len(), 2);
        assert!(session.discard_pile.is_empty());
    }

    #[test]
    fn test_advise_opening() {
        let session = Session::new(
            hand("7C 8C 9C KH QH JH 3S 3D 3C 5S 6S 2D JC"),
            card("7D"),
        );
        let opening = session.advise_opening(&Advisor::default());
        assert_eq!(opening.action, InitialAction::Play);
        assert!(opening.strength.score > 0.5);
    }

    #[test]
    fn test_advise_turn_without_open_card_still_observes() {
        let mut session = Session::new(hand("4H 5H 6H KS 2C"), card("7D"));
        let picks = parse_cards("2H 9H JH").unwrap();
        let advice = session.advise_turn(&Advisor::default(), &picks, &[]);

        assert_eq!(advice.pick.source, PickSource::ClosedDeck);
        assert_eq!(advice.pick.reason, PickReason::NoOpenCard);
        assert_eq!(session.opponent.total_picks(), 3);
        assert_eq!(advice.trap, Some(card("4H")));
        assert!(session.trap_armed);
        assert_eq!(session.trap_history.count(card("4H")), 1);

        let discard = advice.discard.unwrap();
        assert!(!["4H", "5H", "6H"].iter().any(|c| discard.card == card(c)));

        session.resolve_trap();
        assert!(!session.trap_armed);
    }

    #[test]
    fn test_advise_turn_with_open_card_observes_once() {
        let mut session = Session::new(hand("4H 6H KS 2C"), card("7D"));
        session.set_open_card(Some(card("5H")));
        let picks = parse_cards("9S").unwrap();
        let advice = session.advise_turn(&Advisor::default(), &picks, &[]);
        assert_eq!(advice.pick.source, PickSource::OpenDeck);
        assert_eq!(session.opponent.total_picks(), 1);
        assert_eq!(advice.trap, None);
        assert!(!session.trap_armed);
    }

    #[test]
    fn test_session_survives_json_round_trip() {
        let mut session = Session::new(hand("4H 5H 6H KS"), card("7D"));
        session.observe_opponent(
            &Advisor::default(),
            &parse_cards("2H 9H 9H").unwrap(),
            &parse_cards("AC").unwrap(),
        );
        session.discard(card("KS")).unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hand, session.hand);
        assert_eq!(back.opponent, session.opponent);
        assert_eq!(back.open_card, Some(card("KS")));
        assert_eq!(back.opponent.times_picked(card("9H")), 2);
    }

    #[test]
    fn test_turn_advice_survives_json_round_trip() {
        let mut session = Session::new(hand("4H 5H 6H 9C 9D 9S"), card("7D"));
        let advice = session.advise_turn(&Advisor::default(), &[], &[]);
        assert!(advice.discard.as_ref().unwrap().forced_meld_break);

        let json = serde_json::to_string(&advice).unwrap();
        let back: TurnAdvice = serde_json::from_str(&json).unwrap();
        assert_eq!(back, advice);
    }

    #[test]
    fn test_advise_discard_after_draw() {
        let mut session = Session::new(hand("7C 8C 9C KH QH JH 3S 3D 3C 4D 5D 6D"), card("2S"));
        session.draw(card("9S"));
        let advice = session.advise_discard(&Advisor::default()).unwrap();
        assert_eq!(advice.card, card("9S"));
    }
}

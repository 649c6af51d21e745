use rand::rngs::StdRng;
use rand::SeedableRng;
use rummy_core::{Card, Deck, Hand, Suit};
use rummy_engine::{CardScore, Heuristics, OpeningAdvice, OpponentModel, PickReason, TurnAdvice};
use serde::Serialize;
use std::fmt::Write;
use tracing::{info, warn};

pub const HAND_SIZE: usize = 13;

/// The shipped weights, or the ones in `path`.
pub fn load_heuristics(path: Option<&str>) -> Result<Heuristics, String> {
    match path {
        Some(path) => {
            let heuristics = Heuristics::from_path(path).map_err(|e| format!("Error: {e}"))?;
            info!(path, ?heuristics, "loaded heuristics");
            Ok(heuristics)
        }
        None => Ok(Heuristics::default()),
    }
}

/// Deals a hand, a joker and an open card from a fresh shuffled deck.
pub fn deal_random(seed: Option<u64>) -> Result<(Hand, Card, Option<Card>), String> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut deck = Deck::shuffled(&mut rng);
    let hand = Hand::new(deck.deal(HAND_SIZE));
    let joker = deck
        .draw()
        .ok_or_else(|| "Error: Deck ran out while dealing.".to_string())?;
    let open_card = deck.draw();
    info!(?seed, %joker, "dealt a random hand");
    Ok((hand, joker, open_card))
}

/// One line per suit, highest rank first, e.g. `♥ H: K Q J`.
pub fn get_hand_suits(hand: &Hand, joker: Option<Card>) -> Vec<String> {
    let mut suits = Vec::new();
    for suit in [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs] {
        if hand.length(suit) == 0 {
            suits.push(format!("{} {}: -", suit.symbol(), suit.to_char()));
            continue;
        }
        let ranks: Vec<String> = hand
            .cards_of_suit(suit)
            .iter()
            .rev()
            .map(|c| {
                if c.is_joker(joker) {
                    format!("{}*", c.rank)
                } else {
                    c.rank.to_string()
                }
            })
            .collect();
        suits.push(format!("{} {}: {}", suit.symbol(), suit.to_char(), ranks.join(" ")));
    }
    suits
}

pub fn format_hand(hand: &Hand, joker: Option<Card>) -> String {
    let mut out = String::new();
    for line in get_hand_suits(hand, joker) {
        writeln!(out, "  {}", line).unwrap();
    }
    out
}

pub fn format_opening(advice: &OpeningAdvice) -> String {
    format!(
        "Opening: {} (score {:.2}: {} pure, {:.1} potential, {} sets)",
        advice.action,
        advice.strength.score,
        advice.strength.pure_sequences,
        advice.strength.potential_sequences,
        advice.strength.sets
    )
}

pub fn format_opponent_model(model: &OpponentModel) -> String {
    let mut out = String::new();
    writeln!(out, "Opponent: {}", model).unwrap();
    if !model.open_picks.is_empty() {
        let picks: Vec<String> = model
            .open_picks
            .iter()
            .map(|(card, n)| if *n > 1 { format!("{card}x{n}") } else { card.to_string() })
            .collect();
        writeln!(out, "  Picked: {}", picks.join(" ")).unwrap();
    }
    out
}

pub fn reason_text(reason: PickReason) -> &'static str {
    match reason {
        PickReason::NoOpenCard => "nothing is face up",
        PickReason::CompletesMeld => "the open card completes a meld",
        PickReason::UnwantedByOpponent => "the opponent shows no interest in it",
        PickReason::Default => "the opponent may be collecting it",
    }
}

pub fn format_score_row(score: &CardScore) -> String {
    match score.score {
        Some(value) => format!(
            "{:<4} | {:>6.2} | {:>6.2} | {:>6.2} |",
            score.card, score.usefulness, score.danger, value
        ),
        None => format!("{:<4} | {:>6} | {:>6} | {:>6} | protected", score.card, "-", "-", "inf"),
    }
}

pub fn format_table_header() -> String {
    let mut out = String::new();
    writeln!(out, "{:<4} | {:>6} | {:>6} | {:>6} | Note", "Card", "Use", "Danger", "Score").unwrap();
    writeln!(out, "{:-<4}-+-{:-<6}-+-{:-<6}-+-{:-<6}-+-----------", "", "", "", "").unwrap();
    out
}

pub fn format_turn(advice: &TurnAdvice) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "Pick: {} ({})",
        advice.pick.source,
        reason_text(advice.pick.reason)
    )
    .unwrap();
    match advice.trap {
        Some(card) => writeln!(out, "Trap: discard {} as bait", card).unwrap(),
        None => writeln!(out, "Trap: none").unwrap(),
    }
    match &advice.discard {
        Some(discard) => {
            let note = if discard.forced_meld_break {
                warn!(card = %discard.card, "no loose card to discard");
                " (every card is melded; this breaks a meld)"
            } else {
                ""
            };
            writeln!(out, "Discard: {}{}", discard.card, note).unwrap();
            writeln!(out).unwrap();
            write!(out, "{}", format_table_header()).unwrap();
            for score in &discard.scores {
                writeln!(out, "{}", format_score_row(score)).unwrap();
            }
        }
        None => writeln!(out, "Discard: nothing to discard").unwrap(),
    }
    out
}

/// Machine readable report for `--json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub hand: &'a Hand,
    pub joker: Card,
    pub opening: &'a OpeningAdvice,
    pub turn: &'a TurnAdvice,
    pub opponent: &'a OpponentModel,
}

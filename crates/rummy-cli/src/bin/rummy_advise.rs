use clap::Parser;
use rummy_cli::advice_utils::*;
use rummy_core::{cards_to_string, parse_card, parse_cards, Card, Hand};
use rummy_engine::{Advisor, Session};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cards in hand, space separated (e.g. "7C 8C 9C KH QH JH")
    #[arg(long)]
    hand: Option<String>,

    /// The joker card for this game
    #[arg(short, long)]
    joker: Option<String>,

    /// The face-up card on the open deck
    #[arg(short, long)]
    open_card: Option<String>,

    /// Cards already discarded this game, oldest first
    #[arg(long, default_value = "")]
    discard_pile: String,

    /// Cards the opponent has taken from the open deck
    #[arg(long, default_value = "")]
    picks: String,

    /// Cards the opponent has thrown away
    #[arg(long, default_value = "")]
    discards: String,

    /// Deal a random hand, joker and open card instead
    #[arg(short, long)]
    random: bool,

    /// Seed for --random
    #[arg(long, env = "RUMMY_SEED")]
    seed: Option<u64>,

    /// YAML file overriding the scoring weights
    #[arg(short, long)]
    config: Option<String>,

    /// Print the advice as JSON
    #[arg(long)]
    json: bool,

    /// Log advisor decisions
    #[arg(short, long)]
    verbose: bool,
}

struct Inputs {
    hand: Hand,
    joker: Card,
    open_card: Option<Card>,
    discard_pile: Vec<Card>,
    picks: Vec<Card>,
    discards: Vec<Card>,
}

fn resolve_inputs(args: &Args) -> Result<Inputs, String> {
    let (hand, joker, open_card) = if args.random {
        deal_random(args.seed)?
    } else {
        let hand = match &args.hand {
            Some(s) => Hand::parse(s).map_err(|e| format!("Error: --hand: {e}"))?,
            None => return Err("Error: Must provide either --hand or --random.".to_string()),
        };
        let joker = match &args.joker {
            Some(s) => parse_card(s).map_err(|e| format!("Error: --joker: {e}"))?,
            None => return Err("Error: --hand needs a --joker.".to_string()),
        };
        let open_card = args
            .open_card
            .as_deref()
            .map(parse_card)
            .transpose()
            .map_err(|e| format!("Error: --open-card: {e}"))?;
        (hand, joker, open_card)
    };

    let list = |flag: &str, s: &str| parse_cards(s).map_err(|e| format!("Error: --{flag}: {e}"));
    Ok(Inputs {
        hand,
        joker,
        open_card,
        discard_pile: list("discard-pile", &args.discard_pile)?,
        picks: list("picks", &args.picks)?,
        discards: list("discards", &args.discards)?,
    })
}

fn run(args: &Args) -> Result<(), String> {
    let advisor = Advisor::new(load_heuristics(args.config.as_deref())?);
    let inputs = resolve_inputs(args)?;
    debug!(
        hand = %cards_to_string(&inputs.hand.cards),
        joker = %inputs.joker,
        picks = inputs.picks.len(),
        discards = inputs.discards.len(),
        "resolved inputs"
    );

    let mut session = Session::new(inputs.hand, inputs.joker);
    session.discard_pile = inputs.discard_pile;
    session.set_open_card(inputs.open_card);

    let opening = session.advise_opening(&advisor);
    let turn = session.advise_turn(&advisor, &inputs.picks, &inputs.discards);

    if args.json {
        let report = Report {
            hand: &session.hand,
            joker: session.joker,
            opening: &opening,
            turn: &turn,
            opponent: &session.opponent,
        };
        let json = serde_json::to_string_pretty(&report).map_err(|e| format!("Error: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    println!("Hand: {}", cards_to_string(&session.hand.cards));
    print!("{}", format_hand(&session.hand, Some(session.joker)));
    println!("Joker: {}", session.joker);
    match session.open_card {
        Some(card) => println!("Open card: {card}"),
        None => println!("Open card: -"),
    }
    if !session.discard_pile.is_empty() {
        println!("Discard pile: {}", cards_to_string(&session.discard_pile));
    }
    print!("{}", format_opponent_model(&session.opponent));
    println!();
    println!("{}", format_opening(&opening));
    print!("{}", format_turn(&turn));
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

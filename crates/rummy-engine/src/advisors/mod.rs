//! Per-turn advisors: where to draw, what to discard, and when to set a trap.

pub mod discard;
pub mod draw;
pub mod trap;

pub use discard::{suggest_discard, CardScore, DiscardAdvice};
pub use draw::{suggest_pick_source, PickAdvice, PickReason, PickSource};
pub use trap::{suggest_trap_card, TrapHistory};

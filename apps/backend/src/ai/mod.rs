//! Bot decision engine.
//!
//! Fast heuristics, no search. Every choice is filtered through the same
//! legality functions human input goes through, so a bot can never produce
//! a move the validators would reject.

pub mod bidding;
pub mod context;
pub mod play;

pub use bidding::choose_bid;
pub use context::{BotScenario, BotTurnContext};
pub use play::choose_card;

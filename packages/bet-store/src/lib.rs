pub mod collection;
pub mod store;
pub mod types;

pub use collection::{place_bet, BetCollection, Placement};
pub use store::BetStore;
pub use types::{potential_win, round2, Bet, NewBet, Selection};

//! Equation engine and game rules. Keep this crate free of IO and platform concerns.

pub mod arith;
pub mod cards;
pub mod completion;
pub mod config;
pub mod dedup;
pub mod enumerate;
pub mod events;
pub mod expr;
pub mod generate;
pub mod hand;
pub mod normalize;
pub mod rng;
pub mod session;
pub mod solver;

pub use arith::*;
pub use cards::*;
pub use completion::*;
pub use config::*;
pub use dedup::*;
pub use enumerate::*;
pub use events::*;
pub use expr::*;
pub use generate::*;
pub use hand::*;
pub use normalize::*;
pub use rng::*;
pub use session::*;
pub use solver::*;

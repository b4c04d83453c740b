//! Card zones.
//!
//! A battle tracks its deck as three piles of card ids. See `CardPiles`.

pub mod piles;

pub use piles::{CardPiles, Drawn, Pile};

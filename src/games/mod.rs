//! Game content built on the battle engine.

pub mod ensemble;

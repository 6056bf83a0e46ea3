//! The game of Nim against the machine.
//!
//! Players alternate removing any number of stones from any single heap;
//! whoever takes the last stone wins. The computer plays the classic
//! nim-sum strategy ([`strategy::winning_move`]), optionally spoiled by one
//! deliberate blunder per game ([`session::Opponent::Fallible`]).
//!
//! [`session::GameSession`] runs a whole game: it resolves the heaps and
//! the starting player, sequences computer and human plies, and reports the
//! winner. Prompting a human for moves and rendering the board are left to
//! the caller; see the `nimm_cli` crate for a terminal front end.

#![warn(missing_docs)]

pub mod error;
pub mod heaps;
pub mod nimber;
pub mod session;
pub mod strategy;

mod display;

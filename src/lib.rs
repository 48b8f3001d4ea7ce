// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `notary` chess rules engine.
//!
//! `notary` keeps the record of a game of chess. Moves are submitted one at a time in algebraic notation; each one is
//! checked against the full rules of the game, including check, castling, en passant, promotion, and the check or
//! checkmate marker it carries, before it is committed to the game's history. The game reports when it has ended by
//! checkmate, stalemate, the fifty-move rule, resignation, or agreement.
//!
//! There is no search or evaluation here: `notary` referees, it does not play.

pub mod board;
pub mod core;
pub mod game;
pub mod notation;

pub use board::Board;
pub use game::{Game, GameStatus, MoveError};
pub use notation::Notation;

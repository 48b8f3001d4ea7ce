// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A game of chess, driven one notation string at a time.
//!
//! `Game` owns the committed board and the move history. Every submitted move is resolved against the legal moves
//! of the current board, checked for the right check marker, and only then committed; a rejected move leaves the
//! game exactly as it was.

use serde::Serialize;
use thiserror::Error;

use crate::{
    board::{Board, LegalMove},
    core::*,
    notation::{Notation, NotationParseError, Play, Punctuation, Translation},
};

/// Plies without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_PLIES: u16 = 50;

/// Possible errors that can arise when submitting a move to a `Game`.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum MoveError {
    #[error("unparseable move: {0}")]
    Unparseable(#[from] NotationParseError),
    #[error("ambiguous move, could be any of: {}", .0.join(", "))]
    Ambiguous(Vec<String>),
    #[error("illegal move")]
    IllegalMove,
    #[error("wrong check marker, expected {0:?}")]
    BadPunctuation(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    Agreement,
    FiftyMoveRule,
    Stalemate,
}

/// Where a game stands. Derived from the board and history on demand; never stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Win { victor: Color, by_resignation: bool },
    Draw(DrawReason),
    ToMove(Color),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::ToMove(_))
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    history: Vec<Notation>,
}

impl Game {
    /// A game from the standard starting position.
    pub fn new() -> Game {
        Game::from_board(Board::from_start_position())
    }

    /// A game from an arbitrary board, with an empty history.
    pub fn from_board(board: Board) -> Game {
        Game {
            board,
            history: vec![],
        }
    }

    /// A game from an explicit placement of pieces, white to move.
    pub fn from_pieces(pieces: impl IntoIterator<Item = (Square, Piece)>) -> Game {
        Game::from_board(Board::from_pieces(pieces))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[Notation] {
        &self.history
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn status(&self) -> GameStatus {
        if let Some(Notation::End(victor)) = self.history.last() {
            return match victor {
                Some(victor) => GameStatus::Win {
                    victor: *victor,
                    by_resignation: true,
                },
                None => GameStatus::Draw(DrawReason::Agreement),
            };
        }

        let us = self.board.side_to_move();
        if self.board.is_no_move_possible() {
            if self.board.is_check(us) {
                return GameStatus::Win {
                    victor: us.toggle(),
                    by_resignation: false,
                };
            }

            return GameStatus::Draw(DrawReason::Stalemate);
        }

        if self.board.halfmove_clock() >= FIFTY_MOVE_PLIES {
            return GameStatus::Draw(DrawReason::FiftyMoveRule);
        }

        GameStatus::ToMove(us)
    }

    pub fn is_game_over(&self) -> bool {
        self.status().is_over()
    }

    /// Submits a move in algebraic notation. On success the move is appended to the history in canonical form; on
    /// failure nothing changes.
    pub fn make_move(&mut self, notation: &str) -> Result<(), MoveError> {
        let _span =
            tracing::debug_span!("make_move", notation, side = %self.board.side_to_move()).entered();
        let parsed: Notation = notation.parse().map_err(|err| {
            tracing::debug!("rejected: {}", err);
            MoveError::from(err)
        })?;

        if self.is_game_over() {
            tracing::debug!("rejected: game is already over");
            return Err(MoveError::IllegalMove);
        }

        match parsed {
            Notation::End(victor) => self.end(victor),
            Notation::Play(play, punctuation) => self.play(play, punctuation),
        }
    }

    fn end(&mut self, victor: Option<Color>) -> Result<(), MoveError> {
        // Only the side to move may resign, so the victor is never the side to move.
        if victor == Some(self.board.side_to_move()) {
            tracing::debug!("rejected: {:?} cannot be declared the victor on its own turn", victor);
            return Err(MoveError::IllegalMove);
        }

        let notation = Notation::End(victor);
        tracing::info!("game ended by declaration: {}", notation);
        self.history.push(notation);
        Ok(())
    }

    fn play(&mut self, play: Play, punctuation: Option<Punctuation>) -> Result<(), MoveError> {
        let legal = self.board.legal_moves();
        let mut candidates: Vec<&LegalMove> = legal
            .iter()
            .filter(|mov| play_matches(&play, mov))
            .collect();

        let chosen = match candidates.len() {
            0 => {
                tracing::debug!("rejected: no legal move matches");
                return Err(MoveError::IllegalMove);
            }
            1 => candidates.remove(0),
            _ => {
                let descriptions: Vec<String> = candidates
                    .iter()
                    .map(|mov| canonical_notation(mov, &legal).to_string())
                    .collect();
                tracing::debug!("rejected: ambiguous between {:?}", descriptions);
                return Err(MoveError::Ambiguous(descriptions));
            }
        };

        let expected = punctuation_for(&chosen.board);
        if punctuation != expected {
            tracing::debug!(
                "rejected: marked {:?}, position calls for {:?}",
                Punctuation::symbol(punctuation),
                Punctuation::symbol(expected)
            );
            return Err(MoveError::BadPunctuation(
                Punctuation::symbol(expected).to_string(),
            ));
        }

        let notation = canonical_notation(chosen, &legal);
        let board = chosen.board.clone();
        tracing::info!("committed {}", notation);
        self.board = board;
        self.history.push(notation);
        let status = self.status();
        if status.is_over() {
            tracing::info!("game over: {:?}", status);
        }

        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

/// Whether a legal move is one the submitted play could be describing. Origin coordinates the player left out match
/// anything; everything else must match exactly.
fn play_matches(play: &Play, mov: &LegalMove) -> bool {
    match play {
        Play::Castle(side) => mov.castle == Some(*side),
        Play::Translation(t) => {
            mov.castle.is_none()
                && t.figure == mov.piece.kind
                && t.target == mov.to
                && t.is_capture == mov.is_capture
                && t.promotion == mov.promotion
                && t.origin_file.map_or(true, |file| file == mov.from.file())
                && t.origin_rank.map_or(true, |rank| rank == mov.from.rank())
        }
    }
}

/// The check marker a move must carry given the board it produces.
fn punctuation_for(board: &Board) -> Option<Punctuation> {
    if !board.is_check(board.side_to_move()) {
        None
    } else if board.is_no_move_possible() {
        Some(Punctuation::Checkmate)
    } else {
        Some(Punctuation::Check)
    }
}

/// Writes a legal move the way it is recorded in history. Pawn captures always name their origin file; other pieces
/// name only as much of their origin as it takes to set them apart from any other piece of the same figure that
/// could also legally reach the target.
fn canonical_notation(mov: &LegalMove, legal: &[LegalMove]) -> Notation {
    let punctuation = punctuation_for(&mov.board);
    if let Some(side) = mov.castle {
        return Notation::Play(Play::Castle(side), punctuation);
    }

    let (origin_file, origin_rank) = if mov.piece.kind == PieceKind::Pawn {
        (mov.is_capture.then(|| mov.from.file()), None)
    } else {
        let rivals: Vec<Square> = legal
            .iter()
            .filter(|other| {
                other.piece == mov.piece
                    && other.to == mov.to
                    && other.from != mov.from
                    && other.castle.is_none()
            })
            .map(|other| other.from)
            .collect();

        if rivals.is_empty() {
            (None, None)
        } else if rivals.iter().all(|sq| sq.file() != mov.from.file()) {
            (Some(mov.from.file()), None)
        } else if rivals.iter().all(|sq| sq.rank() != mov.from.rank()) {
            (None, Some(mov.from.rank()))
        } else {
            (Some(mov.from.file()), Some(mov.from.rank()))
        }
    };

    let translation = Translation {
        origin_file,
        origin_rank,
        figure: mov.piece.kind,
        is_capture: mov.is_capture,
        promotion: mov.promotion,
        target: mov.to,
    };

    Notation::Play(translation.into(), punctuation)
}

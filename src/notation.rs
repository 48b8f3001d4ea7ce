// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Algebraic notation for single moves.
//!
//! The grammar accepted here is the move-level subset of SAN:
//!
//!  * `O-O` and `O-O-O` for castling,
//!  * `[figure][origin file][origin rank][x]<target>[=promotion]` for everything else,
//!  * `1-0`, `0-1` and `1/2-1/2` to end the game by resignation or agreement,
//!
//! optionally followed by `+` or `#`. Parsing is purely syntactic; whether a move makes sense on a particular board
//! is for the game to decide.

use std::{convert::TryFrom, fmt, str::FromStr};

use derive_more::From;
use thiserror::Error;

use crate::core::*;

/// Possible errors that can arise when parsing a move.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum NotationParseError {
    #[error("empty move")]
    Empty,
    #[error("missing or malformed target square")]
    MissingTarget,
    #[error("unexpected char: {0}")]
    UnexpectedChar(char),
    #[error("invalid promotion: {0:?}")]
    InvalidPromotion(String),
}

/// The check marker that follows a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Punctuation {
    Check,
    Checkmate,
}

impl Punctuation {
    pub fn symbol(punctuation: Option<Punctuation>) -> &'static str {
        match punctuation {
            Some(Punctuation::Check) => "+",
            Some(Punctuation::Checkmate) => "#",
            None => "",
        }
    }
}

/// A non-castling move: one piece travelling from an origin to a target square.
///
/// The origin is optional in both coordinates since notation only names as much of it as is needed to tell the
/// moving piece apart from its siblings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Translation {
    pub origin_file: Option<File>,
    pub origin_rank: Option<Rank>,
    pub figure: PieceKind,
    pub is_capture: bool,
    pub promotion: Option<PieceKind>,
    pub target: Square,
}

impl Translation {
    /// A translation with no disambiguation, no capture, and no promotion.
    pub fn to(figure: PieceKind, target: Square) -> Translation {
        Translation {
            origin_file: None,
            origin_rank: None,
            figure,
            is_capture: false,
            promotion: None,
            target,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, From)]
pub enum Play {
    Castle(CastleSide),
    Translation(Translation),
}

/// One entry of a game's history.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Notation {
    /// The game ended by declaration: a resignation names the victor, an agreed draw names nobody.
    End(Option<Color>),
    Play(Play, Option<Punctuation>),
}

impl FromStr for Notation {
    type Err = NotationParseError;

    fn from_str(s: &str) -> Result<Notation, NotationParseError> {
        match s {
            "" => return Err(NotationParseError::Empty),
            "1-0" => return Ok(Notation::End(Some(Color::White))),
            "0-1" => return Ok(Notation::End(Some(Color::Black))),
            "1/2-1/2" => return Ok(Notation::End(None)),
            _ => {}
        }

        let (body, punctuation) = if let Some(body) = s.strip_suffix('#') {
            (body, Some(Punctuation::Checkmate))
        } else if let Some(body) = s.strip_suffix('+') {
            (body, Some(Punctuation::Check))
        } else {
            (s, None)
        };

        let play = match body {
            "O-O" => Play::Castle(CastleSide::Short),
            "O-O-O" => Play::Castle(CastleSide::Long),
            _ => Play::Translation(parse_translation(body)?),
        };

        Ok(Notation::Play(play, punctuation))
    }
}

fn parse_translation(body: &str) -> Result<Translation, NotationParseError> {
    let (body, promotion) = match body.split_once('=') {
        Some((body, promo)) => {
            let mut chars = promo.chars();
            let kind = match (chars.next(), chars.next()) {
                (Some(c), None) => PieceKind::try_from(c)
                    .ok()
                    .filter(|kind| kind.is_promotable()),
                _ => None,
            };

            match kind {
                Some(kind) => (body, Some(kind)),
                None => return Err(NotationParseError::InvalidPromotion(promo.to_string())),
            }
        }
        None => (body, None),
    };

    let mut chars: Vec<char> = body.chars().collect();
    if chars.len() < 2 {
        return Err(NotationParseError::MissingTarget);
    }

    // The target square is always the last thing before the promotion.
    let rank_c = chars.pop().ok_or(NotationParseError::MissingTarget)?;
    let file_c = chars.pop().ok_or(NotationParseError::MissingTarget)?;
    let target = match (File::try_from(file_c), Rank::try_from(rank_c)) {
        (Ok(file), Ok(rank)) => Square::of(rank, file),
        _ => return Err(NotationParseError::MissingTarget),
    };

    let mut iter = chars.into_iter().peekable();
    let figure = match iter.peek() {
        Some(&c) if matches!(c, 'K' | 'Q' | 'R' | 'B' | 'N') => {
            iter.next();
            PieceKind::try_from(c).map_err(|_| NotationParseError::UnexpectedChar(c))?
        }
        _ => PieceKind::Pawn,
    };

    let origin_file = match iter.peek().map(|&c| File::try_from(c)) {
        Some(Ok(file)) => {
            iter.next();
            Some(file)
        }
        _ => None,
    };

    let origin_rank = match iter.peek().map(|&c| Rank::try_from(c)) {
        Some(Ok(rank)) => {
            iter.next();
            Some(rank)
        }
        _ => None,
    };

    let is_capture = iter.peek() == Some(&'x');
    if is_capture {
        iter.next();
    }

    if let Some(c) = iter.next() {
        return Err(NotationParseError::UnexpectedChar(c));
    }

    Ok(Translation {
        origin_file,
        origin_rank,
        figure,
        is_capture,
        promotion,
        target,
    })
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.figure != PieceKind::Pawn {
            write!(f, "{}", self.figure)?;
        }

        if let Some(file) = self.origin_file {
            write!(f, "{}", file)?;
        }

        if let Some(rank) = self.origin_rank {
            write!(f, "{}", rank)?;
        }

        if self.is_capture {
            write!(f, "x")?;
        }

        write!(f, "{}", self.target)?;
        if let Some(promotion) = self.promotion {
            write!(f, "={}", promotion)?;
        }

        Ok(())
    }
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Play::Castle(CastleSide::Short) => write!(f, "O-O"),
            Play::Castle(CastleSide::Long) => write!(f, "O-O-O"),
            Play::Translation(translation) => write!(f, "{}", translation),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::End(Some(Color::White)) => write!(f, "1-0"),
            Notation::End(Some(Color::Black)) => write!(f, "0-1"),
            Notation::End(None) => write!(f, "1/2-1/2"),
            Notation::Play(play, punctuation) => {
                write!(f, "{}{}", play, Punctuation::symbol(*punctuation))
            }
        }
    }
}

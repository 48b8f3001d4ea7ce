// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{convert::TryFrom, fmt, str::FromStr};

use bitflags::bitflags;
use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SquareParseError {
    #[error("square index out of range: {0}")]
    OutOfRange(u8),
    #[error("square notation must be two characters: {0:?}")]
    InvalidLength(String),
    #[error(transparent)]
    File(#[from] FileParseError),
    #[error(transparent)]
    Rank(#[from] RankParseError),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RankParseError {
    #[error("rank index out of range: {0}")]
    OutOfRange(u8),
    #[error("invalid char: {0}")]
    InvalidChar(char),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FileParseError {
    #[error("file index out of range: {0}")]
    OutOfRange(u8),
    #[error("invalid char: {0}")]
    InvalidChar(char),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PieceParseError {
    #[error("invalid char: {0}")]
    InvalidChar(char),
}

/// A geometric offset between two squares, measured in files and ranks. Vectors are never placed on the board
/// themselves; they only describe how pieces travel across it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Vector {
    pub file: i8,
    pub rank: i8,
}

impl Vector {
    pub const fn new(file: i8, rank: i8) -> Vector {
        Vector { file, rank }
    }

    pub const fn plus(self, other: Vector) -> Vector {
        Vector::new(self.file + other.file, self.rank + other.rank)
    }
}

/// A square on the chessboard.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Square(pub(in crate::core) u8);

impl Square {
    /// Returns the rank of this square on the chessboard.
    pub const fn rank(self) -> Rank {
        Rank(self.0 >> 3)
    }

    /// Returns the file of this square on the chessboard.
    pub const fn file(self) -> File {
        File(self.0 & 7)
    }

    /// Creates a new Square composed of a given rank and file.
    pub const fn of(rank: Rank, file: File) -> Square {
        Square(rank.0 * 8 + file.0)
    }

    /// Returns the square reached by travelling along `vector` from this square, or `None` if that square lies off
    /// of the board.
    pub fn offset(self, vector: Vector) -> Option<Square> {
        let file = self.file().0 as i8 + vector.file;
        let rank = self.rank().0 as i8 + vector.rank;
        if !(0..8).contains(&file) || !(0..8).contains(&rank) {
            return None;
        }

        Some(Square::of(Rank(rank as u8), File(file as u8)))
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Square {
    type Error = SquareParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value >= 64 {
            return Err(SquareParseError::OutOfRange(value));
        }

        Ok(Square(value))
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<_> = s.chars().collect();
        match chars.as_slice() {
            &[file, rank] => Ok(Square::of(Rank::try_from(rank)?, File::try_from(file)?)),
            _ => Err(SquareParseError::InvalidLength(s.to_string())),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

pub const A1: Square = Square::of(RANK_1, FILE_A);
pub const B1: Square = Square::of(RANK_1, FILE_B);
pub const C1: Square = Square::of(RANK_1, FILE_C);
pub const D1: Square = Square::of(RANK_1, FILE_D);
pub const E1: Square = Square::of(RANK_1, FILE_E);
pub const F1: Square = Square::of(RANK_1, FILE_F);
pub const G1: Square = Square::of(RANK_1, FILE_G);
pub const H1: Square = Square::of(RANK_1, FILE_H);
pub const A2: Square = Square::of(RANK_2, FILE_A);
pub const B2: Square = Square::of(RANK_2, FILE_B);
pub const C2: Square = Square::of(RANK_2, FILE_C);
pub const D2: Square = Square::of(RANK_2, FILE_D);
pub const E2: Square = Square::of(RANK_2, FILE_E);
pub const F2: Square = Square::of(RANK_2, FILE_F);
pub const G2: Square = Square::of(RANK_2, FILE_G);
pub const H2: Square = Square::of(RANK_2, FILE_H);
pub const A3: Square = Square::of(RANK_3, FILE_A);
pub const B3: Square = Square::of(RANK_3, FILE_B);
pub const C3: Square = Square::of(RANK_3, FILE_C);
pub const D3: Square = Square::of(RANK_3, FILE_D);
pub const E3: Square = Square::of(RANK_3, FILE_E);
pub const F3: Square = Square::of(RANK_3, FILE_F);
pub const G3: Square = Square::of(RANK_3, FILE_G);
pub const H3: Square = Square::of(RANK_3, FILE_H);
pub const A4: Square = Square::of(RANK_4, FILE_A);
pub const B4: Square = Square::of(RANK_4, FILE_B);
pub const C4: Square = Square::of(RANK_4, FILE_C);
pub const D4: Square = Square::of(RANK_4, FILE_D);
pub const E4: Square = Square::of(RANK_4, FILE_E);
pub const F4: Square = Square::of(RANK_4, FILE_F);
pub const G4: Square = Square::of(RANK_4, FILE_G);
pub const H4: Square = Square::of(RANK_4, FILE_H);
pub const A5: Square = Square::of(RANK_5, FILE_A);
pub const B5: Square = Square::of(RANK_5, FILE_B);
pub const C5: Square = Square::of(RANK_5, FILE_C);
pub const D5: Square = Square::of(RANK_5, FILE_D);
pub const E5: Square = Square::of(RANK_5, FILE_E);
pub const F5: Square = Square::of(RANK_5, FILE_F);
pub const G5: Square = Square::of(RANK_5, FILE_G);
pub const H5: Square = Square::of(RANK_5, FILE_H);
pub const A6: Square = Square::of(RANK_6, FILE_A);
pub const B6: Square = Square::of(RANK_6, FILE_B);
pub const C6: Square = Square::of(RANK_6, FILE_C);
pub const D6: Square = Square::of(RANK_6, FILE_D);
pub const E6: Square = Square::of(RANK_6, FILE_E);
pub const F6: Square = Square::of(RANK_6, FILE_F);
pub const G6: Square = Square::of(RANK_6, FILE_G);
pub const H6: Square = Square::of(RANK_6, FILE_H);
pub const A7: Square = Square::of(RANK_7, FILE_A);
pub const B7: Square = Square::of(RANK_7, FILE_B);
pub const C7: Square = Square::of(RANK_7, FILE_C);
pub const D7: Square = Square::of(RANK_7, FILE_D);
pub const E7: Square = Square::of(RANK_7, FILE_E);
pub const F7: Square = Square::of(RANK_7, FILE_F);
pub const G7: Square = Square::of(RANK_7, FILE_G);
pub const H7: Square = Square::of(RANK_7, FILE_H);
pub const A8: Square = Square::of(RANK_8, FILE_A);
pub const B8: Square = Square::of(RANK_8, FILE_B);
pub const C8: Square = Square::of(RANK_8, FILE_C);
pub const D8: Square = Square::of(RANK_8, FILE_D);
pub const E8: Square = Square::of(RANK_8, FILE_E);
pub const F8: Square = Square::of(RANK_8, FILE_F);
pub const G8: Square = Square::of(RANK_8, FILE_G);
pub const H8: Square = Square::of(RANK_8, FILE_H);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rank(u8);

impl Rank {
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rank {
    type Error = RankParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value >= 8 {
            return Err(RankParseError::OutOfRange(value));
        }

        Ok(Rank(value))
    }
}

impl TryFrom<char> for Rank {
    type Error = RankParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '1'..='8' => Ok(Rank(value as u8 - b'1')),
            c => Err(RankParseError::InvalidChar(c)),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", (b'1' + self.0) as char)
    }
}

pub const RANK_1: Rank = Rank(0);
pub const RANK_2: Rank = Rank(1);
pub const RANK_3: Rank = Rank(2);
pub const RANK_4: Rank = Rank(3);
pub const RANK_5: Rank = Rank(4);
pub const RANK_6: Rank = Rank(5);
pub const RANK_7: Rank = Rank(6);
pub const RANK_8: Rank = Rank(7);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct File(u8);

impl File {
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for File {
    type Error = FileParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value >= 8 {
            return Err(FileParseError::OutOfRange(value));
        }

        Ok(File(value))
    }
}

impl TryFrom<char> for File {
    type Error = FileParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'a'..='h' => Ok(File(value as u8 - b'a')),
            c => Err(FileParseError::InvalidChar(c)),
        }
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", (b'a' + self.0) as char)
    }
}

pub const FILE_A: File = File(0);
pub const FILE_B: File = File(1);
pub const FILE_C: File = File(2);
pub const FILE_D: File = File(3);
pub const FILE_E: File = File(4);
pub const FILE_F: File = File(5);
pub const FILE_G: File = File(6);
pub const FILE_H: File = File(7);

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The unit vector pointing towards the opponent's side of the board.
    pub const fn forward(self) -> Vector {
        match self {
            Color::White => Vector::new(0, 1),
            Color::Black => Vector::new(0, -1),
        }
    }

    /// The rank that this color's king and rooks start on.
    pub const fn back_rank(self) -> Rank {
        match self {
            Color::White => RANK_1,
            Color::Black => RANK_8,
        }
    }

    /// The rank that this color's pawns start on.
    pub const fn pawn_rank(self) -> Rank {
        match self {
            Color::White => RANK_2,
            Color::Black => RANK_7,
        }
    }

    /// The rank that this color's pawns promote on.
    pub const fn promotion_rank(self) -> Rank {
        match self {
            Color::White => RANK_8,
            Color::Black => RANK_1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// The figures a pawn may promote to, in the order candidates are generated.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub const fn is_promotable(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

impl TryFrom<char> for PieceKind {
    type Error = PieceParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let kind = match value {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            c => return Err(PieceParseError::InvalidChar(c)),
        };

        Ok(kind)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        };

        write!(f, "{}", c)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        Piece { color, kind }
    }
}

/// Pieces are written the way FEN writes them: uppercase for white, lowercase for black.
impl TryFrom<char> for Piece {
    type Error = PieceParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let color = if value.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        let kind = PieceKind::try_from(value.to_ascii_uppercase())
            .map_err(|_| PieceParseError::InvalidChar(value))?;
        Ok(Piece::new(color, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.kind.to_string();
        match self.color {
            Color::White => write!(f, "{}", c),
            Color::Black => write!(f, "{}", c.to_ascii_lowercase()),
        }
    }
}

/// The two ways a king may castle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Towards the h-file; `O-O`.
    Short,
    /// Towards the a-file; `O-O-O`.
    Long,
}

impl CastleSide {
    /// The file the king lands on.
    pub const fn king_target(self) -> File {
        match self {
            CastleSide::Short => FILE_G,
            CastleSide::Long => FILE_C,
        }
    }

    /// The file the rook starts on.
    pub const fn rook_origin(self) -> File {
        match self {
            CastleSide::Short => FILE_H,
            CastleSide::Long => FILE_A,
        }
    }

    /// The file the rook lands on, which is also the file the king passes through.
    pub const fn rook_target(self) -> File {
        match self {
            CastleSide::Short => FILE_F,
            CastleSide::Long => FILE_D,
        }
    }
}

bitflags! {
    pub struct CastleStatus: u8 {
        const NONE = 0;
        const WHITE_KINGSIDE = 0b0000_0001;
        const WHITE_QUEENSIDE =0b0000_0010;
        const WHITE = Self::WHITE_KINGSIDE.bits | Self::WHITE_QUEENSIDE.bits;
        const BLACK_KINGSIDE = 0b0000_0100;
        const BLACK_QUEENSIDE = 0b0000_1000;
        const BLACK = Self::BLACK_KINGSIDE.bits | Self::BLACK_QUEENSIDE.bits;
    }
}

impl CastleStatus {
    pub const fn of(color: Color, side: CastleSide) -> CastleStatus {
        match (color, side) {
            (Color::White, CastleSide::Short) => CastleStatus::WHITE_KINGSIDE,
            (Color::White, CastleSide::Long) => CastleStatus::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Short) => CastleStatus::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Long) => CastleStatus::BLACK_QUEENSIDE,
        }
    }

    /// The rights that are lost once a move starts or ends on the given square. Touching a king's home square loses
    /// both of that side's rights; touching a rook's home square loses the right on that rook's side.
    pub fn touched_by(square: Square) -> CastleStatus {
        let mut lost = CastleStatus::NONE;
        for color in colors() {
            let back_rank = color.back_rank();
            if square == Square::of(back_rank, FILE_E) {
                lost |= CastleStatus::of(color, CastleSide::Short);
                lost |= CastleStatus::of(color, CastleSide::Long);
            }

            for side in [CastleSide::Short, CastleSide::Long] {
                if square == Square::of(back_rank, side.rook_origin()) {
                    lost |= CastleStatus::of(color, side);
                }
            }
        }

        lost
    }
}

macro_rules! type_iterator {
    ($name:ident, $type:ident, $max:expr) => {
        pub struct $name(u8, u8);

        impl Iterator for $name {
            type Item = $type;

            fn next(&mut self) -> Option<Self::Item> {
                if self.0 >= self.1 {
                    None
                } else {
                    let next = self.0;
                    self.0 += 1;
                    Some($type(next))
                }
            }
        }

        impl ::std::iter::DoubleEndedIterator for $name {
            fn next_back(&mut self) -> Option<Self::Item> {
                if self.1 <= self.0 {
                    None
                } else {
                    self.1 -= 1;
                    Some($type(self.1))
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name(0, $max)
            }
        }
    };
}

type_iterator!(AllSquares, Square, 64);
type_iterator!(AllRanks, Rank, 8);
type_iterator!(AllFiles, File, 8);

pub fn squares() -> AllSquares {
    AllSquares::default()
}

pub fn ranks() -> AllRanks {
    AllRanks::default()
}

pub fn files() -> AllFiles {
    AllFiles::default()
}

pub fn colors() -> ::std::array::IntoIter<Color, 2> {
    [Color::White, Color::Black].into_iter()
}

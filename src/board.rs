// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

use crate::core::{self, *};

/// A single piece relocation. Most moves are one mutation; castling is three, so that the square the king passes
/// through is checked for safety like any other.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Mutation {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    /// The figure the piece becomes on arrival, if it is a promoting pawn.
    pub promotion: Option<PieceKind>,
}

impl Mutation {
    pub fn new(piece: Piece, from: Square, to: Square) -> Mutation {
        Mutation {
            piece,
            from,
            to,
            promotion: None,
        }
    }

    pub fn promoting(piece: Piece, from: Square, to: Square, promotion: PieceKind) -> Mutation {
        Mutation {
            piece,
            from,
            to,
            promotion: Some(promotion),
        }
    }
}

/// A move that the side to move may legally play, along with the board it produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegalMove {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub is_capture: bool,
    pub promotion: Option<PieceKind>,
    pub castle: Option<CastleSide>,
    pub board: Board,
}

/// A board, representing a snapshot of a game in progress. Boards are values: every mutation produces a new board
/// and leaves the original untouched, which makes it cheap to try a move and throw the result away if it turns out
/// to leave the mover's king in check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// The piece on each square, indexed by `Square::as_u8`.
    squares: [Option<Piece>; 64],
    /// Color whose turn it is to move.
    side_to_move: Color,
    /// The square skipped over by a pawn's double step on the previous ply, if any.
    en_passant_square: Option<Square>,
    /// Castle rights still held by both players.
    castle_status: CastleStatus,
    /// Plies since the last pawn move or capture.
    halfmove_clock: u16,
}

impl Board {
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    /// Whether the given side still holds the right to castle on the given side. This says nothing about whether
    /// castling is currently possible; see `moves` for that.
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.castle_status.contains(CastleStatus::of(color, side))
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.as_u8() as usize]
    }

    /// Every occupied square and the piece on it.
    pub fn occupancy(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        core::squares().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupancy().filter(move |(_, piece)| piece.color == color)
    }

    pub fn kings(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        self.pieces(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.as_u8() as usize] = piece;
    }

    fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|sq| sq.is_some()).count()
    }
}

impl Board {
    /// An empty board with white to move. Castle rights are all held, though castling still needs the king and rook
    /// on their home squares.
    pub fn new() -> Board {
        Board {
            squares: [None; 64],
            side_to_move: Color::White,
            en_passant_square: None,
            castle_status: CastleStatus::WHITE | CastleStatus::BLACK,
            halfmove_clock: 0,
        }
    }

    /// Builds a board from an explicit placement of pieces. Later entries for the same square replace earlier ones.
    pub fn from_pieces(pieces: impl IntoIterator<Item = (Square, Piece)>) -> Board {
        let mut board = Board::new();
        for (square, piece) in pieces {
            board.set(square, Some(piece));
        }

        board
    }

    pub fn from_start_position() -> Board {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::new();
        for color in core::colors() {
            for (file, kind) in core::files().zip(BACK_RANK) {
                board.set(
                    Square::of(color.back_rank(), file),
                    Some(Piece::new(color, kind)),
                );
                board.set(
                    Square::of(color.pawn_rank(), file),
                    Some(Piece::new(color, PieceKind::Pawn)),
                );
            }
        }

        board
    }

    pub fn with_side_to_move(mut self, color: Color) -> Board {
        self.side_to_move = color;
        self
    }
}

//
// Move generation and check detection.
//
// Everything here is driven by the path geometry in `core::paths`. The same routine that finds a piece's legal
// destinations also decides whether a king is attacked, so the rules for "can move there" and "gives check" can't
// drift apart.
//

impl Board {
    /// Returns the squares that `piece`, standing on `from`, can reach in one move. When `is_capture` is set only
    /// capturing destinations are returned, otherwise only quiet ones (including castling destinations for kings).
    ///
    /// These destinations are pseudo-legal: they respect occupancy but not king safety.
    pub fn moves(&self, piece: Piece, from: Square, is_capture: bool) -> Vec<Square> {
        let mut destinations = if !is_capture && piece.kind == PieceKind::King {
            self.castle_destinations(piece, from)
        } else {
            vec![]
        };

        let paths = if is_capture {
            core::capture_paths(piece, from)
        } else {
            core::move_paths(piece, from)
        };

        for path in paths {
            let obstruction = path.iter().position(|&sq| self.piece_at(sq).is_some());
            if !is_capture {
                let end = obstruction.unwrap_or(path.len());
                destinations.extend_from_slice(&path[..end]);
                continue;
            }

            match obstruction {
                Some(idx) => {
                    let target = path[idx];
                    if let Some(victim) = self.piece_at(target) {
                        if victim.color != piece.color {
                            destinations.push(target);
                        }
                    }
                }
                None => {
                    if let &[target] = path.as_slice() {
                        if self.is_en_passant_capture(piece, from, target) {
                            destinations.push(target);
                        }
                    }
                }
            }
        }

        destinations
    }

    fn is_en_passant_capture(&self, piece: Piece, from: Square, target: Square) -> bool {
        if piece.kind != PieceKind::Pawn || Some(target) != self.en_passant_square {
            return false;
        }

        // The pawn that made the double step sits beside the capturer, on the target's file.
        let victim = Square::of(from.rank(), target.file());
        self.piece_at(victim) == Some(Piece::new(piece.color.toggle(), PieceKind::Pawn))
    }

    fn castle_destinations(&self, king: Piece, from: Square) -> Vec<Square> {
        let color = king.color;
        let back_rank = color.back_rank();
        if from != Square::of(back_rank, FILE_E) {
            return vec![];
        }

        let mut destinations = vec![];
        for side in [CastleSide::Short, CastleSide::Long] {
            if !self.can_castle(color, side) {
                continue;
            }

            let rook_home = Square::of(back_rank, side.rook_origin());
            if self.piece_at(rook_home) != Some(Piece::new(color, PieceKind::Rook)) {
                continue;
            }

            let (lo, hi) = if side.rook_origin().as_u8() < FILE_E.as_u8() {
                (side.rook_origin().as_u8(), FILE_E.as_u8())
            } else {
                (FILE_E.as_u8(), side.rook_origin().as_u8())
            };

            let path_clear = core::files()
                .filter(|file| file.as_u8() > lo && file.as_u8() < hi)
                .all(|file| self.piece_at(Square::of(back_rank, file)).is_none());
            if !path_clear {
                continue;
            }

            destinations.push(Square::of(back_rank, side.king_target()));
        }

        // Only pay for a check test if castling is otherwise on the table.
        if !destinations.is_empty() && self.is_check(color) {
            return vec![];
        }

        destinations
    }

    /// Returns whether any king of the given color is attacked by an enemy piece.
    pub fn is_check(&self, color: Color) -> bool {
        let kings: Vec<_> = self.kings(color).collect();
        if kings.is_empty() {
            return false;
        }

        self.pieces(color.toggle()).any(|(sq, piece)| {
            self.moves(piece, sq, true)
                .iter()
                .any(|target| kings.contains(target))
        })
    }

    /// Whether the side to move has no move that leaves its king safe.
    pub fn is_no_move_possible(&self) -> bool {
        self.legal_moves().is_empty()
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check(self.side_to_move) && self.is_no_move_possible()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check(self.side_to_move) && self.is_no_move_possible()
    }

    /// Enumerates every move the side to move can legally make. Pawns reaching the last rank produce one entry per
    /// promotion figure.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        let us = self.side_to_move;
        let mut legal = vec![];
        for (from, piece) in self.pieces(us) {
            for is_capture in [false, true] {
                for to in self.moves(piece, from, is_capture) {
                    let promotions: Vec<Option<PieceKind>> =
                        if piece.kind == PieceKind::Pawn && to.rank() == us.promotion_rank() {
                            PieceKind::PROMOTIONS.iter().copied().map(Some).collect()
                        } else {
                            vec![None]
                        };

                    for promotion in promotions {
                        let mutations = self.mutations(piece, from, to, promotion);
                        if let Some(board) = self.mutated_board(&mutations) {
                            legal.push(LegalMove {
                                piece,
                                from,
                                to,
                                is_capture,
                                promotion,
                                castle: castle_side(piece, from, to),
                                board,
                            });
                        }
                    }
                }
            }
        }

        legal
    }
}

//
// Mutation.
//
// A move is applied as a list of mutations. `mutation` applies one of them without any legality checks, while
// `mutated_board` applies a whole list and refuses the result if the mover's king is ever left in check along the
// way.
//

impl Board {
    /// Breaks a move down into the mutations that carry it out.
    pub fn mutations(
        &self,
        piece: Piece,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Vec<Mutation> {
        if let Some(side) = castle_side(piece, from, to) {
            let back_rank = from.rank();
            let via = Square::of(back_rank, side.rook_target());
            let rook = Piece::new(piece.color, PieceKind::Rook);
            return vec![
                Mutation::new(piece, from, via),
                Mutation::new(piece, via, to),
                Mutation::new(rook, Square::of(back_rank, side.rook_origin()), via),
            ];
        }

        match promotion {
            Some(kind) => vec![Mutation::promoting(piece, from, to, kind)],
            None => vec![Mutation::new(piece, from, to)],
        }
    }

    /// Applies a single mutation, producing a new board. The side to move is left unchanged.
    pub fn mutation(&self, mutation: &Mutation) -> Board {
        let Mutation {
            piece,
            from,
            to,
            promotion,
        } = *mutation;

        let mut board = self.clone();
        if from.file() != to.file() && self.is_en_passant_capture(piece, from, to) {
            board.set(Square::of(from.rank(), to.file()), None);
        }

        let arriving = match promotion {
            Some(kind) => Piece::new(piece.color, kind),
            None => piece,
        };

        board.set(from, None);
        board.set(to, Some(arriving));

        let distance = to.rank().as_u8() as i8 - from.rank().as_u8() as i8;
        board.en_passant_square = if piece.kind == PieceKind::Pawn && distance.abs() == 2 {
            from.offset(piece.color.forward())
        } else {
            None
        };

        board
            .castle_status
            .remove(CastleStatus::touched_by(from) | CastleStatus::touched_by(to));
        board
    }

    /// Applies the mutations in order and hands the turn to the opponent. Returns `None` if the mover's king is in
    /// check after any of them.
    pub fn mutated_board(&self, mutations: &[Mutation]) -> Option<Board> {
        let us = self.side_to_move;
        let mut board = self.clone();
        for mutation in mutations {
            board = board.mutation(mutation);
            if board.is_check(us) {
                return None;
            }
        }

        let captured = board.occupied_count() < self.occupied_count();
        let pawn_moved = mutations
            .iter()
            .any(|mutation| mutation.piece.kind == PieceKind::Pawn);
        board.halfmove_clock = if captured || pawn_moved {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };

        board.side_to_move = us.toggle();
        Some(board)
    }
}

/// If this king move is a castle, returns which side it castles to.
fn castle_side(piece: Piece, from: Square, to: Square) -> Option<CastleSide> {
    if piece.kind != PieceKind::King {
        return None;
    }

    let back_rank = piece.color.back_rank();
    if from != Square::of(back_rank, FILE_E) {
        return None;
    }

    [CastleSide::Short, CastleSide::Long]
        .into_iter()
        .find(|side| to == Square::of(back_rank, side.king_target()))
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in core::ranks().rev() {
            for file in core::files() {
                let sq = Square::of(rank, file);
                if let Some(piece) = self.piece_at(sq) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in core::files() {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in core::files() {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, convert::TryFrom};

    use super::*;

    fn board(pieces: &[(Square, char)]) -> Board {
        Board::from_pieces(
            pieces
                .iter()
                .map(|&(sq, c)| (sq, Piece::try_from(c).unwrap())),
        )
    }

    fn destinations(board: &Board, from: Square) -> HashSet<Square> {
        let piece = board.piece_at(from).unwrap();
        let mut squares: HashSet<_> = board.moves(piece, from, false).into_iter().collect();
        squares.extend(board.moves(piece, from, true));
        squares
    }

    fn legal_destinations(board: &Board, from: Square) -> HashSet<Square> {
        board
            .legal_moves()
            .into_iter()
            .filter(|mov| mov.from == from)
            .map(|mov| mov.to)
            .collect()
    }

    fn set(squares: &[Square]) -> HashSet<Square> {
        squares.iter().copied().collect()
    }

    fn play(board: &Board, from: Square, to: Square) -> Board {
        let piece = board.piece_at(from).unwrap();
        let mutations = board.mutations(piece, from, to, None);
        board.mutated_board(&mutations).unwrap()
    }

    mod start {
        use super::*;

        #[test]
        fn pawns_step_once_or_twice() {
            let pos = Board::from_start_position();
            for file in files() {
                let white = Square::of(RANK_2, file);
                assert_eq!(
                    set(&[Square::of(RANK_3, file), Square::of(RANK_4, file)]),
                    legal_destinations(&pos, white)
                );

                let black = Square::of(RANK_7, file);
                assert_eq!(
                    set(&[Square::of(RANK_6, file), Square::of(RANK_5, file)]),
                    destinations(&pos, black)
                );
            }
        }

        #[test]
        fn black_pawns_once_black_to_move() {
            let pos = Board::from_start_position().with_side_to_move(Color::Black);
            assert_eq!(set(&[E6, E5]), legal_destinations(&pos, E7));
        }

        #[test]
        fn knights() {
            let pos = Board::from_start_position();
            assert_eq!(set(&[A3, C3]), legal_destinations(&pos, B1));
            assert_eq!(set(&[F3, H3]), legal_destinations(&pos, G1));
        }

        #[test]
        fn twenty_opening_moves() {
            let pos = Board::from_start_position();
            assert_eq!(20, pos.legal_moves().len());
        }

        #[test]
        fn blocked_pieces() {
            let pos = Board::from_start_position();
            assert!(destinations(&pos, A1).is_empty());
            assert!(destinations(&pos, D1).is_empty());
            assert!(destinations(&pos, E1).is_empty());
            assert!(destinations(&pos, C1).is_empty());
        }
    }

    mod generation {
        use super::*;

        #[test]
        fn sliding_stops_before_friend() {
            let pos = board(&[(D1, 'R'), (D4, 'P')]);
            let rook = pos.piece_at(D1).unwrap();
            let quiet: HashSet<_> = pos.moves(rook, D1, false).into_iter().collect();
            assert_eq!(set(&[D2, D3, A1, B1, C1, E1, F1, G1, H1]), quiet);
            assert!(pos.moves(rook, D1, true).is_empty());
        }

        #[test]
        fn sliding_captures_first_enemy_only() {
            let pos = board(&[(D1, 'R'), (D4, 'p'), (D6, 'q')]);
            let rook = pos.piece_at(D1).unwrap();
            assert_eq!(vec![D4], pos.moves(rook, D1, true));
        }

        #[test]
        fn pawn_does_not_capture_forward() {
            let pos = board(&[(E4, 'P'), (E5, 'p')]);
            assert!(destinations(&pos, E4).is_empty());
        }

        #[test]
        fn pawn_double_step_blocked_by_near_square() {
            let pos = board(&[(E2, 'P'), (E3, 'n')]);
            assert!(destinations(&pos, E2).is_empty());
        }

        #[test]
        fn pawn_double_step_blocked_by_far_square() {
            let pos = board(&[(E2, 'P'), (E4, 'n')]);
            assert_eq!(set(&[E3]), destinations(&pos, E2));
        }

        #[test]
        fn pawn_captures_enemy_not_friend() {
            let pos = board(&[(E4, 'P'), (D5, 'p'), (F5, 'N')]);
            let pawn = pos.piece_at(E4).unwrap();
            assert_eq!(vec![D5], pos.moves(pawn, E4, true));
        }

        #[test]
        fn king_captures_adjacent() {
            let pos = board(&[(E4, 'K'), (E5, 'r')]);
            let king = pos.piece_at(E4).unwrap();
            assert_eq!(vec![E5], pos.moves(king, E4, true));
        }
    }

    mod check {
        use super::*;

        #[test]
        fn rook_gives_check_along_file() {
            let pos = board(&[(E1, 'K'), (E8, 'r')]);
            assert!(pos.is_check(Color::White));
            assert!(!pos.is_check(Color::Black));
        }

        #[test]
        fn blocked_rook_gives_no_check() {
            let pos = board(&[(E1, 'K'), (E4, 'P'), (E8, 'r')]);
            assert!(!pos.is_check(Color::White));
        }

        #[test]
        fn pawn_gives_check_diagonally_only() {
            assert!(board(&[(E1, 'K'), (D2, 'p')]).is_check(Color::White));
            assert!(!board(&[(E1, 'K'), (E2, 'p')]).is_check(Color::White));
        }

        #[test]
        fn no_king_no_check() {
            assert!(!board(&[(E8, 'r')]).is_check(Color::White));
        }

        #[test]
        fn pinned_piece_cannot_leave_file() {
            let pos = board(&[(E1, 'K'), (E2, 'B'), (E8, 'r')]);
            assert!(legal_destinations(&pos, E2).is_empty());
        }

        #[test]
        fn pinned_rook_may_capture_pinner() {
            let pos = board(&[(E2, 'K'), (E3, 'R'), (E6, 'r')]);
            assert_eq!(set(&[E4, E5, E6]), legal_destinations(&pos, E3));
        }

        #[test]
        fn king_cannot_step_into_pawn_attack() {
            let pos = board(&[(A5, 'K'), (C7, 'p'), (H4, 'k')]);
            assert!(!legal_destinations(&pos, A5).contains(&B6));
        }

        #[test]
        fn back_rank_mate() {
            let pos = board(&[(G1, 'K'), (F2, 'P'), (G2, 'P'), (H2, 'P'), (A1, 'r'), (G8, 'k')]);
            assert!(pos.is_check(Color::White));
            assert!(pos.is_checkmate());
            assert!(!pos.is_stalemate());
        }

        #[test]
        fn cornered_king_stalemate() {
            let pos = board(&[(H8, 'k'), (F7, 'Q'), (A1, 'K')]).with_side_to_move(Color::Black);
            assert!(pos.is_no_move_possible());
            assert!(pos.is_stalemate());
            assert!(!pos.is_checkmate());
        }
    }

    mod en_passant {
        use super::*;

        #[test]
        fn double_step_sets_skipped_square() {
            let pos = board(&[(E2, 'P'), (D4, 'p')]);
            let pos = play(&pos, E2, E4);
            assert_eq!(Some(E3), pos.en_passant_square());
            assert_eq!(Color::Black, pos.side_to_move());
        }

        #[test]
        fn capture_removes_passed_pawn() {
            let pos = board(&[(E2, 'P'), (D4, 'p')]);
            let pos = play(&pos, E2, E4);
            let pawn = pos.piece_at(D4).unwrap();
            assert_eq!(vec![E3], pos.moves(pawn, D4, true));

            let pos = play(&pos, D4, E3);
            assert_eq!(None, pos.piece_at(E4));
            assert_eq!(
                Some(Piece::new(Color::Black, PieceKind::Pawn)),
                pos.piece_at(E3)
            );
            assert_eq!(None, pos.en_passant_square());
            assert_eq!(0, pos.halfmove_clock());
        }

        #[test]
        fn cleared_after_one_ply() {
            let pos = board(&[(E2, 'P'), (D4, 'p'), (A7, 'p')]);
            let pos = play(&pos, E2, E4);
            let pos = play(&pos, A7, A6);
            assert_eq!(None, pos.en_passant_square());
            let pawn = pos.piece_at(D4).unwrap();
            assert!(pos.moves(pawn, D4, true).is_empty());
        }

        #[test]
        fn knights_do_not_capture_en_passant() {
            let pos = board(&[(E2, 'P'), (D5, 'n'), (D4, 'p')]);
            let pos = play(&pos, E2, E4);
            let knight = pos.piece_at(D5).unwrap();
            assert!(!pos.moves(knight, D5, true).contains(&E3));
        }
    }

    mod castling {
        use super::*;

        fn castle_board() -> Board {
            board(&[(E1, 'K'), (A1, 'R'), (H1, 'R'), (E8, 'k')])
        }

        #[test]
        fn both_sides_available() {
            let pos = castle_board();
            assert!(legal_destinations(&pos, E1).is_superset(&set(&[C1, G1])));
        }

        #[test]
        fn short_castle_moves_rook() {
            let pos = play(&castle_board(), E1, G1);
            assert_eq!(Some(Piece::new(Color::White, PieceKind::King)), pos.piece_at(G1));
            assert_eq!(Some(Piece::new(Color::White, PieceKind::Rook)), pos.piece_at(F1));
            assert_eq!(None, pos.piece_at(H1));
            assert_eq!(None, pos.piece_at(E1));
            assert!(!pos.can_castle(Color::White, CastleSide::Long));
            assert_eq!(1, pos.halfmove_clock());
        }

        #[test]
        fn long_castle_moves_rook() {
            let pos = play(&castle_board(), E1, C1);
            assert_eq!(Some(Piece::new(Color::White, PieceKind::King)), pos.piece_at(C1));
            assert_eq!(Some(Piece::new(Color::White, PieceKind::Rook)), pos.piece_at(D1));
            assert_eq!(None, pos.piece_at(A1));
        }

        #[test]
        fn blocked_by_piece_between() {
            let mut pos = castle_board();
            pos.set(B1, Some(Piece::new(Color::White, PieceKind::Knight)));
            let dests = legal_destinations(&pos, E1);
            assert!(!dests.contains(&C1));
            assert!(dests.contains(&G1));
        }

        #[test]
        fn not_out_of_check() {
            let mut pos = castle_board();
            pos.set(E5, Some(Piece::new(Color::Black, PieceKind::Rook)));
            let dests = legal_destinations(&pos, E1);
            assert!(!dests.contains(&C1));
            assert!(!dests.contains(&G1));
        }

        #[test]
        fn not_through_check() {
            let mut pos = castle_board();
            pos.set(F5, Some(Piece::new(Color::Black, PieceKind::Rook)));
            let dests = legal_destinations(&pos, E1);
            assert!(!dests.contains(&G1));
            assert!(dests.contains(&C1));
        }

        #[test]
        fn not_into_check() {
            let mut pos = castle_board();
            pos.set(G5, Some(Piece::new(Color::Black, PieceKind::Rook)));
            assert!(!legal_destinations(&pos, E1).contains(&G1));
        }

        #[test]
        fn attacked_b_file_does_not_matter() {
            let mut pos = castle_board();
            pos.set(B5, Some(Piece::new(Color::Black, PieceKind::Rook)));
            assert!(legal_destinations(&pos, E1).contains(&C1));
        }

        #[test]
        fn rook_returning_home_does_not_restore_rights() {
            let pos = castle_board();
            let pos = play(&pos, H1, H2);
            let pos = play(&pos, E8, E7);
            let pos = play(&pos, H2, H1);
            let pos = play(&pos, E7, E8);
            assert!(!pos.can_castle(Color::White, CastleSide::Short));
            assert!(pos.can_castle(Color::White, CastleSide::Long));
            let dests = legal_destinations(&pos, E1);
            assert!(!dests.contains(&G1));
            assert!(dests.contains(&C1));
        }

        #[test]
        fn king_returning_home_does_not_restore_rights() {
            let pos = castle_board();
            let pos = play(&pos, E1, E2);
            let pos = play(&pos, E8, E7);
            let pos = play(&pos, E2, E1);
            let pos = play(&pos, E7, E8);
            let dests = legal_destinations(&pos, E1);
            assert!(!dests.contains(&G1));
            assert!(!dests.contains(&C1));
        }

        #[test]
        fn captured_rook_loses_rights() {
            let pos = board(&[(E1, 'K'), (H1, 'R'), (E8, 'k'), (H8, 'r')]);
            let pos = play(&pos, H1, H8);
            assert!(!pos.can_castle(Color::Black, CastleSide::Short));
        }
    }

    mod mutation {
        use super::*;

        #[test]
        fn promotion_replaces_pawn() {
            let pos = board(&[(E7, 'P'), (A1, 'K'), (A8, 'k')]);
            let pawn = pos.piece_at(E7).unwrap();
            let mutations = pos.mutations(pawn, E7, E8, Some(PieceKind::Knight));
            let pos = pos.mutated_board(&mutations).unwrap();
            assert_eq!(Some(Piece::new(Color::White, PieceKind::Knight)), pos.piece_at(E8));
            assert_eq!(None, pos.piece_at(E7));
        }

        #[test]
        fn promotions_enumerated() {
            let pos = board(&[(E7, 'P'), (A1, 'K'), (A8, 'k')]);
            let promotions: HashSet<_> = pos
                .legal_moves()
                .into_iter()
                .filter(|mov| mov.from == E7)
                .map(|mov| mov.promotion)
                .collect();
            assert_eq!(4, promotions.len());
            assert!(!promotions.contains(&None));
        }

        #[test]
        fn original_is_untouched() {
            let pos = Board::from_start_position();
            let _ = play(&pos, E2, E4);
            assert_eq!(Board::from_start_position(), pos);
        }

        #[test]
        fn halfmove_clock_counts_quiet_moves() {
            let pos = board(&[(E1, 'K'), (E8, 'k'), (B1, 'N')]);
            let pos = play(&pos, B1, C3);
            let pos = play(&pos, E8, E7);
            assert_eq!(2, pos.halfmove_clock());
        }

        #[test]
        fn self_check_rejected() {
            let pos = board(&[(E1, 'K'), (E2, 'R'), (E8, 'r')]);
            let rook = pos.piece_at(E2).unwrap();
            let mutations = pos.mutations(rook, E2, D2, None);
            assert_eq!(None, pos.mutated_board(&mutations));
        }
    }
}

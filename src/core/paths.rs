// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Static movement geometry for every figure.
//!
//! A piece's reach from a square is described as a list of *paths*. Each path radiates outward from the origin in a
//! single direction and lists its squares in order of increasing distance, so that the first occupied square on a
//! path is the one that blocks everything behind it. Paths never leave the board; offsets that would are dropped.
//!
//! Geometry knows nothing about occupancy. The board decides which squares of a path are reachable.

use crate::core::*;

/// An ordered run of squares leading away from a piece's origin.
pub type Path = Vec<Square>;

const ORTHOGONALS: [Vector; 4] = [
    Vector::new(0, 1),
    Vector::new(1, 0),
    Vector::new(0, -1),
    Vector::new(-1, 0),
];

const DIAGONALS: [Vector; 4] = [
    Vector::new(1, 1),
    Vector::new(1, -1),
    Vector::new(-1, -1),
    Vector::new(-1, 1),
];

const KNIGHT_JUMPS: [Vector; 8] = [
    Vector::new(1, 2),
    Vector::new(2, 1),
    Vector::new(2, -1),
    Vector::new(1, -2),
    Vector::new(-1, -2),
    Vector::new(-2, -1),
    Vector::new(-2, 1),
    Vector::new(-1, 2),
];

/// Casts a ray from `from` in direction `dir` until it falls off the board.
fn ray(from: Square, dir: Vector) -> Path {
    let mut path = Vec::new();
    let mut cursor = from;
    while let Some(next) = cursor.offset(dir) {
        path.push(next);
        cursor = next;
    }

    path
}

fn rays(from: Square, dirs: &[Vector]) -> Vec<Path> {
    dirs.iter()
        .map(|&dir| ray(from, dir))
        .filter(|path| !path.is_empty())
        .collect()
}

fn steps(from: Square, offsets: &[Vector]) -> Vec<Path> {
    offsets
        .iter()
        .filter_map(|&offset| from.offset(offset))
        .map(|sq| vec![sq])
        .collect()
}

/// Returns the paths a piece standing on `from` travels along when it moves without capturing.
pub fn move_paths(piece: Piece, from: Square) -> Vec<Path> {
    match piece.kind {
        PieceKind::Pawn => {
            let forward = piece.color.forward();
            let mut path = Vec::with_capacity(2);
            if let Some(one) = from.offset(forward) {
                path.push(one);
                if from.rank() == piece.color.pawn_rank() {
                    if let Some(two) = one.offset(forward) {
                        path.push(two);
                    }
                }
            }

            if path.is_empty() {
                vec![]
            } else {
                vec![path]
            }
        }
        _ => capture_paths(piece, from),
    }
}

/// Returns the paths a piece standing on `from` travels along when it captures. Only pawns capture differently
/// than they move.
pub fn capture_paths(piece: Piece, from: Square) -> Vec<Path> {
    match piece.kind {
        PieceKind::Pawn => {
            let forward = piece.color.forward();
            steps(
                from,
                &[forward.plus(Vector::new(-1, 0)), forward.plus(Vector::new(1, 0))],
            )
        }
        PieceKind::Knight => steps(from, &KNIGHT_JUMPS),
        PieceKind::Bishop => rays(from, &DIAGONALS),
        PieceKind::Rook => rays(from, &ORTHOGONALS),
        PieceKind::Queen => {
            let mut paths = rays(from, &ORTHOGONALS);
            paths.extend(rays(from, &DIAGONALS));
            paths
        }
        PieceKind::King => {
            let mut paths = steps(from, &ORTHOGONALS);
            paths.extend(steps(from, &DIAGONALS));
            paths
        }
    }
}

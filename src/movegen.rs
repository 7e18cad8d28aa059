//! Destination generation for a single piece.
//!
//! Pawns step or jump along the two diagonals toward their promotion row;
//! kings use all four diagonals. A jump is legal when the adjacent diagonal
//! cell holds an opposing piece and the cell beyond it is on the board and
//! empty. Destinations come out in a fixed direction order (column `+1`
//! before `-1`, and for kings row `+1` before `-1`), which keeps search
//! results reproducible.

use crate::board::Board;
use crate::piece::{Cell, Color, Coord, Kind, Piece};

/// Pawn directions are relative to the owner's forward step.
const PAWN_COLUMNS: [i32; 2] = [1, -1];

const KING_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// True when moving from `from` to `to` jumps over a cell.
#[inline]
pub fn is_jump(from: Coord, to: Coord) -> bool {
    (to.col - from.col).abs() > 1
}

/// Diagonal directions available to `piece`, in generation order.
fn directions(piece: Piece) -> Vec<(i32, i32)> {
    match piece.kind {
        Kind::Pawn => {
            let forward = piece.owner.forward();
            PAWN_COLUMNS.iter().map(|&dc| (dc, forward)).collect()
        }
        Kind::King => KING_DIRECTIONS.to_vec(),
    }
}

/// All destinations for `piece` standing at `from`, before the board-wide
/// mandatory-capture filter is applied.
pub fn available_moves(board: &Board, from: Coord, piece: Piece) -> Vec<Coord> {
    let mut options = Vec::with_capacity(4);
    for (dc, dr) in directions(piece) {
        let step = from.offset(dc, dr);
        match board.get(step) {
            None => {}
            Some(Cell::Empty) => options.push(step),
            Some(Cell::Occupied(_)) => {
                if can_jump(board, from, piece.owner, dc, dr) {
                    options.push(from.offset(2 * dc, 2 * dr));
                }
            }
        }
    }
    options
}

/// Jump destinations only.
pub fn available_jumps(board: &Board, from: Coord, piece: Piece) -> Vec<Coord> {
    available_moves(board, from, piece)
        .into_iter()
        .filter(|&to| is_jump(from, to))
        .collect()
}

/// Shared capture test: opponent on the adjacent diagonal, empty landing
/// cell inside the board.
fn can_jump(board: &Board, from: Coord, owner: Color, dc: i32, dr: i32) -> bool {
    let over = board.get(from.offset(dc, dr));
    let landing = board.get(from.offset(2 * dc, 2 * dr));
    matches!(over, Some(Cell::Occupied(p)) if p.owner != owner)
        && matches!(landing, Some(Cell::Empty))
}

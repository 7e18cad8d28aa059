//! Static evaluation of a board from one player's point of view.
//!
//! The score is the sum of four terms, all taken over the evaluated player's
//! own pieces:
//!
//! 1. Material exchange: `1000` per capture made, `-600` per capture suffered.
//! 2. Capture pressure: `10` per jump currently available (counted before the
//!    mandatory-capture filter).
//! 3. Material on board: `30` per king, `10` per pawn.
//! 4. Position: a pawn scores the number of rows it has advanced; a king scores
//!    `20 - d`, where `d` is the Chebyshev distance to the closest opposing
//!    piece.

use crate::board::Board;
use crate::constants::{
    CAPTURE_PENALTY, CAPTURE_REWARD, JUMP_OPTION_WEIGHT, KING_PURSUIT_BASE, KING_VALUE,
    PAWN_VALUE,
};
use crate::piece::{Color, Coord, Kind};

/// Score `board` for `player`. Pure: no mutation, no randomness.
pub fn evaluate(board: &Board, player: Color) -> i32 {
    let opponent = player.opponent();

    let material = weighted(board.points.captured_by(player), CAPTURE_REWARD)
        .saturating_sub(weighted(board.points.captured_by(opponent), CAPTURE_PENALTY));

    let jumps: usize = board
        .raw_moves_for(player)
        .iter()
        .map(|pm| pm.jump_count())
        .sum();
    let pressure = JUMP_OPTION_WEIGHT * jumps as i32;

    let opponents: Vec<Coord> = board.pieces_of(opponent).map(|(c, _)| c).collect();
    let mut on_board = 0;
    let mut positional = 0;
    for (at, piece) in board.pieces_of(player) {
        match piece.kind {
            Kind::King => {
                on_board += KING_VALUE;
                positional += king_pursuit(at, &opponents);
            }
            Kind::Pawn => {
                on_board += PAWN_VALUE;
                positional += advancement(board, at, player);
            }
        }
    }

    material
        .saturating_add(pressure)
        .saturating_add(on_board + positional)
}

/// `count * weight`, clamped to the `i32` range.
fn weighted(count: u32, weight: i32) -> i32 {
    let product = i64::from(count) * i64::from(weight);
    product.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Rows a pawn has advanced from its own edge.
fn advancement(board: &Board, at: Coord, player: Color) -> i32 {
    match player {
        Color::Black => at.row,
        Color::White => board.height() as i32 - 1 - at.row,
    }
}

/// Reward for a king being close to the nearest opposing piece; `0` when
/// the opponent has no pieces left.
fn king_pursuit(at: Coord, opponents: &[Coord]) -> i32 {
    opponents
        .iter()
        .map(|&o| KING_PURSUIT_BASE - at.chebyshev(o))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Points;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows, Color::Black).unwrap()
    }

    #[test]
    fn test_starting_position_is_symmetric() {
        let b = Board::new();
        // 12 pawns: 120 material; advancement 4*0 + 4*1 + 4*2 = 12; no jumps.
        assert_eq!(evaluate(&b, Color::Black), 132);
        assert_eq!(evaluate(&b, Color::White), 132);
    }

    #[test]
    fn test_material_exchange_term() {
        let mut b = board(&["####", "####", "####", "####"]);
        b.points = Points { black: 2, white: 1 };
        assert_eq!(evaluate(&b, Color::Black), 2 * 1000 - 600);
        assert_eq!(evaluate(&b, Color::White), 1000 - 2 * 600);
    }

    #[test]
    fn test_huge_capture_counts_saturate() {
        let mut b = board(&["####", "####", "####", "####"]);
        b.points = Points {
            black: 3_000_000,
            white: 0,
        };
        assert_eq!(evaluate(&b, Color::Black), i32::MAX);
        assert_eq!(evaluate(&b, Color::White), -1_800_000_000);

        b.points = Points {
            black: 0,
            white: u32::MAX,
        };
        assert_eq!(evaluate(&b, Color::Black), -i32::MAX);
    }

    #[test]
    fn test_jump_pressure_counts_raw_options() {
        // Black pawn at (1,1) can jump (2,2) -> (3,3) and also step to (0,2).
        let b = board(&["######", "#b####", "##w###", "######", "######", "######"]);
        // pawn 10 + advancement 1 + one jump 10
        assert_eq!(evaluate(&b, Color::Black), 21);
    }

    #[test]
    fn test_king_pursuit_uses_nearest_opponent() {
        let b = board(&[
            "B#######", "########", "########", "##w#####", "########", "########", "########",
            "#######w",
        ]);
        // king 30 + (20 - 3) for the pawn at (2,3); the one at (7,7) is farther
        assert_eq!(evaluate(&b, Color::Black), 47);
        // pawns 20 + advancement 4 (row 3) + 0 (row 7)
        assert_eq!(evaluate(&b, Color::White), 24);
    }

    #[test]
    fn test_king_without_opponents() {
        let b = board(&["###", "#W#", "###"]);
        assert_eq!(evaluate(&b, Color::White), 30);
    }
}

//! Fixed-depth minimax search.
//!
//! Plain minimax without pruning or transposition tables. Every applied move
//! consumes one unit of depth, including the continuation steps of a
//! multi-capture chain where the side to move does not change. Nodes where
//! the side to move is `player` maximize, all others minimize; ties keep the
//! first move in generation order.
//!
//! The board passed in is never modified; each candidate is played on a copy.

use crate::board::{Board, BoardError};
use crate::eval::evaluate;
use crate::piece::{Color, Move};

/// Result of a root search, with the number of nodes visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub score: i32,
    pub best: Option<Move>,
    pub nodes: u64,
}

/// Search `board` to `max_depth` from `current_depth`, scoring leaves for
/// `player`.
///
/// Returns the best score and the move achieving it. The move is `None` at
/// the terminal depth, and also when the side to move has no legal move, in
/// which case the node is scored statically.
pub fn minimax(
    board: &Board,
    player: Color,
    max_depth: usize,
    current_depth: usize,
) -> Result<(i32, Option<Move>), BoardError> {
    let mut nodes = 0;
    search(board, player, max_depth, current_depth, &mut nodes)
}

/// Search for the side to move on `board` and report node count.
pub fn search_best_move(board: &Board, depth: usize) -> Result<SearchReport, BoardError> {
    let mut nodes = 0;
    let (score, best) = search(board, board.turn, depth, 0, &mut nodes)?;
    Ok(SearchReport { score, best, nodes })
}

fn search(
    board: &Board,
    player: Color,
    max_depth: usize,
    current_depth: usize,
    nodes: &mut u64,
) -> Result<(i32, Option<Move>), BoardError> {
    *nodes += 1;
    if current_depth >= max_depth {
        return Ok((evaluate(board, player), None));
    }

    let candidates: Vec<Move> = board
        .moves_for(board.turn)
        .into_iter()
        .flat_map(|pm| {
            let from = pm.from;
            pm.destinations.into_iter().map(move |to| (from, to))
        })
        .collect();

    if candidates.is_empty() {
        return Ok((evaluate(board, player), None));
    }

    let maximizing = board.turn == player;
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_move = None;

    for (from, to) in candidates {
        let mut next = board.copy();
        let continues = next.apply_move(from, to).map_err(|e| match e {
            BoardError::EmptySource(c) => {
                BoardError::InvariantViolation(format!("search tried to move from empty cell {c}"))
            }
            other => other,
        })?;
        if !continues {
            next.turn = next.turn.opponent();
        }

        let (score, _) = search(&next, player, max_depth, current_depth + 1, nodes)?;
        let better = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if better {
            best_score = score;
            best_move = Some((from, to));
        }
    }

    Ok((best_score, best_move))
}

/// Print a one-line search summary to stderr.
pub fn dump_report(report: &SearchReport) {
    match report.best {
        Some((from, to)) => eprintln!(
            "search: best {from} -> {to} score={} nodes={}",
            report.score, report.nodes
        ),
        None => eprintln!(
            "search: no move score={} nodes={}",
            report.score, report.nodes
        ),
    }
}

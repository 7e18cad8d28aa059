//! Game session: a board, two player seats, and the turn token.
//!
//! The session performs the bookkeeping the board leaves to its caller:
//! checking that the mover owns the turn, appending to the replay, flipping
//! the turn when a move does not chain, and pinning a capture chain to the
//! piece that started it.
//!
//! A session is not synchronized. Hosts serving several clients must
//! serialize access per session (one mutating call in flight at a time).

use std::fmt;

use crate::board::{Board, BoardError, BoardState};
use crate::piece::{Color, Coord, Move};
use crate::search::{minimax, search_best_move};

/// Errors from session-level move handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The mover is not the side whose turn it is.
    NotYourTurn(Color),
    /// The move is not among the mover's legal moves.
    IllegalMove { from: Coord, to: Coord },
    /// The side to move has no legal move.
    NoMoves(Color),
    Board(BoardError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotYourTurn(c) => write!(f, "it is not {c}'s turn"),
            GameError::IllegalMove { from, to } => write!(f, "illegal move {from} -> {to}"),
            GameError::NoMoves(c) => write!(f, "{c} has no legal moves"),
            GameError::Board(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Board(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BoardError> for GameError {
    fn from(e: BoardError) -> Self {
        GameError::Board(e)
    }
}

/// One game between two seats.
pub struct Game {
    pub board: Board,
    turn_secret: u64,
    seats: [bool; 2],
    /// Piece that must continue capturing before the turn can pass.
    chain: Option<Coord>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// New game on the standard board.
    pub fn new() -> Self {
        Self::with_board(Board::new())
    }

    /// New session around an existing board (fresh seats and token).
    pub fn with_board(board: Board) -> Self {
        let mut game = Self {
            board,
            turn_secret: 0,
            seats: [false; 2],
            chain: None,
        };
        game.regenerate_turn_token();
        game
    }

    /// Claim the first free seat, Black before White.
    pub fn claim_seat(&mut self) -> Option<Color> {
        for color in [Color::Black, Color::White] {
            if !self.seats[color.index()] {
                self.seats[color.index()] = true;
                return Some(color);
            }
        }
        None
    }

    pub fn seat_taken(&self, color: Color) -> bool {
        self.seats[color.index()]
    }

    /// Opaque token identifying the current right to move.
    ///
    /// Has no effect on the rules; hosts can hand it to the player on move and
    /// reject requests carrying a stale value.
    pub fn turn_secret(&self) -> u64 {
        self.turn_secret
    }

    pub fn regenerate_turn_token(&mut self) {
        self.turn_secret = fastrand::u64(..);
    }

    /// Piece currently in the middle of a capture chain, if any.
    pub fn pending_chain(&self) -> Option<Coord> {
        self.chain
    }

    /// Play `from -> to` for `player`.
    ///
    /// Returns `true` when the same piece must capture again. On error the
    /// session is unchanged.
    pub fn play_move(&mut self, player: Color, from: Coord, to: Coord) -> Result<bool, GameError> {
        if player != self.board.turn {
            return Err(GameError::NotYourTurn(player));
        }
        if self.chain.is_some_and(|at| at != from) || !self.board.is_legal(player, from, to) {
            return Err(GameError::IllegalMove { from, to });
        }

        let continues = self.board.apply_move(from, to)?;
        self.board.replay.push((from, to));
        if continues {
            self.chain = Some(to);
        } else {
            self.chain = None;
            self.board.turn = player.opponent();
            self.regenerate_turn_token();
        }
        Ok(continues)
    }

    /// Let the engine pick and play one move for the side to move.
    pub fn play_ai(&mut self, depth: usize) -> Result<Move, GameError> {
        let player = self.board.turn;
        let mv = match self.chain {
            Some(at) => self.chain_reply(at, depth)?,
            None => search_best_move(&self.board, depth)?.best,
        };
        let (from, to) = mv.ok_or(GameError::NoMoves(player))?;
        self.play_move(player, from, to)?;
        Ok((from, to))
    }

    /// Best continuation for the piece at `at`, restricted to its jumps.
    fn chain_reply(&self, at: Coord, depth: usize) -> Result<Option<Move>, GameError> {
        let player = self.board.turn;
        let jumps = self
            .board
            .moves_for(player)
            .into_iter()
            .find(|pm| pm.from == at)
            .map(|pm| pm.destinations)
            .unwrap_or_default();

        let mut best: Option<(i32, Move)> = None;
        for to in jumps {
            let mut next = self.board.copy();
            if !next.apply_move(at, to)? {
                next.turn = player.opponent();
            }
            let (score, _) = minimax(&next, player, depth.max(1), 1)?;
            if best.is_none_or(|(s, _)| score > s) {
                best = Some((score, (at, to)));
            }
        }
        Ok(best.map(|(_, mv)| mv))
    }

    pub fn serialize(&self) -> BoardState {
        self.board.serialize()
    }
}

/// Apply a list of moves in order, skipping any whose source cell is empty.
///
/// Each applied move is appended to the replay and flips the turn unless it
/// chains.
pub fn play_game(board: &mut Board, actions: &[Move]) -> Result<(), BoardError> {
    for &(from, to) in actions {
        if board.cell_at(from)?.is_empty() {
            continue;
        }
        let continues = board.apply_move(from, to)?;
        board.replay.push((from, to));
        if !continues {
            board.turn = board.turn.opponent();
        }
    }
    Ok(())
}

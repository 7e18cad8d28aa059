//! Draughts board state, move application and serialization.
//!
//! The grid is the single registry of live pieces: a piece's coordinate is the
//! cell it occupies, and "the pieces of a player" is a row-major scan of the
//! grid. Row-major order is also the iteration order of [`Board::moves_for`],
//! which makes move lists (and therefore search) deterministic.
//!
//! Black starts on the low rows and advances toward increasing row index;
//! White starts on the high rows and advances toward row 0.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HEIGHT, DEFAULT_PLAYER_ROWS, DEFAULT_WIDTH};
use crate::movegen::{available_jumps, available_moves, is_jump};
use crate::piece::{Cell, Color, Coord, Move, Piece};

/// Errors raised by board access and move application.
///
/// A failed operation never leaves the board partially modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate outside `[0, width) x [0, height)`.
    OutOfBounds(Coord),
    /// Capture attempted over an empty cell.
    IllegalJump { from: Coord, to: Coord },
    /// Move requested from a cell that holds no piece.
    EmptySource(Coord),
    /// Internal consistency failure; indicates an engine bug.
    InvariantViolation(String),
    /// Reconstruction input is not a valid board description.
    InvalidLayout(String),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds(c) => write!(f, "coordinate {c} is outside the board"),
            BoardError::IllegalJump { from, to } => {
                write!(f, "cannot jump empty square moving {from} -> {to}")
            }
            BoardError::EmptySource(c) => write!(f, "no piece at {c}"),
            BoardError::InvariantViolation(msg) => write!(f, "engine invariant violated: {msg}"),
            BoardError::InvalidLayout(msg) => write!(f, "invalid board layout: {msg}"),
        }
    }
}

impl std::error::Error for BoardError {}

/// Capture counters.
///
/// When a Black piece is captured `white` increments, and vice versa, so each
/// counter tallies the captures made by the color it is named after.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Points {
    pub black: u32,
    pub white: u32,
}

impl Points {
    /// Captures made by `color`.
    pub fn captured_by(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    fn credit_capture(&mut self, captured_owner: Color) {
        match captured_owner {
            Color::Black => self.white += 1,
            Color::White => self.black += 1,
        }
    }
}

/// Serialized board: grid of cell codes, turn, capture counters and replay.
///
/// `points` and `replay` may be omitted when reconstructing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub board: Vec<Vec<char>>,
    pub turn: Color,
    #[serde(default)]
    pub points: Points,
    #[serde(default)]
    pub replay: Vec<Move>,
}

/// Legal destinations of one piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceMoves {
    pub from: Coord,
    #[serde(skip)]
    pub piece: Piece,
    #[serde(rename = "moves")]
    pub destinations: Vec<Coord>,
}

impl PieceMoves {
    pub fn jump_count(&self) -> usize {
        self.destinations
            .iter()
            .filter(|&&to| is_jump(self.from, to))
            .count()
    }
}

/// A draughts board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    /// Side permitted to move next.
    pub turn: Color,
    pub points: Points,
    /// Moves applied so far, appended by the caller of [`Board::apply_move`].
    pub replay: Vec<Move>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard 8x8 board with three rows of pawns per side, Black to move.
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_PLAYER_ROWS)
    }

    /// Starting layout for an arbitrary grid.
    ///
    /// Pawns occupy the dark squares (`col + row` odd) of the first
    /// `player_rows` rows on each side.
    pub fn with_dimensions(height: usize, width: usize, player_rows: usize) -> Self {
        let mut board = Self::empty(height, width);
        for y in 0..height {
            let color = if y < player_rows {
                Color::Black
            } else {
                Color::White
            };
            for x in 0..width {
                if (x + y) % 2 == 1 && y.min(height - 1 - y) < player_rows {
                    let i = board.idx(x, y);
                    board.cells[i] = Cell::Occupied(Piece::pawn(color));
                }
            }
        }
        board
    }

    fn empty(height: usize, width: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            turn: Color::Black,
            points: Points::default(),
            replay: Vec::new(),
        }
    }

    /// Reconstruct a board from its serialized form.
    pub fn from_serialized(state: &BoardState) -> Result<Self, BoardError> {
        let height = state.board.len();
        let width = state.board.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(BoardError::InvalidLayout("empty grid".to_string()));
        }

        let cells = (width * height) as u64;
        for (name, count) in [("black", state.points.black), ("white", state.points.white)] {
            if u64::from(count) > cells {
                return Err(BoardError::InvalidLayout(format!(
                    "{name} captures {count} exceed the {cells} cells of the board"
                )));
            }
        }

        let mut board = Self::empty(height, width);
        for (y, row) in state.board.iter().enumerate() {
            if row.len() != width {
                return Err(BoardError::InvalidLayout(format!(
                    "row {y} has {} cells, expected {width}",
                    row.len()
                )));
            }
            for (x, &code) in row.iter().enumerate() {
                let cell = Cell::from_code(code).ok_or_else(|| {
                    BoardError::InvalidLayout(format!("unknown cell code {code:?} at {x},{y}"))
                })?;
                let i = board.idx(x, y);
                board.cells[i] = cell;
            }
        }
        board.turn = state.turn;
        board.points = state.points;
        board.replay = state.replay.clone();
        Ok(board)
    }

    /// Build a board from rows of cell codes, one string per row.
    pub fn from_rows(rows: &[&str], turn: Color) -> Result<Self, BoardError> {
        let state = BoardState {
            board: rows.iter().map(|r| r.chars().collect()).collect(),
            turn,
            points: Points::default(),
            replay: Vec::new(),
        };
        Self::from_serialized(&state)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn in_bounds(&self, c: Coord) -> bool {
        c.col >= 0 && c.row >= 0 && (c.col as usize) < self.width && (c.row as usize) < self.height
    }

    /// Cell content, or `None` off the board.
    pub fn get(&self, c: Coord) -> Option<Cell> {
        if !self.in_bounds(c) {
            return None;
        }
        Some(self.cells[self.idx(c.col as usize, c.row as usize)])
    }

    pub fn cell_at(&self, c: Coord) -> Result<Cell, BoardError> {
        self.get(c).ok_or(BoardError::OutOfBounds(c))
    }

    /// Raw grid write. Bypasses every rule; used for setting up positions.
    pub fn set_cell(&mut self, c: Coord, cell: Cell) -> Result<(), BoardError> {
        if !self.in_bounds(c) {
            return Err(BoardError::OutOfBounds(c));
        }
        let i = self.idx(c.col as usize, c.row as usize);
        self.cells[i] = cell;
        Ok(())
    }

    /// Write to a coordinate already known to be in bounds.
    fn put(&mut self, c: Coord, cell: Cell) {
        let i = self.idx(c.col as usize, c.row as usize);
        self.cells[i] = cell;
    }

    /// Live pieces in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.piece().map(|p| {
                let c = Coord::new((i % self.width) as i32, (i / self.width) as i32);
                (c, p)
            })
        })
    }

    pub fn pieces_of(&self, player: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.owner == player)
    }

    /// Row on which a pawn of `player` is promoted.
    pub fn promotion_row(&self, player: Color) -> i32 {
        match player {
            Color::Black => self.height as i32 - 1,
            Color::White => 0,
        }
    }

    /// Every piece of `player` with at least one destination, without the
    /// mandatory-capture filter.
    pub fn raw_moves_for(&self, player: Color) -> Vec<PieceMoves> {
        self.pieces_of(player)
            .map(|(from, piece)| PieceMoves {
                from,
                piece,
                destinations: available_moves(self, from, piece),
            })
            .filter(|pm| !pm.destinations.is_empty())
            .collect()
    }

    /// Legal moves for `player`.
    ///
    /// If any piece can capture, only capturing pieces are listed, and only
    /// with their capturing destinations.
    pub fn moves_for(&self, player: Color) -> Vec<PieceMoves> {
        let raw = self.raw_moves_for(player);
        if raw.iter().all(|pm| pm.jump_count() == 0) {
            return raw;
        }
        raw.into_iter()
            .filter_map(|pm| {
                let from = pm.from;
                let jumps: Vec<Coord> = pm
                    .destinations
                    .into_iter()
                    .filter(|&to| is_jump(from, to))
                    .collect();
                (!jumps.is_empty()).then_some(PieceMoves {
                    from,
                    piece: pm.piece,
                    destinations: jumps,
                })
            })
            .collect()
    }

    /// True if `(from, to)` appears in [`Board::moves_for`] for `player`.
    pub fn is_legal(&self, player: Color, from: Coord, to: Coord) -> bool {
        self.moves_for(player)
            .iter()
            .any(|pm| pm.from == from && pm.destinations.contains(&to))
    }

    /// Move the piece at `from` to `to`, resolving capture and promotion.
    ///
    /// Returns `true` when the same piece has a further capture available and
    /// must keep moving. Neither `turn` nor `replay` is touched; the caller
    /// appends the move and flips the turn when this returns `false`.
    ///
    /// Whose turn it is, and whether the jumped piece belongs to the opponent,
    /// are not checked here.
    pub fn apply_move(&mut self, from: Coord, to: Coord) -> Result<bool, BoardError> {
        let piece = self
            .cell_at(from)?
            .piece()
            .ok_or(BoardError::EmptySource(from))?;
        self.cell_at(to)?;

        let captured = if is_jump(from, to) {
            let over = from.midpoint(to);
            match self.cell_at(over)? {
                Cell::Empty => return Err(BoardError::IllegalJump { from, to }),
                Cell::Occupied(p) => Some((over, p)),
            }
        } else {
            None
        };

        self.put(from, Cell::Empty);
        self.put(to, Cell::Occupied(piece));

        let Some((over, victim)) = captured else {
            if !piece.is_king() && to.row == self.promotion_row(piece.owner) {
                self.put(to, Cell::Occupied(Piece::king(piece.owner)));
            }
            return Ok(false);
        };

        self.put(over, Cell::Empty);
        self.points.credit_capture(victim.owner);

        if !piece.is_king() && to.row == self.promotion_row(piece.owner) {
            self.put(to, Cell::Occupied(Piece::king(piece.owner)));
            return Ok(false);
        }

        Ok(!available_jumps(self, to, piece).is_empty())
    }

    /// Deep copy. Nothing is shared with `self`.
    pub fn copy(&self) -> Board {
        self.clone()
    }

    pub fn serialize(&self) -> BoardState {
        let board = (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| self.cells[self.idx(x, y)].code())
                    .collect()
            })
            .collect();
        BoardState {
            board,
            turn: self.turn,
            points: self.points,
            replay: self.replay.clone(),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for x in 0..self.width {
            write!(f, "{x} ")?;
        }
        writeln!(f)?;
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{} ", self.cells[self.idx(x, y)].code())?;
            }
            writeln!(f, " {y}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(col: i32, row: i32) -> Coord {
        Coord::new(col, row)
    }

    #[test]
    fn test_starting_layout() {
        let board = Board::new();
        assert_eq!(board.pieces_of(Color::Black).count(), 12);
        assert_eq!(board.pieces_of(Color::White).count(), 12);
        assert_eq!(board.turn, Color::Black);
        assert_eq!(
            board.cell_at(c(1, 0)).unwrap(),
            Cell::Occupied(Piece::pawn(Color::Black))
        );
        assert_eq!(board.cell_at(c(0, 0)).unwrap(), Cell::Empty);
        assert_eq!(
            board.cell_at(c(0, 7)).unwrap(),
            Cell::Occupied(Piece::pawn(Color::White))
        );
        assert!(board.cell_at(c(3, 4)).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut board = Board::new();
        assert_eq!(board.cell_at(c(8, 0)), Err(BoardError::OutOfBounds(c(8, 0))));
        assert_eq!(board.cell_at(c(0, -1)), Err(BoardError::OutOfBounds(c(0, -1))));
        assert!(board.set_cell(c(-1, 3), Cell::Empty).is_err());
        assert!(!board.in_bounds(c(7, 8)));
        assert!(board.in_bounds(c(7, 7)));
    }

    #[test]
    fn test_opening_moves_for_black() {
        let board = Board::new();
        let moves = board.moves_for(Color::Black);
        // Only the four row-2 pawns can move, 7 destinations in total.
        assert_eq!(moves.len(), 4);
        let total: usize = moves.iter().map(|pm| pm.destinations.len()).sum();
        assert_eq!(total, 7);
        assert!(moves.iter().all(|pm| pm.from.row == 2));
    }

    #[test]
    fn test_simple_move_does_not_continue() {
        let mut board = Board::new();
        let cont = board.apply_move(c(1, 2), c(2, 3)).unwrap();
        assert!(!cont);
        assert!(board.cell_at(c(1, 2)).unwrap().is_empty());
        assert_eq!(
            board.cell_at(c(2, 3)).unwrap(),
            Cell::Occupied(Piece::pawn(Color::Black))
        );
        assert_eq!(board.turn, Color::Black, "apply_move never flips the turn");
        assert!(board.replay.is_empty());
    }

    #[test]
    fn test_jump_over_empty_fails_without_mutation() {
        let mut board = Board::new();
        let before = board.clone();
        let err = board.apply_move(c(1, 2), c(3, 4)).unwrap_err();
        assert_eq!(
            err,
            BoardError::IllegalJump {
                from: c(1, 2),
                to: c(3, 4)
            }
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_from_empty_or_off_board_fails() {
        let mut board = Board::new();
        let before = board.clone();
        assert_eq!(
            board.apply_move(c(0, 0), c(1, 1)),
            Err(BoardError::EmptySource(c(0, 0)))
        );
        assert_eq!(
            board.apply_move(c(1, 2), c(-1, 4)),
            Err(BoardError::OutOfBounds(c(-1, 4)))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_capture_removes_piece_and_credits_capturer() {
        let mut board = Board::from_rows(
            &[
                "########", "########", "########", "###b####", "####w###", "########",
                "########", "########",
            ],
            Color::Black,
        )
        .unwrap();
        let cont = board.apply_move(c(3, 3), c(5, 5)).unwrap();
        assert!(!cont);
        assert!(board.cell_at(c(4, 4)).unwrap().is_empty());
        assert_eq!(board.pieces_of(Color::White).count(), 0);
        assert_eq!(board.points, Points { black: 1, white: 0 });
        assert_eq!(board.points.captured_by(Color::Black), 1);
    }

    #[test]
    fn test_chain_continues_when_another_jump_exists() {
        let mut board = Board::from_rows(
            &[
                "########", "########", "##b#####", "###w####", "########", "#####w##",
                "########", "########",
            ],
            Color::Black,
        )
        .unwrap();
        assert!(board.apply_move(c(2, 2), c(4, 4)).unwrap());
        assert!(!board.apply_move(c(4, 4), c(6, 6)).unwrap());
        assert_eq!(board.points.black, 2);
    }

    #[test]
    fn test_simple_move_to_far_row_promotes() {
        let mut board = Board::from_rows(
            &[
                "########", "########", "########", "########", "########", "########",
                "##b#####", "########",
            ],
            Color::Black,
        )
        .unwrap();
        assert!(!board.apply_move(c(2, 6), c(3, 7)).unwrap());
        assert_eq!(
            board.cell_at(c(3, 7)).unwrap(),
            Cell::Occupied(Piece::king(Color::Black))
        );
    }

    #[test]
    fn test_serialize_roundtrip() {
        let mut board = Board::new();
        board.apply_move(c(1, 2), c(2, 3)).unwrap();
        board.replay.push((c(1, 2), c(2, 3)));
        board.turn = Color::White;

        let state = board.serialize();
        assert_eq!(state.board[3][2], 'b');
        assert_eq!(state.board[0][0], '#');
        let rebuilt = Board::from_serialized(&state).unwrap();
        assert_eq!(rebuilt.serialize(), state);
    }

    #[test]
    fn test_serialize_json_shape() {
        let mut board = Board::new();
        board.replay.push((c(1, 2), c(2, 3)));
        let json = serde_json::to_value(board.serialize()).unwrap();
        assert_eq!(json["turn"], 0);
        assert_eq!(json["points"]["black"], 0);
        assert_eq!(json["board"][0][1], "b");
        assert_eq!(json["replay"], serde_json::json!([[[1, 2], [2, 3]]]));
    }

    #[test]
    fn test_from_serialized_rejects_bad_input() {
        let ragged = BoardState {
            board: vec![vec!['#', '#'], vec!['#']],
            turn: Color::Black,
            points: Points::default(),
            replay: Vec::new(),
        };
        assert!(matches!(
            Board::from_serialized(&ragged),
            Err(BoardError::InvalidLayout(_))
        ));
        assert!(Board::from_rows(&["#x"], Color::Black).is_err());
        assert!(Board::from_rows(&[], Color::Black).is_err());
    }

    #[test]
    fn test_custom_dimensions_layout() {
        let board = Board::with_dimensions(6, 10, 2);
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 6);
        assert_eq!(board.pieces_of(Color::Black).count(), 10);
        assert_eq!(board.pieces_of(Color::White).count(), 10);
        assert!(board.pieces().all(|(c, _)| c.row < 2 || c.row >= 4));
    }

    #[test]
    fn test_from_serialized_rejects_impossible_capture_counts() {
        let mut state = Board::from_rows(&["####", "#b##", "##w#", "####"], Color::Black)
            .unwrap()
            .serialize();
        state.points = Points {
            black: 3_000_000,
            white: 0,
        };
        assert!(matches!(
            Board::from_serialized(&state),
            Err(BoardError::InvalidLayout(_))
        ));

        state.points = Points { black: 16, white: 0 };
        assert!(Board::from_serialized(&state).is_ok());
    }

    #[test]
    fn test_display_has_header_and_row_labels() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0].trim_end(), "0 1 2 3 4 5 6 7");
        assert!(lines[1].starts_with("# b # b"));
        assert!(lines[1].ends_with(" 0"));
    }
}

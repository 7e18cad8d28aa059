//! Value types for board coordinates and cell contents.
//!
//! A [`Cell`] stores only owner and kind. The coordinate of a piece is the
//! grid index it lives at, so a piece can never disagree with its location.

use serde::{Deserialize, Serialize};

use crate::constants::{
    CODE_BLACK_KING, CODE_BLACK_PAWN, CODE_EMPTY, CODE_WHITE_KING, CODE_WHITE_PAWN,
};

/// Side to move. Serialized as `0` (Black) or `1` (White).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Row step a pawn of this color advances by.
    pub fn forward(self) -> i32 {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }

    /// Index used for per-color arrays (`0` Black, `1` White).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }

    /// Parse `black`/`white`/`b`/`w`/`0`/`1`, case-insensitively.
    pub fn parse(s: &str) -> Option<Color> {
        match s.to_lowercase().as_str() {
            "black" | "b" | "0" => Some(Color::Black),
            "white" | "w" | "1" => Some(Color::White),
            _ => None,
        }
    }
}

impl From<Color> for u8 {
    fn from(color: Color) -> u8 {
        color.index() as u8
    }
}

impl TryFrom<u8> for Color {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Color::Black),
            1 => Ok(Color::White),
            other => Err(format!("turn must be 0 or 1, got {other}")),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// Movement rules a piece follows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Pawn,
    King,
}

/// An occupied cell's content.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub owner: Color,
    pub kind: Kind,
}

impl Piece {
    pub fn pawn(owner: Color) -> Self {
        Self {
            owner,
            kind: Kind::Pawn,
        }
    }

    pub fn king(owner: Color) -> Self {
        Self {
            owner,
            kind: Kind::King,
        }
    }

    pub fn is_king(&self) -> bool {
        self.kind == Kind::King
    }
}

/// Content of one grid square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Piece),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn piece(&self) -> Option<Piece> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(p) => Some(*p),
        }
    }

    /// Serialization code: `#`, `b`, `B`, `w` or `W`.
    pub fn code(&self) -> char {
        match self {
            Cell::Empty => CODE_EMPTY,
            Cell::Occupied(Piece { owner, kind }) => match (owner, kind) {
                (Color::Black, Kind::Pawn) => CODE_BLACK_PAWN,
                (Color::Black, Kind::King) => CODE_BLACK_KING,
                (Color::White, Kind::Pawn) => CODE_WHITE_PAWN,
                (Color::White, Kind::King) => CODE_WHITE_KING,
            },
        }
    }

    pub fn from_code(c: char) -> Option<Cell> {
        match c {
            CODE_EMPTY => Some(Cell::Empty),
            CODE_BLACK_PAWN => Some(Cell::Occupied(Piece::pawn(Color::Black))),
            CODE_BLACK_KING => Some(Cell::Occupied(Piece::king(Color::Black))),
            CODE_WHITE_PAWN => Some(Cell::Occupied(Piece::pawn(Color::White))),
            CODE_WHITE_KING => Some(Cell::Occupied(Piece::king(Color::White))),
            _ => None,
        }
    }
}

/// A board position, `col` being the fast-varying axis.
///
/// Serialized as the array `[col, row]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Coord {
    pub col: i32,
    pub row: i32,
}

impl Coord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn offset(self, dcol: i32, drow: i32) -> Coord {
        Coord::new(self.col + dcol, self.row + drow)
    }

    /// Cell jumped over when moving from `self` to `to`.
    pub fn midpoint(self, to: Coord) -> Coord {
        Coord::new((self.col + to.col) / 2, (self.row + to.row) / 2)
    }

    pub fn chebyshev(self, other: Coord) -> i32 {
        (self.col - other.col)
            .abs()
            .max((self.row - other.row).abs())
    }

    /// Parse the `col,row` form used by the text protocol.
    pub fn parse(s: &str) -> Option<Coord> {
        let (col, row) = s.trim().split_once(',')?;
        Some(Coord::new(col.trim().parse().ok()?, row.trim().parse().ok()?))
    }
}

impl From<[i32; 2]> for Coord {
    fn from([col, row]: [i32; 2]) -> Self {
        Coord::new(col, row)
    }
}

impl From<Coord> for [i32; 2] {
    fn from(c: Coord) -> Self {
        [c.col, c.row]
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

/// A single step of play: move the piece at `from` to `to`.
pub type Move = (Coord, Coord);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_codes_roundtrip() {
        for c in ['#', 'b', 'B', 'w', 'W'] {
            let cell = Cell::from_code(c).unwrap();
            assert_eq!(cell.code(), c);
        }
        assert_eq!(Cell::from_code('x'), None);
    }

    #[test]
    fn test_coord_parse() {
        assert_eq!(Coord::parse("1,2"), Some(Coord::new(1, 2)));
        assert_eq!(Coord::parse(" 3 , 4 "), Some(Coord::new(3, 4)));
        assert_eq!(Coord::parse("3"), None);
        assert_eq!(Coord::parse("a,b"), None);
    }

    #[test]
    fn test_coord_serializes_as_pair() {
        let json = serde_json::to_string(&Coord::new(1, 2)).unwrap();
        assert_eq!(json, "[1,2]");
        let back: Coord = serde_json::from_str("[5,6]").unwrap();
        assert_eq!(back, Coord::new(5, 6));
    }

    #[test]
    fn test_color_serde() {
        assert_eq!(serde_json::to_string(&Color::White).unwrap(), "1");
        let c: Color = serde_json::from_str("0").unwrap();
        assert_eq!(c, Color::Black);
        assert!(serde_json::from_str::<Color>("2").is_err());
    }

    #[test]
    fn test_midpoint_and_distance() {
        let a = Coord::new(1, 2);
        let b = Coord::new(3, 4);
        assert_eq!(a.midpoint(b), Coord::new(2, 3));
        assert_eq!(a.chebyshev(Coord::new(4, 3)), 3);
    }
}

//! Checkers-Rust: an English draughts rules engine with a minimax opponent.
//!
//! ## Modules
//!
//! - [`constants`] - Board defaults, evaluation weights, search depth
//! - [`piece`] - Coordinates, colors and cell contents
//! - [`board`] - Board state, move application, serialization
//! - [`movegen`] - Per-piece destination generation
//! - [`eval`] - Static evaluation heuristic
//! - [`search`] - Fixed-depth minimax
//! - [`game`] - Game session: seats, turn token, move bookkeeping
//! - [`protocol`] - Line-based text protocol
//!
//! ## Example
//!
//! ```
//! use checkers_rust::game::Game;
//! use checkers_rust::piece::{Color, Coord};
//!
//! let mut game = Game::new();
//! game.play_move(Color::Black, Coord::new(1, 2), Coord::new(2, 3)).unwrap();
//!
//! // Let the engine answer for White
//! let (from, to) = game.play_ai(3).unwrap();
//! println!("White plays {from} -> {to}");
//! ```

pub mod board;
pub mod constants;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod piece;
pub mod protocol;
pub mod search;

//! Constants for board geometry, evaluation weights, and search defaults.
//!
//! Runtime overrides for the geometry and search depth come from the binary's
//! command-line flags; everything here is the default configuration.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board width (columns).
pub const DEFAULT_WIDTH: usize = 8;

/// Default board height (rows).
pub const DEFAULT_HEIGHT: usize = 8;

/// Rows of starting pawns placed on each side.
pub const DEFAULT_PLAYER_ROWS: usize = 3;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default minimax depth used for the automated opponent.
pub const DEFAULT_DEPTH: usize = 4;

/// Largest depth the text protocol accepts. Unpruned minimax grows as
/// branching^depth, so anything beyond this stalls an interactive session.
pub const MAX_PROTOCOL_DEPTH: usize = 7;

// =============================================================================
// Evaluation Weights
// =============================================================================

/// Reward per opposing piece the evaluated player has captured.
pub const CAPTURE_REWARD: i32 = 1000;

/// Penalty per piece the opponent has captured from the evaluated player.
pub const CAPTURE_PENALTY: i32 = 600;

/// Weight of each currently available jump.
pub const JUMP_OPTION_WEIGHT: i32 = 10;

/// Material value of a king.
pub const KING_VALUE: i32 = 30;

/// Material value of a pawn.
pub const PAWN_VALUE: i32 = 10;

/// Base of the king pursuit term (`KING_PURSUIT_BASE - chebyshev distance`).
pub const KING_PURSUIT_BASE: i32 = 20;

// =============================================================================
// Cell Character Codes
// =============================================================================

/// Empty cell.
pub const CODE_EMPTY: char = '#';

/// Black pawn.
pub const CODE_BLACK_PAWN: char = 'b';

/// Black king.
pub const CODE_BLACK_KING: char = 'B';

/// White pawn.
pub const CODE_WHITE_PAWN: char = 'w';

/// White king.
pub const CODE_WHITE_KING: char = 'W';

//! Line-based text protocol for driving a game session.
//!
//! One command per line, optionally prefixed by a numeric id. Responses start
//! with `=` on success or `?` on failure, followed by the id and the payload,
//! and end with a blank line. Board and move queries answer in JSON.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `list_commands`, `known_command <cmd>`, `quit`
//! - `new_game` - Reset to the starting layout
//! - `board` - Serialized board as JSON
//! - `show` - Text diagram of the board
//! - `load <json>` - Replace the board with a serialized one
//! - `seat` - Claim the next free seat
//! - `token` - Current turn token
//! - `moves [color]` - Legal moves (defaults to the side to move)
//! - `play <color> <col,row> <col,row>` - Play a move
//! - `genmove [depth]` - Let the engine move for the side to move
//! - `depth <n>` - Set the default search depth
//!
//! ## Example
//!
//! ```ignore
//! use checkers_rust::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use crate::board::{Board, BoardState};
use crate::constants::{
    DEFAULT_DEPTH, DEFAULT_HEIGHT, DEFAULT_PLAYER_ROWS, DEFAULT_WIDTH, MAX_PROTOCOL_DEPTH,
};
use crate::game::Game;
use crate::piece::{Color, Coord};

const KNOWN_COMMANDS: &[&str] = &[
    "board",
    "depth",
    "genmove",
    "known_command",
    "list_commands",
    "load",
    "moves",
    "name",
    "new_game",
    "play",
    "quit",
    "seat",
    "show",
    "token",
    "version",
];

/// Board geometry and search settings for new games.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub player_rows: usize,
    pub depth: usize,
    /// Log engine moves to stderr.
    pub verbose: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            player_rows: DEFAULT_PLAYER_ROWS,
            depth: DEFAULT_DEPTH,
            verbose: false,
        }
    }
}

impl EngineConfig {
    pub fn new_board(&self) -> Board {
        Board::with_dimensions(self.height, self.width, self.player_rows)
    }
}

/// Protocol engine state.
pub struct ProtocolEngine {
    game: Game,
    config: EngineConfig,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            game: Game::with_board(config.new_board()),
            config,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop on stdin/stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        self.run_with(stdin.lock(), io::stdout())
    }

    /// Run the command loop over arbitrary streams.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let (success, message) = self.execute(&command, &parts[1..]);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional leading numeric id from the command.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0
            && let Ok(id) = trimmed[..end].parse::<u32>()
        {
            return (Some(id), trimmed[end..].trim());
        }
        (None, trimmed)
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "new_game" => {
                self.game = Game::with_board(self.config.new_board());
                (true, String::new())
            }

            "board" => json_response(&self.game.serialize()),

            "show" => (true, format!("\n{}", self.game.board)),

            "load" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let state: BoardState = match serde_json::from_str(&args.join(" ")) {
                    Ok(s) => s,
                    Err(e) => return (false, format!("invalid board json: {e}")),
                };
                match Board::from_serialized(&state) {
                    Ok(board) => {
                        self.game = Game::with_board(board);
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "seat" => match self.game.claim_seat() {
                Some(color) => (true, color.to_string()),
                None => (false, "no seats available".to_string()),
            },

            "token" => (true, self.game.turn_secret().to_string()),

            "moves" => {
                let player = match args.first() {
                    Some(s) => match Color::parse(s) {
                        Some(c) => c,
                        None => return (false, format!("invalid color: {s}")),
                    },
                    None => self.game.board.turn,
                };
                json_response(&self.game.board.moves_for(player))
            }

            "play" => {
                if args.len() < 3 {
                    return (false, "missing arguments".to_string());
                }
                let Some(player) = Color::parse(args[0]) else {
                    return (false, format!("invalid color: {}", args[0]));
                };
                let (Some(from), Some(to)) = (Coord::parse(args[1]), Coord::parse(args[2])) else {
                    return (false, "invalid coordinate, expected col,row".to_string());
                };
                match self.game.play_move(player, from, to) {
                    Ok(true) => (true, "continue".to_string()),
                    Ok(false) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let depth = match args.first() {
                    Some(s) => match parse_depth(s) {
                        Some(d) => d,
                        None => return (false, format!("invalid depth: {s}")),
                    },
                    None => self.config.depth,
                };
                let player = self.game.board.turn;
                match self.game.play_ai(depth) {
                    Ok((from, to)) => {
                        if self.config.verbose {
                            eprintln!("genmove: {player} {from} -> {to} (depth {depth})");
                        }
                        (true, format!("{from} {to}"))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "depth" => match args.first().and_then(|s| parse_depth(s)) {
                Some(d) => {
                    self.config.depth = d;
                    (true, String::new())
                }
                None => (
                    false,
                    format!("depth must be between 1 and {MAX_PROTOCOL_DEPTH}"),
                ),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

fn parse_depth(s: &str) -> Option<usize> {
    s.parse::<usize>()
        .ok()
        .filter(|d| (1..=MAX_PROTOCOL_DEPTH).contains(d))
}

fn json_response<T: serde::Serialize>(value: &T) -> (bool, String) {
    match serde_json::to_string(value) {
        Ok(s) => (true, s),
        Err(e) => (false, e.to_string()),
    }
}

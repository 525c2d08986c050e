//! Line-oriented text protocol for driving a game session.
//!
//! Modelled on GTP: each request is an optional numeric id, a command name
//! and arguments. Successful responses start with `=`, failures with `?`,
//! followed by the id (if any) and a payload, and end with a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `reset` / `clear_board` - Start a new game (JSON reply)
//! - `level <difficulty>` - Set the default difficulty
//! - `showboard` - Print the board
//! - `move <row> <col> [difficulty]` - Play the human move and the machine
//!   reply (JSON reply). Unknown difficulty names fall back to `Random`.
//! - `genmove [difficulty]` - Show the machine's move without playing it
//!
//! ## Example
//!
//! ```text
//! move 0 0 Minimax Hard
//! = {"status":"next","board":[["X","","",""],...],"turn":"X","reply":[1,1]}
//! ```

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::board::{Board, Mark};
use crate::difficulty::{Difficulty, UnknownDifficulty};
use crate::game::GameSession;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "genmove",
    "known_command",
    "level",
    "list_commands",
    "move",
    "name",
    "protocol_version",
    "quit",
    "reset",
    "showboard",
    "version",
];

const PROTOCOL_VERSION: &str = "1";

/// Why a command could not be executed.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("missing argument")]
    MissingArgument,
    #[error("invalid coordinate: '{0}'")]
    InvalidCoordinate(String),
    #[error("coordinate ({0}, {1}) is off the board")]
    OffBoard(usize, usize),
    #[error(transparent)]
    UnknownDifficulty(#[from] UnknownDifficulty),
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ResetReply {
    status: &'static str,
    turn: Mark,
}

/// Protocol front end owning the live game.
pub struct Engine {
    session: GameSession,
    /// Used when a `move` or `genmove` names no difficulty.
    difficulty: Difficulty,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(GameSession::default(), Difficulty::default())
    }
}

impl Engine {
    pub fn new(session: GameSession, difficulty: Difficulty) -> Self {
        Self {
            session,
            difficulty,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let response = self.execute(&command, args);
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            let written = match &response {
                Ok(message) => writeln!(output, "={id_str} {message}\n"),
                Err(err) => writeln!(output, "?{id_str} {err}\n"),
            };
            written.context("failed to write response")?;
            output.flush().context("failed to flush response")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute one command and return the response payload.
    pub fn execute(&mut self, command: &str, args: &[&str]) -> Result<String, CommandError> {
        debug!(command, ?args, "execute");
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok(PROTOCOL_VERSION.to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let cmd = args.first().ok_or(CommandError::MissingArgument)?;
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "reset" | "clear_board" => {
                self.session.reset();
                let reply = ResetReply {
                    status: "reset",
                    turn: self.session.turn(),
                };
                Ok(serde_json::to_string(&reply)?)
            }

            "level" => {
                if args.is_empty() {
                    return Err(CommandError::MissingArgument);
                }
                self.difficulty = args.join(" ").parse()?;
                Ok(self.difficulty.to_string())
            }

            "showboard" => Ok(format!("\n{}", self.session.board())),

            "move" => {
                let [row, col, rest @ ..] = args else {
                    return Err(CommandError::MissingArgument);
                };
                let row = parse_index(row)?;
                let col = parse_index(col)?;
                if !Board::in_bounds(row, col) {
                    return Err(CommandError::OffBoard(row, col));
                }
                let difficulty = self.difficulty_arg(rest);
                let report = self.session.play_turn((row, col), difficulty);
                Ok(serde_json::to_string(&report)?)
            }

            "genmove" => {
                let difficulty = self.difficulty_arg(args);
                Ok(match self.session.suggest(difficulty) {
                    Some((row, col)) => format!("{row} {col}"),
                    None => "none".to_string(),
                })
            }

            _ => Err(CommandError::UnknownCommand(command.to_string())),
        }
    }

    /// Difficulty named by trailing arguments, or the session default.
    fn difficulty_arg(&self, args: &[&str]) -> Difficulty {
        if args.is_empty() {
            self.difficulty
        } else {
            Difficulty::from_name_lenient(&args.join(" "))
        }
    }
}

fn parse_index(arg: &str) -> Result<usize, CommandError> {
    arg.parse()
        .map_err(|_| CommandError::InvalidCoordinate(arg.to_string()))
}

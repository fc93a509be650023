//! Line-oriented text protocol over a game session.
//!
//! The command set follows the shape of GTP version 2 so the engine can sit
//! behind any front end that speaks a simple request/response loop. This is
//! the only place coordinate labels are formatted.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version` - Engine identification
//! - `list_commands`, `known_command <cmd>` - Command discovery
//! - `quit` - Exit the loop
//! - `boardsize <size>` - Start a fresh game on a new board size
//! - `clear_board` - Reset the current game
//! - `play <vertex>` - Place a stone for the side to move (`D4`, or `pass`)
//! - `pass`, `resign` - Turn and game control
//! - `showboard`, `captures`, `status` - Human-readable state
//! - `view` - Full session snapshot as JSON
//!
//! Responses are `=[id] message` on success and `?[id] message` on failure,
//! each followed by a blank line.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info};

use crate::board::{Board, Intersection, Stone};
use crate::constants::{DEFAULT_BOARD_SIZE, GLYPH_EMPTY, MAX_LABELLED_SIZE};
use crate::session::Session;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "captures",
    "clear_board",
    "known_command",
    "list_commands",
    "name",
    "pass",
    "play",
    "protocol_version",
    "quit",
    "resign",
    "showboard",
    "status",
    "version",
    "view",
];

/// Column letters, skipping `I` to avoid confusion with `J`.
const COLUMN_LABELS: &[u8; MAX_LABELLED_SIZE] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// A parsed move target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertex {
    Pass,
    Point(Intersection),
}

/// Parse a vertex such as `D4` or `pass` for a board of `size`.
///
/// Rows are numbered from 1 at the bottom; row 0 of the board is the top line.
pub fn parse_vertex(s: &str, size: usize) -> Result<Vertex> {
    if s.eq_ignore_ascii_case("pass") {
        return Ok(Vertex::Pass);
    }
    let mut chars = s.chars();
    let letter = chars
        .next()
        .ok_or_else(|| anyhow!("empty vertex"))?
        .to_ascii_uppercase();
    let col = COLUMN_LABELS
        .iter()
        .position(|&c| c as char == letter)
        .ok_or_else(|| anyhow!("invalid column in vertex {s:?}"))?;
    let number: usize = chars
        .as_str()
        .parse()
        .with_context(|| format!("invalid row in vertex {s:?}"))?;
    if number == 0 || number > size || col >= size {
        bail!("vertex {s:?} is off the {size}x{size} board");
    }
    Ok(Vertex::Point(Intersection::new(size - number, col)))
}

fn check_labelled(size: usize) -> Result<()> {
    if size > MAX_LABELLED_SIZE {
        bail!("a {size}x{size} board is too large for vertex labels (max {MAX_LABELLED_SIZE})");
    }
    Ok(())
}

/// Format an intersection as a vertex label for a board of `size`.
pub fn format_vertex(at: Intersection, size: usize) -> Result<String> {
    check_labelled(size)?;
    if at.row >= size || at.col >= size {
        bail!("{at} is off the {size}x{size} board");
    }
    let letter = COLUMN_LABELS[at.col] as char;
    Ok(format!("{letter}{}", size - at.row))
}

/// Render a board with column letters and row numbers.
pub fn render_board(board: &Board) -> Result<String> {
    let size = board.size();
    check_labelled(size)?;
    let header: String = COLUMN_LABELS[..size]
        .iter()
        .map(|&c| format!(" {}", c as char))
        .collect();
    let mut out = format!("  {header}\n");
    for row in 0..size {
        let number = size - row;
        out.push_str(&format!("{number:>2}"));
        for col in 0..size {
            let ch = board
                .get(Intersection::new(row, col))
                .map_or(GLYPH_EMPTY, Stone::glyph);
            out.push(' ');
            out.push(ch);
        }
        out.push_str(&format!(" {number}\n"));
    }
    out.push_str(&format!("  {header}"));
    Ok(out)
}

/// Protocol front end owning one session.
pub struct ProtocolEngine {
    session: Session,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

impl ProtocolEngine {
    /// Create an engine with a fresh game of the given size.
    pub fn new(size: usize) -> Self {
        Self {
            session: Session::new(size),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
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

            let (prefix, message) = match self.execute(&command, args) {
                Ok(message) => ('=', message),
                Err(err) => {
                    debug!(%command, error = %err, "command failed");
                    ('?', err.to_string())
                }
            };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional numeric command id off the front of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute one command and return its response text.
    pub fn execute(&mut self, command: &str, args: &[&str]) -> Result<String> {
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok("2".to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let name = args.first().ok_or_else(|| anyhow!("missing argument"))?;
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "boardsize" => {
                let arg = args.first().ok_or_else(|| anyhow!("missing argument"))?;
                let size: usize = arg.parse().context("invalid size")?;
                if !(1..=MAX_LABELLED_SIZE).contains(&size) {
                    bail!("unacceptable size, expected 1 to {MAX_LABELLED_SIZE} (got {size})");
                }
                info!(size, "new board size");
                self.session = Session::new(size);
                Ok(String::new())
            }

            "clear_board" => {
                self.session = self.session.reset();
                Ok(String::new())
            }

            "play" => {
                // An optional leading color is accepted and ignored: turns alternate.
                let vertex = match args {
                    [vertex] | [_, vertex] => vertex,
                    _ => bail!("expected: play [color] <vertex>"),
                };
                match parse_vertex(vertex, self.session.size())? {
                    Vertex::Pass => {
                        self.session.pass();
                        Ok(String::new())
                    }
                    Vertex::Point(at) => {
                        if self.session.is_finished() {
                            bail!("game is over");
                        }
                        let captured = self
                            .session
                            .try_place(at)
                            .map_err(|rejection| anyhow!("illegal move: {rejection}"))?;
                        Ok(if captured > 0 {
                            format!("captured {captured}")
                        } else {
                            String::new()
                        })
                    }
                }
            }

            "pass" => {
                self.session.pass();
                Ok(String::new())
            }

            "resign" => {
                let view = self.session.resign();
                Ok(view.outcome.map(|o| o.to_string()).unwrap_or_default())
            }

            "showboard" => Ok(format!("\n{}", render_board(self.session.board())?)),

            "captures" => Ok(format!(
                "black {} white {}",
                self.session.captures(Stone::Black),
                self.session.captures(Stone::White)
            )),

            "status" => Ok(match self.session.outcome() {
                Some(outcome) => format!("finished {outcome}"),
                None => format!("{} to move", self.session.to_move()),
            }),

            "view" => Ok(serde_json::to_string(&self.session.view())?),

            _ => bail!("unknown command: {command}"),
        }
    }
}

//! Game session: turn order, capture tallies, and the terminal state.
//!
//! A `Session` owns the only live board. Every transition is total: a
//! placement is either committed in full or leaves the session untouched,
//! and a finished session absorbs all further actions.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::board::{Board, Intersection, Stone};
use crate::resolver::{Rejection, resolve};

/// Whether the game still accepts actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    InProgress,
    Finished,
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Winner(Stone),
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Stone> {
        match self {
            Outcome::Winner(stone) => Some(stone),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(stone) => write!(f, "{stone} wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Snapshot handed to the presentation layer after each action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub size: usize,
    pub board: Board,
    pub to_move: Stone,
    pub black_captures: usize,
    pub white_captures: usize,
    /// Set when the attempted placement was refused.
    pub rejection: Option<Rejection>,
    pub finished: bool,
    pub outcome: Option<Outcome>,
}

impl SessionView {
    pub fn captures(&self, stone: Stone) -> usize {
        match stone {
            Stone::Black => self.black_captures,
            Stone::White => self.white_captures,
        }
    }
}

/// One game between Black and White.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    board: Board,
    to_move: Stone,
    black_captures: usize,
    white_captures: usize,
    status: Status,
    outcome: Option<Outcome>,
    move_number: usize,
}

impl Session {
    /// Start a game on an empty `size` x `size` board with Black to move.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        Self::from_position(Board::new(size), Stone::Black)
    }

    /// Start a game from an arbitrary position with zero captures.
    ///
    /// A position whose board is already full starts out finished.
    pub fn from_position(board: Board, to_move: Stone) -> Self {
        let mut session = Self {
            board,
            to_move,
            black_captures: 0,
            white_captures: 0,
            status: Status::InProgress,
            outcome: None,
            move_number: 0,
        };
        session.evaluate_terminal();
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn to_move(&self) -> Stone {
        self.to_move
    }

    /// Stones captured so far by `stone`.
    pub fn captures(&self, stone: Stone) -> usize {
        match stone {
            Stone::Black => self.black_captures,
            Stone::White => self.white_captures,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == Status::Finished
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Accepted placements plus passes.
    pub fn move_number(&self) -> usize {
        self.move_number
    }

    /// Snapshot of the current state with no rejection attached.
    pub fn view(&self) -> SessionView {
        self.view_with(None)
    }

    fn view_with(&self, rejection: Option<Rejection>) -> SessionView {
        SessionView {
            size: self.board.size(),
            board: self.board.clone(),
            to_move: self.to_move,
            black_captures: self.black_captures,
            white_captures: self.white_captures,
            rejection,
            finished: self.is_finished(),
            outcome: self.outcome,
        }
    }

    /// Place a stone for the side to move at `(row, col)`.
    ///
    /// On rejection the session is unchanged and the reason is reported in
    /// the returned view. A finished session ignores the request.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn place(&mut self, row: usize, col: usize) -> SessionView {
        match self.try_place(Intersection::new(row, col)) {
            Ok(_) => self.view(),
            Err(rejection) => self.view_with(Some(rejection)),
        }
    }

    /// Place a stone, returning the number of stones captured.
    ///
    /// Returns `Ok(0)` without effect when the session is finished.
    pub fn try_place(&mut self, at: Intersection) -> Result<usize, Rejection> {
        if self.is_finished() {
            return Ok(0);
        }
        let mover = self.to_move;
        let resolution = resolve(&self.board, at, mover).inspect_err(|rejection| {
            debug!(%at, %mover, %rejection, "placement rejected");
        })?;

        let captured = resolution.captured_count();
        self.board = resolution.board;
        match mover {
            Stone::Black => self.black_captures += captured,
            Stone::White => self.white_captures += captured,
        }
        self.move_number += 1;
        debug!(%at, %mover, captured, "placement accepted");

        self.evaluate_terminal();
        if !self.is_finished() {
            self.to_move = mover.opponent();
        }
        Ok(captured)
    }

    /// Hand the turn to the opponent. Passing never ends the game.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn pass(&mut self) -> SessionView {
        if !self.is_finished() {
            self.to_move = self.to_move.opponent();
            self.move_number += 1;
        }
        self.view()
    }

    /// The side to move resigns; the opponent wins.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn resign(&mut self) -> SessionView {
        if !self.is_finished() {
            let winner = self.to_move.opponent();
            self.finish(Outcome::Winner(winner));
        }
        self.view()
    }

    /// A fresh game on a board of the same size.
    pub fn reset(&self) -> Session {
        info!(size = self.size(), "session reset");
        Session::new(self.size())
    }

    /// Capture tally plus stones on the board.
    pub fn total(&self, stone: Stone) -> usize {
        self.captures(stone) + self.board.count(stone)
    }

    fn evaluate_terminal(&mut self) {
        if !self.board.is_full() {
            return;
        }
        let black = self.total(Stone::Black);
        let white = self.total(Stone::White);
        let outcome = if black > white {
            Outcome::Winner(Stone::Black)
        } else if white > black {
            Outcome::Winner(Stone::White)
        } else {
            Outcome::Draw
        };
        self.finish(outcome);
    }

    fn finish(&mut self, outcome: Outcome) {
        info!(%outcome, "game finished");
        self.status = Status::Finished;
        self.outcome = Some(outcome);
    }
}

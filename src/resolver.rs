//! Move resolution: placement, capture, and the suicide rule.
//!
//! `resolve` is a pure function of `(board, position, mover)`. It works on a
//! private copy of the board and only hands that copy back when the move is
//! accepted, so captures never escape a rejected move.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::board::{Board, Intersection, Stone};
use crate::group::find_group;

/// Why a placement was refused. All rejections are recoverable: the caller
/// may simply try a different intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    /// Target intersection already holds a stone.
    #[error("point is occupied")]
    OccupiedCell,
    /// Coordinates outside `[0, size)`.
    #[error("point ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },
    /// Move would leave its own group without liberties and captures nothing.
    #[error("suicide")]
    Suicide,
}

/// An accepted placement: the board after captures and what was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub board: Board,
    /// Opponent stones removed by this move, in row-major order.
    pub captured: Vec<Intersection>,
}

impl Resolution {
    pub fn captured_count(&self) -> usize {
        self.captured.len()
    }
}

/// Resolve one placement of `mover` at `position`.
///
/// Captures are resolved before the suicide check, so a move that leaves
/// its own group without liberties is still legal when it removes at least
/// one opposing group.
///
/// # Errors
/// - [`Rejection::OutOfBounds`] if `position` is off the board
/// - [`Rejection::OccupiedCell`] if `position` already holds a stone
/// - [`Rejection::Suicide`] if the move captures nothing and its group has no liberties
pub fn resolve(
    board: &Board,
    position: Intersection,
    mover: Stone,
) -> Result<Resolution, Rejection> {
    if !board.contains(position) {
        return Err(Rejection::OutOfBounds {
            row: position.row,
            col: position.col,
            size: board.size(),
        });
    }
    if board.get(position).is_some() {
        return Err(Rejection::OccupiedCell);
    }

    let mut work = board.clone();
    work.set(position, mover);

    let opponent = mover.opponent();
    let mut captured: BTreeSet<Intersection> = BTreeSet::new();
    for n in board.neighbors(position) {
        // A neighbor already swept up with an earlier group is skipped.
        if work.get(n) != Some(opponent) || captured.contains(&n) {
            continue;
        }
        let group = find_group(&work, n);
        if group.is_captured() {
            captured.extend(group.stones);
        }
    }
    for &pt in &captured {
        work.clear(pt);
    }

    if captured.is_empty() && find_group(&work, position).liberties.is_empty() {
        debug!(%position, %mover, "rejected suicide");
        return Err(Rejection::Suicide);
    }

    if !captured.is_empty() {
        debug!(%position, %mover, count = captured.len(), "captured stones");
    }
    Ok(Resolution {
        board: work,
        captured: captured.into_iter().collect(),
    })
}

/// Whether `mover` may legally play at `position`.
pub fn is_legal(board: &Board, position: Intersection, mover: Stone) -> bool {
    resolve(board, position, mover).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: usize, col: usize) -> Intersection {
        Intersection::new(row, col)
    }

    #[test]
    fn test_place_on_empty_board() {
        let board = Board::new(19);
        let res = resolve(&board, at(0, 0), Stone::Black).unwrap();
        assert_eq!(res.board.get(at(0, 0)), Some(Stone::Black));
        assert_eq!(res.captured_count(), 0);
        // Input untouched
        assert_eq!(board.get(at(0, 0)), None);
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let board = Board::from_rows(&["X..", "...", "..."]).unwrap();
        assert_eq!(
            resolve(&board, at(0, 0), Stone::White),
            Err(Rejection::OccupiedCell)
        );
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let board = Board::new(3);
        assert_eq!(
            resolve(&board, at(3, 1), Stone::Black),
            Err(Rejection::OutOfBounds { row: 3, col: 1, size: 3 })
        );
    }

    #[test]
    fn test_capture_single_stone() {
        let board = Board::from_rows(&[".X..", "XOX.", "....", "...."]).unwrap();
        let res = resolve(&board, at(2, 1), Stone::Black).unwrap();
        assert_eq!(res.captured, vec![at(1, 1)]);
        assert_eq!(res.board.get(at(1, 1)), None);
        assert_eq!(res.board.count(Stone::Black), 4);
    }

    #[test]
    fn test_capture_corner() {
        let board = Board::from_rows(&["OX.", "...", "..."]).unwrap();
        let res = resolve(&board, at(1, 0), Stone::Black).unwrap();
        assert_eq!(res.captured, vec![at(0, 0)]);
    }

    #[test]
    fn test_group_reached_from_two_neighbors_counted_once() {
        // White group (1,1)-(1,2)-(2,2) wraps around (2,1); both neighbors
        // above and right of the placement belong to it.
        let board = Board::from_rows(&[
            ".XX..",
            "XOOX.",
            "X.OX.",
            ".XX..",
            ".....",
        ])
        .unwrap();
        let res = resolve(&board, at(2, 1), Stone::Black).unwrap();
        assert_eq!(res.captured_count(), 3);
        assert_eq!(res.captured, vec![at(1, 1), at(1, 2), at(2, 2)]);
    }

    #[test]
    fn test_captures_two_separate_groups() {
        let board = Board::from_rows(&[
            "XO.OX",
            ".X.X.",
            ".....",
            ".....",
            ".....",
        ])
        .unwrap();
        let res = resolve(&board, at(0, 2), Stone::Black).unwrap();
        assert_eq!(res.captured, vec![at(0, 1), at(0, 3)]);
    }

    #[test]
    fn test_suicide_rejected_board_unchanged() {
        let board = Board::from_rows(&[".O.", "O..", "..."]).unwrap();
        let before = board.clone();
        assert_eq!(
            resolve(&board, at(0, 0), Stone::Black),
            Err(Rejection::Suicide)
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_group_suicide_rejected() {
        // Filling the last liberty of its own two-stone group
        let board = Board::from_rows(&["X.O", "OO.", "..."]).unwrap();
        assert_eq!(
            resolve(&board, at(0, 1), Stone::Black),
            Err(Rejection::Suicide)
        );
    }

    #[test]
    fn test_capture_overrides_self_atari() {
        // Black at (0,0) has no liberty until White (0,1) is removed.
        // White (1,0) keeps a liberty at (2,0) and survives.
        let board = Board::from_rows(&[".OX.", "OX..", "....", "...."]).unwrap();
        let res = resolve(&board, at(0, 0), Stone::Black).unwrap();
        assert_eq!(res.captured, vec![at(0, 1)]);
        let own = find_group(&res.board, at(0, 0));
        assert_eq!(own.liberties, BTreeSet::from([at(0, 1)]));
    }

    #[test]
    fn test_single_cell_board_is_suicide() {
        let board = Board::new(1);
        assert_eq!(
            resolve(&board, at(0, 0), Stone::Black),
            Err(Rejection::Suicide)
        );
    }

    #[test]
    fn test_is_legal() {
        let board = Board::from_rows(&[".O.", "O..", "..."]).unwrap();
        assert!(!is_legal(&board, at(0, 0), Stone::Black));
        assert!(is_legal(&board, at(0, 0), Stone::White));
        assert!(is_legal(&board, at(2, 2), Stone::Black));
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(Rejection::OccupiedCell.to_string(), "point is occupied");
        assert_eq!(Rejection::Suicide.to_string(), "suicide");
        assert_eq!(
            Rejection::OutOfBounds { row: 9, col: 0, size: 9 }.to_string(),
            "point (9, 0) is outside the 9x9 board"
        );
    }
}

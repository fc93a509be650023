//! Group analysis: connected stones and their liberties.
//!
//! A group is the maximal set of same-colored stones joined through
//! orthogonal neighbors. Its liberties are the empty intersections adjacent
//! to any stone in the group. Groups are derived on demand and never cached,
//! since every accepted move changes the board.

use std::collections::BTreeSet;

use crate::board::{Board, Intersection};

/// A connected group of stones together with its liberties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub stones: BTreeSet<Intersection>,
    pub liberties: BTreeSet<Intersection>,
}

impl Group {
    /// Number of stones in the group.
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    /// True for the "no group" result of analysing an empty intersection.
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    /// A real group with no liberties left.
    pub fn is_captured(&self) -> bool {
        !self.stones.is_empty() && self.liberties.is_empty()
    }

    pub fn contains(&self, at: Intersection) -> bool {
        self.stones.contains(&at)
    }
}

/// Find the group containing `start`.
///
/// Flood-fills over same-colored 4-neighbors with a dense visited grid, so
/// each stone is expanded once and each liberty is recorded once. An empty
/// or off-board `start` yields an empty group with no liberties.
pub fn find_group(board: &Board, start: Intersection) -> Group {
    let Some(color) = board.get(start) else {
        return Group::default();
    };

    let mut group = Group::default();
    let mut visited = vec![false; board.area()];
    let mut stack = vec![start];
    visited[board.index_of(start)] = true;

    while let Some(pt) = stack.pop() {
        group.stones.insert(pt);
        for n in board.neighbors(pt) {
            match board.get(n) {
                None => {
                    group.liberties.insert(n);
                }
                Some(c) if c == color => {
                    let i = board.index_of(n);
                    if !visited[i] {
                        visited[i] = true;
                        stack.push(n);
                    }
                }
                Some(_) => {}
            }
        }
    }
    group
}

//! Property tests for the group analyzer, resolver, and session.

use std::collections::BTreeSet;

use proptest::prelude::*;

use goban_rules::{Board, Intersection, Rejection, Session, Stone, find_group, resolve};

/// Random square boards of size 1..=7 with mixed stones.
fn arb_board() -> impl Strategy<Value = Board> {
    (1usize..=7).prop_flat_map(|size| {
        prop::collection::vec(prop::sample::select(vec!['.', '.', 'X', 'O']), size * size)
            .prop_map(move |glyphs| {
                let rows: Vec<String> = glyphs
                    .chunks(size)
                    .map(|row| row.iter().collect())
                    .collect();
                let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
                Board::from_rows(&refs).unwrap()
            })
    })
}

fn arb_stone() -> impl Strategy<Value = Stone> {
    prop_oneof![Just(Stone::Black), Just(Stone::White)]
}

proptest! {
    #[test]
    fn group_is_same_from_every_member(board in arb_board()) {
        for start in board.intersections() {
            let group = find_group(&board, start);
            for &member in &group.stones {
                prop_assert_eq!(&find_group(&board, member), &group);
            }
        }
    }

    #[test]
    fn group_liberties_are_empty_and_adjacent(board in arb_board()) {
        for start in board.intersections() {
            let group = find_group(&board, start);
            if board.get(start).is_none() {
                prop_assert!(group.stones.is_empty());
                prop_assert!(group.liberties.is_empty());
                continue;
            }
            for &lib in &group.liberties {
                prop_assert!(board.is_empty_at(lib));
                prop_assert!(board.neighbors(lib).any(|n| group.contains(n)));
            }
        }
    }

    #[test]
    fn accepted_move_leaves_placed_stone_breathing(
        board in arb_board(),
        stone in arb_stone(),
        row in 0usize..8,
        col in 0usize..8,
    ) {
        let at = Intersection::new(row, col);
        match resolve(&board, at, stone) {
            Ok(res) => {
                prop_assert_eq!(res.board.get(at), Some(stone));
                let own = find_group(&res.board, at);
                prop_assert!(!own.liberties.is_empty());
                prop_assert_eq!(
                    res.board.count(stone.opponent()) + res.captured_count(),
                    board.count(stone.opponent())
                );
            }
            Err(Rejection::OutOfBounds { .. }) => prop_assert!(!board.contains(at)),
            Err(Rejection::OccupiedCell) => prop_assert!(board.get(at).is_some()),
            Err(Rejection::Suicide) => {
                // Every neighbor is occupied, no friendly neighbor group can
                // lend a liberty, and no enemy neighbor group is in atari at `at`.
                prop_assert!(board.is_empty_at(at));
                let only_at = BTreeSet::from([at]);
                for n in board.neighbors(at) {
                    let neighbor = board.get(n);
                    prop_assert!(neighbor.is_some());
                    let group = find_group(&board, n);
                    if neighbor == Some(stone) {
                        prop_assert!(group.liberties.iter().all(|&lib| lib == at));
                    } else {
                        prop_assert_ne!(&group.liberties, &only_at);
                    }
                }
            }
        }
    }

    #[test]
    fn rejected_placement_leaves_session_unchanged(
        board in arb_board(),
        stone in arb_stone(),
        row in 0usize..8,
        col in 0usize..8,
    ) {
        let mut session = Session::from_position(board, stone);
        let before = session.clone();
        let view = session.place(row, col);
        if view.rejection.is_some() {
            prop_assert_eq!(&session, &before);
        }
    }

    #[test]
    fn capture_tallies_track_stones_removed_from_board(
        moves in prop::collection::vec((0usize..5, 0usize..5), 1..120)
    ) {
        let mut session = Session::new(5);
        for (row, col) in moves {
            let mover = session.to_move();
            let opponent = mover.opponent();
            let mover_tally = session.captures(mover);
            let opponent_tally = session.captures(opponent);
            let opponent_stones = session.board().count(opponent);
            let mover_stones = session.board().count(mover);

            let view = session.place(row, col);
            if view.rejection.is_some() {
                prop_assert_eq!(session.captures(mover), mover_tally);
                continue;
            }
            let removed = opponent_stones - session.board().count(opponent);
            prop_assert_eq!(session.captures(mover), mover_tally + removed);
            prop_assert_eq!(session.captures(opponent), opponent_tally);
            prop_assert_eq!(session.board().count(mover), mover_stones + 1);
        }
    }
}

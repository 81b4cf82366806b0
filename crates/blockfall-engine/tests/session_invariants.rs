//! Property tests over random command sequences and random boards.

use std::time::Duration;

use blockfall_engine::{
    Board, BoardRow, Cell, Command, CommandOutcome, GameSession, MAX_LEVEL, PieceKind,
    PieceSeed, SessionConfig, SessionState, TickOutcome,
};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Step {
    Command(Command),
    Tick,
    Advance(u64),
    TogglePause,
    Reset,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        8 => prop::sample::select(Command::ALL.to_vec()).prop_map(Step::Command),
        4 => Just(Step::Tick),
        4 => (0_u64..1000).prop_map(Step::Advance),
        1 => Just(Step::TogglePause),
        1 => Just(Step::Reset),
    ]
}

fn assert_session_consistent(session: &GameSession) {
    let board = session.board();
    assert_eq!(board.rows().count(), usize::from(board.height()));
    assert!(
        board
            .rows()
            .all(|row| row.cells().len() == usize::from(board.width()))
    );
    // full rows never survive a landing
    assert!(!board.rows().any(BoardRow::is_filled));

    let stats = session.stats();
    assert!((1..=MAX_LEVEL).contains(&stats.level()));

    match session.state() {
        SessionState::Running | SessionState::Paused => {
            let piece = session.active_piece().expect("live session has a piece");
            assert!(board.can_place(piece.shape(), piece.column(), piece.row()));
            assert!(piece.rotation().index() < piece.kind().rotation_count());
            assert!(session.next_piece().is_some());
        }
        SessionState::GameOver => {
            assert!(session.active_piece().is_none());
            assert!(!session.fall_timer().is_armed());
        }
        SessionState::Idle => unreachable!("session is started before stepping"),
    }
    assert_eq!(
        session.fall_timer().is_armed(),
        session.state() == SessionState::Running
    );
}

fn board_from_bits(width: u16, bits: &[Vec<bool>]) -> Board {
    let mut board = Board::new(width, u16::try_from(bits.len()).unwrap());
    for (row, cols) in bits.iter().enumerate() {
        for (col, &filled) in cols.iter().enumerate() {
            if filled {
                board.fill_cell_at(
                    i32::try_from(col).unwrap(),
                    i32::try_from(row).unwrap(),
                    Cell::Piece(PieceKind::T),
                );
            }
        }
    }
    board
}

proptest! {
    #[test]
    fn random_play_keeps_session_invariants(
        seed in any::<[u8; 16]>(),
        width in 4_u16..=16,
        height in 4_u16..=24,
        steps in prop::collection::vec(step(), 1..300),
    ) {
        let config = SessionConfig {
            width,
            height,
            seed: Some(PieceSeed::from_bytes(seed)),
        };
        let mut session = GameSession::new(config).unwrap();
        session.start();
        assert_session_consistent(&session);

        for step in steps {
            let before_state = session.state();
            let before_stats = session.stats().clone();
            let reset = matches!(step, Step::Reset);

            let tick = match step {
                Step::Command(command) => match session.apply(command) {
                    CommandOutcome::Tick(outcome) => Some(outcome),
                    CommandOutcome::Ignored => {
                        prop_assert_ne!(before_state, SessionState::Running);
                        None
                    }
                    CommandOutcome::Blocked | CommandOutcome::Applied => None,
                },
                Step::Tick => Some(session.fall_tick()),
                Step::Advance(ms) => session.advance(Duration::from_millis(ms)),
                Step::TogglePause => {
                    session.toggle_pause();
                    None
                }
                Step::Reset => {
                    session.reset();
                    None
                }
            };

            if before_state != SessionState::Running {
                prop_assert!(matches!(tick, None | Some(TickOutcome::Ignored)));
            }
            if let Some(TickOutcome::GameOver { final_score }) = tick {
                prop_assert_eq!(session.state(), SessionState::GameOver);
                prop_assert_eq!(final_score, session.stats().score());
            }

            let stats = session.stats();
            if !reset {
                prop_assert!(stats.score() >= before_stats.score());
                prop_assert!(stats.level() >= before_stats.level());
                prop_assert!(stats.total_cleared_lines() >= before_stats.total_cleared_lines());
            }
            assert_session_consistent(&session);
        }
    }

    #[test]
    fn clear_full_lines_keeps_remaining_rows_in_order(
        width in 1_u16..=8,
        bits in prop::collection::vec(prop::collection::vec(any::<bool>(), 8), 1..20),
    ) {
        let bits: Vec<Vec<bool>> = bits
            .into_iter()
            .map(|row| row.into_iter().take(usize::from(width)).collect())
            .collect();
        let mut board = board_from_bits(width, &bits);
        let full = board.rows().filter(|row| row.is_filled()).count();
        let survivors: Vec<BoardRow> = board
            .rows()
            .filter(|row| !row.is_filled())
            .cloned()
            .collect();

        prop_assert_eq!(board.clear_full_lines(), full);
        prop_assert_eq!(board.rows().count(), bits.len());

        let rows: Vec<&BoardRow> = board.rows().collect();
        prop_assert!(rows[..full].iter().all(|row| row.is_empty()));
        for (after, before) in rows[full..].iter().zip(&survivors) {
            prop_assert_eq!(*after, before);
        }
    }
}

//! Integration tests for the tick loop

use blockfall::core::{GameState, PieceState};
use blockfall::types::{
    Intent, Intents, PieceKind, Position, Rotation, DROP_INTERVAL, FIELD_HEIGHT, FIELD_WIDTH,
    LINE_SCORES, SOFT_DROP_INTERVAL, SPAWN_POSITION,
};

/// Tick until a piece locks, returning the number of ticks taken
fn ticks_until_lock(state: &mut GameState, limit: u32) -> u32 {
    for n in 1..=limit {
        if state.tick() {
            return n;
        }
    }
    panic!("no lock within {} ticks", limit);
}

#[test]
fn test_fresh_game() {
    let state = GameState::new(12345);

    assert_eq!(state.board().occupied_count(), 0);
    assert_eq!(state.score(), 0);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.level(), 0);
    assert_eq!(state.interval_count(), 0);
    assert_eq!(state.position(), Position::new(FIELD_WIDTH as i8 / 2, 1));
    assert_eq!(state.intents(), Intents::default());
    assert_eq!(state.points_table(), &LINE_SCORES);
    assert!(!state.game_over());
}

#[test]
fn test_gravity_locks_vertical_bar_on_floor() {
    let mut state = GameState::new(12345);
    // Vertical I: every block has dx = 0, lowest block one row below the pivot
    state.place(PieceState::new(PieceKind::I, Rotation::East), SPAWN_POSITION);
    let next = state.next();

    // Pivot falls from row 1 to row FIELD_HEIGHT - 2, then one more drop locks it.
    // Gravity fires on tick 0 and every DROP_INTERVAL ticks after.
    let moves = FIELD_HEIGHT as u64 - 3;
    let ticks = ticks_until_lock(&mut state, 10_000);
    assert_eq!(ticks as u64, moves * DROP_INTERVAL + 1);

    let value = PieceKind::I.cell_value();
    for y in 16..20 {
        assert_eq!(state.board().value(5, y), value, "row {}", y);
    }
    assert_eq!(state.board().value(5, 15), 0);
    assert_eq!(state.board().occupied_count(), 4);

    assert_eq!(state.current(), next);
    assert_eq!(state.position(), SPAWN_POSITION);
}

#[test]
fn test_gravity_locks_square_on_bottom_row() {
    let mut state = GameState::new(99);
    state.place(PieceState::new(PieceKind::O, Rotation::North), SPAWN_POSITION);

    ticks_until_lock(&mut state, 10_000);

    let value = PieceKind::O.cell_value();
    for x in 5..7 {
        assert_eq!(state.board().value(x, 19), value);
        assert_eq!(state.board().value(x, 18), value);
    }
}

#[test]
fn test_blocked_rotation_clears_flag() {
    let mut state = GameState::new(12345);
    state.place(PieceState::new(PieceKind::I, Rotation::East), Position::new(0, 10));
    state.set_intent(Intent::RotateCw, true);

    state.tick();

    assert_eq!(state.current().rotation, Rotation::East);
    assert!(!state.intents().rotate_cw);
}

#[test]
fn test_rotate_ccw_flag_is_one_shot() {
    let mut state = GameState::new(12345);
    state.place(PieceState::new(PieceKind::T, Rotation::North), Position::new(5, 10));
    state.set_intent(Intent::RotateCcw, true);

    state.tick();
    assert_eq!(state.current().rotation, Rotation::West);
    assert!(!state.intents().rotate_ccw);

    state.tick();
    assert_eq!(state.current().rotation, Rotation::West);
}

#[test]
fn test_held_move_slides_to_wall_and_stays() {
    let mut state = GameState::new(12345);
    state.place(PieceState::new(PieceKind::O, Rotation::North), Position::new(5, 5));
    state.set_intent(Intent::MoveRight, true);

    for _ in 0..200 {
        state.tick();
    }

    // O spans x..=x+1, so the pivot stops one short of the right wall
    assert_eq!(state.position().x, FIELD_WIDTH as i8 - 2);
    assert!(state.intents().move_right);
}

#[test]
fn test_soft_drop_clears_line_through_tick() {
    let mut state = GameState::new(12345);
    for x in (0..4).chain(8..10) {
        state.board_mut().set(x, 19, Some(PieceKind::S));
    }
    // Horizontal I covering x 4..=7
    state.place(PieceState::new(PieceKind::I, Rotation::North), Position::new(5, 1));
    state.set_intent(Intent::SoftDrop, true);

    let ticks = ticks_until_lock(&mut state, 10_000);
    // 18 descents then the blocked one, one every SOFT_DROP_INTERVAL ticks
    assert_eq!(ticks as u64, 18 * SOFT_DROP_INTERVAL + 1);

    assert_eq!(state.lines(), 1);
    assert_eq!(state.score(), LINE_SCORES[0]);
    assert_eq!(state.board().occupied_count(), 0);
    assert_eq!(state.level(), 0, "level is never advanced by the core");

    let ev = state.take_last_event().unwrap();
    assert_eq!(ev.kind, PieceKind::I);
    assert_eq!(ev.lines_cleared, 1);
    assert_eq!(ev.score_awarded, 40);
}

#[test]
fn test_separated_full_rows_score_as_two_singles() {
    let mut state = GameState::new(1);
    state.set_level(2);
    for y in [5, 3] {
        for x in 0..FIELD_WIDTH as i8 {
            state.board_mut().set(x, y, Some(PieceKind::L));
        }
    }
    state.board_mut().set(2, 4, Some(PieceKind::T));

    let runs = state.clear_lines();

    assert_eq!(runs.as_slice(), &[1, 1]);
    assert_eq!(state.score(), 2 * LINE_SCORES[0] * 3);
    assert_eq!(state.lines(), 2);
    assert_eq!(state.board().value(2, 5), PieceKind::T.cell_value());
}

#[test]
fn test_contiguous_full_rows_score_as_one_triple() {
    let mut state = GameState::new(1);
    state.set_level(1);
    for y in 3..=5 {
        for x in 0..FIELD_WIDTH as i8 {
            state.board_mut().set(x, y, Some(PieceKind::J));
        }
    }
    state.board_mut().set(7, 2, Some(PieceKind::Z));
    state.board_mut().set(1, 0, Some(PieceKind::O));

    let runs = state.clear_lines();

    assert_eq!(runs.as_slice(), &[3]);
    assert_eq!(state.score(), LINE_SCORES[2] * 2);
    assert_eq!(state.lines(), 3);
    // Rows above row 3 moved down by exactly 3
    assert_eq!(state.board().value(7, 5), PieceKind::Z.cell_value());
    assert_eq!(state.board().value(1, 3), PieceKind::O.cell_value());
    for y in 0..3 {
        for x in 0..FIELD_WIDTH as i8 {
            assert_eq!(state.board().value(x, y), 0);
        }
    }
}

#[test]
fn test_level_speeds_up_gravity() {
    let mut slow = GameState::new(5);
    let mut fast = GameState::new(5);
    fast.set_level(9);
    for state in [&mut slow, &mut fast] {
        state.place(PieceState::new(PieceKind::T, Rotation::North), Position::new(5, 2));
    }

    for _ in 0..(DROP_INTERVAL * 2) {
        slow.tick();
        fast.tick();
    }

    assert!(fast.position().y > slow.position().y);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameState::new(2024);
    let mut b = GameState::new(2024);

    for i in 0..3000u32 {
        for state in [&mut a, &mut b] {
            state.set_intent(Intent::MoveLeft, i % 90 < 30);
            state.set_intent(Intent::MoveRight, i % 90 >= 60);
            state.set_intent(Intent::SoftDrop, i % 5 != 0);
            if i % 11 == 0 {
                state.set_intent(Intent::RotateCw, true);
            }
            state.tick();
        }
    }

    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_long_session_keeps_field_valid_and_tops_out() {
    let mut state = GameState::new(31337);
    state.set_intent(Intent::SoftDrop, true);

    let mut awarded = 0u32;
    let mut locks = 0u32;
    for _ in 0..200_000 {
        if state.tick() {
            let ev = state.take_last_event().unwrap();
            awarded += ev.score_awarded;
            locks += 1;
        }
        if state.game_over() {
            break;
        }
    }

    // Dropping every piece straight down stacks the middle until spawn is blocked
    assert!(state.game_over());
    assert!(locks > 0);
    assert_eq!(awarded, state.score());
    for y in 0..FIELD_HEIGHT as i8 {
        for x in 0..FIELD_WIDTH as i8 {
            assert!(state.board().value(x, y) <= 7);
        }
    }

    // Game over freezes the simulation until re-initialized
    let before = state.snapshot();
    assert!(!state.tick());
    assert_eq!(state.snapshot(), before);

    state.initialize();
    assert!(!state.game_over());
    assert_eq!(state.board().occupied_count(), 0);
}

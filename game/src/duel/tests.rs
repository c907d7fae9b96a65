use super::*;
use crate::arena::Start;
use crate::direction::Direction::{Down, Left, Right, Up};
use crate::grid::Occupancy;
use crate::position::Position;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const BOTH: Ready = Ready {
    human: true,
    bot: true,
};

fn open_arena(width: usize, height: usize, human: Start, bot: Start) -> Arena {
    Arena::open("test", width, height, human, bot)
}

fn new_match(width: usize, height: usize, human: Start, bot: Start) -> Match {
    Match::new(&open_arena(width, height, human, bot))
}

fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

fn occupy(m: &mut Match, cells: &[(i32, i32)]) {
    for &(x, y) in cells {
        m.grid.set(pos(x, y), Cell::Trail(AgentId::Human));
    }
}

#[test]
fn start_cells_are_marked() {
    let m = new_match(10, 10, Start::new(2, 5, Right), Start::new(7, 5, Left));
    assert_eq!(m.grid().get(pos(2, 5)), Cell::Trail(AgentId::Human));
    assert_eq!(m.grid().get(pos(7, 5)), Cell::Trail(AgentId::Bot));
    assert_eq!(m.grid().occupied_count(), 2);
    assert_eq!(m.score(), 0);
    assert_eq!(m.outcome(), None);
}

#[test]
fn agents_advance_along_their_headings() {
    let mut m = new_match(10, 10, Start::new(2, 5, Right), Start::new(7, 5, Left));

    for n in 1..=2 {
        let human_next = m.human.position + Right.delta();
        let bot_next = m.bot.position + Left.delta();
        assert_eq!(m.grid.classify(human_next), Occupancy::Free);
        assert_eq!(m.grid.classify(bot_next), Occupancy::Free);

        m.step_with(Some(Right), Some(Left));
        assert_eq!(m.human.position, pos(2 + n, 5));
        assert_eq!(m.bot.position, pos(7 - n, 5));
        assert!(!m.is_over());
    }
    assert_eq!(m.score(), 2);
    assert_eq!(m.grid.get(pos(4, 5)), Cell::Trail(AgentId::Human));
    assert_eq!(m.grid.get(pos(5, 5)), Cell::Trail(AgentId::Bot));

    // Now adjacent: each steps into the other's head cell.
    m.step_with(Some(Right), Some(Left));
    assert_eq!(m.outcome(), Some(Outcome::Draw));
    assert!(m.human.is_defeated() && m.bot.is_defeated());
    assert_eq!(m.human.position, pos(4, 5));
    assert_eq!(m.score(), 2);
}

#[test]
fn head_on_collision_is_a_draw() {
    let mut m = new_match(10, 10, Start::new(3, 5, Right), Start::new(5, 5, Left));
    assert_eq!(m.grid.classify(pos(4, 5)), Occupancy::Free);

    m.step_with(Some(Right), Some(Left));

    assert_eq!(m.outcome(), Some(Outcome::Draw));
    let snapshot = m.snapshot();
    assert!(snapshot.human_defeated);
    assert!(snapshot.bot_defeated);
    // Neither agent claims the contested cell.
    assert_eq!(m.grid.get(pos(4, 5)), Cell::Empty);
}

#[test]
fn resolution_ignores_move_order() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..500 {
        let mut grid = Grid::new(6, 6);
        for _ in 0..rng.gen_range(0..12) {
            let cell = pos(rng.gen_range(0..6), rng.gen_range(0..6));
            grid.set(cell, Cell::Trail(AgentId::Bot));
        }
        let mut planned = |agent| {
            let heading = Direction::ALL[rng.gen_range(0..4)];
            let from = pos(rng.gen_range(0..6), rng.gen_range(0..6));
            PlannedMove {
                agent,
                heading,
                to: from + heading.delta(),
            }
        };
        let a = planned(AgentId::Human);
        let b = planned(AgentId::Bot);

        assert_eq!(resolve(&grid, &[a, b]), resolve(&grid, &[b, a]));
    }
}

#[test]
fn one_fault_ends_the_match_for_both() {
    let mut m = new_match(10, 10, Start::new(9, 2, Right), Start::new(4, 7, Up));
    m.step_with(Some(Right), Some(Up));

    assert_eq!(m.outcome(), Some(Outcome::Winner(AgentId::Bot)));
    assert!(m.human.is_defeated());
    assert!(!m.bot.is_defeated());
    // The survivor's move is not committed either.
    assert_eq!(m.bot.position, pos(4, 7));
    assert_eq!(m.grid.get(pos(4, 6)), Cell::Empty);
}

#[test]
fn both_faults_are_a_draw() {
    let mut m = new_match(10, 10, Start::new(9, 2, Right), Start::new(0, 7, Left));
    m.step_with(Some(Right), Some(Left));
    assert_eq!(m.outcome(), Some(Outcome::Draw));
}

#[test]
fn a_lone_mover_is_resolved_against_the_current_grid() {
    let mut m = new_match(10, 10, Start::new(2, 2, Right), Start::new(7, 7, Left));
    m.step_with(Some(Right), None);
    assert_eq!(m.human.position, pos(3, 2));
    assert_eq!(m.bot.position, pos(7, 7));
    assert_eq!(m.score(), 1);

    // The bot turns into the human's trail on its own step.
    occupy(&mut m, &[(7, 6)]);
    m.step_with(None, Some(Up));
    assert_eq!(m.outcome(), Some(Outcome::Winner(AgentId::Human)));
    assert!(m.bot.is_defeated());
    assert!(!m.human.is_defeated());
}

#[test]
fn buffered_reversal_is_discarded() {
    let mut m = new_match(10, 10, Start::new(2, 2, Right), Start::new(7, 7, Left));
    m.human.buffer_heading(Left);
    m.step(Ready {
        human: true,
        bot: false,
    });
    assert_eq!(m.human.heading(), Right);
    assert_eq!(m.human.position, pos(3, 2));
    assert_eq!(m.human.pending_heading, None);
}

#[test]
fn buffered_turn_is_consumed_once() {
    let mut m = new_match(10, 10, Start::new(2, 5, Right), Start::new(7, 7, Left));
    let human_only = Ready {
        human: true,
        bot: false,
    };
    m.human.buffer_heading(Down);
    m.human.buffer_heading(Up);
    m.step(human_only);
    assert_eq!(m.human.position, pos(2, 4));
    assert_eq!(m.human.pending_heading, None);

    m.step(human_only);
    assert_eq!(m.human.position, pos(2, 3));
    assert_eq!(m.human.heading(), Up);
}

#[test]
fn heading_waits_in_the_buffer_across_idle_frames() {
    let tuning = Tuning {
        base_steps_per_second: 10.0,
        ..Tuning::default()
    };
    let mut m = far_apart_match(tuning);
    let turn_right = Intent {
        heading: Some(Right),
        boost_held: false,
    };

    assert_eq!(m.advance(0.01, turn_right), 0);
    assert_eq!(m.human.pending_heading, Some(Right));
    assert_eq!(m.human.heading(), Up);

    assert_eq!(m.advance(0.095, Intent::default()), 1);
    assert_eq!(m.human.position, pos(11, 60));
    assert_eq!(m.human.heading(), Right);
    assert_eq!(m.human.pending_heading, None);
}

#[test]
fn ending_step_leaves_headings_untouched() {
    let mut m = new_match(10, 10, Start::new(9, 2, Down), Start::new(4, 7, Left));
    m.step_with(Some(Right), Some(Up));

    assert_eq!(m.outcome(), Some(Outcome::Winner(AgentId::Bot)));
    assert_eq!(m.human.heading(), Down);
    assert_eq!(m.bot.heading(), Left);
    assert_eq!(m.bot.position, pos(4, 7));
}

#[test]
fn joint_step_moves_both_and_scores_once() {
    let mut m = new_match(10, 10, Start::new(1, 8, Up), Start::new(8, 1, Down));
    m.step(BOTH);
    assert_eq!(m.human.position, pos(1, 7));
    assert_eq!(m.bot.position.manhattan(pos(8, 1)), 1);
    assert_eq!(m.score(), 1);
    assert_eq!(m.grid.occupied_count(), 4);
}

#[test]
fn bot_takes_the_only_safe_heading() {
    let mut m = new_match(10, 10, Start::new(9, 0, Down), Start::new(5, 5, Right));
    occupy(&mut m, &[(6, 5), (5, 4)]);
    assert_eq!(bot::choose_heading(&m.grid, &m.bot, m.human.position), Down);
}

#[test]
fn bot_pursues_with_stable_tie_break() {
    let mut m = new_match(10, 10, Start::new(9, 1, Down), Start::new(5, 5, Up));
    // Right and Up both close the distance to 7; Right comes first.
    assert_eq!(bot::choose_heading(&m.grid, &m.bot, m.human.position), Right);

    m.step(Ready {
        human: false,
        bot: true,
    });
    assert_eq!(m.bot.position, pos(6, 5));
}

#[test]
fn bot_steers_away_from_blocked_lanes() {
    let mut m = new_match(10, 10, Start::new(9, 5, Up), Start::new(5, 5, Right));
    occupy(&mut m, &[(7, 4), (7, 5), (7, 6)]);
    // Right is closest but two of its lookahead cells are blocked.
    assert_eq!(bot::choose_heading(&m.grid, &m.bot, m.human.position), Down);
}

#[test]
fn bot_counts_walls_ahead_as_danger() {
    let m = new_match(10, 10, Start::new(0, 9, Up), Start::new(7, 5, Up));
    // Right runs out of grid two cells ahead: -12 - 4 * 2 loses to Left's -10.
    assert_eq!(bot::choose_heading(&m.grid, &m.bot, m.human.position), Left);
}

#[test]
fn cornered_bot_still_picks_a_heading() {
    let mut m = new_match(10, 10, Start::new(5, 5, Up), Start::new(0, 0, Up));
    occupy(&mut m, &[(1, 0)]);
    let heading = bot::choose_heading(&m.grid, &m.bot, m.human.position);
    assert_eq!(heading, Right);

    m.step(Ready {
        human: false,
        bot: true,
    });
    assert_eq!(m.outcome(), Some(Outcome::Winner(AgentId::Human)));
}

fn far_apart_match(tuning: Tuning) -> Match {
    let mut arena = open_arena(100, 100, Start::new(10, 60, Up), Start::new(90, 5, Down));
    arena.tuning = tuning;
    Match::new(&arena)
}

#[test]
fn frame_time_becomes_whole_steps_with_carry() {
    let tuning = Tuning {
        base_steps_per_second: 10.0,
        max_frame_seconds: 1.0,
        ..Tuning::default()
    };
    let mut m = far_apart_match(tuning);

    assert_eq!(m.advance(0.55, Intent::default()), 5);
    assert_eq!(m.human.position, pos(10, 55));
    assert!((m.human.owed.owed() - 0.5).abs() < 1e-4);
    assert!((m.bot.owed.owed() - 0.5).abs() < 1e-4);
    assert_eq!(m.score(), 5);
}

#[test]
fn step_cap_bounds_work_per_frame() {
    let tuning = Tuning {
        base_steps_per_second: 10.0,
        max_frame_seconds: 1.0,
        max_steps_per_frame: 3,
        ..Tuning::default()
    };
    let mut m = far_apart_match(tuning);

    assert_eq!(m.advance(0.55, Intent::default()), 3);
    assert_eq!(m.human.position, pos(10, 57));
    assert!((m.human.owed.owed() - 2.5).abs() < 1e-4);
}

#[test]
fn faster_agent_steps_alone_in_extra_micro_steps() {
    let mut m = far_apart_match(Tuning::default());
    let intent = Intent {
        heading: None,
        boost_held: true,
    };
    // Human accrues 2.16 steps, the bot 1.2.
    assert_eq!(m.advance(0.1, intent), 2);
    assert_eq!(m.human.position, pos(10, 58));
    assert_eq!(m.bot.position.manhattan(pos(90, 5)), 1);
    assert_eq!(m.score(), 2);
}

#[test]
fn boost_increases_steps_over_an_interval() {
    let steps_after_one_second = |boost_held| {
        let mut m = far_apart_match(Tuning::default());
        let intent = Intent {
            heading: None,
            boost_held,
        };
        for _ in 0..60 {
            m.advance(1.0 / 60.0, intent);
        }
        assert!(!m.is_over());
        if boost_held {
            assert!(m.human.boost_level() > 0.0);
        }
        60 - m.human.position.y
    };

    assert!(steps_after_one_second(true) > steps_after_one_second(false));
}

#[test]
fn finished_match_is_frozen() {
    let mut m = new_match(4, 4, Start::new(3, 0, Right), Start::new(0, 3, Left));
    m.step_with(Some(Right), Some(Left));
    assert!(m.is_over());

    let before = m.snapshot();
    let occupied = m.grid.occupied_count();
    let intent = Intent {
        heading: Some(Down),
        boost_held: true,
    };
    assert_eq!(m.advance(1.0, intent), 0);
    m.step_with(Some(Down), Some(Up));

    assert_eq!(m.snapshot(), before);
    assert_eq!(m.grid.occupied_count(), occupied);
    assert_eq!(m.human.pending_heading, None);
}

#[test]
fn duel_caps_stalled_frames() {
    let arena = open_arena(100, 100, Start::new(10, 60, Up), Start::new(90, 5, Down));
    let mut duel = Duel::new(&arena);

    assert_eq!(duel.frame(5.0, Intent::default()), 0);
    // A 30 second stall only simulates max_frame_seconds (0.25 s at 12 steps/s).
    assert_eq!(duel.frame(35.0, Intent::default()), 3);
    assert_eq!(duel.current().agent(AgentId::Human).position(), pos(10, 57));
}

#[test]
fn teardown_halts_the_duel() {
    let arena = open_arena(100, 100, Start::new(10, 60, Up), Start::new(90, 5, Down));
    let mut duel = Duel::new(&arena);
    duel.frame(0.0, Intent::default());
    duel.frame(0.2, Intent::default());
    let before = duel.snapshot();

    duel.teardown();
    assert!(duel.halted);
    assert_eq!(duel.frame(0.4, Intent::default()), 0);
    duel.restart();
    assert_eq!(duel.snapshot(), before);
}

#[test]
fn restart_mounts_a_fresh_match() {
    let arena = open_arena(6, 6, Start::new(5, 0, Right), Start::new(0, 5, Left));
    let mut duel = Duel::new(&arena);
    duel.frame(0.0, Intent::default());
    duel.frame(0.2, Intent::default());
    assert!(duel.current().is_over());

    duel.restart();
    assert!(!duel.current().is_over());
    assert_eq!(duel.current().score(), 0);
    assert_eq!(duel.current().grid().occupied_count(), 2);
    // The clock restarts too, so the first frame after a restart simulates nothing.
    assert_eq!(duel.frame(100.0, Intent::default()), 0);
}

#[test]
fn snapshot_serializes_for_display() {
    let mut m = new_match(10, 10, Start::new(9, 2, Right), Start::new(4, 7, Up));
    m.step_with(Some(Right), Some(Up));
    let snapshot = m.snapshot();
    assert!(snapshot.human_defeated && !snapshot.bot_defeated);
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.boost, 1.0);

    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains(r#""outcome":{"Winner":"Bot"}"#), "{json}");
    assert!(json.contains(r#""arena":"test""#), "{json}");
}

#[test]
fn random_play_keeps_trails_and_headings_consistent() {
    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut m = new_match(16, 12, Start::new(3, 6, Right), Start::new(12, 5, Left));
        let mut trails: Vec<(Position, Cell)> = Vec::new();

        for _ in 0..5000 {
            if m.is_over() {
                break;
            }
            let headings = (m.human.heading, m.bot.heading);
            let score = m.score();
            let intent = Intent {
                heading: rng
                    .gen_bool(0.3)
                    .then(|| Direction::ALL[rng.gen_range(0..4)]),
                boost_held: rng.gen_bool(0.5),
            };
            // Small frames: at most one micro-step each, so headings can be
            // compared step to step.
            let steps = m.advance(rng.gen_range(0.0..0.04), intent);
            assert!(steps <= 1);

            assert!(!m.human.heading.is_reverse_of(headings.0), "seed {seed}");
            assert!(!m.bot.heading.is_reverse_of(headings.1), "seed {seed}");
            assert!(m.score() >= score);
            for &(cell_pos, cell) in &trails {
                assert_eq!(m.grid.get(cell_pos), cell, "seed {seed}");
            }
            trails = m
                .grid
                .entries()
                .filter(|&(_, cell)| cell != Cell::Empty)
                .collect();
        }
        assert!(m.is_over(), "seed {seed} never collided");
    }
}

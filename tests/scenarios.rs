use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use torus_snake::autopilot::auto_direction;
use torus_snake::body::Body;
use torus_snake::geometry::Direction::{self, *};
use torus_snake::shape::{ShapeClass, ShapeCode};
use torus_snake::sim::{GameOverReason, SimulationState, Status, StepOutcome};
use torus_snake::Coords;

fn state(positions: &[Coords], direction: Direction, food: Coords) -> SimulationState {
    let body = Body::from_positions(positions, direction, 30).unwrap();
    SimulationState::from_parts(body, direction, food, 30).unwrap()
}

fn assert_no_overlap(state: &SimulationState) {
    let cells: HashSet<Coords> = state.body().positions().collect();
    assert_eq!(cells.len(), state.body().len(), "overlapping segments in {:?}", state.body());
}

#[test]
fn eating_food_in_front_of_the_head() {
    let mut st = state(&[(15, 15), (14, 15), (13, 15)], Right, (16, 15));
    let mut rng = StdRng::seed_from_u64(1);

    let outcome = st.step(&mut rng);

    assert!(matches!(outcome, StepOutcome::Moved { ate_food: true, .. }));
    assert_eq!(st.body().head().pos, (16, 15));
    assert_eq!(st.score(), 1);
    assert_eq!(st.body().len(), 4);
    let food = st.food().unwrap();
    assert_ne!(food, (16, 15));
    assert!(!st.body().contains(food));
}

#[test]
fn wrapping_onto_own_body_is_fatal() {
    let mut st = state(&[(0, 15), (29, 15), (28, 15)], Left, (5, 5));
    let mut rng = StdRng::seed_from_u64(2);

    assert_eq!(st.step(&mut rng), StepOutcome::Crashed { at: (29, 15) });
    assert!(!st.snapshot().alive);
    assert_eq!(st.status(), Status::GameOver(GameOverReason::SelfCollision));
}

#[test]
fn straight_run_keeps_straight_middle() {
    for dir in Direction::ALL.iter().copied() {
        let body = Body::new((10, 10), 3, dir, 30);
        let mut st = SimulationState::from_parts(body, dir, (0, 29), 30).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..5 {
            st.step(&mut rng);
            let middle = st.body().get(1).unwrap().shape;
            assert_eq!(middle, ShapeCode::new(ShapeClass::Straight, dir.orientation()));
            assert_eq!(st.body().tail().shape, ShapeCode::new(ShapeClass::Tail, dir.orientation()));
        }
    }
}

#[test]
fn stepping_off_each_edge_wraps() {
    let cases = [
        ((29, 4), Right, (0, 4)),
        ((0, 4), Left, (29, 4)),
        ((4, 29), Down, (4, 0)),
        ((4, 0), Up, (4, 29)),
    ];
    for (head, dir, expected) in cases.iter().copied() {
        let body = Body::new(head, 3, dir, 30);
        let mut st = SimulationState::from_parts(body, dir, (15, 15), 30).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        st.step(&mut rng);
        assert_eq!(st.body().head().pos, expected);
        assert!(st.is_alive());
    }
}

#[test]
fn reversal_requests_never_change_heading() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut st = SimulationState::new(30, &mut rng).unwrap();

    for dir in [Down, Left, Up, Right].iter().copied() {
        st.request_direction(dir);
        st.step(&mut rng);
        let current = st.direction();
        st.request_direction(current.opposite());
        st.step(&mut rng);
        assert_eq!(st.direction(), current);
    }
}

#[test]
fn autopilot_runs_keep_invariants() {
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut st = SimulationState::new(12, &mut rng).unwrap();

        for _ in 0..2_000 {
            let before = st.body().len();
            st.request_direction(auto_direction(&st));

            match st.step(&mut rng) {
                StepOutcome::Moved { ate_food, .. } => {
                    let expected = if ate_food { before + 1 } else { before };
                    assert_eq!(st.body().len(), expected);
                    assert_no_overlap(&st);
                    let food = st.food().unwrap();
                    assert!(!st.body().contains(food));
                }
                StepOutcome::Crashed { .. } => {
                    assert_eq!(st.body().len(), before);
                    break;
                }
                StepOutcome::BoardFull => {
                    assert_eq!(st.body().len(), 144);
                    break;
                }
                StepOutcome::Halted => unreachable!("stepped a finished game"),
            }
        }

        assert_eq!(st.score() as usize, st.body().len() - 3);
    }
}

#[test]
fn interior_shapes_never_change() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut st = SimulationState::new(16, &mut rng).unwrap();
    let turns = [Down, Down, Left, Left, Up, Up, Left, Down, Right];

    for dir in turns.iter().copied() {
        let before: Vec<_> = st.body().segments().iter().copied().collect();
        st.request_direction(dir);
        if !matches!(st.step(&mut rng), StepOutcome::Moved { .. }) {
            break;
        }
        let after: Vec<_> = st.body().segments().iter().copied().collect();

        // old segments 1..len-1 sit at 2..; all but the tail keep their shapes
        for (old, new) in before.iter().skip(1).zip(after.iter().skip(2)) {
            if new.pos != st.body().tail().pos {
                assert_eq!(old, new);
            }
        }
    }
}

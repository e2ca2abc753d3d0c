use bld_core::{
    CornerSlot, CubeState, EdgeSlot, MoveInstance, MoveSequence,
    cube::{ALL_MOVES, Direction, Face},
};

const SEED: u64 = 0x00B1_D5C4;
const TRIALS: usize = 500;

fn random_sequence(rng: &mut fastrand::Rng) -> MoveSequence {
    let len = rng.usize(0..=30);
    MoveSequence::new(
        (0..len)
            .map(|_| ALL_MOVES[rng.usize(..ALL_MOVES.len())])
            .collect(),
    )
}

fn random_state(rng: &mut fastrand::Rng) -> CubeState {
    let mut state = CubeState::solved();
    state.apply_moves(&random_sequence(rng));
    state
}

fn is_permutation(perm: &[u8]) -> bool {
    let mut sorted = perm.to_vec();
    sorted.sort_unstable();
    sorted.iter().enumerate().all(|(i, &p)| usize::from(p) == i)
}

#[test_log::test]
fn moves_preserve_permutations_and_orientation_sums() {
    let mut rng = fastrand::Rng::with_seed(SEED);
    for _ in 0..TRIALS {
        let state = random_state(&mut rng);

        assert!(is_permutation(state.corner_permutation()));
        assert!(is_permutation(state.edge_permutation()));
        assert!(state.corner_orientation().iter().all(|&o| o < 3));
        assert!(state.edge_orientation().iter().all(|&o| o < 2));

        let twist: u32 = state.corner_orientation().iter().map(|&o| u32::from(o)).sum();
        let flip: u32 = state.edge_orientation().iter().map(|&o| u32::from(o)).sum();
        assert_eq!(twist % 3, 0, "{state:?}");
        assert_eq!(flip % 2, 0, "{state:?}");
    }
}

#[test_log::test]
fn move_then_inverse_restores_state() {
    let mut rng = fastrand::Rng::with_seed(SEED + 1);
    for _ in 0..TRIALS / 10 {
        let state = random_state(&mut rng);
        for m in ALL_MOVES {
            let mut moved = state.clone();
            moved.apply_move(m);
            moved.apply_move(m.invert());
            assert_eq!(moved, state, "{m} then {}", m.invert());
        }
    }
}

#[test_log::test]
fn four_quarter_turns_are_identity() {
    let mut rng = fastrand::Rng::with_seed(SEED + 2);
    for _ in 0..TRIALS / 10 {
        let state = random_state(&mut rng);
        for face in Face::ALL {
            let mut turned = state.clone();
            for _ in 0..4 {
                turned.apply_face_turn(face);
            }
            assert_eq!(turned, state);

            let mut inverse = state.clone();
            inverse.apply_move(MoveInstance::new(face, Direction::Prime));
            let mut three = state.clone();
            for _ in 0..3 {
                three.apply_face_turn(face);
            }
            assert_eq!(inverse, three);
        }
    }
}

#[test_log::test]
fn edge_and_corner_target_parities_agree() {
    let mut rng = fastrand::Rng::with_seed(SEED + 3);
    for _ in 0..TRIALS {
        let state = random_state(&mut rng);
        let edge_buffer = EdgeSlot::ALL[rng.usize(..EdgeSlot::ALL.len())];
        let corner_buffer = CornerSlot::ALL[rng.usize(..CornerSlot::ALL.len())];

        let m = state.compute_metrics(edge_buffer, corner_buffer).unwrap();
        assert_eq!(
            m.edge_targets % 2,
            m.corner_targets % 2,
            "{state:?} {edge_buffer} {corner_buffer}"
        );
        assert_eq!(m.has_parity, m.edge_targets % 2 == 1);
    }
}

#[test_log::test]
fn metrics_are_idempotent_and_non_destructive() {
    let mut rng = fastrand::Rng::with_seed(SEED + 4);
    for _ in 0..TRIALS / 5 {
        let state = random_state(&mut rng);
        let before = state.clone();
        let first = state.compute_metrics(EdgeSlot::UF, CornerSlot::UFR).unwrap();
        let second = state.compute_metrics(EdgeSlot::UF, CornerSlot::UFR).unwrap();
        assert_eq!(first, second);
        assert_eq!(state, before);
    }
}

#[test_log::test]
fn scrambled_then_unscrambled_has_no_work() {
    let mut rng = fastrand::Rng::with_seed(SEED + 5);
    for _ in 0..TRIALS / 10 {
        let seq = random_sequence(&mut rng);
        let mut state = CubeState::solved();
        state.apply_moves(&seq);
        state.apply_moves(&seq.invert());
        assert!(state.is_solved());

        let m = state.compute_metrics(EdgeSlot::DF, CornerSlot::DBL).unwrap();
        assert_eq!(m.algorithm_count, 0);
        assert!(!m.has_parity);
    }
}

#[test_log::test]
fn sexy_move_regression() {
    let mut state = CubeState::solved();
    state.apply_scramble("R U R' U'").unwrap();

    assert_eq!(state.corner_permutation(), &[1, 0, 5, 3, 4, 2, 6, 7]);
    assert_eq!(state.corner_orientation(), &[0, 2, 2, 0, 0, 2, 0, 0]);
    assert_eq!(
        state.edge_permutation(),
        &[0, 1, 3, 7, 4, 5, 6, 2, 8, 9, 10, 11]
    );
    assert_eq!(state.edge_orientation(), &[0; 12]);

    let m = state.compute_metrics(EdgeSlot::UF, CornerSlot::UFR).unwrap();
    assert_eq!(m.algorithm_count, 3);
    assert!(!m.has_parity);
    assert_eq!(m.flip_count, 0);
    assert_eq!(m.twist_count, 0);
    assert!(m.can_float_edges);
    assert!(!m.can_float_corners);
}

//! Property-based tests for move generation and the board.
//!
//! Positions come from playing random legal turns from the standard
//! layout, so the checks cover openings, hits, entering from the jail and
//! bearing off.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use backgammon::board::CHECKERS_PER_SIDE;
use backgammon::rules::is_complete;
use backgammon::{BoardMap, DiceRoll, MoveOptions, PlayerId, PointId, Variant};

/// Play `plies` random turns from the standard layout and return the
/// position with the side to move next.
fn random_position(seed: u64, plies: usize) -> (BoardMap, PlayerId) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = BoardMap::setup(Variant::Standard);
    let mut side = PlayerId::Player1;

    for _ in 0..plies {
        let mut dice = DiceRoll::roll(&mut rng);
        loop {
            let options = MoveOptions::generate(side, &board, &dice);
            if options.is_empty() {
                break;
            }
            let mv = options.moves()[rng.random_range(0..options.len())];
            board.apply(&mv).unwrap();
            dice.use_move(&mv).unwrap();
        }
        if is_complete(&board, side) {
            break;
        }
        side = side.opponent();
    }

    (board, side)
}

/// Strategy: a reachable position with the side to move.
fn position_strategy() -> impl Strategy<Value = (BoardMap, PlayerId)> {
    (any::<u64>(), 0..60usize).prop_map(|(seed, plies)| random_position(seed, plies))
}

/// Strategy: a fresh roll.
fn dice_strategy() -> impl Strategy<Value = DiceRoll> {
    (1..=6u8, 1..=6u8).prop_map(|(a, b)| DiceRoll::new(a, b))
}

proptest! {
    // 1. No generated move lands on a point the mover cannot occupy
    #[test]
    fn moves_never_land_on_blocks((board, side) in position_strategy(), dice in dice_strategy()) {
        let options = MoveOptions::generate(side, &board, &dice);
        for mv in &options {
            prop_assert!(!board.point(mv.end()).is_blocking(side), "{mv} lands on a block");
            prop_assert!(board.point(mv.start()).is_occupied_by(side), "{mv} starts from nothing");
            prop_assert!(dice.can_use(mv.die()));
        }
    }

    // 2. With two different faces the options either all keep the other
    //    die playable or none do
    #[test]
    fn both_dice_rule_partitions((board, side) in position_strategy(), dice in dice_strategy()) {
        prop_assume!(!dice.is_double());
        let options = MoveOptions::generate(side, &board, &dice);

        let keeps_other: Vec<bool> = options
            .iter()
            .map(|mv| {
                let other = if mv.die() == dice.roll1() { dice.roll2() } else { dice.roll1() };
                let mut next_board = board.clone();
                let mut next_dice = dice;
                next_board.apply(mv).unwrap();
                next_dice.use_move(mv).unwrap();
                MoveOptions::generate(side, &next_board, &next_dice).can_move_with(other)
            })
            .collect();

        if keeps_other.iter().any(|&k| k) {
            prop_assert!(keeps_other.iter().all(|&k| k), "die-only move offered beside a both-dice move");
        } else {
            // Only one die can be played: the larger one when it can
            let larger = dice.roll1().max(dice.roll2());
            if options.can_move_with(larger) {
                prop_assert!(options.iter().all(|mv| mv.die() == larger));
            }
        }
    }

    // 3. apply followed by revert restores the exact board
    #[test]
    fn apply_revert_round_trip((board, side) in position_strategy(), dice in dice_strategy()) {
        for mv in &MoveOptions::generate(side, &board, &dice) {
            let mut next = board.clone();
            next.apply(mv).unwrap();
            prop_assert_ne!(&next, &board);
            next.revert(mv).unwrap();
            prop_assert_eq!(&next, &board);
        }
    }

    // 4. Pip count drops by the die, or by the checker's own distance on a bear-off
    #[test]
    fn pip_count_drops_by_distance((board, side) in position_strategy(), dice in dice_strategy()) {
        let before = board.pip_count(side);
        for mv in &MoveOptions::generate(side, &board, &dice) {
            let mut next = board.clone();
            next.apply(mv).unwrap();
            let drop = before - next.pip_count(side);

            if mv.is_bear_off() {
                let distance = board.point(mv.start()).pip(side) / u32::from(board.point(mv.start()).count());
                prop_assert_eq!(drop, distance);
                prop_assert!(distance <= u32::from(mv.die()));
            } else {
                prop_assert_eq!(drop, u32::from(mv.die()), "{}", mv);
            }
        }
    }

    // 5. Vulnerability is a multiple of 1/36 for blots and zero elsewhere
    #[test]
    fn vulnerability_in_thirty_sixths((board, _) in position_strategy()) {
        for id in PointId::ALL {
            let rolls = board.hitting_rolls(id);
            prop_assert!(rolls <= 36);
            prop_assert_eq!(board.vulnerability(id), f32::from(rolls) / 36.0);
            if board.point(id).count() != 1 || !id.is_track() {
                prop_assert_eq!(rolls, 0, "{:?} is not a blot", id);
            }
        }
    }

    // 6. Checkers are never created or lost
    #[test]
    fn checkers_are_conserved((board, side) in position_strategy(), dice in dice_strategy()) {
        let total = u32::from(CHECKERS_PER_SIDE);
        prop_assert_eq!(board.checker_count(PlayerId::Player1), total);
        prop_assert_eq!(board.checker_count(PlayerId::Player2), total);

        for mv in &MoveOptions::generate(side, &board, &dice) {
            let mut next = board.clone();
            next.apply(mv).unwrap();
            prop_assert_eq!(next.checker_count(PlayerId::Player1), total);
            prop_assert_eq!(next.checker_count(PlayerId::Player2), total);
        }
    }
}

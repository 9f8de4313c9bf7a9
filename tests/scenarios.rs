//! End-to-end scenarios through the public API.

use rand::rngs::StdRng;
use rand::SeedableRng;

use backgammon::game::PlayMode;
use backgammon::rules::is_complete;
use backgammon::{
    AiPlayer, BoardMap, DiceRoll, GameConfig, MoveOptions, PlayerId, PointId, RuleError, Session,
};

fn board_with(layout: &[(PointId, PlayerId, u8)]) -> BoardMap {
    BoardMap::from_occupancy(layout.iter().copied()).unwrap()
}

fn hotseat() -> GameConfig {
    GameConfig {
        ai_side: PlayerId::None,
        ..GameConfig::default()
    }
}

#[test]
fn hit_on_a_lone_checker() {
    let board = board_with(&[
        (PointId::Point5, PlayerId::Player1, 1),
        (PointId::Point1, PlayerId::Player2, 1),
        (PointId::Point2, PlayerId::Player2, 1),
    ]);
    let options = MoveOptions::generate(PlayerId::Player1, &board, &DiceRoll::new(4, 1));

    let hit = options.find_move(PointId::Point5, PointId::Point1).unwrap();
    assert_eq!(hit.die(), 4);
    assert!(hit.is_hit());

    let mut after = board.clone();
    after.apply(&hit).unwrap();
    assert_eq!(after.point(PointId::JailP2).count(), 1);
    assert_eq!(after.point(PointId::Point1).side(), PlayerId::Player1);
}

#[test]
fn bear_off_uses_the_farthest_checker_first() {
    let mut board = board_with(&[
        (PointId::Point3, PlayerId::Player1, 1),
        (PointId::Point5, PlayerId::Player1, 1),
        (PointId::HomeP1, PlayerId::Player1, 13),
    ]);
    let mut dice = DiceRoll::new(6, 6);

    let options = MoveOptions::generate(PlayerId::Player1, &board, &dice);
    assert_eq!(options.len(), 1);
    let first = options.moves()[0];
    assert_eq!((first.start(), first.end()), (PointId::Point5, PointId::HomeP1));
    assert!(first.is_bear_off());

    board.apply(&first).unwrap();
    dice.use_move(&first).unwrap();

    // The slot-3 checker is now the farthest and may use the 6
    let options = MoveOptions::generate(PlayerId::Player1, &board, &dice);
    assert!(options.has_move(PointId::Point3, PointId::HomeP1));
}

#[test]
fn doubles_give_four_moves() {
    let mut dice = DiceRoll::new(3, 3);
    assert_eq!(dice.total(3), 4);
    assert_eq!(dice.remaining(3), 4);
    for face in [1, 2, 4, 5, 6] {
        assert_eq!(dice.remaining(face), 0);
    }

    for _ in 0..3 {
        dice.use_face(3).unwrap();
    }
    assert!(dice.can_use(3));
    dice.use_face(3).unwrap();
    assert!(!dice.can_use(3));
    assert_eq!(dice.use_face(3), Err(RuleError::DieUnavailable(3)));
}

#[test]
fn ai_finds_the_only_safe_sequence() {
    let board = board_with(&[
        (PointId::Point12, PlayerId::Player1, 1),
        (PointId::Point14, PlayerId::Player1, 1),
        (PointId::HomeP1, PlayerId::Player1, 13),
        (PointId::Point4, PlayerId::Player2, 2),
        (PointId::HomeP2, PlayerId::Player2, 13),
    ]);
    let dice = DiceRoll::new(5, 3);
    let options = MoveOptions::generate(PlayerId::Player1, &board, &dice);

    let moves = AiPlayer::new().select_move_sequence(&board, &options, &dice);
    let mut played: Vec<(PointId, PointId)> = moves.iter().map(|m| (m.start(), m.end())).collect();
    played.sort();
    assert_eq!(
        played,
        vec![
            (PointId::Point12, PointId::Point9),
            (PointId::Point14, PointId::Point9),
        ]
    );

    let mut after = board.clone();
    for mv in &moves {
        after.apply(mv).unwrap();
    }
    assert_eq!(after.point(PointId::Point9).count(), 2);
    assert!(after.track().iter().all(|p| !(p.is_occupied_by(PlayerId::Player1) && p.is_vulnerable())));
}

#[test]
fn relayed_turn_is_replayed() {
    let mut session = Session::new(hotseat());
    assert_eq!(session.open_with(DiceRoll::new(3, 1)), Ok(Some(PlayerId::Player1)));

    // Unreachable second pair rejects the whole list
    let bad = [
        (PointId::Point8, PointId::Point5),
        (PointId::Point8, PointId::Point5),
    ];
    assert!(session.apply_relayed(&bad).is_err());
    assert!(session.turn().unwrap().moves_made().is_empty());

    let good = [
        (PointId::Point8, PointId::Point5),
        (PointId::Point6, PointId::Point5),
    ];
    session.apply_relayed(&good).unwrap();
    assert_eq!(session.turn().unwrap().relay(), good.to_vec());
    session.end_turn().unwrap();

    assert_eq!(session.current(), PlayerId::Player2);
    assert_eq!(session.board().point(PointId::Point5).count(), 2);
}

#[test]
fn ai_plays_a_money_game_to_the_end() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut session = Session::new(GameConfig {
        play_mode: PlayMode::Money,
        ..hotseat()
    });
    session.roll_opening(&mut rng).unwrap();
    let ai = AiPlayer::new();

    for _ in 0..2000 {
        if session.result().is_some() {
            break;
        }
        if session.turn().is_none() {
            if session.skip_if_blocked_off() {
                continue;
            }
            session.roll(&mut rng).unwrap();
        }

        let turn = session.turn().unwrap();
        let moves = ai.select_move_sequence(session.board(), turn.options(), turn.dice());
        for mv in moves {
            session.play_move(mv).unwrap();
            if session.result().is_some() {
                break;
            }
        }
        if session.result().is_none() {
            session.end_turn().unwrap();
        }
    }

    let result = *session.result().expect("game should finish");
    assert!(is_complete(session.board(), result.winner));
    assert!((1..=3).contains(&result.points));
    assert_eq!(session.score(result.winner), result.points);
    assert_eq!(session.match_winner(), Some(result.winner));
    assert_eq!(session.next_game(), Err(RuleError::GameOver));
}

use cube_shooter::compute::{new_ball, new_player};
use cube_shooter::entities::*;
use glam::Vec3;

#[test]
fn entity_clone_and_eq() {
    assert_eq!(BallKind::Player, BallKind::Player);
    assert_ne!(BallKind::Player, BallKind::Bounced);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);

    let ball = new_ball(BallKind::Enemy, Vec3::ONE, Vec3::X);
    assert_eq!(ball.clone(), ball);
}

#[test]
fn darker_halves_each_channel() {
    assert_eq!(Rgb(90, 171, 50).darker(), Rgb(45, 85, 25));
    assert_eq!(Rgb::BLACK.darker(), Rgb::BLACK);
}

#[test]
fn lighter_saturates_at_255() {
    assert_eq!(Rgb::RED.lighter(), Rgb(255, 50, 50));
    assert_eq!(Rgb::LIGHT_GREEN.lighter(), Rgb(150, 255, 150));
    assert_eq!(Rgb(220, 10, 0).lighter(), Rgb(255, 60, 50));
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: new_player(),
        enemies: Vec::new(),
        player_balls: Vec::new(),
        enemy_balls: Vec::new(),
        bounced_balls: Vec::new(),
        wave: 1,
        status: GameStatus::Playing,
        frame: 0,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.position.x = 99.0;
    cloned.player.score = 999;
    cloned
        .player_balls
        .push(new_ball(BallKind::Player, Vec3::ZERO, Vec3::NEG_Z));

    assert_eq!(original.player.position, Vec3::ZERO);
    assert_eq!(original.player.score, 0);
    assert!(original.player_balls.is_empty());
}

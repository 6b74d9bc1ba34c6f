use crate::{Ball, Config, Events, Paddle, Side};
use hecs::World;

/// Whether the ball touches a paddle's face this tick.
///
/// Only a horizontal threshold plus the paddle's vertical band is tested, so
/// the check keeps firing while the ball overlaps the band.
pub fn paddle_contact(ball: &Ball, paddle: &Paddle, config: &Config) -> bool {
    let reaches = match paddle.side {
        Side::Left => ball.pos.x - ball.radius <= paddle.x + config.paddle_width,
        Side::Right => ball.pos.x + ball.radius >= paddle.x,
    };
    reaches && paddle.covers(ball.pos.y, config)
}

/// Check ball collisions with paddles
pub fn check_paddle_collisions(world: &mut World, config: &Config, events: &mut Events) {
    // First, copy the ball out so paddles can be borrowed mutably
    let ball_data = world
        .query_mut::<&Ball>()
        .into_iter()
        .next()
        .map(|(e, ball)| (e, *ball));

    let (ball_entity, mut ball) = match ball_data {
        Some(data) => data,
        None => return, // No ball in world
    };

    // Deterministic: left paddle resolves before right
    let mut paddles: Vec<(Side, hecs::Entity)> = world
        .query::<&Paddle>()
        .iter()
        .map(|(e, p)| (p.side, e))
        .collect();
    paddles.sort_by_key(|(side, _)| side.index());

    for (side, entity) in paddles {
        let Ok(mut paddle) = world.get::<&mut Paddle>(entity) else {
            continue;
        };
        if !paddle_contact(&ball, &paddle, config) {
            continue;
        }

        // Away from the paddle that was hit
        let dir_x = match side {
            Side::Left => 1.0,
            Side::Right => -1.0,
        };
        ball.send_towards(dir_x);
        paddle.hits += 1;

        match side {
            Side::Left => events.left_hit = true,
            Side::Right => events.right_hit = true,
        }
    }

    if let Ok(mut stored) = world.get::<&mut Ball>(ball_entity) {
        *stored = ball;
    }
}

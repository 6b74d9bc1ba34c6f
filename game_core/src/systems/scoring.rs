use crate::{Ball, Config, Events, GameRng, Paddle, Score, Side};
use hecs::World;

/// Flag the hit cutoff once either paddle has returned the ball enough times.
/// Returns true when the cutoff was reached.
pub fn check_hit_cutoff(world: &mut World, config: &Config, events: &mut Events) -> bool {
    let reached = world
        .query_mut::<&Paddle>()
        .into_iter()
        .any(|(_e, paddle)| paddle.hits >= config.hit_cutoff);
    if reached {
        events.hit_cutoff = true;
    }
    reached
}

/// Check if ball reached a side wall (scoring)
pub fn check_scoring(
    world: &mut World,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let scorer = if ball.pos.x - ball.radius <= 0.0 {
            Side::Right
        } else if ball.pos.x + ball.radius >= config.field_width {
            Side::Left
        } else {
            continue;
        };

        score.increment(scorer);
        match scorer {
            Side::Left => events.left_scored = true,
            Side::Right => events.right_scored = true,
        }

        ball.reset(config, rng);
    }
}

use crate::{Ball, Config, Decision, Events, Paddle};
use hecs::World;

/// Apply paddle movement based on this tick's decisions
pub fn move_paddles(world: &mut World, decisions: &[Decision; 2], config: &Config) {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        let decision = decisions[paddle.side.index()];
        paddle.move_by(decision.delta(config.paddle_speed), config);
    }
}

/// Move ball by its velocity and bounce it off the top/bottom walls
pub fn move_ball(world: &mut World, config: &Config, events: &mut Events) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if ball.update(config.field_height) {
            events.ball_hit_wall = true;
        }
    }
}

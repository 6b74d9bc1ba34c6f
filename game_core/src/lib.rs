pub mod components;
pub mod config;
pub mod controller;
pub mod frontend;
pub mod fsm;
pub mod game;
pub mod params;
pub mod policy;
pub mod resources;
pub mod systems;
pub mod tournament;

pub use components::*;
pub use config::*;
pub use controller::*;
pub use frontend::*;
pub use fsm::*;
pub use game::*;
pub use params::*;
pub use policy::*;
pub use resources::*;
pub use tournament::*;

use hecs::World;
use systems::*;

/// Run one deterministic Pong tick
pub fn step(
    world: &mut World,
    config: &Config,
    decisions: &[Decision; 2],
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
    mode: MatchMode,
) {
    // 1. Move paddles based on decisions
    move_paddles(world, decisions, config);

    // 2. Move ball (wall bounces included)
    move_ball(world, config, events);

    // 3. Check collisions (ball vs paddles)
    check_paddle_collisions(world, config, events);

    // 4. Enough rallies to rank both policies; skip scoring this tick
    if mode == MatchMode::Training && check_hit_cutoff(world, config, events) {
        return;
    }

    // 5. Check scoring (ball reached a side wall)
    check_scoring(world, config, score, events, rng);
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, side: Side, config: &Config) -> hecs::Entity {
    world.spawn((Paddle::new(side, config),))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, ball: Ball) -> hecs::Entity {
    world.spawn((ball,))
}

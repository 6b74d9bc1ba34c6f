use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{Config, GameRng};

/// Which end of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Position in per-side arrays
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Paddle component - represents a player's paddle
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub x: f32, // Left edge, fixed per side
    pub y: f32, // Top edge (clamped to field)
    pub hits: u32,
}

impl Paddle {
    /// Paddle at its side's x, vertically centred
    pub fn new(side: Side, config: &Config) -> Self {
        Self {
            side,
            x: config.paddle_x(side),
            y: config.paddle_spawn_y(),
            hits: 0,
        }
    }

    /// Shift vertically by `delta`, then clamp into the field
    pub fn move_by(&mut self, delta: f32, config: &Config) {
        self.y = config.clamp_paddle_y(self.y + delta);
    }

    /// Whether `y` lies within the paddle's vertical extent (inclusive)
    pub fn covers(&self, y: f32, config: &Config) -> bool {
        self.y <= y && y <= self.y + config.paddle_height
    }
}

/// Ball component - the pong ball
///
/// Velocity components only ever change sign after a launch; their magnitude
/// is fixed by `speed` until the next [`Ball::reset`].
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub speed: u32,
    pub dir_x: f32,
}

impl Ball {
    /// Ball moving at `speed` along `dir` (components are scaled, not normalised)
    pub fn new(pos: Vec2, radius: f32, speed: u32, dir: Vec2) -> Self {
        Self {
            pos,
            vel: dir * speed as f32,
            radius,
            speed,
            dir_x: dir.x,
        }
    }

    /// Initial launch at match start: the vertical component is a fraction of
    /// the speed so the first rally is shallower than later ones
    pub fn spawn(config: &Config, rng: &mut GameRng) -> Self {
        let speed = rng.speed(config.ball_speed_low, config.ball_speed_high);
        let dir = Vec2::new(rng.sign(), rng.sign() * config.ball_spawn_vertical_factor);
        Self::new(config.field_center(), config.ball_radius, speed, dir)
    }

    /// Recentre with a fresh speed and direction. Scores are untouched.
    pub fn reset(&mut self, config: &Config, rng: &mut GameRng) {
        self.pos = config.field_center();
        self.speed = rng.speed(config.ball_speed_low, config.ball_speed_high);
        self.dir_x = rng.sign();
        let dir_y = rng.sign();
        self.vel = Vec2::new(self.dir_x, dir_y) * self.speed as f32;
    }

    /// Advance one tick and bounce off the top/bottom walls.
    /// Returns true when the vertical velocity was inverted.
    pub fn update(&mut self, field_height: f32) -> bool {
        self.pos += self.vel;

        if self.pos.y - self.radius <= 0.0 || self.pos.y + self.radius >= field_height {
            self.vel.y = -self.vel.y;
            return true;
        }
        false
    }

    /// Force horizontal travel direction; reasserting the current one is a no-op
    pub fn send_towards(&mut self, dir_x: f32) {
        self.dir_x = dir_x;
        self.vel.x = self.speed as f32 * dir_x;
    }
}

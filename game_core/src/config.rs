use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::Side;
use crate::params::Params;

/// How training fitness is shaped from match events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RewardShaping {
    /// Scorer gains `reward`, conceding side loses `penalty`
    PerPoint { reward: f32, penalty: f32 },
    /// Each paddle hit earns `reward` for the hitting side
    PerHit { reward: f32 },
    /// Events carry no reward
    None,
}

impl Default for RewardShaping {
    fn default() -> Self {
        RewardShaping::PerPoint {
            reward: Params::POINT_REWARD,
            penalty: Params::POINT_PENALTY,
        }
    }
}

/// Which values a policy sees each tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObservationKind {
    /// paddle y, ball y, horizontal distance to the ball
    #[default]
    Basic,
    /// `Basic` plus ball vx and vy
    Extended,
}

impl ObservationKind {
    /// Number of policy inputs for this layout
    pub fn input_len(self) -> usize {
        match self {
            ObservationKind::Basic => 3,
            ObservationKind::Extended => 5,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("field must be larger than zero, got {width}x{height}")]
    EmptyField { width: f32, height: f32 },
    #[error("paddle height {paddle} does not fit in field height {field}")]
    PaddleTooTall { paddle: f32, field: f32 },
    #[error("ball speed range {low}..={high} is empty or starts at zero")]
    BadSpeedRange { low: u32, high: u32 },
    #[error("hit cutoff must be at least 1")]
    ZeroHitCutoff,
    #[error("target fps must be at least 1")]
    ZeroFps,
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub field_width: f32,
    pub field_height: f32,
    pub target_fps: u32,
    pub ball_radius: f32,
    pub ball_speed_low: u32,
    pub ball_speed_high: u32,
    pub ball_spawn_vertical_factor: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_offset: f32,
    pub hit_cutoff: u32,
    pub reward: RewardShaping,
    pub idle_penalty: f32,
    pub observation: ObservationKind,
    /// Play mode ends once a side reaches this score; `None` plays forever
    pub win_score: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: Params::FIELD_WIDTH,
            field_height: Params::FIELD_HEIGHT,
            target_fps: Params::TARGET_FPS,
            ball_radius: Params::BALL_RADIUS,
            ball_speed_low: Params::BALL_SPEED_LOW,
            ball_speed_high: Params::BALL_SPEED_HIGH,
            ball_spawn_vertical_factor: Params::BALL_SPAWN_VERTICAL_FACTOR,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_speed: Params::PADDLE_SPEED,
            paddle_offset: Params::PADDLE_OFFSET,
            hit_cutoff: Params::HIT_CUTOFF,
            reward: RewardShaping::default(),
            idle_penalty: Params::IDLE_PENALTY,
            observation: ObservationKind::default(),
            win_score: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(ConfigError::EmptyField {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self.paddle_height > self.field_height {
            return Err(ConfigError::PaddleTooTall {
                paddle: self.paddle_height,
                field: self.field_height,
            });
        }
        if self.ball_speed_low == 0 || self.ball_speed_low > self.ball_speed_high {
            return Err(ConfigError::BadSpeedRange {
                low: self.ball_speed_low,
                high: self.ball_speed_high,
            });
        }
        if self.hit_cutoff == 0 {
            return Err(ConfigError::ZeroHitCutoff);
        }
        if self.target_fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        Ok(())
    }

    /// Get X position (left edge) for a paddle
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_offset,
            Side::Right => self.field_width - self.paddle_width - self.paddle_offset,
        }
    }

    /// Starting Y (top edge) that vertically centres a paddle
    pub fn paddle_spawn_y(&self) -> f32 {
        (self.field_height / 2.0).floor() - (self.paddle_height / 2.0).floor()
    }

    /// Clamp paddle Y (top edge) to field bounds
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.field_height - self.paddle_height)
    }

    /// Ball spawn and reset point
    pub fn field_center(&self) -> Vec2 {
        Vec2::new(
            (self.field_width / 2.0).floor(),
            (self.field_height / 2.0).floor(),
        )
    }
}

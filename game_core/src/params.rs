/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Field
    pub const FIELD_WIDTH: f32 = 700.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_SPEED: f32 = 8.0; // units per tick
    pub const PADDLE_OFFSET: f32 = 20.0; // gap between paddle and side wall

    // Ball
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED_LOW: u32 = 6;
    pub const BALL_SPEED_HIGH: u32 = 9; // inclusive
    pub const BALL_SPAWN_VERTICAL_FACTOR: f32 = 0.5;

    // Training
    pub const HIT_CUTOFF: u32 = 50;
    pub const POINT_REWARD: f32 = 2.0;
    pub const POINT_PENALTY: f32 = 1.0;
    pub const HIT_REWARD: f32 = 1.0;
    pub const IDLE_PENALTY: f32 = 0.01;

    // Pacing
    pub const TARGET_FPS: u32 = 60;
}

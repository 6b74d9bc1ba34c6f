//! Decision sources for paddles
//!
//! A match holds one [`Controller`] per side and asks both for a
//! [`Decision`] every tick. Human controllers read the key snapshot for the
//! tick, policy controllers read the [`Observation`], and neither keeps any
//! state between ticks.

use std::collections::HashSet;

use crate::{Ball, Config, ObservationKind, Paddle};

/// What a paddle does this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Decision {
    #[default]
    NoOp,
    Up,
    Down,
}

impl Decision {
    /// Policy output index -> decision (0 = no-op, 1 = up, 2 = down)
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => Decision::Up,
            2 => Decision::Down,
            _ => Decision::NoOp,
        }
    }

    /// Vertical movement direction: -1 = up, 0 = stop, 1 = down
    pub fn dir(self) -> i8 {
        match self {
            Decision::NoOp => 0,
            Decision::Up => -1,
            Decision::Down => 1,
        }
    }

    pub fn delta(self, paddle_speed: f32) -> f32 {
        self.dir() as f32 * paddle_speed
    }
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    ArrowUp,
    ArrowDown,
}

impl Key {
    /// Map a key name as reported by a keyboard event
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "w" | "W" => Some(Key::W),
            "s" | "S" => Some(Key::S),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            _ => None,
        }
    }
}

/// Snapshot of held keys, taken once per tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    pressed: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pressed(keys: &[Key]) -> Self {
        Self {
            pressed: keys.iter().copied().collect(),
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

/// What a policy sees about the game from one paddle's point of view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub paddle_y: f32,
    pub ball_y: f32,
    pub ball_dx: f32, // |paddle.x - ball.x|
    pub ball_vx: f32,
    pub ball_vy: f32,
}

impl Observation {
    pub fn new(paddle: &Paddle, ball: &Ball) -> Self {
        Self {
            paddle_y: paddle.y,
            ball_y: ball.pos.y,
            ball_dx: (paddle.x - ball.pos.x).abs(),
            ball_vx: ball.vel.x,
            ball_vy: ball.vel.y,
        }
    }

    /// Flatten into policy inputs for the configured layout
    pub fn to_inputs(&self, kind: ObservationKind) -> Vec<f32> {
        match kind {
            ObservationKind::Basic => vec![self.paddle_y, self.ball_y, self.ball_dx],
            ObservationKind::Extended => vec![
                self.paddle_y,
                self.ball_y,
                self.ball_dx,
                self.ball_vx,
                self.ball_vy,
            ],
        }
    }
}

/// A decision function supplied by the evolutionary search
pub trait Policy {
    fn activate(&self, inputs: &[f32]) -> Vec<f32>;
}

impl<P: Policy + ?Sized> Policy for &P {
    fn activate(&self, inputs: &[f32]) -> Vec<f32> {
        (**self).activate(inputs)
    }
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn activate(&self, inputs: &[f32]) -> Vec<f32> {
        (**self).activate(inputs)
    }
}

/// Index of the largest value; the first one wins ties
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Source of paddle decisions
pub trait Controller {
    fn decide(&self, observation: &Observation, keys: &KeyState) -> Decision;

    /// Whether fitness shaping applies to this side
    fn is_policy(&self) -> bool {
        false
    }
}

/// Keyboard-driven paddle
#[derive(Debug, Clone, Copy)]
pub struct HumanController {
    pub up_key: Key,
    pub down_key: Key,
}

impl HumanController {
    pub fn new(up_key: Key, down_key: Key) -> Self {
        Self { up_key, down_key }
    }

    /// W/S
    pub fn left() -> Self {
        Self::new(Key::W, Key::S)
    }

    /// Arrow keys
    pub fn right() -> Self {
        Self::new(Key::ArrowUp, Key::ArrowDown)
    }
}

impl Controller for HumanController {
    fn decide(&self, _observation: &Observation, keys: &KeyState) -> Decision {
        // Both held: -speed and +speed cancel before the clamp
        match (keys.is_pressed(self.up_key), keys.is_pressed(self.down_key)) {
            (true, false) => Decision::Up,
            (false, true) => Decision::Down,
            _ => Decision::NoOp,
        }
    }
}

/// Paddle driven by a policy's strongest output
pub struct PolicyController<P> {
    policy: P,
    kind: ObservationKind,
}

impl<P: Policy> PolicyController<P> {
    pub fn new(policy: P, kind: ObservationKind) -> Self {
        Self { policy, kind }
    }

    pub fn from_config(policy: P, config: &Config) -> Self {
        Self::new(policy, config.observation)
    }
}

impl<P: Policy> Controller for PolicyController<P> {
    fn decide(&self, observation: &Observation, _keys: &KeyState) -> Decision {
        let outputs = self.policy.activate(&observation.to_inputs(self.kind));
        let considered = &outputs[..outputs.len().min(3)];
        argmax(considered).map_or(Decision::NoOp, Decision::from_index)
    }

    fn is_policy(&self) -> bool {
        true
    }
}

/// Inert paddle, used when no trained policy is available
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpController;

impl Controller for NoOpController {
    fn decide(&self, _observation: &Observation, _keys: &KeyState) -> Decision {
        Decision::NoOp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Side;
    use glam::Vec2;

    struct Fixed(Vec<f32>);

    impl Policy for Fixed {
        fn activate(&self, _inputs: &[f32]) -> Vec<f32> {
            self.0.clone()
        }
    }

    /// Moves towards the ball using the first two inputs
    struct Tracker;

    impl Policy for Tracker {
        fn activate(&self, inputs: &[f32]) -> Vec<f32> {
            let (paddle_y, ball_y) = (inputs[0], inputs[1]);
            vec![0.0, paddle_y - ball_y, ball_y - paddle_y]
        }
    }

    fn observation() -> Observation {
        let config = Config::new();
        let paddle = Paddle::new(Side::Left, &config);
        let ball = Ball::new(Vec2::new(350.0, 100.0), 10.0, 6, Vec2::new(-1.0, 1.0));
        Observation::new(&paddle, &ball)
    }

    #[test]
    fn test_argmax_prefers_first_on_tie() {
        assert_eq!(argmax(&[0.5, 0.9, 0.9]), Some(1));
        assert_eq!(argmax(&[1.0, 1.0, 1.0]), Some(0));
        assert_eq!(argmax(&[-3.0, -1.0, -2.0]), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_observation_basic_layout() {
        let obs = observation();
        assert_eq!(obs.to_inputs(ObservationKind::Basic), vec![200.0, 100.0, 330.0]);
        assert_eq!(
            obs.to_inputs(ObservationKind::Extended),
            vec![200.0, 100.0, 330.0, -6.0, 6.0]
        );
    }

    #[test]
    fn test_human_reads_configured_keys() {
        let human = HumanController::left();
        let obs = observation();
        assert_eq!(human.decide(&obs, &KeyState::new()), Decision::NoOp);
        assert_eq!(human.decide(&obs, &KeyState::with_pressed(&[Key::W])), Decision::Up);
        assert_eq!(human.decide(&obs, &KeyState::with_pressed(&[Key::S])), Decision::Down);
        assert_eq!(
            human.decide(&obs, &KeyState::with_pressed(&[Key::ArrowUp])),
            Decision::NoOp,
            "other side's keys are ignored"
        );
        assert!(!human.is_policy());
    }

    #[test]
    fn test_human_both_keys_cancel() {
        let human = HumanController::right();
        let keys = KeyState::with_pressed(&[Key::ArrowUp, Key::ArrowDown]);
        assert_eq!(human.decide(&observation(), &keys).delta(8.0), 0.0);
    }

    #[test]
    fn test_policy_maps_argmax_to_decision() {
        let obs = observation();
        let up = PolicyController::new(Fixed(vec![0.1, 0.7, 0.2]), ObservationKind::Basic);
        let down = PolicyController::new(Fixed(vec![0.1, 0.2, 0.7]), ObservationKind::Basic);
        let idle = PolicyController::new(Fixed(vec![0.4, 0.4, 0.4]), ObservationKind::Basic);
        assert_eq!(up.decide(&obs, &KeyState::new()), Decision::Up);
        assert_eq!(down.decide(&obs, &KeyState::new()), Decision::Down);
        assert_eq!(idle.decide(&obs, &KeyState::new()), Decision::NoOp);
        assert!(up.is_policy());
    }

    #[test]
    fn test_policy_is_deterministic() {
        let controller = PolicyController::new(Tracker, ObservationKind::Basic);
        let obs = observation();
        let first = controller.decide(&obs, &KeyState::new());
        for _ in 0..10 {
            assert_eq!(controller.decide(&obs, &KeyState::new()), first);
        }
        assert_eq!(first, Decision::Up, "ball is above the paddle");
    }

    #[test]
    fn test_policy_with_short_output_falls_back_to_noop() {
        let controller = PolicyController::new(Fixed(vec![]), ObservationKind::Basic);
        assert_eq!(controller.decide(&observation(), &KeyState::new()), Decision::NoOp);
        let extra = PolicyController::new(Fixed(vec![0.0, 1.0, 0.0, 5.0]), ObservationKind::Basic);
        assert_eq!(extra.decide(&observation(), &KeyState::new()), Decision::Up);
    }

    #[test]
    fn test_key_from_name() {
        assert_eq!(Key::from_name("W"), Some(Key::W));
        assert_eq!(Key::from_name("ArrowDown"), Some(Key::ArrowDown));
        assert_eq!(Key::from_name("q"), None);
    }
}

use rand::Rng;

use crate::components::Side;

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,  // Left player score
    pub right: u32, // Right player score
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn has_winner(&self, win_score: u32) -> Option<Side> {
        if self.left >= win_score {
            Some(Side::Left)
        } else if self.right >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Seeded random number generator driving every ball launch
#[derive(Debug, Clone)]
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// +1.0 or -1.0 with equal probability
    pub fn sign(&mut self) -> f32 {
        if self.0.gen_bool(0.5) {
            1.0
        } else {
            -1.0
        }
    }

    /// Integer speed drawn uniformly from `low..=high`
    pub fn speed(&mut self, low: u32, high: u32) -> u32 {
        self.0.gen_range(low..=high)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    pub left_scored: bool,
    pub right_scored: bool,
    pub left_hit: bool,
    pub right_hit: bool,
    pub ball_hit_wall: bool,
    pub hit_cutoff: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Side that scored this tick, if any
    pub fn scorer(&self) -> Option<Side> {
        if self.left_scored {
            Some(Side::Left)
        } else if self.right_scored {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn hit(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_hit,
            Side::Right => self.right_hit,
        }
    }
}

/// Fitness change earned by each side's policy during a match
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FitnessDelta {
    pub left: f32,
    pub right: f32,
}

impl FitnessDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, side: Side, amount: f32) {
        match side {
            Side::Left => self.left += amount,
            Side::Right => self.right += amount,
        }
    }

    pub fn get(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

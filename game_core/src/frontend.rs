//! Boundaries to the outside world: drawing, input and frame pacing

use std::time::{Duration, Instant};

use glam::Vec2;

use crate::{KeyState, MatchMode, Score};

/// Paddle rectangle as drawn (top-left corner plus size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub tick: u64,
    pub mode: MatchMode,
    pub ball_pos: Vec2,
    pub ball_radius: f32,
    pub paddles: [PaddleRect; 2],
    pub score: Score,
    pub total_hits: u32,
}

impl FrameView {
    /// Overlay text: hit count while training, otherwise the two scores
    pub fn status_text(&self) -> String {
        match self.mode {
            MatchMode::Training => self.total_hits.to_string(),
            MatchMode::Play => format!("{}  {}", self.score.left, self.score.right),
        }
    }
}

/// Input sampled at the start of a tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub quit: bool,
    pub keys: KeyState,
}

impl FrameInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn quit() -> Self {
        Self {
            quit: true,
            keys: KeyState::new(),
        }
    }
}

/// Draws frames. Has no way to feed back into the simulation.
pub trait Renderer {
    fn render(&mut self, frame: &FrameView);
}

/// Produces one input snapshot per tick
pub trait InputSource {
    fn poll(&mut self) -> FrameInput;
}

/// Renderer that draws nothing (training runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &FrameView) {}
}

/// Input source that never presses anything and never quits
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self) -> FrameInput {
        FrameInput::idle()
    }
}

/// Holds ticks to a fixed rate by sleeping out the rest of each frame
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame: Duration,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            last: None,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Sleep until one frame has passed since the previous call
    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.frame {
                std::thread::sleep(self.frame - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

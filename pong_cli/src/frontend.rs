//! Headless renderer and input used by the command line front end

use game_core::{FrameInput, FrameView, InputSource, KeyState, Renderer, Score};

/// Writes a line to the log every `every` frames and whenever the score changes
pub struct LogRenderer {
    every: u64,
    last_score: Score,
    frames: u64,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            last_score: Score::new(),
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &FrameView) {
        self.frames += 1;
        let scored = frame.score != self.last_score;
        self.last_score = frame.score;

        if scored || frame.tick % self.every == 0 {
            log::info!(
                "tick {:>6} | {:>7} | ball ({:>5.1}, {:>5.1}) | paddles {:>5.1} {:>5.1}",
                frame.tick,
                frame.status_text(),
                frame.ball_pos.x,
                frame.ball_pos.y,
                frame.paddles[0].y,
                frame.paddles[1].y
            );
        }
    }
}

/// Holds the same keys every tick and quits once the tick budget is spent
pub struct ScriptedInput {
    keys: KeyState,
    remaining: u64,
}

impl ScriptedInput {
    pub fn new(keys: KeyState, budget: u64) -> Self {
        Self {
            keys,
            remaining: budget,
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> FrameInput {
        if self.remaining == 0 {
            return FrameInput::quit();
        }
        self.remaining -= 1;
        FrameInput {
            quit: false,
            keys: self.keys.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Key;

    #[test]
    fn test_scripted_input_quits_after_budget() {
        let mut input = ScriptedInput::new(KeyState::with_pressed(&[Key::W]), 2);

        let first = input.poll();
        assert!(!first.quit);
        assert!(first.keys.is_pressed(Key::W));
        assert!(!input.poll().quit);
        assert!(input.poll().quit);
        assert!(input.poll().quit);
    }

    #[test]
    fn test_zero_budget_quits_immediately() {
        let mut input = ScriptedInput::new(KeyState::new(), 0);
        assert_eq!(input.poll(), FrameInput::quit());
    }
}

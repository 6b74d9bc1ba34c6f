use hecs::{Entity, World};

use crate::frontend::{FrameClock, FrameInput, FrameView, InputSource, PaddleRect, Renderer};
use crate::fsm::{EndReason, MatchFsm, MatchState};
use crate::systems::shape_fitness;
use crate::{
    create_ball, create_paddle, step, Ball, Config, ConfigError, Controller, Decision, Events,
    FitnessDelta, GameRng, Observation, Paddle, Score, Side,
};

/// How a match is driven and when it stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Self-play evaluation: ends on the first point or the hit cutoff, never sleeps
    Training,
    /// Interactive play: paced to the target frame rate, ends on quit or the win score
    Play,
}

/// What happened during a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub events: Events,
    pub decisions: [Decision; 2],
    pub state: MatchState,
}

/// Summary handed back once a match is over
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub reason: Option<EndReason>,
    pub score: Score,
    pub hits: [u32; 2],
    pub ticks: u64,
    pub fitness: FitnessDelta,
}

/// One game between two paddles
///
/// Owns its world, RNG and controllers, so independent matches can run side
/// by side without sharing mutable state.
pub struct Match<'a> {
    world: World,
    config: &'a Config,
    mode: MatchMode,
    controllers: [Box<dyn Controller + 'a>; 2],
    ball: Entity,
    paddles: [Entity; 2],
    score: Score,
    events: Events,
    rng: GameRng,
    fsm: MatchFsm,
    fitness: FitnessDelta,
    tick: u64,
    max_ticks: Option<u64>,
}

impl<'a> Match<'a> {
    /// Set up a match, rejecting configurations the simulation cannot run with
    pub fn new(
        config: &'a Config,
        mode: MatchMode,
        left: Box<dyn Controller + 'a>,
        right: Box<dyn Controller + 'a>,
        mut rng: GameRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        let left_paddle = create_paddle(&mut world, Side::Left, config);
        let right_paddle = create_paddle(&mut world, Side::Right, config);
        let ball = create_ball(&mut world, Ball::spawn(config, &mut rng));

        Ok(Self {
            world,
            config,
            mode,
            controllers: [left, right],
            ball,
            paddles: [left_paddle, right_paddle],
            score: Score::new(),
            events: Events::new(),
            rng,
            fsm: MatchFsm::new(),
            fitness: FitnessDelta::new(),
            tick: 0,
            max_ticks: None,
        })
    }

    /// Stop after `max_ticks` ticks even if nothing else ended the match
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    pub fn state(&self) -> MatchState {
        self.fsm.state()
    }

    pub fn is_running(&self) -> bool {
        self.fsm.is_running()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn ball(&self) -> Ball {
        self.world
            .get::<&Ball>(self.ball)
            .map(|b| *b)
            .unwrap_or_else(|_| {
                // No ball in world: report a resting ball at the centre
                Ball::new(self.config.field_center(), self.config.ball_radius, 0, glam::Vec2::ZERO)
            })
    }

    pub fn paddle(&self, side: Side) -> Paddle {
        self.world
            .get::<&Paddle>(self.paddles[side.index()])
            .map(|p| *p)
            .unwrap_or_else(|_| Paddle::new(side, self.config))
    }

    /// Replace the ball's state (scripted scenarios, replays)
    pub fn place_ball(&mut self, ball: Ball) {
        if let Ok(mut stored) = self.world.get::<&mut Ball>(self.ball) {
            *stored = ball;
        }
    }

    /// Move a paddle to `y`, clamped into the field
    pub fn place_paddle(&mut self, side: Side, y: f32) {
        if let Ok(mut paddle) = self.world.get::<&mut Paddle>(self.paddles[side.index()]) {
            paddle.y = self.config.clamp_paddle_y(y);
        }
    }

    /// Advance the match by one tick. Ticking an ended match changes nothing.
    pub fn tick(&mut self, input: &FrameInput) -> TickOutcome {
        if !self.fsm.is_running() {
            return self.outcome([Decision::NoOp; 2]);
        }

        self.events.clear();

        if input.quit {
            self.fsm.end(EndReason::Quit);
            return self.outcome([Decision::NoOp; 2]);
        }

        let ball = self.ball();
        let decisions = Side::BOTH.map(|side| {
            let observation = Observation::new(&self.paddle(side), &ball);
            self.controllers[side.index()].decide(&observation, &input.keys)
        });

        step(
            &mut self.world,
            self.config,
            &decisions,
            &mut self.score,
            &mut self.events,
            &mut self.rng,
            self.mode,
        );
        self.tick += 1;

        if self.mode == MatchMode::Training {
            let shaped = [self.controllers[0].is_policy(), self.controllers[1].is_policy()];
            shape_fitness(&self.events, &decisions, shaped, self.config, &mut self.fitness);
        }

        if self.events.hit_cutoff {
            self.fsm.end(EndReason::HitCutoff);
        } else if let Some(scorer) = self.events.scorer() {
            let match_point = match self.mode {
                MatchMode::Training => true,
                MatchMode::Play => self
                    .config
                    .win_score
                    .is_some_and(|win| self.score.has_winner(win).is_some()),
            };
            if match_point {
                self.fsm.end(EndReason::Scored(scorer));
            }
        }
        if self.fsm.is_running() && self.max_ticks.is_some_and(|max| self.tick >= max) {
            self.fsm.end(EndReason::TickLimit);
        }

        self.outcome(decisions)
    }

    /// Drive the match to completion: poll, tick, render, and pace in play mode
    pub fn run(&mut self, input: &mut dyn InputSource, renderer: &mut dyn Renderer) -> MatchResult {
        let mut clock = FrameClock::new(self.config.target_fps);

        while self.fsm.is_running() {
            let frame_input = input.poll();
            self.tick(&frame_input);
            if self.fsm.end_reason() == Some(EndReason::Quit) {
                break;
            }

            renderer.render(&self.frame());

            if self.mode == MatchMode::Play {
                clock.wait();
            }
        }

        let result = self.result();
        log::debug!(
            "match ended after {} ticks: {:?}, score {}-{}, hits {:?}",
            result.ticks,
            result.reason,
            result.score.left,
            result.score.right,
            result.hits
        );
        result
    }

    pub fn result(&self) -> MatchResult {
        MatchResult {
            reason: self.fsm.end_reason(),
            score: self.score,
            hits: Side::BOTH.map(|side| self.paddle(side).hits),
            ticks: self.tick,
            fitness: self.fitness,
        }
    }

    /// Snapshot for the renderer
    pub fn frame(&self) -> FrameView {
        let ball = self.ball();
        let paddles = Side::BOTH.map(|side| {
            let paddle = self.paddle(side);
            PaddleRect {
                x: paddle.x,
                y: paddle.y,
                width: self.config.paddle_width,
                height: self.config.paddle_height,
            }
        });
        FrameView {
            tick: self.tick,
            mode: self.mode,
            ball_pos: ball.pos,
            ball_radius: ball.radius,
            paddles,
            score: self.score,
            total_hits: Side::BOTH.iter().map(|&side| self.paddle(side).hits).sum(),
        }
    }

    fn outcome(&self, decisions: [Decision; 2]) -> TickOutcome {
        TickOutcome {
            events: self.events.clone(),
            decisions,
            state: self.fsm.state(),
        }
    }
}

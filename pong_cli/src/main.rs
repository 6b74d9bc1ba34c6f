//! Pong command line front end
//!
//! `tournament` evaluates a seeded population for one generation and keeps
//! the best policy; `play` runs a paced match against a saved policy.

mod frontend;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use game_core::{
    evaluate_generation, Config, Controller, FeedForwardNet, GameRng, Genome, HumanController, Key,
    KeyState, Match, MatchMode, ObservationKind, Params, RewardShaping, TournamentConfig,
};

use frontend::{LogRenderer, ScriptedInput};

#[derive(Parser)]
#[command(name = "pong")]
#[command(about = "Deterministic Pong with self-play policy evaluation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one generation of random policies and save the fittest
    Tournament {
        /// Number of genomes in the population
        #[arg(long, default_value_t = 10)]
        population: usize,

        /// Hidden units per network
        #[arg(long, default_value_t = 6)]
        hidden: usize,

        /// Seed for network weights and match seeds
        #[arg(long, default_value_t = 12345)]
        seed: u64,

        /// Play independent matches in parallel
        #[arg(long, default_value = "false")]
        parallel: bool,

        /// Fitness shaping
        #[arg(long, value_enum, default_value_t = Reward::Point)]
        reward: Reward,

        /// Observation layout fed to the networks
        #[arg(long, value_enum, default_value_t = Inputs::Basic)]
        observation: Inputs,

        /// Stop any single match after this many ticks
        #[arg(long)]
        max_ticks: Option<u64>,

        /// Where to write the best policy
        #[arg(long, default_value = "best.policy")]
        out: PathBuf,
    },

    /// Play a paced match with a saved policy on the right paddle
    Play {
        /// Policy artifact for the right paddle
        #[arg(long, default_value = "best.policy")]
        policy: PathBuf,

        /// Policy artifact for the left paddle; keyboard-controlled when absent
        #[arg(long)]
        left_policy: Option<PathBuf>,

        /// Keys held down for the whole match (w, s, ArrowUp, ArrowDown)
        #[arg(long, value_parser = parse_key)]
        hold: Vec<Key>,

        /// Quit after this many ticks
        #[arg(long, default_value_t = 600)]
        ticks: u64,

        /// End the match once a side reaches this score
        #[arg(long)]
        win_score: Option<u32>,

        /// Observation layout the saved policies expect
        #[arg(long, value_enum, default_value_t = Inputs::Basic)]
        observation: Inputs,

        /// Seed for ball launches
        #[arg(long, default_value_t = 12345)]
        seed: u64,

        /// Log a frame every N ticks
        #[arg(long, default_value_t = 60)]
        log_every: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Reward {
    /// Reward the scorer, penalise the conceder
    Point,
    /// Reward every paddle hit
    Hit,
    /// No event rewards, idle penalty only
    Off,
}

impl From<Reward> for RewardShaping {
    fn from(reward: Reward) -> Self {
        match reward {
            Reward::Point => RewardShaping::default(),
            Reward::Hit => RewardShaping::PerHit {
                reward: Params::HIT_REWARD,
            },
            Reward::Off => RewardShaping::None,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Inputs {
    /// Paddle y, ball y, horizontal distance
    Basic,
    /// Basic plus ball velocity
    Extended,
}

impl From<Inputs> for ObservationKind {
    fn from(inputs: Inputs) -> Self {
        match inputs {
            Inputs::Basic => ObservationKind::Basic,
            Inputs::Extended => ObservationKind::Extended,
        }
    }
}

fn parse_key(name: &str) -> Result<Key, String> {
    Key::from_name(name).ok_or_else(|| format!("unknown key '{name}'"))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Tournament {
            population,
            hidden,
            seed,
            parallel,
            reward,
            observation,
            max_ticks,
            out,
        } => {
            let config = Config {
                reward: reward.into(),
                observation: observation.into(),
                ..Config::new()
            };
            anyhow::ensure!(population >= 2, "a tournament needs at least two genomes");

            let mut rng = GameRng::new(seed);
            let inputs = config.observation.input_len();
            let mut genomes: Vec<Genome<FeedForwardNet>> = (0..population)
                .map(|id| {
                    let net = FeedForwardNet::new_random(inputs, hidden, 3, &mut rng);
                    Genome::new(id as u64, net)
                })
                .collect();

            log::info!(
                "evaluating {} genomes ({} hidden units, seed {}, parallel {})",
                population,
                hidden,
                seed,
                parallel
            );
            let tournament = TournamentConfig {
                seed,
                parallel,
                max_ticks,
            };
            let report = evaluate_generation(&mut genomes, &config, &tournament)
                .context("invalid game configuration")?;

            for genome in &genomes {
                log::debug!("genome {:>3}: fitness {:?}", genome.id, genome.fitness);
            }

            let best = report
                .best
                .map(|index| &genomes[index])
                .context("population produced no best genome")?;
            policy_store::save_policy(&out, &best.policy)
                .with_context(|| format!("failed to save policy to {}", out.display()))?;

            println!(
                "best genome {} with fitness {:.2} after {} matches ({} ticks), saved to {}",
                best.id,
                best.fitness.unwrap_or(0.0),
                report.pairs.len(),
                report.total_ticks,
                out.display()
            );
        }

        Commands::Play {
            policy,
            left_policy,
            hold,
            ticks,
            win_score,
            observation,
            seed,
            log_every,
        } => {
            let config = Config {
                win_score,
                observation: observation.into(),
                ..Config::new()
            };
            let left: Box<dyn Controller> = match &left_policy {
                Some(path) => policy_store::load_controller(path, config.observation),
                None => Box::new(HumanController::left()),
            };
            let right = policy_store::load_controller(&policy, config.observation);

            let mut game = Match::new(&config, MatchMode::Play, left, right, GameRng::new(seed))
                .context("invalid game configuration")?;
            let mut input = ScriptedInput::new(KeyState::with_pressed(&hold), ticks);
            let mut renderer = LogRenderer::new(log_every);

            let result = game.run(&mut input, &mut renderer);

            println!(
                "final score {} - {} after {} ticks ({} frames drawn), ended by {:?}",
                result.score.left,
                result.score.right,
                result.ticks,
                renderer.frames(),
                result.reason
            );
        }
    }

    Ok(())
}

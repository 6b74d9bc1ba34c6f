//! Round-robin self-play evaluation
//!
//! Every unordered pair of genomes plays one training match per generation.
//! Matches only report fitness deltas; this module is the one place where a
//! genome's fitness accumulator is written.

use rayon::prelude::*;

use crate::{
    Config, ConfigError, GameRng, IdleInput, Match, MatchMode, MatchResult, NullRenderer, Policy,
    PolicyController,
};

/// A policy under evaluation together with its fitness accumulator
#[derive(Debug, Clone)]
pub struct Genome<P> {
    pub id: u64,
    pub policy: P,
    /// `None` until the first generation that evaluates this genome
    pub fitness: Option<f32>,
}

impl<P> Genome<P> {
    pub fn new(id: u64, policy: P) -> Self {
        Self {
            id,
            policy,
            fitness: None,
        }
    }
}

/// Knobs for one generation's evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentConfig {
    /// Base seed; each pair derives its own match seed from it
    pub seed: u64,
    /// Run independent matches on the rayon thread pool
    pub parallel: bool,
    /// Optional guard against matches that never end
    pub max_ticks: Option<u64>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            parallel: false,
            max_ticks: None,
        }
    }
}

/// Outcome of one pairing; `left` and `right` index into the population
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairResult {
    pub left: usize,
    pub right: usize,
    pub result: MatchResult,
}

/// Everything one generation produced
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub pairs: Vec<PairResult>,
    /// Index of the fittest genome (first one on ties)
    pub best: Option<usize>,
    pub total_ticks: u64,
}

/// All `(i, j)` with `i < j`, in lexicographic order
pub fn round_robin_pairs(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect()
}

/// Match seed for a pairing, stable across runs and thread counts
pub fn pair_seed(seed: u64, left: usize, right: usize) -> u64 {
    let pair = ((left as u64) << 32) | right as u64;
    seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ pair.wrapping_mul(0xBF58_476D_1CE4_E5B9)
}

/// Play one training match between two policies
pub fn play_pair<P: Policy>(
    config: &Config,
    tournament: &TournamentConfig,
    left: &P,
    right: &P,
    seed: u64,
) -> Result<MatchResult, ConfigError> {
    let mut game = Match::new(
        config,
        MatchMode::Training,
        Box::new(PolicyController::from_config(left, config)),
        Box::new(PolicyController::from_config(right, config)),
        GameRng::new(seed),
    )?;
    if let Some(max_ticks) = tournament.max_ticks {
        game = game.with_max_ticks(max_ticks);
    }
    Ok(game.run(&mut IdleInput, &mut NullRenderer))
}

/// Evaluate one generation: zero every accumulator, play all pairings, and
/// fold each match's fitness deltas into both participants.
///
/// An invalid `config` is rejected before any genome is touched.
pub fn evaluate_generation<P: Policy + Sync>(
    genomes: &mut [Genome<P>],
    config: &Config,
    tournament: &TournamentConfig,
) -> Result<GenerationReport, ConfigError> {
    config.validate()?;

    for genome in genomes.iter_mut() {
        genome.fitness = Some(0.0);
    }

    let pairs = round_robin_pairs(genomes.len());
    let population: &[Genome<P>] = &*genomes;
    let play = |&(i, j): &(usize, usize)| -> Result<PairResult, ConfigError> {
        let result = play_pair(
            config,
            tournament,
            &population[i].policy,
            &population[j].policy,
            pair_seed(tournament.seed, i, j),
        )?;
        Ok(PairResult {
            left: i,
            right: j,
            result,
        })
    };

    let results: Vec<PairResult> = if tournament.parallel {
        pairs.par_iter().map(play).collect::<Result<Vec<_>, _>>()?
    } else {
        pairs.iter().map(play).collect::<Result<Vec<_>, _>>()?
    };

    // Fold in pair order so parallel runs sum identically
    for pair in &results {
        add_fitness(&mut genomes[pair.left], pair.result.fitness.left);
        add_fitness(&mut genomes[pair.right], pair.result.fitness.right);
    }

    let best = best_genome(genomes);
    let total_ticks = results.iter().map(|p| p.result.ticks).sum();

    log::info!(
        "generation evaluated: {} genomes, {} matches, {} ticks, best {:?}",
        genomes.len(),
        results.len(),
        total_ticks,
        best.map(|i| (genomes[i].id, genomes[i].fitness))
    );

    Ok(GenerationReport {
        pairs: results,
        best,
        total_ticks,
    })
}

/// Index of the genome with the highest fitness (first one on ties)
pub fn best_genome<P>(genomes: &[Genome<P>]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, genome) in genomes.iter().enumerate() {
        let fitness = genome.fitness.unwrap_or(f32::NEG_INFINITY);
        match best {
            Some((_, b)) if fitness <= b => {}
            _ => best = Some((i, fitness)),
        }
    }
    best.map(|(i, _)| i)
}

fn add_fitness<P>(genome: &mut Genome<P>, delta: f32) {
    genome.fitness = Some(genome.fitness.unwrap_or(0.0) + delta);
}

use crate::{Config, Decision, Events, FitnessDelta, RewardShaping, Side};

/// Fold one tick's events into the per-side fitness delta.
///
/// `shaped[side.index()]` selects the sides whose fitness is tracked;
/// human and inert sides are skipped.
pub fn shape_fitness(
    events: &Events,
    decisions: &[Decision; 2],
    shaped: [bool; 2],
    config: &Config,
    delta: &mut FitnessDelta,
) {
    for side in Side::BOTH {
        if !shaped[side.index()] {
            continue;
        }

        if decisions[side.index()] == Decision::NoOp {
            delta.add(side, -config.idle_penalty);
        }

        match config.reward {
            RewardShaping::PerPoint { reward, penalty } => match events.scorer() {
                Some(scorer) if scorer == side => delta.add(side, reward),
                Some(_) => delta.add(side, -penalty),
                None => {}
            },
            RewardShaping::PerHit { reward } => {
                if events.hit(side) {
                    delta.add(side, reward);
                }
            }
            RewardShaping::None => {}
        }
    }
}

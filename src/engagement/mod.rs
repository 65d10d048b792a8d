//! Engagement resolution between two forces.
//!
//! Up to `max_rounds` rounds. Each round both sides tally hits from their
//! round-start rosters: leaders with a strategy skill contribute fractional
//! hits deterministically, and every soldier rolls one Bernoulli hit at
//! their combat effectiveness. Whole hits become casualties on the opposing
//! roster, removed immediately when they fall. A side routs when its mean
//! morale drops below the floor or its roster empties; that ends the
//! engagement early as a ceasefire, not an error.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::config::EngagementConfig;
use crate::force::force::Force;
use crate::force::soldier::SKILL_STRATEGY;

/// Final outcome of an engagement. Equal headcounts are a true draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementOutcome {
    FirstVictory,
    SecondVictory,
    Draw,
}

/// Results of a resolved engagement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementReport {
    pub outcome: EngagementOutcome,
    /// Name of the winning force; `None` on a draw.
    pub winner: Option<String>,
    /// Pre-engagement headcount minus survivors with health above zero.
    pub first_casualties: usize,
    pub second_casualties: usize,
    pub rounds_fought: u32,
}

/// Resolve an engagement, mutating both forces in place.
///
/// An empty force resolves deterministically: it tallies zero hits and
/// trivially loses.
pub fn resolve_engagement(
    first: &mut Force,
    second: &mut Force,
    config: &EngagementConfig,
    rng: &mut ChaCha8Rng,
) -> EngagementReport {
    let initial_first = first.headcount();
    let initial_second = second.headcount();
    let mut rounds = 0u32;

    while rounds < config.max_rounds {
        rounds += 1;

        // Both tallies come from round-start rosters, before any casualty.
        let first_hits = tally_hits(first, config, rng);
        let second_hits = tally_hits(second, config, rng);

        apply_casualties(second, first_hits, config, rng);
        apply_casualties(first, second_hits, config, rng);

        debug!(
            round = rounds,
            first_hits,
            second_hits,
            first_remaining = first.headcount(),
            second_remaining = second.headcount(),
            "engagement round resolved"
        );

        if is_broken(first, config) || is_broken(second, config) {
            break;
        }
    }

    let first_survivors = first.survivors();
    let second_survivors = second.survivors();
    let outcome = if first_survivors > second_survivors {
        EngagementOutcome::FirstVictory
    } else if second_survivors > first_survivors {
        EngagementOutcome::SecondVictory
    } else {
        EngagementOutcome::Draw
    };
    let winner = match outcome {
        EngagementOutcome::FirstVictory => Some(first.name.clone()),
        EngagementOutcome::SecondVictory => Some(second.name.clone()),
        EngagementOutcome::Draw => None,
    };

    info!(
        first = %first.name,
        second = %second.name,
        rounds,
        ?outcome,
        "engagement resolved"
    );

    EngagementReport {
        outcome,
        winner,
        first_casualties: initial_first - first_survivors,
        second_casualties: initial_second - second_survivors,
        rounds_fought: rounds,
    }
}

/// Accumulated hits for one side this round: deterministic fractional hits
/// from leaders' strategy skill plus one Bernoulli hit per soldier at their
/// combat effectiveness.
fn tally_hits(force: &Force, config: &EngagementConfig, rng: &mut ChaCha8Rng) -> f32 {
    let mut hits = 0.0f32;
    for &id in &force.roster {
        let soldier = match force.get(id) {
            Some(s) => s,
            None => continue,
        };
        if let Some(leadership) = &soldier.leadership {
            if let Some(score) = leadership.skills.get(SKILL_STRATEGY) {
                hits += score * config.strategy_hit_weight;
            }
        }
        if rng.gen::<f32>() < soldier.combat_effectiveness() {
            hits += 1.0;
        }
    }
    hits
}

/// Convert whole hits into casualties on the defending roster. Each pick is
/// uniform over the survivors; the fallen are removed immediately so later
/// picks in the same round cannot select them.
fn apply_casualties(defender: &mut Force, hits: f32, config: &EngagementConfig, rng: &mut ChaCha8Rng) {
    let volleys = hits.floor() as usize;
    for _ in 0..volleys {
        if defender.roster.is_empty() {
            break;
        }
        let idx = rng.gen_range(0..defender.roster.len());
        let id = defender.roster[idx];
        let fell = match defender.get_mut(id) {
            Some(soldier) => {
                soldier.apply_damage(rng.gen_range(config.casualty_damage.clone()));
                !soldier.is_alive()
            }
            None => false,
        };
        if fell {
            defender.remove_soldier(id);
        }
    }
}

/// Rout/ceasefire condition: empty roster or mean morale below the floor.
fn is_broken(force: &Force, config: &EngagementConfig) -> bool {
    match force.mean_morale() {
        Some(mean) => mean < config.morale_floor,
        None => true,
    }
}

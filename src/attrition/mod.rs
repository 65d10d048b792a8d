//! Environmental attrition: disease and travel hazards.
//!
//! Two composable passes. The disease pass damages a random subset of the
//! roster. The travel pass rolls fatigue, injury, and desertion per soldier
//! under a multiplicative terrain/weather/season hazard factor, sweeps the
//! dead, then re-runs the disease pass as a trailing step (a documented
//! coupling of the march model, not an accident).

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::AttritionConfig;
use crate::core::types::SoldierId;
use crate::force::force::Force;

/// Terrain category crossed on the march.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    Flat,
    Hilly,
    Mountainous,
}

impl Terrain {
    /// Hazard multiplier applied to every travel chance.
    pub fn hazard_factor(&self) -> f64 {
        match self {
            Self::Flat => 1.0,
            Self::Hilly => 1.2,
            Self::Mountainous => 1.5,
        }
    }
}

/// Weather during the march.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Rainy,
    Snowy,
}

impl Weather {
    pub fn hazard_factor(&self) -> f64 {
        match self {
            Self::Sunny => 1.0,
            Self::Rainy => 1.3,
            Self::Snowy => 1.7,
        }
    }
}

/// Season of the campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn hazard_factor(&self) -> f64 {
        match self {
            Self::Spring => 1.0,
            Self::Summer => 1.0,
            Self::Fall => 1.2,
            Self::Winter => 1.5,
        }
    }
}

/// Combined multiplicative hazard factor for a march.
pub fn total_hazard_factor(terrain: Terrain, weather: Weather, season: Season) -> f64 {
    terrain.hazard_factor() * weather.hazard_factor() * season.hazard_factor()
}

/// One disease pass over the roster.
///
/// Each soldier independently takes disease damage with
/// `config.disease_chance`. No removal happens here; dead soldiers are
/// swept by the travel pass or by the caller.
pub fn simulate_disease(force: &mut Force, config: &AttritionConfig, rng: &mut ChaCha8Rng) {
    let ids: Vec<SoldierId> = force.roster.clone();
    let mut struck = 0usize;
    for id in ids {
        if rng.gen::<f64>() < config.disease_chance {
            let damage = rng.gen_range(config.disease_damage.clone());
            if let Some(soldier) = force.get_mut(id) {
                soldier.apply_damage(damage);
                soldier.disease = (soldier.disease + config.disease_exposure_gain).min(1.0);
                struck += 1;
            }
        }
    }
    debug!(force = %force.name, struck, "disease pass complete");
}

/// One travel pass: fatigue, injury, and desertion rolls per soldier, all
/// three independent, each scaled by the hazard factor. The dead are swept
/// from roster and containers, then the disease pass runs as a trailing
/// step followed by a final sweep so no dead soldier survives the call.
pub fn apply_attrition(
    force: &mut Force,
    terrain: Terrain,
    weather: Weather,
    season: Season,
    config: &AttritionConfig,
    rng: &mut ChaCha8Rng,
) {
    let factor = total_hazard_factor(terrain, weather, season);
    let ids: Vec<SoldierId> = force.roster.clone();
    let mut deserted = 0usize;

    for id in ids {
        let fatigued = rng.gen::<f64>() < config.fatigue_chance * factor;
        let injured = rng.gen::<f64>() < config.injury_chance * factor;
        let deserts = rng.gen::<f64>() < config.desertion_chance * factor;

        if fatigued {
            let damage = rng.gen_range(config.fatigue_damage.clone());
            if let Some(soldier) = force.get_mut(id) {
                soldier.apply_damage(damage);
                soldier.fatigue = (soldier.fatigue + config.fatigue_gain).min(1.0);
            }
        }
        if injured {
            let damage = rng.gen_range(config.injury_damage.clone());
            if let Some(soldier) = force.get_mut(id) {
                soldier.apply_damage(damage);
            }
        }
        if deserts {
            force.remove_soldier(id);
            deserted += 1;
        }
    }

    let died = force.sweep_dead();
    simulate_disease(force, config, rng);
    let died_of_disease = force.sweep_dead();

    debug!(
        force = %force.name,
        factor,
        deserted,
        died = died + died_of_disease,
        remaining = force.headcount(),
        "travel attrition applied"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Branch, Rank};
    use crate::force::soldier::Soldier;
    use rand::SeedableRng;

    fn small_force(n: usize) -> Force {
        let mut force = Force::new("March Test");
        for i in 0..n {
            let soldier = Soldier::new(
                format!("Recruit {}", i + 1),
                80,
                0.5,
                0.5,
                Rank::Private,
                Branch::Infantry,
            )
            .unwrap();
            force.add_soldier(soldier);
        }
        force
    }

    fn zeroed_config() -> AttritionConfig {
        AttritionConfig {
            disease_chance: 0.0,
            fatigue_chance: 0.0,
            injury_chance: 0.0,
            desertion_chance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn hazard_factors_compose_multiplicatively() {
        let factor = total_hazard_factor(Terrain::Mountainous, Weather::Snowy, Season::Winter);
        assert!((factor - 1.5 * 1.7 * 1.5).abs() < 1e-9);
        assert_eq!(
            total_hazard_factor(Terrain::Flat, Weather::Sunny, Season::Summer),
            1.0
        );
    }

    #[test]
    fn zero_probabilities_leave_the_force_untouched() {
        let mut force = small_force(30);
        let before: Vec<i32> = force
            .roster
            .iter()
            .map(|&id| force.get(id).unwrap().health)
            .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        apply_attrition(
            &mut force,
            Terrain::Mountainous,
            Weather::Snowy,
            Season::Winter,
            &zeroed_config(),
            &mut rng,
        );

        assert_eq!(force.headcount(), 30);
        let after: Vec<i32> = force
            .roster
            .iter()
            .map(|&id| force.get(id).unwrap().health)
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn certain_disease_damages_everyone() {
        let mut force = small_force(20);
        let config = AttritionConfig {
            disease_chance: 1.0,
            ..zeroed_config()
        };

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        simulate_disease(&mut force, &config, &mut rng);

        for &id in &force.roster {
            let soldier = force.get(id).unwrap();
            assert!(soldier.health < 80);
            assert!(soldier.disease > 0.0);
        }
        // Pure disease pass never removes anyone.
        assert_eq!(force.headcount(), 20);
    }

    #[test]
    fn certain_desertion_empties_the_roster() {
        let mut force = small_force(15);
        let config = AttritionConfig {
            desertion_chance: 1.0,
            ..zeroed_config()
        };

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        apply_attrition(
            &mut force,
            Terrain::Flat,
            Weather::Sunny,
            Season::Spring,
            &config,
            &mut rng,
        );

        assert_eq!(force.headcount(), 0);
    }

    #[test]
    fn attrition_never_increases_health() {
        let mut force = small_force(60);
        let before: std::collections::HashMap<_, _> = force
            .soldiers
            .iter()
            .map(|(&id, s)| (id, s.health))
            .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        apply_attrition(
            &mut force,
            Terrain::Hilly,
            Weather::Rainy,
            Season::Fall,
            &AttritionConfig::default(),
            &mut rng,
        );

        for &id in &force.roster {
            let soldier = force.get(id).unwrap();
            assert!(soldier.health <= before[&id]);
            assert!(soldier.is_alive());
        }
    }
}

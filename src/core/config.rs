//! Simulation configuration with documented constants
//!
//! The tuned probabilities and damage ranges for the attrition and
//! engagement engines are collected here so tests can force them to
//! extremes (e.g. a zero-hazard march) without touching engine code.

use std::ops::RangeInclusive;

use crate::core::error::{MusterError, Result};

/// Knobs for the environmental attrition engine.
///
/// All chances are per-soldier, per-pass baselines; the travel chances are
/// additionally multiplied by the terrain/weather/season hazard factor.
#[derive(Debug, Clone)]
pub struct AttritionConfig {
    /// Chance a soldier contracts disease during a disease pass.
    ///
    /// At the default 0.3 roughly a third of the force takes 1-10 damage
    /// per pass, which thins a fresh 50-100 health roster over several
    /// marches without wiping it outright.
    pub disease_chance: f64,

    /// Health lost to a disease hit.
    pub disease_damage: RangeInclusive<i32>,

    /// Disease-exposure accumulated per hit (0-1 scale, clamped).
    ///
    /// Exposure feeds effectiveness, so repeatedly sick soldiers fight
    /// worse even after their health stabilizes.
    pub disease_exposure_gain: f32,

    /// Baseline chance of fatigue damage on the march.
    pub fatigue_chance: f64,

    /// Health lost to a fatigue hit.
    pub fatigue_damage: RangeInclusive<i32>,

    /// Fatigue accumulated per hit (0-1 scale, clamped).
    pub fatigue_gain: f32,

    /// Baseline chance of injury damage on the march.
    pub injury_chance: f64,

    /// Health lost to an injury.
    pub injury_damage: RangeInclusive<i32>,

    /// Baseline chance a soldier deserts (removed outright, no damage).
    pub desertion_chance: f64,
}

impl Default for AttritionConfig {
    fn default() -> Self {
        Self {
            disease_chance: 0.3,
            disease_damage: 1..=10,
            disease_exposure_gain: 0.1,
            fatigue_chance: 0.1,
            fatigue_damage: 1..=5,
            fatigue_gain: 0.1,
            injury_chance: 0.05,
            injury_damage: 5..=10,
            desertion_chance: 0.03,
        }
    }
}

impl AttritionConfig {
    /// Validate configuration for internal consistency.
    pub fn validate(&self) -> Result<()> {
        for (name, chance) in [
            ("disease_chance", self.disease_chance),
            ("fatigue_chance", self.fatigue_chance),
            ("injury_chance", self.injury_chance),
            ("desertion_chance", self.desertion_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(MusterError::Validation(format!(
                    "{} must be in [0,1], got {}",
                    name, chance
                )));
            }
        }

        for (name, range) in [
            ("disease_damage", &self.disease_damage),
            ("fatigue_damage", &self.fatigue_damage),
            ("injury_damage", &self.injury_damage),
        ] {
            if range.is_empty() || *range.start() < 0 {
                return Err(MusterError::Validation(format!(
                    "{} must be a non-empty, non-negative range",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// Knobs for the engagement resolution engine.
#[derive(Debug, Clone)]
pub struct EngagementConfig {
    /// Upper bound on combat rounds before both sides disengage.
    pub max_rounds: u32,

    /// Mean-morale floor (0-1 scale) below which a side routs and the
    /// engagement ends early. A ceasefire, not an error.
    pub morale_floor: f32,

    /// Fractional hits contributed per point of a leader's strategy skill.
    ///
    /// Skills are sampled in 1-10, so at the default 0.1 a single leader
    /// adds 0.1-1.0 deterministic hits per round on top of the rank-and-
    /// file's Bernoulli hits.
    pub strategy_hit_weight: f32,

    /// Health lost by a soldier picked as a casualty.
    pub casualty_damage: RangeInclusive<i32>,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            max_rounds: 10,
            morale_floor: 0.25,
            strategy_hit_weight: 0.1,
            casualty_damage: 10..=50,
        }
    }
}

impl EngagementConfig {
    /// Validate configuration for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(MusterError::Validation(
                "max_rounds must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.morale_floor) {
            return Err(MusterError::Validation(format!(
                "morale_floor must be in [0,1], got {}",
                self.morale_floor
            )));
        }
        if self.casualty_damage.is_empty() || *self.casualty_damage.start() < 1 {
            return Err(MusterError::Validation(
                "casualty_damage must be a non-empty, positive range".into(),
            ));
        }
        Ok(())
    }
}

//! Individual soldier record
//!
//! One flat struct tagged by rank and branch. Leadership-only state lives
//! in an optional attached record rather than a type hierarchy, so the
//! engines can treat every soldier uniformly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::error::{MusterError, Result};
use crate::core::types::{Branch, Rank};

/// Skill that contributes deterministic hits during engagements.
pub const SKILL_STRATEGY: &str = "strategy";
pub const SKILL_LOGISTICS: &str = "logistics";
pub const SKILL_DISCIPLINE: &str = "discipline";

/// Leadership-only state, present for Lieutenant rank and above.
///
/// Direct subordinates are NOT stored here; they are derived from the
/// hierarchy via [`Force::direct_subordinates`](crate::force::Force::direct_subordinates)
/// so removals can never leave a stale roster behind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leadership {
    /// Skill name -> score (sampled 1-10 at muster).
    pub skills: HashMap<String, f32>,
}

/// Where a soldier sits in the hierarchy.
///
/// Indices are stable: regiments and companies are append-only and never
/// destroyed. This single back-reference is what lets a removal update the
/// flat roster and the owning container in one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Posting {
    CompanyMember { regiment: usize, company: usize },
    CompanyLeader { regiment: usize, company: usize },
    RegimentLeader { regiment: usize },
}

/// A single member of a force.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Soldier {
    pub name: String,
    pub rank: Rank,
    pub branch: Branch,
    /// Remaining health; <= 0 means dead and due for removal by the caller.
    pub health: i32,
    /// Training level in [0,1].
    pub training: f32,
    /// Morale in [0,1].
    pub morale: f32,
    /// Accumulated fatigue in [0,1]; monotonic unless explicitly reset.
    pub fatigue: f32,
    /// Accumulated disease exposure in [0,1]; monotonic unless reset.
    pub disease: f32,
    /// Present only for leadership ranks (Lieutenant and above).
    pub leadership: Option<Leadership>,
    /// Owning-container back-reference, set when attached to a unit.
    pub posting: Option<Posting>,
}

/// Read-only description of a soldier for external display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoldierSummary {
    pub name: String,
    pub rank: Rank,
    pub branch: Branch,
    pub health: i32,
    pub training: f32,
    pub morale: f32,
}

impl Soldier {
    /// Create a soldier, validating the scalar fields.
    pub fn new(
        name: impl Into<String>,
        health: i32,
        training: f32,
        morale: f32,
        rank: Rank,
        branch: Branch,
    ) -> Result<Self> {
        if health <= 0 {
            return Err(MusterError::Validation(format!(
                "health must be positive, got {}",
                health
            )));
        }
        for (field, value) in [("training", training), ("morale", morale)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(MusterError::Validation(format!(
                    "{} must be in [0,1], got {}",
                    field, value
                )));
            }
        }

        Ok(Self {
            name: name.into(),
            rank,
            branch,
            health,
            training,
            morale,
            fatigue: 0.0,
            disease: 0.0,
            leadership: rank.is_leadership().then(Leadership::default),
            posting: None,
        })
    }

    /// Derived readiness score in [0,1]. Never stored.
    pub fn effectiveness(&self) -> f32 {
        let training = self.training.clamp(0.0, 1.0);
        let morale = self.morale.clamp(0.0, 1.0);
        let fatigue = self.fatigue.clamp(0.0, 1.0);
        let disease = self.disease.clamp(0.0, 1.0);
        training * morale * (1.0 - fatigue) * (1.0 - disease)
    }

    /// Per-round hit probability during engagements, in [0,1].
    ///
    /// Readiness scaled by remaining condition, so a wounded soldier
    /// fights worse than a fresh one with the same training.
    pub fn combat_effectiveness(&self) -> f32 {
        let condition = (self.health as f32 / 100.0).clamp(0.0, 1.0);
        self.effectiveness() * condition
    }

    /// Subtract health. Removal from containers stays with the caller so
    /// container invariants are updated explicitly, never as a side effect.
    pub fn apply_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn describe(&self) -> SoldierSummary {
        SoldierSummary {
            name: self.name.clone(),
            rank: self.rank,
            branch: self.branch,
            health: self.health,
            training: self.training,
            morale: self.morale,
        }
    }
}

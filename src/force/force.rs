//! Top-level force aggregate.
//!
//! The flat roster is the source of truth for existence. Every removal goes
//! through [`Force::remove_soldier`], which uses the soldier's posting
//! back-reference to update the owning container in the same operation, so
//! roster and containers can never drift apart.

use std::collections::HashMap;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::SoldierId;
use crate::force::regiment::Regiment;
use crate::force::soldier::{Posting, Soldier};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Force {
    pub name: String,
    /// Soldier storage keyed by id. Never iterated directly; ordered walks
    /// go through `roster` so seeded runs stay deterministic.
    pub soldiers: HashMap<SoldierId, Soldier>,
    /// Ids in join order; the source of truth for existence.
    pub roster: Vec<SoldierId>,
    /// Regiments in creation order; append-only.
    pub regiments: Vec<Regiment>,
    next_id: u32,
}

impl Force {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            soldiers: HashMap::new(),
            roster: Vec::new(),
            regiments: Vec::new(),
            next_id: 0,
        }
    }

    /// Enlist a soldier, issuing the next sequential id.
    pub fn add_soldier(&mut self, soldier: Soldier) -> SoldierId {
        let id = SoldierId(self.next_id);
        self.next_id += 1;
        self.soldiers.insert(id, soldier);
        self.roster.push(id);
        id
    }

    /// Append a regiment, returning its index.
    pub fn add_regiment(&mut self, regiment: Regiment) -> usize {
        self.regiments.push(regiment);
        self.regiments.len() - 1
    }

    pub fn get(&self, id: SoldierId) -> Option<&Soldier> {
        self.soldiers.get(&id)
    }

    pub fn get_mut(&mut self, id: SoldierId) -> Option<&mut Soldier> {
        self.soldiers.get_mut(&id)
    }

    pub fn headcount(&self) -> usize {
        self.roster.len()
    }

    /// Survivors with health above zero.
    pub fn survivors(&self) -> usize {
        self.roster
            .iter()
            .filter_map(|&id| self.get(id))
            .filter(|s| s.is_alive())
            .count()
    }

    /// First soldier with an exactly matching name, in join order.
    ///
    /// Names are not unique; first-match is the documented lookup rule.
    pub fn find_soldier(&self, name: &str) -> Option<&Soldier> {
        self.roster
            .iter()
            .filter_map(|&id| self.get(id))
            .find(|s| s.name == name)
    }

    /// Mean morale over the current roster; `None` when empty.
    pub fn mean_morale(&self) -> Option<f32> {
        if self.roster.is_empty() {
            return None;
        }
        let total: f32 = self
            .roster
            .iter()
            .filter_map(|&id| self.get(id))
            .map(|s| s.morale)
            .sum();
        Some(total / self.roster.len() as f32)
    }

    /// Remove a soldier from the flat roster AND from its posting slot
    /// (member list or leader reference) in one operation.
    pub fn remove_soldier(&mut self, id: SoldierId) -> Option<Soldier> {
        let soldier = self.soldiers.remove(&id)?;
        self.roster.retain(|&sid| sid != id);

        match soldier.posting {
            Some(Posting::CompanyMember { regiment, company })
            | Some(Posting::CompanyLeader { regiment, company }) => {
                if let Some(c) = self
                    .regiments
                    .get_mut(regiment)
                    .and_then(|r| r.companies.get_mut(company))
                {
                    c.remove_member(id);
                }
            }
            Some(Posting::RegimentLeader { regiment }) => {
                if let Some(r) = self.regiments.get_mut(regiment) {
                    if r.leader == Some(id) {
                        r.leader = None;
                    }
                }
            }
            None => {}
        }

        Some(soldier)
    }

    /// Remove `n` soldiers picked uniformly at random without replacement.
    pub fn remove_random_casualties(&mut self, n: usize, rng: &mut ChaCha8Rng) -> Vec<Soldier> {
        let mut removed = Vec::new();
        for _ in 0..n {
            if self.roster.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..self.roster.len());
            let id = self.roster[idx];
            if let Some(soldier) = self.remove_soldier(id) {
                removed.push(soldier);
            }
        }
        removed
    }

    /// Remove everyone with health <= 0, returning how many fell.
    pub fn sweep_dead(&mut self) -> usize {
        let dead: Vec<SoldierId> = self
            .roster
            .iter()
            .copied()
            .filter(|&id| self.get(id).map_or(false, |s| !s.is_alive()))
            .collect();
        let count = dead.len();
        for id in dead {
            self.remove_soldier(id);
        }
        count
    }

    /// Direct subordinates of a leader, derived from the hierarchy.
    ///
    /// Company leaders answer for their members; regiment leaders for their
    /// company leaders. Everyone else has none.
    pub fn direct_subordinates(&self, id: SoldierId) -> Vec<&Soldier> {
        let soldier = match self.get(id) {
            Some(s) => s,
            None => return Vec::new(),
        };
        match soldier.posting {
            Some(Posting::CompanyLeader { regiment, company }) => self
                .regiments
                .get(regiment)
                .and_then(|r| r.companies.get(company))
                .map(|c| c.members.iter().filter_map(|&m| self.get(m)).collect())
                .unwrap_or_default(),
            Some(Posting::RegimentLeader { regiment }) => self
                .regiments
                .get(regiment)
                .map(|r| {
                    r.companies
                        .iter()
                        .filter_map(|c| c.leader.and_then(|l| self.get(l)))
                        .collect()
                })
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

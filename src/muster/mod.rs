//! Hierarchy building: muster a force from weighted rank and branch tables.
//!
//! Recruits are drawn one at a time. Lieutenants take over the first
//! leaderless company (raising a new one when none exists), captains do the
//! same for regiments, and everyone else fills the current company, with
//! capacity overflow creating fresh containers on demand. Container names
//! come from explicit sequence counters, so a fixed seed reproduces the
//! exact same force.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::core::error::{MusterError, Result};
use crate::core::types::{Branch, Rank};
use crate::force::company::Company;
use crate::force::force::Force;
use crate::force::regiment::Regiment;
use crate::force::soldier::{Posting, Soldier, SKILL_DISCIPLINE, SKILL_LOGISTICS, SKILL_STRATEGY};

const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Weighted categorical table over a copyable outcome.
#[derive(Debug, Clone)]
pub struct WeightedTable<T: Copy> {
    entries: Vec<(T, f64)>,
    index: WeightedIndex<f64>,
}

pub type RankTable = WeightedTable<Rank>;
pub type BranchTable = WeightedTable<Branch>;

impl<T: Copy> WeightedTable<T> {
    /// Build a table, requiring the probabilities to sum to 1 within
    /// floating tolerance.
    pub fn new(entries: Vec<(T, f64)>) -> Result<Self> {
        let sum: f64 = entries.iter().map(|(_, p)| p).sum();
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(MusterError::Validation(format!(
                "probabilities must sum to 1, got {}",
                sum
            )));
        }
        let index = WeightedIndex::new(entries.iter().map(|(_, p)| *p))
            .map_err(|e| MusterError::Validation(e.to_string()))?;
        Ok(Self { entries, index })
    }

    pub fn sample(&self, rng: &mut ChaCha8Rng) -> T {
        self.entries[self.index.sample(rng)].0
    }
}

impl Default for RankTable {
    fn default() -> Self {
        // Sums to exactly 1.0; leadership ranks are deliberately rare so a
        // few-hundred-strong muster yields a handful of regiments.
        Self::new(vec![
            (Rank::Private, 0.78),
            (Rank::Corporal, 0.10),
            (Rank::Sergeant, 0.05),
            (Rank::Lieutenant, 0.04),
            (Rank::Captain, 0.015),
            (Rank::Major, 0.01),
            (Rank::General, 0.004),
            (Rank::MajorGeneral, 0.001),
        ])
        .expect("default rank table is valid")
    }
}

impl Default for BranchTable {
    fn default() -> Self {
        Self::new(vec![
            (Branch::Infantry, 0.6),
            (Branch::Cavalry, 0.3),
            (Branch::Artillery, 0.1),
        ])
        .expect("default branch table is valid")
    }
}

/// Cursors and sequence counters for one muster run. Explicit state, no
/// globals, so concurrent musters of independent forces cannot interfere.
#[derive(Debug, Default)]
struct MusterState {
    current_regiment: Option<usize>,
    current_company: Option<(usize, usize)>,
    regiment_seq: u32,
    company_seq: u32,
}

/// Build a force of `target_size` soldiers.
///
/// Capacity overflow is resolved internally by raising new companies and
/// regiments; it is never surfaced to the caller.
pub fn muster_force(
    name: impl Into<String>,
    target_size: usize,
    rank_table: &RankTable,
    branch_table: &BranchTable,
    rng: &mut ChaCha8Rng,
) -> Result<Force> {
    let mut force = Force::new(name);
    let mut state = MusterState::default();

    for seq in 0..target_size {
        let rank = rank_table.sample(rng);
        let branch = branch_table.sample(rng);
        let health = rng.gen_range(50..=100);
        let training = rng.gen::<f32>();
        let morale = rng.gen::<f32>();

        let mut soldier = Soldier::new(
            format!("Recruit {}", seq + 1),
            health,
            training,
            morale,
            rank,
            branch,
        )?;
        if let Some(leadership) = soldier.leadership.as_mut() {
            for skill in [SKILL_STRATEGY, SKILL_LOGISTICS, SKILL_DISCIPLINE] {
                leadership
                    .skills
                    .insert(skill.to_string(), rng.gen_range(1.0..=10.0));
            }
        }

        match rank {
            Rank::Lieutenant => place_company_leader(&mut force, &mut state, soldier)?,
            Rank::Captain => place_regiment_leader(&mut force, &mut state, soldier)?,
            _ => place_member(&mut force, &mut state, soldier)?,
        }
    }

    info!(
        force = %force.name,
        size = force.headcount(),
        regiments = force.regiments.len(),
        "force mustered"
    );
    Ok(force)
}

/// A lieutenant takes over the first leaderless company, or raises a new
/// one when every existing company is already led.
fn place_company_leader(force: &mut Force, state: &mut MusterState, soldier: Soldier) -> Result<()> {
    let rank = soldier.rank;
    let id = force.add_soldier(soldier);

    let slot = match find_leaderless_company(force) {
        Some(slot) => slot,
        None => raise_company(force, state)?,
    };
    force.regiments[slot.0].companies[slot.1].assign_leader(id, rank)?;
    if let Some(s) = force.get_mut(id) {
        s.posting = Some(Posting::CompanyLeader {
            regiment: slot.0,
            company: slot.1,
        });
    }
    Ok(())
}

/// A captain takes over the first leaderless regiment, or raises a new one.
fn place_regiment_leader(
    force: &mut Force,
    state: &mut MusterState,
    soldier: Soldier,
) -> Result<()> {
    let rank = soldier.rank;
    let id = force.add_soldier(soldier);

    let reg_idx = match force.regiments.iter().position(|r| r.leader.is_none()) {
        Some(idx) => idx,
        None => raise_regiment(force, state),
    };
    force.regiments[reg_idx].assign_leader(id, rank)?;
    if let Some(s) = force.get_mut(id) {
        s.posting = Some(Posting::RegimentLeader { regiment: reg_idx });
    }
    Ok(())
}

/// Everyone else joins the current company, overflowing into a fresh one
/// at capacity.
fn place_member(force: &mut Force, state: &mut MusterState, soldier: Soldier) -> Result<()> {
    let id = force.add_soldier(soldier);

    let slot = match state.current_company {
        Some((r, c)) if !force.regiments[r].companies[c].is_full() => (r, c),
        _ => raise_company(force, state)?,
    };
    force.regiments[slot.0].companies[slot.1].add_member(id)?;
    if let Some(s) = force.get_mut(id) {
        s.posting = Some(Posting::CompanyMember {
            regiment: slot.0,
            company: slot.1,
        });
    }
    Ok(())
}

fn find_leaderless_company(force: &Force) -> Option<(usize, usize)> {
    for (r, regiment) in force.regiments.iter().enumerate() {
        for (c, company) in regiment.companies.iter().enumerate() {
            if company.leader.is_none() {
                return Some((r, c));
            }
        }
    }
    None
}

/// Create a company under the current regiment (raising a regiment first
/// if none exists or the current one is at capacity) and make it current.
fn raise_company(force: &mut Force, state: &mut MusterState) -> Result<(usize, usize)> {
    let reg_idx = match state.current_regiment {
        Some(idx) if !force.regiments[idx].is_full() => idx,
        _ => raise_regiment(force, state),
    };

    state.company_seq += 1;
    let name = format!("Company {}", state.company_seq);
    debug!(company = %name, regiment = reg_idx, "raising new company");
    let company_idx = force.regiments[reg_idx].add_company(Company::new(name))?;

    let slot = (reg_idx, company_idx);
    state.current_company = Some(slot);
    Ok(slot)
}

/// Create a leaderless regiment and make it current.
fn raise_regiment(force: &mut Force, state: &mut MusterState) -> usize {
    state.regiment_seq += 1;
    let name = format!("Regiment {}", state.regiment_seq);
    debug!(regiment = %name, "raising new regiment");
    let idx = force.add_regiment(Regiment::new(name));
    state.current_regiment = Some(idx);
    idx
}

//! Regiment: a bounded roster of companies led by a captain.

use serde::{Deserialize, Serialize};

use crate::core::error::{MusterError, Result};
use crate::core::types::{Rank, SoldierId};
use crate::force::company::Company;

/// Maximum companies per regiment.
pub const REGIMENT_CAPACITY: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Regiment {
    pub name: String,
    /// Companies in creation order. Each company belongs to exactly one
    /// regiment; they are never shared or moved.
    pub companies: Vec<Company>,
    /// Must hold Captain rank.
    pub leader: Option<SoldierId>,
}

impl Regiment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            companies: Vec::new(),
            leader: None,
        }
    }

    pub fn is_full(&self) -> bool {
        self.companies.len() >= REGIMENT_CAPACITY
    }

    /// Append a company, returning its index within the regiment.
    pub fn add_company(&mut self, company: Company) -> Result<usize> {
        if self.is_full() {
            return Err(MusterError::CapacityExceeded {
                unit: self.name.clone(),
                capacity: REGIMENT_CAPACITY,
            });
        }
        self.companies.push(company);
        Ok(self.companies.len() - 1)
    }

    /// Install a leader, replacing any existing one.
    pub fn assign_leader(&mut self, id: SoldierId, rank: Rank) -> Result<()> {
        if rank != Rank::Captain {
            return Err(MusterError::InvalidLeaderRank {
                required: Rank::Captain,
                found: rank,
            });
        }
        self.leader = Some(id);
        Ok(())
    }

    /// First company with an exactly matching name, in creation order.
    pub fn find_company(&self, name: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.name == name)
    }

    /// Total headcount across member slots (leaders excluded).
    pub fn member_count(&self) -> usize {
        self.companies.iter().map(|c| c.members.len()).sum()
    }
}

//! Company: the lowest unit container.

use serde::{Deserialize, Serialize};

use crate::core::error::{MusterError, Result};
use crate::core::types::{Rank, SoldierId};
use crate::force::force::Force;
use crate::force::soldier::Soldier;

/// Maximum rank-and-file headcount per company. The leader is a separate
/// slot and does not count against this.
pub const COMPANY_CAPACITY: usize = 50;

/// A bounded roster of soldiers led by a lieutenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    /// Member ids in join order.
    pub members: Vec<SoldierId>,
    /// Must hold Lieutenant rank; never also listed in `members`.
    pub leader: Option<SoldierId>,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            leader: None,
        }
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= COMPANY_CAPACITY
    }

    /// Append a member, preserving join order.
    pub fn add_member(&mut self, id: SoldierId) -> Result<()> {
        if self.is_full() {
            return Err(MusterError::CapacityExceeded {
                unit: self.name.clone(),
                capacity: COMPANY_CAPACITY,
            });
        }
        self.members.push(id);
        Ok(())
    }

    /// Install a leader, replacing any existing one. The old leader is not
    /// removed from anything; that is the caller's responsibility.
    pub fn assign_leader(&mut self, id: SoldierId, rank: Rank) -> Result<()> {
        if rank != Rank::Lieutenant {
            return Err(MusterError::InvalidLeaderRank {
                required: Rank::Lieutenant,
                found: rank,
            });
        }
        self.leader = Some(id);
        Ok(())
    }

    pub fn remove_member(&mut self, id: SoldierId) {
        self.members.retain(|&m| m != id);
        if self.leader == Some(id) {
            self.leader = None;
        }
    }

    /// First member with an exactly matching name, in join order.
    ///
    /// Names are not unique; first-match is the documented lookup rule.
    pub fn find_member<'f>(&self, name: &str, force: &'f Force) -> Option<&'f Soldier> {
        self.members
            .iter()
            .filter_map(|&id| force.get(id))
            .find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Branch;

    #[test]
    fn find_member_returns_first_match_in_join_order() {
        let mut force = Force::new("Test Force");
        let mut company = Company::new("Company 1");

        // Generated names can collide; lookup keeps the earliest joiner.
        let first = force.add_soldier(
            Soldier::new("John Smith", 90, 0.5, 0.5, Rank::Private, Branch::Infantry).unwrap(),
        );
        let second = force.add_soldier(
            Soldier::new("John Smith", 60, 0.5, 0.5, Rank::Corporal, Branch::Cavalry).unwrap(),
        );
        company.add_member(first).unwrap();
        company.add_member(second).unwrap();

        let found = company.find_member("John Smith", &force).unwrap();
        assert_eq!(found.rank, Rank::Private);
        assert_eq!(found.health, 90);

        assert!(company.find_member("Nobody", &force).is_none());
    }

    #[test]
    fn capacity_is_enforced() {
        let mut company = Company::new("Company 1");
        for i in 0..COMPANY_CAPACITY {
            company.add_member(SoldierId(i as u32)).unwrap();
        }
        assert!(company.is_full());

        let err = company.add_member(SoldierId(999)).unwrap_err();
        assert!(matches!(err, MusterError::CapacityExceeded { capacity, .. } if capacity == COMPANY_CAPACITY));
    }

    #[test]
    fn leader_must_be_lieutenant() {
        let mut company = Company::new("Company 1");
        let err = company.assign_leader(SoldierId(1), Rank::Sergeant).unwrap_err();
        assert!(matches!(
            err,
            MusterError::InvalidLeaderRank { required: Rank::Lieutenant, found: Rank::Sergeant }
        ));
        assert!(company.leader.is_none());

        company.assign_leader(SoldierId(1), Rank::Lieutenant).unwrap();
        assert_eq!(company.leader, Some(SoldierId(1)));

        // Reassignment replaces the reference.
        company.assign_leader(SoldierId(2), Rank::Lieutenant).unwrap();
        assert_eq!(company.leader, Some(SoldierId(2)));
    }

    #[test]
    fn remove_member_clears_leader_slot() {
        let mut company = Company::new("Company 1");
        company.add_member(SoldierId(1)).unwrap();
        company.assign_leader(SoldierId(7), Rank::Lieutenant).unwrap();

        company.remove_member(SoldierId(7));
        assert!(company.leader.is_none());
        assert_eq!(company.members, vec![SoldierId(1)]);
    }
}

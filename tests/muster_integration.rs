//! Integration tests for the hierarchy-building algorithm.

use std::collections::HashSet;

use iron_muster::core::types::{Rank, SoldierId};
use iron_muster::force::{Force, Posting, COMPANY_CAPACITY, REGIMENT_CAPACITY};
use iron_muster::muster::{muster_force, BranchTable, RankTable};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn build(size: usize, seed: u64) -> Force {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    muster_force(
        "Levy",
        size,
        &RankTable::default(),
        &BranchTable::default(),
        &mut rng,
    )
    .unwrap()
}

/// Every id referenced by a container must exist in the flat roster, and no
/// soldier may occupy more than one slot.
fn assert_structurally_sound(force: &Force) {
    let roster: HashSet<SoldierId> = force.roster.iter().copied().collect();
    assert_eq!(roster.len(), force.roster.len(), "duplicate roster entries");

    let mut seen: HashSet<SoldierId> = HashSet::new();
    for (r, regiment) in force.regiments.iter().enumerate() {
        assert!(regiment.companies.len() <= REGIMENT_CAPACITY);

        if let Some(leader) = regiment.leader {
            assert!(roster.contains(&leader));
            assert!(seen.insert(leader), "leader in two slots");
            assert_eq!(force.get(leader).unwrap().rank, Rank::Captain);
        }

        for (c, company) in regiment.companies.iter().enumerate() {
            assert!(company.members.len() <= COMPANY_CAPACITY);

            if let Some(leader) = company.leader {
                assert!(roster.contains(&leader));
                assert!(seen.insert(leader), "leader in two slots");
                assert!(!company.members.contains(&leader));
                assert_eq!(force.get(leader).unwrap().rank, Rank::Lieutenant);
            }

            for &member in &company.members {
                assert!(roster.contains(&member));
                assert!(seen.insert(member), "member in two slots");
                assert_eq!(
                    force.get(member).unwrap().posting,
                    Some(Posting::CompanyMember { regiment: r, company: c })
                );
            }
        }
    }
}

#[test]
fn size_200_default_tables_yields_a_sound_hierarchy() {
    let force = build(200, 42);

    assert_eq!(force.headcount(), 200);
    assert!(!force.regiments.is_empty());
    assert_structurally_sound(&force);
}

#[test]
fn every_captain_leads_exactly_one_regiment() {
    for seed in [1u64, 17, 99, 4096] {
        let force = build(200, seed);

        let captains = force
            .roster
            .iter()
            .filter(|&&id| force.get(id).unwrap().rank == Rank::Captain)
            .count();
        let led_regiments = force
            .regiments
            .iter()
            .filter(|r| r.leader.is_some())
            .count();
        assert_eq!(captains, led_regiments, "seed {}", seed);
    }
}

#[test]
fn every_lieutenant_leads_exactly_one_company() {
    for seed in [3u64, 21, 777] {
        let force = build(300, seed);

        let lieutenants = force
            .roster
            .iter()
            .filter(|&&id| force.get(id).unwrap().rank == Rank::Lieutenant)
            .count();
        let led_companies = force
            .regiments
            .iter()
            .flat_map(|r| &r.companies)
            .filter(|c| c.leader.is_some())
            .count();
        assert_eq!(lieutenants, led_companies, "seed {}", seed);
    }
}

#[test]
fn leadership_ranks_carry_sampled_skills() {
    let force = build(400, 8);

    for &id in &force.roster {
        let soldier = force.get(id).unwrap();
        if soldier.rank.is_leadership() {
            let leadership = soldier.leadership.as_ref().unwrap();
            let strategy = leadership.skills["strategy"];
            assert!((1.0..=10.0).contains(&strategy));
        } else {
            assert!(soldier.leadership.is_none());
        }
    }
}

proptest! {
    #[test]
    fn built_forces_are_always_structurally_sound(
        size in 0usize..300,
        seed in proptest::num::u64::ANY,
    ) {
        let force = build(size, seed);
        prop_assert_eq!(force.headcount(), size);
        assert_structurally_sound(&force);
    }
}

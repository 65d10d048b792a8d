//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for soldiers.
///
/// Issued sequentially by the owning [`Force`](crate::force::Force), so
/// construction stays deterministic under a fixed seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoldierId(pub u32);

/// Military rank, ordered by seniority.
///
/// `Lieutenant` is the required rank for company leadership and `Captain`
/// for regiment leadership; everything from `Lieutenant` up carries a
/// leadership record (skills) even when serving in the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Private,
    Corporal,
    Sergeant,
    Lieutenant,
    Captain,
    Major,
    General,
    MajorGeneral,
}

impl Rank {
    /// Ranks from Lieutenant upward hold leadership state (skills).
    pub fn is_leadership(&self) -> bool {
        *self >= Rank::Lieutenant
    }
}

/// Unit branch of service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    Infantry,
    Cavalry,
    Artillery,
}

//! Iron Muster - stochastic military force simulation
//!
//! Builds a three-tier force hierarchy (force -> regiment -> company ->
//! soldier) from weighted rank tables, then subjects it to environmental
//! attrition and bounded multi-round engagements. All randomness flows
//! through an injected, seedable generator so runs are replayable.

pub mod attrition;
pub mod core;
pub mod engagement;
pub mod force;
pub mod muster;

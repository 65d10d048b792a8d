//! Force hierarchy: soldiers, companies, regiments, and the top-level force.

pub mod company;
pub mod force;
pub mod regiment;
pub mod soldier;

pub use company::{Company, COMPANY_CAPACITY};
pub use force::Force;
pub use regiment::{Regiment, REGIMENT_CAPACITY};
pub use soldier::{Leadership, Posting, Soldier, SoldierSummary, SKILL_STRATEGY};

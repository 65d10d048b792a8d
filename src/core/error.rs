use thiserror::Error;

use crate::core::types::Rank;

#[derive(Error, Debug)]
pub enum MusterError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{unit} is at capacity ({capacity})")]
    CapacityExceeded { unit: String, capacity: usize },

    #[error("Leader must hold rank {required:?}, candidate holds {found:?}")]
    InvalidLeaderRank { required: Rank, found: Rank },
}

pub type Result<T> = std::result::Result<T, MusterError>;

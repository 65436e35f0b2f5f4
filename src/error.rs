//! Error types for table lookup and generation

use thiserror::Error;

/// Result type for prime table operations
pub type Result<T> = std::result::Result<T, PrimeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PrimeError {
    /// The query is at or above the largest tabulated prime.
    #[error("{n} is out of range (table maximum is {max})")]
    OutOfRange { n: i64, max: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("Table entry {0} is not prime")]
    NotPrime(u64),
}

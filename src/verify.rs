//! Primality checks for maintaining the table.

use num_bigint_dig::{prime::probably_prime, BigUint};
use num_traits::ToPrimitive;
use tracing::{info, warn};

use crate::error::{PrimeError, Result};
use crate::table::PrimeTable;

const ROUNDS: usize = 20;

pub fn is_prime(n: u64) -> bool {
    probably_prime(&BigUint::from(n), ROUNDS)
}

/// The smallest prime strictly greater than `n`.
pub fn next_prime(n: u64) -> u64 {
    if n < 2 {
        return 2;
    }
    let two = BigUint::from(2usize);

    let mut working = (BigUint::from(n) + 1u32) | BigUint::from(1usize);
    loop {
        if probably_prime(&working, ROUNDS) {
            // saturates past the largest 64-bit prime
            return working.to_u64().unwrap_or(u64::MAX);
        }

        working += &two;
    }
}

/// Re-checks every entry of `table` after the leading sentinel 1.
pub fn verify_table(table: &PrimeTable<'_>) -> Result<()> {
    let mut checked = 0usize;
    for p in table.primes() {
        if !is_prime(u64::from(p)) {
            warn!(value = p, "composite table entry");
            return Err(PrimeError::NotPrime(u64::from(p)));
        }
        checked += 1;
    }
    info!(checked, max = table.max(), "table verified");
    Ok(())
}

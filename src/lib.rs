//! Picks hash table sizes from a sparse table of primes.
//!
//! ```
//! assert_eq!(prime_after::find_after(1000), Ok(1009));
//! ```

pub mod error;
pub mod sieve;
pub mod table;
pub mod verify;

pub use error::{PrimeError, Result};
pub use sieve::{format_table, generate_table, CompositeSet, GeneratorConfig, SteppedPrimes};
pub use table::{find_after, PrimeTable, PRIME_LIST};
pub use verify::{is_prime, next_prime, verify_table};

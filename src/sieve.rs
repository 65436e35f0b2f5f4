//! Offline regeneration of the prime table.
//!
//! Nothing here is used by [`find_after`](crate::find_after); it exists so the
//! embedded table can be rebuilt and checked.

use std::fmt::Write;

use tracing::{debug, trace};

use crate::error::{PrimeError, Result};

/// Sieve of Eratosthenes over `[0, limit)`. A set bit marks a non-prime,
/// including 0 and 1.
#[derive(Debug, Clone)]
pub struct CompositeSet {
    words: Vec<u64>,
    limit: u64,
}

impl CompositeSet {
    pub fn build(limit: u32) -> Self {
        let limit = u64::from(limit);
        let mut set = Self {
            words: vec![0; limit.div_ceil(64) as usize],
            limit,
        };
        debug!(limit, words = set.words.len(), "building composite set");

        for i in 0..limit.min(2) {
            set.mark(i);
        }
        let mut i = 2;
        while i * i < limit {
            if !set.is_composite(i) {
                let mut j = i * i;
                while j < limit {
                    set.mark(j);
                    j += i;
                }
            }
            i += 1;
        }
        set
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Whether `i` is known not to be prime. Out-of-range values count as
    /// composite.
    pub fn is_composite(&self, i: u64) -> bool {
        if i >= self.limit {
            return true;
        }
        self.words[(i / 64) as usize] & (1 << (i % 64)) != 0
    }

    /// The first prime at or after `from`, if one is below the limit.
    pub fn next_prime_from(&self, from: u64) -> Option<u64> {
        if from >= self.limit {
            return None;
        }
        let mut word_idx = (from / 64) as usize;
        let mut clear = !self.words[word_idx] & (u64::MAX << (from % 64));
        loop {
            if clear != 0 {
                let i = word_idx as u64 * 64 + u64::from(clear.trailing_zeros());
                return (i < self.limit).then_some(i);
            }
            word_idx += 1;
            clear = !*self.words.get(word_idx)?;
        }
    }

    fn mark(&mut self, i: u64) {
        self.words[(i / 64) as usize] |= 1 << (i % 64);
    }
}

/// Primes below a limit, sampled at geometrically growing positions.
///
/// Created by [`generate_table`].
#[derive(Debug, Clone)]
pub struct SteppedPrimes {
    sieve: CompositeSet,
    growth: f32,
    position: u64,
    last: Option<u64>,
}

impl SteppedPrimes {
    /// Next position to search from after emitting `prime`. Single precision
    /// keeps the output identical to the embedded table.
    fn step(&self, prime: u64) -> u64 {
        let scaled = ((prime + 1) as f32 * self.growth) as u64;
        scaled.max(prime + 1)
    }
}

impl Iterator for SteppedPrimes {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        loop {
            let prime = self.sieve.next_prime_from(self.position)?;
            self.position = self.step(prime);
            if self.last.map_or(true, |last| prime > last) {
                self.last = Some(prime);
                trace!(prime, "emit");
                // below the u32 limit
                return Some(prime as u32);
            }
        }
    }
}

/// Builds the sieve for `[0, limit)` and walks it from 1, jumping by
/// `growth` after every prime found. `generate_table(2^31 - 1, 1.1)`
/// reproduces [`PRIME_LIST`](crate::PRIME_LIST) without its leading 1.
pub fn generate_table(limit: u32, growth: f32) -> Result<SteppedPrimes> {
    check_growth(growth)?;
    Ok(SteppedPrimes {
        sieve: CompositeSet::build(limit),
        growth,
        position: 1,
        last: None,
    })
}

fn check_growth(growth: f32) -> Result<()> {
    if !growth.is_finite() || growth <= 1.0 {
        return Err(PrimeError::InvalidConfiguration(format!(
            "growth factor must be a finite value above 1.0, got {growth}"
        )));
    }
    Ok(())
}

/// Parameters for [`generate_table`]. The default reproduces the embedded
/// table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    pub limit: u32,
    pub growth: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            limit: i32::MAX as u32,
            growth: 1.1,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        check_growth(self.growth)
    }

    pub fn generate(&self) -> Result<SteppedPrimes> {
        generate_table(self.limit, self.growth)
    }
}

/// Renders `primes` as the body of an array literal, `per_line` values to a
/// line.
pub fn format_table(primes: impl IntoIterator<Item = u32>, per_line: usize) -> String {
    let per_line = per_line.max(1);
    let mut out = String::new();
    for (i, prime) in primes.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
            out.push(if i % per_line == 0 { '\n' } else { ' ' });
        }
        // writing to a String cannot fail
        let _ = write!(out, "{prime}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::PRIME_LIST;
    use proptest::{prop_assert, prop_assert_eq};
    use test_strategy::proptest;

    fn trial_division(n: u64) -> bool {
        n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
    }

    #[test]
    fn test_sieve_below_100() {
        let set = CompositeSet::build(100);
        let primes: Vec<u64> = (0..100).filter(|&i| !set.is_composite(i)).collect();
        assert_eq!(primes.len(), 25);
        assert_eq!(primes.first(), Some(&2));
        assert_eq!(primes.last(), Some(&97));
        assert!(set.is_composite(0));
        assert!(set.is_composite(1));
        assert!(set.is_composite(100));
    }

    #[test]
    fn test_next_prime_from_crosses_words() {
        let set = CompositeSet::build(200);
        assert_eq!(set.next_prime_from(0), Some(2));
        assert_eq!(set.next_prime_from(62), Some(67));
        assert_eq!(set.next_prime_from(114), Some(127));
        assert_eq!(set.next_prime_from(128), Some(131));
        assert_eq!(set.next_prime_from(198), Some(199));
        assert_eq!(set.next_prime_from(500), None);
        assert_eq!(CompositeSet::build(199).next_prime_from(198), None);
    }

    #[test]
    fn test_tiny_limits() {
        assert_eq!(CompositeSet::build(0).next_prime_from(0), None);
        assert_eq!(generate_table(0, 1.1).unwrap().count(), 0);
        assert_eq!(generate_table(2, 1.1).unwrap().count(), 0);
        assert_eq!(generate_table(3, 1.1).unwrap().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_generate_below_100() {
        let primes: Vec<u32> = generate_table(100, 1.1).unwrap().collect();
        assert_eq!(
            primes,
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 37, 41, 47, 53, 59, 67, 79, 89]
        );
    }

    #[test]
    fn test_generate_reproduces_embedded_prefix() {
        let limit = 10_000_000;
        let generated: Vec<u32> = generate_table(limit, 1.1).unwrap().collect();
        let expected: Vec<u32> = PRIME_LIST[1..]
            .iter()
            .copied()
            .take_while(|&p| p < limit)
            .collect();
        assert_eq!(generated, expected);
    }

    #[test]
    fn test_coarse_growth() {
        let primes: Vec<u32> = generate_table(100, 1.5).unwrap().collect();
        assert_eq!(primes, vec![2, 5, 11, 19, 31, 53, 83]);
    }

    #[test]
    fn test_growth_near_one_emits_every_prime() {
        let primes: Vec<u32> = generate_table(1000, 1.000_001).unwrap().collect();
        let expected: Vec<u32> = (0..1000u32)
            .filter(|&n| trial_division(u64::from(n)))
            .collect();
        assert_eq!(primes, expected);
    }

    #[test]
    fn test_invalid_growth() {
        for growth in [1.0, 0.5, -2.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                generate_table(100, growth),
                Err(PrimeError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.limit, 2147483647);
        assert!(config.validate().is_ok());
        let config = GeneratorConfig {
            limit: 100,
            growth: 1.0,
        };
        assert!(config.validate().is_err());
        assert!(config.generate().is_err());
        let config = GeneratorConfig {
            limit: 20,
            growth: 1.1,
        };
        assert_eq!(
            config.generate().unwrap().collect::<Vec<_>>(),
            vec![2, 3, 5, 7, 11, 13, 17, 19]
        );
    }

    #[test]
    fn test_format_table() {
        assert_eq!(format_table(Vec::new(), 6), "");
        assert_eq!(format_table([2u32, 3, 5], 6), "2, 3, 5");
        assert_eq!(format_table([2u32, 3, 5, 7, 11], 2), "2, 3,\n5, 7,\n11");
        assert_eq!(format_table([2u32, 3], 0), "2,\n3");
    }

    #[proptest(cases = 64)]
    fn test_generated_strictly_increasing_primes(
        #[strategy(0u32..50_000)] limit: u32,
        #[strategy(1.01f32..4.0)] growth: f32,
    ) {
        let primes: Vec<u32> = generate_table(limit, growth).unwrap().collect();
        prop_assert!(primes.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(primes.iter().all(|&p| p < limit));
        prop_assert!(primes.iter().all(|&p| trial_division(u64::from(p))));
        if limit > 2 {
            prop_assert_eq!(primes.first(), Some(&2));
        }
    }
}

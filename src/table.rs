//! Sparse prime table for sizing hash tables.

use crate::error::{PrimeError, Result};

/// Primes 1 .. 2<sup>31</sup>, spaced evenly in a logarithmic sense (roughly
/// x1.1 apart). Regenerate with `prime-after generate --growth 1.1`.
///
/// The leading 1 is not prime; it answers queries below 1.
#[rustfmt::skip]
pub const PRIME_LIST: [u32; 193] = [
    1, 2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 37,
    41, 47, 53, 59, 67, 79, 89, 101, 113, 127,
    149, 167, 191, 211, 233, 257, 283, 313, 347,
    383, 431, 479, 541, 599, 661, 733, 809, 907,
    1009, 1117, 1229, 1361, 1499, 1657, 1823,
    2011, 2213, 2437, 2683, 2953, 3251, 3581,
    3943, 4339, 4783, 5273, 5801, 6389, 7039,
    7753, 8537, 9391, 10331, 11369, 12511,
    13763, 15149, 16673, 18341, 20177, 22229,
    24469, 26921, 29629, 32603, 35869, 39461,
    43411, 47777, 52561, 57829, 63617, 69991,
    76991, 84691, 93169, 102497, 112757, 124067,
    136481, 150131, 165161, 181693, 199873,
    219871, 241861, 266051, 292661, 321947,
    354143, 389561, 428531, 471389, 518533,
    570389, 627433, 690187, 759223, 835207,
    918733, 1010617, 1111687, 1222889, 1345207,
    1479733, 1627723, 1790501, 1969567, 2166529,
    2383219, 2621551, 2883733, 3172123, 3489347,
    3838283, 4222117, 4644347, 5108813, 5619701,
    6181699, 6799889, 7479887, 8227883, 9050687,
    9955783, 10951363, 12046553, 13251233,
    14576381, 16034021, 17637437, 19401197,
    21341339, 23475481, 25823047, 28405367,
    31245911, 34370527, 37807591, 41588377,
    45747223, 50321981, 55354217, 60889649,
    66978673, 73676563, 81044231, 89148671,
    98063549, 107869939, 118656953, 130522661,
    143574929, 157932449, 173725751, 191098351,
    210208199, 231229043, 254351957, 279787171,
    307765891, 338542499, 372396793, 409636483,
    450600131, 495660161, 545226203, 599748823,
    659723717, 725696131, 798265729, 878092289,
    965901569, 1062491797, 1168741003,
    1285615151, 1414176653, 1555594373,
    1711153849, 1882269197, 2070496163,
];

/// Read-only view over an ascending list of table sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeTable<'a> {
    primes: &'a [u32],
}

impl PrimeTable<'static> {
    /// The embedded table.
    pub const STANDARD: Self = Self {
        primes: &PRIME_LIST,
    };
}

impl<'a> PrimeTable<'a> {
    /// Wraps `primes`, which must be non-empty and strictly increasing.
    pub fn new(primes: &'a [u32]) -> Result<Self> {
        if primes.is_empty() {
            return Err(PrimeError::InvalidTable("table is empty".to_string()));
        }
        if let Some(w) = primes.windows(2).find(|w| w[0] >= w[1]) {
            return Err(PrimeError::InvalidTable(format!(
                "{} is followed by {}",
                w[0], w[1]
            )));
        }
        Ok(Self { primes })
    }

    /// Determines a tabulated prime greater than `n`, but not too much
    /// greater. Useful for sizing a hash table so that modulo arithmetic
    /// produces good results.
    ///
    /// The table is sparse, so this is usually not the very next prime.
    pub fn find_after(&self, n: i64) -> Result<u32> {
        let max = self.max();
        if n >= i64::from(max) {
            return Err(PrimeError::OutOfRange { n, max });
        }
        let i = self.primes.partition_point(|&p| i64::from(p) <= n);
        Ok(self.primes[i])
    }

    /// [`find_after`](Self::find_after) for callers holding a capacity.
    pub fn find_after_usize(&self, n: usize) -> Result<usize> {
        let n = i64::try_from(n).map_err(|_| PrimeError::OutOfRange {
            n: i64::MAX,
            max: self.max(),
        })?;
        Ok(self.find_after(n)? as usize)
    }

    pub fn max(&self) -> u32 {
        self.primes[self.primes.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    pub fn as_slice(&self) -> &'a [u32] {
        self.primes
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + 'a {
        self.primes.iter().copied()
    }

    /// Entries without the leading sentinel 1, if present.
    pub fn primes(&self) -> impl Iterator<Item = u32> + 'a {
        self.iter().skip_while(|&p| p < 2)
    }
}

impl Default for PrimeTable<'static> {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Looks `n` up in the embedded table. See [`PrimeTable::find_after`].
pub fn find_after(n: i64) -> Result<u32> {
    PrimeTable::STANDARD.find_after(n)
}

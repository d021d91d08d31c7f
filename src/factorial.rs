//! Factorials over the small goal counts that the Poisson mass function is evaluated at.

pub trait Factorial {
    fn get(&self, n: u8) -> u64;
}

/// Computes `n!` on every call.
#[derive(Default)]
pub struct Calculator;

impl Factorial for Calculator {
    #[inline]
    fn get(&self, n: u8) -> u64 {
        assert!(n < MAX_ENTRIES as u8, "{n}! overflows");
        (2..=n as u64).product()
    }
}

/// `20!` is the largest factorial that fits in a `u64`.
const MAX_ENTRIES: usize = 21;

/// Serves `n!` from a table populated on construction.
pub struct Lookup {
    entries: [u64; MAX_ENTRIES],
}

impl Factorial for Lookup {
    #[inline]
    fn get(&self, n: u8) -> u64 {
        self.entries[n as usize]
    }
}

impl Default for Lookup {
    fn default() -> Self {
        let mut entries = [1u64; MAX_ENTRIES];
        for i in 2..MAX_ENTRIES {
            entries[i] = i as u64 * entries[i - 1];
        }
        Self { entries }
    }
}

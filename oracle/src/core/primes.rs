//! Prime factorization used by the Prime Factory level.

/// Supplies the prime factors of a non-negative integer.
pub trait PrimeFactors: Send + Sync {
    /// Prime factors of `n` in ascending order, with multiplicity.
    ///
    /// `0` and `1` have no prime factors.
    fn factors(&self, n: u64) -> Vec<u64>;
}

/// Trial division; plenty for the small values the levels use.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrialDivision;

impl PrimeFactors for TrialDivision {
    fn factors(&self, n: u64) -> Vec<u64> {
        let mut factors = Vec::new();
        if n < 2 {
            return factors;
        }
        let mut rest = n;
        let mut divisor = 2u64;
        while divisor.saturating_mul(divisor) <= rest {
            while rest % divisor == 0 {
                factors.push(divisor);
                rest /= divisor;
            }
            divisor += if divisor == 2 { 1 } else { 2 };
        }
        if rest > 1 {
            factors.push(rest);
        }
        factors
    }
}

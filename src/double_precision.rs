use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A value paired with the rounding error accumulated while building it.
///
/// `value + error` is the best available estimate of the exact sum of every increment applied
/// so far. The error type differs from the value type for affine quantities: an instant carries
/// its error as a duration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DoublePrecision<T, E = T> {
    pub value: T,
    pub error: E,
}

impl<T, E> DoublePrecision<T, E> {
    #[inline]
    pub const fn with_error(value: T, error: E) -> Self {
        Self { value, error }
    }

    #[inline]
    pub fn new(value: T) -> Self
    where
        E: Default,
    {
        Self {
            value,
            error: E::default(),
        }
    }
}

impl<T, E> DoublePrecision<T, E>
where
    T: Add<E, Output = T> + Sub<T, Output = E> + Copy,
    E: Add<Output = E> + Copy,
{
    /// Adds `increment` using Kahan's compensated summation (Higham, Algorithm 4.2).
    #[inline]
    pub fn increment(&mut self, increment: E) {
        let temp = self.value;
        let y = increment + self.error;
        self.value = temp + y;
        self.error = (temp - self.value) + y;
    }

    #[inline]
    pub fn estimate(&self) -> T {
        self.value + self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_does_not_drift() {
        let mut naive = 0.0f64;
        let mut compensated = DoublePrecision::<f64>::default();
        for _ in 0..1_000_000 {
            naive += 0.1;
            compensated.increment(0.1);
        }

        assert!((naive - 100_000.0f64).abs() > 1e-7);
        assert!((compensated.value - 100_000.0f64).abs() <= 1.5e-11);
    }

    #[test]
    fn increment_keeps_small_increments() {
        let mut t = DoublePrecision::<f64>::new(1.0e16);
        for _ in 0..8 {
            t.increment(1.0);
        }

        assert_eq!(t.estimate(), 1.0e16 + 8.0);
    }
}

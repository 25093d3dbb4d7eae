//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A month of per-shift report rows is summed, max-reduced and            │
//! │  prorated before anything reaches a dashboard. Accumulating in          │
//! │  floats would drift; accumulating in integer yen cannot.                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Yen (i64)                                        │
//! │    All sales and expense amounts are whole yen. Ratios (margins,        │
//! │    achievement rates) are derived as f64 only at the output edge.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tempo_core::money::Money;
//!
//! let sales = Money::from_yen(850_000);
//! let purchase = Money::from_yen(272_000);
//! let gross = sales - purchase;
//! assert_eq!(gross.yen(), 578_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole yen.
///
/// ## Design Decisions
/// - **i64 (signed)**: operating profit can legitimately go negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support, serialized as a bare number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole yen.
    #[inline]
    pub const fn from_yen(yen: i64) -> Self {
        Money(yen)
    }

    /// Returns the value in whole yen.
    #[inline]
    pub const fn yen(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the larger of two amounts.
    ///
    /// The daily deduplicator collapses redundant same-day expense rows
    /// with this, never with addition.
    #[inline]
    pub fn max(self, other: Money) -> Money {
        Money(self.0.max(other.0))
    }

    /// Divides a monthly total into a per-day rate, rounding half up.
    ///
    /// ## Example
    /// ```rust
    /// use tempo_core::money::Money;
    ///
    /// let monthly_labor = Money::from_yen(900_000);
    /// assert_eq!(monthly_labor.prorate_per_day(30).yen(), 30_000);
    ///
    /// // Zero or negative day counts are clamped to one day.
    /// assert_eq!(monthly_labor.prorate_per_day(0).yen(), 900_000);
    /// ```
    ///
    /// Rounding is `floor(x + 0.5)` so that halves round up, matching
    /// how the dashboards have always displayed prorated figures.
    pub fn prorate_per_day(&self, open_days: i64) -> Money {
        let days = open_days.max(1);
        Money((self.0 + days / 2).div_euclid(days))
    }

    /// Returns this amount as a percentage of `base`, zero-guarded.
    ///
    /// `base <= 0` yields `0.0`, never NaN or infinity.
    pub fn percent_of(&self, base: Money) -> f64 {
        if base.is_positive() {
            (self.0 as f64 / base.0 as f64) * 100.0
        } else {
            0.0
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and log output. Frontend formatting handles
/// locale-aware display (thousands separators etc.).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "¥{}", self.0)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for day-count scaling).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, n: i64) -> Self {
        Money(self.0 * n)
    }
}

/// Summation of Money iterators.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yen() {
        let money = Money::from_yen(850_000);
        assert_eq!(money.yen(), 850_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_yen(1099)), "¥1099");
        assert_eq!(format!("{}", Money::from_yen(-550)), "¥-550");
        assert_eq!(format!("{}", Money::from_yen(0)), "¥0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_yen(1000);
        let b = Money::from_yen(500);

        assert_eq!((a + b).yen(), 1500);
        assert_eq!((a - b).yen(), 500);
        assert_eq!((a * 3).yen(), 3000);
    }

    #[test]
    fn test_max() {
        let a = Money::from_yen(272_000);
        let b = Money::from_yen(180_000);
        assert_eq!(a.max(b).yen(), 272_000);
        assert_eq!(b.max(a).yen(), 272_000);
    }

    #[test]
    fn test_prorate_per_day() {
        // 900,000 / 30 open days = 30,000 per day
        assert_eq!(Money::from_yen(900_000).prorate_per_day(30).yen(), 30_000);
        // 100 / 3 = 33.33... rounds to 33
        assert_eq!(Money::from_yen(100).prorate_per_day(3).yen(), 33);
        // Halves round up: 5 / 2 = 2.5 -> 3
        assert_eq!(Money::from_yen(5).prorate_per_day(2).yen(), 3);
        // Day counts below one are clamped
        assert_eq!(Money::from_yen(100).prorate_per_day(0).yen(), 100);
        assert_eq!(Money::from_yen(100).prorate_per_day(-5).yen(), 100);
    }

    #[test]
    fn test_percent_of() {
        let profit = Money::from_yen(150_000);
        let sales = Money::from_yen(600_000);
        assert!((profit.percent_of(sales) - 25.0).abs() < f64::EPSILON);

        // Zero base never produces NaN
        assert_eq!(profit.percent_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].iter().map(|y| Money::from_yen(*y)).sum();
        assert_eq!(total.yen(), 600);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_yen(100).is_positive());
        assert!(Money::from_yen(-100).is_negative());
    }
}

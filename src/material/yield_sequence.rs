use crate::base::{check_yield_strains, RangePolicy, Settings};
use crate::StrError;

/// Holds an ordered sequence of yield strains
///
/// The yield strains partition the equivalent strain axis into intervals
///
/// ```text
/// [εy₀, εy₁), [εy₁, εy₂), …, [εyₙ₋₂, εyₙ₋₁)
/// ```
///
/// Each interval `i` has an anchor (midpoint) and a width (half-length):
///
/// ```text
/// anchor(i) = (εyᵢ₊₁ + εyᵢ) / 2
/// width(i)  = (εyᵢ₊₁ - εyᵢ) / 2
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct YieldSequence {
    /// Holds the yield strains (strictly increasing)
    epsy: Vec<f64>,

    /// Handles equivalent strains outside [εy₀, εyₙ₋₁)
    policy: RangePolicy,
}

impl YieldSequence {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `epsy` -- nonnegative and strictly increasing yield strains (at least two)
    /// * `settings` -- if `init_elastic`, prepends -εy₀ such that the first interval is centred at zero
    pub fn new(epsy: &[f64], settings: &Settings) -> Result<Self, StrError> {
        check_yield_strains(epsy)?;
        let mut values = Vec::with_capacity(epsy.len() + 1);
        if settings.init_elastic {
            if epsy[0] <= 0.0 {
                return Err("the first yield strain must be > 0.0 to prepend an elastic interval");
            }
            values.push(-epsy[0]);
        }
        values.extend_from_slice(epsy);
        Ok(YieldSequence {
            epsy: values,
            policy: settings.range_policy,
        })
    }

    /// Returns the number of intervals
    #[inline]
    pub fn n_interval(&self) -> usize {
        self.epsy.len() - 1
    }

    /// Returns all (stored) yield strains
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.epsy
    }

    /// Returns the first and last (stored) yield strains
    #[inline]
    pub fn bounds(&self) -> (f64, f64) {
        (self.epsy[0], self.epsy[self.epsy.len() - 1])
    }

    /// Returns the range policy
    #[inline]
    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    /// Returns the yield strain at index i
    pub fn get(&self, i: usize) -> Result<f64, StrError> {
        match self.epsy.get(i) {
            Some(value) => Ok(*value),
            None => Err("yield strain index is out of range"),
        }
    }

    /// Locates the interval containing the equivalent strain
    ///
    /// Returns `i` such that `εyᵢ ≤ εd < εyᵢ₊₁` (binary search). A value equal to a yield strain
    /// belongs to the interval on its right. Values outside [εy₀, εyₙ₋₁) are handled according
    /// to the range policy: clamped to the first/last interval or rejected.
    pub fn locate(&self, epsd: f64) -> Result<usize, StrError> {
        if epsd.is_nan() {
            return Err("equivalent strain is NaN");
        }
        // number of yield strains ≤ εd
        let count = self.epsy.partition_point(|&y| y <= epsd);
        let last = self.n_interval() - 1;
        if count == 0 {
            return match self.policy {
                RangePolicy::Clamp => Ok(0),
                RangePolicy::Fail => Err("equivalent strain is outside the yield-strain range"),
            };
        }
        if count > last + 1 {
            return match self.policy {
                RangePolicy::Clamp => Ok(last),
                RangePolicy::Fail => Err("equivalent strain is outside the yield-strain range"),
            };
        }
        Ok(count - 1)
    }

    /// Returns the anchor (midpoint) of interval i
    #[inline]
    pub fn anchor(&self, i: usize) -> f64 {
        0.5 * (self.epsy[i + 1] + self.epsy[i])
    }

    /// Returns the width (half-length) of interval i
    #[inline]
    pub fn width(&self, i: usize) -> f64 {
        0.5 * (self.epsy[i + 1] - self.epsy[i])
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

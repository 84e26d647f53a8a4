//! Real-valued travel costs.
//!
//! `f64` has no total order, so it can't rank search nodes directly. Costs
//! go through `OrderedFloat`, and only values that make sense as edge
//! weights get in through [`FloatCost::try_new`].

use std::fmt::Debug;

use derive_more::Display;
use num_traits::One;
use num_traits::SaturatingAdd;
use num_traits::Zero;
use num_traits::bounds::UpperBounded;
use ordered_float::FloatCore;
use ordered_float::OrderedFloat;

use crate::cost::Cost;

/// A real-valued cost.
///
/// Infinity is the upper bound, so `valid()` rejects it like any other
/// saturated cost.
#[derive(Copy, Clone, Default, Debug, Display)]
#[repr(transparent)]
#[display("{_0}")]
pub struct FloatCost<F: FloatCore>(pub OrderedFloat<F>);

impl<F> Cost for FloatCost<F> where F: FloatCore + Debug + std::fmt::Display {}

impl<F> FloatCost<F>
where
    F: FloatCore,
{
    #[inline(always)]
    pub fn new(f: F) -> Self {
        Self(OrderedFloat(f))
    }

    /// Admits only costs usable as edge weights, that is, not NaN and not
    /// negative.
    ///
    /// ```
    /// use gps_search::float_cost::FloatCost;
    /// assert!(FloatCost::try_new(2.5f64).is_some());
    /// assert!(FloatCost::try_new(0.0f64).is_some());
    /// assert!(FloatCost::try_new(-1.0f64).is_none());
    /// assert!(FloatCost::try_new(f64::NAN).is_none());
    /// ```
    pub fn try_new(f: F) -> Option<Self> {
        if f.is_nan() || f < F::zero() {
            return None;
        }
        Some(Self::new(f))
    }

    #[inline(always)]
    pub fn infinity() -> Self {
        Self(OrderedFloat::infinity())
    }

    /// Rounds up to a whole cost.
    #[inline(always)]
    pub fn ceil(self) -> Self {
        Self::new(self.into_inner().ceil())
    }

    #[inline(always)]
    pub fn into_inner(self) -> F {
        self.0.into_inner()
    }
}

impl<F: FloatCore> std::ops::Add for FloatCost<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

/// Scaling, as in a detour factor over a straight line.
impl<F: FloatCore> std::ops::Mul for FloatCost<F> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl<F: FloatCore> std::ops::AddAssign for FloatCost<F> {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0 + rhs.0;
    }
}

// Infinity absorbs anything added to it, which is all the saturation needed.
impl<F: FloatCore> SaturatingAdd for FloatCost<F> {
    fn saturating_add(&self, rhs: &Self) -> Self {
        *self + *rhs
    }
}

impl<F: FloatCore> Zero for FloatCost<F> {
    #[inline(always)]
    fn zero() -> Self {
        Self::new(F::zero())
    }
    #[inline(always)]
    fn is_zero(&self) -> bool {
        self.into_inner().is_zero()
    }
}

impl<F: FloatCore> One for FloatCost<F> {
    #[inline(always)]
    fn one() -> Self {
        Self::new(F::one())
    }
}

impl<F: FloatCore> UpperBounded for FloatCost<F> {
    fn max_value() -> Self {
        Self::infinity()
    }
}

// Compared through `OrderedFloat`. Deriving would ask for `F: Ord`.
impl<F: FloatCore> PartialEq for FloatCost<F> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<F: FloatCore> Eq for FloatCost<F> {}

impl<F: FloatCore> PartialOrd for FloatCost<F> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<F: FloatCore> Ord for FloatCost<F> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_one() {
        assert!(FloatCost::<f64>::zero().is_zero());
        assert!(FloatCost::new(-0.0f64).is_zero());
        assert_eq!(FloatCost::<f64>::one().into_inner(), 1.0);
        assert!(FloatCost::<f64>::zero().valid());
    }

    #[test]
    fn order() {
        assert!(FloatCost::new(1.0f64) < FloatCost::new(1.5f64));
        assert!(FloatCost::new(0.0f64) == FloatCost::new(0.0f64));
        assert!(FloatCost::new(1e9f64) < FloatCost::infinity());
    }

    #[test]
    fn accumulate() {
        let mut f = FloatCost::new(0.0f64);
        f += FloatCost::new(75.0f64);
        f += FloatCost::new(120.0f64);
        assert_eq!(f, FloatCost::new(195.0f64));
        assert!(f.valid());

        f += FloatCost::infinity();
        assert_eq!(f, FloatCost::max_value());
        assert!(!f.valid());
        assert_eq!(f.saturating_add(&FloatCost::new(1.0)), FloatCost::infinity());
    }

    #[test]
    fn detours() {
        let straight: FloatCost<f64> = FloatCost::new(100.2);
        assert_eq!((straight * FloatCost::new(1.5)).ceil(), FloatCost::new(151.0));
        assert_eq!(straight * FloatCost::one(), straight);
        assert_eq!(FloatCost::new(3.0f64).ceil(), FloatCost::new(3.0));
    }

    #[test]
    fn display() {
        assert_eq!(FloatCost::new(520.0f64).to_string(), "520");
        assert_eq!(FloatCost::new(2.5f64).to_string(), "2.5");
    }
}

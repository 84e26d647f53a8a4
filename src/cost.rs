/// A path cost.
///
/// Costs are accumulated along paths and compared to rank search nodes, so
/// they need a total order. The upper bound stands for "unreachable".
pub trait Cost:
    Copy
    + std::fmt::Debug
    + std::fmt::Display
    + PartialEq
    + core::cmp::Eq
    + PartialOrd
    + Ord
    + num_traits::SaturatingAdd
    + num_traits::bounds::UpperBounded
    + num_traits::Zero
    + num_traits::One
    + std::ops::Add<Self, Output = Self>
    + std::ops::AddAssign
{
    #[inline(always)]
    fn valid(&self) -> bool {
        *self != num_traits::bounds::UpperBounded::max_value()
    }
}

impl Cost for u32 {}
impl Cost for u64 {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_costs() {
        assert!(7u32.valid());
        assert!(!u32::MAX.valid());
        assert!(!u64::MAX.valid());
        assert_eq!(num_traits::SaturatingAdd::saturating_add(&u32::MAX, &1), u32::MAX);
    }
}

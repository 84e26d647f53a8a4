// Arg-min over the children of a heap node.
//
// Runs a tournament instead of a left-to-right scan so comparisons within a
// round don't depend on each other. Ties go to the left-most candidate.
//
// 0   1   2   3   4   5   6   7
// *   *   *   *   *   *   *   *
//  \ /     \ /     \ /     \ /
//   *       *       *       *
//    \     /         \     /
//       *               *
//        \             /
//               *

/// Widest slice that still gets a tournament.
const MAX_TOURNAMENT: usize = 8usize;

/// Core comparison and index selection
#[inline(always)]
#[must_use]
fn fight<T: PartialOrd>(a: &[T], l: usize, r: usize) -> usize {
    if a[l] <= a[r] { l } else { r }
}

#[inline(always)]
#[must_use]
fn tournament<T: PartialOrd>(a: &[T], from: usize, to: usize) -> usize {
    debug_assert!(from < to);
    match to - from {
        1 => from,
        2 => fight(a, from, from + 1),
        n => {
            let mid = from + n.div_ceil(2);
            fight(a, tournament(a, from, mid), tournament(a, mid, to))
        }
    }
}

/// Index of the smallest element.
///
/// ```
/// use gps_search::derank::derank;
/// assert_eq!(derank(&[3u8, 1, 2]), 1);
/// assert_eq!(derank(&[0u8, 0, 0]), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn derank<T: PartialOrd>(a: &[T]) -> usize {
    debug_assert!(!a.is_empty(), "Can't derank an empty slice");
    if a.len() <= MAX_TOURNAMENT {
        tournament(a, 0, a.len())
    } else {
        linear_min_index(a)
    }
}

pub fn linear_min_index<T: PartialOrd>(xs: &[T]) -> usize {
    assert!(!xs.is_empty());

    let mut min_i = 0;
    for (i, x) in xs.iter().enumerate() {
        if *x < xs[min_i] {
            min_i = i;
        }
    }
    min_i
}

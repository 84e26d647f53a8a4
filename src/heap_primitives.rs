// Index arithmetic for array-backed heaps of arity `A`.
//
// A heap is a tree-like structure where every subtree's root has a better rank
// than all the other nodes in the subtree. For `A = 2`,
//
// ```text
//                           0
//              1                         2
//       3            4            5             6
//   7      8      9     10    11     12     13     14
// 15 16  17 18  19 20  21 22 23 24  25
// ```
//
// The last level will often be incomplete.

/// The parent node
///
/// ```
/// use gps_search::heap_primitives::index_parent;
/// assert_eq!(index_parent::<2>(1), 0);
/// assert_eq!(index_parent::<2>(2), 0);
/// assert_eq!(index_parent::<2>(25), 12);
/// assert_eq!(index_parent::<8>(8), 0);
/// assert_eq!(index_parent::<8>(9), 1);
/// ```
#[inline(always)]
#[must_use]
pub fn index_parent<const A: usize>(i: usize) -> usize {
    debug_assert!(i != 0, "The root has no parent");
    (i - 1) / A
}

/// The first children
///
/// ```
/// use gps_search::heap_primitives::index_first_children;
/// assert_eq!(index_first_children::<2>(0), 1);
/// assert_eq!(index_first_children::<2>(11), 23);
/// assert_eq!(index_first_children::<8>(1), 9);
/// ```
#[inline(always)]
#[must_use]
pub fn index_first_children<const A: usize>(i: usize) -> usize {
    (A * i) + 1
}

/// The last children
///
/// ```
/// use gps_search::heap_primitives::index_last_children;
/// assert_eq!(index_last_children::<2>(0), 2);
/// assert_eq!(index_last_children::<2>(6), 14);
/// assert_eq!(index_last_children::<8>(0), 8);
/// ```
#[inline(always)]
#[must_use]
pub fn index_last_children<const A: usize>(i: usize) -> usize {
    A * (i + 1)
}

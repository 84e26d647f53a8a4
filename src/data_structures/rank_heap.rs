use std::cmp::min;
use std::fmt::Debug;

use crate::derank::derank;

const HEAP_ARITY: usize = 8usize;
#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    crate::heap_primitives::index_parent::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_left(i: usize) -> usize {
    crate::heap_primitives::index_first_children::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_right(i: usize) -> usize {
    crate::heap_primitives::index_last_children::<HEAP_ARITY>(i)
}

/// A min-heap of ranked entries.
///
/// Entries are never re-ranked in place. Searches push a new entry when they
/// find a better path and drop the stale one when it surfaces, so there's no
/// need to track where each entry lives.
#[derive(Debug, Clone)]
pub struct RankHeap<N>
where
    N: Debug + Ord,
{
    heap: Vec<N>,
}

impl<N> RankHeap<N>
where
    N: Debug + Ord,
{
    pub fn new() -> Self {
        Self { heap: vec![] }
    }
    pub fn with_capacity(s: usize) -> Self {
        Self {
            heap: Vec::with_capacity(s),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn push(&mut self, n: N) {
        self.verify_heap();
        let heap_index = self.heap.len(); // Future heap_index

        self.heap.push(n);
        self.sift_up(heap_index);

        self.verify_heap();
    }

    pub fn pop(&mut self) -> Option<N> {
        self.verify_heap();

        if self.heap.len() <= 1 {
            return self.heap.pop();
        }

        let top = self.pop_non_trivial_heap();
        self.verify_heap();
        Some(top)
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap(&self) {
        // All good... (hopefully)
    }

    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap(&self) {
        // Every node goes after its parent node, if any.
        for i in 1..self.heap.len() {
            let p = up(i);
            debug_assert!(
                self.heap[p] <= self.heap[i],
                "Node[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.heap[p],
                self.heap[i],
                self.heap.len(),
            );
        }
    }

    /// Pops the top node from a Heap with at least 2 elements.
    ///
    /// Works by unfairly sifting down the top-node to the last level, where it
    /// can be swapped with the very last element of the array and popped.
    /// Temporarily breaks invariants around the node sifting down unfairly.
    fn pop_non_trivial_heap(&mut self) -> N {
        debug_assert!(
            self.heap.len() > 1,
            "It doesn't get easier. Why are you calling this?"
        );

        // 1. We pretend there's a hole at the root, and bubble elements up
        //    till the hole reaches the bottom.
        // 2. If the hole is not the last element, we swap it for the last one.
        // 3. Now the last element is the one that was at the top of the heap,
        //    we pop it.
        let len = self.heap.len();
        let last = len - 1;

        let mut hole = 0;
        let mut child = down_left(hole);
        while child < len {
            debug_assert_eq!(child + HEAP_ARITY, down_right(hole) + 1);
            child += derank(&self.heap[child..min(child + HEAP_ARITY, len)]);

            self.heap.swap(hole, child);
            hole = child;
            child = down_left(hole);
        }
        // NOTE: The hole made it to the last level, but it may not be at the
        // end of the array.
        debug_assert!(hole <= last, "The hole={hole} is > last={last}");
        if hole != last {
            self.heap.swap(hole, last);
            self.sift_up(hole);
        }

        // `hole` starts at 0 so the loop always leaves an element behind.
        match self.heap.pop() {
            Some(top) => top,
            None => unreachable!("Popped from a heap with at least 2 elements"),
        }
    }

    /// Raises a node
    /// Returns it's new index
    #[inline(always)]
    fn sift_up(&mut self, index: usize) -> usize {
        debug_assert!(index < self.heap.len(), "Index out of bounds...");

        let mut pos = index;
        while pos != 0 {
            let parent = up(pos);
            if self.heap[parent] <= self.heap[pos] {
                break;
            }
            self.heap.swap(parent, pos);
            pos = parent;
        }
        pos
    }
}

impl<N> Default for RankHeap<N>
where
    N: Debug + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

//! Frontier disciplines.
//!
//! A frontier decides which generated node is expanded next. The engine only
//! ever talks to the `Frontier` trait, so each algorithm is just a frontier
//! plus the duplicate policy it needs to stay correct.

use std::fmt::Debug;
use std::marker::PhantomData;

use crate::data_structures::rank_heap::RankHeap;
use crate::search::SearchTreeIndex;
use crate::space::Cost;

/// How the engine treats nodes whose state was reached before.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Duplicates {
    /// A state is enqueued at most once. The first path to reach it wins.
    Reached,
    /// Every child is enqueued. Entries for states already expanded at no
    /// greater cost are dropped as they get popped.
    Bounded,
}

pub trait Frontier<C: Cost>: Debug + Default {
    /// Name used when logging.
    const NAME: &'static str;
    const DUPLICATES: Duplicates;

    /// Adds a node with its cost so far (`g`) and estimated cost to go (`h`).
    fn push(&mut self, node_index: SearchTreeIndex, g: C, h: C);
    fn pop(&mut self) -> Option<SearchTreeIndex>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The ranking key of a cost-ordered frontier.
///
/// `sequence` is the push order. Ranks must fall back to it on ties so equal
/// ranks pop first-in first-out and runs are reproducible.
pub trait Rank<C: Cost>: Copy + Debug + Ord {
    const NAME: &'static str;

    fn new(g: C, h: C, sequence: u64) -> Self;
}

/// A heap node
///
/// Heap nodes carry just ranking information and a reference/index to the
/// actual search nodes. This allows heap operations to move as little data as
/// possible.
#[derive(Debug, Clone, Copy)]
pub struct RankedNode<R> {
    /// The rank of this node that defines how good it is.
    pub rank: R,
    /// The index of this node in the Search Tree. Ignored when ranking.
    pub node_index: SearchTreeIndex,
}

/// PartialEq is forwarded to self.rank's PartialEq
impl<R: Ord> PartialEq for RankedNode<R> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.rank.eq(&other.rank)
    }
}
impl<R: Ord> Eq for RankedNode<R> {}

/// PartialOrd is forwarded to Ord::cmp
impl<R: Ord> PartialOrd for RankedNode<R> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
/// Ord is forwarded to self.rank's Ord
impl<R: Ord> Ord for RankedNode<R> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// A best-first frontier, ordered by `R`.
#[derive(Debug)]
pub struct RankedFrontier<C, R>
where
    C: Cost,
    R: Rank<C>,
{
    open: RankHeap<RankedNode<R>>,
    /// Number of pushes so far, used to break ties.
    sequence: u64,

    _phantom_cost: PhantomData<C>,
}

impl<C, R> Default for RankedFrontier<C, R>
where
    C: Cost,
    R: Rank<C>,
{
    fn default() -> Self {
        Self {
            open: RankHeap::with_capacity(64),
            sequence: 0,
            _phantom_cost: PhantomData,
        }
    }
}

impl<C, R> Frontier<C> for RankedFrontier<C, R>
where
    C: Cost,
    R: Rank<C>,
{
    const NAME: &'static str = R::NAME;
    const DUPLICATES: Duplicates = Duplicates::Bounded;

    #[inline(always)]
    fn push(&mut self, node_index: SearchTreeIndex, g: C, h: C) {
        let rank = R::new(g, h, self.sequence);
        self.sequence += 1;
        self.open.push(RankedNode { rank, node_index });
    }

    #[inline(always)]
    fn pop(&mut self) -> Option<SearchTreeIndex> {
        self.open.pop().map(|n| n.node_index)
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.open.len()
    }
}

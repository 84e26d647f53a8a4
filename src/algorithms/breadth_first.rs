//! Breadth-first graph search.
//!
//! Expands states by increasing number of actions from the initial state, so
//! the first goal found is reached through the fewest edges. Costs are
//! carried along but never looked at.

use std::collections::VecDeque;

use crate::algorithms::frontier::Duplicates;
use crate::algorithms::frontier::Frontier;
use crate::algorithms::graph_search::GraphSearch;
use crate::algorithms::graph_search::SearchOutcome;
use crate::problem::Problem;
use crate::problem::ZeroHeuristic;
use crate::search::SearchTreeIndex;
use crate::space::Action;
use crate::space::Cost;
use crate::space::Space;
use crate::space::State;

/// A first-in first-out frontier.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<SearchTreeIndex>,
}

impl<C: Cost> Frontier<C> for FifoFrontier {
    const NAME: &'static str = "BFS";
    const DUPLICATES: Duplicates = Duplicates::Reached;

    #[inline(always)]
    fn push(&mut self, node_index: SearchTreeIndex, _g: C, _h: C) {
        self.queue.push_back(node_index);
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<SearchTreeIndex> {
        self.queue.pop_front()
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.queue.len()
    }
}

pub type BreadthFirstSearch<'p, P, Sp, St, A, C> =
    GraphSearch<'p, P, ZeroHeuristic, FifoFrontier, Sp, St, A, C>;

/// Finds the goal closest to the initial state in number of actions.
pub fn breadth_first_graph_search<P, Sp, St, A, C>(problem: &P) -> SearchOutcome<St, A, C>
where
    P: Problem<Sp, St, A, C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    BreadthFirstSearch::<P, Sp, St, A, C>::new(problem, ZeroHeuristic).run()
}

//! Depth-first graph search.
//!
//! Always expands the most recently generated node. Among the successors of
//! a state the last one listed is tried first.

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

/// A last-in first-out frontier.
#[derive(Debug, Default)]
pub struct LifoFrontier {
    stack: Vec<SearchTreeIndex>,
}

impl<C: Cost> Frontier<C> for LifoFrontier {
    const NAME: &'static str = "DFS";
    const DUPLICATES: Duplicates = Duplicates::Reached;

    #[inline(always)]
    fn push(&mut self, node_index: SearchTreeIndex, _g: C, _h: C) {
        self.stack.push(node_index);
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<SearchTreeIndex> {
        self.stack.pop()
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.stack.len()
    }
}

pub type DepthFirstSearch<'p, P, Sp, St, A, C> =
    GraphSearch<'p, P, ZeroHeuristic, LifoFrontier, Sp, St, A, C>;

/// Finds a goal by diving as deep as possible before backtracking.
///
/// The solution is not optimal in any sense.
pub fn depth_first_graph_search<P, Sp, St, A, C>(problem: &P) -> SearchOutcome<St, A, C>
where
    P: Problem<Sp, St, A, C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    DepthFirstSearch::<P, Sp, St, A, C>::new(problem, ZeroHeuristic).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::map::MapProblem;
    use crate::problems::map::MapSpace;
    use crate::problems::romania::romania;

    #[test]
    fn romania_mehadia_to_fagaras() {
        let problem = MapProblem::new(romania(), "M", "F").unwrap();
        let outcome = depth_first_graph_search(&problem);

        let route = problem.space().route(&outcome.states().unwrap());
        assert_eq!(route, ["M", "L", "T", "A", "S", "F"]);
        assert_eq!(outcome.cost().map(|c| c.into_inner()), Some(538.0));
        assert_eq!(outcome.generated(), 20);
        assert_eq!(outcome.visited(), 18);
    }

    #[test]
    fn follows_the_last_successor_first() {
        let space = MapSpace::try_from(indoc::indoc! {"
            location A
            location B
            location C
            location D
            one-way A B 1
            one-way A C 1
            one-way C D 1
            one-way B D 1
        "})
        .unwrap();
        let problem = MapProblem::new(space, "A", "D").unwrap();
        let outcome = depth_first_graph_search(&problem);

        assert_eq!(problem.space().route(&outcome.states().unwrap()), ["A", "C", "D"]);
        // A, C, D. B is generated but never expanded.
        assert_eq!(outcome.visited(), 3);
        assert_eq!(outcome.generated(), 4);
    }

    #[test]
    fn initial_state_is_a_goal() {
        let problem = MapProblem::new(romania(), "B", "B").unwrap();
        let outcome = depth_first_graph_search(&problem);

        assert_eq!(outcome.states().map(|s| s.len()), Some(1));
        assert_eq!(outcome.actions(), Some(vec![]));
        assert_eq!(outcome.generated(), 1);
        assert_eq!(outcome.visited(), 1);
    }
}

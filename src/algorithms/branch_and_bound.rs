//! Branch-and-bound (uniform-cost) graph search.
//!
//! Always extends the cheapest partial path, so the first goal popped is
//! reached at minimum cost.

use crate::algorithms::frontier::Rank;
use crate::algorithms::frontier::RankedFrontier;
use crate::algorithms::graph_search::GraphSearch;
use crate::algorithms::graph_search::SearchOutcome;
use crate::problem::Problem;
use crate::problem::ZeroHeuristic;
use crate::space::Action;
use crate::space::Cost;
use crate::space::Space;
use crate::space::State;

/// Ranks by path cost, then by push order.
///
/// Field order matters, the derived `Ord` is lexicographic.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CostRank<C: Cost> {
    pub g: C,
    pub sequence: u64,
}

impl<C: Cost> Rank<C> for CostRank<C> {
    const NAME: &'static str = "Branch-and-bound";

    #[inline(always)]
    fn new(g: C, _h: C, sequence: u64) -> Self {
        Self { g, sequence }
    }
}

pub type CostFrontier<C> = RankedFrontier<C, CostRank<C>>;

pub type BranchAndBoundSearch<'p, P, Sp, St, A, C> =
    GraphSearch<'p, P, ZeroHeuristic, CostFrontier<C>, Sp, St, A, C>;

/// Finds a cheapest path to any goal.
pub fn branch_and_bound_graph_search<P, Sp, St, A, C>(problem: &P) -> SearchOutcome<St, A, C>
where
    P: Problem<Sp, St, A, C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    BranchAndBoundSearch::<P, Sp, St, A, C>::new(problem, ZeroHeuristic).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::breadth_first::breadth_first_graph_search;
    use crate::problems::map::MapProblem;
    use crate::problems::map::MapSpace;
    use crate::problems::romania::romania;

    #[test]
    fn ranks_break_ties_by_sequence() {
        let a = CostRank { g: 3u32, sequence: 7 };
        let b = CostRank { g: 3u32, sequence: 2 };
        let c = CostRank { g: 2u32, sequence: 9 };
        assert!(c < b);
        assert!(b < a);
    }

    #[test]
    fn romania_mehadia_to_fagaras() {
        let problem = MapProblem::new(romania(), "M", "F").unwrap();
        let outcome = branch_and_bound_graph_search(&problem);

        let route = problem.space().route(&outcome.states().unwrap());
        assert_eq!(route, ["M", "D", "C", "R", "S", "F"]);
        assert_eq!(outcome.cost().map(|c| c.into_inner()), Some(520.0));
        assert_eq!(outcome.generated(), 36);
        assert_eq!(outcome.visited(), 14);
        assert_eq!(outcome.statistics().discarded, 13);
        assert_eq!(outcome.statistics().reopened, 0);
    }

    #[test]
    fn romania_is_cheaper_than_bfs() {
        for (start, goal) in [("A", "B"), ("B", "A"), ("O", "E")] {
            let problem = MapProblem::new(romania(), start, goal).unwrap();
            let bfs = breadth_first_graph_search(&problem);
            let bnb = branch_and_bound_graph_search(&problem);
            assert!(bnb.cost() <= bfs.cost(), "{start} -> {goal}");
        }

        let problem = MapProblem::new(romania(), "A", "B").unwrap();
        let outcome = branch_and_bound_graph_search(&problem);
        let route = problem.space().route(&outcome.states().unwrap());
        assert_eq!(route, ["A", "S", "R", "P", "B"]);
        assert_eq!(outcome.cost().map(|c| c.into_inner()), Some(418.0));
        assert_eq!(outcome.generated(), 31);
        assert_eq!(outcome.visited(), 13);
    }

    #[test]
    fn takes_the_long_way_when_cheaper() {
        let space = MapSpace::try_from(indoc::indoc! {"
            location A
            location B
            location C
            road A B 1
            road B C 1
            road A C 5
        "})
        .unwrap();
        let problem = MapProblem::new(space, "A", "C").unwrap();
        let outcome = branch_and_bound_graph_search(&problem);

        assert_eq!(problem.space().route(&outcome.states().unwrap()), ["A", "B", "C"]);
        assert_eq!(outcome.cost().map(|c| c.into_inner()), Some(2.0));
        // The root, B and C from A, then A and C again from B.
        assert_eq!(outcome.generated(), 5);
        assert_eq!(outcome.visited(), 3);
        // A popped again after B.
        assert_eq!(outcome.statistics().discarded, 1);

        let path = outcome.path().unwrap();
        assert_eq!(path.len(), 2);
        assert!(problem.space().valid_path(&path));
    }

    #[test]
    fn zero_cost_roads() {
        let space = MapSpace::try_from(indoc::indoc! {"
            location A
            location B
            location C
            road A B 0
            road B C 0
            road A C 1
        "})
        .unwrap();
        let problem = MapProblem::new(space, "A", "C").unwrap();
        let outcome = branch_and_bound_graph_search(&problem);

        assert_eq!(outcome.cost().map(|c| c.into_inner()), Some(0.0));
        assert_eq!(outcome.node().map(|n| n.depth()), Some(2));
        assert_eq!(outcome.generated(), 5);
        assert_eq!(outcome.statistics().discarded, 1);
    }

    #[test]
    fn unreachable_goal_expands_every_reachable_state_once() {
        let space = MapSpace::try_from(indoc::indoc! {"
            location A
            location B
            location C
            location D
            location E
            location F
            road A B 1
            road B C 1
            road C D 1
            road D A 1
            road E F 1
        "})
        .unwrap();
        let problem = MapProblem::new(space, "A", "F").unwrap();
        let outcome = branch_and_bound_graph_search(&problem);

        assert!(!outcome.is_solved());
        assert_eq!(outcome.visited(), 4);
        // Every road out of A, B, C and D, plus the root.
        assert_eq!(outcome.generated(), 9);
        assert_eq!(outcome.statistics().discarded, 5);
    }
}

//! Branch-and-bound with an underestimate of the remaining cost.
//!
//! Partial paths are ranked by `f = g + h`. With an admissible `h` the first
//! goal popped is still optimal, and usually far fewer nodes get expanded
//! than with plain branch-and-bound.

use crate::algorithms::frontier::Rank;
use crate::algorithms::frontier::RankedFrontier;
use crate::algorithms::graph_search::GraphSearch;
use crate::algorithms::graph_search::SearchOutcome;
use crate::problem::Heuristic;
use crate::problem::Problem;
use crate::space::Action;
use crate::space::Cost;
use crate::space::Space;
use crate::space::State;

/// Ranks by estimated total cost, then by push order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EstimateRank<C: Cost> {
    pub f: C,
    pub sequence: u64,
}

impl<C: Cost> Rank<C> for EstimateRank<C> {
    const NAME: &'static str = "Branch-and-bound+underestimation";

    #[inline(always)]
    fn new(g: C, h: C, sequence: u64) -> Self {
        Self {
            f: g.saturating_add(&h),
            sequence,
        }
    }
}

pub type EstimateFrontier<C> = RankedFrontier<C, EstimateRank<C>>;

pub type UnderestimationSearch<'p, P, H, Sp, St, A, C> =
    GraphSearch<'p, P, H, EstimateFrontier<C>, Sp, St, A, C>;

/// Finds a cheapest path to any goal, guided by `heuristic`.
///
/// Optimality needs `heuristic` to be admissible. That is not checked while
/// searching, but estimates exceeding the cost left along the returned path
/// are logged and counted in [`SearchStatistics::overestimates`].
///
/// [`SearchStatistics::overestimates`]: crate::algorithms::graph_search::SearchStatistics::overestimates
pub fn branch_and_bound_with_underestimation_graph_search<P, H, Sp, St, A, C>(
    problem: &P,
    heuristic: H,
) -> SearchOutcome<St, A, C>
where
    P: Problem<Sp, St, A, C>,
    H: Heuristic<P, Sp, St, A, C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    UnderestimationSearch::<P, H, Sp, St, A, C>::new(problem, heuristic).run()
}

//! Implementation of search algorithms.
//!
//! All of them are the same graph search driven by a different frontier, so
//! they can do path-finding on any generic search problem.

use derive_more::Display;

pub mod branch_and_bound;
pub mod breadth_first;
pub mod depth_first;
pub mod frontier;
pub mod graph_search;
pub mod underestimation;

pub use branch_and_bound::branch_and_bound_graph_search;
pub use breadth_first::breadth_first_graph_search;
pub use depth_first::depth_first_graph_search;
pub use graph_search::SearchOutcome;
pub use graph_search::SearchStatistics;
pub use underestimation::branch_and_bound_with_underestimation_graph_search;

use crate::problem::Heuristic;
use crate::problem::Problem;
use crate::space::Action;
use crate::space::Cost;
use crate::space::Space;
use crate::space::State;

/// The available algorithms, for drivers that pick them at runtime.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    #[display("BFS")]
    #[value(name = "bfs")]
    BreadthFirst,
    #[display("DFS")]
    #[value(name = "dfs")]
    DepthFirst,
    #[display("Branch-and-bound")]
    #[value(name = "bnb")]
    BranchAndBound,
    #[display("Branch-and-bound+underestimation")]
    #[value(name = "bnb-h")]
    BranchAndBoundUnderestimation,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
        Algorithm::BranchAndBound,
        Algorithm::BranchAndBoundUnderestimation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::BreadthFirst => "BFS",
            Algorithm::DepthFirst => "DFS",
            Algorithm::BranchAndBound => "Branch-and-bound",
            Algorithm::BranchAndBoundUnderestimation => "Branch-and-bound+underestimation",
        }
    }

    /// Runs the algorithm. Only the underestimating one looks at the
    /// heuristic.
    pub fn run<P, H, Sp, St, A, C>(&self, problem: &P, heuristic: H) -> SearchOutcome<St, A, C>
    where
        P: Problem<Sp, St, A, C>,
        H: Heuristic<P, Sp, St, A, C>,
        Sp: Space<St, A, C>,
        St: State,
        A: Action,
        C: Cost,
    {
        match self {
            Algorithm::BreadthFirst => breadth_first_graph_search(problem),
            Algorithm::DepthFirst => depth_first_graph_search(problem),
            Algorithm::BranchAndBound => branch_and_bound_graph_search(problem),
            Algorithm::BranchAndBoundUnderestimation => {
                branch_and_bound_with_underestimation_graph_search(problem, heuristic)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rustc_hash::FxHashMap;

    use super::*;
    use crate::problems::map::LocationId;
    use crate::problems::map::MapProblem;
    use crate::problems::map::MapSpace;
    use crate::problems::map::StraightLineDistance;

    /// Fewest edges from `start` to every reachable location.
    fn edge_distances(space: &MapSpace, start: LocationId) -> FxHashMap<LocationId, usize> {
        let mut distances = FxHashMap::default();
        distances.insert(start, 0);
        let mut queue = VecDeque::from([start]);
        while let Some(s) = queue.pop_front() {
            let d = distances[&s];
            for (n, _) in space.neighbours(&s) {
                if !distances.contains_key(&n) {
                    distances.insert(n, d + 1);
                    queue.push_back(n);
                }
            }
        }
        distances
    }

    /// Sparse enough for some goals to be out of reach.
    fn random_problems() -> impl Iterator<Item = MapProblem> {
        (0..40u64).filter_map(|seed| {
            let mut r = ChaCha8Rng::seed_from_u64(seed);
            let space = MapSpace::random(&mut r, 30, 30);
            MapProblem::randomize(space, &mut r)
        })
    }

    #[test]
    fn names() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name(), algorithm.to_string());
        }
    }

    #[test]
    fn solves_iff_reachable() {
        let mut reachable_goals = 0;
        let mut unreachable_goals = 0;

        for problem in random_problems() {
            let space = problem.space();
            let goal = problem.goals()[0];
            let distances = edge_distances(space, problem.initial());
            let reachable = distances.contains_key(&goal);

            for algorithm in Algorithm::ALL {
                let outcome = algorithm.run(&problem, StraightLineDistance);
                assert_eq!(outcome.is_solved(), reachable, "{algorithm}");

                match outcome.path() {
                    Some(path) => {
                        reachable_goals += 1;
                        assert_eq!(path.start, Some(problem.initial()));
                        assert_eq!(path.end, Some(goal));
                        assert!(space.valid_path(&path), "{algorithm}: {path}");
                        assert!(outcome.generated() >= outcome.visited());
                        assert!(outcome.visited() >= 1);
                    }
                    None => {
                        unreachable_goals += 1;
                        if matches!(algorithm, Algorithm::BreadthFirst | Algorithm::DepthFirst) {
                            assert_eq!(outcome.generated(), distances.len(), "{algorithm}");
                        }
                        assert!(outcome.generated() >= distances.len(), "{algorithm}");
                    }
                }
            }
        }

        // Both cases got exercised.
        assert!(reachable_goals > 0);
        assert!(unreachable_goals > 0);
    }

    #[test]
    fn optimal_algorithms_agree() {
        for problem in random_problems() {
            let bnb = branch_and_bound_graph_search(&problem);
            let informed =
                branch_and_bound_with_underestimation_graph_search(&problem, StraightLineDistance);
            assert_eq!(bnb.cost(), informed.cost());
            assert!(informed.visited() <= bnb.visited());
            assert_eq!(informed.statistics().overestimates, 0);

            for uninformed in [
                breadth_first_graph_search(&problem),
                depth_first_graph_search(&problem),
            ] {
                assert_eq!(uninformed.is_solved(), bnb.is_solved());
                assert!(bnb.cost() <= uninformed.cost());
            }
        }
    }

    #[test]
    fn breadth_first_uses_fewest_edges() {
        for problem in random_problems() {
            let distances = edge_distances(problem.space(), problem.initial());
            let outcome = breadth_first_graph_search(&problem);
            assert_eq!(
                outcome.node().map(|n| n.depth()),
                distances.get(&problem.goals()[0]).copied()
            );
        }
    }

    #[test]
    fn runs_are_deterministic() {
        for problem in random_problems().take(10) {
            for algorithm in Algorithm::ALL {
                let first = algorithm.run(&problem, StraightLineDistance);
                let second = algorithm.run(&problem, StraightLineDistance);
                assert_eq!(first.states(), second.states(), "{algorithm}");
                assert_eq!(first.statistics(), second.statistics(), "{algorithm}");
            }
        }
    }
}

//! The graph-search engine shared by every algorithm.
//!
//! The loop is always the same,
//!
//! ```text
//! FRINGE --pop--> EXPAND --goal?--> DONE
//!   ^               |
//!   +----push-------+
//! ```
//!
//! and the frontier discipline decides everything else.

use std::marker::PhantomData;

use derive_more::Display;
use rustc_hash::FxHashMap;

use crate::algorithms::frontier::Duplicates;
use crate::algorithms::frontier::Frontier;
use crate::problem::Heuristic;
use crate::problem::Problem;
use crate::search::Node;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::SearchTreeNode;
use crate::space::Action;
use crate::space::Cost;
use crate::space::Path;
use crate::space::Space;
use crate::space::State;

/// Counters for a single search.
///
/// `generated` counts every node pushed into the frontier, the root
/// included. `visited` counts expansions. Nodes popped only to be thrown
/// away (their state was already expanded at least as cheaply) go to
/// `discarded` and never count as visited.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq)]
#[display(
    "generated={generated} visited={visited} discarded={discarded} reopened={reopened} max_frontier={max_frontier}"
)]
pub struct SearchStatistics {
    pub generated: usize,
    pub visited: usize,
    pub discarded: usize,
    /// Expanded states that got a cheaper path later on. Only inconsistent
    /// heuristics cause these.
    pub reopened: usize,
    pub max_frontier: usize,
    /// Nodes on the solution whose estimate exceeded the cost actually left.
    pub overestimates: usize,
}

/// What a search leaves behind.
///
/// Owns the search tree, so the solution (if any) can be walked back to the
/// initial state.
#[derive(Debug)]
pub struct SearchOutcome<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    search_tree: SearchTree<St, A, C>,
    terminal: Option<SearchTreeIndex>,
    statistics: SearchStatistics,
}

impl<St, A, C> SearchOutcome<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    /// The goal node, or `None` if the frontier ran out first.
    #[must_use]
    pub fn node(&self) -> Option<Node<'_, St, A, C>> {
        self.terminal.map(|i| self.search_tree.node(i))
    }
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.terminal.is_some()
    }
    #[must_use]
    pub fn generated(&self) -> usize {
        self.statistics.generated
    }
    #[must_use]
    pub fn visited(&self) -> usize {
        self.statistics.visited
    }
    #[must_use]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
    #[must_use]
    pub fn search_tree(&self) -> &SearchTree<St, A, C> {
        &self.search_tree
    }

    #[must_use]
    pub fn cost(&self) -> Option<C> {
        self.node().map(|n| n.path_cost())
    }
    /// States from the initial one to the goal.
    #[must_use]
    pub fn states(&self) -> Option<Vec<St>> {
        self.terminal.map(|i| self.search_tree.states(i))
    }
    #[must_use]
    pub fn actions(&self) -> Option<Vec<A>> {
        self.terminal.map(|i| self.search_tree.solution(i))
    }
    #[must_use]
    pub fn path(&self) -> Option<Path<St, A, C>> {
        self.terminal.map(|i| self.search_tree.to_path(i))
    }

    /// `(solution, generated, visited)`
    pub fn into_parts(self) -> (Option<Path<St, A, C>>, usize, usize) {
        (self.path(), self.generated(), self.visited())
    }
}

#[derive(Debug)]
pub struct GraphSearch<'p, P, H, F, Sp, St, A, C>
where
    P: Problem<Sp, St, A, C>,
    H: Heuristic<P, Sp, St, A, C>,
    F: Frontier<C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    problem: &'p P,
    heuristic: H,

    /// All the Search Nodes. Naturally forms a Search Tree as each node may
    /// have a parent Node.
    search_tree: SearchTree<St, A, C>,
    open: F,
    /// Amalgamation of,
    /// - The "Reached Set", states that were pushed at some point.
    /// - The "Closed Set", states that were expanded, with the `g` they were
    ///   last expanded at.
    reached: FxHashMap<St, Option<C>>,

    statistics: SearchStatistics,

    _phantom_space: PhantomData<Sp>,
    _phantom_action: PhantomData<A>,
}

impl<'p, P, H, F, Sp, St, A, C> GraphSearch<'p, P, H, F, Sp, St, A, C>
where
    P: Problem<Sp, St, A, C>,
    H: Heuristic<P, Sp, St, A, C>,
    F: Frontier<C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    /// Initialises the Search with the root node in the frontier.
    #[must_use]
    pub fn new(problem: &'p P, heuristic: H) -> Self {
        let mut search = Self {
            problem,
            heuristic,
            search_tree: SearchTree::new(),
            open: F::default(),
            reached: FxHashMap::default(),
            statistics: SearchStatistics::default(),
            _phantom_space: PhantomData,
            _phantom_action: PhantomData,
        };

        let root = SearchTreeNode::root(problem.initial());
        search.push(root);
        search
    }

    /// Runs the search until the first goal is popped or the frontier runs
    /// out.
    #[must_use]
    pub fn run(mut self) -> SearchOutcome<St, A, C> {
        let terminal = self.find_first_goal();

        match terminal {
            Some(goal_index) => {
                self.check_heuristic(goal_index);
                log::debug!(
                    "{}: found {:?} at cost {} ({})",
                    F::NAME,
                    self.search_tree[goal_index].state(),
                    self.search_tree[goal_index].path_cost(),
                    self.statistics
                );
            }
            None => {
                log::debug!("{}: exhausted ({})", F::NAME, self.statistics);
            }
        }

        SearchOutcome {
            search_tree: self.search_tree,
            terminal,
            statistics: self.statistics,
        }
    }

    fn find_first_goal(&mut self) -> Option<SearchTreeIndex> {
        while let Some(node_index) = self.open.pop() {
            let node = &self.search_tree[node_index];
            let state = *node.state();
            let g = node.path_cost();

            if self.is_dominated(&state, g) {
                self.statistics.discarded += 1;
                continue;
            }

            self.mark_closed(state, g);
            self.statistics.visited += 1;
            log::trace!("{}: expanding {state:?} (g={g})", F::NAME);

            if self.problem.is_goal(&state) {
                return Some(node_index);
            }

            for child in self.search_tree.expand(self.problem, node_index) {
                if self.should_push(&child) {
                    self.push(child);
                }
            }
        }

        None
    }

    /// Checks whether a popped node should be skipped.
    ///
    /// With `Duplicates::Reached` that's when its state was expanded
    /// already. With `Duplicates::Bounded` only when it was expanded at a
    /// cost no greater than this node's.
    #[inline(always)]
    fn is_dominated(&self, s: &St, g: C) -> bool {
        match (F::DUPLICATES, self.reached.get(s)) {
            (_, None) => unreachable!("Popped a state that was never reached"),
            (_, Some(None)) => false,
            (Duplicates::Reached, Some(Some(_))) => true,
            (Duplicates::Bounded, Some(Some(closed_g))) => *closed_g <= g,
        }
    }

    /// Decides whether a freshly generated child enters the frontier.
    ///
    /// Bounded frontiers take every child and sort duplicates out on pop.
    #[inline(always)]
    fn should_push(&self, child: &SearchTreeNode<St, A, C>) -> bool {
        match F::DUPLICATES {
            Duplicates::Reached => !self.reached.contains_key(child.state()),
            Duplicates::Bounded => true,
        }
    }

    /// Adds a node to the tree and the frontier, recording its state as
    /// reached.
    fn push(&mut self, node: SearchTreeNode<St, A, C>) {
        let s = *node.state();
        let g = node.path_cost();
        let h = self.heuristic.h(self.problem, &s);

        self.reached.entry(s).or_insert(None);
        let node_index = self.search_tree.push(node);
        self.open.push(node_index, g, h);

        self.statistics.generated += 1;
        self.statistics.max_frontier = self.statistics.max_frontier.max(self.open.len());
    }

    #[inline(always)]
    fn mark_closed(&mut self, s: St, g: C) {
        if let Some(Some(previous)) = self.reached.insert(s, Some(g)) {
            debug_assert!(g < previous, "Expanding {s:?} with g={g} again");
            self.statistics.reopened += 1;
        }
    }

    /// Looks for estimates on the solution that exceeded the cost that was
    /// actually left to the goal.
    ///
    /// Searching doesn't verify admissibility. This only flags it after the
    /// fact, along the returned path.
    fn check_heuristic(&mut self, goal_index: SearchTreeIndex) {
        let total = self.search_tree[goal_index].path_cost();

        for node_index in self.search_tree.path(goal_index) {
            let node = &self.search_tree[node_index];
            let g = node.path_cost();
            let h = self.heuristic.h(self.problem, node.state());
            // Compared as `g + h` against the total, so rounding in float
            // costs doesn't show up as an overestimate.
            if g.saturating_add(&h) > total {
                self.statistics.overestimates += 1;
                log::warn!(
                    "{}: heuristic overestimates at {:?}: g={g} + h={h} > {total} on the solution",
                    F::NAME,
                    node.state(),
                );
            }
        }
    }
}

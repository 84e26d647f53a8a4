use std::fmt::Debug;

use nonmax::NonMaxUsize;
use smallvec::SmallVec;

use crate::problem::Problem;
use crate::space::Action;
use crate::space::Cost;
use crate::space::NEIGHBOURS_INLINE;
use crate::space::Path;
use crate::space::Space;
use crate::space::State;

/// A reference to a `SearchTreeNode<St, A, C>`.
///
/// Nodes refer to their parent through these, so children never own their
/// parents and siblings share them. The niche keeps
/// `Option<(SearchTreeIndex, A)>` as small as the index itself for most
/// actions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchTreeIndex {
    index: NonMaxUsize,
}

impl SearchTreeIndex {
    #[inline(always)]
    fn new(index: usize) -> Self {
        debug_assert!(index != usize::MAX);
        // SAFETY: Indices come from `Vec::len()`, which is bounded by
        // `isize::MAX` for the non-zero-sized nodes we store.
        let index = unsafe { NonMaxUsize::new_unchecked(index) };
        Self { index }
    }

    #[inline(always)]
    pub fn as_usize(&self) -> usize {
        self.index.get()
    }
}

/// A search node.
///
/// Wraps a state with the move that reached it (`parent`) and the cost of
/// the whole path from the root (`g`).
#[derive(Clone, Debug, PartialEq)]
pub struct SearchTreeNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub(crate) parent: Option<(SearchTreeIndex, A)>,
    pub(crate) state: St,
    pub(crate) g: C,
    pub(crate) depth: usize,
}

impl<St, A, C> SearchTreeNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub fn root(s: St) -> Self {
        Self {
            parent: None,
            state: s,
            g: C::zero(),
            depth: 0,
        }
    }

    /// Builds the node reached from this one (stored at `index`) after
    /// taking `a` into `s`.
    pub fn child(&self, index: SearchTreeIndex, s: St, a: A, step_cost: C) -> Self {
        Self {
            parent: Some((index, a)),
            state: s,
            g: self.g.saturating_add(&step_cost),
            depth: self.depth + 1,
        }
    }

    #[inline(always)]
    pub fn state(&self) -> &St {
        &self.state
    }
    #[inline(always)]
    pub fn action(&self) -> Option<A> {
        self.parent.map(|(_, a)| a)
    }
    #[inline(always)]
    pub fn parent_index(&self) -> Option<SearchTreeIndex> {
        self.parent.map(|(p, _)| p)
    }
    #[inline(always)]
    pub fn path_cost(&self) -> C {
        self.g
    }
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Children of a node, before the search decides which ones to keep.
pub type Children<St, A, C> = SmallVec<[SearchTreeNode<St, A, C>; NEIGHBOURS_INLINE]>;

/// All the nodes created during a single search.
///
/// The tree only grows while searching. It's handed over with the result so
/// paths can be rebuilt after the search is gone.
pub struct SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    nodes: Vec<SearchTreeNode<St, A, C>>,
}

impl<St, A, C> SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    #[inline(always)]
    pub fn push(&mut self, node: SearchTreeNode<St, A, C>) -> SearchTreeIndex {
        debug_assert!(
            node.parent_index()
                .is_none_or(|p| p.as_usize() < self.nodes.len()),
            "Parents must be pushed before their children"
        );
        let index = SearchTreeIndex::new(self.nodes.len());
        self.nodes.push(node);
        index
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, index: SearchTreeIndex) -> Node<'_, St, A, C> {
        Node { tree: self, index }
    }

    /// Generates one child per successor of the node at `index`.
    ///
    /// Children are not added to the tree, the caller pushes the ones it
    /// keeps.
    pub fn expand<P, Sp>(&self, problem: &P, index: SearchTreeIndex) -> Children<St, A, C>
    where
        P: Problem<Sp, St, A, C>,
        Sp: Space<St, A, C>,
    {
        let node = &self[index];
        let s = node.state();
        problem
            .space()
            .neighbours(s)
            .into_iter()
            .map(|(next, a)| {
                let c = problem.step_cost(s, &a, &next);
                node.child(index, next, a, c)
            })
            .collect()
    }

    /// Node indices from the root to `index`, both included.
    #[must_use]
    pub fn path(&self, mut index: SearchTreeIndex) -> Vec<SearchTreeIndex> {
        let mut path = Vec::with_capacity(self[index].depth + 1);
        path.push(index);
        while let Some(parent_index) = self[index].parent_index() {
            debug_assert!(parent_index < index);
            path.push(parent_index);
            index = parent_index;
        }
        path.reverse();
        path
    }

    /// States from the root to `index`, both included.
    #[must_use]
    pub fn states(&self, index: SearchTreeIndex) -> Vec<St> {
        self.path(index).into_iter().map(|i| self[i].state).collect()
    }

    /// Actions taken from the root to reach `index`.
    #[must_use]
    pub fn solution(&self, index: SearchTreeIndex) -> Vec<A> {
        self.path(index)
            .into_iter()
            .filter_map(|i| self[i].action())
            .collect()
    }

    #[must_use]
    pub fn to_path(&self, index: SearchTreeIndex) -> Path<St, A, C> {
        let path = self.path(index);
        let start = self[path[0]].state;
        let end = &self[index];

        Path {
            start: Some(start),
            end: Some(end.state),
            cost: end.g,
            actions: self.solution(index),
        }
    }
}

impl<St, A, C> Default for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<St, A, C> std::ops::Index<SearchTreeIndex> for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    type Output = SearchTreeNode<St, A, C>;

    #[inline(always)]
    fn index(&self, index: SearchTreeIndex) -> &Self::Output {
        &self.nodes[index.as_usize()]
    }
}

impl<St, A, C> std::fmt::Debug for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}

/// A node borrowed from its tree, so it can walk back to the root.
#[derive(Copy, Clone)]
pub struct Node<'t, St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    tree: &'t SearchTree<St, A, C>,
    index: SearchTreeIndex,
}

impl<'t, St, A, C> Node<'t, St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    pub fn index(&self) -> SearchTreeIndex {
        self.index
    }
    #[inline(always)]
    pub fn state(&self) -> St {
        self.tree[self.index].state
    }
    #[inline(always)]
    pub fn action(&self) -> Option<A> {
        self.tree[self.index].action()
    }
    #[inline(always)]
    pub fn path_cost(&self) -> C {
        self.tree[self.index].g
    }
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.tree[self.index].depth
    }

    pub fn parent(&self) -> Option<Node<'t, St, A, C>> {
        self.tree[self.index]
            .parent_index()
            .map(|index| Node { tree: self.tree, index })
    }

    /// Nodes from the root to this one.
    pub fn path(&self) -> Vec<Node<'t, St, A, C>> {
        self.tree
            .path(self.index)
            .into_iter()
            .map(|index| Node { tree: self.tree, index })
            .collect()
    }

    /// Actions from the root to this node.
    pub fn solution(&self) -> Vec<A> {
        self.tree.solution(self.index)
    }
}

impl<St, A, C> std::fmt::Debug for Node<'_, St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Node({:?}, g={})", self.state(), self.path_cost())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    struct Cell(u32);
    impl State for Cell {}

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    struct Step;
    impl Action for Step {}

    #[test]
    fn option_index_is_free() {
        assert_eq!(
            std::mem::size_of::<Option<SearchTreeIndex>>(),
            std::mem::size_of::<SearchTreeIndex>()
        );
    }

    #[test]
    fn path_walks_back_to_the_root() {
        let mut tree = SearchTree::<Cell, Step, u32>::new();
        let root = tree.push(SearchTreeNode::root(Cell(0)));
        let a = tree.push(tree[root].child(root, Cell(1), Step, 3));
        // A sibling that's not on the path
        let _b = tree.push(tree[root].child(root, Cell(2), Step, 1));
        let c = tree.push(tree[a].child(a, Cell(3), Step, 4));

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.states(c), vec![Cell(0), Cell(1), Cell(3)]);
        assert_eq!(tree.solution(c), vec![Step, Step]);
        assert_eq!(tree[c].path_cost(), 7);
        assert_eq!(tree[c].depth(), 2);

        let node = tree.node(c);
        assert_eq!(node.parent().map(|p| p.state()), Some(Cell(1)));
        assert_eq!(
            node.path().iter().map(|n| n.path_cost()).collect::<Vec<_>>(),
            vec![0, 3, 7]
        );

        let path = tree.to_path(c);
        assert_eq!(path.start, Some(Cell(0)));
        assert_eq!(path.end, Some(Cell(3)));
        assert_eq!(path.cost, 7);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn root_path() {
        let mut tree = SearchTree::<Cell, Step, u32>::new();
        let root = tree.push(SearchTreeNode::root(Cell(9)));

        assert_eq!(tree.states(root), vec![Cell(9)]);
        assert!(tree.solution(root).is_empty());
        assert!(tree.node(root).parent().is_none());
        assert!(tree.to_path(root).is_empty());
    }
}

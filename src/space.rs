use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

pub use crate::cost::Cost;

pub trait Action: Copy + Clone + Debug + PartialEq + Eq {}
pub trait State: Copy + Clone + Debug + PartialEq + Eq + Hash {}

/// Inline capacity for successor lists.
///
/// Road maps rarely have junctions with more than a handful of roads.
pub const NEIGHBOURS_INLINE: usize = 8;

/// The successors of a state, in a deterministic order.
pub type Neighbours<St, A> = SmallVec<[(St, A); NEIGHBOURS_INLINE]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<S, A, C>
where
    S: State,
    A: Action,
    C: Cost,
{
    pub start: Option<S>,
    pub end: Option<S>,
    pub cost: C,
    pub actions: Vec<A>,
}

impl<S, A, C> Path<S, A, C>
where
    S: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[inline(always)]
    pub fn empty() -> Self {
        Self {
            start: None,
            actions: vec![],
            end: None,
            cost: C::zero(),
        }
    }
}

impl<S, A, C> std::fmt::Display for Path<S, A, C>
where
    S: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        debug_assert!(self.start.is_none() == self.end.is_none());

        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                write!(
                    f,
                    "Path({}, {:?}:{:?}:{:?})",
                    self.cost,
                    start,
                    self.actions.iter().take(20).collect::<Vec<_>>(),
                    end
                )
            }
            (None, None) => write!(f, "Path()"),
            _ => unreachable!("Path::start and Path::end should both be Some or None"),
        }
    }
}

/// A search space.
///
/// Spaces are read-only while searching, so a single space can back any
/// number of searches.
pub trait Space<St, A, C>: std::fmt::Debug
where
    St: State,
    A: Action,
    C: Cost,
{
    fn apply(&self, s: &St, a: &A) -> Option<St>;

    fn cost(&self, _s: &St, _a: &A) -> C {
        C::one()
    }
    /// Expands a State
    fn neighbours(&self, s: &St) -> Neighbours<St, A>;
    /// Verify is a State is valid.
    fn valid(&self, s: &St) -> bool;

    /// Replays a path, checking that every action applies, that it ends
    /// where it claims and that it costs what it claims.
    fn valid_path(&self, p: &Path<St, A, C>) -> bool {
        let Some(start) = p.start else {
            // Empty paths are fine
            return *p == Path::<St, A, C>::empty();
        };

        let mut state: St = start;
        let mut cost: C = C::zero();
        for a in &p.actions {
            match self.apply(&state, a) {
                Some(new_state) => {
                    cost = cost.saturating_add(&self.cost(&state, a));
                    state = new_state;
                }
                None => return false,
            }
        }
        p.end == Some(state) && p.cost == cost
    }

    fn supports_random_state() -> bool {
        false
    }
    fn random_state<R: rand::Rng>(&self, _r: &mut R) -> Option<St> {
        debug_assert!(!Self::supports_random_state());
        None
    }
}

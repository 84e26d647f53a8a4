use crate::space::Action;
use crate::space::Cost;
use crate::space::Space;
use crate::space::State;

/// A search problem: a space, where to start and where to stop.
///
/// Problems are immutable once built and searches only borrow them, so the
/// same problem can be handed to every algorithm in turn.
pub trait Problem<Sp, St, A, C>: std::fmt::Debug
where
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    fn space(&self) -> &Sp;
    fn initial(&self) -> St;
    fn goals(&self) -> &[St];

    fn is_goal(&self, s: &St) -> bool {
        self.goals().contains(s)
    }

    /// The cost of moving from `s` to `next` through `a`.
    fn step_cost(&self, s: &St, a: &A, _next: &St) -> C {
        self.space().cost(s, a)
    }
}

/// An instance-specific estimate of the cost left to reach a goal.
///
/// Optimality of heuristic search needs `h` to never overestimate. That is
/// on the implementor and it's not verified while searching.
pub trait Heuristic<P, Sp, St, A, C>: std::fmt::Debug
where
    P: Problem<Sp, St, A, C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    fn h(&self, _p: &P, _s: &St) -> C {
        C::zero()
    }
}

/// The blind heuristic.
#[derive(Copy, Clone, Debug, Default)]
pub struct ZeroHeuristic;

impl<P, Sp, St, A, C> Heuristic<P, Sp, St, A, C> for ZeroHeuristic
where
    P: Problem<Sp, St, A, C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
}

//! Next-state resolvers stored in the transition table.

use crate::core::{Message, State};
use std::rc::Rc;

/// Outcome of running a transition resolver.
pub enum Resolution<S, P> {
    /// Advance to the given state; the in-flight payload passes through.
    Next(S),
    /// Advance to the given state with a replacement payload.
    NextWith(S, P),
    /// Deliberately ignore the message: no state change, no hooks, no
    /// notification. Distinct from a fault, which means "nothing was
    /// registered at all".
    Swallow,
}

/// Function computing the next state for a registered transition.
///
/// The fixed-next-state form of registration is sugar over this: a resolver
/// that ignores its inputs and returns a constant.
pub type Resolver<S, M, P> = Rc<dyn Fn(&M, &P) -> Resolution<S, P>>;

pub(crate) fn fixed<S, M, P>(next: S) -> Resolver<S, M, P>
where
    S: State + 'static,
    M: Message + 'static,
    P: 'static,
{
    Rc::new(move |_message, _payload| Resolution::Next(next.clone()))
}

pub(crate) fn ignore<S, M, P>() -> Resolver<S, M, P>
where
    S: State + 'static,
    M: Message + 'static,
    P: 'static,
{
    Rc::new(|_message, _payload| Resolution::Swallow)
}

//! Per-state lifecycle hook tables.

use crate::core::State;
use std::collections::HashMap;
use std::rc::Rc;

/// Per-state lifecycle callback, receiving `(from, to, payload)`.
pub type Hook<S, P> = Rc<dyn Fn(&S, &S, &P)>;

/// One hook per declared state for a single lifecycle phase.
///
/// Every variant of the state domain starts out mapped to a shared no-op,
/// so lookups never miss; setters replace the entry and the last write wins.
pub(crate) struct HookTable<S: State, P> {
    hooks: HashMap<S, Hook<S, P>>,
}

impl<S, P> HookTable<S, P>
where
    S: State + 'static,
    P: 'static,
{
    pub fn with_defaults() -> Self {
        let noop: Hook<S, P> = Rc::new(|_, _, _| {});
        let hooks = S::variants()
            .iter()
            .map(|state| (state.clone(), Rc::clone(&noop)))
            .collect();
        Self { hooks }
    }

    pub fn set(&mut self, state: S, hook: Hook<S, P>) {
        self.hooks.insert(state, hook);
    }

    pub fn get(&self, state: &S) -> Hook<S, P> {
        match self.hooks.get(state) {
            Some(hook) => Rc::clone(hook),
            None => Rc::new(|_, _, _| {}),
        }
    }
}

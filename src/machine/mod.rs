//! The state machine engine: transition lookup, the four-phase lifecycle,
//! and observer notification.
//!
//! A [`StateMachine`] owns a transition table, the current state, and four
//! per-state hook tables (entering, leaving, entered, left). Messages are
//! submitted through the bound [`MessagePump`], which serializes processing:
//! a hook or observer that posts new messages (to this machine or another on
//! the same pump) enqueues them instead of recursing.
//!
//! Processing one message walks a fixed sequence: resolve the next state
//! (or run the fault protocol), fire the `leaving`/`entering` hooks and the
//! `StateChanging` observers, commit the state, fire the `left`/`entered`
//! hooks and the `StateChanged` observers. Both boundary hooks fire even on
//! a self-transition; observers that only want real changes can compare the
//! event's `old_state` and `new_state`.

mod fault;
mod hooks;
mod resolver;

pub use fault::BadTransition;
pub use resolver::{Resolution, Resolver};

use crate::core::{ChangePhase, Message, State, StateChangeEvent, TransitionKey};
use crate::error::MachineError;
use crate::pump::MessagePump;
use fault::Recovery;
use hooks::HookTable;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};

/// Handle returned by the subscribe methods; pass it back to the matching
/// unsubscribe method to deregister.
///
/// Registration and deregistration are safe between message deliveries; a
/// change made from inside a firing notification takes effect from the next
/// delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription(u64);

type ChangeObserver<S, M, P> = Rc<dyn Fn(&StateChangeEvent<S, M, P>)>;
type PropertyObserver = Rc<dyn Fn(&str)>;
type FaultHandler<S, M, P> = Rc<dyn Fn(&mut BadTransition<S, M, P>)>;

/// A flat finite state machine bound to a message pump.
///
/// Machines are shared by `Rc` and use interior mutability throughout, so
/// hooks and observers can post follow-up messages through a plain shared
/// handle while a message is being processed. Like the pump, a machine is
/// single-threaded by design.
pub struct StateMachine<S: State, M: Message, P> {
    pump: Rc<MessagePump>,
    name: String,
    state_object: Option<Rc<dyn Any>>,
    weak: Weak<Self>,
    state: RefCell<S>,
    transitions: RefCell<HashMap<TransitionKey<S, M>, Resolver<S, M, P>>>,
    entering: RefCell<HookTable<S, P>>,
    leaving: RefCell<HookTable<S, P>>,
    entered: RefCell<HookTable<S, P>>,
    left: RefCell<HookTable<S, P>>,
    changing_observers: RefCell<Vec<(Subscription, ChangeObserver<S, M, P>)>>,
    changed_observers: RefCell<Vec<(Subscription, ChangeObserver<S, M, P>)>>,
    property_observers: RefCell<Vec<(Subscription, PropertyObserver)>>,
    fault_handler: RefCell<Option<FaultHandler<S, M, P>>>,
    next_subscription: Cell<u64>,
    processing: Cell<bool>,
}

impl<S, M, P> StateMachine<S, M, P>
where
    S: State + 'static,
    M: Message + 'static,
    P: Clone + 'static,
{
    /// Create a machine bound to `pump`, starting in `starting_state`.
    ///
    /// `name` identifies the instance in errors and log events. All four
    /// hook tables are initialized to no-ops for every declared state.
    pub fn new(pump: Rc<MessagePump>, starting_state: S, name: impl Into<String>) -> Rc<Self> {
        Self::build(pump, starting_state, name.into(), None)
    }

    /// Like [`new`](StateMachine::new), with an opaque user object that
    /// hooks and observers can reach through [`state_object`](StateMachine::state_object).
    pub fn new_with_object(
        pump: Rc<MessagePump>,
        starting_state: S,
        name: impl Into<String>,
        state_object: Rc<dyn Any>,
    ) -> Rc<Self> {
        Self::build(pump, starting_state, name.into(), Some(state_object))
    }

    fn build(
        pump: Rc<MessagePump>,
        starting_state: S,
        name: String,
        state_object: Option<Rc<dyn Any>>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|weak| Self {
            pump,
            name,
            state_object,
            weak: weak.clone(),
            state: RefCell::new(starting_state),
            transitions: RefCell::new(HashMap::new()),
            entering: RefCell::new(HookTable::with_defaults()),
            leaving: RefCell::new(HookTable::with_defaults()),
            entered: RefCell::new(HookTable::with_defaults()),
            left: RefCell::new(HookTable::with_defaults()),
            changing_observers: RefCell::new(Vec::new()),
            changed_observers: RefCell::new(Vec::new()),
            property_observers: RefCell::new(Vec::new()),
            fault_handler: RefCell::new(None),
            next_subscription: Cell::new(0),
            processing: Cell::new(false),
        })
    }

    /// The machine's diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current state.
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    /// The pump this machine is bound to.
    pub fn pump(&self) -> &Rc<MessagePump> {
        &self.pump
    }

    /// The user object supplied at construction, if any.
    pub fn state_object(&self) -> Option<Rc<dyn Any>> {
        self.state_object.clone()
    }

    /// Register a transition to a fixed next state.
    ///
    /// Registering a second transition for the same (state, message) pair is
    /// a configuration error and fails immediately.
    pub fn add(&self, state: S, message: M, next_state: S) -> Result<(), MachineError> {
        self.register(state, message, resolver::fixed(next_state))
    }

    /// Register a transition whose next state is computed by `resolve`.
    pub fn add_resolver<F>(&self, state: S, message: M, resolve: F) -> Result<(), MachineError>
    where
        F: Fn(&M, &P) -> Resolution<S, P> + 'static,
    {
        self.register(state, message, Rc::new(resolve))
    }

    /// Register an explicit ignore: in `state`, `message` is swallowed
    /// without a state change, hooks, or notification.
    ///
    /// This is a designed-in no-op, not a fault; the fault protocol only
    /// runs for pairs with no registration at all.
    pub fn add_ignore(&self, state: S, message: M) -> Result<(), MachineError> {
        self.register(state, message, resolver::ignore())
    }

    fn register(&self, state: S, message: M, resolver: Resolver<S, M, P>) -> Result<(), MachineError> {
        let key = TransitionKey::new(state, message);
        let mut transitions = self.transitions.borrow_mut();
        if transitions.contains_key(&key) {
            return Err(MachineError::DuplicateTransition {
                machine: self.name.clone(),
                state: key.state().name().to_string(),
                message: key.message().name().to_string(),
            });
        }
        transitions.insert(key, resolver);
        Ok(())
    }

    /// Replace the `entering` hook for `state`, fired before the commit when
    /// the machine is about to enter `state`.
    pub fn on_entering<F>(&self, state: S, hook: F)
    where
        F: Fn(&S, &S, &P) + 'static,
    {
        self.entering.borrow_mut().set(state, Rc::new(hook));
    }

    /// Replace the `leaving` hook for `state`, fired before the commit when
    /// the machine is about to leave `state`.
    pub fn on_leaving<F>(&self, state: S, hook: F)
    where
        F: Fn(&S, &S, &P) + 'static,
    {
        self.leaving.borrow_mut().set(state, Rc::new(hook));
    }

    /// Replace the `entered` hook for `state`, fired after the commit.
    pub fn on_entered<F>(&self, state: S, hook: F)
    where
        F: Fn(&S, &S, &P) + 'static,
    {
        self.entered.borrow_mut().set(state, Rc::new(hook));
    }

    /// Replace the `left` hook for `state`, fired after the commit.
    pub fn on_left<F>(&self, state: S, hook: F)
    where
        F: Fn(&S, &S, &P) + 'static,
    {
        self.left.borrow_mut().set(state, Rc::new(hook));
    }

    /// Subscribe to notifications fired before the commit.
    pub fn subscribe_state_changing<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&StateChangeEvent<S, M, P>) + 'static,
    {
        let id = self.next_id();
        self.changing_observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    pub fn unsubscribe_state_changing(&self, subscription: Subscription) {
        self.changing_observers
            .borrow_mut()
            .retain(|(id, _)| *id != subscription);
    }

    /// Subscribe to notifications fired after the commit.
    pub fn subscribe_state_changed<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&StateChangeEvent<S, M, P>) + 'static,
    {
        let id = self.next_id();
        self.changed_observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    pub fn unsubscribe_state_changed(&self, subscription: Subscription) {
        self.changed_observers
            .borrow_mut()
            .retain(|(id, _)| *id != subscription);
    }

    /// Subscribe to the single-field change notification used for UI
    /// data-binding.
    ///
    /// The observer is invoked with the field name (`"state"`), between the
    /// `StateChanging` and `StateChanged` notifications, and only when the
    /// committed state actually differs from the old one.
    pub fn subscribe_property_changed<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&str) + 'static,
    {
        let id = self.next_id();
        self.property_observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    pub fn unsubscribe_property_changed(&self, subscription: Subscription) {
        self.property_observers
            .borrow_mut()
            .retain(|(id, _)| *id != subscription);
    }

    /// Install the fault handler, replacing any previous one.
    ///
    /// With no handler installed, an unmapped (state, message) pair is a
    /// fatal error; with one installed, the handler decides between silent
    /// swallowing and recovery via [`BadTransition::request_state`].
    pub fn on_bad_transition<F>(&self, handler: F)
    where
        F: Fn(&mut BadTransition<S, M, P>) + 'static,
    {
        *self.fault_handler.borrow_mut() = Some(Rc::new(handler));
    }

    /// Submit a message through the bound pump.
    ///
    /// If the pump is idle the message is processed before this returns;
    /// otherwise it queues behind the in-flight work. Returns the pump's
    /// queue length when the call returns, a backlog hint. A message still
    /// queued when its machine is dropped is discarded.
    pub fn post_message(&self, message: M, payload: P) -> Result<usize, MachineError> {
        let weak = self.weak.clone();
        self.pump.post(move || match weak.upgrade() {
            Some(machine) => machine.process_message(message, payload),
            None => Ok(()),
        })
    }

    /// Process one message synchronously, bypassing the queue.
    ///
    /// This is what the pump invokes for each posted message. Hosts that do
    /// not need queued dispatch can call it directly; calling it while a
    /// message is already being processed (from a hook or observer) violates
    /// the serialization contract and fails with
    /// [`MachineError::ReentrantDispatch`] — post instead.
    pub fn process_message(&self, message: M, payload: P) -> Result<(), MachineError> {
        if self.processing.get() {
            return Err(MachineError::ReentrantDispatch {
                machine: self.name.clone(),
            });
        }
        self.processing.set(true);
        let outcome = self.dispatch(message, payload);
        self.processing.set(false);
        outcome
    }

    fn dispatch(&self, message: M, payload: P) -> Result<(), MachineError> {
        let old_state = self.state.borrow().clone();
        let key = TransitionKey::new(old_state.clone(), message.clone());
        let resolver = self.transitions.borrow().get(&key).map(Rc::clone);

        let (next_state, payload, faulted) = match resolver {
            Some(resolve) => match resolve(&message, &payload) {
                Resolution::Next(state) => (state, payload, false),
                Resolution::NextWith(state, replacement) => (state, replacement, false),
                Resolution::Swallow => {
                    trace!(
                        machine = %self.name,
                        state = old_state.name(),
                        msg = message.name(),
                        "message swallowed"
                    );
                    return Ok(());
                }
            },
            None => match self.raise_fault(old_state.clone(), message.clone(), payload)? {
                Some(recovery) => (recovery.state, recovery.payload, true),
                None => return Ok(()),
            },
        };

        // Changing phase. Both boundary hooks fire even when old == new.
        let hook = self.leaving.borrow().get(&old_state);
        hook(&old_state, &next_state, &payload);
        let hook = self.entering.borrow().get(&next_state);
        hook(&old_state, &next_state, &payload);
        self.notify(
            &self.changing_observers,
            StateChangeEvent {
                new_state: next_state.clone(),
                old_state: old_state.clone(),
                message: message.clone(),
                phase: ChangePhase::Changing,
                payload: payload.clone(),
                faulted,
            },
        );

        // Commit: the sole point where observable state changes.
        *self.state.borrow_mut() = next_state.clone();
        debug!(
            machine = %self.name,
            from = old_state.name(),
            to = next_state.name(),
            msg = message.name(),
            faulted,
            "transition committed"
        );
        if old_state != next_state {
            self.notify_property_changed();
        }

        // Changed phase.
        let hook = self.left.borrow().get(&old_state);
        hook(&old_state, &next_state, &payload);
        let hook = self.entered.borrow().get(&next_state);
        hook(&old_state, &next_state, &payload);
        self.notify(
            &self.changed_observers,
            StateChangeEvent {
                new_state: next_state,
                old_state,
                message,
                phase: ChangePhase::Changed,
                payload,
                faulted,
            },
        );

        Ok(())
    }

    fn raise_fault(
        &self,
        current_state: S,
        message: M,
        payload: P,
    ) -> Result<Option<Recovery<S, P>>, MachineError> {
        let handler = self.fault_handler.borrow().clone();
        let Some(handler) = handler else {
            warn!(
                machine = %self.name,
                state = current_state.name(),
                msg = message.name(),
                "unmapped transition with no fault handler"
            );
            return Err(MachineError::UnhandledTransition {
                machine: self.name.clone(),
                state: current_state.name().to_string(),
                message: message.name().to_string(),
            });
        };

        warn!(
            machine = %self.name,
            state = current_state.name(),
            msg = message.name(),
            "unmapped transition, raising fault"
        );
        let mut fault = BadTransition::new(current_state, message, payload);
        handler(&mut fault);
        Ok(fault.into_recovery())
    }

    fn notify(
        &self,
        observers: &RefCell<Vec<(Subscription, ChangeObserver<S, M, P>)>>,
        event: StateChangeEvent<S, M, P>,
    ) {
        // Snapshot first: an observer may subscribe or unsubscribe for the
        // next delivery without invalidating this one.
        let snapshot: Vec<ChangeObserver<S, M, P>> = observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in snapshot {
            observer(&event);
        }
    }

    fn notify_property_changed(&self) {
        let snapshot: Vec<PropertyObserver> = self
            .property_observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in snapshot {
            observer("state");
        }
    }

    fn next_id(&self) -> Subscription {
        let id = self.next_subscription.get();
        self.next_subscription.set(id + 1);
        Subscription(id)
    }
}

//! Shared FIFO message pump.
//!
//! A [`MessagePump`] is a queue of deferred zero-argument actions shared by
//! any number of state machines. It guarantees that actions run strictly in
//! post order and never overlap: posting from inside a running action
//! appends to the tail instead of executing inline, so chains of re-posted
//! messages run one after another on a flat call stack.
//!
//! The pump is single-threaded and cooperative. It is shared by `Rc` and is
//! deliberately not `Send`/`Sync`; driving one pump from several threads
//! requires external synchronization and forfeits cross-thread ordering.

use crate::error::MachineError;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Deferred unit of work held in the pump queue.
pub type PumpAction = Box<dyn FnOnce() -> Result<(), MachineError>>;

/// FIFO dispatcher for deferred actions.
pub struct MessagePump {
    // Each queued action sits in an Option slot so the head can be emptied
    // while it executes yet still occupy the queue. See `drain`.
    queue: RefCell<VecDeque<Option<PumpAction>>>,
}

impl MessagePump {
    /// Create a pump, ready to be shared across machines.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            queue: RefCell::new(VecDeque::new()),
        })
    }

    /// Number of actions currently queued, including one in flight.
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Append `action` to the tail of the queue.
    ///
    /// If the queue was empty before the call, the pump drains it to empty
    /// before returning; the action (and anything it posts) has then already
    /// run. If the queue was busy, the action stays queued and runs once the
    /// in-flight work completes. Returns the queue length when the call
    /// returns: the backlog for a nested post, `0` for an outermost one.
    ///
    /// ```rust
    /// use pumpstate::MessagePump;
    ///
    /// let pump = MessagePump::new();
    /// let backlog = pump.post(|| Ok(()))?;
    /// assert_eq!(backlog, 0);
    /// # Ok::<(), pumpstate::MachineError>(())
    /// ```
    pub fn post<F>(&self, action: F) -> Result<usize, MachineError>
    where
        F: FnOnce() -> Result<(), MachineError> + 'static,
    {
        let was_empty = {
            let mut queue = self.queue.borrow_mut();
            queue.push_back(Some(Box::new(action)));
            queue.len() == 1
        };

        // Only the post that woke the queue from empty drains it. Every
        // nested post lands on a non-empty queue and simply appends.
        if was_empty {
            self.drain()?;
        }

        Ok(self.queue.borrow().len())
    }

    /// Run queued actions in order until the queue is empty.
    ///
    /// The head action is taken out of its slot but the slot itself stays
    /// queued while the action runs. A nested `post` therefore always sees a
    /// non-empty queue, which is what keeps a second drain loop from ever
    /// starting.
    fn drain(&self) -> Result<(), MachineError> {
        loop {
            let action = {
                let mut queue = self.queue.borrow_mut();
                match queue.front_mut() {
                    Some(slot) => slot.take(),
                    None => return Ok(()),
                }
            };

            let outcome = match action {
                Some(run) => run(),
                // The head slot is only empty while its action runs, and a
                // single drain loop means we never observe that here.
                None => Ok(()),
            };

            self.queue.borrow_mut().pop_front();

            if let Err(error) = outcome {
                // A fatal error stops the machine; discard the backlog so a
                // later post cannot resume mid-sequence.
                self.queue.borrow_mut().clear();
                return Err(error);
            }
        }
    }
}

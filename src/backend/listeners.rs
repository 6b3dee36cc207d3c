//! Auth-state listener registry and the subscription handle returned to
//! consumers.

use super::auth::AuthUser;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type AuthListener = Box<dyn Fn(Option<&AuthUser>)>;

type Slot = (u64, Rc<dyn Fn(Option<&AuthUser>)>);

/// Handle for an active listener. Dropping it unsubscribes.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

/// Shared list of listeners. Cloning shares the same list.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    slots: Rc<RefCell<Vec<Slot>>>,
    next_id: Rc<Cell<u64>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, listener: AuthListener) -> (u64, Subscription) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.slots.borrow_mut().push((id, Rc::from(listener)));

        let slots = Rc::clone(&self.slots);
        let sub = Subscription::new(move || {
            slots.borrow_mut().retain(|(sid, _)| *sid != id);
        });
        (id, sub)
    }

    /// Call a single listener (used for the initial state delivery).
    pub fn notify_one(&self, id: u64, user: Option<&AuthUser>) {
        let listener = self
            .slots
            .borrow()
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, l)| Rc::clone(l));
        if let Some(l) = listener {
            l(user);
        }
    }

    pub fn notify_all(&self, user: Option<&AuthUser>) {
        // snapshot first: a listener may (un)subscribe while being called
        let listeners: Vec<_> = self
            .slots
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for l in listeners {
            l(user);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

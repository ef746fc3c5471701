#![forbid(unsafe_code)]

//! Explicit ownership of event subscriptions.
//!
//! Every listener or observer a mounted page registers is wrapped in a
//! [`Subscription`] and handed to one [`SubscriptionSet`]. Tearing the set
//! down (explicitly or by dropping it) detaches all of them, so a page whose
//! lifetime is shorter than the document's leaks nothing.

use tracing::{debug, trace};

/// A unique identifier for a subscription within its set.
pub type SubId = u64;

/// The kind of event source a subscription listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    Scroll,
    MouseEnter,
    MouseLeave,
    /// Pointer press on an object inside the 3D scene.
    SceneObjectDown,
    /// Visibility reports from an intersection observer.
    Intersection,
    /// A pending `requestAnimationFrame` callback.
    AnimationFrame,
}

impl EventKind {
    /// Name of the event as registered with the host.
    #[must_use]
    pub const fn as_dom_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Scroll => "scroll",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
            Self::SceneObjectDown => "mouseDown",
            Self::Intersection => "intersection",
            Self::AnimationFrame => "animationframe",
        }
    }
}

/// A live registration against some event source.
pub trait Subscription {
    fn kind(&self) -> EventKind;

    /// Detach from the source. Must be safe to call more than once.
    fn unsubscribe(&mut self);
}

struct Entry {
    id: SubId,
    sub: Box<dyn Subscription>,
}

/// Owns every subscription a page registered.
#[derive(Default)]
pub struct SubscriptionSet {
    next_id: SubId,
    active: Vec<Entry>,
}

impl core::fmt::Debug for SubscriptionSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SubscriptionSet")
            .field("next_id", &self.next_id)
            .field("active", &self.active.len())
            .finish()
    }
}

impl SubscriptionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `sub`.
    pub fn push(&mut self, sub: impl Subscription + 'static) -> SubId {
        let id = self.next_id;
        self.next_id += 1;
        trace!(sub_id = id, kind = sub.kind().as_dom_str(), "subscription added");
        self.active.push(Entry {
            id,
            sub: Box::new(sub),
        });
        id
    }

    /// Detach and drop one subscription. Returns `false` if unknown.
    pub fn remove(&mut self, id: SubId) -> bool {
        let Some(pos) = self.active.iter().position(|e| e.id == id) else {
            return false;
        };
        let mut entry = self.active.remove(pos);
        entry.sub.unsubscribe();
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of live subscriptions of `kind`.
    #[must_use]
    pub fn count(&self, kind: EventKind) -> usize {
        self.active.iter().filter(|e| e.sub.kind() == kind).count()
    }

    /// Detach everything, most recent first.
    pub fn teardown(&mut self) {
        if self.active.is_empty() {
            return;
        }
        debug!(count = self.active.len(), "tearing down subscriptions");
        while let Some(mut entry) = self.active.pop() {
            entry.sub.unsubscribe();
        }
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Probe {
        kind: EventKind,
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Subscription for Probe {
        fn kind(&self) -> EventKind {
            self.kind
        }

        fn unsubscribe(&mut self) {
            self.log.borrow_mut().push(self.name);
        }
    }

    fn probe(kind: EventKind, name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Probe {
        Probe {
            kind,
            name,
            log: Rc::clone(log),
        }
    }

    #[test]
    fn teardown_detaches_in_reverse_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = SubscriptionSet::new();
        set.push(probe(EventKind::Scroll, "scroll", &log));
        set.push(probe(EventKind::Click, "click", &log));
        set.push(probe(EventKind::KeyDown, "keydown", &log));
        assert_eq!(set.len(), 3);
        assert_eq!(set.count(EventKind::Click), 1);

        set.teardown();
        assert!(set.is_empty());
        assert_eq!(*log.borrow(), vec!["keydown", "click", "scroll"]);

        set.teardown();
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn remove_detaches_one() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = SubscriptionSet::new();
        let a = set.push(probe(EventKind::MouseEnter, "enter", &log));
        let _b = set.push(probe(EventKind::MouseLeave, "leave", &log));

        assert!(set.remove(a));
        assert!(!set.remove(a));
        assert_eq!(*log.borrow(), vec!["enter"]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn drop_tears_down() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut set = SubscriptionSet::new();
            set.push(probe(EventKind::Intersection, "observer", &log));
        }
        assert_eq!(*log.borrow(), vec!["observer"]);
    }

    #[test]
    fn dom_names_match_host_events() {
        assert_eq!(EventKind::KeyDown.as_dom_str(), "keydown");
        assert_eq!(EventKind::SceneObjectDown.as_dom_str(), "mouseDown");
    }
}

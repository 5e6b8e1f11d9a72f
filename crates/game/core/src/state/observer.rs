//! Change notifications for combatant resources.
//!
//! Observers are attached to a single combatant and invoked synchronously,
//! in subscription order, right after every committed HP or SP mutation.
//! Nothing is deferred or batched, so an observer always sees the state of
//! the combatant between two sequencer steps.

use core::fmt;

use super::CombatantId;

/// Resource pool that changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    Hp,
    Sp,
}

/// Payload delivered to observers after a mutation is committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceChanged {
    pub combatant: CombatantId,
    pub resource: ResourceKind,
    pub previous: u32,
    pub current: u32,
    pub maximum: u32,
}

/// Receives resource notifications for one combatant.
pub trait ResourceObserver {
    fn on_resource_changed(&mut self, change: &ResourceChanged);
}

impl<F> ResourceObserver for F
where
    F: FnMut(&ResourceChanged),
{
    fn on_resource_changed(&mut self, change: &ResourceChanged) {
        self(change)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered list of observers attached to a combatant.
///
/// Cloning a combatant does not clone its observers; the clone starts with
/// an empty list.
#[derive(Default)]
pub struct ObserverList {
    next_id: u64,
    observers: Vec<(SubscriptionId, Box<dyn ResourceObserver>)>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl ResourceObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns false if the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub(crate) fn notify(&mut self, change: &ResourceChanged) {
        for (_, observer) in self.observers.iter_mut() {
            observer.on_resource_changed(change);
        }
    }
}

impl Clone for ObserverList {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn change(current: u32) -> ResourceChanged {
        ResourceChanged {
            combatant: CombatantId(0),
            resource: ResourceKind::Hp,
            previous: 0,
            current,
            maximum: 10,
        }
    }

    #[test]
    fn observers_fire_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut list = ObserverList::new();

        let first = Rc::clone(&log);
        list.subscribe(move |c: &ResourceChanged| first.borrow_mut().push(("a", c.current)));
        let second = Rc::clone(&log);
        list.subscribe(move |c: &ResourceChanged| second.borrow_mut().push(("b", c.current)));

        list.notify(&change(3));
        assert_eq!(*log.borrow(), vec![("a", 3), ("b", 3)]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let hits = Rc::new(RefCell::new(0));
        let mut list = ObserverList::new();
        let counter = Rc::clone(&hits);
        let id = list.subscribe(move |_: &ResourceChanged| *counter.borrow_mut() += 1);

        list.notify(&change(1));
        assert!(list.unsubscribe(id));
        assert!(!list.unsubscribe(id));
        list.notify(&change(2));

        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn clones_start_without_observers() {
        let mut list = ObserverList::new();
        list.subscribe(|_: &ResourceChanged| {});
        assert_eq!(list.clone().len(), 0);
    }
}

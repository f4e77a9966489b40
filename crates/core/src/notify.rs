//! Single-threaded publish/subscribe used to hand snapshots to observers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Rc<dyn Fn(&T)>;

/// Fan-out of a value to every subscribed listener.
///
/// Listeners are called in subscription order. A listener may subscribe,
/// unsubscribe or publish again while being notified; changes to the listener
/// list take effect from the next publish.
pub struct Notifier<T> {
    listeners: RefCell<Vec<(ListenerId, Listener<T>)>>,
    next_id: Cell<u64>,
}

impl<T> Notifier<T> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    pub fn publish(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();

        for listener in snapshot {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_all_listeners_in_order() {
        let notifier = Notifier::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in ["a", "b"] {
            let seen = seen.clone();
            notifier.subscribe(move |v| seen.borrow_mut().push(format!("{tag}{v}")));
        }
        notifier.publish(&7);

        assert_eq!(*seen.borrow(), vec!["a7", "b7"]);
    }

    #[test]
    fn test_unsubscribe() {
        let notifier = Notifier::<u32>::new();
        let count = Rc::new(Cell::new(0));

        let c = count.clone();
        let id = notifier.subscribe(move |_| c.set(c.get() + 1));
        notifier.publish(&1);
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id), "second unsubscribe is a no-op");
        notifier.publish(&2);

        assert_eq!(count.get(), 1);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_listener_can_subscribe_during_publish() {
        let notifier = Rc::new(Notifier::<u32>::new());
        let inner = notifier.clone();
        notifier.subscribe(move |_| {
            inner.subscribe(|_| {});
        });

        notifier.publish(&0);
        assert_eq!(notifier.len(), 2);
    }
}

use crate::ring::RingId;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback = Rc<dyn Fn(&RingId, f64)>;

#[derive(Default)]
struct ListenerList {
    next_key: u64,
    entries: Vec<(u64, Callback)>,
}

/// Change listeners. Callbacks may unsubscribe (themselves or others) while
/// being notified.
#[derive(Clone, Default)]
pub(crate) struct Listeners(Rc<RefCell<ListenerList>>);

impl Listeners {
    pub(crate) fn subscribe(&self, callback: impl Fn(&RingId, f64) + 'static) -> Unsubscribe {
        let mut list = self.0.borrow_mut();
        let key = list.next_key;
        list.next_key += 1;
        list.entries.push((key, Rc::new(callback)));
        Unsubscribe {
            list: Rc::downgrade(&self.0),
            key,
        }
    }

    pub(crate) fn notify(&self, id: &RingId, value: f64) {
        let callbacks: Vec<Callback> = self
            .0
            .borrow()
            .entries
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in callbacks {
            callback(id, value);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.0.borrow().entries.len()
    }
}

/// Handle returned by [`crate::Engine::on_change`]. Dropping it leaves the
/// listener registered.
#[derive(Debug)]
pub struct Unsubscribe {
    list: Weak<RefCell<ListenerList>>,
    key: u64,
}

impl Unsubscribe {
    pub fn unsubscribe(self) {
        if let Some(list) = self.list.upgrade() {
            list.borrow_mut().entries.retain(|(key, _)| *key != self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let listeners = Listeners::default();
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        let handle = listeners.subscribe(move |_, _| counter.set(counter.get() + 1));

        listeners.notify(&RingId::from("a"), 1.0);
        handle.unsubscribe();
        listeners.notify(&RingId::from("a"), 2.0);

        assert_eq!(hits.get(), 1);
        assert_eq!(listeners.len(), 0);
    }

    #[test]
    fn test_callback_can_unsubscribe_itself() {
        let listeners = Listeners::default();
        let slot: Rc<RefCell<Option<Unsubscribe>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));

        let (slot_inner, counter) = (slot.clone(), hits.clone());
        let handle = listeners.subscribe(move |_, _| {
            counter.set(counter.get() + 1);
            if let Some(handle) = slot_inner.borrow_mut().take() {
                handle.unsubscribe();
            }
        });
        *slot.borrow_mut() = Some(handle);

        listeners.notify(&RingId::from("a"), 1.0);
        listeners.notify(&RingId::from("a"), 2.0);
        assert_eq!(hits.get(), 1);
    }
}

#![forbid(unsafe_code)]

//! Lifecycle notifications.
//!
//! A [`TourEvents`] handle is a cheap clone of a shared listener table.
//! Listeners are registered per [`EventKind`] either with [`TourEvents::on`]
//! (removed by [`TourEvents::off`]) or with [`TourEvents::subscribe`], whose
//! returned [`Subscription`] removes the listener when dropped.
//!
//! Dispatch copies the matching handlers out of the table before calling
//! them, so a handler may add or remove listeners while it runs. Removals
//! take effect from the next emission.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use waypoint_tour::events::{EventKind, TourEvent, TourEvents};
//!
//! let events = TourEvents::new();
//! let hits = Rc::new(Cell::new(0));
//! let seen = Rc::clone(&hits);
//! let sub = events.subscribe(EventKind::Start, move |_| seen.set(seen.get() + 1));
//!
//! events.emit(&TourEvent::Start);
//! drop(sub);
//! events.emit(&TourEvent::Start);
//! assert_eq!(hits.get(), 1);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use crate::step::StepSnapshot;

/// The three lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Start,
    Stop,
    StepChange,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Start, EventKind::Stop, EventKind::StepChange];

    /// Wire name: `start`, `stop`, `stepChange`.
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::Stop => "stop",
            EventKind::StepChange => "stepChange",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown tour event `{s}`"))
    }
}

/// Why a tour stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Advanced past the last step.
    Completed,
    /// Stopped explicitly before the end.
    Dismissed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourEvent {
    Start,
    Stop { reason: StopReason },
    StepChange(StepSnapshot),
}

impl TourEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            TourEvent::Start => EventKind::Start,
            TourEvent::Stop { .. } => EventKind::Stop,
            TourEvent::StepChange(_) => EventKind::StepChange,
        }
    }
}

/// Handle returned by [`TourEvents::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler = Rc<dyn Fn(&TourEvent)>;

struct Listener {
    kind: EventKind,
    id: ListenerId,
    handler: Handler,
}

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl ListenerTable {
    fn remove(&mut self, kind: EventKind, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| !(l.kind == kind && l.id == id));
        before != self.listeners.len()
    }
}

/// Shared listener table. Clones refer to the same table.
#[derive(Clone, Default)]
pub struct TourEvents {
    table: Rc<RefCell<ListenerTable>>,
}

impl fmt::Debug for TourEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.borrow();
        f.debug_struct("TourEvents")
            .field("listeners", &table.listeners.len())
            .finish()
    }
}

impl TourEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`. It stays until [`off`](Self::off).
    pub fn on(&self, kind: EventKind, handler: impl Fn(&TourEvent) + 'static) -> ListenerId {
        let mut table = self.table.borrow_mut();
        let id = ListenerId(table.next_id);
        table.next_id += 1;
        table.listeners.push(Listener {
            kind,
            id,
            handler: Rc::new(handler),
        });
        tracing::debug!(event = kind.as_str(), id = id.0, "listener added");
        id
    }

    /// Remove a listener. Returns `false` if it was not registered for `kind`.
    pub fn off(&self, kind: EventKind, id: ListenerId) -> bool {
        let removed = self.table.borrow_mut().remove(kind, id);
        if removed {
            tracing::debug!(event = kind.as_str(), id = id.0, "listener removed");
        }
        removed
    }

    /// Register `handler` for as long as the returned guard lives.
    #[must_use = "dropping the subscription removes the listener immediately"]
    pub fn subscribe(
        &self,
        kind: EventKind,
        handler: impl Fn(&TourEvent) + 'static,
    ) -> Subscription {
        let id = self.on(kind, handler);
        Subscription {
            kind,
            id,
            table: Rc::downgrade(&self.table),
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.table
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.table.borrow().listeners.len()
    }

    /// Call every listener registered for the event's kind, in
    /// registration order.
    pub fn emit(&self, event: &TourEvent) {
        let kind = event.kind();
        let handlers: Vec<Handler> = self
            .table
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| Rc::clone(&l.handler))
            .collect();
        tracing::trace!(event = kind.as_str(), listeners = handlers.len(), "emit");
        for handler in handlers {
            handler(event);
        }
    }
}

/// Scoped listener registration. Dropping it removes the listener; it is
/// harmless to drop after the [`TourEvents`] table is gone.
pub struct Subscription {
    kind: EventKind,
    id: ListenerId,
    table: Weak<RefCell<ListenerTable>>,
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            if table.borrow_mut().remove(self.kind, self.id) {
                tracing::debug!(event = self.kind.as_str(), id = self.id.0, "listener removed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn wire_names() {
        assert_eq!(EventKind::Start.as_str(), "start");
        assert_eq!(EventKind::Stop.to_string(), "stop");
        assert_eq!("stepChange".parse::<EventKind>(), Ok(EventKind::StepChange));
        assert!("step_change".parse::<EventKind>().is_err());
    }

    #[test]
    fn off_removes_only_matching_kind() {
        let events = TourEvents::new();
        let id = events.on(EventKind::Start, |_| {});
        assert!(!events.off(EventKind::Stop, id));
        assert!(events.off(EventKind::Start, id));
        assert!(!events.off(EventKind::Start, id));
        assert_eq!(events.total_listeners(), 0);
    }

    #[test]
    fn emit_reaches_only_matching_listeners() {
        let events = TourEvents::new();
        let starts = Rc::new(Cell::new(0));
        let stops = Rc::new(Cell::new(0));
        let (a, b) = (Rc::clone(&starts), Rc::clone(&stops));
        events.on(EventKind::Start, move |_| a.set(a.get() + 1));
        events.on(EventKind::Stop, move |_| b.set(b.get() + 1));
        events.emit(&TourEvent::Start);
        events.emit(&TourEvent::Start);
        assert_eq!((starts.get(), stops.get()), (2, 0));
    }

    #[test]
    fn handler_may_unsubscribe_itself_during_dispatch() {
        let events = TourEvents::new();
        let slot: Rc<RefCell<Option<ListenerId>>> = Rc::default();
        let calls = Rc::new(Cell::new(0));
        let (handle, id_slot, count) = (events.clone(), Rc::clone(&slot), Rc::clone(&calls));
        let id = events.on(EventKind::Start, move |_| {
            count.set(count.get() + 1);
            if let Some(id) = *id_slot.borrow() {
                handle.off(EventKind::Start, id);
            }
        });
        *slot.borrow_mut() = Some(id);
        events.emit(&TourEvent::Start);
        events.emit(&TourEvent::Start);
        assert_eq!(calls.get(), 1);
        assert_eq!(events.listener_count(EventKind::Start), 0);
    }

    #[test]
    fn subscription_outliving_table_is_harmless() {
        let events = TourEvents::new();
        let sub = events.subscribe(EventKind::Stop, |_| {});
        assert_eq!(sub.kind(), EventKind::Stop);
        drop(events);
        drop(sub);
    }
}
